use std::net::{Ipv4Addr, TcpListener};

use hollersrv::holler::read_request;
use hollersrv::DEFAULT_PORT;
use tracing_subscriber::filter::LevelFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    let listener = match TcpListener::bind((Ipv4Addr::LOCALHOST, DEFAULT_PORT)) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Failed to listen on {}: {}", DEFAULT_PORT, e);
            std::process::exit(1);
        }
    };

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Accept failed: {}", e);
                continue;
            }
        };

        log::info!("Connection accepted");

        match read_request(&stream) {
            Ok(request) => {
                println!("Request line:");
                println!("- Method: {}", request.method());
                println!("- Target: {}", request.target());
                println!("- Version: {}", request.http_version());
                println!("Headers:");
                for (name, value) in request.headers() {
                    println!("- {}: {}", name, value);
                }
                println!("Body:");
                println!("{}", String::from_utf8_lossy(request.body()));
            }
            Err(e) => log::warn!("Failed to read request: {}", e),
        }

        log::info!("Connection closed");
    }
}
