use std::io::Write;
use std::sync::mpsc::{self, Receiver};

use hollersrv::holler::Request;
use hollersrv::{serve, HandlerError, Server, ServerConfig, DEFAULT_PORT};
use log::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;

fn handler(w: &mut dyn Write, request: &Request) -> Result<(), HandlerError> {
    match request.target() {
        "/yourproblem" => Err(HandlerError::bad_request("Your problem is not my problem\n")),
        "/myproblem" => Err(HandlerError::internal("Woopsie, my bad\n")),
        _ => {
            w.write_all(b"All good, frfr\n")?;
            Ok(())
        }
    }
}

/// Serve until told to stop, then close the server.
fn run_until_stopped(server: &mut Server, stop: &Receiver<()>) {
    // A dropped sender also means stop.
    let _ = stop.recv();

    if let Err(e) = server.close() {
        warn!("Failed to close server: {}", e);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    let (stop_tx, stop_rx) = mpsc::channel();

    // SIGINT and SIGTERM.
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    }) {
        error!("Error setting signal handler: {}", e);
        std::process::exit(1);
    }

    let mut server = match serve(ServerConfig::for_port(DEFAULT_PORT), handler) {
        Ok(v) => v,
        Err(e) => {
            error!("Error starting server: {}", e);
            std::process::exit(1);
        }
    };

    info!("Server started on port {}", server.local_addr().port());

    run_until_stopped(&mut server, &stop_rx);

    info!("Server gracefully stopped");
}
