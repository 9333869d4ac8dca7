use std::io::{self, Read};
use std::net::{Ipv4Addr, Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use holler::{read_request_with, ReadConfig};

use crate::write_res::{write_bad_request, write_handler_error, write_ok};
use crate::{Error, Handler, ServerConfig};

const LINGER_TIMEOUT: Duration = Duration::from_millis(500);
const LINGER_MAX_DRAIN: usize = 64 * 1024;
const ACCEPT_BACKOFF_MIN: Duration = Duration::from_millis(10);
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// A running server. Each connection gets its own thread and one response.
pub struct Server {
    closed: Arc<AtomicBool>,
    local_addr: SocketAddr,
    accept_thread: Option<JoinHandle<()>>,
}

/// Bind according to `config` and start accepting connections.
pub fn serve<H: Handler>(config: ServerConfig, handler: H) -> Result<Server, Error> {
    let listener = TcpListener::bind(config.addr())?;
    let local_addr = listener.local_addr()?;

    let closed = Arc::new(AtomicBool::new(false));

    let accept = AcceptLoop {
        listener,
        closed: closed.clone(),
        handler: Arc::new(handler),
        config,
    };

    let accept_thread = thread::Builder::new()
        .name("hollersrv-accept".into())
        .spawn(move || accept.run())?;

    debug!("Listening on {}", local_addr);

    Ok(Server {
        closed,
        local_addr,
        accept_thread: Some(accept_thread),
    })
}

impl Server {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Stop accepting connections. Connections in flight run to completion.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // accept() only returns on a connection, so make one.
        let mut wake_addr = self.local_addr;
        if wake_addr.ip().is_unspecified() {
            wake_addr.set_ip(Ipv4Addr::LOCALHOST.into());
        }
        if let Err(e) = TcpStream::connect(wake_addr) {
            debug!("Failed to wake accept loop: {}", e);
        }

        if let Some(t) = self.accept_thread.take() {
            t.join()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "accept thread panicked"))?;
        }

        debug!("Server on {} closed", self.local_addr);

        Ok(())
    }

    /// Block on the accept loop. Returns once another thread closed the server.
    pub fn join(mut self) {
        if let Some(t) = self.accept_thread.take() {
            if t.join().is_err() {
                warn!("Accept thread panicked");
            }
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close server: {}", e);
        }
    }
}

struct AcceptLoop<H> {
    listener: TcpListener,
    closed: Arc<AtomicBool>,
    handler: Arc<H>,
    config: ServerConfig,
}

impl<H: Handler> AcceptLoop<H> {
    fn run(self) {
        let mut failures: u32 = 0;

        while !self.closed.load(Ordering::SeqCst) {
            let (stream, peer) = match self.listener.accept() {
                Ok(v) => {
                    failures = 0;
                    v
                }
                Err(e) => {
                    if self.closed.load(Ordering::SeqCst) {
                        break;
                    }
                    failures = failures.saturating_add(1);
                    let wait = accept_backoff(failures);
                    warn!("Accept failed ({} in a row), retry in {:?}: {}", failures, wait, e);
                    thread::sleep(wait);
                    continue;
                }
            };

            if self.closed.load(Ordering::SeqCst) {
                break;
            }

            trace!("Accepted connection from {}", peer);

            let handler = self.handler.clone();
            let config = self.config;

            let spawned = thread::Builder::new()
                .name(format!("hollersrv-{}", peer))
                .spawn(move || {
                    if let Err(e) = stream.set_read_timeout(config.read_timeout()) {
                        warn!("Failed to set read timeout for {}: {}", peer, e);
                        return;
                    }
                    if let Err(e) = handle_connection(&stream, &*handler, config.read_config()) {
                        debug!("Connection from {} failed: {}", peer, e);
                    }
                    linger(&stream);
                });

            if let Err(e) = spawned {
                warn!("Failed to spawn thread for {}: {}", peer, e);
            }
        }

        debug!("Accept loop ended");
    }
}

/// Pause after `failures` consecutive accept errors, such as running out of
/// file descriptors.
fn accept_backoff(failures: u32) -> Duration {
    let shift = failures.saturating_sub(1).min(16);
    ACCEPT_BACKOFF_MIN
        .saturating_mul(1 << shift)
        .min(ACCEPT_BACKOFF_MAX)
}

/// Send FIN and drain what the peer still sends, so that closing with unread
/// input doesn't reset the connection before the response is read.
fn linger(stream: &TcpStream) {
    if stream.shutdown(Shutdown::Write).is_err() {
        return;
    }
    if stream.set_read_timeout(Some(LINGER_TIMEOUT)).is_err() {
        return;
    }

    let mut reader = stream;
    let mut scratch = [0_u8; 1024];
    let mut drained = 0;

    while drained < LINGER_MAX_DRAIN {
        match reader.read(&mut scratch) {
            Ok(0) | Err(_) => break,
            Ok(n) => drained += n,
        }
    }
}

/// Read one request from `stream`, run `handler` and write the response.
///
/// A request that can't be parsed gets a 400 before the error is returned.
/// Failing to read the stream gets no response.
pub fn handle_connection<S>(
    mut stream: S,
    handler: &dyn Handler,
    config: &ReadConfig,
) -> Result<(), Error>
where
    S: io::Read + io::Write,
{
    let request = match read_request_with(&mut stream, config) {
        Ok(v) => v,
        Err(e) => {
            if e.is_syntax() || e.is_protocol() {
                if let Err(we) = write_bad_request(&mut stream, &e) {
                    trace!("Failed to write bad request response: {}", we);
                }
            }
            return Err(e.into());
        }
    };

    let mut body = Vec::new();

    match handler.call(&mut body, &request) {
        Ok(()) => write_ok(&mut stream, &body)?,
        Err(err) => {
            debug!("Handler refused {}: {}", request.target(), err);
            write_handler_error(&mut stream, &err)?;
        }
    }

    Ok(())
}

pub mod test {
    use std::borrow::Cow;
    use std::io::{self, Read};

    /// In memory connection. Input is handed out in reads of at most `chunk`
    /// bytes and everything written is kept.
    pub struct TestStream {
        input: io::Cursor<Vec<u8>>,
        chunk: usize,
        output: Vec<u8>,
    }

    impl TestStream {
        pub fn new(input: impl Into<Vec<u8>>) -> Self {
            TestStream {
                input: io::Cursor::new(input.into()),
                chunk: usize::MAX,
                output: vec![],
            }
        }

        pub fn with_chunk(mut self, chunk: usize) -> Self {
            self.chunk = chunk.max(1);
            self
        }

        pub fn output(&self) -> &[u8] {
            &self.output
        }

        /// Output as text. Invalid utf-8 shows up as replacement characters.
        pub fn output_str(&self) -> Cow<'_, str> {
            String::from_utf8_lossy(&self.output)
        }
    }

    impl io::Read for TestStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let max = self.chunk.min(buf.len());
            self.input.read(&mut buf[..max])
        }
    }

    impl io::Write for TestStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
