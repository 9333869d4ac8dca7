use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use holler::ReadConfig;

/// Port the demo programs listen on.
pub const DEFAULT_PORT: u16 = 42069;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    addr: SocketAddr,
    read_timeout: Option<Duration>,
    read: ReadConfig,
}

impl ServerConfig {
    /// Listen on `127.0.0.1:<port>`. Port 0 picks a free port.
    pub fn for_port(port: u16) -> Self {
        ServerConfig {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
            read_timeout: None,
            read: ReadConfig::default(),
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Deadline for each read from a connection. None waits forever.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_read_config(mut self, read: ReadConfig) -> Self {
        self.read = read;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    pub fn read_config(&self) -> &ReadConfig {
        &self.read
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::for_port(DEFAULT_PORT)
    }
}
