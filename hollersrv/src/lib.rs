//! Thread per connection http 1.1 server on top of [`holler`].
//!
//! Every connection carries exactly one request. The [`Handler`] writes a
//! body, the server wraps it in a response and closes the connection.

#[macro_use]
extern crate log;

pub use holler;
pub use http;

mod error;
pub use error::Error;

mod config;
pub use config::{ServerConfig, DEFAULT_PORT};

mod handler;
pub use handler::{Handler, HandlerError};

mod write_res;
pub use write_res::{write_handler_error, write_ok};

mod server;
pub use server::{handle_connection, serve, test, Server};
