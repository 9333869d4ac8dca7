//! Incremental http 1.1 request parsing over byte streams.
//!
//! Input arrives in whatever pieces the transport delivers. A [`Request`] is
//! fed those pieces and reports how much of each it used, never more than
//! belongs to the request. [`read_request`] drives that loop over any
//! [`std::io::Read`].
//!
//! ```
//! let input = b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n";
//!
//! let request = holler::read_request(&input[..]).unwrap();
//!
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.target(), "/hello");
//! assert_eq!(request.headers().get("Host"), Some("x"));
//! ```

#[macro_use]
extern crate log;

// Re-export for status codes and conversions.
pub use http;

mod error;
pub use error::Error;

mod config;
pub use config::{ReadConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_BUFFER};

mod util;

mod line;
pub use line::{parse_request_line, LineAttempt, RequestLine};

mod header;
pub use header::{HeaderAttempt, Headers};

mod request;
pub use request::{Phase, Request};

mod fill;

mod read_req;
pub use read_req::{read_request, read_request_with};

pub mod response;
