use std::io::{self, Write};

use http::StatusCode;

use crate::header::Headers;

/// Write `HTTP/1.1 <code> <reason>\r\n`.
///
/// Only 200, 400 and 500 get a reason phrase. Any other code is written with
/// an empty one.
pub fn write_status_line(w: &mut dyn Write, status: StatusCode) -> io::Result<()> {
    let reason = match status {
        StatusCode::OK => "OK",
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "",
    };

    write!(w, "HTTP/1.1 {} {}\r\n", status.as_u16(), reason)
}

/// Write each header as `name: value\r\n`, followed by the empty line.
pub fn write_headers(w: &mut dyn Write, headers: &Headers) -> io::Result<()> {
    for (name, value) in headers {
        write!(w, "{}: {}\r\n", name, value)?;
    }

    w.write_all(b"\r\n")
}

/// Headers sent with every response. The connection is always closed.
pub fn default_headers(content_length: usize) -> Headers {
    let mut headers = Headers::new();
    headers.set("content-length", content_length.to_string());
    headers.set("connection", "close");
    headers.set("content-type", "text/plain");
    headers
}

/// Write a complete response: status line, headers and body.
pub fn write_response(
    w: &mut dyn Write,
    status: StatusCode,
    headers: &Headers,
    body: &[u8],
) -> io::Result<()> {
    trace!("Write response: {} ({} body bytes)", status, body.len());

    write_status_line(w, status)?;
    write_headers(w, headers)?;
    w.write_all(body)?;
    w.flush()
}
