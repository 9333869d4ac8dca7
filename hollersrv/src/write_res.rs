use std::io;

use holler::response::{default_headers, write_response};
use http::StatusCode;

use crate::{Error, HandlerError};

/// Respond 200 with whatever the handler wrote.
pub fn write_ok(writer: &mut dyn io::Write, body: &[u8]) -> Result<(), Error> {
    write_response(writer, StatusCode::OK, &default_headers(body.len()), body)?;
    Ok(())
}

/// Respond with the handler's status, using its message as body.
pub fn write_handler_error(writer: &mut dyn io::Write, err: &HandlerError) -> Result<(), Error> {
    let body = err.message.as_bytes();
    write_response(writer, err.status, &default_headers(body.len()), body)?;
    Ok(())
}

/// Respond 400 to a request that could not be parsed.
pub(crate) fn write_bad_request(
    writer: &mut dyn io::Write,
    err: &holler::Error,
) -> Result<(), Error> {
    let body = format!("{}\n", err);
    let body = body.as_bytes();
    write_response(
        writer,
        StatusCode::BAD_REQUEST,
        &default_headers(body.len()),
        body,
    )?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ok_response() {
        let mut out = vec![];
        write_ok(&mut out, b"All good, frfr\n").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "HTTP/1.1 200 OK\r\n\
            content-length: 15\r\n\
            connection: close\r\n\
            content-type: text/plain\r\n\
            \r\n\
            All good, frfr\n"
        );
    }

    #[test]
    fn handler_error_response() {
        let mut out = vec![];
        let err = HandlerError::internal("Woopsie, my bad\n");
        write_handler_error(&mut out, &err).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(out.contains("content-length: 16\r\n"));
        assert!(out.ends_with("\r\n\r\nWoopsie, my bad\n"));
    }

    #[test]
    fn handler_error_other_status() {
        let mut out = vec![];
        let err = HandlerError::new(StatusCode::IM_A_TEAPOT, "short and stout");
        write_handler_error(&mut out, &err).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("HTTP/1.1 418 \r\n"));
    }

    #[test]
    fn bad_request_response() {
        let mut out = vec![];
        write_bad_request(&mut out, &holler::Error::MethodNotCapitalized).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(out.ends_with("\r\n\r\nmethod not properly capitalized\n"));
    }
}
