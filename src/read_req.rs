use std::io;

use crate::config::ReadConfig;
use crate::fill::FillBuffer;
use crate::request::{Phase, Request};
use crate::Error;

/// Read one request from `reader` using the default [`ReadConfig`].
///
/// Works with anything that reads bytes: a `TcpStream`, a `File`, `&[u8]`.
/// Pass `&mut stream` to keep using the stream afterwards.
pub fn read_request<Read>(reader: Read) -> Result<Request, Error>
where
    Read: io::Read,
{
    read_request_with(reader, &ReadConfig::default())
}

/// Read one request from `reader`.
///
/// Reads until the request is done. Fails if the stream ends before that.
pub fn read_request_with<Read>(reader: Read, config: &ReadConfig) -> Result<Request, Error>
where
    Read: io::Read,
{
    let mut request = Request::new();
    let mut fill_buf = FillBuffer::new(reader, config);

    loop {
        offer_input(&mut request, &mut fill_buf)?;

        if request.is_done() {
            break;
        }

        let n = fill_buf.fill_more()?;
        trace!("Read {} bytes in phase {:?}", n, request.phase());

        if n == 0 {
            return Err(end_of_stream(&request));
        }
    }

    let leftover = fill_buf.window().len();
    if leftover > 0 {
        trace!("Ignoring {} bytes after request", leftover);
    }

    debug!(
        "Read request: {} {} HTTP/{}",
        request.method(),
        request.target(),
        request.http_version()
    );

    Ok(request)
}

/// Offer buffered input until the request is done or wants more input.
fn offer_input<Read: io::Read>(
    request: &mut Request,
    fill_buf: &mut FillBuffer<Read>,
) -> Result<(), Error> {
    while !request.is_done() && !fill_buf.window().is_empty() {
        let input_used = request.parse(fill_buf.window())?;

        if input_used == 0 {
            break;
        }

        trace!("Used {} bytes, now {:?}", input_used, request.phase());
        fill_buf.consume(input_used);
    }

    Ok(())
}

fn end_of_stream(request: &Request) -> Error {
    match request.phase() {
        Phase::ParsingBody => Error::TruncatedBody {
            expected: request.expected_body_len().unwrap_or_default(),
            actual: request.body().len(),
        },
        _ => Error::IncompleteHead,
    }
}
