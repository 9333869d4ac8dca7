use std::fmt;
use std::str;

use crate::util::find_crlf;
use crate::Error;

const HTTP_11: &str = "HTTP/1.1";

/// The first line of a request, `METHOD target HTTP/1.1`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    http_version: String,
}

impl RequestLine {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target, verbatim. Not decoded or normalized.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Version without the `HTTP/` prefix, i.e. `"1.1"`.
    pub fn http_version(&self) -> &str {
        &self.http_version
    }
}

impl fmt::Debug for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RequestLine({} {} HTTP/{})",
            self.method, self.target, self.http_version
        )
    }
}

/// Result of trying to parse a request-line from some input.
#[derive(Debug)]
pub struct LineAttempt {
    input_used: usize,
    line: Option<RequestLine>,
}

impl LineAttempt {
    const fn empty() -> Self {
        LineAttempt {
            input_used: 0,
            line: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.input_used > 0
    }

    /// Bytes consumed, including the terminating `\r\n`.
    pub fn input_used(&self) -> usize {
        self.input_used
    }

    pub fn line(&self) -> Option<&RequestLine> {
        self.line.as_ref()
    }

    pub fn into_line(self) -> Option<RequestLine> {
        self.line
    }
}

/// Parse a request-line from the start of `input`.
///
/// Returns an unsuccessful attempt (nothing used) if there is no `\r\n` yet.
pub fn parse_request_line(input: &[u8]) -> Result<LineAttempt, Error> {
    let Some(end) = find_crlf(input) else {
        return Ok(LineAttempt::empty());
    };

    let line = str::from_utf8(&input[..end]).map_err(|_| Error::RequestLineNotUtf8)?;

    let parts: Vec<&str> = line.split(' ').collect();

    let &[method, target, version] = parts.as_slice() else {
        return Err(Error::IncompleteRequestLine);
    };

    if target.is_empty() {
        return Err(Error::IncompleteRequestLine);
    }

    if method.is_empty() || !method.bytes().all(|c| c.is_ascii_uppercase()) {
        return Err(Error::MethodNotCapitalized);
    }

    if version != HTTP_11 {
        return Err(Error::UnsupportedVersion(version.to_string()));
    }

    let http_version = &version["HTTP/".len()..];

    Ok(LineAttempt {
        input_used: end + 2,
        line: Some(RequestLine {
            method: method.to_string(),
            target: target.to_string(),
            http_version: http_version.to_string(),
        }),
    })
}
