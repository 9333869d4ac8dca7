use std::fmt;

use crate::header::Headers;
use crate::line::{parse_request_line, RequestLine};
use crate::util::LengthChecker;
use crate::Error;

/// Where a [`Request`] is in reading its input.
///
/// Only ever moves forward, in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    #[default]
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}

/// An HTTP/1.1 request, built up incrementally by [`Request::parse`].
#[derive(Default)]
pub struct Request {
    line: RequestLine,
    headers: Headers,
    body: Vec<u8>,
    phase: Phase,
    body_checker: Option<LengthChecker>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `input` to the request, returning how many bytes were used.
    ///
    /// 0 bytes used without an error means more input is needed. Any error is
    /// fatal for the request. The unused tail of `input` must be offered again,
    /// with more input appended, in the next call.
    pub fn parse(&mut self, input: &[u8]) -> Result<usize, Error> {
        match self.phase {
            Phase::Initialized => {
                let attempt = parse_request_line(input)?;
                let input_used = attempt.input_used();

                if let Some(line) = attempt.into_line() {
                    self.line = line;
                    self.phase = Phase::ParsingHeaders;
                }

                Ok(input_used)
            }
            Phase::ParsingHeaders => {
                let attempt = self.headers.parse(input)?;

                if attempt.is_done() {
                    self.start_body()?;
                }

                Ok(attempt.input_used())
            }
            Phase::ParsingBody => self.parse_body(input),
            Phase::Done => Err(Error::RequestDone),
        }
    }

    /// Without a body to wait for, the request goes straight to done.
    fn start_body(&mut self) -> Result<(), Error> {
        self.phase = Phase::ParsingBody;

        match self.content_length()? {
            None | Some(0) => self.phase = Phase::Done,
            Some(len) => self.body_checker = Some(LengthChecker::new(len)),
        }

        Ok(())
    }

    fn parse_body(&mut self, input: &[u8]) -> Result<usize, Error> {
        if input.is_empty() {
            return Err(Error::BodyNoProgress);
        }

        let Some(checker) = self.body_checker.as_mut() else {
            unreachable!("body phase is only entered with a content-length");
        };

        checker.append(input.len())?;
        self.body.extend_from_slice(input);

        if checker.complete() {
            self.phase = Phase::Done;
        }

        Ok(input.len())
    }

    /// The parsed `content-length` header, if there is one.
    pub fn content_length(&self) -> Result<Option<usize>, Error> {
        let Some(v) = self.headers.get("content-length") else {
            return Ok(None);
        };

        if v.is_empty() || !v.bytes().all(|c| c.is_ascii_digit()) {
            return Err(Error::BadContentLength(v.to_string()));
        }

        let len = v
            .parse::<usize>()
            .map_err(|_| Error::BadContentLength(v.to_string()))?;

        Ok(Some(len))
    }

    /// Body length being waited for. Only known once the body phase started.
    pub fn expected_body_len(&self) -> Option<usize> {
        self.body_checker.as_ref().map(|c| c.expected())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> &str {
        self.line.method()
    }

    pub fn target(&self) -> &str {
        self.line.target()
    }

    pub fn http_version(&self) -> &str {
        self.line.http_version()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("phase", &self.phase)
            .field("line", &self.line)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

impl TryFrom<Request> for http::Request<Vec<u8>> {
    type Error = Error;

    fn try_from(value: Request) -> Result<Self, Self::Error> {
        if !value.is_done() {
            return Err(Error::Http(format!(
                "request not done, in phase {:?}",
                value.phase
            )));
        }

        let mut builder = http::Request::builder()
            .method(value.method())
            .uri(value.target())
            .version(http::Version::HTTP_11);

        for (name, v) in value.headers.iter() {
            builder = builder.header(name, v);
        }

        Ok(builder.body(value.body)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Offer input the way a reader would, returning what was left unused.
    fn feed<'a>(r: &mut Request, mut input: &'a [u8]) -> Result<&'a [u8], Error> {
        while !r.is_done() && !input.is_empty() {
            let n = r.parse(input)?;
            if n == 0 {
                break;
            }
            input = &input[n..];
        }
        Ok(input)
    }

    #[test]
    fn starts_initialized() {
        let r = Request::new();
        assert_eq!(r.phase(), Phase::Initialized);
        assert!(r.headers().is_empty());
        assert!(r.body().is_empty());
        assert_eq!(r.expected_body_len(), None);
    }

    #[test]
    fn phases_advance() {
        let mut r = Request::new();

        assert_eq!(r.parse(b"GET / HTTP/1.1\r\n").unwrap(), 16);
        assert_eq!(r.phase(), Phase::ParsingHeaders);

        assert_eq!(r.parse(b"Host: x\r\n").unwrap(), 9);
        assert_eq!(r.phase(), Phase::ParsingHeaders);

        // No content-length, the body phase is skipped.
        assert_eq!(r.parse(b"\r\n").unwrap(), 2);
        assert_eq!(r.phase(), Phase::Done);
        assert_eq!(r.expected_body_len(), None);
    }

    #[test]
    fn blank_line_enters_body_phase() {
        let mut r = Request::new();
        r.parse(b"POST / HTTP/1.1\r\n").unwrap();
        r.parse(b"Content-Length: 4\r\n").unwrap();
        assert_eq!(r.parse(b"\r\n").unwrap(), 2);
        assert_eq!(r.phase(), Phase::ParsingBody);
        assert_eq!(r.expected_body_len(), Some(4));
    }

    #[test]
    fn partial_input_uses_nothing() {
        let mut r = Request::new();
        assert_eq!(r.parse(b"GET / HTT").unwrap(), 0);
        assert_eq!(r.phase(), Phase::Initialized);

        assert_eq!(r.parse(b"GET / HTTP/1.1\r\nHo").unwrap(), 16);
        assert_eq!(r.parse(b"Ho").unwrap(), 0);
        assert_eq!(r.phase(), Phase::ParsingHeaders);
        assert!(r.headers().is_empty());
    }

    #[test]
    fn full_request_with_body() {
        let mut r = Request::new();
        let input = b"POST /submit HTTP/1.1\r\n\
            Host: localhost:42069\r\n\
            Content-Length: 13\r\n\
            \r\n\
            hello world!\n";
        let rest = feed(&mut r, input).unwrap();

        assert!(rest.is_empty());
        assert!(r.is_done());
        assert_eq!(r.method(), "POST");
        assert_eq!(r.target(), "/submit");
        assert_eq!(r.http_version(), "1.1");
        assert_eq!(r.headers().get("host"), Some("localhost:42069"));
        assert_eq!(r.body(), b"hello world!\n");
        assert_eq!(r.expected_body_len(), Some(13));
    }

    #[test]
    fn body_in_pieces() {
        let mut r = Request::new();
        let rest = feed(
            &mut r,
            b"PUT /x HTTP/1.1\r\nContent-Length: 6\r\n\r\nab",
        )
        .unwrap();
        assert!(rest.is_empty());
        assert_eq!(r.phase(), Phase::ParsingBody);
        assert_eq!(r.expected_body_len(), Some(6));

        assert_eq!(r.parse(b"cd").unwrap(), 2);
        assert_eq!(r.phase(), Phase::ParsingBody);
        assert_eq!(r.parse(b"ef").unwrap(), 2);
        assert!(r.is_done());
        assert_eq!(r.body(), b"abcdef");
    }

    #[test]
    fn zero_content_length_skips_body() {
        let mut r = Request::new();
        let rest = feed(&mut r, b"GET / HTTP/1.1\r\nContent-Length: 0\r\n\r\n").unwrap();
        assert!(rest.is_empty());
        assert!(r.is_done());
        assert!(r.body().is_empty());
    }

    #[test]
    fn body_longer_than_content_length() {
        let mut r = Request::new();
        let err = feed(
            &mut r,
            b"POST / HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcd",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::BodyExceedsContentLength {
                expected: 3,
                actual: 4
            }
        ));
        assert!(r.body().is_empty());
        assert!(!r.is_done());
    }

    #[test]
    fn bad_content_length() {
        for v in ["abc", "-1", "+4", "4 4", "1, 1"] {
            let mut r = Request::new();
            let input = format!("POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\nbody", v);
            let err = feed(&mut r, input.as_bytes()).unwrap_err();
            assert!(matches!(err, Error::BadContentLength(_)), "{}", v);
        }
    }

    #[test]
    fn empty_input_while_expecting_body() {
        let mut r = Request::new();
        feed(&mut r, b"POST / HTTP/1.1\r\nContent-Length: 3\r\n\r\na").unwrap();
        let err = r.parse(b"").unwrap_err();
        assert!(matches!(err, Error::BodyNoProgress));
    }

    #[test]
    fn parse_after_done() {
        let mut r = Request::new();
        feed(&mut r, b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(r.is_done());

        let err = r.parse(b"GET / HTTP/1.1\r\n").unwrap_err();
        assert!(matches!(err, Error::RequestDone));
        let err = r.parse(b"").unwrap_err();
        assert!(matches!(err, Error::RequestDone));
    }

    #[test]
    fn done_leaves_trailing_input() {
        let mut r = Request::new();
        let rest = feed(&mut r, b"GET / HTTP/1.1\r\n\r\nGET /next HTTP/1.1\r\n").unwrap();
        assert!(r.is_done());
        assert_eq!(rest, b"GET /next HTTP/1.1\r\n");
    }

    #[test]
    fn errors_propagate() {
        let mut r = Request::new();
        let err = feed(&mut r, b"GET / HTTP/1.0\r\n\r\n").unwrap_err();
        assert!(err.is_protocol());
        assert_eq!(r.phase(), Phase::Initialized);

        let mut r = Request::new();
        let err = feed(&mut r, b"GET / HTTP/1.1\r\nBad Header: x\r\n\r\n").unwrap_err();
        assert!(matches!(err, Error::FieldNameWhitespace));
        assert!(err.is_syntax());
        assert_eq!(r.phase(), Phase::ParsingHeaders);
    }

    #[test]
    fn into_http_request() {
        let mut r = Request::new();
        feed(
            &mut r,
            b"POST /a?b=c HTTP/1.1\r\nHost: q.test\r\nX-A: 1\r\nx-a: 2\r\nContent-Length: 2\r\n\r\nhi",
        )
        .unwrap();

        let req: http::Request<Vec<u8>> = r.try_into().unwrap();
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(req.uri().path(), "/a");
        assert_eq!(req.uri().query(), Some("b=c"));
        assert_eq!(req.version(), http::Version::HTTP_11);
        assert_eq!(req.headers().get("x-a").unwrap(), "1, 2");
        assert_eq!(req.body(), b"hi");
    }

    #[test]
    fn into_http_request_not_done() {
        let mut r = Request::new();
        r.parse(b"GET / HTTP/1.1\r\n").unwrap();
        let res: Result<http::Request<Vec<u8>>, _> = r.try_into();
        assert!(matches!(res, Err(Error::Http(_))));
    }
}
