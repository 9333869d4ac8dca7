use std::io;

use thiserror::Error;

/// Error type for holler
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("incomplete request-line")]
    IncompleteRequestLine,

    #[error("request-line is not valid utf-8")]
    RequestLineNotUtf8,

    #[error("method not properly capitalized")]
    MethodNotCapitalized,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error("unexpected whitespace in field name")]
    FieldNameWhitespace,

    #[error("invalid character in field name: {0:#04x}")]
    FieldNameInvalidChar(u8),

    #[error("missing field name")]
    MissingFieldName,

    #[error("no colon found in header line")]
    MissingColon,

    #[error("missing field value")]
    MissingFieldValue,

    #[error("field value is not valid utf-8")]
    FieldValueNotUtf8,

    #[error("content-length header not a number: {0}")]
    BadContentLength(String),

    #[error("body length exceeds content-length ({actual} > {expected})")]
    BodyExceedsContentLength { expected: usize, actual: usize },

    #[error("no body bytes offered while expecting more")]
    BodyNoProgress,

    #[error("request is already done")]
    RequestDone,

    #[error("stream ended before request head was complete")]
    IncompleteHead,

    #[error("stream ended with truncated body ({actual} of {expected} bytes)")]
    TruncatedBody { expected: usize, actual: usize },

    #[error("request larger than max buffer size {0}")]
    RequestTooLarge(usize),

    #[error("http: {0}")]
    Http(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Request-line or header syntax violation.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::IncompleteRequestLine
                | Error::RequestLineNotUtf8
                | Error::MethodNotCapitalized
                | Error::FieldNameWhitespace
                | Error::FieldNameInvalidChar(_)
                | Error::MissingFieldName
                | Error::MissingColon
                | Error::MissingFieldValue
                | Error::FieldValueNotUtf8
        )
    }

    /// Well formed syntax that breaks the protocol contract.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedVersion(_)
                | Error::BadContentLength(_)
                | Error::BodyExceedsContentLength { .. }
                | Error::BodyNoProgress
                | Error::RequestDone
                | Error::RequestTooLarge(_)
        )
    }

    /// The stream ended early or failed to read.
    pub fn is_stream(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::IncompleteHead | Error::TruncatedBody { .. }
        )
    }
}

impl From<http::Error> for Error {
    fn from(value: http::Error) -> Self {
        Error::Http(value.to_string())
    }
}
