use std::io;

use holler::Request;
use http::StatusCode;
use thiserror::Error;

/// Called once per request with a sink for the response body.
///
/// What is written to the sink becomes the body of a 200 response. Returning
/// an error discards it and responds with the error instead.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, w: &mut dyn io::Write, request: &Request) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&mut dyn io::Write, &Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn call(&self, w: &mut dyn io::Write, request: &Request) -> Result<(), HandlerError> {
        (self)(w, request)
    }
}

/// A handler's refusal, sent as the response status and body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<io::Error> for HandlerError {
    fn from(value: io::Error) -> Self {
        HandlerError::internal(value.to_string())
    }
}
