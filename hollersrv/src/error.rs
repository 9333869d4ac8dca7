use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Holler(#[from] holler::Error),

    #[error("{0}")]
    Io(#[from] io::Error),
}
