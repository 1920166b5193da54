//! Error type for skip list construction.

use thiserror::Error;

/// Errors returned by this crate.
///
/// Only construction can fail. Every other operation is total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid configuration: level count must be between 1 and {max}, got {levels}")]
    InvalidConfiguration { levels: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
