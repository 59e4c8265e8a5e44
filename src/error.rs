//! Unified infrastructure error type.

use thiserror::Error;

/// The error type returned by showcase's fallible infrastructure operations.
///
/// Application-level errors (404, 422, etc.) are expressed as raised
/// [`Exception`](crate::Exception)s that render to HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: binding to a port or accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
