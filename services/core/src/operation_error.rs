use std::error::Error;

use http::StatusCode;

/// Trait to be implemented by errors returned by the different operations of services.
pub trait OperationError: Error {
    /// HTTP status code corresponding to this error.
    fn status_code(&self) -> StatusCode;
}
