use std::error::Error;
use std::fmt::Display;

use http::StatusCode;
use strum::AsRefStr;

use crate::operation_error::OperationError;

/// Error envelope returned by every operation: either one of the two
/// cross-cutting kinds, or the operation's own error enum.
#[derive(Debug, AsRefStr)]
pub enum EndpointError<E: OperationError> {
    Validation(String),
    Internal,
    Operation(E),
}

impl<E: OperationError> EndpointError<E> {
    pub fn validation(msg: impl Into<String>) -> Self {
        EndpointError::Validation(msg.into())
    }

    pub fn internal() -> Self {
        EndpointError::Internal
    }

    pub fn operation(err: E) -> Self {
        EndpointError::Operation(err)
    }
}

impl<E: OperationError> OperationError for EndpointError<E> {
    fn status_code(&self) -> StatusCode {
        match self {
            EndpointError::Validation(_) => StatusCode::BAD_REQUEST,
            EndpointError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            EndpointError::Operation(e) => e.status_code(),
        }
    }
}

impl<E: OperationError> Error for EndpointError<E> {}

impl<E: OperationError> Display for EndpointError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind: &str = self.as_ref();
        let msg = match self {
            EndpointError::Validation(msg) => msg.clone(),
            EndpointError::Internal => String::from("Internal server error."),
            EndpointError::Operation(err) => err.to_string(),
        };

        write!(f, "{}: {}", kind, msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum FakeError {
        #[error("Thing not found.")]
        NotFound,
    }

    impl OperationError for FakeError {
        fn status_code(&self) -> StatusCode {
            StatusCode::NOT_FOUND
        }
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            EndpointError::<FakeError>::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(EndpointError::<FakeError>::internal().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            EndpointError::operation(FakeError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = EndpointError::operation(FakeError::NotFound);
        assert_eq!(err.to_string(), "Operation: Thing not found.");
    }
}
