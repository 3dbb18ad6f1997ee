use std::error::Error;

use async_trait::async_trait;
use thiserror::Error;

use super::types::User;

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("A user with this uid is already registered.")]
    DuplicateUser,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum GetUserError {
    #[error("User not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum UpdateUserError {
    #[error("User not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[async_trait]
pub trait UsersRepository {
    /// Creates the user document; the uid arbitrates uniqueness.
    async fn create(&self, user: &User) -> Result<(), CreateUserError>;

    async fn get(&self, uid: &str) -> Result<User, GetUserError>;

    /// Whole-document write used by profile updates.
    async fn save(&self, user: &User) -> Result<(), UpdateUserError>;

    /// Atomic increment of the monotonic enrollment counter.
    async fn increment_enrollment_count(&self, uid: &str) -> Result<(), UpdateUserError>;

    /// Atomic update of completion stats: one more course completed, plus the
    /// learning time the enrollment had accumulated.
    async fn record_completion(&self, uid: &str, learning_time: u32) -> Result<(), UpdateUserError>;
}
