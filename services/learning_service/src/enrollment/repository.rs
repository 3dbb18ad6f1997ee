use std::error::Error;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::types::Enrollment;

/// Outcome of a creation attempt. Losing the uniqueness race is not an
/// error: the caller gets the record that already owns the pair.
#[derive(Clone, Debug)]
pub enum CreateEnrollment {
    Created(Enrollment),
    AlreadyEnrolled(Enrollment),
}

#[derive(Debug, Error)]
pub enum CreateEnrollmentError {
    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum GetEnrollmentError {
    #[error("Enrollment not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum ListEnrollmentsError {
    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum UpdateEnrollmentError {
    #[error("Enrollment not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[async_trait]
pub trait EnrollmentsRepository {
    /// Creates the enrollment for the pair, or returns the existing one. The
    /// datastore arbitrates uniqueness; there is no check-then-act window.
    async fn create(&self, user_id: &str, course_id: &str) -> Result<CreateEnrollment, CreateEnrollmentError>;

    async fn get(&self, enrollment_id: &Uuid) -> Result<Enrollment, GetEnrollmentError>;

    async fn get_for(&self, user_id: &str, course_id: &str) -> Result<Option<Enrollment>, GetEnrollmentError>;

    /// All enrollments of one user, most recent first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Enrollment>, ListEnrollmentsError>;

    /// Unfiltered listing for administrative use. Fully materialized.
    async fn list_all(&self) -> Result<Vec<Enrollment>, ListEnrollmentsError>;

    /// Persists the whole progress block as one document update.
    async fn save_progress(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError>;

    /// Persists status, completion timestamp and progress after completion.
    async fn complete(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError>;

    /// Persists rating, review text and review timestamp.
    async fn save_review(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError>;
}
