use http::StatusCode;
use serde::{Deserialize, Serialize};
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use super::update_progress::owned_enrollment;
use crate::enrollment::{Enrollment, EnrollmentsRepository};

#[derive(Deserialize, Debug, Default)]
pub struct AddReviewInput {
    #[serde(default)]
    pub rating: Option<i64>,

    #[serde(default)]
    pub review: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum AddReviewError {
    #[error("Enrollment not found.")]
    NotFound,

    #[error("Access denied.")]
    AccessDenied,
}

impl OperationError for AddReviewError {
    fn status_code(&self) -> StatusCode {
        match self {
            AddReviewError::NotFound => StatusCode::NOT_FOUND,
            AddReviewError::AccessDenied => StatusCode::FORBIDDEN,
        }
    }
}

pub(crate) async fn add_review(
    enrollments_repository: &impl EnrollmentsRepository,
    uid: &str,
    enrollment_id: &str,
    input: AddReviewInput,
) -> Result<Enrollment, EndpointError<AddReviewError>> {
    let rating = match input.rating {
        Some(rating @ 1..=5) => rating as u8,
        _ => return Err(EndpointError::validation("Rating must be between 1 and 5.")),
    };

    let mut enrollment = owned_enrollment(
        enrollments_repository,
        uid,
        enrollment_id,
        || AddReviewError::NotFound,
        || AddReviewError::AccessDenied,
    )
    .await?;

    enrollment.set_review(rating, input.review.unwrap_or_default());

    enrollments_repository.save_review(&enrollment).await.map_err(|e| {
        log::error!("Persisting review failed: {:?}", e);
        EndpointError::internal()
    })?;

    Ok(enrollment)
}
