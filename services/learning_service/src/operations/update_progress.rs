use http::StatusCode;
use serde::{Deserialize, Serialize};
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;
use uuid::Uuid;

use crate::enrollment::{Enrollment, EnrollmentsRepository, GetEnrollmentError};

#[derive(Deserialize, Debug, Default)]
pub struct UpdateProgressInput {
    #[serde(default)]
    pub lesson_id: Option<String>,

    /// Minutes spent in this session; absent means zero.
    #[serde(default)]
    pub time_spent: Option<u32>,
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum UpdateProgressError {
    #[error("Enrollment not found.")]
    NotFound,

    #[error("Access denied.")]
    AccessDenied,
}

impl OperationError for UpdateProgressError {
    fn status_code(&self) -> StatusCode {
        match self {
            UpdateProgressError::NotFound => StatusCode::NOT_FOUND,
            UpdateProgressError::AccessDenied => StatusCode::FORBIDDEN,
        }
    }
}

/// Loads an enrollment by its opaque path identifier and checks ownership.
/// Malformed identifiers map to not-found, the same as absent ones.
pub(crate) async fn owned_enrollment<E>(
    enrollments_repository: &impl EnrollmentsRepository,
    uid: &str,
    enrollment_id: &str,
    not_found: impl Fn() -> E,
    access_denied: impl Fn() -> E,
) -> Result<Enrollment, EndpointError<E>>
where
    E: OperationError,
{
    let enrollment_id =
        Uuid::parse_str(enrollment_id).map_err(|_| EndpointError::operation(not_found()))?;

    let enrollment = enrollments_repository
        .get(&enrollment_id)
        .await
        .map_err(|err| match err {
            GetEnrollmentError::NotFound => EndpointError::operation(not_found()),
            e => {
                log::error!("Enrollment lookup failed: {:?}", e);
                EndpointError::internal()
            }
        })?;

    if enrollment.user_id != uid {
        return Err(EndpointError::operation(access_denied()));
    }

    Ok(enrollment)
}

pub(crate) async fn update_progress(
    enrollments_repository: &impl EnrollmentsRepository,
    uid: &str,
    enrollment_id: &str,
    input: UpdateProgressInput,
) -> Result<Enrollment, EndpointError<UpdateProgressError>> {
    let lesson_id = input
        .lesson_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| EndpointError::validation("Lesson ID is required."))?;

    let mut enrollment = owned_enrollment(
        enrollments_repository,
        uid,
        enrollment_id,
        || UpdateProgressError::NotFound,
        || UpdateProgressError::AccessDenied,
    )
    .await?;

    enrollment.record_lesson(&lesson_id, input.time_spent.unwrap_or(0));

    enrollments_repository.save_progress(&enrollment).await.map_err(|e| {
        log::error!("Save progress failed: {:?}", e);
        EndpointError::internal()
    })?;

    Ok(enrollment)
}
