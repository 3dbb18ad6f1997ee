use http::StatusCode;
use serde::{Deserialize, Serialize};
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use crate::course::{CoursesRepository, GetCourseError};
use crate::enrollment::{CreateEnrollment, Enrollment, EnrollmentsRepository};
use crate::user::UsersRepository;

#[derive(Deserialize, Debug, Default)]
pub struct EnrollInput {
    #[serde(default)]
    pub course_id: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum EnrollError {
    #[error("Course not found.")]
    CourseNotFound,

    /// Carries the record that already owns the pair, so the caller can
    /// resume instead of retrying.
    #[error("Already enrolled in this course.")]
    AlreadyEnrolled { enrollment: Box<Enrollment> },
}

pub(crate) async fn enroll(
    enrollments_repository: &impl EnrollmentsRepository,
    courses_repository: &impl CoursesRepository,
    users_repository: &impl UsersRepository,
    uid: &str,
    input: EnrollInput,
) -> Result<Enrollment, EndpointError<EnrollError>> {
    let course_id = input
        .course_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| EndpointError::validation("Course ID is required."))?;

    courses_repository.get(&course_id).await.map_err(|err| match err {
        GetCourseError::NotFound => EndpointError::operation(EnrollError::CourseNotFound),
        e => {
            log::error!("Course lookup failed: {:?}", e);
            EndpointError::internal()
        }
    })?;

    let outcome = enrollments_repository.create(uid, &course_id).await.map_err(|e| {
        log::error!("Create enrollment failed: {:?}", e);
        EndpointError::internal()
    })?;

    let enrollment = match outcome {
        CreateEnrollment::AlreadyEnrolled(existing) => {
            return Err(EndpointError::operation(EnrollError::AlreadyEnrolled {
                enrollment: Box::new(existing),
            }));
        }
        CreateEnrollment::Created(enrollment) => enrollment,
    };

    // Counter bumps are best-effort: the enrollment record is the source of
    // truth and already persisted.
    if let Err(e) = users_repository.increment_enrollment_count(uid).await {
        log::warn!("Enrollment count bump failed for {}: {:?}", uid, e);
    }
    if let Err(e) = courses_repository.increment_students_count(&course_id).await {
        log::warn!("Students count bump failed for {}: {:?}", course_id, e);
    }

    Ok(enrollment)
}

impl OperationError for EnrollError {
    fn status_code(&self) -> StatusCode {
        match self {
            EnrollError::CourseNotFound => StatusCode::NOT_FOUND,
            EnrollError::AlreadyEnrolled { .. } => StatusCode::BAD_REQUEST,
        }
    }
}
