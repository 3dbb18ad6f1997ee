use http::StatusCode;
use serde::Serialize;
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use super::update_progress::owned_enrollment;
use crate::enrollment::{Enrollment, EnrollmentStatus, EnrollmentsRepository};
use crate::user::UsersRepository;

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum CompleteCourseError {
    #[error("Enrollment not found.")]
    NotFound,

    #[error("Access denied.")]
    AccessDenied,
}

impl OperationError for CompleteCourseError {
    fn status_code(&self) -> StatusCode {
        match self {
            CompleteCourseError::NotFound => StatusCode::NOT_FOUND,
            CompleteCourseError::AccessDenied => StatusCode::FORBIDDEN,
        }
    }
}

pub(crate) async fn complete_course(
    enrollments_repository: &impl EnrollmentsRepository,
    users_repository: &impl UsersRepository,
    uid: &str,
    enrollment_id: &str,
) -> Result<Enrollment, EndpointError<CompleteCourseError>> {
    let mut enrollment = owned_enrollment(
        enrollments_repository,
        uid,
        enrollment_id,
        || CompleteCourseError::NotFound,
        || CompleteCourseError::AccessDenied,
    )
    .await?;

    // Completing twice is a no-op; the stats bump happens only on the
    // transition.
    if enrollment.status == EnrollmentStatus::Completed {
        return Ok(enrollment);
    }

    enrollment.mark_completed();

    enrollments_repository.complete(&enrollment).await.map_err(|e| {
        log::error!("Persisting completion failed: {:?}", e);
        EndpointError::internal()
    })?;

    if let Err(e) = users_repository
        .record_completion(uid, enrollment.progress.total_time_spent)
        .await
    {
        log::warn!("Completion stats bump failed for {}: {:?}", uid, e);
    }

    Ok(enrollment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryEnrollments, InMemoryUsers};
    use crate::user::User;

    #[tokio::test]
    async fn completes_and_records_stats() {
        let mut enrollment = Enrollment::new("user-1", "course-1");
        enrollment.record_lesson("lesson-1", 45);
        let id = enrollment.enrollment_id.to_string();

        let enrollments = InMemoryEnrollments::with([enrollment]);
        let users = InMemoryUsers::with([User::builder().uid("user-1").email("a@b.c").build()]);

        let completed = complete_course(&enrollments, &users, "user-1", &id).await.unwrap();

        assert_eq!(completed.status, EnrollmentStatus::Completed);
        assert_eq!(completed.progress.completion_percentage, 100.0);

        let stats = users.snapshot("user-1").unwrap().stats;
        assert_eq!(stats.courses_completed, 1);
        assert_eq!(stats.total_learning_time, 45);
    }

    #[tokio::test]
    async fn completing_twice_does_not_double_count() {
        let enrollment = Enrollment::new("user-1", "course-1");
        let id = enrollment.enrollment_id.to_string();

        let enrollments = InMemoryEnrollments::with([enrollment]);
        let users = InMemoryUsers::with([User::builder().uid("user-1").email("a@b.c").build()]);

        complete_course(&enrollments, &users, "user-1", &id).await.unwrap();
        let again = complete_course(&enrollments, &users, "user-1", &id).await.unwrap();

        assert_eq!(again.status, EnrollmentStatus::Completed);
        assert_eq!(users.snapshot("user-1").unwrap().stats.courses_completed, 1);
    }

    #[tokio::test]
    async fn another_users_enrollment_is_denied() {
        let enrollment = Enrollment::new("user-1", "course-1");
        let id = enrollment.enrollment_id.to_string();

        let enrollments = InMemoryEnrollments::with([enrollment]);
        let users = InMemoryUsers::default();

        let err = complete_course(&enrollments, &users, "user-2", &id).await.unwrap_err();
        assert!(matches!(err, EndpointError::Operation(CompleteCourseError::AccessDenied)));
    }
}
