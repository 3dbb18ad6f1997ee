use service_core::endpoint_error::EndpointError;

use super::{join_courses, EnrollmentWithCourse, GenericError};
use crate::course::CoursesRepository;
use crate::enrollment::EnrollmentsRepository;

/// Unauthenticated listing across all users, with catalog entries attached.
pub(crate) async fn list_all_enrollments(
    enrollments_repository: &impl EnrollmentsRepository,
    courses_repository: &impl CoursesRepository,
) -> Result<Vec<EnrollmentWithCourse>, EndpointError<GenericError>> {
    let enrollments = enrollments_repository.list_all().await.map_err(|e| {
        log::error!("List all enrollments failed: {:?}", e);
        EndpointError::internal()
    })?;

    join_courses(courses_repository, enrollments).await.map_err(|e| {
        log::error!("Course join failed: {:?}", e);
        EndpointError::internal()
    })
}
