use service_core::endpoint_error::EndpointError;

use super::{join_courses, EnrollmentWithCourse, GenericError};
use crate::course::CoursesRepository;
use crate::enrollment::EnrollmentsRepository;

pub(crate) async fn list_enrollments(
    enrollments_repository: &impl EnrollmentsRepository,
    courses_repository: &impl CoursesRepository,
    uid: &str,
) -> Result<Vec<EnrollmentWithCourse>, EndpointError<GenericError>> {
    let enrollments = enrollments_repository.list_for_user(uid).await.map_err(|e| {
        log::error!("List enrollments failed for {}: {:?}", uid, e);
        EndpointError::internal()
    })?;

    join_courses(courses_repository, enrollments).await.map_err(|e| {
        log::error!("Course join failed: {:?}", e);
        EndpointError::internal()
    })
}
