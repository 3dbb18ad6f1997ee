use service_core::endpoint_error::EndpointError;
use service_core::simple_err_map;

use super::GenericError;
use crate::course::{Course, CoursesRepository};

/// Public catalog listing: published courses only.
pub(crate) async fn list_courses(
    courses_repository: &impl CoursesRepository,
) -> Result<Vec<Course>, EndpointError<GenericError>> {
    courses_repository
        .list_published()
        .await
        .map_err(simple_err_map!("List courses failed.", EndpointError::internal()))
}
