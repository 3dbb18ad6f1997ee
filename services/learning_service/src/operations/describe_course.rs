use http::StatusCode;
use serde::Serialize;
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use crate::course::{repository, Course, CoursesRepository};

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum DescribeCourseError {
    #[error("Course not found.")]
    NotFound,
}

impl OperationError for DescribeCourseError {
    fn status_code(&self) -> StatusCode {
        match self {
            DescribeCourseError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

pub(crate) async fn describe_course(
    courses_repository: &impl CoursesRepository,
    course_id: &str,
) -> Result<Course, EndpointError<DescribeCourseError>> {
    courses_repository.get(course_id).await.map_err(|err| match err {
        repository::GetCourseError::NotFound => EndpointError::operation(DescribeCourseError::NotFound),
        e => {
            log::error!("Course lookup failed: {:?}", e);
            EndpointError::internal()
        }
    })
}
