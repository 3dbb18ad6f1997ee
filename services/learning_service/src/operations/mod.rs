pub(crate) mod add_review;
pub(crate) mod check_enrollment;
pub(crate) mod complete_course;
pub(crate) mod create_category;
pub(crate) mod create_course;
pub(crate) mod describe_category;
pub(crate) mod describe_course;
pub(crate) mod enroll;
pub(crate) mod get_profile;
pub(crate) mod list_all_enrollments;
pub(crate) mod list_categories;
pub(crate) mod list_courses;
pub(crate) mod list_enrollments;
pub(crate) mod register_user;
pub(crate) mod update_profile;
pub(crate) mod update_progress;

use std::collections::HashMap;

use http::StatusCode;
use serde::Serialize;
use service_core::operation_error::OperationError;

use crate::course::{Course, CoursesRepository, GetCourseError};
use crate::enrollment::Enrollment;

/// For operations with no operation-specific failures. Uninhabited, so the
/// `Operation` arm of their envelope can never be constructed.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum GenericError {}

impl OperationError for GenericError {
    fn status_code(&self) -> StatusCode {
        match *self {}
    }
}

/// Listing entry: the enrollment with its catalog entry attached. A missing
/// course (deleted after enrollment) leaves the field null rather than
/// failing the listing.
#[derive(Serialize, Debug)]
pub struct EnrollmentWithCourse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Option<Course>,
}

/// Attaches catalog entries to enrollments, fetching each course at most
/// once.
pub(crate) async fn join_courses(
    courses_repository: &impl CoursesRepository,
    enrollments: Vec<Enrollment>,
) -> Result<Vec<EnrollmentWithCourse>, GetCourseError> {
    let mut cache: HashMap<String, Option<Course>> = HashMap::new();
    let mut joined = Vec::with_capacity(enrollments.len());

    for enrollment in enrollments {
        let course = match cache.get(&enrollment.course_id) {
            Some(course) => course.clone(),
            None => {
                let course = match courses_repository.get(&enrollment.course_id).await {
                    Ok(course) => Some(course),
                    Err(GetCourseError::NotFound) => None,
                    Err(e) => return Err(e),
                };
                cache.insert(enrollment.course_id.clone(), course.clone());
                course
            }
        };
        joined.push(EnrollmentWithCourse { enrollment, course });
    }

    Ok(joined)
}
