use service_core::endpoint_error::EndpointError;
use service_core::simple_err_map;

use super::GenericError;
use crate::enrollment::{Enrollment, EnrollmentsRepository};

/// Answers "is this user enrolled in this course", with the record attached
/// when they are. Unknown course ids simply come back not-enrolled.
pub(crate) async fn check_enrollment(
    enrollments_repository: &impl EnrollmentsRepository,
    uid: &str,
    course_id: &str,
) -> Result<Option<Enrollment>, EndpointError<GenericError>> {
    enrollments_repository
        .get_for(uid, course_id)
        .await
        .map_err(simple_err_map!("Enrollment check failed.", EndpointError::internal()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryEnrollments;

    #[tokio::test]
    async fn reports_enrollment_for_the_pair() {
        let enrollment = Enrollment::new("user-1", "course-1");
        let enrollments = InMemoryEnrollments::with([enrollment.clone()]);

        let found = check_enrollment(&enrollments, "user-1", "course-1").await.unwrap();
        assert_eq!(found, Some(enrollment));

        let missing = check_enrollment(&enrollments, "user-1", "course-2").await.unwrap();
        assert!(missing.is_none());

        let other_user = check_enrollment(&enrollments, "user-2", "course-1").await.unwrap();
        assert!(other_user.is_none());
    }
}
