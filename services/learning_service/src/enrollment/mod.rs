pub mod ddb_repository;
pub mod repository;
pub mod types;

pub use repository::{CreateEnrollment, EnrollmentsRepository, GetEnrollmentError};
pub use types::{Enrollment, EnrollmentStatus};
