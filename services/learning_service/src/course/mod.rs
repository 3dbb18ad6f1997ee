pub mod ddb_repository;
pub mod repository;
pub mod types;

pub use repository::{CoursesRepository, GetCourseError};
pub use types::{Course, Lesson};
