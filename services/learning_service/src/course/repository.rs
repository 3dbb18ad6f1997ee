use std::error::Error;

use async_trait::async_trait;
use thiserror::Error;

use super::types::Course;

#[derive(Debug, Error)]
pub enum CreateCourseError {
    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum GetCourseError {
    #[error("Course not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum ListCoursesError {
    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum UpdateCourseError {
    #[error("Course not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[async_trait]
pub trait CoursesRepository {
    async fn create(&self, course: &Course) -> Result<(), CreateCourseError>;

    async fn get(&self, course_id: &str) -> Result<Course, GetCourseError>;

    /// Catalog listing: published courses only.
    async fn list_published(&self) -> Result<Vec<Course>, ListCoursesError>;

    /// Atomic increment of the monotonic enrollment counter.
    async fn increment_students_count(&self, course_id: &str) -> Result<(), UpdateCourseError>;
}
