use serde::Deserialize;
use service_core::endpoint_error::EndpointError;

use super::GenericError;
use crate::category::CategoriesRepository;
use crate::course::{Course, CoursesRepository, Lesson};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseInput {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub instructor: Option<String>,

    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub difficulty: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub lessons: Vec<Lesson>,

    #[serde(default)]
    pub is_published: Option<bool>,
}

pub(crate) async fn create_course(
    courses_repository: &impl CoursesRepository,
    categories_repository: &impl CategoriesRepository,
    input: CreateCourseInput,
) -> Result<Course, EndpointError<GenericError>> {
    let title = input
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| EndpointError::validation("Title is required."))?;
    let description = input
        .description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| EndpointError::validation("Description is required."))?;

    let course = Course::builder()
        .title(title)
        .description(description)
        .instructor(input.instructor)
        .duration(input.duration)
        .difficulty(input.difficulty)
        .thumbnail(input.thumbnail)
        .price(input.price.unwrap_or(0.0))
        .category(input.category)
        .lessons(input.lessons)
        .is_published(input.is_published.unwrap_or(false))
        .build();

    courses_repository.create(&course).await.map_err(|e| {
        log::error!("Create course failed: {:?}", e);
        EndpointError::internal()
    })?;

    // The course document is authoritative; the category counter is derived.
    if let Some(category_id) = &course.category {
        if let Err(e) = categories_repository.increment_courses_count(category_id).await {
            log::warn!("Courses count bump failed for {}: {:?}", category_id, e);
        }
    }

    Ok(course)
}
