use std::error::Error;

use async_trait::async_trait;
use thiserror::Error;

use super::types::Category;

#[derive(Debug, Error)]
pub enum CreateCategoryError {
    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum GetCategoryError {
    #[error("Category not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum ListCategoriesError {
    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum UpdateCategoryError {
    #[error("Category not found.")]
    NotFound,

    #[error(transparent)]
    Serde(#[from] serde_dynamo::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

#[async_trait]
pub trait CategoriesRepository {
    async fn create(&self, category: &Category) -> Result<(), CreateCategoryError>;

    async fn get(&self, category_id: &str) -> Result<Category, GetCategoryError>;

    async fn list_all(&self) -> Result<Vec<Category>, ListCategoriesError>;

    async fn increment_courses_count(&self, category_id: &str) -> Result<(), UpdateCategoryError>;
}
