use http::StatusCode;
use serde::Serialize;
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use crate::category::{repository, CategoriesRepository, Category};

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum DescribeCategoryError {
    #[error("Category not found.")]
    NotFound,
}

impl OperationError for DescribeCategoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            DescribeCategoryError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

pub(crate) async fn describe_category(
    categories_repository: &impl CategoriesRepository,
    category_id: &str,
) -> Result<Category, EndpointError<DescribeCategoryError>> {
    categories_repository.get(category_id).await.map_err(|err| match err {
        repository::GetCategoryError::NotFound => EndpointError::operation(DescribeCategoryError::NotFound),
        e => {
            log::error!("Category lookup failed: {:?}", e);
            EndpointError::internal()
        }
    })
}
