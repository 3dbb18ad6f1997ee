use serde::Deserialize;
use service_core::endpoint_error::EndpointError;

use super::GenericError;
use crate::category::{CategoriesRepository, Category};

#[derive(Deserialize, Debug, Default)]
pub struct CreateCategoryInput {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,
}

pub(crate) async fn create_category(
    categories_repository: &impl CategoriesRepository,
    input: CreateCategoryInput,
) -> Result<Category, EndpointError<GenericError>> {
    let name = input
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| EndpointError::validation("Name is required."))?;

    let category = Category::builder()
        .name(name)
        .description(input.description)
        .icon(input.icon)
        .build();

    categories_repository.create(&category).await.map_err(|e| {
        log::error!("Create category failed: {:?}", e);
        EndpointError::internal()
    })?;

    Ok(category)
}
