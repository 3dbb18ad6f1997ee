use service_core::endpoint_error::EndpointError;
use service_core::simple_err_map;

use super::GenericError;
use crate::category::{CategoriesRepository, Category};

pub(crate) async fn list_categories(
    categories_repository: &impl CategoriesRepository,
) -> Result<Vec<Category>, EndpointError<GenericError>> {
    categories_repository
        .list_all()
        .await
        .map_err(simple_err_map!("List categories failed.", EndpointError::internal()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryCategories;

    #[tokio::test]
    async fn lists_every_category() {
        let categories = InMemoryCategories::with([
            Category::builder().name("Programming").build(),
            Category::builder().name("Design").build(),
        ]);

        let listed = list_categories(&categories).await.unwrap();
        assert_eq!(listed.len(), 2);
    }
}
