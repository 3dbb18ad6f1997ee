use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{UpdateItemError, UpdateItemErrorKind};
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::types::SdkError;
use chrono::Utc;
use common_macros::hash_map;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use service_core::ddb::get_item::GetItemInput;
use service_core::ddb::put_item::PutItemInput;
use service_core::ddb::scan::ScanInput;
use service_core::ddb::update_item::UpdateItemInput;

use super::repository::{
    CategoriesRepository, CreateCategoryError, GetCategoryError, ListCategoriesError, UpdateCategoryError,
};
use super::types::Category;
use crate::store::ThreadSafeDdbClient;

pub struct DdbCategoriesRepository<T: ThreadSafeDdbClient> {
    ddb: T,
    table_name: String,
}

impl<T: ThreadSafeDdbClient> DdbCategoriesRepository<T> {
    pub fn new(ddb: T, table_name: impl Into<String>) -> Self {
        Self {
            ddb,
            table_name: table_name.into(),
        }
    }

    fn key_for(category_id: &str) -> HashMap<String, AttributeValue> {
        hash_map! {
            "categoryId".to_string() => AttributeValue::S(category_id.to_owned()),
        }
    }
}

#[async_trait]
impl<T: ThreadSafeDdbClient> CategoriesRepository for DdbCategoriesRepository<T> {
    async fn create(&self, category: &Category) -> Result<(), CreateCategoryError> {
        let item: HashMap<String, AttributeValue> = to_item(category)?;
        let put_item_input = PutItemInput::builder()
            .table_name(self.table_name.as_str())
            .item(item)
            .build();

        self.ddb
            .put_item(put_item_input)
            .await
            .map_err(|e| CreateCategoryError::Other(e.into()))?;

        Ok(())
    }

    async fn get(&self, category_id: &str) -> Result<Category, GetCategoryError> {
        let get_item_input = GetItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(category_id))
            .build();

        let output = self
            .ddb
            .get_item(get_item_input)
            .await
            .map_err(|e| GetCategoryError::Other(e.into()))?;

        match output.item {
            None => Err(GetCategoryError::NotFound),
            Some(item) => Ok(from_item(item)?),
        }
    }

    async fn list_all(&self) -> Result<Vec<Category>, ListCategoriesError> {
        let mut categories = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let scan_input = ScanInput::builder()
                .table_name(self.table_name.as_str())
                .exclusive_start_key(exclusive_start_key)
                .build();

            let output = self
                .ddb
                .scan(scan_input)
                .await
                .map_err(|e| ListCategoriesError::Other(e.into()))?;

            for item in output.items.unwrap_or_default() {
                categories.push(from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) => exclusive_start_key = Some(key),
                None => break,
            }
        }

        Ok(categories)
    }

    async fn increment_courses_count(&self, category_id: &str) -> Result<(), UpdateCategoryError> {
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(category_id))
            .update_expression("SET updatedAt = :now ADD coursesCount :one")
            .condition_expression("attribute_exists(categoryId)")
            .expression_attribute_values(hash_map! {
                ":now".to_string() => to_attribute_value(&Utc::now())?,
                ":one".to_string() => AttributeValue::N("1".to_string()),
            })
            .build();

        self.ddb.update_item(update_item_input).await.map_err(|e| match e {
            SdkError::ServiceError {
                err:
                    UpdateItemError {
                        kind: UpdateItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            } => UpdateCategoryError::NotFound,
            e => UpdateCategoryError::Other(e.into()),
        })?;

        Ok(())
    }
}
