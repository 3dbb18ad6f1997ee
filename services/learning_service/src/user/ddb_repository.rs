use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{PutItemError, PutItemErrorKind, UpdateItemError, UpdateItemErrorKind};
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::types::SdkError;
use chrono::Utc;
use common_macros::hash_map;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use service_core::ddb::get_item::GetItemInput;
use service_core::ddb::put_item::PutItemInput;
use service_core::ddb::update_item::UpdateItemInput;

use super::repository::{CreateUserError, GetUserError, UpdateUserError, UsersRepository};
use super::types::User;
use crate::store::ThreadSafeDdbClient;

pub struct DdbUsersRepository<T: ThreadSafeDdbClient> {
    ddb: T,
    table_name: String,
}

impl<T: ThreadSafeDdbClient> DdbUsersRepository<T> {
    pub fn new(ddb: T, table_name: impl Into<String>) -> Self {
        Self {
            ddb,
            table_name: table_name.into(),
        }
    }

    fn key_for(uid: &str) -> HashMap<String, AttributeValue> {
        hash_map! {
            "uid".to_string() => AttributeValue::S(uid.to_owned()),
        }
    }

    async fn update(&self, input: UpdateItemInput) -> Result<(), UpdateUserError> {
        self.ddb.update_item(input).await.map_err(|e| match e {
            SdkError::ServiceError {
                err:
                    UpdateItemError {
                        kind: UpdateItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            } => UpdateUserError::NotFound,
            e => UpdateUserError::Other(e.into()),
        })?;

        Ok(())
    }
}

#[async_trait]
impl<T: ThreadSafeDdbClient> UsersRepository for DdbUsersRepository<T> {
    async fn create(&self, user: &User) -> Result<(), CreateUserError> {
        let item: HashMap<String, AttributeValue> = to_item(user)?;
        let put_item_input = PutItemInput::builder()
            .table_name(self.table_name.as_str())
            .item(item)
            .condition_expression("attribute_not_exists(uid)")
            .build();

        self.ddb.put_item(put_item_input).await.map_err(|err| match err {
            SdkError::ServiceError {
                err:
                    PutItemError {
                        kind: PutItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            } => CreateUserError::DuplicateUser,
            e => CreateUserError::Other(e.into()),
        })?;

        Ok(())
    }

    async fn get(&self, uid: &str) -> Result<User, GetUserError> {
        let get_item_input = GetItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(uid))
            .build();

        let output = self
            .ddb
            .get_item(get_item_input)
            .await
            .map_err(|e| GetUserError::Other(e.into()))?;

        match output.item {
            None => Err(GetUserError::NotFound),
            Some(item) => Ok(from_item(item)?),
        }
    }

    async fn save(&self, user: &User) -> Result<(), UpdateUserError> {
        let item: HashMap<String, AttributeValue> = to_item(user)?;
        let put_item_input = PutItemInput::builder()
            .table_name(self.table_name.as_str())
            .item(item)
            .build();

        self.ddb
            .put_item(put_item_input)
            .await
            .map_err(|e| UpdateUserError::Other(e.into()))?;

        Ok(())
    }

    async fn increment_enrollment_count(&self, uid: &str) -> Result<(), UpdateUserError> {
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(uid))
            .update_expression("SET updated_at = :now ADD enrollment_count :one")
            .condition_expression("attribute_exists(uid)")
            .expression_attribute_values(hash_map! {
                ":now".to_string() => to_attribute_value(&Utc::now())?,
                ":one".to_string() => AttributeValue::N("1".to_string()),
            })
            .build();

        self.update(update_item_input).await
    }

    async fn record_completion(&self, uid: &str, learning_time: u32) -> Result<(), UpdateUserError> {
        // ADD only works on top-level attributes; nested counters need SET
        // arithmetic, which is still a single atomic document update.
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(uid))
            .update_expression(
                "SET updated_at = :now, \
                 #stats.courses_completed = #stats.courses_completed + :one, \
                 #stats.total_learning_time = #stats.total_learning_time + :minutes",
            )
            .condition_expression("attribute_exists(uid)")
            .expression_attribute_names(hash_map! {
                "#stats".to_string() => "stats".to_string(),
            })
            .expression_attribute_values(hash_map! {
                ":now".to_string() => to_attribute_value(&Utc::now())?,
                ":one".to_string() => AttributeValue::N("1".to_string()),
                ":minutes".to_string() => AttributeValue::N(learning_time.to_string()),
            })
            .build();

        self.update(update_item_input).await
    }
}
