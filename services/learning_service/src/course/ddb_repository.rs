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

use super::repository::{CoursesRepository, CreateCourseError, GetCourseError, ListCoursesError, UpdateCourseError};
use super::types::Course;
use crate::store::ThreadSafeDdbClient;

pub struct DdbCoursesRepository<T: ThreadSafeDdbClient> {
    ddb: T,
    table_name: String,
}

impl<T: ThreadSafeDdbClient> DdbCoursesRepository<T> {
    pub fn new(ddb: T, table_name: impl Into<String>) -> Self {
        Self {
            ddb,
            table_name: table_name.into(),
        }
    }

    fn key_for(course_id: &str) -> HashMap<String, AttributeValue> {
        hash_map! {
            "courseId".to_string() => AttributeValue::S(course_id.to_owned()),
        }
    }
}

#[async_trait]
impl<T: ThreadSafeDdbClient> CoursesRepository for DdbCoursesRepository<T> {
    async fn create(&self, course: &Course) -> Result<(), CreateCourseError> {
        let item: HashMap<String, AttributeValue> = to_item(course)?;
        let put_item_input = PutItemInput::builder()
            .table_name(self.table_name.as_str())
            .item(item)
            .build();

        self.ddb
            .put_item(put_item_input)
            .await
            .map_err(|e| CreateCourseError::Other(e.into()))?;

        Ok(())
    }

    async fn get(&self, course_id: &str) -> Result<Course, GetCourseError> {
        let get_item_input = GetItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(course_id))
            .build();

        let output = self
            .ddb
            .get_item(get_item_input)
            .await
            .map_err(|e| GetCourseError::Other(e.into()))?;

        match output.item {
            None => Err(GetCourseError::NotFound),
            Some(item) => Ok(from_item(item)?),
        }
    }

    async fn list_published(&self) -> Result<Vec<Course>, ListCoursesError> {
        let mut courses = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let scan_input = ScanInput::builder()
                .table_name(self.table_name.as_str())
                .filter_expression("isPublished = :published".to_string())
                .expression_attribute_values(Some(hash_map! {
                    ":published".to_string() => AttributeValue::Bool(true),
                }))
                .exclusive_start_key(exclusive_start_key)
                .build();

            let output = self
                .ddb
                .scan(scan_input)
                .await
                .map_err(|e| ListCoursesError::Other(e.into()))?;

            for item in output.items.unwrap_or_default() {
                courses.push(from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) => exclusive_start_key = Some(key),
                None => break,
            }
        }

        Ok(courses)
    }

    async fn increment_students_count(&self, course_id: &str) -> Result<(), UpdateCourseError> {
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(course_id))
            .update_expression("SET updatedAt = :now ADD studentsCount :one")
            .condition_expression("attribute_exists(courseId)")
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
            } => UpdateCourseError::NotFound,
            e => UpdateCourseError::Other(e.into()),
        })?;

        Ok(())
    }
}
