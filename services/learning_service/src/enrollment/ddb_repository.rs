use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{PutItemError, PutItemErrorKind, UpdateItemError, UpdateItemErrorKind};
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::types::SdkError;
use common_macros::hash_map;
use serde_dynamo::{from_item, to_attribute_value, to_item};
use service_core::ddb::get_item::GetItemInput;
use service_core::ddb::put_item::PutItemInput;
use service_core::ddb::query::QueryInput;
use service_core::ddb::scan::ScanInput;
use service_core::ddb::update_item::UpdateItemInput;
use uuid::Uuid;

use super::repository::{
    CreateEnrollment, CreateEnrollmentError, EnrollmentsRepository, GetEnrollmentError, ListEnrollmentsError,
    UpdateEnrollmentError,
};
use super::types::Enrollment;
use crate::store::ThreadSafeDdbClient;

pub(crate) const USER_ID_INDEX: &str = "UserIdIndex";

pub struct DdbEnrollmentsRepository<T: ThreadSafeDdbClient> {
    ddb: T,
    table_name: String,
}

impl<T: ThreadSafeDdbClient> DdbEnrollmentsRepository<T> {
    pub fn new(ddb: T, table_name: impl Into<String>) -> Self {
        Self {
            ddb,
            table_name: table_name.into(),
        }
    }

    fn key_for(enrollment_id: &Uuid) -> HashMap<String, AttributeValue> {
        hash_map! {
            "enrollment_id".to_string() => AttributeValue::S(enrollment_id.to_string()),
        }
    }
}

#[async_trait]
impl<T: ThreadSafeDdbClient> EnrollmentsRepository for DdbEnrollmentsRepository<T> {
    async fn create(&self, user_id: &str, course_id: &str) -> Result<CreateEnrollment, CreateEnrollmentError> {
        let enrollment = Enrollment::new(user_id, course_id);
        let item: HashMap<String, AttributeValue> = to_item(&enrollment)?;

        let put_item_input = PutItemInput::builder()
            .table_name(self.table_name.as_str())
            .item(item)
            .condition_expression("attribute_not_exists(enrollment_id)")
            .build();

        match self.ddb.put_item(put_item_input).await {
            Ok(_) => Ok(CreateEnrollment::Created(enrollment)),
            Err(SdkError::ServiceError {
                err:
                    PutItemError {
                        kind: PutItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            }) => {
                // Lost the race or the pair was already enrolled; either way
                // the store holds exactly one record for the derived key.
                let existing = self.get(&enrollment.enrollment_id).await.map_err(|e| match e {
                    GetEnrollmentError::Serde(e) => CreateEnrollmentError::Serde(e),
                    GetEnrollmentError::Other(e) => CreateEnrollmentError::Other(e),
                    GetEnrollmentError::NotFound => {
                        CreateEnrollmentError::Other("conditional put failed but the record is missing".into())
                    }
                })?;
                Ok(CreateEnrollment::AlreadyEnrolled(existing))
            }
            Err(e) => Err(CreateEnrollmentError::Other(e.into())),
        }
    }

    async fn get(&self, enrollment_id: &Uuid) -> Result<Enrollment, GetEnrollmentError> {
        let get_item_input = GetItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(enrollment_id))
            .build();

        let output = self
            .ddb
            .get_item(get_item_input)
            .await
            .map_err(|e| GetEnrollmentError::Other(e.into()))?;

        match output.item {
            None => Err(GetEnrollmentError::NotFound),
            Some(item) => Ok(from_item(item)?),
        }
    }

    async fn get_for(&self, user_id: &str, course_id: &str) -> Result<Option<Enrollment>, GetEnrollmentError> {
        match self.get(&Enrollment::id_for(user_id, course_id)).await {
            Ok(enrollment) => Ok(Some(enrollment)),
            Err(GetEnrollmentError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Enrollment>, ListEnrollmentsError> {
        let mut enrollments = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let query_input = QueryInput::builder()
                .table_name(self.table_name.as_str())
                .index_name(USER_ID_INDEX)
                .key_condition_expression("user_id = :user_id")
                .expression_attribute_values(Some(hash_map! {
                    ":user_id".to_string() => AttributeValue::S(user_id.to_owned()),
                }))
                // Most recent enrollment first.
                .scan_index_forward(false)
                .exclusive_start_key(exclusive_start_key)
                .build();

            let output = self
                .ddb
                .query(query_input)
                .await
                .map_err(|e| ListEnrollmentsError::Other(e.into()))?;

            for item in output.items.unwrap_or_default() {
                enrollments.push(from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) => exclusive_start_key = Some(key),
                None => break,
            }
        }

        Ok(enrollments)
    }

    async fn list_all(&self) -> Result<Vec<Enrollment>, ListEnrollmentsError> {
        let mut enrollments = Vec::new();
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
                .map_err(|e| ListEnrollmentsError::Other(e.into()))?;

            for item in output.items.unwrap_or_default() {
                enrollments.push(from_item(item)?);
            }

            match output.last_evaluated_key {
                Some(key) => exclusive_start_key = Some(key),
                None => break,
            }
        }

        Ok(enrollments)
    }

    async fn save_progress(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(&enrollment.enrollment_id))
            .update_expression("SET #progress = :progress")
            .condition_expression("attribute_exists(enrollment_id)")
            .expression_attribute_names(hash_map! {
                "#progress".to_string() => "progress".to_string(),
            })
            .expression_attribute_values(hash_map! {
                ":progress".to_string() => to_attribute_value(&enrollment.progress)?,
            })
            .build();

        self.update(update_item_input).await
    }

    async fn complete(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(&enrollment.enrollment_id))
            .update_expression("SET #status = :status, completed_at = :completed_at, #progress = :progress")
            .condition_expression("attribute_exists(enrollment_id)")
            .expression_attribute_names(hash_map! {
                "#status".to_string() => "status".to_string(),
                "#progress".to_string() => "progress".to_string(),
            })
            .expression_attribute_values(hash_map! {
                ":status".to_string() => to_attribute_value(&enrollment.status)?,
                ":completed_at".to_string() => to_attribute_value(&enrollment.completed_at)?,
                ":progress".to_string() => to_attribute_value(&enrollment.progress)?,
            })
            .build();

        self.update(update_item_input).await
    }

    async fn save_review(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        let update_item_input = UpdateItemInput::builder()
            .table_name(self.table_name.as_str())
            .key(Self::key_for(&enrollment.enrollment_id))
            .update_expression("SET #rating = :rating, #review = :review, reviewed_at = :reviewed_at")
            .condition_expression("attribute_exists(enrollment_id)")
            .expression_attribute_names(hash_map! {
                "#rating".to_string() => "rating".to_string(),
                "#review".to_string() => "review".to_string(),
            })
            .expression_attribute_values(hash_map! {
                ":rating".to_string() => to_attribute_value(&enrollment.rating)?,
                ":review".to_string() => to_attribute_value(&enrollment.review)?,
                ":reviewed_at".to_string() => to_attribute_value(&enrollment.reviewed_at)?,
            })
            .build();

        self.update(update_item_input).await
    }
}

impl<T: ThreadSafeDdbClient> DdbEnrollmentsRepository<T> {
    async fn update(&self, input: UpdateItemInput) -> Result<(), UpdateEnrollmentError> {
        self.ddb.update_item(input).await.map_err(|e| match e {
            SdkError::ServiceError {
                err:
                    UpdateItemError {
                        kind: UpdateItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            } => UpdateEnrollmentError::NotFound,
            e => UpdateEnrollmentError::Other(e.into()),
        })?;

        Ok(())
    }
}
