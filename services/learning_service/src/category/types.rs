use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Catalog grouping. camelCase on the wire, like [`crate::course::Course`].
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[builder(default = Uuid::new_v4().to_string(), setter(into))]
    pub category_id: String,

    #[builder(setter(into))]
    pub name: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: Option<String>,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub icon: Option<String>,

    /// Number of courses filed under this category.
    #[serde(default)]
    #[builder(default)]
    pub courses_count: u32,

    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,

    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}
