use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Catalog entry. Attribute names stay camelCase on the wire and in the
/// store, matching the exported catalog data.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[builder(default = Uuid::new_v4().to_string(), setter(into))]
    pub course_id: String,

    #[builder(setter(into))]
    pub title: String,

    #[builder(setter(into))]
    pub description: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub instructor: Option<String>,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub duration: Option<String>,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub difficulty: Option<String>,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub thumbnail: Option<String>,

    #[serde(default)]
    #[builder(default)]
    pub price: f64,

    #[serde(default)]
    #[builder(default)]
    pub rating: f64,

    /// Monotonic count of enrollments ever created for this course.
    #[serde(default)]
    #[builder(default)]
    pub students_count: u32,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub category: Option<String>,

    #[serde(default)]
    #[builder(default)]
    pub lessons: Vec<Lesson>,

    #[serde(default)]
    #[builder(default)]
    pub is_published: bool,

    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,

    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct Lesson {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub order: u32,
}

impl Course {
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}
