use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's participation in one course.
///
/// The identifier is derived from the `(user_id, course_id)` pair, so a pair
/// maps to exactly one document and the datastore can arbitrate uniqueness on
/// creation.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Enrollment {
    pub enrollment_id: Uuid,
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,

    #[serde(default)]
    pub progress: Progress,

    #[serde(default)]
    pub status: EnrollmentStatus,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub certificate_issued: bool,

    /// 1-5 stars.
    #[serde(default)]
    pub rating: Option<u8>,

    #[serde(default)]
    pub review: Option<String>,

    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default)]
pub struct Progress {
    /// Identifiers of completed lessons, insertion-ordered, duplicates
    /// suppressed.
    #[serde(default)]
    pub completed_lessons: Vec<String>,

    /// Always the number of completed lessons.
    #[serde(default)]
    pub current_lesson: u32,

    #[serde(default)]
    pub completion_percentage: f64,

    /// Cumulative minutes; never decreases.
    #[serde(default)]
    pub total_time_spent: u32,

    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    // Representable in stored documents, but no operation transitions into it.
    Dropped,
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        EnrollmentStatus::Active
    }
}

impl Enrollment {
    pub fn new(user_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let course_id = course_id.into();

        Enrollment {
            enrollment_id: Enrollment::id_for(&user_id, &course_id),
            user_id,
            course_id,
            enrolled_at: Utc::now(),
            progress: Progress::default(),
            status: EnrollmentStatus::Active,
            completed_at: None,
            certificate_issued: false,
            rating: None,
            review: None,
            reviewed_at: None,
        }
    }

    /// Deterministic identifier for a `(user_id, course_id)` pair.
    pub fn id_for(user_id: &str, course_id: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{}/{}", user_id, course_id).as_bytes())
    }

    /// Records a completed lesson. Membership in the completed set is
    /// idempotent; time spent accumulates on every call, repeated lesson or
    /// not.
    pub fn record_lesson(&mut self, lesson_id: &str, time_spent: u32) {
        if !self.progress.completed_lessons.iter().any(|l| l == lesson_id) {
            self.progress.completed_lessons.push(lesson_id.to_owned());
        }

        self.progress.total_time_spent = self.progress.total_time_spent.saturating_add(time_spent);
        self.progress.current_lesson = self.progress.completed_lessons.len() as u32;
        self.progress.last_accessed = Some(Utc::now());
    }

    /// Marks the enrollment completed. Callers may complete at any progress
    /// level; the percentage is forced to 100 here and nowhere else.
    pub fn mark_completed(&mut self) {
        self.status = EnrollmentStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.progress.completion_percentage = 100.0;
    }

    /// Attaches a rating and review. Range validation happens at the
    /// operation boundary; reviewing does not require completion.
    pub fn set_review(&mut self, rating: u8, review: impl Into<String>) {
        self.rating = Some(rating);
        self.review = Some(review.into());
        self.reviewed_at = Some(Utc::now());
    }
}
