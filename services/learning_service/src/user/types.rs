use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// One record per identity-provider subject. Created on first registration
/// or first profile access, never deleted.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
pub struct User {
    #[builder(setter(into))]
    pub uid: String,

    #[builder(setter(into))]
    pub email: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub display_name: Option<String>,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub phone: Option<String>,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub bio: Option<String>,

    #[serde(default)]
    #[builder(default)]
    pub role: UserRole,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub profile_picture_url: Option<String>,

    /// Monotonic count of enrollments ever created; never decremented.
    #[serde(default)]
    #[builder(default)]
    pub enrollment_count: u32,

    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,

    #[builder(default = Utc::now())]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    #[builder(default)]
    pub profile_complete: bool,

    #[serde(default)]
    #[builder(default)]
    pub preferences: Preferences,

    #[serde(default)]
    #[builder(default)]
    pub stats: LearningStats,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub notifications: bool,

    #[serde(default = "default_true")]
    pub email_updates: bool,

    #[serde(default = "Preferences::default_difficulty")]
    pub difficulty_preference: String,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct LearningStats {
    #[serde(default)]
    pub courses_completed: u32,

    /// Cumulative minutes across all enrollments.
    #[serde(default)]
    pub total_learning_time: u32,

    #[serde(default)]
    pub certificates_earned: u32,

    #[serde(default)]
    pub current_streak: u32,
}

/// Profile fields a user may change about themselves. Everything else
/// (role, counters, stats) is owned by the service.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProfileChanges {
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub profile_picture_url: Option<String>,

    #[serde(default)]
    pub preferences: Option<Preferences>,

    #[serde(default)]
    pub profile_complete: Option<bool>,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Student
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            notifications: true,
            email_updates: true,
            difficulty_preference: Preferences::default_difficulty(),
        }
    }
}

impl Preferences {
    fn default_difficulty() -> String {
        "beginner".to_string()
    }
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn apply_profile_changes(&mut self, changes: ProfileChanges) {
        if let Some(display_name) = changes.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(phone) = changes.phone {
            self.phone = Some(phone);
        }
        if let Some(bio) = changes.bio {
            self.bio = Some(bio);
        }
        if let Some(profile_picture_url) = changes.profile_picture_url {
            self.profile_picture_url = Some(profile_picture_url);
        }
        if let Some(preferences) = changes.preferences {
            self.preferences = preferences;
        }
        if let Some(profile_complete) = changes.profile_complete {
            self.profile_complete = profile_complete;
        }

        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let user = User::builder().uid("user-1").email("john.doe@example.com").build();

        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.enrollment_count, 0);
        assert!(!user.profile_complete);
        assert!(user.preferences.notifications);
        assert_eq!(user.preferences.difficulty_preference, "beginner");
        assert_eq!(user.stats, LearningStats::default());
    }

    #[test]
    fn deserializes_sparse_document() {
        let input = serde_json::json!({
            "uid": "user-1",
            "email": "john.doe@example.com",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        });

        let user: User = serde_json::from_value(input).unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert!(user.display_name.is_none());
        assert_eq!(user.stats.courses_completed, 0);
    }

    #[test]
    fn profile_changes_only_touch_allowed_fields() {
        let mut user = User::builder().uid("user-1").email("john.doe@example.com").build();
        let before = user.updated_at;

        user.apply_profile_changes(ProfileChanges {
            display_name: Some("John".to_string()),
            bio: Some("Learner.".to_string()),
            profile_complete: Some(true),
            ..ProfileChanges::default()
        });

        assert_eq!(user.display_name.as_deref(), Some("John"));
        assert_eq!(user.bio.as_deref(), Some("Learner."));
        assert!(user.profile_complete);
        assert!(user.phone.is_none());
        assert!(user.updated_at >= before);
    }
}
