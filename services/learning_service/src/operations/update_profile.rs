use http::StatusCode;
use serde::Serialize;
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use crate::user::{repository, ProfileChanges, User, UsersRepository};

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum UpdateProfileError {
    #[error("User not found.")]
    NotFound,
}

impl OperationError for UpdateProfileError {
    fn status_code(&self) -> StatusCode {
        match self {
            UpdateProfileError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

pub(crate) async fn update_profile(
    users_repository: &impl UsersRepository,
    uid: &str,
    changes: ProfileChanges,
) -> Result<User, EndpointError<UpdateProfileError>> {
    let mut user = users_repository.get(uid).await.map_err(|err| match err {
        repository::GetUserError::NotFound => EndpointError::operation(UpdateProfileError::NotFound),
        e => {
            log::error!("Profile lookup failed: {:?}", e);
            EndpointError::internal()
        }
    })?;

    user.apply_profile_changes(changes);

    users_repository.save(&user).await.map_err(|e| {
        log::error!("Profile save failed: {:?}", e);
        EndpointError::internal()
    })?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryUsers;

    #[tokio::test]
    async fn applies_and_persists_changes() {
        let users = InMemoryUsers::with([User::builder().uid("user-1").email("a@b.c").build()]);

        let changes = ProfileChanges {
            display_name: Some("John".to_string()),
            bio: Some("Learner.".to_string()),
            ..ProfileChanges::default()
        };
        let user = update_profile(&users, "user-1", changes).await.unwrap();

        assert_eq!(user.display_name.as_deref(), Some("John"));
        assert_eq!(users.snapshot("user-1").unwrap().bio.as_deref(), Some("Learner."));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let users = InMemoryUsers::default();

        let err = update_profile(&users, "user-1", ProfileChanges::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointError::Operation(UpdateProfileError::NotFound)));
    }
}
