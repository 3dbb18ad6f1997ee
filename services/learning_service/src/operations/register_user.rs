use http::StatusCode;
use serde::{Deserialize, Serialize};
use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use crate::identity::Claims;
use crate::user::{repository, User, UsersRepository};

#[derive(Deserialize, Debug, Default)]
pub struct RegisterUserInput {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(untagged)]
pub enum RegisterUserError {
    #[error("User already registered.")]
    DuplicateUser,
}

impl OperationError for RegisterUserError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterUserError::DuplicateUser => StatusCode::BAD_REQUEST,
        }
    }
}

/// Creates the profile document for a verified identity. The identity
/// provider owns credentials; this only materializes the profile.
pub(crate) async fn register_user(
    users_repository: &impl UsersRepository,
    claims: &Claims,
    input: RegisterUserInput,
) -> Result<User, EndpointError<RegisterUserError>> {
    let user = User::builder()
        .uid(&claims.sub)
        .email(&claims.email)
        .display_name(input.display_name.or_else(|| claims.name.clone()))
        .build();

    users_repository.create(&user).await.map_err(|err| match err {
        repository::CreateUserError::DuplicateUser => EndpointError::operation(RegisterUserError::DuplicateUser),
        e => {
            log::error!("Create user failed: {:?}", e);
            EndpointError::internal()
        }
    })?;

    Ok(user)
}
