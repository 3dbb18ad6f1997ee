use service_core::endpoint_error::EndpointError;

use super::GenericError;
use crate::identity::Claims;
use crate::user::{repository, User, UsersRepository};

/// Returns the caller's profile, provisioning it from the verified claims on
/// first access. Identities that never called the register endpoint still
/// get a profile.
pub(crate) async fn get_profile(
    users_repository: &impl UsersRepository,
    claims: &Claims,
) -> Result<User, EndpointError<GenericError>> {
    match users_repository.get(&claims.sub).await {
        Ok(user) => return Ok(user),
        Err(repository::GetUserError::NotFound) => {}
        Err(e) => {
            log::error!("Profile lookup failed: {:?}", e);
            return Err(EndpointError::internal());
        }
    }

    let user = User::builder()
        .uid(&claims.sub)
        .email(&claims.email)
        .display_name(claims.name.clone())
        .build();

    match users_repository.create(&user).await {
        Ok(()) => Ok(user),
        // Lost a provisioning race; the other writer's record wins.
        Err(repository::CreateUserError::DuplicateUser) => {
            users_repository.get(&claims.sub).await.map_err(|e| {
                log::error!("Profile lookup after race failed: {:?}", e);
                EndpointError::internal()
            })
        }
        Err(e) => {
            log::error!("Profile provisioning failed: {:?}", e);
            Err(EndpointError::internal())
        }
    }
}
