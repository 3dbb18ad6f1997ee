use serde::{Deserialize, Serialize};

/// Claims carried by a verified bearer token. `sub` is the stable subject
/// identifier the identity provider assigns to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    pub exp: u64,
}
