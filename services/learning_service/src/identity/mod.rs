pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::{IdentityVerifier, JwtIdentityVerifier};
