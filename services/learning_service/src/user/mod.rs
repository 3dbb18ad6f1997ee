pub mod ddb_repository;
pub mod repository;
pub mod types;

pub use repository::UsersRepository;
pub use types::{ProfileChanges, User};
