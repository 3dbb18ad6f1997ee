pub mod ddb_repository;
pub mod repository;
pub mod types;

pub use repository::CategoriesRepository;
pub use types::Category;
