pub mod github_client;
pub mod handler;
mod repository;

pub use repository::RepositoryId;
