mod builder;
pub mod repository_handler;

use super::{github_client::GithubClient, RepositoryId};
pub use builder::BuilderExecutor;
use repository_handler::RepositoryHandler;

/// Github repo handler access implementation
impl GithubClient {
    pub fn repo(&self, repository: &RepositoryId) -> RepositoryHandler<'_> {
        RepositoryHandler::new(self, repository.clone())
    }
}
