use super::builder::upsert_file_builder::UpsertFileBuilder;
use crate::github::{github_client::GithubClient, RepositoryId};

pub struct RepositoryHandler<'a> {
    client: &'a GithubClient,
    repository: RepositoryId,
}

impl<'a> RepositoryHandler<'a> {
    pub fn new(client: &'a GithubClient, repository: RepositoryId) -> Self {
        RepositoryHandler { client, repository }
    }

    pub fn upsert_file(&self) -> UpsertFileBuilder<'a> {
        UpsertFileBuilder::new(self.client, self.repository.clone())
    }
}
