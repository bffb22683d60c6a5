use super::BuilderExecutor;
use crate::{
    github::{github_client::GithubClient, RepositoryId},
    relay::{Commit, Credential, RelayError},
};

pub struct UpsertFileBuilder<'a> {
    client: &'a GithubClient,
    repository: RepositoryId,
    path: String,
    commit_message: String,
    content: String,
    branch: Option<String>,
    token: Option<Credential>,
}

impl<'a> UpsertFileBuilder<'a> {
    pub fn new(client: &'a GithubClient, repository: RepositoryId) -> Self {
        UpsertFileBuilder {
            client,
            repository,
            path: String::new(),
            commit_message: String::new(),
            content: String::new(),
            branch: None,
            token: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn token(mut self, token: Credential) -> Self {
        self.token = Some(token);
        self
    }
}

impl BuilderExecutor for UpsertFileBuilder<'_> {
    type Output = Commit;

    async fn execute(self) -> Result<Self::Output, RelayError> {
        let token = self
            .token
            .ok_or_else(|| RelayError::Validation("A GitHub token is required".to_owned()))?;

        if self.path.is_empty() {
            return Err(RelayError::Validation("File path must not be empty".to_owned()));
        }

        self.client
            .upsert_file(
                &self.repository,
                &self.path,
                &self.content,
                &self.commit_message,
                self.branch,
                &token,
            )
            .await
    }
}
