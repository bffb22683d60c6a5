use super::RepositoryId;
use crate::{
    http::{
        request::{SerializeRequest, UpsertFileRequest},
        response::{ContentsResponse, Response, UpsertFileResponse},
        Client, ClientRequestBuilder,
    },
    relay::{Commit, Credential, RelayError},
};
use anyhow::{bail, Context};
use reqwest::Url;

pub struct GithubClient {
    api_url: Url,
    client: Client,
}

impl GithubClient {
    pub fn new(api_url: &str) -> anyhow::Result<Self> {
        let api_url =
            Url::parse(api_url).with_context(|| format!("Invalid GitHub API url {api_url}"))?;

        if api_url.cannot_be_a_base() {
            bail!("GitHub API url {api_url} cannot be used as a base url");
        }

        Ok(GithubClient {
            api_url,
            client: Client::new(),
        })
    }

    fn contents_url(
        &self,
        repository: &RepositoryId,
        path: &str,
        branch: Option<&str>,
    ) -> Result<Url, RelayError> {
        let mut url = self.api_url.clone();

        url.path_segments_mut()
            .map_err(|_| RelayError::UnknownRemote("GitHub API url is not a base url".to_owned()))?
            .pop_if_empty()
            .extend(["repos", repository.owner.as_str(), repository.name.as_str(), "contents"])
            .extend(path.split('/'));

        if let Some(branch) = branch {
            url.query_pairs_mut().append_pair("ref", branch);
        }

        Ok(url)
    }

    /// Looks up the blob id of `path`. `None` means the file does not exist yet.
    pub(super) async fn get_file_sha(
        &self,
        repository: &RepositoryId,
        path: &str,
        branch: Option<&str>,
        token: &Credential,
    ) -> Result<Option<String>, RelayError> {
        let url = self.contents_url(repository, path, branch)?;

        let response: Response<ContentsResponse> = self
            .client
            .get(url)
            .github_headers(token.expose())
            .send()
            .await?;

        if response.status() == 404 {
            log::debug!("{} does not exist in {}, creating it", path, repository);
            return Ok(None);
        }

        match response.collect()? {
            ContentsResponse::Entry(entry) if entry.is_file() => {
                log::debug!("{} exists with sha {}, updating it", entry.path, entry.sha);
                Ok(Some(entry.sha))
            }
            ContentsResponse::Entry(entry) => Err(RelayError::Validation(format!(
                "{} is a {}, not a writable file",
                entry.name, entry.kind
            ))),
            ContentsResponse::Listing(_) => Err(RelayError::Validation(format!(
                "{path} is a directory, not a writable file"
            ))),
        }
    }

    pub(super) async fn upsert_file(
        &self,
        repository: &RepositoryId,
        path: &str,
        content: &str,
        message: &str,
        branch: Option<String>,
        token: &Credential,
    ) -> Result<Commit, RelayError> {
        log::debug!("Upserting file");
        let sha = self
            .get_file_sha(repository, path, branch.as_deref(), token)
            .await?;

        let body = UpsertFileRequest::new(message, content, branch, sha)
            .into_request()
            .map_err(|err| RelayError::UnknownRemote(format!("Cannot encode request: {err}")))?;

        let url = self.contents_url(repository, path, None)?;

        let response: Response<UpsertFileResponse> = self
            .client
            .put(url)
            .github_headers(token.expose())
            .json_body(body)
            .send()
            .await?;

        let response = match response {
            Response::Error(err) if (200..300).contains(&err.status) => {
                log::warn!("{} was written to {} but the reply was unreadable", path, repository);
                return Err(RelayError::Unconfirmed(format!(
                    "status {}: {}",
                    err.status, err.message
                )));
            }
            response => response.collect()?,
        };

        if let Some(content) = &response.content {
            log::debug!("{} is now at blob {}", content.path, content.sha);
        }

        Ok(Commit {
            url: response.commit.html_url,
            sha: response.commit.sha,
        })
    }
}
