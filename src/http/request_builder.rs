use super::{
    client::Client,
    request::{HttpRequest, Method},
    response::{AsyncFrom, Response},
};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE, USER_AGENT},
    Url,
};
use serde::de::DeserializeOwned;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const RELAY_USER_AGENT: &str = "commit-relay";

pub trait RequestType {}
pub struct Get;
pub struct Put;

impl RequestType for Get {}
impl RequestType for Put {}

pub struct InitBuilder;

impl InitBuilder {
    pub fn new<T: RequestType>(client: Client, method: Method, url: Url) -> RequestBuilder<T> {
        RequestBuilder {
            _marker: std::marker::PhantomData,
            client,
            request: HttpRequest::new(method, url),
        }
    }
}

pub struct RequestBuilder<T: RequestType> {
    _marker: std::marker::PhantomData<T>,
    client: Client,
    pub request: HttpRequest,
}

impl<T> RequestBuilder<T>
where
    T: RequestType,
{
    pub async fn send<R>(self) -> Result<Response<R>, reqwest::Error>
    where
        R: DeserializeOwned,
    {
        let response = self.client.send(self.request).await?;

        Ok(Response::async_from(response).await)
    }

    /// Authenticates with the caller's token and asks for the v3 JSON media type.
    pub fn github_headers(mut self, token: &str) -> Self {
        self.request
            .bearer_auth(token)
            .header(ACCEPT.as_str(), GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(USER_AGENT.as_str(), RELAY_USER_AGENT);

        self
    }
}

impl RequestBuilder<Put> {
    pub fn json_body(mut self, body: String) -> Self {
        self.request
            .header(CONTENT_TYPE.as_str(), "application/json")
            .body(body);
        self
    }
}
