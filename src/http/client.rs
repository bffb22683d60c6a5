use super::{
    request::{HttpRequest, Method},
    request_builder::{Get, InitBuilder, Put, RequestBuilder},
};
use reqwest::Url;

#[derive(Clone, Debug, Default)]
pub struct Client(reqwest::Client);

impl Client {
    pub fn new() -> Client {
        Client(reqwest::Client::new())
    }

    pub async fn send(&self, request: HttpRequest) -> Result<reqwest::Response, reqwest::Error> {
        let mut builder = self.0.request(request.method.into(), request.url);

        if let Some(token) = request.bearer {
            builder = builder.bearer_auth(token);
        }

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let request = builder.build()?;

        self.0.execute(request).await
    }
}

pub trait ClientRequestBuilder {
    fn get(&self, url: Url) -> RequestBuilder<Get>;
    fn put(&self, url: Url) -> RequestBuilder<Put>;
}

impl ClientRequestBuilder for Client {
    fn get(&self, url: Url) -> RequestBuilder<Get> {
        InitBuilder::new(self.clone(), Method::Get, url)
    }

    fn put(&self, url: Url) -> RequestBuilder<Put> {
        InitBuilder::new(self.clone(), Method::Put, url)
    }
}
