mod upsert_file_request;

pub use upsert_file_request::UpsertFileRequest;

use reqwest::Url;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        HttpRequest {
            method,
            url,
            headers: vec![],
            bearer: None,
            body: None,
        }
    }

    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer_auth(&mut self, token: impl Into<String>) -> &mut Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }
}

pub trait SerializeRequest {
    fn into_request(self) -> Result<String, serde_json::Error>
    where
        Self: Serialize + Sized,
    {
        serde_json::to_string(&self)
    }
}

impl SerializeRequest for UpsertFileRequest {}
