pub mod client;
pub mod request;
pub mod request_builder;
pub mod response;

pub use client::Client;
pub use client::ClientRequestBuilder;
