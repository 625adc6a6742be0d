//! Typed client for the users / products / orders REST contract.
//!
//! Every operation is a single request against `{base_url}/{resource}`; the
//! client keeps no state between calls, never retries and sets no timeout of
//! its own.

mod request;
pub mod resource;

use thiserror::Error;

use crate::config::ClientConfig;
use request::Transport;

pub use resource::{Creatable, Deletable, Facade, Listable, Orders, Products, Resource, Users};

/// Failure of a single facade call. `Display` is the caller-facing message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connection refused, DNS, reset).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered outside 200–299. `message` is the body's `error`
    /// field, or a fixed per-operation fallback.
    #[error("{message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Transport,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS roots, headers).
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(http, base_url),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn users(&self) -> Facade<'_, Users> {
        self.resource()
    }

    pub fn products(&self) -> Facade<'_, Products> {
        self.resource()
    }

    pub fn orders(&self) -> Facade<'_, Orders> {
        self.resource()
    }

    pub fn resource<R: Resource>(&self) -> Facade<'_, R> {
        Facade::new(&self.transport)
    }
}
