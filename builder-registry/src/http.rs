//! Remote type source.
//!
//! Fetches definitions from a registry API exposing
//! `GET {base_url}/types/{namespace}/{name}`, which answers with a
//! [`TypeDefinition`] as JSON or `404` for unknown types.

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::source::TypeSource;
use async_trait::async_trait;
use builder_model::{TypeDefinition, TypeKey};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// Type source backed by a remote registry API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
    base: Url,
}

impl HttpSource {
    /// Creates a source for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> RegistryResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| RegistryError::Config(format!("invalid registry base_url `{base_url}`: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(RegistryError::Config(format!(
                "registry base_url `{base_url}` cannot carry a path"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            base,
        })
    }

    pub fn from_config(config: &RegistryConfig) -> RegistryResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| RegistryError::Config("registry base_url is not set".into()))?;
        Self::new(base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/types/{namespace}/{name}`, each segment percent-encoded.
    pub fn type_url(&self, key: &TypeKey) -> RegistryResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RegistryError::Config(format!("registry base_url `{}` cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(["types", key.namespace.as_str(), key.name.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl TypeSource for HttpSource {
    async fn fetch(&self, key: &TypeKey) -> RegistryResult<TypeDefinition> {
        let url = self.type_url(key)?;
        debug!(type_key = %key, url = %url, "Fetching type definition");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::UnknownType(key.clone()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<TypeDefinition>().await?)
    }
}
