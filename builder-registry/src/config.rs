//! Registry configuration.

use crate::error::{RegistryError, RegistryResult};
use crate::http::HttpSource;
use crate::source::{Catalog, InMemorySource, TypeSource};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Where type definitions come from.
///
/// A local catalog takes precedence over a remote registry when both are
/// set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// JSON catalog file to load into memory.
    pub catalog_path: Option<PathBuf>,
    /// Base URL of a remote registry API.
    pub base_url: Option<String>,
    /// Request timeout for the remote registry (in seconds).
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the configured source.
    pub fn source(&self) -> RegistryResult<Arc<dyn TypeSource>> {
        if let Some(path) = &self.catalog_path {
            let catalog = Catalog::from_path(path)?;
            return Ok(Arc::new(InMemorySource::from_catalog(catalog)?));
        }
        if self.base_url.is_some() {
            return Ok(Arc::new(HttpSource::from_config(self)?));
        }
        Err(RegistryError::Config(
            "either catalog_path or base_url must be set".into(),
        ))
    }
}
