//! Command-line front end for importing JSON documents.
//!
//! Everything except process setup lives here so the argument handling,
//! config layering and import pipeline can be exercised from tests.

use anyhow::{Context, Result, anyhow};
use builder_import::NodeBuilder;
use builder_model::{RootNode, StructuredType, TypeKey};
use builder_registry::{CachedRegistry, RegistryConfig};
use builder_types::{IdGenerator, SequentialGenerator, UuidGenerator};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "builder-import")]
#[command(about = "Import a JSON document as a typed node tree")]
pub struct Args {
    /// Root type as `namespace.Name`
    #[arg(short, long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// JSON catalog of type definitions
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Base URL of a remote type registry
    #[arg(long)]
    pub registry_url: Option<String>,

    /// TOML config file with a `[registry]` section
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How node ids are generated
    #[arg(long, value_enum, default_value_t = IdScheme::Uuid)]
    pub ids: IdScheme,

    /// Print the tree on a single line
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Input document (stdin if omitted)
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdScheme {
    /// Random time-ordered UUIDs
    Uuid,
    /// 1, 2, 3, ... in build order
    Sequential,
}

impl IdScheme {
    pub fn generator(self) -> Arc<dyn IdGenerator> {
        match self {
            IdScheme::Uuid => Arc::new(UuidGenerator),
            IdScheme::Sequential => Arc::new(SequentialGenerator::new()),
        }
    }
}

/// On-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub registry: RegistryConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

impl Args {
    /// Config file settings with command-line overrides applied.
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::load(path)?.registry,
            None => RegistryConfig::default(),
        };
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        if let Some(url) = &self.registry_url {
            config.base_url = Some(url.clone());
        }
        Ok(config)
    }

    pub fn root_type(&self) -> Result<StructuredType> {
        parse_type(&self.type_name)
    }
}

/// Parses `namespace.Name`, splitting at the last `.`.
pub fn parse_type(qualified: &str) -> Result<StructuredType> {
    let key = TypeKey::parse_qualified(qualified)
        .ok_or_else(|| anyhow!("type must be `namespace.Name`, got `{qualified}`"))?;
    Ok(StructuredType::from(&key))
}

/// Reads the document from `path`, or stdin when there is none.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}

/// Imports `document` as described by `args`.
pub async fn run(args: &Args, document: &str) -> Result<RootNode> {
    let ty = args.root_type()?;
    let config = args.registry_config()?;
    let source = config
        .source()
        .context("Failed to set up the type registry")?;

    let json: serde_json::Value =
        serde_json::from_str(document).context("Input is not valid JSON")?;
    debug!(type_key = %ty.key(), ids = ?args.ids, "Starting import");

    let builder = NodeBuilder::new(CachedRegistry::new(source), args.ids.generator());
    let root = builder
        .import(&json, &ty)
        .await
        .with_context(|| format!("Failed to import document as {}", ty.key()))?;

    info!(nodes = root.node_count(), "Import complete");
    Ok(root)
}

pub fn render(root: &RootNode, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(root)?
    } else {
        serde_json::to_string_pretty(root)?
    };
    Ok(text)
}
