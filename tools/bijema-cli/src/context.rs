//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use bijema_commerce::catalog::Product;
use serde::de::DeserializeOwned;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub async fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path).await?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd, &output).await.unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree. A file that fails to load is
    /// reported and the walk continues upward.
    async fn find_config(start: &Path, output: &Output) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?).await {
                        Ok(config) => return Some(config),
                        Err(e) => output.warn(&format!(
                            "Skipping config {}: {:#}",
                            config_path.display(),
                            e
                        )),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Read and decode a JSON data file.
    pub async fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let path = self.resolve_path(path);
        tracing::debug!(path = %path.display(), "reading data file");
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))
    }

    /// Load the product catalog from `override_path` or the configured file,
    /// priced in the configured currency.
    pub async fn load_catalog(&self, override_path: Option<&str>) -> Result<Vec<Product>> {
        let currency = self.config.storefront.currency()?;
        let path = override_path
            .or(self.config.storefront.catalog.as_deref())
            .context("No catalog file. Pass --catalog or set storefront.catalog in bijema.toml.")?;
        let products: Vec<Product> = self.read_json(path).await?;
        let products: Vec<Product> = products
            .into_iter()
            .map(|p| p.in_currency(currency))
            .collect();
        self.output
            .debug(&format!("Loaded {} products from {}", products.len(), path));
        Ok(products)
    }
}
