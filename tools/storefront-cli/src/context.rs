//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::{Currency, Store};
use storefront_data::{HttpProductSource, ProductLoader};

use crate::config::{StorefrontConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: StorefrontConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_path(&cwd, path);
            (StorefrontConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        Ok(Self {
            config: config.with_env_overrides(),
            config_path,
            output,
            cwd,
        })
    }

    pub fn currency(&self) -> Result<Currency> {
        self.config.currency()
    }

    /// Empty store in the configured currency.
    pub fn store(&self) -> Result<Store> {
        Ok(Store::new(self.currency()?))
    }

    /// Product API client for the configured endpoint.
    pub fn source(&self) -> Result<HttpProductSource> {
        HttpProductSource::new(self.config.api_config()).context("Failed to build HTTP client")
    }

    /// Product list loader with the configured retry policy.
    pub fn loader(&self) -> Result<ProductLoader<HttpProductSource>> {
        Ok(ProductLoader::new(self.source()?).with_policy(self.config.retry_policy()))
    }
}

/// Find the nearest config file walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work/shop");
        assert_eq!(
            resolve_path(cwd, "storefront.toml"),
            PathBuf::from("/work/shop/storefront.toml")
        );
        assert_eq!(resolve_path(cwd, "/etc/shop.toml"), PathBuf::from("/etc/shop.toml"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("storefront-cli-find-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".storefront.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join(".storefront.toml")));

        std::fs::write(nested.join("storefront.json"), "{}").unwrap();
        assert_eq!(find_config(&nested), Some(nested.join("storefront.json")));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
