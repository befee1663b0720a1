//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["campus.toml", ".campus.toml", "campus.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory that store files are resolved against: the config file's
    /// directory, or the working directory when there is no config file.
    pub fn store_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| self.resolve_path(p))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Path of the catalog file.
    pub fn catalog_path(&self) -> PathBuf {
        self.store_dir().join(&self.config.shop.catalog)
    }

    /// Path of the order book file.
    pub fn orders_path(&self) -> PathBuf {
        self.store_dir().join(&self.config.shop.orders)
    }

    /// Path of the review file.
    pub fn reviews_path(&self) -> PathBuf {
        self.store_dir().join(&self.config.shop.reviews)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config_path: Option<&str>) -> Context {
        Context {
            config: CliConfig::default(),
            config_path: config_path.map(PathBuf::from),
            output: Output::new(false, true),
            cwd: PathBuf::from("/srv/shop"),
        }
    }

    #[test]
    fn test_store_paths_follow_config_dir() {
        let ctx = context(Some("/etc/campus/campus.toml"));
        assert_eq!(ctx.catalog_path(), PathBuf::from("/etc/campus/catalog.toml"));

        let relative = context(Some("conf/campus.toml"));
        assert_eq!(relative.orders_path(), PathBuf::from("/srv/shop/conf/orders.json"));
    }

    #[test]
    fn test_store_paths_default_to_cwd() {
        assert_eq!(context(None).reviews_path(), PathBuf::from("/srv/shop/reviews.json"));
        assert_eq!(
            context(Some("campus.toml")).catalog_path(),
            PathBuf::from("/srv/shop/catalog.toml")
        );
    }
}
