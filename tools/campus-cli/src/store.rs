//! Store files: catalog, orders, reviews and cart files on disk.

use std::path::Path;

use anyhow::{Context, Result};
use campus_commerce::cart::Cart;
use campus_commerce::catalog::CatalogLookup;
use campus_commerce::ids::ProductId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Read a TOML or JSON document, by file extension.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML: {}", path.display()))
    }
}

/// Read a document, or start from the default when the file does not exist yet.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "store file missing, starting empty");
        return Ok(T::default());
    }
    load(path)
}

/// Write a TOML or JSON document, by file extension.
pub fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(value)?
    } else {
        toml::to_string_pretty(value)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "store file saved");
    Ok(())
}

/// A cart described in a file.
///
/// ```toml
/// [[lines]]
/// product = "hallabol-tee"
/// size = "M"
/// color = "Black"
/// quantity = 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartFile {
    #[serde(default)]
    pub lines: Vec<CartFileLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartFileLine {
    pub product: ProductId,
    pub size: String,
    pub color: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl CartFile {
    /// Replay the file's lines into a cart, resolving products in `catalog`.
    pub fn fill(&self, cart: &mut Cart, catalog: &impl CatalogLookup) -> Result<()> {
        for (index, line) in self.lines.iter().enumerate() {
            let product = catalog.get_item(&line.product).with_context(|| {
                format!("Line {}: product not found: {}", index + 1, line.product)
            })?;
            cart.add_item(product, &line.size, &line.color, line.quantity)
                .with_context(|| format!("Line {}: cannot add {}", index + 1, line.product))?;
        }
        Ok(())
    }
}
