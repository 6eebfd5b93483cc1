// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for traversal, classification, and viewport fitting.

use serde::{Deserialize, Serialize};
use shelfmap_geometry::FitOptions;
use shelfmap_tree::TraversalOptions;

use crate::error::{Result, StockError};
use crate::status::ClassifierPolicy;

/// All tunables of the inventory core. Every field has a default, so partial JSON works.
///
/// ```rust
/// use shelfmap_stock::InventoryConfig;
///
/// let config = InventoryConfig::from_json_str(r#"{"traversal": {"maxDepth": 16}}"#)?;
/// assert_eq!(config.traversal.max_depth, 16);
/// assert_eq!(config.classifier.near_min_factor, 1.2);
/// # Ok::<(), shelfmap_stock::StockError>(())
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryConfig {
    /// Depth bound for every tree traversal.
    pub traversal: TraversalOptions,
    /// Classifier tunables.
    pub classifier: ClassifierPolicy,
    /// Viewport fitting options.
    pub viewport: FitOptions,
}

impl InventoryConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the algorithms cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.traversal.max_depth == 0 {
            return Err(StockError::InvalidConfig(
                "traversal.maxDepth must be at least 1".into(),
            ));
        }
        let factor = self.classifier.near_min_factor;
        if !factor.is_finite() || factor < 1.0 {
            return Err(StockError::InvalidConfig(format!(
                "classifier.nearMinFactor must be a finite number >= 1.0, got {factor}"
            )));
        }
        let padding = self.viewport.padding;
        if !padding.is_finite() || padding < 0.0 {
            return Err(StockError::InvalidConfig(format!(
                "viewport.padding must be a finite number >= 0, got {padding}"
            )));
        }
        Ok(())
    }
}
