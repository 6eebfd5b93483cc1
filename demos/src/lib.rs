// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the Shelfmap demos: logging and a bundled sample warehouse.

use shelfmap_stock::{PurchaseHistory, ThresholdMap};
use shelfmap_tree::{Warehouse, WarehouseSnapshot};

pub mod logging;

/// Sample warehouse snapshot: one hall with a receiving area and a bulk area.
pub const SAMPLE_WAREHOUSE: &str = include_str!("../data/warehouse.json");
/// Per-product thresholds for the sample warehouse.
pub const SAMPLE_THRESHOLDS: &str = include_str!("../data/thresholds.json");
/// Purchase history for the sample warehouse.
pub const SAMPLE_PURCHASES: &str = include_str!("../data/purchases.json");

/// Errors surfaced by the demos.
pub type DemoError = Box<dyn std::error::Error>;

/// Parse the bundled sample data.
pub fn sample() -> Result<(Warehouse, ThresholdMap, PurchaseHistory), DemoError> {
    let snapshot: WarehouseSnapshot = serde_json::from_str(SAMPLE_WAREHOUSE)?;
    let warehouse = Warehouse::from_snapshot(snapshot)?;
    let thresholds = serde_json::from_str(SAMPLE_THRESHOLDS)?;
    let purchases = serde_json::from_str(SAMPLE_PURCHASES)?;
    Ok((warehouse, thresholds, purchases))
}
