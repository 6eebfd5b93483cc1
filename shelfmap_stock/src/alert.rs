// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder alerts: under-threshold product lines joined with purchase history.

use serde::Serialize;
use shelfmap_tree::{StorageId, StorageTree, Warehouse};

use crate::classify::{ClassifiedLine, ThresholdMap, classify_walk};
use crate::config::InventoryConfig;
use crate::error::Result;
use crate::purchase::{LastPurchase, PurchaseHistory, last_completed_purchase};
use crate::status::StockStatus;

/// A restock recommendation for one product line in one leaf storage.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAlert {
    /// Product to restock.
    pub product_id: String,
    /// Leaf holding the product.
    pub storage: StorageId,
    /// Catalog key of the leaf.
    pub storage_key: String,
    /// Path from the scanned root down to the leaf (inclusive).
    pub storage_path: Vec<StorageId>,
    /// Occupied slots holding the product.
    pub count: u64,
    /// Why the alert was raised: `low`, `near-min`, or `below-reorder`.
    pub status: StockStatus,
    /// Latest completed purchase across all suppliers, if any.
    pub last_purchase: Option<LastPurchase>,
    /// `max(0, minimum_stock - count)`.
    pub suggested_quantity: u64,
}

/// Turn classified lines into alerts, most urgent (lowest count) first.
///
/// Only lines with a status in `{low, near-min, below-reorder}` produce alerts. Ties on
/// count are ordered by product id and then by the input order of the lines.
pub fn alerts_from_lines(lines: &[ClassifiedLine], history: &PurchaseHistory) -> Vec<InventoryAlert> {
    let mut alerts: Vec<InventoryAlert> = lines
        .iter()
        .filter(|line| line.status.needs_reorder())
        .map(|line| {
            let minimum = line.thresholds.map_or(0, |t| t.minimum_stock);
            let last_purchase = history
                .get(&line.product_id)
                .and_then(|records| last_completed_purchase(&line.product_id, records));
            InventoryAlert {
                product_id: line.product_id.clone(),
                storage: line.storage,
                storage_key: line.storage_key.clone(),
                storage_path: line.path.clone(),
                count: line.count,
                status: line.status,
                last_purchase,
                suggested_quantity: minimum.saturating_sub(line.count),
            }
        })
        .collect();
    alerts.sort_by(|a, b| {
        a.count
            .cmp(&b.count)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    alerts
}

/// Walk the subtree under `root`, classify it, and emit reorder alerts.
///
/// Fails only when the subtree is corrupt.
pub fn generate_alerts(
    tree: &StorageTree,
    root: StorageId,
    thresholds: &ThresholdMap,
    history: &PurchaseHistory,
    config: &InventoryConfig,
) -> Result<Vec<InventoryAlert>> {
    let walk = tree.walk(root, config.traversal)?;
    let lines = classify_walk(tree, &walk, thresholds, &config.classifier);
    let alerts = alerts_from_lines(&lines, history);
    tracing::debug!(
        lines = lines.len(),
        alerts = alerts.len(),
        "generated reorder alerts"
    );
    Ok(alerts)
}

/// Alerts for every top-level storage of every area in the warehouse, merged and ordered
/// as in [`alerts_from_lines`].
///
/// A corrupt subtree anywhere aborts the whole scan.
pub fn generate_warehouse_alerts(
    warehouse: &Warehouse,
    thresholds: &ThresholdMap,
    history: &PurchaseHistory,
    config: &InventoryConfig,
) -> Result<Vec<InventoryAlert>> {
    let mut lines = Vec::new();
    for area in warehouse.areas() {
        for &root in &area.storages {
            let walk = warehouse.tree.walk(root, config.traversal)?;
            lines.extend(classify_walk(
                &warehouse.tree,
                &walk,
                thresholds,
                &config.classifier,
            ));
        }
    }
    Ok(alerts_from_lines(&lines, history))
}
