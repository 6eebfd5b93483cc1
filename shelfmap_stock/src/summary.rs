// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inventory page summary: capacity, leaf statuses, and per-product totals.

use std::collections::BTreeMap;

use serde::Serialize;
use shelfmap_tree::{Capacity, StorageId, StorageTree, aggregate_walk};

use crate::classify::{ThresholdMap, classify_walk};
use crate::config::InventoryConfig;
use crate::error::Result;
use crate::status::StockStatus;

/// Headline status of a leaf storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafStatus {
    /// The leaf.
    pub storage: StorageId,
    /// Catalog key of the leaf.
    pub storage_key: String,
    /// Most urgent status across the leaf's product lines, `empty` if it holds nothing.
    pub status: StockStatus,
    /// Number of distinct products in the leaf.
    pub product_lines: usize,
}

/// Everything an inventory overview shows for one subtree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    /// Occupancy and capacity of the whole subtree.
    pub capacity: Capacity,
    /// Every leaf in traversal order.
    pub leaves: Vec<LeafStatus>,
    /// Number of leaves per headline status.
    pub status_counts: BTreeMap<StockStatus, usize>,
    /// Units stocked per product across the subtree.
    pub quantity_by_product: BTreeMap<String, u64>,
}

impl InventorySummary {
    /// Leaves whose headline status needs a reorder.
    pub fn leaves_needing_reorder(&self) -> impl Iterator<Item = &LeafStatus> + '_ {
        self.leaves.iter().filter(|l| l.status.needs_reorder())
    }
}

/// Summarize the subtree under `root`.
///
/// Fails only when the subtree is corrupt.
pub fn summarize(
    tree: &StorageTree,
    root: StorageId,
    thresholds: &ThresholdMap,
    config: &InventoryConfig,
) -> Result<InventorySummary> {
    let walk = tree.walk(root, config.traversal)?;
    let report = aggregate_walk(tree, &walk);
    let lines = classify_walk(tree, &walk, thresholds, &config.classifier);

    let mut quantity_by_product = BTreeMap::new();
    for line in &lines {
        *quantity_by_product
            .entry(line.product_id.clone())
            .or_insert(0) += line.quantity;
    }

    let mut leaves = Vec::new();
    let mut lines_iter = lines.iter().peekable();
    for visit in walk.visits() {
        if !tree.is_leaf(visit.id) {
            continue;
        }
        let mut status = StockStatus::Empty;
        let mut product_lines = 0;
        // Lines are in traversal order, so a leaf's lines are contiguous.
        while let Some(line) = lines_iter.next_if(|l| l.storage == visit.id) {
            status = status.min(line.status);
            product_lines += 1;
        }
        leaves.push(LeafStatus {
            storage: visit.id,
            storage_key: tree
                .get(visit.id)
                .map(|s| s.key.clone())
                .unwrap_or_default(),
            status,
            product_lines,
        });
    }

    let mut status_counts = BTreeMap::new();
    for leaf in &leaves {
        *status_counts.entry(leaf.status).or_insert(0) += 1;
    }

    Ok(InventorySummary {
        capacity: report.total(),
        leaves,
        status_counts,
        quantity_by_product,
    })
}
