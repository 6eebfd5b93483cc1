// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-leaf, per-product classification of a storage subtree.

use std::collections::HashMap;

use serde::Serialize;
use shelfmap_tree::{StorageId, StorageTree, Walk};

use crate::config::InventoryConfig;
use crate::error::Result;
use crate::status::{ClassifierPolicy, ProductThresholds, StatusBasis, StockStatus};

/// Thresholds keyed by product id.
pub type ThresholdMap = HashMap<String, ProductThresholds>;

/// Status of one product line in one leaf storage.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedLine {
    /// The leaf holding the product.
    pub storage: StorageId,
    /// Catalog key of the leaf.
    pub storage_key: String,
    /// Path from the classified root down to the leaf (inclusive).
    pub path: Vec<StorageId>,
    /// Product in the line.
    pub product_id: String,
    /// Occupied slots holding the product in this leaf.
    pub count: u64,
    /// Units across those slots. Informational only.
    pub quantity: u64,
    /// Classified status.
    pub status: StockStatus,
    /// Whether thresholds were available.
    pub basis: StatusBasis,
    /// Thresholds used, if any.
    pub thresholds: Option<ProductThresholds>,
}

/// Product lines of a leaf in first-seen order: `(product, slots, units)`.
fn product_lines(tree: &StorageTree, leaf: StorageId) -> Vec<(&str, u64, u64)> {
    let Some(storage) = tree.get(leaf) else {
        return Vec::new();
    };
    let mut lines: Vec<(&str, u64, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for item in &storage.items {
        let at = *index.entry(item.product_id.as_str()).or_insert_with(|| {
            lines.push((item.product_id.as_str(), 0, 0));
            lines.len() - 1
        });
        lines[at].1 += 1;
        lines[at].2 += u64::from(item.quantity);
    }
    lines
}

/// Classify every product line of every leaf reached by `walk`.
pub(crate) fn classify_walk(
    tree: &StorageTree,
    walk: &Walk,
    thresholds: &ThresholdMap,
    policy: &ClassifierPolicy,
) -> Vec<ClassifiedLine> {
    let mut out = Vec::new();
    for (i, visit) in walk.visits().iter().enumerate() {
        if !tree.is_leaf(visit.id) {
            continue;
        }
        let lines = product_lines(tree, visit.id);
        if lines.is_empty() {
            continue;
        }
        let storage_key = tree
            .get(visit.id)
            .map(|s| s.key.clone())
            .unwrap_or_default();
        let path = walk.path(i);
        for (product_id, count, quantity) in lines {
            let t = thresholds.get(product_id);
            let basis = if t.is_some() {
                StatusBasis::Thresholds
            } else {
                tracing::debug!(
                    storage = %storage_key,
                    product = %product_id,
                    "no thresholds for product, classifying as stocked/empty only"
                );
                StatusBasis::MissingThresholds
            };
            out.push(ClassifiedLine {
                storage: visit.id,
                storage_key: storage_key.clone(),
                path: path.clone(),
                product_id: product_id.to_owned(),
                count,
                quantity,
                status: policy.classify(count, t),
                basis,
                thresholds: t.copied(),
            });
        }
    }
    out
}

/// Classify every (leaf, product line) pair under `root`, in traversal order.
///
/// Leaves without items produce no lines; see [`summarize`](crate::summarize) for
/// leaf-level statuses including `empty`. Internal storages never get a status.
pub fn classify_tree(
    tree: &StorageTree,
    root: StorageId,
    thresholds: &ThresholdMap,
    config: &InventoryConfig,
) -> Result<Vec<ClassifiedLine>> {
    let walk = tree.walk(root, config.traversal)?;
    Ok(classify_walk(tree, &walk, thresholds, &config.classifier))
}
