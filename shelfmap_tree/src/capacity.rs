// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom-up occupancy and capacity aggregation.
//!
//! Occupancy counts occupied slots (`items.len()`), never unit quantities. A leaf without a
//! capacity limit is treated as exactly full: its capacity equals its occupancy.

use core::ops::{Add, AddAssign};

use serde::Serialize;

use crate::error::Result;
use crate::layout::Area;
use crate::tree::{StorageTree, TraversalOptions, Walk};
use crate::types::StorageId;

/// Occupied slots and slot capacity of a storage or subtree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    /// Occupied slots.
    pub occupied: u64,
    /// Total slot capacity.
    pub capacity: u64,
}

impl Capacity {
    /// Fraction of capacity in use, or `None` when capacity is zero.
    ///
    /// May exceed `1.0` when a leaf holds more items than its limit.
    pub fn utilization(&self) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Slot counts far below 2^52 in practice."
        )]
        Some(self.occupied as f64 / self.capacity as f64)
    }

    /// Unused slots, saturating at zero for overfilled storages.
    pub fn free(&self) -> u64 {
        self.capacity.saturating_sub(self.occupied)
    }
}

// Sums saturate at `u64::MAX`; catalog limits are not trusted to fit.
impl Add for Capacity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            occupied: self.occupied.saturating_add(rhs.occupied),
            capacity: self.capacity.saturating_add(rhs.capacity),
        }
    }
}

impl AddAssign for Capacity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A subtree annotated with [`Capacity`] at every storage.
#[derive(Clone, Debug)]
pub struct CapacityReport {
    root: StorageId,
    order: Vec<StorageId>,
    by_slot: Vec<Option<Capacity>>,
}

impl CapacityReport {
    /// The storage the aggregation started from.
    pub fn root(&self) -> StorageId {
        self.root
    }

    /// Capacity of the whole subtree.
    pub fn total(&self) -> Capacity {
        self.by_slot[self.root.idx()].unwrap_or_default()
    }

    /// Capacity of the subtree rooted at `id`, if `id` was part of the aggregation.
    pub fn get(&self, id: StorageId) -> Option<Capacity> {
        self.by_slot.get(id.idx()).copied().flatten()
    }

    /// Every aggregated storage with its capacity, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (StorageId, Capacity)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.get(id).map(|c| (id, c)))
    }
}

/// Capacity contributed by a single leaf.
fn leaf_capacity(tree: &StorageTree, id: StorageId) -> Capacity {
    let Some(storage) = tree.get(id) else {
        return Capacity::default();
    };
    let occupied = storage.items.len() as u64;
    Capacity {
        occupied,
        capacity: storage.capacity_limit.unwrap_or(occupied),
    }
}

/// Aggregate occupancy and capacity for every storage under `root`.
///
/// Fails only with [`TreeError::CorruptTree`](crate::TreeError::CorruptTree); no partial
/// report is returned in that case.
pub fn aggregate(
    tree: &StorageTree,
    root: StorageId,
    options: TraversalOptions,
) -> Result<CapacityReport> {
    let walk = tree.walk(root, options)?;
    Ok(aggregate_walk(tree, &walk))
}

/// Aggregate over a walk that was already taken, so callers that also classify the
/// subtree traverse it once.
pub fn aggregate_walk(tree: &StorageTree, walk: &Walk) -> CapacityReport {
    let root = walk.root();
    let visits = walk.visits();
    let mut sums = vec![Capacity::default(); visits.len()];
    // Reverse pre-order sees every child before its parent.
    for (i, visit) in visits.iter().enumerate().rev() {
        if tree.is_leaf(visit.id) {
            sums[i] = leaf_capacity(tree, visit.id);
        }
        if let Some(p) = visit.parent {
            let child = sums[i];
            sums[p] += child;
        }
    }
    let mut by_slot = vec![None; tree.len()];
    let mut order = Vec::with_capacity(visits.len());
    for (visit, sum) in visits.iter().zip(sums) {
        by_slot[visit.id.idx()] = Some(sum);
        order.push(visit.id);
    }
    let report = CapacityReport {
        root,
        order,
        by_slot,
    };
    let total = report.total();
    tracing::debug!(
        storages = visits.len(),
        occupied = total.occupied,
        capacity = total.capacity,
        "aggregated storage capacity"
    );
    report
}

/// Occupied slots under `node`: `items.len()` for a leaf, the sum over children otherwise.
pub fn occupied_count(tree: &StorageTree, node: StorageId) -> Result<u64> {
    Ok(aggregate(tree, node, TraversalOptions::default())?
        .total()
        .occupied)
}

/// Slot capacity under `node`: the capacity limit of a leaf (or its occupancy when the limit
/// is unknown), the sum over children otherwise.
pub fn capacity_total(tree: &StorageTree, node: StorageId) -> Result<u64> {
    Ok(aggregate(tree, node, TraversalOptions::default())?
        .total()
        .capacity)
}

/// Sum of the capacity of every top-level storage in `area`.
pub fn aggregate_area(
    tree: &StorageTree,
    area: &Area,
    options: TraversalOptions,
) -> Result<Capacity> {
    let mut total = Capacity::default();
    for &root in &area.storages {
        total += aggregate(tree, root, options)?.total();
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Storage, StorageRecord, StoredItem};
    use crate::{CorruptReason, TreeError};
    use shelfmap_geometry::BoundingBox;

    fn items(n: usize) -> Vec<StoredItem> {
        (0..n).map(|i| StoredItem::new(format!("p{i}"), 1)).collect()
    }

    /// Rack with two shelves; shelf A has bins with 2 and 5 items, shelf B one empty bin.
    fn warehouse_rack() -> (StorageTree, StorageId) {
        let mut tree = StorageTree::new();
        let rack = tree.insert(None, Storage::new("rack", "Rack")).unwrap();
        let a = tree.insert(Some(rack), Storage::new("a", "Shelf A")).unwrap();
        let b = tree.insert(Some(rack), Storage::new("b", "Shelf B")).unwrap();
        tree.insert(
            Some(a),
            Storage::new("a1", "Bin A1").with_items(items(2)).with_capacity(4),
        )
        .unwrap();
        tree.insert(Some(a), Storage::new("a2", "Bin A2").with_items(items(5)))
            .unwrap();
        tree.insert(Some(b), Storage::new("b1", "Bin B1").with_capacity(6))
            .unwrap();
        (tree, rack)
    }

    #[test]
    fn sums_leaves_bottom_up() {
        let (tree, rack) = warehouse_rack();
        let report = aggregate(&tree, rack, TraversalOptions::default()).unwrap();
        assert_eq!(
            report.total(),
            Capacity {
                occupied: 7,
                capacity: 15
            }
        );
        let a = tree.lookup("a").unwrap();
        assert_eq!(
            report.get(a),
            Some(Capacity {
                occupied: 7,
                capacity: 9
            })
        );
        let b = tree.lookup("b").unwrap();
        assert_eq!(
            report.get(b),
            Some(Capacity {
                occupied: 0,
                capacity: 6
            })
        );
        assert_eq!(report.iter().count(), tree.len());
        assert_eq!(report.iter().next().map(|(id, _)| id), Some(rack));
    }

    #[test]
    fn occupied_matches_leaf_item_total() {
        let (tree, rack) = warehouse_rack();
        let leaf_items: u64 = tree
            .iter()
            .filter(|(id, _)| tree.is_leaf(*id))
            .map(|(_, s)| s.items.len() as u64)
            .sum();
        assert_eq!(occupied_count(&tree, rack).unwrap(), leaf_items);
    }

    #[test]
    fn unknown_limit_counts_as_full() {
        let mut tree = StorageTree::new();
        let bin = tree
            .insert(None, Storage::new("bin", "Bin").with_items(items(3)))
            .unwrap();
        assert_eq!(capacity_total(&tree, bin).unwrap(), 3);
        assert_eq!(occupied_count(&tree, bin).unwrap(), 3);
    }

    #[test]
    fn utilization_and_free() {
        let c = Capacity {
            occupied: 3,
            capacity: 4,
        };
        assert_eq!(c.utilization(), Some(0.75));
        assert_eq!(c.free(), 1);
        let over = Capacity {
            occupied: 5,
            capacity: 4,
        };
        assert_eq!(over.free(), 0);
        assert_eq!(Capacity::default().utilization(), None);
    }

    #[test]
    fn huge_limits_saturate() {
        let mut tree = StorageTree::new();
        let rack = tree.insert(None, Storage::new("rack", "Rack")).unwrap();
        for (key, limit) in [("big", u64::MAX), ("small", 1)] {
            tree.insert(Some(rack), Storage::new(key, key).with_capacity(limit))
                .unwrap();
        }
        assert_eq!(capacity_total(&tree, rack).unwrap(), u64::MAX);
        let report = aggregate(&tree, rack, TraversalOptions::default()).unwrap();
        assert_eq!(report.total().free(), u64::MAX);
        assert_eq!(report.total().utilization(), Some(0.0));
    }

    #[test]
    fn area_sums_top_level_storages() {
        let (mut tree, rack) = warehouse_rack();
        let cart = tree
            .insert(
                None,
                Storage::new("cart", "Cart")
                    .with_items(items(1))
                    .with_capacity(2),
            )
            .unwrap();
        let area = Area {
            key: "zone-1".into(),
            name: "Zone 1".into(),
            bounding_box: BoundingBox::ZERO,
            storages: vec![rack, cart],
        };
        assert_eq!(
            aggregate_area(&tree, &area, TraversalOptions::default()).unwrap(),
            Capacity {
                occupied: 8,
                capacity: 17
            }
        );
    }

    #[test]
    fn cyclic_records_fail_without_partial_result() {
        let mut records: Vec<StorageRecord> = (0..65)
            .map(|i| StorageRecord {
                id: format!("s{i}"),
                name: String::new(),
                orientation: Default::default(),
                bounding_box: BoundingBox::ZERO,
                capacity_limit: None,
                items: Vec::new(),
                children: vec![format!("s{}", (i + 1) % 65)],
            })
            .collect();
        records.push(StorageRecord {
            id: "entry".into(),
            name: String::new(),
            orientation: Default::default(),
            bounding_box: BoundingBox::ZERO,
            capacity_limit: None,
            items: Vec::new(),
            children: vec!["s0".into()],
        });
        let tree = StorageTree::from_records(records).unwrap();
        let entry = tree.lookup("entry").unwrap();
        let err = occupied_count(&tree, entry).unwrap_err();
        assert!(err.is_corrupt(), "got {err:?}");
        let s0 = tree.lookup("s0").unwrap();
        assert_eq!(
            capacity_total(&tree, s0).unwrap_err(),
            TreeError::CorruptTree {
                root: "s0".into(),
                reason: CorruptReason::DepthExceeded { limit: 64 },
            }
        );
    }
}
