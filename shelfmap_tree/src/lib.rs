// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelfmap Tree: nested storage containers with bounded traversal and capacity aggregation.
//!
//! A warehouse snapshot is a tree of physical storages (racks, shelves, bins, ...). Each
//! storage is either
//!
//! - a **leaf**, which has no children and may hold occupied slots ([`StoredItem`]s), or
//! - **internal**, which has children and holds nothing itself.
//!
//! [`StorageTree`] keeps the whole snapshot in an arena addressed by [`StorageId`] handles.
//! It is built once (from [`StorageRecord`]s delivered by the catalog, or with
//! [`StorageTree::insert`]) and then only read.
//!
//! ## One traversal
//!
//! Everything that looks at a subtree goes through [`StorageTree::walk`]: an iterative,
//! depth-bounded pre-order walk that reports [`TreeError::CorruptTree`] when the snapshot
//! contains a cycle, a shared child, or a path deeper than [`TraversalOptions::max_depth`]
//! (64 by default). Corrupt input therefore fails fast instead of recursing forever.
//!
//! ## Capacity
//!
//! [`aggregate`] annotates every storage of a subtree with a [`Capacity`]:
//! - occupied slots: `items.len()` on leaves, summed over children on internal storages;
//! - capacity: the leaf's `capacity_limit`, or its occupancy when the limit is unknown,
//!   summed over children on internal storages.
//!
//! [`occupied_count`] and [`capacity_total`] are shorthands for the subtree totals.
//!
//! ## Layout
//!
//! [`Area`], [`Facility`], and [`Warehouse`] group top-level storages spatially and provide
//! content boxes for [`shelfmap_geometry::fit`].
//!
//! # Example
//!
//! ```rust
//! use shelfmap_tree::{Storage, StorageTree, StoredItem, TraversalOptions, aggregate};
//!
//! let mut tree = StorageTree::new();
//! let rack = tree.insert(None, Storage::new("rack-1", "Rack 1"))?;
//! let bin = tree.insert(
//!     Some(rack),
//!     Storage::new("bin-1", "Bin 1")
//!         .with_capacity(4)
//!         .with_items([StoredItem::new("bolt-m6", 50)]),
//! )?;
//! let _empty = tree.insert(Some(rack), Storage::new("bin-2", "Bin 2").with_capacity(4))?;
//!
//! let report = aggregate(&tree, rack, TraversalOptions::default())?;
//! assert_eq!(report.total().occupied, 1);
//! assert_eq!(report.total().capacity, 8);
//! assert_eq!(report.get(bin).unwrap().utilization(), Some(0.25));
//! # Ok::<(), shelfmap_tree::TreeError>(())
//! ```

mod capacity;
mod error;
mod layout;
mod tree;
mod types;

pub use capacity::{
    Capacity, CapacityReport, aggregate, aggregate_area, aggregate_walk, capacity_total,
    occupied_count,
};
pub use error::{CorruptReason, Result, TreeError};
pub use layout::{Area, AreaRecord, Dimensions, Facility, FacilityRecord, Warehouse, WarehouseSnapshot};
pub use tree::{DEFAULT_MAX_DEPTH, StorageTree, TraversalOptions, Visit, Walk};
pub use types::{Orientation, Storage, StorageId, StorageRecord, StoredItem};
