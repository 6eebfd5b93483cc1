// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the storage tree: handles, storage payloads, and catalog records.

use serde::{Deserialize, Serialize};
use shelfmap_geometry::BoundingBox;

/// Handle of a storage inside a [`StorageTree`](crate::StorageTree).
///
/// Handles are plain slot indices: a tree is built once from a snapshot and never shrinks,
/// so a handle stays valid for the lifetime of the tree that issued it. Handles from a
/// different tree are rejected with [`TreeError::StaleId`](crate::TreeError::StaleId) when
/// they fall outside this tree's slots; otherwise they silently alias, so do not mix trees.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct StorageId(pub(crate) u32);

impl StorageId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Axis along which a renderer lays out the children of a storage.
///
/// Has no effect on aggregation or classification.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children stacked top to bottom (shelves in a rack).
    #[default]
    Vertical,
    /// Children placed left to right (bays in a row).
    Horizontal,
}

/// One occupied slot in a leaf storage.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    /// Catalog identifier of the product in the slot.
    pub product_id: String,
    /// Units held in the slot. Informational; occupancy counts slots, not units.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl StoredItem {
    /// Create a slot holding `quantity` units of `product_id`.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Payload of a storage node.
///
/// Structure (parent and children) is owned by the tree; this is only what the catalog
/// knows about the container itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    /// Catalog key, unique within a tree.
    #[serde(rename = "id")]
    pub key: String,
    /// Display name.
    pub name: String,
    /// Layout axis for children.
    pub orientation: Orientation,
    /// Placement in facility space.
    pub bounding_box: BoundingBox,
    /// Maximum number of occupied slots, if known. Only meaningful on leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_limit: Option<u64>,
    /// Occupied slots. Always empty on internal storages.
    pub items: Vec<StoredItem>,
}

impl Storage {
    /// Create an empty storage with a zero bounding box.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            orientation: Orientation::default(),
            bounding_box: BoundingBox::ZERO,
            capacity_limit: None,
            items: Vec::new(),
        }
    }

    /// Set the bounding box.
    #[must_use]
    pub fn with_bounds(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Set the layout orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the capacity limit.
    #[must_use]
    pub fn with_capacity(mut self, limit: u64) -> Self {
        self.capacity_limit = Some(limit);
        self
    }

    /// Append occupied slots.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = StoredItem>) -> Self {
        self.items.extend(items);
        self
    }
}

/// Flat catalog row describing one storage and the keys of its children.
///
/// This is the shape the catalog service delivers. Because children are referenced by key,
/// a corrupted snapshot can describe cycles or shared children; those are reported by
/// [`StorageTree::walk`](crate::StorageTree::walk), not at load time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    /// Catalog key.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Layout axis for children.
    #[serde(default)]
    pub orientation: Orientation,
    /// Placement in facility space.
    #[serde(default)]
    pub bounding_box: BoundingBox,
    /// Maximum number of occupied slots, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_limit: Option<u64>,
    /// Occupied slots.
    #[serde(default)]
    pub items: Vec<StoredItem>,
    /// Keys of child storages, in layout order.
    #[serde(default)]
    pub children: Vec<String>,
}

impl StorageRecord {
    pub(crate) fn split(self) -> (Storage, Vec<String>) {
        let storage = Storage {
            key: self.id,
            name: self.name,
            orientation: self.orientation,
            bounding_box: self.bounding_box,
            capacity_limit: self.capacity_limit,
            items: self.items,
        };
        (storage, self.children)
    }
}
