// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelfmap Stock: stock-status classification, reorder alerts, and inventory summaries.
//!
//! This crate works on an already-fetched [`shelfmap_tree::StorageTree`] snapshot plus two
//! externally supplied inputs:
//!
//! - [`ProductThresholds`] per product (minimum stock and reorder point), and
//! - [`PurchaseRecord`]s per product across all of its suppliers.
//!
//! Every function is pure: it takes a snapshot and returns a fresh value. There is no global
//! state and nothing to cancel; concurrent calls are independent.
//!
//! ## Classification
//!
//! [`classify`] maps a count and optional thresholds onto [`StockStatus`] with a fixed
//! precedence (`empty`, `low`, `near-min`, `below-reorder`, `has-products`, `optimal`; first
//! match wins). [`classify_tree`] applies it to every product line of every leaf under a root.
//! Counts are occupied slots, the same convention [`shelfmap_tree::aggregate`] uses. Products
//! without thresholds are classified as `empty` or `has-products` only and carry
//! [`StatusBasis::MissingThresholds`].
//!
//! ## Alerts
//!
//! [`generate_alerts`] keeps the `low`, `near-min`, and `below-reorder` lines, joins each with
//! the latest completed purchase of its product (newest `created_at` first, ties by supplier
//! name), and suggests `max(0, minimum_stock - count)` units. Alerts are ordered by ascending
//! count, then product id.
//!
//! ## Errors
//!
//! The only hard failure is a corrupt tree ([`shelfmap_tree::TreeError::CorruptTree`], wrapped
//! in [`StockError::Tree`]); it aborts the computation and no partial result is returned.
//!
//! # Example
//!
//! ```rust
//! use shelfmap_stock::{
//!     InventoryConfig, ProductThresholds, PurchaseHistory, StockStatus, ThresholdMap,
//!     generate_alerts,
//! };
//! use shelfmap_tree::{Storage, StorageTree, StoredItem};
//!
//! let mut tree = StorageTree::new();
//! let rack = tree.insert(None, Storage::new("rack", "Rack"))?;
//! tree.insert(Some(rack), Storage::new("bin", "Bin").with_items([StoredItem::new("bolt", 25)]))?;
//!
//! let thresholds = ThresholdMap::from([("bolt".to_owned(), ProductThresholds::new(3, 1))]);
//! let alerts = generate_alerts(
//!     &tree,
//!     rack,
//!     &thresholds,
//!     &PurchaseHistory::new(),
//!     &InventoryConfig::default(),
//! )?;
//! assert_eq!(alerts.len(), 1);
//! assert_eq!(alerts[0].status, StockStatus::Low);
//! assert_eq!(alerts[0].suggested_quantity, 2);
//! # Ok::<(), shelfmap_stock::StockError>(())
//! ```

mod alert;
mod classify;
mod config;
mod error;
mod purchase;
mod status;
mod summary;

pub use alert::{InventoryAlert, alerts_from_lines, generate_alerts, generate_warehouse_alerts};
pub use classify::{ClassifiedLine, ThresholdMap, classify_tree};
pub use config::InventoryConfig;
pub use error::{Result, StockError};
pub use purchase::{
    LastPurchase, PurchaseHistory, PurchaseLine, PurchaseRecord, PurchaseStatus,
    last_completed_purchase,
};
pub use status::{
    ClassifierPolicy, DEFAULT_NEAR_MIN_FACTOR, ProductThresholds, StatusBasis, StockStatus,
    classify,
};
pub use summary::{InventorySummary, LeafStatus, summarize};
