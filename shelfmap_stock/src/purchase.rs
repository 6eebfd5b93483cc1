// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Purchase history supplied by the supplier/order service.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a purchase order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    /// Drafted, not yet sent.
    Pending,
    /// Sent to the supplier.
    Ordered,
    /// Delivered and booked.
    Completed,
    /// Abandoned.
    Cancelled,
}

/// One product line of a purchase order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    /// Ordered product.
    pub product_id: String,
    /// Ordered units.
    pub quantity: u64,
}

/// A purchase order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Supplier the order was placed with.
    pub supplier_name: String,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: PurchaseStatus,
    /// Ordered lines.
    #[serde(default)]
    pub line_items: Vec<PurchaseLine>,
}

/// Purchase records keyed by product id, across all suppliers of that product.
pub type PurchaseHistory = HashMap<String, Vec<PurchaseRecord>>;

/// The purchase an alert points the buyer at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPurchase {
    /// Supplier of that order.
    pub supplier_name: String,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Units of the product on that order, summed over its lines for the product.
    pub quantity: u64,
}

/// Newest first; same timestamp falls back to supplier name, ascending.
fn recency(a: &PurchaseRecord, b: &PurchaseRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.supplier_name.cmp(&b.supplier_name))
}

/// Most recent completed purchase among `records` that has a line for `product_id`.
pub fn last_completed_purchase(product_id: &str, records: &[PurchaseRecord]) -> Option<LastPurchase> {
    let best = records
        .iter()
        .filter(|r| r.status == PurchaseStatus::Completed)
        .filter(|r| r.line_items.iter().any(|l| l.product_id == product_id))
        .min_by(|a, b| recency(a, b))?;
    Some(LastPurchase {
        supplier_name: best.supplier_name.clone(),
        created_at: best.created_at,
        quantity: best
            .line_items
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .sum(),
    })
}
