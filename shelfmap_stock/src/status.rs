// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stock-status taxonomy and the pure classifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Per-product stock thresholds supplied by the product service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductThresholds {
    /// Quantity at or below which stock is critically low.
    pub minimum_stock: u64,
    /// Quantity at or below which a restock should be raised.
    pub reorder_point: u64,
}

impl ProductThresholds {
    /// Create thresholds.
    pub const fn new(minimum_stock: u64, reorder_point: u64) -> Self {
        Self {
            minimum_stock,
            reorder_point,
        }
    }
}

/// Stock status of one product line in one leaf storage.
///
/// Variants are declared from most to least urgent, which is the order [`Ord`] follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// At or below the minimum stock.
    Low,
    /// Within the near-minimum band above the minimum stock.
    NearMin,
    /// At or below the reorder point.
    BelowReorder,
    /// Stocked, but no thresholds are known for the product.
    HasProducts,
    /// Above every threshold.
    Optimal,
    /// Nothing stocked.
    Empty,
}

impl StockStatus {
    /// Every status, most urgent first.
    pub const ALL: [Self; 6] = [
        Self::Low,
        Self::NearMin,
        Self::BelowReorder,
        Self::HasProducts,
        Self::Optimal,
        Self::Empty,
    ];

    /// Stable label, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::NearMin => "near-min",
            Self::BelowReorder => "below-reorder",
            Self::HasProducts => "has-products",
            Self::Optimal => "optimal",
            Self::Empty => "empty",
        }
    }

    /// True for the statuses that raise a reorder alert.
    pub const fn needs_reorder(self) -> bool {
        matches!(self, Self::Low | Self::NearMin | Self::BelowReorder)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// What a status was derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBasis {
    /// Full classification against the product's thresholds.
    Thresholds,
    /// The product has no thresholds; only `empty` / `has-products` can result.
    MissingThresholds,
}

/// Default width of the near-minimum band, as a multiple of the minimum stock.
pub const DEFAULT_NEAR_MIN_FACTOR: f64 = 1.2;

/// Tunables for [`ClassifierPolicy::classify`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierPolicy {
    /// Upper edge of the near-minimum band as a multiple of `minimum_stock`.
    pub near_min_factor: f64,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            near_min_factor: DEFAULT_NEAR_MIN_FACTOR,
        }
    }
}

impl ClassifierPolicy {
    /// Classify `count` against optional thresholds. First matching rule wins:
    ///
    /// | # | condition | status |
    /// |---|---|---|
    /// | 1 | `count == 0` | `empty` |
    /// | 2 | `count <= minimum_stock` | `low` |
    /// | 3 | `count <= minimum_stock * near_min_factor` | `near-min` |
    /// | 4 | `count <= reorder_point` | `below-reorder` |
    /// | 5 | no thresholds | `has-products` |
    /// | 6 | otherwise | `optimal` |
    ///
    /// Rules 2 to 4 only apply when thresholds are present.
    pub fn classify(&self, count: u64, thresholds: Option<&ProductThresholds>) -> StockStatus {
        if count == 0 {
            return StockStatus::Empty;
        }
        let Some(t) = thresholds else {
            return StockStatus::HasProducts;
        };
        if count <= t.minimum_stock {
            StockStatus::Low
        } else if within_factor(count, t.minimum_stock, self.near_min_factor) {
            StockStatus::NearMin
        } else if count <= t.reorder_point {
            StockStatus::BelowReorder
        } else {
            StockStatus::Optimal
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Stock counts far below 2^52 in practice."
)]
fn within_factor(count: u64, minimum: u64, factor: f64) -> bool {
    count as f64 <= minimum as f64 * factor
}

/// Classify with the default policy (near-minimum band at 1.2 × minimum stock).
pub fn classify(count: u64, thresholds: Option<&ProductThresholds>) -> StockStatus {
    ClassifierPolicy::default().classify(count, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: ProductThresholds = ProductThresholds::new(3, 1);

    #[test]
    fn precedence_table() {
        let t = ProductThresholds::new(10, 20);
        assert_eq!(classify(0, Some(&t)), StockStatus::Empty);
        assert_eq!(classify(10, Some(&t)), StockStatus::Low);
        assert_eq!(classify(11, Some(&t)), StockStatus::NearMin);
        assert_eq!(classify(13, Some(&t)), StockStatus::BelowReorder);
        assert_eq!(classify(20, Some(&t)), StockStatus::BelowReorder);
        assert_eq!(classify(21, Some(&t)), StockStatus::Optimal);
    }

    #[test]
    fn low_wins_over_below_reorder() {
        assert_eq!(classify(1, Some(&T)), StockStatus::Low);
    }

    #[test]
    fn leaf_counts_two_five_zero() {
        let statuses: Vec<_> = [2, 5, 0].iter().map(|&c| classify(c, Some(&T))).collect();
        assert_eq!(
            statuses,
            [StockStatus::Low, StockStatus::Optimal, StockStatus::Empty]
        );
    }

    #[test]
    fn missing_thresholds_is_two_state() {
        assert_eq!(classify(0, None), StockStatus::Empty);
        for count in [1, 2, 50, u64::MAX] {
            assert_eq!(classify(count, None), StockStatus::HasProducts);
        }
    }

    #[test]
    fn zero_minimum_never_low() {
        let t = ProductThresholds::new(0, 5);
        assert_eq!(classify(1, Some(&t)), StockStatus::BelowReorder);
        assert_eq!(classify(6, Some(&t)), StockStatus::Optimal);
    }

    #[test]
    fn custom_near_min_band() {
        let policy = ClassifierPolicy {
            near_min_factor: 2.0,
        };
        let t = ProductThresholds::new(10, 0);
        assert_eq!(policy.classify(20, Some(&t)), StockStatus::NearMin);
        assert_eq!(policy.classify(21, Some(&t)), StockStatus::Optimal);
    }

    #[test]
    fn labels_match_serde() {
        for status in StockStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn only_threshold_breaches_need_reorder() {
        let alerting: Vec<_> = StockStatus::ALL
            .into_iter()
            .filter(|s| s.needs_reorder())
            .collect();
        assert_eq!(
            alerting,
            [
                StockStatus::Low,
                StockStatus::NearMin,
                StockStatus::BelowReorder
            ]
        );
    }
}
