// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the inventory core.

use shelfmap_tree::TreeError;
use thiserror::Error;

/// Result type alias for inventory operations.
pub type Result<T, E = StockError> = core::result::Result<T, E>;

/// Errors raised by classification, alerting, summaries, and configuration.
///
/// Missing thresholds and degenerate geometry are not errors; they are reported in the
/// returned values.
#[derive(Debug, Error)]
pub enum StockError {
    /// The storage tree could not be traversed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Configuration JSON could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StockError {
    /// True when the underlying storage tree is corrupt.
    pub fn is_corrupt_tree(&self) -> bool {
        matches!(self, Self::Tree(e) if e.is_corrupt())
    }
}
