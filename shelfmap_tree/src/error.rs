// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for building and traversing storage trees.

use thiserror::Error;

use crate::StorageId;

/// Result type alias for storage tree operations.
pub type Result<T, E = TreeError> = core::result::Result<T, E>;

/// Errors raised while building or traversing a [`StorageTree`](crate::StorageTree).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The subtree under `root` is not a finite tree.
    ///
    /// No partial result computed over this subtree can be trusted.
    #[error("corrupt storage tree under `{root}`: {reason}")]
    CorruptTree {
        /// Key of the storage the traversal started from.
        root: String,
        /// What the traversal ran into.
        reason: CorruptReason,
    },

    /// Two storages share the same catalog key.
    #[error("duplicate storage id `{0}`")]
    DuplicateKey(String),

    /// A record refers to a storage key that is not part of the snapshot.
    #[error("`{parent}` references unknown storage `{child}`")]
    UnknownKey {
        /// Key of the referring storage, area, or facility.
        parent: String,
        /// The unresolved key.
        child: String,
    },

    /// A storage would hold items and children at the same time.
    #[error("storage `{0}` cannot hold both items and child storages")]
    MixedNode(String),

    /// A handle that was not issued by this tree.
    #[error("storage handle {0:?} does not belong to this tree")]
    StaleId(StorageId),
}

/// Why a traversal declared a subtree corrupt.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CorruptReason {
    /// A storage is its own ancestor.
    #[error("cycle through `{storage}`")]
    Cycle {
        /// Key of the storage reached twice.
        storage: String,
    },
    /// A storage is reachable through two different parents.
    #[error("`{storage}` is the child of more than one storage")]
    SharedChild {
        /// Key of the storage reached twice.
        storage: String,
    },
    /// A root-to-leaf path is longer than the configured bound.
    #[error("depth exceeds {limit} levels")]
    DepthExceeded {
        /// The configured bound.
        limit: usize,
    },
}

impl TreeError {
    /// True for [`TreeError::CorruptTree`].
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptTree { .. })
    }
}
