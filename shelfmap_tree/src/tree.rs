// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, bounded traversal, spatial lookup.

use std::collections::HashMap;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::error::{CorruptReason, Result, TreeError};
use crate::types::{Storage, StorageId, StorageRecord};

/// Default bound on the number of levels along any root-to-leaf path.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied by [`StorageTree::walk`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraversalOptions {
    /// Maximum number of levels along any path, counting the starting storage as level 1.
    pub max_depth: usize,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    storage: Storage,
    parent: Option<StorageId>,
    children: Vec<StorageId>,
}

impl Node {
    fn new(storage: Storage) -> Self {
        Self {
            storage,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena holding every storage of a snapshot.
///
/// Build it with [`StorageTree::insert`] or [`StorageTree::from_records`]; after that it is
/// only read. All derived views (capacity, statuses, alerts) start from [`StorageTree::walk`].
#[derive(Clone, Default)]
pub struct StorageTree {
    nodes: Vec<Node>,
    keys: HashMap<String, StorageId>,
}

impl core::fmt::Debug for StorageTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.children.is_empty()).count();
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        f.debug_struct("StorageTree")
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .field("roots", &roots)
            .finish_non_exhaustive()
    }
}

/// One storage reached by [`StorageTree::walk`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Visit {
    /// The storage.
    pub id: StorageId,
    /// Level below the walk root; the root is level 1.
    pub depth: usize,
    /// Index of the parent's visit in [`Walk::visits`], `None` for the root.
    pub parent: Option<usize>,
}

/// Result of a successful bounded traversal: every storage under the root exactly once,
/// in pre-order (parents before children, siblings in layout order).
#[derive(Clone, Debug)]
pub struct Walk {
    visits: Vec<Visit>,
}

impl Walk {
    /// All visits in pre-order. The first entry is the root.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// The storage the walk started from.
    pub fn root(&self) -> StorageId {
        self.visits[0].id
    }

    /// Path from the walk root to the storage at `visit` (inclusive).
    pub fn path(&self, visit: usize) -> Vec<StorageId> {
        let mut out = Vec::with_capacity(self.visits[visit].depth);
        let mut cur = Some(visit);
        while let Some(i) = cur {
            out.push(self.visits[i].id);
            cur = self.visits[i].parent;
        }
        out.reverse();
        out
    }
}

impl StorageTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from flat catalog records.
    ///
    /// Fails on duplicate keys, unknown child keys, and records that carry both items and
    /// children. Cycles and shared children are accepted here and reported by [`walk`](Self::walk).
    pub fn from_records(records: impl IntoIterator<Item = StorageRecord>) -> Result<Self> {
        let mut tree = Self::new();
        let mut pending = Vec::new();
        for record in records {
            let (storage, children) = record.split();
            if !children.is_empty() && !storage.items.is_empty() {
                return Err(TreeError::MixedNode(storage.key));
            }
            let id = tree.push(storage)?;
            pending.push((id, children));
        }
        for (parent, children) in pending {
            for child_key in children {
                let Some(child) = tree.lookup(&child_key) else {
                    return Err(TreeError::UnknownKey {
                        parent: tree.nodes[parent.idx()].storage.key.clone(),
                        child: child_key,
                    });
                };
                tree.link_parent(child, parent);
            }
        }
        Ok(tree)
    }

    /// Insert a storage as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<StorageId>, storage: Storage) -> Result<StorageId> {
        if let Some(p) = parent {
            let parent_node = self.node(p)?;
            if !parent_node.storage.items.is_empty() {
                return Err(TreeError::MixedNode(parent_node.storage.key.clone()));
            }
        }
        let id = self.push(storage)?;
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        Ok(id)
    }

    /// Number of storages in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds no storages.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Storage payload for `id`.
    pub fn get(&self, id: StorageId) -> Option<&Storage> {
        self.nodes.get(id.idx()).map(|n| &n.storage)
    }

    /// Handle of the storage with catalog key `key`.
    pub fn lookup(&self, key: &str) -> Option<StorageId> {
        self.keys.get(key).copied()
    }

    /// Children of `id` in layout order. Empty for leaves and unknown handles.
    pub fn children(&self, id: StorageId) -> &[StorageId] {
        self.nodes
            .get(id.idx())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of `id`, if any.
    ///
    /// When a corrupt snapshot lists a storage under several parents, this is the first one.
    pub fn parent(&self, id: StorageId) -> Option<StorageId> {
        self.nodes.get(id.idx()).and_then(|n| n.parent)
    }

    /// True if `id` is a leaf (has no children).
    pub fn is_leaf(&self, id: StorageId) -> bool {
        self.children(id).is_empty()
    }

    /// Storages without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = StorageId> + '_ {
        self.iter()
            .filter(|(id, _)| self.nodes[id.idx()].parent.is_none())
            .map(|(id, _)| id)
    }

    /// All storages with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StorageId, &Storage)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "StorageId uses 32-bit indices."
            )]
            (StorageId::new(i as u32), &n.storage)
        })
    }

    /// Path from the topmost ancestor down to `id` (inclusive), following parent links.
    ///
    /// Fails with [`TreeError::CorruptTree`] if the parent links loop.
    pub fn path_to_root(&self, id: StorageId) -> Result<Vec<StorageId>> {
        self.node(id)?;
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            if out.len() == self.nodes.len() {
                return Err(self.corrupt(
                    id,
                    CorruptReason::Cycle {
                        storage: self.nodes[c.idx()].storage.key.clone(),
                    },
                ));
            }
            out.push(c);
            cur = self.nodes[c.idx()].parent;
        }
        out.reverse();
        Ok(out)
    }

    /// Visit every storage under `root` exactly once, in pre-order.
    ///
    /// The traversal is iterative, so it never grows the call stack. It fails with
    /// [`TreeError::CorruptTree`] if a storage is reached twice (a cycle or a child listed
    /// under several parents) or if a path is longer than `options.max_depth` levels.
    pub fn walk(&self, root: StorageId, options: TraversalOptions) -> Result<Walk> {
        self.node(root)?;
        let mut visits: Vec<Visit> = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![(root, 1_usize, None::<usize>)];
        while let Some((id, depth, parent)) = stack.pop() {
            if seen[id.idx()] {
                let storage = self.nodes[id.idx()].storage.key.clone();
                let reason = if Self::visit_chain(&visits, parent).any(|v| v.id == id) {
                    CorruptReason::Cycle { storage }
                } else {
                    CorruptReason::SharedChild { storage }
                };
                return Err(self.corrupt(root, reason));
            }
            if depth > options.max_depth {
                return Err(self.corrupt(
                    root,
                    CorruptReason::DepthExceeded {
                        limit: options.max_depth,
                    },
                ));
            }
            seen[id.idx()] = true;
            let at = visits.len();
            visits.push(Visit { id, depth, parent });
            for &child in self.nodes[id.idx()].children.iter().rev() {
                stack.push((child, depth + 1, Some(at)));
            }
        }
        tracing::trace!(
            root = %self.nodes[root.idx()].storage.key,
            storages = visits.len(),
            "walked storage subtree"
        );
        Ok(Walk { visits })
    }

    /// Deepest storage under `root` whose bounding box contains `pt`, with its path.
    ///
    /// Bounding boxes are in facility space, so a storage matches on its own box regardless
    /// of its ancestors. If several storages at the same depth match, the one later in
    /// layout order wins.
    pub fn storage_at(
        &self,
        root: StorageId,
        pt: Point,
        options: TraversalOptions,
    ) -> Result<Option<Vec<StorageId>>> {
        let walk = self.walk(root, options)?;
        let mut best: Option<(usize, usize)> = None;
        for (i, visit) in walk.visits().iter().enumerate() {
            if !self.nodes[visit.id.idx()].storage.bounding_box.contains(pt) {
                continue;
            }
            match best {
                Some((_, depth)) if visit.depth < depth => {}
                _ => best = Some((i, visit.depth)),
            }
        }
        Ok(best.map(|(i, _)| walk.path(i)))
    }

    // --- internals ---

    fn node(&self, id: StorageId) -> Result<&Node> {
        self.nodes.get(id.idx()).ok_or(TreeError::StaleId(id))
    }

    fn push(&mut self, storage: Storage) -> Result<StorageId> {
        if self.keys.contains_key(&storage.key) {
            return Err(TreeError::DuplicateKey(storage.key));
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "StorageId uses 32-bit indices."
        )]
        let id = StorageId::new(self.nodes.len() as u32);
        self.keys.insert(storage.key.clone(), id);
        self.nodes.push(Node::new(storage));
        Ok(id)
    }

    fn link_parent(&mut self, id: StorageId, parent: StorageId) {
        self.nodes[parent.idx()].children.push(id);
        let child = &mut self.nodes[id.idx()];
        if child.parent.is_none() {
            child.parent = Some(parent);
        }
    }

    fn visit_chain(visits: &[Visit], from: Option<usize>) -> impl Iterator<Item = &Visit> + '_ {
        let mut cur = from;
        core::iter::from_fn(move || {
            let v = &visits[cur?];
            cur = v.parent;
            Some(v)
        })
    }

    fn corrupt(&self, root: StorageId, reason: CorruptReason) -> TreeError {
        let root = self.nodes[root.idx()].storage.key.clone();
        tracing::warn!(%root, %reason, "corrupt storage tree");
        TreeError::CorruptTree { root, reason }
    }
}
