// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial grouping above the storage tree: areas, facilities, and the warehouse.

use serde::{Deserialize, Serialize};
use shelfmap_geometry::{BoundingBox, combined_bounding_box};

use crate::error::{Result, TreeError};
use crate::tree::StorageTree;
use crate::types::{StorageId, StorageRecord};

/// Overall floor size of a warehouse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

/// A spatial grouping of top-level storages.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    /// Catalog key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Outline of the area in facility space.
    pub bounding_box: BoundingBox,
    /// Top-level storages placed in the area.
    pub storages: Vec<StorageId>,
}

impl Area {
    /// Box to frame when showing the area: its own outline merged with every top-level
    /// storage, so storages drawn past the outline stay visible.
    pub fn content_box(&self, tree: &StorageTree) -> BoundingBox {
        let mut boxes = Vec::with_capacity(self.storages.len() + 1);
        if !self.bounding_box.is_degenerate() {
            boxes.push(self.bounding_box);
        }
        boxes.extend(
            self.storages
                .iter()
                .filter_map(|&id| tree.get(id))
                .map(|s| s.bounding_box),
        );
        combined_bounding_box(&boxes)
    }
}

/// A building or site made of areas.
#[derive(Clone, Debug, PartialEq)]
pub struct Facility {
    /// Catalog key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Areas in the facility.
    pub areas: Vec<Area>,
}

impl Facility {
    /// Merged content box of every area.
    pub fn content_box(&self, tree: &StorageTree) -> BoundingBox {
        let boxes: Vec<_> = self.areas.iter().map(|a| a.content_box(tree)).collect();
        combined_bounding_box(&boxes)
    }
}

/// A warehouse snapshot: facilities plus the storage tree they refer to.
#[derive(Clone, Debug)]
pub struct Warehouse {
    /// Floor size.
    pub dimensions: Dimensions,
    /// Facilities in the warehouse.
    pub facilities: Vec<Facility>,
    /// Every storage referenced by the facilities.
    pub tree: StorageTree,
}

impl Warehouse {
    /// Resolve a deserialized snapshot into a warehouse.
    ///
    /// Fails if storage records are inconsistent (see [`StorageTree::from_records`]) or an
    /// area refers to a storage key that is not in the snapshot.
    pub fn from_snapshot(snapshot: WarehouseSnapshot) -> Result<Self> {
        let tree = StorageTree::from_records(snapshot.storages)?;
        let facilities = snapshot
            .facilities
            .into_iter()
            .map(|f| {
                let areas = f
                    .areas
                    .into_iter()
                    .map(|a| {
                        let storages = a
                            .storages
                            .into_iter()
                            .map(|key| {
                                tree.lookup(&key).ok_or_else(|| TreeError::UnknownKey {
                                    parent: a.id.clone(),
                                    child: key,
                                })
                            })
                            .collect::<Result<Vec<_>>>()?;
                        Ok(Area {
                            key: a.id,
                            name: a.name,
                            bounding_box: a.bounding_box,
                            storages,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Facility {
                    key: f.id,
                    name: f.name,
                    areas,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            facilities = facilities.len(),
            storages = tree.len(),
            "loaded warehouse snapshot"
        );
        Ok(Self {
            dimensions: snapshot.dimensions,
            facilities,
            tree,
        })
    }

    /// Every area across all facilities.
    pub fn areas(&self) -> impl Iterator<Item = &Area> + '_ {
        self.facilities.iter().flat_map(|f| f.areas.iter())
    }

    /// Box to frame when showing the whole warehouse.
    ///
    /// Falls back to the floor dimensions when no facility has any geometry.
    pub fn content_box(&self) -> BoundingBox {
        let boxes: Vec<_> = self
            .facilities
            .iter()
            .map(|f| f.content_box(&self.tree))
            .filter(|b| !b.is_degenerate())
            .collect();
        if boxes.is_empty() {
            return BoundingBox::new(0.0, 0.0, self.dimensions.width, self.dimensions.height);
        }
        combined_bounding_box(&boxes)
    }
}

/// Serialized form of a warehouse as delivered by the catalog service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseSnapshot {
    /// Floor size.
    #[serde(default)]
    pub dimensions: Dimensions,
    /// Every storage, flat, children referenced by key.
    #[serde(default)]
    pub storages: Vec<StorageRecord>,
    /// Facilities with areas referring to top-level storages by key.
    #[serde(default)]
    pub facilities: Vec<FacilityRecord>,
}

/// Serialized facility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    /// Catalog key.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Areas in the facility.
    #[serde(default)]
    pub areas: Vec<AreaRecord>,
}

/// Serialized area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    /// Catalog key.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Outline in facility space.
    #[serde(default)]
    pub bounding_box: BoundingBox,
    /// Keys of the top-level storages in the area.
    #[serde(default)]
    pub storages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "dimensions": {"width": 500, "height": 300},
        "storages": [
            {"id": "rack-1", "boundingBox": {"x": 10, "y": 10, "width": 40, "height": 20},
             "children": ["bin-1"]},
            {"id": "bin-1", "boundingBox": {"x": 10, "y": 10, "width": 40, "height": 10}},
            {"id": "rack-2", "boundingBox": {"x": 200, "y": 100, "width": 40, "height": 60}}
        ],
        "facilities": [
            {"id": "north", "name": "North", "areas": [
                {"id": "zone-a", "boundingBox": {"x": 0, "y": 0, "width": 100, "height": 50},
                 "storages": ["rack-1"]},
                {"id": "zone-b", "storages": ["rack-2"]}
            ]}
        ]
    }"#;

    #[test]
    fn snapshot_resolves_areas() {
        let snapshot: WarehouseSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let warehouse = Warehouse::from_snapshot(snapshot).unwrap();
        let areas: Vec<_> = warehouse.areas().collect();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].storages, vec![warehouse.tree.lookup("rack-1").unwrap()]);
        assert_eq!(
            areas[1].content_box(&warehouse.tree),
            BoundingBox::new(200.0, 100.0, 40.0, 60.0),
            "zero outline is ignored"
        );
        assert_eq!(
            warehouse.content_box(),
            BoundingBox::new(0.0, 0.0, 240.0, 160.0)
        );
    }

    #[test]
    fn snapshot_rejects_unknown_area_storage() {
        let mut snapshot: WarehouseSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        snapshot.facilities[0].areas[1].storages.push("ghost".into());
        let err = Warehouse::from_snapshot(snapshot).unwrap_err();
        assert_eq!(
            err,
            TreeError::UnknownKey {
                parent: "zone-b".into(),
                child: "ghost".into()
            }
        );
    }

    #[test]
    fn empty_warehouse_frames_floor() {
        let warehouse = Warehouse::from_snapshot(WarehouseSnapshot {
            dimensions: Dimensions {
                width: 80.0,
                height: 20.0,
            },
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            warehouse.content_box(),
            BoundingBox::new(0.0, 0.0, 80.0, 20.0)
        );
    }
}
