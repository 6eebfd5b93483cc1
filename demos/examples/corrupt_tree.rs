// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corrupt trees.
//!
//! Build storage records whose child references loop back to the root and show that
//! every computation fails with a corrupt-tree error instead of running away.
//!
//! Run:
//! - `RUST_LOG=warn cargo run -p shelfmap_demos --example corrupt_tree`

use shelfmap_geometry::BoundingBox;
use shelfmap_stock::{InventoryConfig, PurchaseHistory, ThresholdMap, generate_alerts};
use shelfmap_tree::{Orientation, StorageRecord, StorageTree, occupied_count};

fn main() -> Result<(), shelfmap_demos::DemoError> {
    shelfmap_demos::logging::init();
    let records = ["rack", "shelf", "bin"].iter().enumerate().map(|(i, key)| {
        let next = ["shelf", "bin", "rack"][i];
        StorageRecord {
            id: (*key).to_owned(),
            name: key.to_uppercase(),
            orientation: Orientation::default(),
            bounding_box: BoundingBox::ZERO,
            capacity_limit: None,
            items: Vec::new(),
            children: vec![next.to_owned()],
        }
    });
    let tree = StorageTree::from_records(records)?;
    let Some(rack) = tree.lookup("rack") else {
        return Err("rack missing from tree".into());
    };

    match occupied_count(&tree, rack) {
        Ok(n) => println!("unexpected count {n}"),
        Err(e) => println!("occupied_count: {e}"),
    }

    // A generous depth bound reaches the back edge and reports the cycle itself.
    let config = InventoryConfig::from_json_str(r#"{"traversal": {"maxDepth": 1000}}"#)?;
    match generate_alerts(
        &tree,
        rack,
        &ThresholdMap::new(),
        &PurchaseHistory::new(),
        &config,
    ) {
        Ok(alerts) => println!("unexpected {} alerts", alerts.len()),
        Err(e) => println!("generate_alerts: {e} (corrupt: {})", e.is_corrupt_tree()),
    }
    Ok(())
}
