// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Warehouse overview.
//!
//! Load the sample snapshot, print per-area capacity and leaf statuses, fit the whole
//! warehouse into a 1280x720 viewport, and hit-test a screen point.
//!
//! Run:
//! - `cargo run -p shelfmap_demos --example warehouse_overview`

use kurbo::Point;
use shelfmap_geometry::fit;
use shelfmap_stock::{InventoryConfig, summarize};
use shelfmap_tree::aggregate_area;

fn main() -> Result<(), shelfmap_demos::DemoError> {
    shelfmap_demos::logging::init();
    let (warehouse, thresholds, _) = shelfmap_demos::sample()?;
    let config = InventoryConfig::default();
    let tree = &warehouse.tree;

    for area in warehouse.areas() {
        let cap = aggregate_area(tree, area, config.traversal)?;
        let utilization = cap
            .utilization()
            .map_or_else(|| "n/a".to_owned(), |u| format!("{:.0}%", u * 100.0));
        println!(
            "{} ({}): {}/{} slots, {utilization}",
            area.name, area.key, cap.occupied, cap.capacity
        );
        for &root in &area.storages {
            let summary = summarize(tree, root, &thresholds, &config)?;
            for leaf in &summary.leaves {
                println!("  {:<8} {}", leaf.storage_key, leaf.status);
            }
        }
    }

    let (vw, vh) = (1280.0, 720.0);
    let content = warehouse.content_box();
    let view = fit(content, vw, vh, config.viewport);
    println!(
        "content {:?} -> scale {:.3}, translate {:?}",
        content.to_rect(),
        view.scale,
        view.translate
    );

    // Map a screen point back into facility space and find the storage under it.
    let screen = Point::new(vw / 2.0, vh / 2.0);
    let world = view.to_affine(vw, vh).inverse() * screen;
    for area in warehouse.areas() {
        for &root in &area.storages {
            if let Some(path) = tree.storage_at(root, world, config.traversal)? {
                let keys: Vec<_> = path
                    .iter()
                    .filter_map(|&id| tree.get(id))
                    .map(|s| s.key.as_str())
                    .collect();
                println!("screen {screen:?} hits {}", keys.join(" > "));
            }
        }
    }
    Ok(())
}
