// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder alerts.
//!
//! Generate alerts for the whole sample warehouse, joined with purchase history, and print
//! them as JSON. Pass a JSON config as the first argument to override the defaults, e.g.
//! `'{"classifier": {"nearMinFactor": 1.5}}'`.
//!
//! Run:
//! - `cargo run -p shelfmap_demos --example reorder_alerts`

use shelfmap_stock::{InventoryConfig, generate_warehouse_alerts};

fn main() -> Result<(), shelfmap_demos::DemoError> {
    shelfmap_demos::logging::init();
    let config = match std::env::args().nth(1) {
        Some(json) => InventoryConfig::from_json_str(&json)?,
        None => InventoryConfig::default(),
    };
    let (warehouse, thresholds, purchases) = shelfmap_demos::sample()?;

    let alerts = generate_warehouse_alerts(&warehouse, &thresholds, &purchases, &config)?;
    tracing::info!(alerts = alerts.len(), "generated reorder alerts");
    for alert in &alerts {
        let supplier = alert
            .last_purchase
            .as_ref()
            .map_or("no completed purchase", |p| p.supplier_name.as_str());
        println!(
            "{:<10} {:<6} {:<14} count {:>2}, order {:>2} ({supplier})",
            alert.product_id, alert.storage_key, alert.status, alert.count, alert.suggested_quantity
        );
    }
    println!("{}", serde_json::to_string_pretty(&alerts)?);
    Ok(())
}
