// Copyright 2025 the Shelfmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use shelfmap_geometry::{BoundingBox, FitOptions, combined_bounding_box, fit};
use shelfmap_stock::{
    InventoryConfig, ProductThresholds, PurchaseHistory, ThresholdMap, generate_alerts, summarize,
};
use shelfmap_tree::{Storage, StorageId, StorageTree, StoredItem, TraversalOptions, aggregate};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

const PRODUCTS: usize = 32;

/// `racks` racks, each with `shelves` shelves of `bins` bins holding up to 8 random slots.
fn gen_warehouse(racks: usize, shelves: usize, bins: usize) -> (StorageTree, StorageId) {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut tree = StorageTree::new();
    let root = tree
        .insert(None, Storage::new("warehouse", "Warehouse"))
        .unwrap();
    for r in 0..racks {
        let rack = tree
            .insert(Some(root), Storage::new(format!("r{r}"), format!("Rack {r}")))
            .unwrap();
        for s in 0..shelves {
            let shelf = tree
                .insert(
                    Some(rack),
                    Storage::new(format!("r{r}-s{s}"), format!("Shelf {s}")),
                )
                .unwrap();
            for b in 0..bins {
                let items: Vec<_> = (0..rng.below(9))
                    .map(|_| {
                        StoredItem::new(format!("p{}", rng.below(PRODUCTS as u64)), 1)
                    })
                    .collect();
                let bounds = BoundingBox::new(
                    (r * 100) as f64,
                    (s * 40 + b * 10) as f64,
                    90.0,
                    10.0,
                );
                tree.insert(
                    Some(shelf),
                    Storage::new(format!("r{r}-s{s}-b{b}"), format!("Bin {b}"))
                        .with_bounds(bounds)
                        .with_capacity(8)
                        .with_items(items),
                )
                .unwrap();
            }
        }
    }
    (tree, root)
}

fn gen_thresholds() -> ThresholdMap {
    (0..PRODUCTS)
        .map(|p| (format!("p{p}"), ProductThresholds::new(3, 5)))
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &racks in &[8usize, 32, 128] {
        let (tree, root) = gen_warehouse(racks, 4, 8);
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_function(format!("racks{racks}"), |b| {
            b.iter(|| {
                let report = aggregate(&tree, root, TraversalOptions::default()).unwrap();
                black_box(report.total());
            });
        });
    }
    group.finish();
}

fn bench_alerts(c: &mut Criterion) {
    let mut group = c.benchmark_group("alerts");
    let thresholds = gen_thresholds();
    let history = PurchaseHistory::new();
    let config = InventoryConfig::default();
    for &racks in &[8usize, 32, 128] {
        let (tree, root) = gen_warehouse(racks, 4, 8);
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_function(format!("generate_racks{racks}"), |b| {
            b.iter(|| {
                let alerts = generate_alerts(&tree, root, &thresholds, &history, &config).unwrap();
                black_box(alerts.len());
            });
        });
        group.bench_function(format!("summarize_racks{racks}"), |b| {
            b.iter(|| {
                let summary = summarize(&tree, root, &thresholds, &config).unwrap();
                black_box(summary.leaves.len());
            });
        });
    }
    group.finish();
}

fn bench_build_and_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.bench_function("build_racks32", |b| {
        b.iter_batched(
            || (),
            |()| black_box(gen_warehouse(32, 4, 8).0.len()),
            BatchSize::SmallInput,
        );
    });
    let (tree, _) = gen_warehouse(128, 4, 8);
    let boxes: Vec<_> = tree.iter().map(|(_, s)| s.bounding_box).collect();
    group.bench_function("merge_and_fit", |b| {
        b.iter(|| {
            let content = combined_bounding_box(&boxes);
            black_box(fit(content, 1920.0, 1080.0, FitOptions::default()));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_alerts, bench_build_and_fit);
criterion_main!(benches);
