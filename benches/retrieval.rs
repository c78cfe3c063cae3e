// Retrieval benchmarks over a synthetic furniture catalog
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use decoplan_core::{AttributeFilter, CatalogItem, Embedder, HashingEmbedder, Retriever};
use decoplan_storage::FurnitureStore;
use serde_json::json;
use std::sync::Arc;

const TYPES: [&str; 6] = ["Sofa", "Table", "Chair", "Bed", "Lamp", "Shelf"];
const STYLES: [&str; 5] = ["Modern", "Rustic", "Classic", "Minimalist", "Industrial"];
const ROOMS: [&str; 4] = ["Living Room", "Bedroom", "Dining Room", "Office"];

fn generate_catalog(size: usize) -> Vec<CatalogItem> {
    (0..size)
        .map(|i| {
            let furniture_type = TYPES[i % TYPES.len()];
            let style = STYLES[i % STYLES.len()];
            CatalogItem::new(
                format!("item-{}", i),
                format!("{} {} #{}", style, furniture_type, i),
                furniture_type,
                style,
            )
            .with_room_type(ROOMS[i % ROOMS.len()])
            .with_description(format!("A {} {} for everyday use", style.to_lowercase(), furniture_type.to_lowercase()))
            .with_attribute("Price_Tier", json!(i % 3))
        })
        .collect()
}

fn benchmark_embed(c: &mut Criterion) {
    let embedder = HashingEmbedder::default();
    c.bench_function("embed_query", |b| {
        b.iter(|| embedder.embed(black_box("modern velvet sofa for a bright living room")));
    });
}

fn benchmark_retrieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieve");

    for size in [100, 1000, 10000].iter() {
        let store = FurnitureStore::from_items(
            generate_catalog(*size),
            Arc::new(HashingEmbedder::default()),
        );
        let unfiltered = AttributeFilter::default();
        let filtered = AttributeFilter::default()
            .with("Style", json!("Modern"))
            .with("Room_Type", json!("Living Room"));

        group.bench_with_input(BenchmarkId::new("unfiltered", size), size, |b, _| {
            b.iter(|| store.retrieve(black_box("modern sofa"), 15, &unfiltered).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("filtered", size), size, |b, _| {
            b.iter(|| store.retrieve(black_box("modern sofa"), 15, &filtered).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_embed, benchmark_retrieve);
criterion_main!(benches);
