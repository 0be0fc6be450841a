use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;

use catalog_infra::{InMemoryProductStore, ProductStore};
use catalog_products::Product;

fn record(i: usize) -> Product {
    serde_json::from_value(json!({
        "name": format!("Product {i}"),
        "price": 9.99,
        "tags": ["bench"],
    }))
    .unwrap()
}

fn bench_save(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let store = InMemoryProductStore::new();

    c.bench_function("in_memory_save", |b| {
        b.iter_batched(
            || record(0),
            |p| rt.block_on(store.save(black_box(p))).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_list_all(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let mut group = c.benchmark_group("in_memory_list_all");

    for size in [10usize, 100, 1_000] {
        let store = InMemoryProductStore::new();
        rt.block_on(async {
            for i in 0..size {
                store.save(record(i)).await.unwrap();
            }
        });

        group.bench_function(format!("{size}"), |b| {
            b.iter(|| black_box(rt.block_on(store.list_all()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_save, bench_list_all);
criterion_main!(benches);
