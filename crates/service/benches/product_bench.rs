use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::product::{InMemoryProductStore, ProductInput, ProductService, ProductServiceConfig};
use service::validation::Validator;

fn bench_create_and_get(c: &mut Criterion) {
    let svc = ProductService::new(Arc::new(InMemoryProductStore::new()), Validator::standard(), ProductServiceConfig::default());
    let rt = tokio::runtime::Runtime::new().unwrap();

    // pre-populate so lookups hit a realistically sized map
    let mut ids = Vec::new();
    for i in 0..1_000 {
        let p = rt.block_on(svc.create_product(ProductInput::new(format!("Seed {i}"), None, i as f64, true))).unwrap();
        ids.push(p.id);
    }

    c.bench_function("product_create", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.create_product(ProductInput::new("Bench item", Some("bench"), 9.99, true))).unwrap();
        });
    });

    c.bench_function("product_get", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let id = ids[i % ids.len()];
            i += 1;
            let _ = rt.block_on(svc.get_product(id)).unwrap();
        });
    });

    c.bench_function("product_validate_reject", |b| {
        let bad = ProductInput { name: Some("ab".into()), price: Some(-1.0), ..Default::default() };
        b.iter(|| {
            let _ = rt.block_on(svc.create_product(bad.clone())).unwrap_err();
        });
    });
}

criterion_group!(benches, bench_create_and_get);
criterion_main!(benches);
