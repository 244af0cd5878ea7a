use criterion::{criterion_group, criterion_main};

mod validation_benchmark {
    use criterion::Criterion;
    use iban_kit::{Catalog, CatalogBuilder};
    use std::sync::Arc;

    fn catalog() -> Arc<Catalog> {
        CatalogBuilder::new().build()
    }

    pub fn criterion_benchmark(c: &mut Criterion) {
        let catalog = catalog();

        c.bench_function("parse_and_validate", |b| {
            b.iter(|| {
                let iban = catalog
                    .iban_from_str("HU05 1176 4379 4089 2883 0000 0000", false, true)
                    .unwrap();
                assert!(iban.is_valid());
            })
        });

        c.bench_function("checksum_recompute", |b| {
            let iban = catalog
                .iban_from_str("GB82 WEST 1234 5698 7654 32", false, false)
                .unwrap();
            b.iter(|| assert!(iban.is_valid_iban_checksum()))
        });

        c.bench_function("from_parts", |b| {
            b.iter(|| {
                catalog
                    .iban_from_parts("HU", "117", "6437", "94089288300000000", false)
                    .unwrap()
            })
        });
    }
}

criterion_group!(benches, validation_benchmark::criterion_benchmark);
criterion_main!(benches);
