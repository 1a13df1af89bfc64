//! Generation throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lootforge::{BaseItemCatalog, LootGenerator, ModifierCatalog};
use rand::{rngs::StdRng, SeedableRng};

fn bench_generate(c: &mut Criterion) {
    let modifiers = ModifierCatalog::builtin().expect("built-in modifier table");
    let base_items = BaseItemCatalog::parse(include_str!("../data/base_items.txt"));
    let generator = LootGenerator::new(modifiers, base_items);
    let mut rng = StdRng::seed_from_u64(42);

    let mut group = c.benchmark_group("generate");
    for level in [1, 10, 20] {
        group.bench_function(format!("level_{}", level), |b| {
            b.iter(|| generator.generate(black_box("Warrior"), black_box(level), &mut rng))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
