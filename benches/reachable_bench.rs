use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hexfront::battle::{reachable, ScriptedDice};
use hexfront::scenario::Scenario;

fn bench_reachable(c: &mut Criterion) {
    let scenario = Scenario::load_named("volga_anvil").expect("bundled scenario");
    let engine = scenario
        .build_engine(Box::new(ScriptedDice::always(3)))
        .expect("engine");
    let units: Vec<_> = engine.roster().living().cloned().collect();

    c.bench_function("reachable_all_units", |b| {
        b.iter(|| {
            for unit in &units {
                black_box(reachable(engine.battlefield(), engine.roster(), unit));
            }
        })
    });

    c.bench_function("reachable_cached", |b| {
        let id = units[0].id;
        b.iter(|| black_box(engine.reachable(id)))
    });
}

criterion_group!(benches, bench_reachable);
criterion_main!(benches);
