use criterion::{criterion_group, criterion_main, Criterion, black_box};
use chess_harness::board::cozy::CozyOracle;
use chess_harness::{Fen, MoveResolver};

fn bench_resolve(c: &mut Criterion) {
    let start = Fen::startpos();
    let mut resolver = MoveResolver::new(CozyOracle::startpos());
    c.bench_function("resolve_e2e4_builtin", |ben| {
        ben.iter(|| {
            let r = resolver.apply(black_box(&start), black_box("e2e4")).expect("resolve");
            black_box(r)
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
