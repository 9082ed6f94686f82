use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ballast_pricing::{mint_quote, price, redeem_quote, TaxSchedule};
use ballast_types::amount::units;
use ballast_types::Amount;

fn bench_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("price");

    for supply_units in [1u64, 1_000, 1_000_000, 1_000_000_000] {
        let supply = units(supply_units);
        let backing = supply + supply / 3;

        group.bench_with_input(
            BenchmarkId::new("price", supply_units),
            &supply_units,
            |b, _| {
                b.iter(|| black_box(price(black_box(backing), black_box(supply))));
            },
        );
    }

    group.finish();
}

fn bench_quotes(c: &mut Criterion) {
    let backing = units(1_250_000);
    let supply = units(1_000_000);

    c.bench_function("mint_quote", |b| {
        b.iter(|| black_box(mint_quote(black_box(backing), black_box(supply), black_box(units(42)))));
    });

    c.bench_function("redeem_quote", |b| {
        b.iter(|| {
            black_box(redeem_quote(black_box(backing), black_box(supply), black_box(units(42))))
        });
    });
}

fn bench_tax_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("tax_split");

    for rate_bps in [0u32, 100, 2_500, 10_000] {
        let schedule = TaxSchedule::new(rate_bps, 10_000).unwrap();

        group.bench_with_input(BenchmarkId::new("split", rate_bps), &rate_bps, |b, _| {
            b.iter(|| black_box(schedule.split(black_box(units(100) + Amount::from(rate_bps)))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_price, bench_quotes, bench_tax_split);
criterion_main!(benches);
