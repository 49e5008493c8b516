use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use singly_list::List;

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("singly_list");

    let mut rng = ChaCha20Rng::from_seed([
        0x8B, 0x27, 0xE4, 0x5D, 0x10, 0xCA, 0x93, 0x6F, 0x3A, 0xD8, 0x01, 0xB6,
        0x7F, 0x44, 0xEC, 0x29, 0x5E, 0x92, 0x0D, 0xA3, 0xC7, 0x38, 0x61, 0xFB,
        0x16, 0x8C, 0x4A, 0xD2, 0x75, 0xB0, 0x2E, 0x99,
    ]);

    for len in [1_000_usize, 10_000, 100_000] {
        let list: List = (0..len).map(|_| rng.gen_range(0..1000)).collect();
        let queries: Vec<usize> =
            (0..64).map(|_| rng.gen_range(0..len)).collect();

        group.bench_with_input(BenchmarkId::new("get", len), &len, |b, _| {
            b.iter(|| {
                for &i in &queries {
                    black_box(list.get(i));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("find", len), &len, |b, _| {
            b.iter(|| black_box(list.find(1000)))
        });
        group.bench_with_input(
            BenchmarkId::new("insert_remove_mid", len),
            &len,
            |b, &len| {
                let mut list: List = (0..len as u32).collect();
                b.iter(|| {
                    list.insert_at(len / 2, 0).unwrap();
                    black_box(list.remove_at(len / 2).unwrap());
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
