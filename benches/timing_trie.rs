use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use zfast::transform::Identity;
use zfast::{BitVector, ZFastTrie};

const NUM_KEYS: usize = 10_000;
const KEY_BITS: usize = 64;

fn gen_keys(seed: u64) -> Vec<BitVector> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..NUM_KEYS)
        .map(|_| BitVector::from_bits((0..KEY_BITS).map(|_| rng.gen::<bool>())))
        .collect()
}

fn bench_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("zfast_trie");
    let keys = gen_keys(42);
    let probes = gen_keys(43);

    group.bench_function("add", |b| {
        b.iter(|| {
            let mut trie = ZFastTrie::new(Identity);
            for key in &keys {
                black_box(trie.add(key));
            }
        })
    });

    let mut trie = ZFastTrie::new(Identity);
    for key in &keys {
        trie.add(key);
    }

    group.bench_function("contains", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(trie.contains(key));
            }
        })
    });

    group.bench_function("pred", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(trie.pred(probe));
            }
        })
    });
}

criterion_group!(benches, bench_trie);
criterion_main!(benches);
