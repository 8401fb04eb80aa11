use chacha20_lanes::{CipherState, Key, Nonce, transform};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

// Block counts chosen to exercise every lane tier: pure 4-lane runs, plus
// remainders that fall through to the 2- and 1-lane tiers.
const BLOCK_COUNTS: [usize; 5] = [1, 7, 64, 256, 1024];

fn bench_in_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("chacha20-lanes/in-place");

    for nr_blocks in BLOCK_COUNTS {
        let size = nr_blocks * 64;
        let mut buffer = vec![0u8; size];
        let mut state = CipherState::new(&Key::default(), &Nonce::default(), 0);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &nr_blocks, |b, &n| {
            b.iter(|| state.apply_keystream(&mut buffer, n).unwrap());
        });
    }
    group.finish();
}

fn bench_buffer_to_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("chacha20-lanes/b2b");

    for nr_blocks in BLOCK_COUNTS {
        let size = nr_blocks * 64;
        let input = vec![0x5au8; size];
        let mut output = vec![0u8; size];
        let mut state = CipherState::new(&Key::default(), &Nonce::default(), 0).into_words();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &nr_blocks, |b, &n| {
            b.iter(|| transform(&mut state, &input, &mut output, n).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_in_place, bench_buffer_to_buffer);
criterion_main!(benches);
