use prime_shamir::Scheme;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{distributions::Standard, Rng};

const CONFIGURATIONS: &[(usize, usize)] = &[(2, 3), (4, 7), (8, 15), (16, 31)];

fn random_secret() -> Vec<u8> {
    let mut secret = rand::thread_rng()
        .sample_iter(Standard)
        .take(128)
        .collect::<Vec<u8>>();
    // keep the secret well below the 2048-bit default modulus
    secret[0] &= 0x7f;
    secret
}

fn benchmark_split_secret(c: &mut Criterion) {
    let mut group = c.benchmark_group("shamir Scheme::split_secret");
    for &(threshold, total_shares) in CONFIGURATIONS {
        let secret = random_secret();
        let scheme = Scheme::with_default_modulus(threshold, total_shares).unwrap();
        group.throughput(Throughput::Bytes(secret.len() as u64));
        group.bench_with_input(
            format!("{threshold}-of-{total_shares}"),
            &secret,
            |b, secret| b.iter(|| scheme.split_secret(black_box(secret)).unwrap()),
        );
    }
    group.finish()
}

fn benchmark_recover_secret(c: &mut Criterion) {
    let mut group = c.benchmark_group("shamir recover secret");
    for &(threshold, total_shares) in CONFIGURATIONS {
        let secret = random_secret();
        let scheme = Scheme::with_default_modulus(threshold, total_shares).unwrap();
        let tokens = scheme.split_to_tokens(&secret).unwrap();
        let tokens = tokens[..threshold].to_vec();
        group.throughput(Throughput::Bytes(secret.len() as u64));
        group.bench_with_input(
            format!("Scheme::recover_from_tokens() {threshold}-of-{total_shares}"),
            &tokens,
            |b, tokens| b.iter(|| black_box(scheme.recover_from_tokens(tokens).unwrap())),
        );
    }
    group.finish()
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = benchmark_split_secret, benchmark_recover_secret
}
criterion_main!(benches);
