use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ed25519_sign_bench(c: &mut Criterion) {
    let kp = votechain_crypto::generate_keypair();
    let msg = b"voter-0001candidate-07";

    c.bench_function("ed25519_sign_vote", |b| {
        b.iter(|| votechain_crypto::sign_message(black_box(msg), &kp.private))
    });
}

fn ed25519_verify_bench(c: &mut Criterion) {
    let kp = votechain_crypto::generate_keypair();
    let msg = b"voter-0001candidate-07";
    let sig = votechain_crypto::sign_message(msg, &kp.private);

    c.bench_function("ed25519_verify_vote", |b| {
        b.iter(|| votechain_crypto::verify_signature(black_box(msg), &sig, &kp.public))
    });
}

fn sha256_block_bench(c: &mut Criterion) {
    let block_bytes = vec![0xFFu8; 512];

    c.bench_function("sha256_hex_512B", |b| {
        b.iter(|| votechain_crypto::sha256_hex(black_box(&block_bytes)))
    });
}

criterion_group!(
    benches,
    ed25519_sign_bench,
    ed25519_verify_bench,
    sha256_block_bench,
);
criterion_main!(benches);
