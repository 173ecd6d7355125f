use payloadgen::logging::Logger;
use payloadgen::{ContentKind, Generator, RandomSource, TAIL_SIZE};
use sha2::{Digest, Sha256};

fn is_lower_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[test]
fn random_many_calls_keep_length() {
    let mut g = Generator::new(16, "random", RandomSource::seeded(1), &Logger::new()).unwrap();
    assert_eq!(g.next_slice().len(), 16);

    // tail + size + 1 回で少なくとも 1 回は再生成される
    let mut rebuilt = false;
    for _ in 0..(TAIL_SIZE + 16) {
        assert_eq!(g.next_slice().len(), 16);
        if g.cursor() == 0 {
            rebuilt = true;
        }
    }
    assert!(rebuilt);
}

#[test]
fn text_payload_with_hash() {
    let mut g = Generator::new(32, "text", RandomSource::seeded(2), &Logger::new()).unwrap();
    let p = g.gen_payload(true);
    assert_eq!(p.data.len(), 32);
    assert_eq!(p.hash.len(), 64);
    assert!(is_lower_hex(&p.hash));
    assert_eq!(p.hash, hex::encode(Sha256::digest(&p.data[..])));
}

#[test]
fn unknown_kind_behaves_like_random() {
    let mut bogus = Generator::new(24, "bogus", RandomSource::seeded(9), &Logger::new()).unwrap();
    let mut random = Generator::new(24, "random", RandomSource::seeded(9), &Logger::new()).unwrap();
    for _ in 0..(TAIL_SIZE * 2 + 5) {
        assert_eq!(bogus.next_slice(), random.next_slice());
    }
}

#[test]
fn unspecified_kind_behaves_like_random() {
    let mut g = Generator::new(8, "", RandomSource::seeded(9), &Logger::new()).unwrap();
    assert_eq!(g.kind(), ContentKind::Unspecified);
    g.next_slice();
    assert_eq!(g.buffer_len(), 8 + TAIL_SIZE);
}

#[test]
fn non_positive_size_fails() {
    for size in [0, -1, -1024] {
        assert!(Generator::new(size, "random", RandomSource::seeded(1), &Logger::new()).is_err());
        assert!(Generator::new(size, "text", RandomSource::seeded(1), &Logger::new()).is_err());
    }
}

#[test]
fn sliding_within_one_buffer() {
    let mut g = Generator::new(100, "text", RandomSource::seeded(3), &Logger::new()).unwrap();
    let first = g.next_slice();
    let mut prev = first.clone();
    let mut k = 1;
    while g.is_filled() {
        let cur = g.next_slice();
        assert_eq!(&prev[1..], &cur[..99]);
        prev = cur;
        k += 1;
    }
    assert!(k > TAIL_SIZE);
}

#[test]
fn hash_on_and_off_share_payload() {
    let src_a = RandomSource::seeded(5);
    let src_b = RandomSource::seeded(5);
    let mut a = Generator::new(48, "random", src_a, &Logger::new()).unwrap();
    let mut b = Generator::new(48, "random", src_b, &Logger::new()).unwrap();
    for _ in 0..10 {
        let pa = a.gen_payload(true);
        let pb = b.gen_payload(false);
        assert_eq!(pa.data, pb.data);
        assert!(pb.hash.is_empty());
        assert_eq!(pa.hash, hex::encode(Sha256::digest(&pb.data[..])));
    }
}

#[test]
fn generators_sharing_a_source_are_independent() {
    let src = RandomSource::seeded(11);
    let mut a = Generator::new(16, "random", src.clone(), &Logger::new()).unwrap();
    let mut b = Generator::new(16, "random", src, &Logger::new()).unwrap();
    let sa = a.next_slice();
    let sb = b.next_slice();
    assert_ne!(sa, sb);
    // 一方を進めてももう一方のカーソルには影響しない
    for _ in 0..10 {
        a.next_slice();
    }
    assert_eq!(a.cursor(), 11);
    assert_eq!(b.cursor(), 1);
}

#[test]
fn large_size() {
    let mut g = Generator::new(1 << 20, "random", RandomSource::seeded(1), &Logger::new()).unwrap();
    assert_eq!(g.gen_payload(true).data.len(), 1 << 20);
}
