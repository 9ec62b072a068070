use std::{
    collections::HashSet,
    io::Write,
    ops::Range,
    sync::atomic::{AtomicUsize, Ordering},
};

use linedict_encoder::{Encoder, EncoderParams, encode};
use linedict_format::Artifact;
use linedict_io::{FileLineSource, LineSource, MemoryLineSource};
use rand::{Rng, SeedableRng};

fn random_lines(seed: u64, count: usize, distinct: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let vocabulary = (0..distinct)
        .map(|i| {
            let mut word = format!("word-{i}-").into_bytes();
            let extra = rng.random_range(0..48);
            word.extend((0..extra).map(|_| rng.random_range(b'a'..=b'z')));
            word
        })
        .collect::<Vec<_>>();
    (0..count)
        .map(|_| vocabulary[rng.random_range(0..distinct)].clone())
        .collect()
}

fn check_order_preserved(artifact: &Artifact, lines: &[Vec<u8>]) {
    assert_eq!(artifact.line_count(), lines.len());
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(artifact.line(i), Some(line.as_slice()), "line {i}");
    }
}

#[test]
fn test_fruit_scenario() {
    let source = MemoryLineSource::from_lines(["apple", "banana", "apple", "cherry"]);
    let artifact = encode(&source, 2).unwrap();
    let dict = artifact.dictionary();
    assert_eq!(dict.len(), 3);
    assert_eq!(dict.get(b"apple"), Some(0));
    assert_eq!(dict.get(b"banana"), Some(1));
    assert_eq!(dict.get(b"cherry"), Some(2));
    assert_eq!(artifact.sequence().as_slice(), [0, 1, 0, 2]);
}

#[test]
fn test_zero_workers_rejected() {
    let source = MemoryLineSource::from_lines(["a"]);
    let err = encode(&source, 0).unwrap_err();
    assert!(err.is_invalid_config(), "{err}");
    assert!(Encoder::new(EncoderParams::with_workers(0)).is_err());
}

#[test]
fn test_zero_workers_rejected_before_reading() {
    let source = CountingSource::new(MemoryLineSource::from_lines(["a", "b"]));
    assert!(encode(&source, 0).is_err());
    assert_eq!(source.reads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_determinism_across_worker_counts() {
    let lines = random_lines(42, 20_000, 700);
    let source = MemoryLineSource::new(lines.clone());
    let baseline = encode(&source, 1).unwrap();
    check_order_preserved(&baseline, &lines);

    for workers in 2..=8 {
        let artifact = encode(&source, workers).unwrap();
        assert_eq!(artifact, baseline, "{workers} workers");
        assert_eq!(
            artifact.sequence(),
            baseline.sequence(),
            "{workers} workers"
        );
        check_order_preserved(&artifact, &lines);
    }
}

#[test]
fn test_ids_follow_first_appearance() {
    let lines = random_lines(7, 5_000, 300);
    let source = MemoryLineSource::new(lines.clone());
    let artifact = encode(&source, 5).unwrap();

    let mut first_seen = Vec::<&[u8]>::new();
    let mut seen = HashSet::new();
    for line in &lines {
        if seen.insert(line.as_slice()) {
            first_seen.push(line);
        }
    }
    assert_eq!(artifact.symbol_count(), first_seen.len());
    for (expected_id, content) in first_seen.iter().enumerate() {
        assert_eq!(artifact.dictionary().get(content), Some(expected_id as u32));
    }

    let ids = artifact
        .dictionary()
        .iter()
        .map(|s| s.id())
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), artifact.symbol_count());
}

#[test]
fn test_small_batches_and_many_workers() {
    let lines = random_lines(99, 1_000, 50);
    let source = MemoryLineSource::new(lines.clone());
    let baseline = encode(&source, 1).unwrap();
    for (workers, batch_size) in [(3, 1), (16, 7), (64, 1000)] {
        let encoder = Encoder::new(EncoderParams {
            worker_count: workers,
            batch_size,
        })
        .unwrap();
        assert_eq!(encoder.params().worker_count, workers);
        let artifact = encoder.encode(&source).unwrap();
        assert_eq!(artifact, baseline);
        check_order_preserved(&artifact, &lines);
    }
}

#[test]
fn test_unbounded_batch_size() {
    let source = MemoryLineSource::from_lines(["a", "b", "a", "c", "b"]);
    for workers in [2, 3, 5] {
        let encoder = Encoder::new(EncoderParams {
            worker_count: workers,
            batch_size: usize::MAX,
        })
        .unwrap();
        let artifact = encoder.encode(&source).unwrap();
        assert_eq!(
            artifact.sequence().as_slice(),
            [0, 1, 0, 2, 1],
            "{workers} workers"
        );
    }
}

#[test]
fn test_fewer_lines_than_workers() {
    let source = MemoryLineSource::from_lines(["x", "y", "x"]);
    let artifact = encode(&source, 8).unwrap();
    assert_eq!(artifact.sequence().as_slice(), [0, 1, 0]);
}

#[test]
fn test_empty_input() {
    let source = MemoryLineSource::default();
    let artifact = encode(&source, 4).unwrap();
    assert!(artifact.dictionary().is_empty());
    assert!(artifact.sequence().is_empty());
}

#[test]
fn test_encoder_is_reusable() {
    let encoder = Encoder::new(EncoderParams::with_workers(3)).unwrap();
    let first = encoder
        .encode(&MemoryLineSource::from_lines(["a", "b", "a"]))
        .unwrap();
    let second = encoder
        .encode(&MemoryLineSource::from_lines(["b", "b", "c"]))
        .unwrap();
    assert_eq!(first.sequence().as_slice(), [0, 1, 0]);
    assert_eq!(second.sequence().as_slice(), [0, 0, 1]);
    assert_eq!(second.dictionary().get(b"b"), Some(0));
}

#[test]
fn test_worker_failure_fails_encode() {
    let lines = random_lines(3, 1_000, 20);
    let source = FailingSource {
        inner: MemoryLineSource::new(lines),
        failing_line: 777,
    };
    for workers in [1, 2, 4] {
        let err = encode(&source, workers).unwrap_err();
        assert!(err.is_io(), "{err}");
        assert!(err.to_string().contains("read lines"), "{err}");
    }
}

#[test]
fn test_encode_file() {
    let lines = random_lines(11, 3_000, 100);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in &lines {
        file.write_all(line).unwrap();
        file.write_all(b"\n").unwrap();
    }
    file.flush().unwrap();

    let source = FileLineSource::open(file.path()).unwrap();
    let from_file = encode(&source, 4).unwrap();
    let from_memory = encode(&MemoryLineSource::new(lines.clone()), 1).unwrap();
    assert_eq!(from_file, from_memory);
    check_order_preserved(&from_file, &lines);
}

struct FailingSource {
    inner: MemoryLineSource,
    failing_line: usize,
}

impl LineSource for FailingSource {
    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn read_lines(&self, range: Range<usize>) -> std::io::Result<Vec<Vec<u8>>> {
        if range.contains(&self.failing_line) {
            return Err(std::io::Error::other("injected failure"));
        }
        self.inner.read_lines(range)
    }
}

struct CountingSource {
    inner: MemoryLineSource,
    reads: AtomicUsize,
}

impl CountingSource {
    fn new(inner: MemoryLineSource) -> Self {
        CountingSource {
            inner,
            reads: AtomicUsize::new(0),
        }
    }
}

impl LineSource for CountingSource {
    fn line_count(&self) -> usize {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.line_count()
    }

    fn read_lines(&self, range: Range<usize>) -> std::io::Result<Vec<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_lines(range)
    }
}
