use std::io::Write;

use linedict::{
    FileLineSource, MemoryLineSource, QueryEngine, QueryMode, encode, io::file::FileReader,
    load_artifact, query, save_artifact,
};

fn write_input(dir: &std::path::Path, text: &[u8]) -> std::path::PathBuf {
    let path = dir.join("input.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(text).unwrap();
    path
}

#[test]
fn test_encode_persist_query() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"apple\nbanana\napple\ncherry\n");
    let output = dir.path().join("fruit.ldict");

    let source = FileLineSource::open(&input).unwrap();
    let artifact = encode(&source, 2).unwrap();
    assert_eq!(artifact.dictionary().get(b"apple"), Some(0));
    assert_eq!(artifact.dictionary().get(b"banana"), Some(1));
    assert_eq!(artifact.dictionary().get(b"cherry"), Some(2));
    assert_eq!(artifact.sequence().as_slice(), [0, 1, 0, 2]);
    save_artifact(&output, &artifact, false).unwrap();

    let loaded = load_artifact(&output).unwrap();
    assert_eq!(loaded, artifact);

    let exact = query(&loaded, b"apple", QueryMode::Exact, true);
    assert_eq!(exact.to_pairs(), [(b"apple".to_vec(), vec![0, 2])]);

    let prefix = query(&loaded, b"ap", QueryMode::Prefix, true);
    assert_eq!(prefix.to_pairs(), [(b"apple".to_vec(), vec![0, 2])]);

    assert!(query(&loaded, b"z", QueryMode::Prefix, true).is_not_found());
}

#[test]
fn test_zero_workers() {
    let source = MemoryLineSource::from_lines(["apple"]);
    let err = encode(&source, 0).unwrap_err();
    assert!(err.is_invalid_config(), "{err}");
}

#[test]
fn test_truncated_artifact_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fruit.ldict");
    let artifact = encode(
        &MemoryLineSource::from_lines(["apple", "banana", "apple", "cherry"]),
        2,
    )
    .unwrap();
    let written = save_artifact(&output, &artifact, false).unwrap();

    // Cut inside the last dictionary entry.
    let file = std::fs::OpenOptions::new()
        .write(true)
        .open(&output)
        .unwrap();
    file.set_len(written - 16 - 2).unwrap();
    drop(file);

    let err = load_artifact(&output).unwrap_err();
    assert!(err.is_corrupt_artifact(), "{err}");

    let reader = FileReader::open(&output).unwrap();
    assert!(QueryEngine::load(&reader).is_err());
}

#[test]
fn test_content_with_special_bytes() {
    let source = MemoryLineSource::new(vec![
        b"a\0b".to_vec(),
        b"".to_vec(),
        b"x\r".to_vec(),
        b"a\0b".to_vec(),
    ]);
    let artifact = encode(&source, 3).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("special.ldict");
    save_artifact(&output, &artifact, false).unwrap();
    let loaded = load_artifact(&output).unwrap();
    assert_eq!(loaded, artifact);
    assert_eq!(loaded.line(0), Some(&b"a\0b"[..]));
    assert_eq!(loaded.line(2), Some(&b"x\r"[..]));

    let result = query(&loaded, b"a\0", QueryMode::Prefix, false);
    assert_eq!(result.to_pairs(), [(b"a\0b".to_vec(), vec![0, 3])]);
}
