//! Artifact files on the local file system.

use std::path::Path;

use linedict_common::{Result, error::Error};
use linedict_format::{
    Artifact,
    codec::{read_artifact, write_artifact},
};
use linedict_io::{
    SealingWrite,
    file::{FileReader, FileWriter},
};
use tempfile::NamedTempFile;

/// Writes `artifact` to a file at `path` and returns the number of bytes written.
///
/// Fails if the file exists, unless `overwrite` is set. The data goes to a temporary
/// file in the same directory, which replaces `path` only once it is sealed, so
/// `path` never holds a partial artifact and keeps its previous content if the
/// write fails.
pub fn save_artifact(path: impl AsRef<Path>, artifact: &Artifact, overwrite: bool) -> Result<u64> {
    save_with(path.as_ref(), overwrite, |writer| {
        write_artifact(artifact, writer)
    })
}

fn save_with(
    path: &Path,
    overwrite: bool,
    write: impl FnOnce(&mut dyn SealingWrite) -> Result<u64>,
) -> Result<u64> {
    let context = || format!("create {}", path.display());
    if !overwrite && path.exists() {
        return Err(Error::io(
            context(),
            std::io::ErrorKind::AlreadyExists.into(),
        ));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let (file, temp_path) = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(context(), e))?
        .into_parts();

    // On failure `temp_path` is dropped, which removes the temporary file.
    let mut writer = FileWriter::new(file);
    let written = write(&mut writer)?;
    drop(writer);

    let persisted = if overwrite {
        temp_path.persist(path)
    } else {
        temp_path.persist_noclobber(path)
    };
    persisted.map_err(|e| Error::io(context(), e.error))?;
    log::debug!("saved artifact {} ({written} bytes)", path.display());
    Ok(written)
}

/// Reads and decodes the artifact stored at `path`.
pub fn load_artifact(path: impl AsRef<Path>) -> Result<Artifact> {
    let path = path.as_ref();
    let reader =
        FileReader::open(path).map_err(|e| Error::io(format!("open {}", path.display()), e))?;
    read_artifact(&reader)
}

#[cfg(test)]
mod tests {
    use linedict_common::error::Error;
    use linedict_encoder::encode;
    use linedict_io::MemoryLineSource;

    use super::{load_artifact, save_artifact, save_with};

    fn file_names(dir: &std::path::Path) -> Vec<String> {
        let mut names = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fruit.ldict");
        let artifact = encode(
            &MemoryLineSource::from_lines(["apple", "banana", "apple", "cherry"]),
            2,
        )
        .unwrap();

        let written = save_artifact(&path, &artifact, false).unwrap();
        assert_eq!(written, std::fs::metadata(&path).unwrap().len());
        assert_eq!(load_artifact(&path).unwrap(), artifact);

        let err = save_artifact(&path, &artifact, false).unwrap_err();
        assert!(err.is_io());
        save_artifact(&path, &artifact, true).unwrap();
        assert_eq!(load_artifact(&path).unwrap(), artifact);
        assert_eq!(file_names(dir.path()), ["fruit.ldict"]);
    }

    #[test]
    fn test_failed_overwrite_keeps_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fruit.ldict");
        let previous = encode(&MemoryLineSource::from_lines(["apple", "banana"]), 1).unwrap();
        save_artifact(&path, &previous, false).unwrap();

        let err = save_with(&path, true, |writer| {
            writer.write_all(&[1, 0, 0, 0, 5]).unwrap();
            Err(Error::limit_exceeded("symbol id does not fit in int32"))
        })
        .unwrap_err();
        assert!(!err.is_io());

        assert_eq!(load_artifact(&path).unwrap(), previous);
        assert_eq!(file_names(dir.path()), ["fruit.ldict"]);
    }

    #[test]
    fn test_failed_write_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.ldict");
        let result = save_with(&path, false, |writer| {
            writer.write_all(b"partial").unwrap();
            Err(Error::limit_exceeded("content length"))
        });
        assert!(result.is_err());
        assert!(!path.exists());
        assert!(file_names(dir.path()).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact(dir.path().join("missing")).unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("missing"), "{err}");
    }
}
