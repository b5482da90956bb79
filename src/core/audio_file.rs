use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MediScribeError, Result};

/// Formats the backend accepts, matching the upload form's allow list.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["mp3", "wav", "m4a", "webm", "ogg", "flac"];

#[derive(Debug, Clone)]
pub struct AudioFileMeta {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
}

/// Validate an audio file before any network I/O: it must exist, carry a
/// supported extension, and fit under `max_bytes` (0 disables the cap).
pub fn inspect(path: &Path, max_bytes: u64) -> Result<AudioFileMeta> {
    if !path.is_file() {
        return Err(MediScribeError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(MediScribeError::UnsupportedFormat {
            extension,
            expected: SUPPORTED_EXTENSIONS.join(", "),
        });
    }

    let size_bytes = fs::metadata(path)?.len();
    if max_bytes > 0 && size_bytes > max_bytes {
        return Err(MediScribeError::FileTooLarge {
            size: size_bytes,
            limit: max_bytes,
        });
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(AudioFileMeta {
        path: path.to_path_buf(),
        filename,
        size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, bytes: usize) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("create");
        file.write_all(&vec![0u8; bytes]).expect("write");
        path
    }

    #[test]
    fn accepts_supported_extension_case_insensitively() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "visit.MP3", 128);

        let meta = inspect(&path, 0).expect("inspect");
        assert_eq!(meta.filename, "visit.MP3");
        assert_eq!(meta.size_bytes, 128);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "notes.txt", 16);

        let err = inspect(&path, 0).expect_err("should fail");
        assert!(matches!(err, MediScribeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "long.wav", 2048);

        let err = inspect(&path, 1024).expect_err("should fail");
        assert!(matches!(
            err,
            MediScribeError::FileTooLarge {
                size: 2048,
                limit: 1024
            }
        ));
        // A zero cap disables the size check.
        inspect(&path, 0).expect("inspect");
    }

    #[test]
    fn rejects_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = inspect(&dir.path().join("absent.wav"), 0).expect_err("should fail");
        assert!(matches!(err, MediScribeError::FileNotFound(_)));
    }
}
