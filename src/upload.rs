//! Upload intake: file type allow-list, size cap, safe stored names

use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// 16 MiB
pub const DEFAULT_MAX_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file name given")]
    MissingFilename,

    #[error("Invalid file type. Please upload a JPG, JPEG or PNG file.")]
    UnsupportedExtension(String),

    #[error("File too large. Maximum size is {limit} bytes, got {size}.")]
    TooLarge { size: u64, limit: u64 },

    #[error("cannot store upload {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which uploads are accepted and where they land
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: u64,
    pub upload_dir: PathBuf,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            max_bytes: DEFAULT_MAX_BYTES,
            upload_dir: "static/uploads".into(),
        }
    }
}

impl UploadPolicy {
    /// Case-insensitive extension check
    pub fn allowed_file(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Check name and size; returns the sanitized name to store under
    pub fn validate(&self, filename: &str, size: u64) -> Result<String, UploadError> {
        if filename.trim().is_empty() {
            return Err(UploadError::MissingFilename);
        }
        if !self.allowed_file(filename) {
            return Err(UploadError::UnsupportedExtension(filename.to_string()));
        }
        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let safe = secure_filename(filename);
        if safe.is_empty() || !self.allowed_file(&safe) {
            return Err(UploadError::UnsupportedExtension(filename.to_string()));
        }
        Ok(safe)
    }

    /// Validate and write an uploaded payload into the upload directory
    pub fn store(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, UploadError> {
        let safe = self.validate(filename, bytes.len() as u64)?;

        std::fs::create_dir_all(&self.upload_dir).map_err(|source| UploadError::Io {
            path: self.upload_dir.clone(),
            source,
        })?;

        let path = self.upload_dir.join(safe);
        std::fs::write(&path, bytes).map_err(|source| UploadError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Validate an image already on disk (CLI input)
    pub fn check_path(&self, path: &Path) -> Result<(), UploadError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(UploadError::MissingFilename)?;
        let size = std::fs::metadata(path)
            .map_err(|source| UploadError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        self.validate(name, size).map(|_| ())
    }
}

/// Reduce a client-supplied name to a safe single path component.
///
/// Accented letters are transliterated to ASCII through NFKD decomposition.
/// Path separators and whitespace become `_`, anything outside ASCII
/// alphanumerics and `._-` is dropped, and leading dots or underscores are
/// stripped.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let joined: String = ascii
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != "..")
        .collect::<Vec<_>>()
        .join("_");

    let cleaned: String = joined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_start_matches(['.', '_']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        let policy = UploadPolicy::default();

        assert!(policy.allowed_file("frame.PNG"));
        assert!(policy.allowed_file("a.b.jpeg"));
        assert!(!policy.allowed_file("frame.gif"));
        assert!(!policy.allowed_file("png"));
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My cool movie.jpg"), "My_cool_movie.jpg");
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename(".hidden.png"), "hidden.png");
        assert_eq!(secure_filename("caf\u{e9} d\u{e9}j\u{e0}.png"), "cafe_deja.png");
        assert_eq!(secure_filename("\u{fb01}le \u{b2}.jpg"), "file_2.jpg");
        assert_eq!(secure_filename("\u{5199}\u{771f}.png"), "png");
    }

    #[test]
    fn test_validate_errors() {
        let policy = UploadPolicy::default();

        assert!(matches!(policy.validate("", 10), Err(UploadError::MissingFilename)));
        assert!(matches!(policy.validate("x.bmp", 10), Err(UploadError::UnsupportedExtension(_))));
        assert!(matches!(
            policy.validate("x.png", DEFAULT_MAX_BYTES + 1),
            Err(UploadError::TooLarge { .. })
        ));
        assert_eq!(policy.validate("dir/x.png", DEFAULT_MAX_BYTES).unwrap(), "dir_x.png");
    }

    #[test]
    fn test_store_writes_sanitized_name() {
        let tmp = tempfile::tempdir().unwrap();
        let policy = UploadPolicy {
            upload_dir: tmp.path().join("uploads"),
            ..Default::default()
        };

        let path = policy.store("../evil name.png", b"bytes").unwrap();
        assert_eq!(path, tmp.path().join("uploads").join("evil_name.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"bytes");
    }
}
