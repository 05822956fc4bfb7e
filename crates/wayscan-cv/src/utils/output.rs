//! Write-once output files with collision-free names

use crate::detection::config::{OutputConfig, OutputFormat};
use crate::error::NavError;
use crate::Result;
use image::RgbImage;
use rand::Rng;
use std::fs::OpenOptions;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tracing::debug;

/// Attempts before giving up on finding an unused name
const MAX_NAME_ATTEMPTS: usize = 8;

/// Persists annotated frames into an append-only directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    directory: PathBuf,
    prefix: String,
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            prefix: config.prefix.clone(),
            format: config.format,
        }
    }

    /// `<prefix>_<32 random hex digits>.<ext>`
    pub fn random_file_name(&self) -> String {
        let id: u128 = rand::thread_rng().r#gen();
        format!("{}_{:032x}.{}", self.prefix, id, self.format.extension())
    }

    /// Encode and write the image under a fresh name.
    ///
    /// Files are created with `create_new`, so an existing file is never
    /// overwritten even if two writers draw the same name.
    pub fn write(&self, image: &RgbImage) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|source| NavError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut encoded = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut encoded), self.format.image_format())
            .map_err(|source| NavError::Encode {
                path: self.directory.clone(),
                source,
            })?;

        let mut last_err = None;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = self.directory.join(self.random_file_name());
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(&encoded)
                        .and_then(|_| file.sync_all())
                        .map_err(|source| NavError::Io {
                            path: path.clone(),
                            source,
                        })?;
                    debug!(path = %path.display(), bytes = encoded.len(), "wrote output frame");
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    last_err = Some((path, e));
                }
                Err(source) => return Err(NavError::Io { path, source }),
            }
        }

        let (path, source) = last_err.unwrap_or_else(|| {
            (
                self.directory.clone(),
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "no free output name"),
            )
        });
        Err(NavError::Io { path, source })
    }
}
