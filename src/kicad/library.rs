//! `<Library>.pretty/` directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::OutputError;
use crate::footprint::Footprint;
use crate::kicad::write::render;

/// Writes footprints into `<root>/<library>.pretty/<name>.kicad_mod`.
#[derive(Debug, Clone)]
pub struct LibraryWriter {
    root: PathBuf,
    timestamp: Option<i64>,
}

impl LibraryWriter {
    /// Creates a writer rooted at `root`, stamping the current time.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            timestamp: None,
        }
    }

    /// Uses a fixed edit timestamp so output is reproducible.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.pretty` directory of a library.
    #[must_use]
    pub fn library_dir(&self, library: &str) -> PathBuf {
        self.root.join(format!("{library}.pretty"))
    }

    /// Returns the file a footprint is written to.
    #[must_use]
    pub fn footprint_path(&self, fp: &Footprint) -> PathBuf {
        self.library_dir(&fp.library)
            .join(format!("{}.kicad_mod", fp.name))
    }

    /// Writes one footprint, creating the library directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::CreateDir`] or [`OutputError::WriteFile`].
    pub fn write(&self, fp: &Footprint) -> Result<PathBuf, OutputError> {
        let dir = self.library_dir(&fp.library);
        fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = self.footprint_path(fp);
        let tedit = self.timestamp.unwrap_or_else(|| Utc::now().timestamp());
        let contents = render(fp, tedit).map_err(|source| OutputError::WriteFile {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, contents).map_err(|source| OutputError::WriteFile {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Wrote footprint");
        Ok(path)
    }
}
