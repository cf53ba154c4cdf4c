//! Saved-design storage.
//!
//! [`DesignRepository`] keeps the user's saved designs as a JSON array in a
//! single file and mirrors it in memory. Every mutation rewrites the file,
//! so a crash never loses more than the operation in flight.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{ConstructorError, ConstructorResult, DesignDocument, Scene};

/// File-backed collection of saved designs.
#[derive(Debug)]
pub struct DesignRepository {
    path: PathBuf,
    designs: Vec<DesignDocument>,
}

impl DesignRepository {
    /// Open a repository at `path`, loading any existing designs. A missing
    /// file is an empty repository; a corrupt one is an error rather than a
    /// silent wipe.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::Io`] on read failure and
    /// [`ConstructorError::Serialization`] on malformed contents.
    pub fn open(path: impl Into<PathBuf>) -> ConstructorResult<Self> {
        let path = path.into();
        let designs = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), count = designs.len(), "design repository opened");
        Ok(Self { path, designs })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved designs, newest last.
    #[must_use]
    pub fn designs(&self) -> &[DesignDocument] {
        &self.designs
    }

    /// Number of saved designs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    /// Whether the repository holds no designs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Snapshot a scene and append it to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::Io`] or
    /// [`ConstructorError::Serialization`] if persisting fails.
    pub fn save(&mut self, scene: &Scene) -> ConstructorResult<()> {
        self.designs.push(DesignDocument::from_scene(scene));
        self.persist()?;
        tracing::debug!(count = self.designs.len(), "design saved");
        Ok(())
    }

    /// Restore the design at `index` into a fresh scene.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::DesignNotFound`] for an out-of-range
    /// index.
    pub fn load(&self, index: usize) -> ConstructorResult<Scene> {
        let document = self
            .designs
            .get(index)
            .ok_or(ConstructorError::DesignNotFound(index))?;
        Ok(document.clone().into_scene())
    }

    /// Remove the design at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::DesignNotFound`] for an out-of-range
    /// index, or [`ConstructorError::Io`] if persisting fails.
    pub fn delete(&mut self, index: usize) -> ConstructorResult<DesignDocument> {
        if index >= self.designs.len() {
            return Err(ConstructorError::DesignNotFound(index));
        }
        let removed = self.designs.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Remove every saved design.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::Io`] if persisting fails.
    pub fn clear(&mut self) -> ConstructorResult<()> {
        self.designs.clear();
        self.persist()
    }

    fn persist(&self) -> ConstructorResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.designs)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
