use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::AnnotationsBySection;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid section content in {path}: {source}")]
    InvalidContent {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failure reported by an [`AnnotationPersistence`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Annotation data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Annotation store rejected the request: {0}")]
    Rejected(String),
}

/// Where confirmed annotations live. Owned by the host application; the
/// engine only calls it when asked to via
/// [`AnnotationStore::save_with`](crate::annotations::AnnotationStore::save_with)
/// or [`AnnotationStore::load_with`](crate::annotations::AnnotationStore::load_with).
pub trait AnnotationPersistence {
    fn save(&self, annotations: &AnnotationsBySection) -> Result<(), PersistenceError>;
    fn load(&self) -> Result<AnnotationsBySection, PersistenceError>;
}

/// Stores annotations as one pretty-printed JSON object keyed by section.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnnotationPersistence for JsonFileStore {
    fn save(&self, annotations: &AnnotationsBySection) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(annotations)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// A missing file is an empty store.
    fn load(&self) -> Result<AnnotationsBySection, PersistenceError> {
        if !self.path.exists() {
            return Ok(AnnotationsBySection::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Reads section content: a JSON object mapping section key to raw text.
pub fn load_sections(path: &Path) -> Result<BTreeMap<String, String>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| IoError::InvalidContent {
        path: path.to_path_buf(),
        source,
    })
}
