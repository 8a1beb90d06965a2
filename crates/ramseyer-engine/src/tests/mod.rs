//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::io::{AnnotationPersistence, PersistenceError};
use crate::models::{AnnotationsBySection, AtomRange};

pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

pub fn range(
    start_atom: usize,
    start_offset: usize,
    end_atom: usize,
    end_offset: usize,
) -> AtomRange {
    AtomRange {
        start_atom,
        start_offset,
        end_atom,
        end_offset,
    }
}

/// Keeps the last saved map in memory.
#[derive(Default)]
pub struct MemoryPersistence {
    saved: RefCell<AnnotationsBySection>,
}

impl MemoryPersistence {
    pub fn saved(&self) -> AnnotationsBySection {
        self.saved.borrow().clone()
    }
}

impl AnnotationPersistence for MemoryPersistence {
    fn save(&self, annotations: &AnnotationsBySection) -> Result<(), PersistenceError> {
        *self.saved.borrow_mut() = annotations.clone();
        Ok(())
    }

    fn load(&self) -> Result<AnnotationsBySection, PersistenceError> {
        Ok(self.saved())
    }
}

/// Rejects every request.
pub struct FailingPersistence;

impl AnnotationPersistence for FailingPersistence {
    fn save(&self, _: &AnnotationsBySection) -> Result<(), PersistenceError> {
        Err(PersistenceError::Rejected("store offline".to_string()))
    }

    fn load(&self) -> Result<AnnotationsBySection, PersistenceError> {
        Err(PersistenceError::Rejected("store offline".to_string()))
    }
}
