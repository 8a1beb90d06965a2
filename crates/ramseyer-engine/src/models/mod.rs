pub mod annotation;

pub use annotation::{Annotation, AnnotationKind, AtomPoint, AtomRange};

use std::collections::BTreeMap;

/// Annotations grouped by the section they belong to, as exchanged with persistence.
pub type AnnotationsBySection = BTreeMap<String, Vec<Annotation>>;
