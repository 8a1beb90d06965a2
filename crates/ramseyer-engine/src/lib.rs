pub mod annotations;
pub mod io;
pub mod models;
pub mod parsing;
pub mod render;
pub mod segments;
pub mod selection;
pub mod session;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use annotations::{AnnotationStore, History, Reconciliation, SessionInit, reconcile};
pub use io::{AnnotationPersistence, IoError, JsonFileStore, PersistenceError};
pub use models::{Annotation, AnnotationKind, AnnotationsBySection, AtomPoint, AtomRange};
pub use parsing::{Atom, parse_atoms, reconstruct, text_in_range};
pub use render::{RenderArena, RenderUnit, render_section};
pub use segments::{Segment, SegmentKind, is_atom_annotated, segments_for_atom};
pub use selection::{
    AtomTag, RenderTree, Selection, SelectionMapper, SelectionPoint, TagKind, to_atom_range,
};
pub use session::ReviewSession;
