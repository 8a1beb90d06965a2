//! # Annotations
//!
//! The annotation list of a document, its snapshot history, and
//! reconciliation of a local draft against the last confirmed baseline.
//!
//! ## State machine
//!
//! States are history snapshots. `apply_annotation` and `clear_all` push a
//! new snapshot (truncating redo), `undo`/`redo` move the pointer, and
//! `discard` collapses history to the baseline. There is no terminal state.

pub mod history;
pub mod reconcile;
pub mod store;

pub use history::History;
pub use reconcile::{Reconciliation, reconcile};
pub use store::{AnnotationStore, SessionInit};
