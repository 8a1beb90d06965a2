//! # Atom Parsing
//!
//! Turns a section's raw text into the atom sequence that every other part of
//! the engine addresses by index.
//!
//! ## Modules
//!
//! - **`types`**: `Atom` enum (Text, Ref)
//! - **`kinds`**: `Citation`, the owner of the marker delimiters
//! - **`cursor`**: `Cursor` for byte-by-byte scanning
//! - **`parser`**: `parse_atoms()` main entry point
//!
//! ## Round Trip
//!
//! [`reconstruct`] concatenates text atoms verbatim and references as
//! `[ref_id]`, reproducing any input whose markers carry no padding.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

#[cfg(test)]
mod tests;

pub use parser::parse_atoms;
pub use types::Atom;

use crate::models::AtomRange;
use kinds::Citation;

/// Rebuilds section text from its atoms.
pub fn reconstruct(atoms: &[Atom]) -> String {
    atoms
        .iter()
        .map(|atom| match atom {
            Atom::Text { content } => content.clone(),
            Atom::Ref { ref_id, .. } => Citation::display(ref_id),
        })
        .collect()
}

/// Extracts the text covered by `range`, with references shown by their display.
///
/// Used as the human-readable snapshot stored alongside an annotation. Atom
/// indices past the end of `atoms` are ignored.
pub fn text_in_range(atoms: &[Atom], range: &AtomRange) -> String {
    let mut out = String::new();
    let last = range.end_atom.min(atoms.len().saturating_sub(1));
    for (index, atom) in atoms
        .iter()
        .enumerate()
        .take(last + 1)
        .skip(range.start_atom)
    {
        let (start, end) = range.local_bounds(index, atom.len());
        if start >= end {
            continue;
        }
        match atom {
            Atom::Text { content } => out.extend(content.chars().skip(start).take(end - start)),
            Atom::Ref { display, .. } => out.push_str(display),
        }
    }
    out
}
