//! # Render Contract
//!
//! The read API a renderer draws from. Every [`RenderUnit`] carries the atom
//! index it came from and, for text, the char offset of its first character
//! inside that atom. A renderer must tag the nodes it emits with both values
//! so that [`crate::selection`] can map a selection back to atoms.
//!
//! [`RenderArena`] is a plain nested tree built from units, usable directly
//! by frontends without a retained tree of their own.

pub mod arena;

pub use arena::{NodeId, RenderArena};

use serde::Serialize;

use crate::models::Annotation;
use crate::parsing::Atom;
use crate::segments::{SegmentKind, is_atom_annotated, segments_for_atom};

/// One styled run of a section, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderUnit {
    pub atom_index: usize,
    /// Char offset of `text`'s first character within the atom (0 for references).
    pub char_start: usize,
    pub text: String,
    pub kind: SegmentKind,
    pub is_ref: bool,
}

/// Lays out a section's atoms as styled units in reading order.
///
/// Text atoms yield one unit per segment; reference atoms yield exactly one
/// unit holding their bracketed display. `annotations` should already be
/// limited to the section being rendered.
pub fn render_section(atoms: &[Atom], annotations: &[Annotation]) -> Vec<RenderUnit> {
    let mut units = Vec::with_capacity(atoms.len());
    for (atom_index, atom) in atoms.iter().enumerate() {
        match atom {
            Atom::Text { content } => {
                let chars: Vec<char> = content.chars().collect();
                for segment in segments_for_atom(atom_index, chars.len(), annotations) {
                    units.push(RenderUnit {
                        atom_index,
                        char_start: segment.start,
                        text: chars[segment.start..segment.end].iter().collect(),
                        kind: segment.kind,
                        is_ref: false,
                    });
                }
            }
            Atom::Ref { display, .. } => units.push(RenderUnit {
                atom_index,
                char_start: 0,
                text: display.clone(),
                kind: is_atom_annotated(atom_index, annotations),
                is_ref: true,
            }),
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotationKind, AtomRange};
    use crate::parsing::parse_atoms;
    use pretty_assertions::assert_eq;

    #[test]
    fn unannotated_section_has_one_unit_per_atom() {
        let atoms = parse_atoms("a [1] b");
        let units = render_section(&atoms, &[]);
        assert_eq!(units.len(), 3);
        assert!(units.iter().all(|u| u.kind == SegmentKind::None));
        assert!(units[1].is_ref);
        assert_eq!(units[1].text, "[1]");
    }

    #[test]
    fn annotated_text_splits_into_units_with_char_starts() {
        let atoms = parse_atoms("The purpose [1] is");
        let annotation = Annotation::new(
            AtomRange {
                start_atom: 0,
                start_offset: 4,
                end_atom: 1,
                end_offset: 1,
            },
            AnnotationKind::Strikethrough,
            "s",
            "purpose [1]",
        );
        let units = render_section(&atoms, &[annotation]);
        let summary: Vec<(usize, usize, &str, SegmentKind)> = units
            .iter()
            .map(|u| (u.atom_index, u.char_start, u.text.as_str(), u.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, 0, "The ", SegmentKind::None),
                (0, 4, "purpose ", SegmentKind::Strikethrough),
                (1, 0, "[1]", SegmentKind::Strikethrough),
                (2, 0, " is", SegmentKind::None),
            ]
        );
    }

    #[test]
    fn units_concatenate_to_display_text() {
        let atoms = parse_atoms("§ 2 “fees” [3] due");
        let annotation = Annotation::new(
            AtomRange {
                start_atom: 0,
                start_offset: 2,
                end_atom: 0,
                end_offset: 7,
            },
            AnnotationKind::Underline,
            "s",
            "",
        );
        let units = render_section(&atoms, &[annotation]);
        let joined: String = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(joined, "§ 2 “fees” [3] due");
    }
}
