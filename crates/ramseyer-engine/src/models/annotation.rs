use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// The two Ramseyer marks: deleted text is struck through, inserted text is
/// underlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Strikethrough,
    Underline,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 2] = [AnnotationKind::Strikethrough, AnnotationKind::Underline];

    /// Overlap resolution rank; the higher rank owns an overlapping sub-range.
    pub fn precedence(self) -> u8 {
        match self {
            AnnotationKind::Strikethrough => 2,
            AnnotationKind::Underline => 1,
        }
    }
}

/// A position in atom coordinates.
///
/// For text atoms `offset` counts chars; for reference atoms it is 0 (before
/// the atom) or 1 (after it, i.e. covering it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomPoint {
    pub atom: usize,
    pub offset: usize,
}

/// A forward range in atom coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtomRange {
    pub start_atom: usize,
    pub start_offset: usize,
    pub end_atom: usize,
    pub end_offset: usize,
}

impl AtomRange {
    /// Builds a range from two points in either order.
    pub fn between(a: AtomPoint, b: AtomPoint) -> Self {
        let (start, end) = match a.cmp(&b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        Self {
            start_atom: start.atom,
            start_offset: start.offset,
            end_atom: end.atom,
            end_offset: end.offset,
        }
    }

    pub fn start(&self) -> AtomPoint {
        AtomPoint {
            atom: self.start_atom,
            offset: self.start_offset,
        }
    }

    pub fn end(&self) -> AtomPoint {
        AtomPoint {
            atom: self.end_atom,
            offset: self.end_offset,
        }
    }

    /// The same range with its endpoints in reading order.
    pub fn normalized(&self) -> Self {
        Self::between(self.start(), self.end())
    }

    pub fn is_collapsed(&self) -> bool {
        self.start() == self.end()
    }

    /// Whether the range selects no content at all, given each covered
    /// atom's length. A range with any atom of unknown length counts as
    /// non-empty.
    pub fn is_empty_over(&self, atom_len: impl Fn(usize) -> Option<usize>) -> bool {
        let range = self.normalized();
        (range.start_atom..=range.end_atom).all(|atom| {
            atom_len(atom).is_some_and(|len| {
                let (start, end) = range.local_bounds(atom, len);
                start >= end
            })
        })
    }

    /// Whether `atom_index` lies within `[start_atom, end_atom]`.
    pub fn covers_atom(&self, atom_index: usize) -> bool {
        self.start_atom <= atom_index && atom_index <= self.end_atom
    }

    /// The `[start, end)` sub-range this range occupies inside one atom of
    /// length `atom_length`, clamped to the atom. May be empty.
    pub fn local_bounds(&self, atom_index: usize, atom_length: usize) -> (usize, usize) {
        let start = if atom_index == self.start_atom {
            self.start_offset.min(atom_length)
        } else {
            0
        };
        let end = if atom_index == self.end_atom {
            self.end_offset.min(atom_length)
        } else {
            atom_length
        };
        (start, end)
    }
}

/// A user-applied mark over a range of one section's atoms.
///
/// Annotations are never edited in place; every change produces a new list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub kind: AnnotationKind,
    pub section_key: String,
    /// The covered text at the time of marking, for display and auditing.
    pub text_snapshot: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub range: AtomRange,
}

impl Annotation {
    pub fn new(
        range: AtomRange,
        kind: AnnotationKind,
        section_key: impl Into<String>,
        text_snapshot: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            section_key: section_key.into(),
            text_snapshot: text_snapshot.into(),
            timestamp: Utc::now(),
            range,
        }
    }

    pub fn covers_atom(&self, atom_index: usize) -> bool {
        self.range.covers_atom(atom_index)
    }
}
