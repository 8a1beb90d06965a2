use serde::{Deserialize, Serialize};

/// The smallest addressable unit of a section's text.
///
/// Atoms are identified by their position in the vector returned by
/// [`parse_atoms`](super::parse_atoms); that index is the coordinate every
/// annotation is stored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Atom {
    /// A run of literal text between citation markers.
    Text { content: String },
    /// A citation marker, rendered and annotated as one indivisible unit.
    Ref { ref_id: String, display: String },
}

impl Atom {
    /// Length in annotation offsets: chars for text, always 1 for a reference.
    pub fn len(&self) -> usize {
        match self {
            Atom::Text { content } => content.chars().count(),
            Atom::Ref { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Atom::Ref { .. })
    }

    /// The text a renderer shows for this atom.
    pub fn display_text(&self) -> &str {
        match self {
            Atom::Text { content } => content,
            Atom::Ref { display, .. } => display,
        }
    }
}
