//! # Selection Mapping
//!
//! Translates a platform selection (anchor and focus as node + local offset
//! in a render tree) into an [`AtomRange`].
//!
//! Renderers uphold one contract: every node emitted for an atom carries an
//! [`AtomTag`] with the atom index, and text renderings also carry the char
//! offset of their first character within the atom. The mapper finds that
//! tag by walking upward from each endpoint, so the endpoint itself may be a
//! nested, untagged node such as a text leaf.

use crate::models::{AtomPoint, AtomRange};

/// Default bound on how many ancestors are inspected per endpoint.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 8;

/// Metadata a renderer attaches to the node emitted for an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomTag {
    pub atom_index: usize,
    pub kind: TagKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Part of a text atom starting at `char_start` within it.
    Text { char_start: usize },
    /// A whole reference atom whose display is `display_len` chars long.
    Ref { display_len: usize },
}

/// Any tree-shaped render output that exposes parent links and tags.
pub trait RenderTree {
    type Node: Copy + PartialEq + std::fmt::Debug;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn tag(&self, node: Self::Node) -> Option<AtomTag>;

    /// Length of atom `atom_index` in atom coordinates, when the tree can
    /// tell. Used to spot selections that span a boundary but hold no text.
    fn atom_len(&self, _atom_index: usize) -> Option<usize> {
        None
    }
}

/// A node plus a char offset within that node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPoint<N> {
    pub node: N,
    pub offset: usize,
}

/// A live selection. `anchor` is where the drag started, `focus` where it
/// ended; either may come first in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<N> {
    pub anchor: SelectionPoint<N>,
    pub focus: SelectionPoint<N>,
}

impl<N: PartialEq> Selection<N> {
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionMapper {
    max_depth: usize,
}

impl Default for SelectionMapper {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

impl SelectionMapper {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Maps `selection` to a forward atom range.
    ///
    /// Returns `None` when there is no selection, when it is collapsed or
    /// covers no text, or when either endpoint has no tagged ancestor within
    /// the depth bound.
    pub fn to_atom_range<T: RenderTree>(
        &self,
        tree: &T,
        selection: Option<&Selection<T::Node>>,
    ) -> Option<AtomRange> {
        let selection = selection?;
        if selection.is_collapsed() {
            return None;
        }

        let anchor = self.resolve(tree, &selection.anchor)?;
        let focus = self.resolve(tree, &selection.focus)?;
        if anchor == focus {
            log::debug!("selection resolves to an empty range at {anchor:?}");
            return None;
        }
        let range = AtomRange::between(anchor, focus);
        if range.is_empty_over(|atom| tree.atom_len(atom)) {
            log::debug!("selection {range:?} covers no text");
            return None;
        }
        Some(range)
    }

    /// Resolves one endpoint to atom coordinates.
    pub fn resolve<T: RenderTree>(
        &self,
        tree: &T,
        point: &SelectionPoint<T::Node>,
    ) -> Option<AtomPoint> {
        let tag = self.find_tag(tree, point.node)?;
        let offset = match tag.kind {
            TagKind::Text { char_start } => char_start + point.offset,
            TagKind::Ref { display_len } => {
                if point.offset * 2 < display_len.max(1) {
                    0
                } else {
                    1
                }
            }
        };
        Some(AtomPoint {
            atom: tag.atom_index,
            offset,
        })
    }

    /// Walks from `node` upward, inspecting at most `max_depth` ancestors
    /// beyond the node itself.
    fn find_tag<T: RenderTree>(&self, tree: &T, node: T::Node) -> Option<AtomTag> {
        let mut current = node;
        for _ in 0..=self.max_depth {
            if let Some(tag) = tree.tag(current) {
                return Some(tag);
            }
            current = tree.parent(current)?;
        }
        log::debug!(
            "no atom tag within {} ancestors of {node:?}",
            self.max_depth
        );
        None
    }
}

/// Maps `selection` with the default depth bound.
pub fn to_atom_range<T: RenderTree>(
    tree: &T,
    selection: Option<&Selection<T::Node>>,
) -> Option<AtomRange> {
    SelectionMapper::default().to_atom_range(tree, selection)
}
