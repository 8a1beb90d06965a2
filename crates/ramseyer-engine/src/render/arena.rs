use crate::selection::{AtomTag, RenderTree, SelectionPoint, TagKind};

use super::RenderUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
struct RenderNode {
    parent: Option<NodeId>,
    tag: Option<AtomTag>,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// A minimal retained render tree.
///
/// [`RenderArena::from_units`] builds `root > tagged unit > text` for every
/// unit, which is the shape an HTML renderer would emit as `span`s around
/// text nodes. Text leaves are also indexed by their position in the flat
/// rendered string so caret positions can be turned into selection points.
#[derive(Debug, Clone)]
pub struct RenderArena {
    nodes: Vec<RenderNode>,
    /// `(text node, first char position, char length)` in reading order.
    leaves: Vec<(NodeId, usize, usize)>,
}

impl Default for RenderArena {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderArena {
    /// Creates an arena holding only an untagged root.
    pub fn new() -> Self {
        Self {
            nodes: vec![RenderNode {
                parent: None,
                tag: None,
                text: None,
                children: vec![],
            }],
            leaves: vec![],
        }
    }

    pub fn from_units(units: &[RenderUnit]) -> Self {
        let mut arena = Self::new();
        let root = arena.root();
        for unit in units {
            let kind = if unit.is_ref {
                TagKind::Ref {
                    display_len: unit.text.chars().count(),
                }
            } else {
                TagKind::Text {
                    char_start: unit.char_start,
                }
            };
            let span = arena.add_element(
                root,
                Some(AtomTag {
                    atom_index: unit.atom_index,
                    kind,
                }),
            );
            arena.add_text(span, &unit.text);
        }
        arena
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends an element node, optionally tagged, under `parent`.
    pub fn add_element(&mut self, parent: NodeId, tag: Option<AtomTag>) -> NodeId {
        self.push(parent, tag, None)
    }

    /// Appends a text leaf under `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let start = self.text_len();
        let id = self.push(parent, None, Some(text.to_string()));
        self.leaves.push((id, start, text.chars().count()));
        id
    }

    fn push(&mut self, parent: NodeId, tag: Option<AtomTag>, text: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(RenderNode {
            parent: Some(parent),
            tag,
            text,
            children: vec![],
        });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0)?.text.as_deref()
    }

    /// Chars of text under `node`, including `node` itself.
    fn subtree_text_len(&self, node: NodeId) -> usize {
        let own = self.text(node).map_or(0, |t| t.chars().count());
        own + self
            .children(node)
            .iter()
            .map(|&child| self.subtree_text_len(child))
            .sum::<usize>()
    }

    /// Total rendered length in chars.
    pub fn text_len(&self) -> usize {
        self.leaves
            .last()
            .map(|&(_, start, len)| start + len)
            .unwrap_or(0)
    }

    /// The flat rendered string.
    pub fn flat_text(&self) -> String {
        self.leaves
            .iter()
            .filter_map(|&(id, _, _)| self.text(id))
            .collect()
    }

    /// Converts a caret position in the flat rendered string to a point on a
    /// text leaf. A position on a boundary belongs to the leaf that starts
    /// there; the final position belongs to the last leaf's end.
    pub fn point_at(&self, position: usize) -> Option<SelectionPoint<NodeId>> {
        let leaf = self
            .leaves
            .iter()
            .find(|&&(_, start, len)| start <= position && position < start + len)
            .or_else(|| self.leaves.last().filter(|_| position == self.text_len()))?;
        let (node, start, _) = *leaf;
        Some(SelectionPoint {
            node,
            offset: position - start,
        })
    }
}

impl RenderTree for RenderArena {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn tag(&self, node: NodeId) -> Option<AtomTag> {
        self.nodes.get(node.0)?.tag
    }

    /// The furthest char any span tagged for `atom_index` reaches; 1 for a
    /// reference.
    fn atom_len(&self, atom_index: usize) -> Option<usize> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter_map(|id| {
                let tag = self.tag(id).filter(|t| t.atom_index == atom_index)?;
                Some(match tag.kind {
                    TagKind::Text { char_start } => char_start + self.subtree_text_len(id),
                    TagKind::Ref { .. } => 1,
                })
            })
            .max()
    }
}
