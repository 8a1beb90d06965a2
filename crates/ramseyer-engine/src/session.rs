//! A review session: section content, the atoms of the section on screen,
//! and the annotation store, wired together the way a frontend drives them.

use std::collections::BTreeMap;

use crate::annotations::AnnotationStore;
use crate::models::{Annotation, AnnotationKind};
use crate::parsing::{Atom, parse_atoms, text_in_range};
use crate::render::{RenderUnit, render_section};
use crate::selection::{RenderTree, Selection, SelectionMapper};

pub struct ReviewSession {
    sections: BTreeMap<String, String>,
    current: Option<String>,
    atoms: Vec<Atom>,
    store: AnnotationStore,
    mapper: SelectionMapper,
}

impl ReviewSession {
    /// Opens a session on the first section (in key order), if any.
    pub fn new(sections: BTreeMap<String, String>, store: AnnotationStore) -> Self {
        let mut session = Self {
            sections,
            current: None,
            atoms: Vec::new(),
            store,
            mapper: SelectionMapper::default(),
        };
        if let Some(first) = session.sections.keys().next().cloned() {
            session.select_section(&first);
        }
        session
    }

    pub fn with_mapper(mut self, mapper: SelectionMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn current_section(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switches to `key` and re-parses its atoms. Unknown keys are ignored.
    pub fn select_section(&mut self, key: &str) -> bool {
        let Some(text) = self.sections.get(key) else {
            log::debug!("no section named {key}");
            return false;
        };
        self.atoms = parse_atoms(text);
        self.current = Some(key.to_string());
        true
    }

    /// Replaces all content, e.g. when another document is opened. Annotations
    /// start over from `store`.
    pub fn load_document(&mut self, sections: BTreeMap<String, String>, store: AnnotationStore) {
        *self = Self::new(sections, store).with_mapper(self.mapper);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AnnotationStore {
        &mut self.store
    }

    /// Render units for the current section.
    pub fn render(&self) -> Vec<RenderUnit> {
        let annotations = self
            .current
            .as_deref()
            .map(|key| self.store.for_section(key))
            .unwrap_or_default();
        render_section(&self.atoms, &annotations)
    }

    /// Marks the selected text of the current section.
    ///
    /// Returns `None`, changing nothing, when the selection does not map to
    /// atoms or no section is open.
    pub fn annotate<T: RenderTree>(
        &mut self,
        tree: &T,
        selection: Option<&Selection<T::Node>>,
        kind: AnnotationKind,
    ) -> Option<&Annotation> {
        let section = self.current.clone()?;
        let range = self.mapper.to_atom_range(tree, selection)?;
        if range.is_empty_over(|atom| self.atoms.get(atom).map(Atom::len)) {
            log::debug!("selection {range:?} covers no text");
            return None;
        }
        let snapshot = text_in_range(&self.atoms, &range);
        self.store.apply_annotation(range, kind, section, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{NodeId, RenderArena};
    use crate::segments::SegmentKind;
    use crate::selection::{AtomTag, SelectionPoint};

    fn sections() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("sec-1".to_string(), "The purpose [1] is to establish [2.5] funding.".to_string()),
            ("sec-2".to_string(), "Amounts [3] remain available.".to_string()),
        ])
    }

    #[test]
    fn opens_first_section() {
        let session = ReviewSession::new(sections(), AnnotationStore::default());
        assert_eq!(session.current_section(), Some("sec-1"));
        assert_eq!(session.atoms().len(), 5);
    }

    #[test]
    fn unknown_section_is_ignored() {
        let mut session = ReviewSession::new(sections(), AnnotationStore::default());
        assert!(!session.select_section("sec-9"));
        assert_eq!(session.current_section(), Some("sec-1"));
    }

    #[test]
    fn annotate_selection_records_snapshot_and_renders() {
        let mut session = ReviewSession::new(sections(), AnnotationStore::default());
        let arena = RenderArena::from_units(&session.render());
        let selection = Selection {
            anchor: arena.point_at(15).unwrap(),
            focus: arena.point_at(4).unwrap(),
        };

        let annotation = session
            .annotate(&arena, Some(&selection), AnnotationKind::Strikethrough)
            .cloned()
            .unwrap();

        assert_eq!(annotation.text_snapshot, "purpose [1]");
        assert_eq!(annotation.section_key, "sec-1");
        let struck: String = session
            .render()
            .iter()
            .filter(|u| u.kind == SegmentKind::Strikethrough)
            .map(|u| u.text.as_str())
            .collect();
        assert_eq!(struck, "purpose [1]");
    }

    #[test]
    fn annotations_stay_in_their_section() {
        let mut session = ReviewSession::new(sections(), AnnotationStore::default());
        let arena = RenderArena::from_units(&session.render());
        let selection = Selection {
            anchor: arena.point_at(0).unwrap(),
            focus: arena.point_at(3).unwrap(),
        };
        session.annotate(&arena, Some(&selection), AnnotationKind::Underline);

        session.select_section("sec-2");
        assert!(session.render().iter().all(|u| u.kind == SegmentKind::None));
    }

    #[test]
    fn unmappable_selection_is_a_no_op() {
        let mut session = ReviewSession::new(sections(), AnnotationStore::default());
        let arena = RenderArena::from_units(&session.render());
        assert!(
            session
                .annotate(&arena, None, AnnotationKind::Underline)
                .is_none()
        );
        assert!(!session.store().can_undo());
    }

    /// A tree that tags spans but cannot report atom lengths.
    struct Untracked(RenderArena);

    impl RenderTree for Untracked {
        type Node = NodeId;

        fn parent(&self, node: NodeId) -> Option<NodeId> {
            self.0.parent(node)
        }

        fn tag(&self, node: NodeId) -> Option<AtomTag> {
            self.0.tag(node)
        }
    }

    #[test]
    fn selection_covering_no_text_is_a_no_op() {
        let mut session = ReviewSession::new(sections(), AnnotationStore::default());
        let tree = Untracked(RenderArena::from_units(&session.render()));
        let spans = tree.0.children(tree.0.root());
        let selection = Selection {
            anchor: SelectionPoint {
                node: tree.0.children(spans[0])[0],
                offset: 12,
            },
            focus: SelectionPoint {
                node: tree.0.children(spans[1])[0],
                offset: 0,
            },
        };

        assert!(
            session
                .annotate(&tree, Some(&selection), AnnotationKind::Strikethrough)
                .is_none()
        );
        assert!(!session.store().can_undo());
    }

    #[test]
    fn load_document_resets_annotations() {
        let mut session = ReviewSession::new(sections(), AnnotationStore::default());
        let arena = RenderArena::from_units(&session.render());
        let selection = Selection {
            anchor: arena.point_at(0).unwrap(),
            focus: arena.point_at(3).unwrap(),
        };
        session.annotate(&arena, Some(&selection), AnnotationKind::Underline);

        session.load_document(
            BTreeMap::from([("only".to_string(), "New text".to_string())]),
            AnnotationStore::default(),
        );

        assert_eq!(session.current_section(), Some("only"));
        assert!(session.store().annotations().is_empty());
    }
}
