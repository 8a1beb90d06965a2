use crate::io::{AnnotationPersistence, PersistenceError};
use crate::models::{Annotation, AnnotationKind, AnnotationsBySection, AtomRange};

use super::history::History;
use super::reconcile::{Reconciliation, reconcile};

/// How a store starts out, supplied by the host when the review view opens.
#[derive(Debug, Clone, Default)]
pub struct SessionInit {
    /// Last externally confirmed annotations, if any were loaded.
    pub baseline: Option<Vec<Annotation>>,
    /// Start from an empty working set even when a baseline exists.
    pub clear_on_load: bool,
}

impl SessionInit {
    pub fn from_baseline(baseline: Vec<Annotation>) -> Self {
        Self {
            baseline: Some(baseline),
            clear_on_load: false,
        }
    }

    pub fn with_clear_on_load(mut self, clear_on_load: bool) -> Self {
        self.clear_on_load = clear_on_load;
        self
    }
}

/// The current annotation list of a document plus its undo/redo history.
///
/// Every change replaces the whole list with a new snapshot; annotations
/// themselves are never edited.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    history: History<Vec<Annotation>>,
    baseline: Option<Vec<Annotation>>,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new(SessionInit::default())
    }
}

impl AnnotationStore {
    pub fn new(init: SessionInit) -> Self {
        let initial = match (&init.baseline, init.clear_on_load) {
            (Some(baseline), false) => baseline.clone(),
            _ => Vec::new(),
        };
        log::debug!(
            "annotation store opened with {} annotations (clear_on_load: {})",
            initial.len(),
            init.clear_on_load
        );
        Self {
            history: History::new(initial),
            baseline: init.baseline,
        }
    }

    /// Loads the baseline through `persistence` and opens a store on it.
    pub fn load_with<P: AnnotationPersistence + ?Sized>(
        persistence: &P,
        clear_on_load: bool,
    ) -> Result<Self, PersistenceError> {
        let loaded = persistence.load()?;
        let baseline = flatten(loaded);
        Ok(Self::new(
            SessionInit::from_baseline(baseline).with_clear_on_load(clear_on_load),
        ))
    }

    /// The current annotation list.
    pub fn annotations(&self) -> &[Annotation] {
        self.history.current()
    }

    pub fn for_section(&self, section_key: &str) -> Vec<Annotation> {
        self.annotations()
            .iter()
            .filter(|a| a.section_key == section_key)
            .cloned()
            .collect()
    }

    pub fn by_section(&self) -> AnnotationsBySection {
        let mut out = AnnotationsBySection::new();
        for annotation in self.annotations() {
            out.entry(annotation.section_key.clone())
                .or_default()
                .push(annotation.clone());
        }
        out
    }

    /// Appends a new annotation as a new history entry, dropping any redo tail.
    ///
    /// `range` is stored in reading order. A collapsed range changes nothing
    /// and returns `None`.
    pub fn apply_annotation(
        &mut self,
        range: AtomRange,
        kind: AnnotationKind,
        section_key: impl Into<String>,
        text_snapshot: impl Into<String>,
    ) -> Option<&Annotation> {
        let range = range.normalized();
        if range.is_collapsed() {
            log::debug!("ignoring collapsed {kind:?} range {range:?}");
            return None;
        }
        let annotation = Annotation::new(range, kind, section_key, text_snapshot);
        log::debug!(
            "apply {:?} to {} {:?}",
            annotation.kind,
            annotation.section_key,
            annotation.range
        );
        let mut next = self.annotations().to_vec();
        next.push(annotation);
        self.history.push(next);
        self.history.current().last()
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        log::debug!("undo (moved: {moved}, pointer: {})", self.history.pointer());
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        log::debug!("redo (moved: {moved}, pointer: {})", self.history.pointer());
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Empties the annotation list as a new, undoable history entry.
    pub fn clear_all(&mut self) {
        log::debug!("clear all ({} annotations)", self.annotations().len());
        self.history.push(Vec::new());
    }

    /// Throws away all local history, leaving only the confirmed baseline.
    pub fn discard(&mut self) {
        log::debug!("discard local history");
        let baseline = self.baseline.clone().unwrap_or_default();
        self.history.reset(baseline);
    }

    pub fn baseline(&self) -> Option<&[Annotation]> {
        self.baseline.as_deref()
    }

    /// Records `annotations` as externally confirmed, e.g. after a save.
    /// History is left as it is.
    pub fn confirm_baseline(&mut self, annotations: Vec<Annotation>) {
        self.baseline = Some(annotations);
    }

    /// Starts over on a new baseline, for when the underlying document changes.
    pub fn reset(&mut self, baseline: Option<Vec<Annotation>>) {
        let initial = baseline.clone().unwrap_or_default();
        self.baseline = baseline;
        self.history.reset(initial);
    }

    pub fn reconciliation(&self) -> Reconciliation {
        reconcile(self.baseline(), Some(self.annotations()))
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.reconciliation() == Reconciliation::Draft
    }

    /// Saves the current list through `persistence`.
    ///
    /// On success the saved list becomes the baseline. On failure nothing in
    /// the store changes, so the caller can simply retry.
    pub fn save_with<P: AnnotationPersistence + ?Sized>(
        &mut self,
        persistence: &P,
    ) -> Result<(), PersistenceError> {
        match persistence.save(&self.by_section()) {
            Ok(()) => {
                self.confirm_baseline(self.annotations().to_vec());
                Ok(())
            }
            Err(e) => {
                log::warn!("saving annotations failed: {e}");
                Err(e)
            }
        }
    }
}

/// Joins per-section lists back into one list, in section key order.
fn flatten(by_section: AnnotationsBySection) -> Vec<Annotation> {
    by_section.into_values().flatten().collect()
}
