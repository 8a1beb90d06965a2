use crate::models::Annotation;

/// Which annotation set a view should treat as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The last confirmed persisted set; there is no unsaved work.
    Baseline,
    /// A local draft that differs from the baseline, i.e. unsaved work.
    Draft,
    /// Nothing persisted and nothing drafted.
    None,
}

/// Compares a local draft with the last confirmed baseline.
///
/// A missing baseline counts as empty when judging whether the draft holds
/// changes.
pub fn reconcile(baseline: Option<&[Annotation]>, draft: Option<&[Annotation]>) -> Reconciliation {
    let base = baseline.unwrap_or_default();
    match draft {
        Some(d) if d != base => Reconciliation::Draft,
        _ if baseline.is_some() => Reconciliation::Baseline,
        _ => Reconciliation::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotationKind, AtomRange};
    use rstest::rstest;

    fn one() -> Vec<Annotation> {
        vec![Annotation::new(
            AtomRange {
                start_atom: 0,
                start_offset: 0,
                end_atom: 0,
                end_offset: 2,
            },
            AnnotationKind::Underline,
            "s",
            "ab",
        )]
    }

    #[test]
    fn nothing_at_all() {
        assert_eq!(reconcile(None, None), Reconciliation::None);
        assert_eq!(reconcile(None, Some(&[][..])), Reconciliation::None);
    }

    #[rstest]
    #[case::no_draft(None)]
    #[case::same_draft(Some(true))]
    fn matching_draft_is_baseline(#[case] draft: Option<bool>) {
        let base = one();
        let draft = draft.map(|_| base.as_slice());
        assert_eq!(reconcile(Some(base.as_slice()), draft), Reconciliation::Baseline);
    }

    #[test]
    fn differing_draft_wins() {
        let base = one();
        assert_eq!(reconcile(Some(base.as_slice()), Some(&[][..])), Reconciliation::Draft);
        assert_eq!(reconcile(None, Some(base.as_slice())), Reconciliation::Draft);
    }
}
