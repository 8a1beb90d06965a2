use crate::parsing::Atom;

/// Validates parser output invariants.
///
/// Asserts that:
/// - No text atom is empty
/// - No two text atoms are adjacent (they would have been one run)
/// - Every reference has a non-blank, trimmed id and a bracketed display
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(atoms: &[Atom]) {
    for (i, atom) in atoms.iter().enumerate() {
        match atom {
            Atom::Text { content } => {
                assert!(!content.is_empty(), "empty text atom at index {i}");
                if let Some(Atom::Text { .. }) = atoms.get(i + 1) {
                    panic!("adjacent text atoms at {i} and {}", i + 1);
                }
            }
            Atom::Ref { ref_id, display } => {
                assert!(
                    !ref_id.is_empty() && ref_id.trim() == ref_id,
                    "reference id not trimmed at index {i}: {ref_id:?}"
                );
                assert_eq!(display, &format!("[{ref_id}]"), "display mismatch at {i}");
            }
        }
    }
}
