// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use ramseyer_engine::{Annotation, AnnotationKind, AtomRange};

#[allow(dead_code)]
pub fn generate_section_text(clauses: usize) -> String {
    let base = "The amount appropriated under subsection (a) [12] shall remain available until expended, except as provided in [3.4] and [doc 7, chunk 2, $1,500,000]. ";
    base.repeat(clauses)
}

#[allow(dead_code)]
pub fn generate_annotations(count: usize, atoms: usize) -> Vec<Annotation> {
    (0..count)
        .map(|i| {
            let start_atom = (i * 7) % atoms.max(1);
            let kind = if i % 3 == 0 {
                AnnotationKind::Strikethrough
            } else {
                AnnotationKind::Underline
            };
            Annotation::new(
                AtomRange {
                    start_atom,
                    start_offset: i % 11,
                    end_atom: (start_atom + i % 3).min(atoms.saturating_sub(1)),
                    end_offset: i % 11 + 5 + i % 40,
                },
                kind,
                "bench",
                "",
            )
        })
        .collect()
}
