//! Property-style tests for the atom parser.

mod invariants;

use rstest::rstest;

use crate::models::AtomRange;
use crate::parsing::{Atom, parse_atoms, reconstruct, text_in_range};

const WORKED_EXAMPLE: &str = "The purpose [1] is to establish [2.5] funding.";

#[rstest]
#[case::empty("")]
#[case::plain("No citations here.")]
#[case::bare_number("Appropriated [12] for fiscal year 2025.")]
#[case::dotted_pair(WORKED_EXAMPLE)]
#[case::verbose("Total [doc 3, chunk 7, $4,500,000] is authorized.")]
#[case::leading_marker("[1] begins the clause")]
#[case::trailing_marker("the clause ends [9]")]
#[case::adjacent("[1][2][3]")]
#[case::unmatched_open("Section 5 [ is unterminated")]
#[case::stray_close("no ] opener")]
#[case::multiline("line one [1]\nline two [2]\n")]
fn round_trip_reproduces_input(#[case] input: &str) {
    let atoms = parse_atoms(input);
    invariants::check(&atoms);
    assert_eq!(reconstruct(&atoms), input);
}

#[rstest]
#[case(WORKED_EXAMPLE)]
#[case("[a] b [c")]
fn parse_is_deterministic(#[case] input: &str) {
    assert_eq!(parse_atoms(input), parse_atoms(input));
}

#[test]
fn worked_example_atoms() {
    let atoms = parse_atoms(WORKED_EXAMPLE);
    insta::assert_debug_snapshot!(atoms, @r#"
    [
        Text {
            content: "The purpose ",
        },
        Ref {
            ref_id: "1",
            display: "[1]",
        },
        Text {
            content: " is to establish ",
        },
        Ref {
            ref_id: "2.5",
            display: "[2.5]",
        },
        Text {
            content: " funding.",
        },
    ]
    "#);
}

#[test]
fn unmatched_bracket_emits_no_ref() {
    let atoms = parse_atoms("Fees under [section 4 apply");
    assert!(atoms.iter().all(|a| !a.is_ref()));
}

#[test]
fn text_in_range_spans_reference() {
    let atoms = parse_atoms(WORKED_EXAMPLE);
    let range = AtomRange {
        start_atom: 0,
        start_offset: 4,
        end_atom: 2,
        end_offset: 3,
    };
    assert_eq!(text_in_range(&atoms, &range), "purpose [1] is");
}

#[test]
fn text_in_range_excludes_reference_at_zero_end() {
    let atoms = parse_atoms(WORKED_EXAMPLE);
    let range = AtomRange {
        start_atom: 0,
        start_offset: 4,
        end_atom: 1,
        end_offset: 0,
    };
    assert_eq!(text_in_range(&atoms, &range), "purpose ");
}

#[test]
fn text_in_range_ignores_stale_atoms() {
    let atoms = vec![Atom::Text {
        content: "short".to_string(),
    }];
    let range = AtomRange {
        start_atom: 0,
        start_offset: 2,
        end_atom: 6,
        end_offset: 1,
    };
    assert_eq!(text_in_range(&atoms, &range), "ort");
}
