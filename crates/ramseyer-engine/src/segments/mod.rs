//! # Segments
//!
//! Splits one atom into the ordered, gap-free runs a renderer styles.
//!
//! Annotations covering the atom are projected to atom-local ranges, merged
//! per kind, and then resolved by precedence: wherever a strikethrough and
//! an underline overlap, the strikethrough wins.

use serde::{Deserialize, Serialize};

use crate::models::{Annotation, AnnotationKind};

/// The annotation state of one run of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    #[default]
    None,
    Strikethrough,
    Underline,
}

impl From<AnnotationKind> for SegmentKind {
    fn from(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Strikethrough => SegmentKind::Strikethrough,
            AnnotationKind::Underline => SegmentKind::Underline,
        }
    }
}

/// A contiguous `[start, end)` run inside one atom sharing a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

type Interval = (usize, usize);

/// Partitions atom `atom_index` of length `atom_length` into segments.
///
/// The result is ascending, contiguous, non-overlapping and covers exactly
/// `[0, atom_length)`; a zero-length atom has no segments. Annotations whose
/// atom range does not include `atom_index` are ignored, which also drops
/// annotations left stale by a text change.
pub fn segments_for_atom(
    atom_index: usize,
    atom_length: usize,
    annotations: &[Annotation],
) -> Vec<Segment> {
    if atom_length == 0 {
        return vec![];
    }

    let mut pools: Vec<(AnnotationKind, Vec<Interval>)> = AnnotationKind::ALL
        .iter()
        .map(|&kind| {
            let local = annotations
                .iter()
                .filter(|a| a.kind == kind && a.covers_atom(atom_index))
                .map(|a| a.range.local_bounds(atom_index, atom_length))
                .filter(|(start, end)| start < end)
                .collect();
            (kind, merge_intervals(local))
        })
        .collect();
    pools.sort_by_key(|(kind, _)| std::cmp::Reverse(kind.precedence()));

    let mut bounds: Vec<usize> = vec![0, atom_length];
    for (_, intervals) in &pools {
        for &(start, end) in intervals {
            bounds.push(start);
            bounds.push(end);
        }
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut out: Vec<Segment> = Vec::with_capacity(bounds.len());
    for window in bounds.windows(2) {
        let (start, end) = (window[0], window[1]);
        let kind = pools
            .iter()
            .find(|(_, intervals)| intervals.iter().any(|&(s, e)| s <= start && end <= e))
            .map(|(kind, _)| SegmentKind::from(*kind))
            .unwrap_or_default();

        match out.last_mut() {
            Some(prev) if prev.kind == kind && prev.end == start => prev.end = end,
            _ => out.push(Segment { start, end, kind }),
        }
    }
    out
}

/// Annotation state of an indivisible atom such as a citation reference.
///
/// Strikethrough if any covering annotation strikes it, else underline if any
/// underlines it, else none. An annotation that starts on the atom at offset 1
/// or ends on it at offset 0 stops at its edge and does not cover it.
pub fn is_atom_annotated(atom_index: usize, annotations: &[Annotation]) -> SegmentKind {
    segments_for_atom(atom_index, 1, annotations)
        .first()
        .map(|segment| segment.kind)
        .unwrap_or_default()
}

/// Sorts by start and merges overlapping or touching intervals.
fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_unstable();
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
