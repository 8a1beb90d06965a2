use super::{cursor::Cursor, kinds::Citation, types::Atom};

/// Parses one section's raw text into its ordered atoms.
///
/// Text between citation markers becomes [`Atom::Text`] (never empty);
/// each well-formed marker becomes an [`Atom::Ref`] whose id is the trimmed
/// marker content. An unmatched or empty bracket stays literal text.
///
/// Identical input always yields an identical vector, because the index of
/// each atom is its address.
pub fn parse_atoms(text: &str) -> Vec<Atom> {
    let mut cur = Cursor::new(text);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<Atom>, cur: &Cursor<'_>, start: usize, end: usize) {
        if end > start {
            out.push(Atom::Text {
                content: cur.slice(start, end).to_string(),
            });
        }
    }

    while !cur.eof() {
        let marker_start = cur.pos();
        if let Some(atom) = try_parse_citation(&mut cur) {
            flush_text(&mut out, &cur, text_start, marker_start);
            text_start = cur.pos();
            out.push(atom);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, &cur, text_start, cur.pos());
    out
}

/// Attempts to parse a citation marker starting at the current position.
///
/// Returns `None` if not at `[`, if the marker is never closed before a break
/// byte, or if its trimmed content is empty. On failure, cursor position is
/// restored.
fn try_parse_citation(cur: &mut Cursor<'_>) -> Option<Atom> {
    if cur.peek() != Some(Citation::OPEN) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // [
    let inner_start = cur.pos();

    while let Some(b) = cur.peek() {
        if b == Citation::CLOSE || Citation::BREAKS.contains(&b) {
            break;
        }
        cur.bump();
    }
    let inner_end = cur.pos();

    if cur.peek() != Some(Citation::CLOSE) {
        *cur = saved;
        return None;
    }

    let ref_id = cur.slice(inner_start, inner_end).trim();
    if ref_id.is_empty() {
        *cur = saved;
        return None;
    }
    cur.bump(); // ]

    Some(Atom::Ref {
        ref_id: ref_id.to_string(),
        display: Citation::display(ref_id),
    })
}
