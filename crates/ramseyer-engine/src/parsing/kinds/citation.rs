/// Bracket-delimited citation marker: `[1]`, `[2.5]`, `[doc 4, chunk 2, $1,000]`.
///
/// The content between the brackets is an opaque identifier; resolving it to a
/// document or amount happens outside the engine.
pub struct Citation;

impl Citation {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';

    /// Bytes that terminate a marker without closing it.
    pub const BREAKS: &'static [u8] = b"[\n\r";

    /// The bracketed form shown in place of the marker.
    pub fn display(ref_id: &str) -> String {
        format!("[{ref_id}]")
    }
}
