//! Visual Morse rendering.

use super::table::MorseTable;

/// Renders text as a glyph string.
///
/// Each known character becomes its '.'/'-' pattern, each whitespace
/// character becomes '/', and unknown characters are dropped. Tokens are
/// separated by exactly one space.
///
/// # Examples
///
/// ```
/// use morsetui::morse::{to_glyphs, MorseTable};
///
/// let table = MorseTable::standard();
/// assert_eq!(to_glyphs(&table, "sos"), "... --- ...");
/// assert_eq!(to_glyphs(&table, "A B"), ".- / -...");
/// ```
pub fn to_glyphs(table: &MorseTable, text: &str) -> String {
    let tokens: Vec<String> = text
        .to_uppercase()
        .chars()
        .filter_map(|ch| {
            if ch.is_whitespace() {
                Some("/".to_string())
            } else {
                table.pattern_string(ch)
            }
        })
        .collect();

    tokens.join(" ")
}
