//! Morse character table.
//!
//! Maps letters, digits and punctuation to their dot/dash patterns.
//! The table is built once and never mutated afterwards.

use std::collections::HashMap;

/// One of the two Morse symbol primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short element, one unit long.
    Dot,
    /// Long element, three units long.
    Dash,
}

impl Symbol {
    /// Returns the glyph used to display this symbol.
    pub const fn glyph(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    /// Returns the duration of this symbol in dot units.
    pub const fn units(&self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
        }
    }
}

/// International Morse patterns, written with '.' and '-'.
const PATTERNS: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

/// Punctuation in Unicode root collation order, used for the palette.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()@/&+=$";

/// Immutable mapping from an uppercase character to its symbol pattern.
#[derive(Debug, Clone)]
pub struct MorseTable {
    patterns: HashMap<char, Vec<Symbol>>,
}

impl MorseTable {
    /// Builds the standard international table.
    pub fn standard() -> Self {
        let patterns = PATTERNS
            .iter()
            .map(|&(ch, code)| {
                let symbols = code
                    .chars()
                    .map(|c| if c == '-' { Symbol::Dash } else { Symbol::Dot })
                    .collect();
                (ch, symbols)
            })
            .collect();

        Self { patterns }
    }

    /// Looks up the pattern for a character.
    ///
    /// Lookups are exact: callers are expected to uppercase first.
    pub fn lookup(&self, ch: char) -> Option<&[Symbol]> {
        self.patterns.get(&ch).map(Vec::as_slice)
    }

    /// Returns true if the character has a table entry.
    pub fn contains(&self, ch: char) -> bool {
        self.patterns.contains_key(&ch)
    }

    /// Returns the pattern for a character as a '.'/'-' string.
    pub fn pattern_string(&self, ch: char) -> Option<String> {
        self.lookup(ch)
            .map(|symbols| symbols.iter().map(Symbol::glyph).collect())
    }

    /// Number of characters in the table.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns every character in display order: letters, digits, then
    /// punctuation in collation order.
    pub fn characters(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.patterns.keys().copied().collect();
        chars.sort_by_key(|&c| {
            if c.is_ascii_alphabetic() {
                (0, 0, c)
            } else if c.is_ascii_digit() {
                (1, 0, c)
            } else {
                let rank = PUNCTUATION_ORDER
                    .chars()
                    .position(|p| p == c)
                    .unwrap_or(PUNCTUATION_ORDER.len());
                (2, rank, c)
            }
        });
        chars
    }
}

impl Default for MorseTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_letters() {
        let table = MorseTable::standard();
        assert_eq!(table.lookup('E'), Some(&[Symbol::Dot][..]));
        assert_eq!(
            table.lookup('O'),
            Some(&[Symbol::Dash, Symbol::Dash, Symbol::Dash][..])
        );
        assert_eq!(table.pattern_string('A').as_deref(), Some(".-"));
        assert_eq!(table.pattern_string('@').as_deref(), Some(".--.-."));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = MorseTable::standard();
        assert!(table.contains('Q'));
        assert!(!table.contains('q'));
        assert!(!table.contains(' '));
        assert!(!table.contains('#'));
    }

    #[test]
    fn test_characters_ordering() {
        let table = MorseTable::standard();
        let chars = table.characters();
        assert_eq!(chars.len(), table.len());
        assert_eq!(chars[0], 'A');
        assert_eq!(chars[25], 'Z');
        assert_eq!(chars[26], '0');
        assert_eq!(chars[35], '9');
        assert!(chars[36..].iter().all(|c| !c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_punctuation_collation_order() {
        let table = MorseTable::standard();
        let punctuation: String = table.characters()[36..].iter().collect();
        assert_eq!(punctuation, "_-,;:!?.'\"()@/&+=$");
        assert!(PUNCTUATION_ORDER.chars().all(|c| table.contains(c)));
    }

    #[test]
    fn test_symbol_units() {
        assert_eq!(Symbol::Dot.units(), 1);
        assert_eq!(Symbol::Dash.units(), 3);
        assert_eq!(Symbol::Dash.glyph(), '-');
    }
}
