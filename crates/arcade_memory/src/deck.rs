//! Card symbols.

use serde::{Deserialize, Serialize};

/// Glyphs available for pairs; the largest grid uses all of them.
pub const DECK: [&str; 32] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐸", "🐵", "🐔", "🐧", "🐦",
    "🦆", "🦅", "🦉", "🐺", "🐗", "🐴", "🦄", "🐝", "🐛", "🦋", "🐌", "🐞", "🐜", "🕷", "🦂", "🐢",
];

/// Index into [`DECK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(u8);

impl Symbol {
    /// Symbol at `index`, if the deck has one.
    pub fn new(index: usize) -> Option<Self> {
        (index < DECK.len()).then(|| Symbol(index as u8))
    }

    /// Position in the deck.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Printable glyph.
    pub fn glyph(self) -> &'static str {
        DECK[self.index()]
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}
