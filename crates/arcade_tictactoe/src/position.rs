//! Named board positions.

use arcade_core::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A square of the 3x3 grid, numbered 0-8 in row-major order.
///
/// Declaration order is the scan order of the opponent's tie-break.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, column 1.
    TopCenter,
    /// Row 0, column 2.
    TopRight,
    /// Row 1, column 0.
    MiddleLeft,
    /// Row 1, column 1.
    Center,
    /// Row 1, column 2.
    MiddleRight,
    /// Row 2, column 0.
    BottomLeft,
    /// Row 2, column 1.
    BottomCenter,
    /// Row 2, column 2.
    BottomRight,
}

impl Position {
    /// Board index, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Position at a board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Row, 0 at the top.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column, 0 at the left.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// Kebab-case name, e.g. `top-left`.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a 1-9 keypad number, a `row,col` pair counted from 1, or a
/// case-insensitive name such as `center` or `Bottom-Left`.
impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let parsed = if let Ok(key) = input.parse::<usize>() {
            key.checked_sub(1).and_then(Self::from_index)
        } else if let Some((row, col)) = input.split_once(',') {
            match (row.trim().parse::<usize>(), col.trim().parse::<usize>()) {
                (Ok(row @ 1..=3), Ok(col @ 1..=3)) => Self::from_index((row - 1) * 3 + col - 1),
                _ => None,
            }
        } else {
            Self::iter().find(|pos| pos.label().eq_ignore_ascii_case(input))
        };
        parsed.ok_or_else(|| GameError::invalid_input(format!("no square named {input:?}")))
    }
}
