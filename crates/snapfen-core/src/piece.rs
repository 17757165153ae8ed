//! Piece labels as produced by the upstream detector (`"WhiteKnight"`, `"BlackPawn"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Side a piece belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Label prefix used by the detector.
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

/// Kind of chess piece, independent of color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Label suffix used by the detector.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Uppercase FEN letter for this kind.
    pub const fn fen_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Errors produced when a label does not decompose into color + kind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PieceLabelError {
    #[error("label {label:?} does not start with `White` or `Black`")]
    UnknownColor { label: String },
    #[error("label {label:?} names no known piece kind")]
    UnknownKind { label: String },
}

impl PieceLabelError {
    /// The offending label.
    pub fn label(&self) -> &str {
        match self {
            PieceLabelError::UnknownColor { label } | PieceLabelError::UnknownKind { label } => {
                label
            }
        }
    }
}

/// A decoded detector label.
///
/// Parsing is strict about structure (color prefix followed by the kind, nothing
/// else) but ignores ASCII case, so `"whiteQueen"` and `"WhiteQueen"` decode the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceLabel {
    pub color: Color,
    pub kind: PieceKind,
}

impl PieceLabel {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub const fn fen_char(self) -> char {
        let letter = self.kind.fen_letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

impl FromStr for PieceLabel {
    type Err = PieceLabelError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let (color, rest) = Color::ALL
            .iter()
            .find_map(|&c| strip_prefix_ignore_case(label, c.name()).map(|rest| (c, rest)))
            .ok_or_else(|| PieceLabelError::UnknownColor {
                label: label.to_owned(),
            })?;

        let kind = PieceKind::ALL
            .iter()
            .copied()
            .find(|k| rest.eq_ignore_ascii_case(k.name()))
            .ok_or_else(|| PieceLabelError::UnknownKind {
                label: label.to_owned(),
            })?;

        Ok(Self { color, kind })
    }
}

impl fmt::Display for PieceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.name(), self.kind.name())
    }
}
