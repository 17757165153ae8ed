use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SideToMoveError;

/// Which side is to move in the encoded position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideToMove {
    #[default]
    White,
    Black,
}

impl SideToMove {
    /// FEN active-color character.
    pub const fn fen_char(self) -> char {
        match self {
            SideToMove::White => 'w',
            SideToMove::Black => 'b',
        }
    }
}

impl FromStr for SideToMove {
    type Err = SideToMoveError;

    /// Accepts `white`/`black` and the FEN letters `w`/`b`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(SideToMove::White),
            "black" | "b" => Ok(SideToMove::Black),
            _ => Err(SideToMoveError(s.to_owned())),
        }
    }
}

impl fmt::Display for SideToMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SideToMove::White => "white",
            SideToMove::Black => "black",
        })
    }
}
