//! High-level facade for the `snapfen-*` crates.
//!
//! Takes the payload a board/piece detector returns for a photographed
//! chessboard (square centers plus labelled piece bounding boxes), places each
//! piece on its nearest square and encodes the board as FEN.
//!
//! ## Quickstart
//!
//! ```
//! use snapfen::{convert, ConvertConfig, DetectionPayload};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Square (i, j) is centered at (50 + 100 * j, 50 + 100 * i).
//! let xs: Vec<Vec<f32>> = (0..8).map(|_| (0..8).map(|j| 50.0 + 100.0 * j as f32).collect()).collect();
//! let ys: Vec<Vec<f32>> = (0..8).map(|i| vec![50.0 + 100.0 * i as f32; 8]).collect();
//! let payload = DetectionPayload::from_json_str(&serde_json::json!({
//!     "squares": [xs, ys],
//!     "pieces": [
//!         { "left": 430, "right": 470, "top": 20, "bottom": 80, "label": "BlackKing" },
//!         "Detection(left=430, top=720, right=470, bottom=780, label='WhiteKing')"
//!     ]
//! }).to_string())?;
//!
//! let conversion = convert(&payload, &ConvertConfig::default())?;
//! assert_eq!(conversion.fen, "4k3/8/8/8/8/8/8/4K3 w");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `snapfen::core`: board grid, square naming, piece labels, geometry, logger.
//! - `snapfen::assign`: nearest-square assignment with clamp policy.
//! - `snapfen::fen`: FEN placement + side-to-move encoding.
//! - [`convert`] / [`payload_to_fen`]: end-to-end helpers over a [`DetectionPayload`].

pub use snapfen_assign as assign;
pub use snapfen_core as core;
pub use snapfen_fen as fen;

pub use snapfen_assign::{AssignError, AssignParams, Assignment, ClampPolicy, SquareAssigner};
pub use snapfen_core::{BoardGrid, SquareCoords};
pub use snapfen_fen::{FenEncodeError, SideToMove};

mod convert;
mod io;

pub use convert::{
    convert, payload_to_fen, viewer_url, Conversion, ConvertError, DEFAULT_VIEWER_URL,
};
pub use io::{ConversionReport, ConvertConfig, DetectionPayload, IoError};
