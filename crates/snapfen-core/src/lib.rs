//! Core types shared by the `snapfen-*` crates.
//!
//! This crate is small and purely geometric. It knows nothing about a
//! particular detector, transport or image type: it only describes square
//! centers and bounding boxes in pixel space, piece labels, and the 8×8 board
//! grid those labels are placed on.
//!
//! Orientation convention used across the workspace: grid row 0 is rank 8 and
//! grid column 0 is file A. [`SquareCoords`] is the single place that encodes it.

mod board;
mod geometry;
mod logger;
mod piece;

pub use board::{BoardGrid, GridError, SquareCoords, BOARD_SIZE, FILE_NAMES, RANK_NAMES};
pub use geometry::{BoundingBox, SquareCenters};
pub use piece::{Color, PieceKind, PieceLabel, PieceLabelError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, verbosity_level};
