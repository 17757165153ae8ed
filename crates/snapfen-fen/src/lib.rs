//! FEN encoding of an 8×8 board of detector labels.
//!
//! Only the piece-placement field and the side-to-move field are produced
//! (`"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"`). Castling rights,
//! en-passant target and move counters are not part of the output, and no
//! legality checks are made.

mod encoder;
mod error;
mod side;

pub use encoder::{encode, encode_placement, encode_rows, piece_code};
pub use error::{FenEncodeError, SideToMoveError};
pub use side::SideToMove;
