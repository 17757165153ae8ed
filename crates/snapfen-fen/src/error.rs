use snapfen_core::{GridError, PieceLabelError};

/// Errors returned by the FEN encoder.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenEncodeError {
    #[error("unknown piece label {label:?} at {square}")]
    UnknownPieceLabel {
        label: String,
        /// Algebraic square name, e.g. `"E4"`.
        square: String,
        #[source]
        source: PieceLabelError,
    },
    #[error("malformed board grid: {0}")]
    MalformedGrid(#[from] GridError),
}

/// Side-to-move value that is neither white nor black.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("side to move must be `white` or `black`, got {0:?}")]
pub struct SideToMoveError(pub String);
