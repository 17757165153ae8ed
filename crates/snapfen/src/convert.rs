use log::info;
use snapfen_assign::{AssignError, Assignment, SquareAssigner};
use snapfen_fen::{encode, FenEncodeError, SideToMove};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::io::{ConvertConfig, DetectionPayload};

/// Board viewer page that renders the position given in its query string.
pub const DEFAULT_VIEWER_URL: &str = "https://doubtfulcoder.github.io/chess-fen/";

/// Errors produced by the end-to-end conversion.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error(transparent)]
    Assign(#[from] AssignError),
    #[error(transparent)]
    Fen(#[from] FenEncodeError),
}

/// Result of converting one payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    /// Placement field, a space, and `w` or `b`.
    pub fen: String,
    pub side_to_move: SideToMove,
    pub assignment: Assignment,
}

/// Payload -> nearest-square assignment -> FEN.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(payload, config), fields(pieces = payload.pieces.len()))
)]
pub fn convert(
    payload: &DetectionPayload,
    config: &ConvertConfig,
) -> Result<Conversion, ConvertError> {
    let centers = payload.square_centers().map_err(AssignError::from)?;
    let assigner = SquareAssigner::new(config.assign.clone());
    let assignment = assigner.assign_raw(&centers, &payload.pieces)?;
    let fen = encode(&assignment.board, config.side_to_move)?;

    info!(
        "{} detections -> {} pieces ({} overwritten): {fen}",
        payload.pieces.len(),
        assignment.board.piece_count(),
        assignment.overwrites.len()
    );

    Ok(Conversion {
        fen,
        side_to_move: config.side_to_move,
        assignment,
    })
}

/// Convenience overload using default assignment parameters.
pub fn payload_to_fen(
    payload: &DetectionPayload,
    side: SideToMove,
) -> Result<String, ConvertError> {
    let config = ConvertConfig {
        side_to_move: side,
        ..ConvertConfig::default()
    };
    Ok(convert(payload, &config)?.fen)
}

/// URL of the viewer page showing `fen`: `"{base}?{fen}"` with spaces escaped.
pub fn viewer_url(base: &str, fen: &str) -> String {
    format!("{base}?{}", fen.replace(' ', "%20"))
}
