use snapfen_core::GridError;

use crate::detection::DetectionField;

/// Errors returned by the square assigner.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AssignError {
    #[error("detection #{index}: missing or invalid `{field}`")]
    MalformedDetection { index: usize, field: DetectionField },
    #[error("square centers: {0}")]
    MalformedGrid(#[from] GridError),
    #[error("detection #{index}: nearest square index ({row}, {col}) lies off the 8x8 board")]
    OffBoard { index: usize, row: usize, col: usize },
    #[error("detection #{index}: nearest square is {distance:.1}px away (limit {limit:.1}px)")]
    TooFar {
        index: usize,
        distance: f64,
        limit: f32,
    },
}
