use serde::{Deserialize, Serialize};

/// What to do when the nearest square center has a grid index past the board.
///
/// This happens when the board detector reports more than 8 rows or columns of
/// centers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Clamp the index into `[0, 7]` silently (debug log only).
    #[default]
    Clamp,
    /// Clamp, and log a warning.
    Warn,
    /// Fail with [`AssignError::OffBoard`](crate::AssignError::OffBoard).
    Reject,
}

/// Configuration for [`SquareAssigner`](crate::SquareAssigner).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignParams {
    #[serde(default)]
    pub clamp: ClampPolicy,
    /// Reject detections whose nearest square center is farther than this (pixels).
    ///
    /// `None` accepts every detection regardless of distance.
    #[serde(default)]
    pub max_distance: Option<f32>,
}

impl AssignParams {
    pub fn with_clamp(mut self, clamp: ClampPolicy) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = Some(max_distance);
        self
    }
}
