use log::{debug, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use snapfen_core::{BoardGrid, GridError, SquareCenters, SquareCoords, BOARD_SIZE};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{AssignError, AssignParams, ClampPolicy, DetectionField, PieceDetection, RawDetection};

/// Where one detection ended up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Position of the detection in the input sequence.
    pub index: usize,
    pub label: String,
    /// Board square after clamping.
    pub square: SquareCoords,
    /// Raw `(row, col)` of the nearest square center, before clamping.
    pub grid_index: [usize; 2],
    /// Pixel distance from the bounding-box center to the chosen square center.
    pub distance: f64,
    pub clamped: bool,
}

/// A detection that replaced an earlier one on the same square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overwrite {
    pub square: SquareCoords,
    /// Index and label of the detection that was replaced.
    pub previous_index: usize,
    pub previous: String,
    /// Index and label of the detection that now occupies the square.
    pub replaced_by_index: usize,
    pub replaced_by: String,
}

/// Output of a square assignment run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub board: BoardGrid,
    /// One entry per input detection, in input order.
    pub placements: Vec<Placement>,
    /// Collisions resolved by last-write-wins, in the order they happened.
    pub overwrites: Vec<Overwrite>,
}

/// Find the square center closest to `point`.
///
/// Scans row-major and keeps the first strict minimum, so ties go to the
/// lowest `(row, col)`. Distances are computed in `f64`. Returns `None` when
/// no square center is at a finite distance (empty grid, non-finite point).
pub fn nearest_square(
    centers: &SquareCenters,
    point: Point2<f32>,
) -> Option<((usize, usize), f64)> {
    let point = point.cast::<f64>();
    let mut best: Option<((usize, usize), f64)> = None;
    for (rc, center) in centers.iter() {
        let d = nalgebra::distance(&point, &center.cast::<f64>());
        if d.is_finite() && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((rc, d));
        }
    }
    best
}

/// Places piece detections on the 8×8 board.
#[derive(Clone, Debug, Default)]
pub struct SquareAssigner {
    params: AssignParams,
}

impl SquareAssigner {
    pub fn new(params: AssignParams) -> Self {
        Self { params }
    }

    /// Validate raw payload detections, then assign them.
    ///
    /// Validation covers every detection before any is placed, so a malformed
    /// entry never yields a partial board.
    pub fn assign_raw(
        &self,
        centers: &SquareCenters,
        detections: &[RawDetection],
    ) -> Result<Assignment, AssignError> {
        let validated = detections
            .iter()
            .enumerate()
            .map(|(index, raw)| raw.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        self.assign(centers, &validated)
    }

    /// Assign each detection to its nearest square, in input order.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, centers, detections),
            fields(detections = detections.len(), rows = centers.rows(), cols = centers.cols())
        )
    )]
    pub fn assign(
        &self,
        centers: &SquareCenters,
        detections: &[PieceDetection],
    ) -> Result<Assignment, AssignError> {
        let mut out = Assignment {
            placements: Vec::with_capacity(detections.len()),
            ..Assignment::default()
        };
        // detection index currently occupying each square
        let mut owner = [[None::<usize>; BOARD_SIZE]; BOARD_SIZE];

        for (index, det) in detections.iter().enumerate() {
            let placement = self.place(centers, index, det)?;
            let sq = placement.square;

            debug!(
                "#{index} {} -> {} (grid {:?}, {:.1}px)",
                det.label, sq, placement.grid_index, placement.distance
            );

            if let Some(previous) = out.board.set(sq, det.label.clone()) {
                let previous_index = owner[sq.row][sq.col].unwrap_or(index);
                debug!(
                    "{sq}: {previous} (#{previous_index}) replaced by {} (#{index})",
                    det.label
                );
                out.overwrites.push(Overwrite {
                    square: sq,
                    previous_index,
                    previous,
                    replaced_by_index: index,
                    replaced_by: det.label.clone(),
                });
            }
            owner[sq.row][sq.col] = Some(index);
            out.placements.push(placement);
        }

        Ok(out)
    }

    fn place(
        &self,
        centers: &SquareCenters,
        index: usize,
        det: &PieceDetection,
    ) -> Result<Placement, AssignError> {
        let edges = [
            (det.bbox.left, DetectionField::Left),
            (det.bbox.right, DetectionField::Right),
            (det.bbox.top, DetectionField::Top),
            (det.bbox.bottom, DetectionField::Bottom),
        ];
        if let Some(&(_, field)) = edges.iter().find(|(v, _)| !v.is_finite()) {
            return Err(AssignError::MalformedDetection { index, field });
        }

        // finite center and a validated, non-empty grid
        let ((row, col), distance) = nearest_square(centers, det.bbox.center())
            .ok_or(AssignError::MalformedGrid(GridError::Empty))?;

        if let Some(limit) = self.params.max_distance {
            if distance > f64::from(limit) {
                return Err(AssignError::TooFar {
                    index,
                    distance,
                    limit,
                });
            }
        }

        let square = SquareCoords::clamped(row, col);
        let clamped = (square.row, square.col) != (row, col);
        if clamped {
            match self.params.clamp {
                ClampPolicy::Clamp => {
                    debug!("#{index}: grid index ({row}, {col}) clamped to {square}")
                }
                ClampPolicy::Warn => warn!(
                    "#{index}: grid index ({row}, {col}) is off the board, clamped to {square}"
                ),
                ClampPolicy::Reject => return Err(AssignError::OffBoard { index, row, col }),
            }
        }

        Ok(Placement {
            index,
            label: det.label.clone(),
            square,
            grid_index: [row, col],
            distance,
            clamped,
        })
    }
}
