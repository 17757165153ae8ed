//! Square assignment: place each detected piece on the board square whose
//! center lies closest to the piece's bounding-box center.
//!
//! ## Quickstart
//!
//! ```
//! use snapfen_assign::{PieceDetection, SquareAssigner, AssignParams};
//! use snapfen_core::{BoundingBox, SquareCenters, SquareCoords};
//! use nalgebra::Point2;
//!
//! let centers = SquareCenters::regular(8, 8, Point2::new(50.0, 50.0), 100.0);
//! let king = PieceDetection::new(BoundingBox::new(420.0, 480.0, 20.0, 80.0), "WhiteKing");
//!
//! let assignment = SquareAssigner::new(AssignParams::default())
//!     .assign(&centers, &[king])
//!     .unwrap();
//! assert_eq!(
//!     assignment.board.get(SquareCoords::from_name("E8").unwrap()),
//!     Some("WhiteKing")
//! );
//! ```
//!
//! Algorithm, per detection (in input order):
//! 1. Take the bounding-box center.
//! 2. Scan all square centers row-major and keep the first strict minimum of
//!    the Euclidean distance.
//! 3. Apply the [`ClampPolicy`] to indices that fall outside the 8×8 board.
//! 4. Write the label into the grid. An occupied square is overwritten (last
//!    write wins) and the overwrite is recorded in [`Assignment::overwrites`].

mod assigner;
mod detection;
mod error;
mod params;

pub use assigner::{nearest_square, Assignment, Overwrite, Placement, SquareAssigner};
pub use detection::{DetectionField, PieceDetection, RawDetection};
pub use error::AssignError;
pub use params::{AssignParams, ClampPolicy};
