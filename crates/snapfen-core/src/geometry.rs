use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::board::GridError;

/// Axis-aligned pixel rectangle around a detected piece.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Midpoint of `left`/`right` and `top`/`bottom`.
    ///
    /// Summed in `f64`, so finite edges always give a finite center.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        let mid = |a: f32, b: f32| ((f64::from(a) + f64::from(b)) * 0.5) as f32;
        Point2::new(mid(self.left, self.right), mid(self.top, self.bottom))
    }

}

/// Pixel-space centers of the board squares, indexed by grid `(row, col)`.
///
/// The upstream board detector is expected to report an 8×8 grid, but any
/// non-empty rectangular grid is accepted here; indices past the board are the
/// assigner's business (see its clamp policy).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SquareCenters {
    rows: usize,
    cols: usize,
    /// Row-major, `len = rows * cols`.
    points: Vec<Point2<f32>>,
}

impl SquareCenters {
    /// Build from two parallel grids `xs[i][j]`, `ys[i][j]`.
    pub fn from_grids<R: AsRef<[f32]>>(xs: &[R], ys: &[R]) -> Result<Self, GridError> {
        let (rows, cols) = rect_shape(xs)?;
        let (ys_rows, ys_cols) = rect_shape(ys)?;
        if (rows, cols) != (ys_rows, ys_cols) {
            return Err(GridError::ShapeMismatch {
                xs_rows: rows,
                xs_cols: cols,
                ys_rows,
                ys_cols,
            });
        }

        let mut points = Vec::with_capacity(rows * cols);
        for (row, (xr, yr)) in xs.iter().zip(ys).enumerate() {
            for (col, (&x, &y)) in xr.as_ref().iter().zip(yr.as_ref()).enumerate() {
                if !x.is_finite() || !y.is_finite() {
                    return Err(GridError::NonFinite { row, col });
                }
                points.push(Point2::new(x, y));
            }
        }

        Ok(Self { rows, cols, points })
    }

    /// Build a regular, axis-aligned grid: square `(i, j)` is centered at
    /// `origin + (j * pitch, i * pitch)`.
    pub fn regular(rows: usize, cols: usize, origin: Point2<f32>, pitch: f32) -> Self {
        let points = (0..rows)
            .flat_map(|i| {
                (0..cols).map(move |j| {
                    Point2::new(origin.x + j as f32 * pitch, origin.y + i as f32 * pitch)
                })
            })
            .collect();
        Self { rows, cols, points }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Center of square `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Point2<f32>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.points.get(row * self.cols + col).copied()
    }

    /// `((row, col), center)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Point2<f32>)> + '_ {
        let cols = self.cols;
        self.points
            .iter()
            .enumerate()
            .map(move |(idx, &p)| ((idx / cols, idx % cols), p))
    }
}

fn rect_shape<R: AsRef<[f32]>>(grid: &[R]) -> Result<(usize, usize), GridError> {
    let rows = grid.len();
    let cols = grid.first().map(|r| r.as_ref().len()).unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(GridError::Empty);
    }
    for (row, r) in grid.iter().enumerate() {
        let found = r.as_ref().len();
        if found != cols {
            return Err(GridError::ColumnCount {
                row,
                expected: cols,
                found,
            });
        }
    }
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bbox_center_is_midpoint() {
        let b = BoundingBox::new(10.0, 30.0, 100.0, 140.0);
        let c = b.center();
        assert_relative_eq!(c.x, 20.0);
        assert_relative_eq!(c.y, 120.0);
    }

    #[test]
    fn bbox_center_does_not_overflow_near_f32_max() {
        let b = BoundingBox::new(3.0e38, 3.2e38, -3.0e38, -3.2e38);
        let c = b.center();
        assert!(c.x.is_finite() && c.y.is_finite());
        assert_relative_eq!(c.x, 3.1e38, max_relative = 1e-6);
        assert_relative_eq!(c.y, -3.1e38, max_relative = 1e-6);
    }

    #[test]
    fn from_grids_is_row_major() {
        let xs: Vec<Vec<f32>> = vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]];
        let ys: Vec<Vec<f32>> = vec![vec![5.0, 5.0, 5.0], vec![6.0, 6.0, 6.0]];
        let c = SquareCenters::from_grids(&xs, &ys).expect("centers");
        assert_eq!((c.rows(), c.cols()), (2, 3));
        assert_eq!(c.get(1, 2), Some(Point2::new(2.0, 6.0)));
        assert_eq!(c.get(2, 0), None);
        let order: Vec<_> = c.iter().map(|(rc, _)| rc).collect();
        assert_eq!(order[..4], [(0, 0), (0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn from_grids_rejects_bad_shapes() {
        let empty: Vec<Vec<f32>> = Vec::new();
        assert_eq!(
            SquareCenters::from_grids(&empty, &empty),
            Err(GridError::Empty)
        );

        let xs: Vec<Vec<f32>> = vec![vec![0.0, 1.0], vec![0.0]];
        let ys: Vec<Vec<f32>> = vec![vec![0.0, 1.0], vec![0.0, 1.0]];
        assert!(matches!(
            SquareCenters::from_grids(&xs, &ys),
            Err(GridError::ColumnCount { row: 1, .. })
        ));

        let xs: Vec<Vec<f32>> = vec![vec![0.0, 1.0]];
        assert!(matches!(
            SquareCenters::from_grids(&xs, &ys),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn from_grids_rejects_non_finite() {
        let xs: Vec<Vec<f32>> = vec![vec![0.0, f32::NAN]];
        let ys: Vec<Vec<f32>> = vec![vec![0.0, 0.0]];
        assert_eq!(
            SquareCenters::from_grids(&xs, &ys),
            Err(GridError::NonFinite { row: 0, col: 1 })
        );
    }

    #[test]
    fn regular_grid_spacing() {
        let c = SquareCenters::regular(8, 8, Point2::new(50.0, 50.0), 100.0);
        assert_eq!(c.get(0, 0), Some(Point2::new(50.0, 50.0)));
        assert_eq!(c.get(7, 4), Some(Point2::new(450.0, 750.0)));
    }
}
