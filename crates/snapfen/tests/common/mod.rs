#![allow(dead_code)]

use serde_json::{json, Value};

pub const PITCH: f32 = 100.0;

/// `[xs, ys]` for an axis-aligned board with 100px squares; square `(i, j)` is
/// centered at `(50 + 100 * j, 50 + 100 * i)`.
pub fn square_grids(rows: usize, cols: usize) -> Value {
    let xs: Vec<Vec<f32>> = (0..rows)
        .map(|_| (0..cols).map(|j| 50.0 + PITCH * j as f32).collect())
        .collect();
    let ys: Vec<Vec<f32>> = (0..rows)
        .map(|i| vec![50.0 + PITCH * i as f32; cols])
        .collect();
    json!([xs, ys])
}

/// Detection object standing on square `(row, col)`.
pub fn piece(row: usize, col: usize, label: &str) -> Value {
    let cx = 50.0 + PITCH * col as f32;
    let cy = 50.0 + PITCH * row as f32;
    json!({
        "left": cx - 25.0,
        "right": cx + 25.0,
        "top": cy - 45.0,
        "bottom": cy + 25.0,
        "label": label,
        "confidence": 0.93
    })
}

pub fn payload(pieces: Vec<Value>) -> Value {
    json!({ "squares": square_grids(8, 8), "pieces": pieces })
}

pub fn start_position() -> Vec<Value> {
    let back = ["Rook", "Knight", "Bishop", "Queen", "King", "Bishop", "Knight", "Rook"];
    let mut out = Vec::new();
    for (col, kind) in back.iter().enumerate() {
        out.push(piece(0, col, &format!("Black{kind}")));
        out.push(piece(1, col, "BlackPawn"));
        out.push(piece(6, col, "WhitePawn"));
        out.push(piece(7, col, &format!("White{kind}")));
    }
    out
}
