//! The assigner's grid convention and the encoder's traversal order must agree:
//! a piece detected on square `E8` has to show up on e8 in the FEN.

use nalgebra::Point2;
use snapfen_assign::{PieceDetection, SquareAssigner};
use snapfen_core::{BoundingBox, SquareCenters, SquareCoords};
use snapfen_fen::{encode, SideToMove};

fn centers() -> SquareCenters {
    SquareCenters::regular(8, 8, Point2::new(40.0, 40.0), 80.0)
}

fn detection_on(centers: &SquareCenters, sq: SquareCoords, label: &str) -> PieceDetection {
    let c = centers.get(sq.row, sq.col).expect("center");
    PieceDetection::new(
        BoundingBox::new(c.x - 15.0, c.x + 15.0, c.y - 25.0, c.y + 15.0),
        label,
    )
}

/// Expand a FEN placement field into `(algebraic square, piece char)` pairs.
fn squares_in_fen(placement: &str) -> Vec<(String, char)> {
    let mut out = Vec::new();
    for (rank_idx, segment) in placement.split('/').enumerate() {
        let rank = char::from(b'8' - rank_idx as u8);
        let mut file = 0u8;
        for c in segment.chars() {
            match c.to_digit(10) {
                Some(n) => file += n as u8,
                None => {
                    out.push((format!("{}{}", char::from(b'A' + file), rank), c));
                    file += 1;
                }
            }
        }
        assert_eq!(file, 8, "segment {segment:?} does not span 8 files");
    }
    out
}

#[test]
fn every_square_round_trips_through_assign_and_encode() {
    let centers = centers();
    let assigner = SquareAssigner::default();
    for sq in SquareCoords::all() {
        let det = detection_on(&centers, sq, "WhiteKnight");
        let assignment = assigner.assign(&centers, &[det]).expect("assign");
        let fen = encode(&assignment.board, SideToMove::White).expect("encode");
        let (placement, side) = fen.split_once(' ').expect("space");
        assert_eq!(side, "w");
        assert_eq!(squares_in_fen(placement), vec![(sq.name(), 'N')], "{fen}");
    }
}

#[test]
fn white_king_nearest_to_row0_col4_is_4k3() {
    let centers = centers();
    let sq = SquareCoords::new(0, 4).unwrap();
    let assignment = SquareAssigner::default()
        .assign(&centers, &[detection_on(&centers, sq, "WhiteKing")])
        .unwrap();
    let fen = encode(&assignment.board, SideToMove::White).unwrap();
    assert_eq!(fen.split('/').next(), Some("4K3"));
}

#[test]
fn black_queen_nearest_to_row7_col0_leads_last_segment() {
    let centers = centers();
    let sq = SquareCoords::new(7, 0).unwrap();
    let assignment = SquareAssigner::default()
        .assign(&centers, &[detection_on(&centers, sq, "BlackQueen")])
        .unwrap();
    let fen = encode(&assignment.board, SideToMove::Black).unwrap();
    assert_eq!(fen, "8/8/8/8/8/8/8/q7 b");
}

#[test]
fn collision_keeps_the_later_detection() {
    let centers = centers();
    let sq = SquareCoords::from_name("C2").unwrap();
    let dets = [
        detection_on(&centers, sq, "WhiteBishop"),
        detection_on(&centers, sq, "BlackRook"),
    ];
    let assignment = SquareAssigner::default().assign(&centers, &dets).unwrap();
    assert_eq!(assignment.overwrites.len(), 1);
    let fen = encode(&assignment.board, SideToMove::White).unwrap();
    assert_eq!(fen, "8/8/8/8/8/8/2r5/8 w");
}
