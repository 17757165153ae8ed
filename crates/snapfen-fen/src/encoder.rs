use log::debug;
use snapfen_core::{BoardGrid, GridError, PieceLabel, PieceLabelError, SquareCoords, BOARD_SIZE};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{FenEncodeError, SideToMove};

/// FEN letter for a detector label (`"WhiteKnight"` -> `'N'`, `"BlackPawn"` -> `'p'`).
pub fn piece_code(label: &str) -> Result<char, PieceLabelError> {
    label.parse::<PieceLabel>().map(PieceLabel::fen_char)
}

/// Encode one board row (rank) into `out`.
fn push_rank<'a>(
    out: &mut String,
    row: usize,
    cells: impl IntoIterator<Item = Option<&'a str>>,
) -> Result<(), FenEncodeError> {
    let mut empty = 0u8;
    for (col, cell) in cells.into_iter().enumerate() {
        let Some(label) = cell else {
            empty += 1;
            continue;
        };
        let code = piece_code(label).map_err(|source| FenEncodeError::UnknownPieceLabel {
            label: label.to_owned(),
            square: SquareCoords::clamped(row, col).name(),
            source,
        })?;
        if empty > 0 {
            out.push(char::from(b'0' + empty));
            empty = 0;
        }
        out.push(code);
    }
    if empty > 0 {
        out.push(char::from(b'0' + empty));
    }
    Ok(())
}

fn cell_str<S: AsRef<str>>(cell: &Option<S>) -> Option<&str> {
    cell.as_ref().map(|s| s.as_ref())
}

fn encode_ranks<'a, I, R>(ranks: I) -> Result<String, FenEncodeError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = Option<&'a str>>,
{
    // 8 ranks of at most 8 chars plus 7 separators
    let mut out = String::with_capacity(BOARD_SIZE * BOARD_SIZE + BOARD_SIZE - 1);
    for (row, cells) in ranks.into_iter().enumerate() {
        if row > 0 {
            out.push('/');
        }
        push_rank(&mut out, row, cells)?;
    }
    Ok(out)
}

/// FEN piece-placement field of `board`: row 0 (rank 8) first, column 0
/// (file A) first within each row, runs of empty squares as digits.
pub fn encode_placement(board: &BoardGrid) -> Result<String, FenEncodeError> {
    encode_ranks(
        board
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_deref())),
    )
}

/// Placement field followed by a space and the side-to-move character.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(board), fields(pieces = board.piece_count()))
)]
pub fn encode(board: &BoardGrid, side: SideToMove) -> Result<String, FenEncodeError> {
    let mut fen = encode_placement(board)?;
    fen.push(' ');
    fen.push(side.fen_char());
    debug!("encoded {} pieces: {fen}", board.piece_count());
    Ok(fen)
}

/// Like [`encode`], for a board given as plain nested rows.
///
/// The rows must form an 8×8 grid, otherwise `MalformedGrid` is returned.
pub fn encode_rows<S: AsRef<str>>(
    rows: &[Vec<Option<S>>],
    side: SideToMove,
) -> Result<String, FenEncodeError> {
    if rows.len() != BOARD_SIZE {
        return Err(GridError::RowCount {
            expected: BOARD_SIZE,
            found: rows.len(),
        }
        .into());
    }
    if let Some((row, cells)) = rows
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != BOARD_SIZE)
    {
        return Err(GridError::ColumnCount {
            row,
            expected: BOARD_SIZE,
            found: cells.len(),
        }
        .into());
    }

    let mut fen = encode_ranks(rows.iter().map(|row| row.iter().map(cell_str)))?;
    fen.push(' ');
    fen.push(side.fen_char());
    Ok(fen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(&str, &str)]) -> BoardGrid {
        let mut board = BoardGrid::new();
        for (sq, label) in pieces {
            board.set(SquareCoords::from_name(sq).unwrap(), *label);
        }
        board
    }

    fn start_board() -> BoardGrid {
        let back = ["Rook", "Knight", "Bishop", "Queen", "King", "Bishop", "Knight", "Rook"];
        let mut board = BoardGrid::new();
        for col in 0..8 {
            board.set(SquareCoords { row: 0, col }, format!("Black{}", back[col]));
            board.set(SquareCoords { row: 1, col }, "BlackPawn");
            board.set(SquareCoords { row: 6, col }, "WhitePawn");
            board.set(SquareCoords { row: 7, col }, format!("White{}", back[col]));
        }
        board
    }

    /// Count squares described by one placement segment.
    fn segment_width(segment: &str) -> u32 {
        segment
            .chars()
            .map(|c| c.to_digit(10).unwrap_or(1))
            .sum()
    }

    #[test]
    fn empty_board_white_to_move() {
        assert_eq!(
            encode(&BoardGrid::new(), SideToMove::White).unwrap(),
            "8/8/8/8/8/8/8/8 w"
        );
    }

    #[test]
    fn start_position() {
        assert_eq!(
            encode(&start_board(), SideToMove::Black).unwrap(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b"
        );
    }

    #[test]
    fn king_on_e8_is_4k3() {
        let fen = encode(&board_with(&[("E8", "WhiteKing")]), SideToMove::White).unwrap();
        assert_eq!(fen, "4K3/8/8/8/8/8/8/8 w");
    }

    #[test]
    fn queen_on_a1_starts_last_rank() {
        let fen = encode(&board_with(&[("A1", "BlackQueen")]), SideToMove::White).unwrap();
        let placement = fen.split(' ').next().unwrap();
        let last = placement.rsplit('/').next().unwrap();
        assert!(last.starts_with('q'), "{fen}");
    }

    #[test]
    fn runs_are_flushed_between_pieces() {
        let board = board_with(&[
            ("B5", "WhitePawn"),
            ("C5", "BlackPawn"),
            ("F5", "WhiteRook"),
            ("H2", "BlackBishop"),
        ]);
        let fen = encode(&board, SideToMove::White).unwrap();
        assert_eq!(fen, "8/8/8/1Pp2R2/8/8/7b/8 w");
    }

    #[test]
    fn every_segment_spans_eight_squares() {
        let board = board_with(&[
            ("A8", "BlackRook"),
            ("D4", "WhiteQueen"),
            ("H4", "WhiteKing"),
            ("C3", "BlackKnight"),
            ("G1", "WhiteBishop"),
        ]);
        let fen = encode(&board, SideToMove::Black).unwrap();
        let (placement, side) = fen.split_once(' ').unwrap();
        assert_eq!(side, "b");
        let segments: Vec<_> = placement.split('/').collect();
        assert_eq!(segments.len(), 8);
        for seg in segments {
            assert_eq!(segment_width(seg), 8, "{seg}");
        }
    }

    #[test]
    fn unknown_label_fails_instead_of_dropping() {
        let board = board_with(&[("C6", "Unicorn")]);
        let err = encode(&board, SideToMove::White).unwrap_err();
        match err {
            FenEncodeError::UnknownPieceLabel { label, square, .. } => {
                assert_eq!(label, "Unicorn");
                assert_eq!(square, "C6");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn encode_rows_checks_shape() {
        let rows: Vec<Vec<Option<&str>>> = vec![vec![None; 8]; 7];
        assert_eq!(
            encode_rows(&rows, SideToMove::White),
            Err(FenEncodeError::MalformedGrid(GridError::RowCount {
                expected: 8,
                found: 7
            }))
        );

        let mut rows: Vec<Vec<Option<&str>>> = vec![vec![None; 8]; 8];
        rows[2].pop();
        assert!(matches!(
            encode_rows(&rows, SideToMove::White),
            Err(FenEncodeError::MalformedGrid(GridError::ColumnCount { row: 2, .. }))
        ));

        rows[2].push(Some("BlackKing"));
        assert_eq!(
            encode_rows(&rows, SideToMove::Black).unwrap(),
            "8/8/7k/8/8/8/8/8 b"
        );
    }

    #[test]
    fn piece_codes() {
        assert_eq!(piece_code("WhitePawn"), Ok('P'));
        assert_eq!(piece_code("BlackKnight"), Ok('n'));
        assert_eq!(piece_code("WhiteBishop"), Ok('B'));
        assert_eq!(piece_code("BlackKing"), Ok('k'));
        assert!(piece_code("GreenKing").is_err());
    }
}
