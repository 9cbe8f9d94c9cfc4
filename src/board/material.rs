//! Scoring used by the built-in oracle to pick its replies.

use cozy_chess::{Board, Color, Piece};

use crate::board::cozy::legal_moves;

/// Larger than any material swing, so a mating move always ranks first.
pub const MATE_SCORE: i32 = 30_000;

fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight | Piece::Bishop => 300,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 0,
    }
}

/// Material balance in centipawns; positive favours White.
pub fn material_cp_white(board: &Board) -> i32 {
    Piece::ALL
        .iter()
        .map(|&piece| {
            let white = (board.colors(Color::White) & board.pieces(piece)).into_iter().count() as i32;
            let black = (board.colors(Color::Black) & board.pieces(piece)).into_iter().count() as i32;
            (white - black) * piece_value(piece)
        })
        .sum()
}

pub fn is_checkmate(board: &Board) -> bool {
    !board.checkers().is_empty() && legal_moves(board).is_empty()
}

/// How good `after` (the board once `mover` has moved) is for `mover`.
pub fn score_after_move(after: &Board, mover: Color) -> i32 {
    if is_checkmate(after) {
        return MATE_SCORE;
    }
    let cp = material_cp_white(after);
    if mover == Color::White { cp } else { -cp }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen, false).expect("valid fen")
    }

    #[test]
    fn startpos_is_level() {
        assert_eq!(material_cp_white(&Board::default()), 0);
    }

    #[test]
    fn minor_pieces_weigh_the_same() {
        let b = board("k7/8/8/8/8/8/3bN3/7K w - - 0 1");
        assert_eq!(material_cp_white(&b), 0);
    }

    #[test]
    fn capture_scores_for_the_side_that_moved() {
        let b = board("k7/8/8/8/8/8/4Q3/7K b - - 0 1");
        assert_eq!(score_after_move(&b, Color::White), 900);
        assert_eq!(score_after_move(&b, Color::Black), -900);
    }

    #[test]
    fn mate_outranks_material() {
        // Fool's mate: black has just played Qh4#
        let b = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_checkmate(&b));
        assert_eq!(score_after_move(&b, Color::Black), MATE_SCORE);
    }
}
