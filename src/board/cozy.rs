use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Rank, Square};
use log::debug;

use crate::board::material::{is_checkmate, material_cp_white, score_after_move};
use crate::oracle::{Evaluation, Oracle, OracleError};

/// In-process oracle backed by cozy-chess move generation.
///
/// Picks mates when it sees them and otherwise grabs material one ply deep.
/// It exists so the harness can run without an engine binary, not to play well.
#[derive(Clone, Debug)]
pub struct CozyOracle {
    board: CozyBoard,
}

impl Default for CozyOracle {
    fn default() -> Self {
        Self::startpos()
    }
}

impl CozyOracle {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, OracleError> {
        let full = complete_fen(fen);
        CozyBoard::from_fen(&full, false)
            .map(|board| Self { board })
            .map_err(|e| OracleError::InvalidPosition { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &CozyBoard {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn legal_moves_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|moves| {
            ct += moves.len();
            false
        });
        ct
    }

    pub fn make_move_uci(&mut self, mv_uci: &str) -> Result<(), OracleError> {
        match find_move_uci(&self.board, mv_uci) {
            Some(m) => {
                self.board.play(m);
                Ok(())
            }
            None => Err(OracleError::Rejected { mv: mv_uci.to_string(), reason: "not a legal move".to_string() }),
        }
    }

    fn pick_move(&self) -> Option<Move> {
        let mover = self.board.side_to_move();
        let mut best: Option<(i32, Move)> = None;
        for m in legal_moves(&self.board) {
            let mut child = self.board.clone();
            child.play(m);
            let score = score_after_move(&child, mover);
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, m));
            }
        }
        best.map(|(_, m)| m)
    }
}

impl Oracle for CozyOracle {
    fn set_position(&mut self, fen: &str) -> Result<(), OracleError> {
        *self = Self::from_fen(fen)?;
        Ok(())
    }

    fn apply_move(&mut self, mv: &str) -> Result<(), OracleError> {
        self.make_move_uci(mv)
    }

    fn position(&mut self) -> Result<String, OracleError> {
        Ok(self.board.to_string())
    }

    fn best_move(&mut self) -> Result<Option<String>, OracleError> {
        let mv = self.pick_move().map(|m| uci_string(&self.board, m));
        debug!("builtin oracle best move: {mv:?}");
        Ok(mv)
    }

    fn evaluation(&mut self) -> Result<Evaluation, OracleError> {
        if is_checkmate(&self.board) {
            return Ok(Evaluation::Mate(0));
        }
        Ok(Evaluation::Centipawns(material_cp_white(&self.board)))
    }
}

pub fn legal_moves(board: &CozyBoard) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|ml| {
        moves.extend(ml);
        false
    });
    moves
}

/// UCI text for `m`. cozy-chess encodes castling as king-takes-rook; UCI
/// wants the king's destination square instead (`e1g1`, not `e1h1`).
pub fn uci_string(board: &CozyBoard, m: Move) -> String {
    let castles = board.piece_on(m.from) == Some(Piece::King) && board.color_on(m.to) == Some(board.side_to_move());
    if castles {
        let file = if (m.to.file() as usize) > (m.from.file() as usize) { File::G } else { File::C };
        return format!("{}{}", m.from, Square::new(file, m.from.rank()));
    }
    m.to_string()
}

pub fn find_move_uci(board: &CozyBoard, uci: &str) -> Option<Move> {
    let mut found = None;
    board.generate_moves(|moves| {
        for m in moves {
            if uci_string(board, m) == uci {
                found = Some(m);
                break;
            }
        }
        found.is_some()
    });
    found
}

/// Fill in defaults for FEN fields after the active color, which cozy-chess
/// requires but a stored position may omit.
fn complete_fen(fen: &str) -> String {
    const DEFAULTS: [&str; 6] = ["", "w", "-", "-", "0", "1"];
    let mut fields: Vec<&str> = fen.split_whitespace().collect();
    for d in DEFAULTS.iter().skip(fields.len()) {
        fields.push(*d);
    }
    fields.join(" ")
}

/// Plain-text board diagram, white at the bottom.
pub fn render(board: &CozyBoard) -> String {
    let sep = " +---+---+---+---+---+---+---+---+\n";
    let mut out = String::from(sep);
    for &rank in Rank::ALL.iter().rev() {
        for &file in File::ALL.iter() {
            let sq = Square::new(file, rank);
            let c = match (board.piece_on(sq), board.color_on(sq)) {
                (Some(p), Some(color)) => piece_char(p, color),
                _ => ' ',
            };
            out.push_str(" | ");
            out.push(c);
        }
        out.push_str(&format!(" | {}\n", rank as usize + 1));
        out.push_str(sep);
    }
    out.push_str("   a   b   c   d   e   f   g   h\n");
    out
}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    if color == Color::White { c.to_ascii_uppercase() } else { c }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_short_fen() {
        assert_eq!(complete_fen("8/8/8/8/8/8/8/K6k b"), "8/8/8/8/8/8/8/K6k b - - 0 1");
        let full = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(complete_fen(full), full);
    }

    #[test]
    fn render_startpos_rows() {
        let text = render(&CozyBoard::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], " | r | n | b | q | k | b | n | r | 8");
        assert_eq!(lines[15], " | R | N | B | Q | K | B | N | R | 1");
        assert_eq!(lines.last().copied(), Some("   a   b   c   d   e   f   g   h"));
    }

    #[test]
    fn evaluation_reports_mate_for_mated_side() {
        // Fool's mate, white to move and mated
        let mut o = CozyOracle::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(o.evaluation().unwrap(), Evaluation::Mate(0));
        assert_eq!(o.best_move().unwrap(), None);
    }
}
