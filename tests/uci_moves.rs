use chess_harness::board::cozy::{legal_moves, uci_string, CozyOracle};
use chess_harness::Oracle;
use cozy_chess::Color;

#[test]
fn apply_startpos_moves_sequence() {
    let mut o = CozyOracle::startpos();
    for mv in ["e2e4", "e7e5", "g1f3"] {
        o.make_move_uci(mv).expect("legal move");
    }
    assert_eq!(o.side_to_move(), Color::Black, "expected black to move after 3 plies");
}

#[test]
fn castling_both_sides_round_trips_through_uci() {
    let mut o = CozyOracle::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    o.apply_move("e1c1").expect("white long castle");
    o.apply_move("e8g8").expect("black short castle");
    assert_eq!(o.position().unwrap(), "r4rk1/8/8/8/8/8/8/2KR3R w - - 2 2");
}

#[test]
fn promotion_keeps_piece_suffix() {
    let mut o = CozyOracle::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let moves: Vec<String> = legal_moves(o.board())
        .into_iter()
        .map(|m| uci_string(o.board(), m))
        .collect();
    assert!(moves.contains(&"a7a8q".to_string()), "{moves:?}");
    assert!(moves.contains(&"a7a8n".to_string()), "{moves:?}");
    o.apply_move("a7a8n").expect("underpromotion");
    assert!(o.legal_moves_count() > 0);
}
