use chess_harness::board::cozy::CozyOracle;
use chess_harness::{Decision, Fen, MoveResolver};
use cozy_chess::Color;
use pretty_assertions::assert_eq;

fn resolver() -> MoveResolver<CozyOracle> {
    MoveResolver::new(CozyOracle::startpos())
}

fn fen(s: &str) -> Fen {
    s.parse().expect("valid fen")
}

#[test]
fn legal_opening_move_flips_side_to_move() {
    let mut r = resolver();
    let res = r.apply(&Fen::startpos(), "e2e4").expect("resolve");
    assert_eq!(res.decision, Decision::Continue);
    let pos = res.position.expect("new position");
    assert_eq!(pos.active_color(), Ok(Color::Black));
    assert!(pos.as_str().starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"), "got {pos}");
    assert!(res.best_reply.is_some(), "engine should have a reply");
}

#[test]
fn every_legal_reply_continues() {
    let start = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    let mut r = resolver();
    for mv in ["e7e5", "g8f6", "b8c6", "d7d5", "a7a6"] {
        let res = r.apply(&start, mv).expect("resolve");
        assert_eq!(res.decision, Decision::Continue, "move {mv}");
        assert_eq!(res.position.unwrap().active_color(), Ok(Color::White), "move {mv}");
    }
}

#[test]
fn illegal_move_is_rejected_every_time() {
    let mut r = resolver();
    for _ in 0..2 {
        let res = r.apply(&Fen::startpos(), "e2e5").expect("resolve");
        assert_eq!(res.decision, Decision::Illegal);
        assert_eq!(res.position, None);
        assert_eq!(res.best_reply, None);
    }
}

#[test]
fn garbage_and_wrong_side_moves_are_illegal() {
    let mut r = resolver();
    for mv in ["zzzz", "", "e7e5", "e1e2", "e2e4e6"] {
        let res = r.apply(&Fen::startpos(), mv).expect("resolve");
        assert_eq!(res.decision, Decision::Illegal, "move {mv:?}");
    }
}

#[test]
fn fools_mate_is_a_black_win() {
    let before = fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
    let res = resolver().apply(&before, "d8h4").expect("resolve");
    assert_eq!(res.decision, Decision::BlackWins);
    assert_eq!(res.best_reply, None);
}

#[test]
fn scholars_mate_is_a_white_win() {
    let before = fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
    let res = resolver().apply(&before, "h5f7").expect("resolve");
    assert_eq!(res.decision, Decision::WhiteWins);
}

#[test]
fn queen_move_that_leaves_no_moves_is_stalemate() {
    let before = fen("k7/8/1K6/8/8/8/8/2Q5 w - - 0 1");
    let res = resolver().apply(&before, "c1c7").expect("resolve");
    assert_eq!(res.decision, Decision::Stalemate);
}

#[test]
fn castling_uses_king_destination_square() {
    let before = fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
    let res = resolver().apply(&before, "e1g1").expect("resolve");
    assert_eq!(res.decision, Decision::Continue);
    let pos = res.position.unwrap();
    assert!(pos.as_str().starts_with("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b kq"), "got {pos}");

    let res = resolver().apply(&before, "e1h1").expect("resolve");
    assert_eq!(res.decision, Decision::Illegal, "rook-square castling is not UCI");
}

#[test]
fn builtin_reply_takes_hanging_queen() {
    let before = fen("k7/8/8/8/8/8/3qQ3/7K b - - 0 1");
    let res = resolver().apply(&before, "a8b8").expect("resolve");
    assert_eq!(res.decision, Decision::Continue);
    assert_eq!(res.best_reply.as_deref(), Some("e2d2"));
}
