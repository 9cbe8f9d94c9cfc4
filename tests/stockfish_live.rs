// Runs against a real engine only when STOCKFISH_PATH points at one.
use std::path::PathBuf;

use chess_harness::uci::StockfishOracle;
use chess_harness::{Decision, EngineSettings, Fen, MoveResolver};

fn engine() -> Option<MoveResolver<StockfishOracle>> {
    let path = match std::env::var("STOCKFISH_PATH") {
        Ok(p) => PathBuf::from(p),
        Err(_) => {
            eprintln!("[skip] STOCKFISH_PATH not set");
            return None;
        }
    };
    let settings = EngineSettings { depth: 6, ..EngineSettings::default() };
    Some(MoveResolver::new(StockfishOracle::spawn(&path, settings).expect("spawn engine")))
}

#[test]
fn stockfish_scenarios() {
    let Some(mut r) = engine() else { return };

    let res = r.apply(&Fen::startpos(), "e2e4").expect("resolve");
    assert_eq!(res.decision, Decision::Continue);
    assert!(res.position.unwrap().as_str().contains(" b "));

    let res = r.apply(&Fen::startpos(), "e2e5").expect("resolve");
    assert_eq!(res.decision, Decision::Illegal);

    let fools = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2".parse().unwrap();
    assert_eq!(r.apply(&fools, "d8h4").expect("resolve").decision, Decision::BlackWins);

    let stale = "k7/8/1K6/8/8/8/8/2Q5 w - - 0 1".parse().unwrap();
    assert_eq!(r.apply(&stale, "c1c7").expect("resolve").decision, Decision::Stalemate);
}
