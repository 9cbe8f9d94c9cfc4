use anyhow::{Context, Result};
use chess_harness::board::cozy::{render, CozyOracle};
use chess_harness::game::{play_round_observed, RoundObserver};
use chess_harness::uci::StockfishOracle;
use chess_harness::{EngineSettings, Fen, HarnessConfig, MoveResolver, Oracle, PositionStore};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OracleKind {
    /// External UCI engine binary (Stockfish)
    Stockfish,
    /// In-process cozy-chess player, no engine binary needed
    Builtin,
}

#[derive(Parser, Debug)]
#[command(name = "chess-move", version, about = "Play one move against Stockfish; the engine answers as black")]
struct Args {
    /// Your move in UCI notation (e.g. e2e4)
    #[arg(required_unless_present = "new_game")]
    mv: Option<String>,

    /// Game root holding chess_game/ and stockfish/ (defaults to $ROOT_PATH)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Engine executable (defaults to <root>/stockfish/stockfish)
    #[arg(long)]
    engine_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OracleKind::Stockfish)]
    oracle: OracleKind,

    /// Search depth per engine query
    #[arg(long, default_value_t = 15)]
    depth: u32,

    #[arg(long, default_value_t = 1)]
    threads: u32,

    #[arg(long, default_value_t = 16)]
    hash_mb: u32,

    /// Engine skill level, 0-20
    #[arg(long)]
    skill_level: Option<u8>,

    /// Print the board after each applied move
    #[arg(long)]
    board: bool,

    /// Print the round outcome as JSON
    #[arg(long)]
    json: bool,

    /// Reset the stored position instead of playing a move
    #[arg(long, conflicts_with = "mv")]
    new_game: bool,

    /// Starting position for --new-game
    #[arg(long, requires = "new_game")]
    fen: Option<String>,
}

struct BoardPrinter;

impl RoundObserver for BoardPrinter {
    fn position_reached(&mut self, mover: &str, mv: &str, position: &Fen) {
        match CozyOracle::from_fen(position.as_str()) {
            Ok(o) => println!("{mover} played {mv}:\n{}", render(o.board())),
            Err(e) => warn!("cannot draw {position}: {e}"),
        }
    }
}

fn load_config(args: &Args) -> Result<HarnessConfig> {
    let mut cfg = match &args.root {
        Some(root) => HarnessConfig::from_root(root),
        None => HarnessConfig::from_env()?,
    };
    if let Some(path) = &args.engine_path {
        cfg = cfg.with_engine_path(path);
    }
    Ok(cfg.with_engine_settings(EngineSettings {
        depth: args.depth,
        threads: args.threads,
        hash_mb: args.hash_mb,
        skill_level: args.skill_level,
    }))
}

fn open_oracle(kind: OracleKind, cfg: &HarnessConfig) -> Result<Box<dyn Oracle>> {
    Ok(match kind {
        OracleKind::Stockfish => Box::new(StockfishOracle::spawn(&cfg.engine_path, cfg.engine.clone())?),
        OracleKind::Builtin => Box::new(CozyOracle::startpos()),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = load_config(&args)?;
    let store = PositionStore::new(&cfg);

    if args.new_game {
        let fen = match &args.fen {
            Some(f) => f.parse::<Fen>().context("invalid --fen")?,
            None => Fen::startpos(),
        };
        store.reset(&fen)?;
        info!("new game stored at {}", store.path().display());
        println!("new game: {fen}");
        return Ok(());
    }

    let mv = args.mv.as_deref().context("a move is required")?;
    let mut resolver = MoveResolver::new(open_oracle(args.oracle, &cfg)?);
    let outcome = if args.board {
        play_round_observed(&store, &mut resolver, mv, &mut BoardPrinter)?
    } else {
        play_round_observed(&store, &mut resolver, mv, &mut ())?
    };

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{outcome}");
    }
    Ok(())
}
