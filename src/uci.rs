use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use cozy_chess::Color;
use log::{debug, info, warn};

use crate::config::EngineSettings;
use crate::fen::{parse_active_color, STARTPOS};
use crate::oracle::{Evaluation, Oracle, OracleError};

/// A UCI engine session over any line-oriented reader/writer pair.
///
/// The engine itself keeps no history: every command re-sends the full
/// position, so `fen` here is the only board state.
pub struct UciOracle<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    fen: String,
    settings: EngineSettings,
}

impl<R: BufRead, W: Write> UciOracle<R, W> {
    /// Run the `uci`/`isready` handshake and apply `settings`.
    pub fn handshake(reader: R, writer: W, settings: EngineSettings) -> Result<Self, OracleError> {
        let mut this = Self { reader, writer, fen: STARTPOS.to_string(), settings };
        this.send("uci")?;
        this.wait_for("uciok")?;
        let threads = this.settings.threads;
        let hash = this.settings.hash_mb;
        this.send(&format!("setoption name Threads value {threads}"))?;
        this.send(&format!("setoption name Hash value {hash}"))?;
        if let Some(level) = this.settings.skill_level {
            this.send(&format!("setoption name Skill Level value {level}"))?;
        }
        this.send("isready")?;
        this.wait_for("readyok")?;
        Ok(this)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn send(&mut self, cmd: &str) -> Result<(), OracleError> {
        debug!(">> {cmd}");
        writeln!(self.writer, "{cmd}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, OracleError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(OracleError::Protocol("engine closed its output".to_string()));
        }
        let line = line.trim().to_string();
        debug!("<< {line}");
        Ok(line)
    }

    fn wait_for(&mut self, token: &str) -> Result<(), OracleError> {
        loop {
            if self.read_line()? == token {
                return Ok(());
            }
        }
    }

    /// `go depth N`, collecting the last reported score until `bestmove`.
    fn search(&mut self) -> Result<SearchReport, OracleError> {
        let fen = self.fen.clone();
        self.send(&format!("position fen {fen}"))?;
        let depth = self.settings.depth;
        self.send(&format!("go depth {depth}"))?;
        let mut score = None;
        loop {
            let line = self.read_line()?;
            if let Some(best) = parse_bestmove(&line) {
                return Ok(SearchReport { bestmove: best, score });
            }
            if let Some(s) = parse_info_score(&line) {
                score = Some(s);
            }
        }
    }
}

struct SearchReport {
    bestmove: Option<String>,
    score: Option<Evaluation>,
}

impl<R: BufRead, W: Write> Oracle for UciOracle<R, W> {
    fn set_position(&mut self, fen: &str) -> Result<(), OracleError> {
        let invalid = |reason: String| OracleError::InvalidPosition { fen: fen.to_string(), reason };
        if fen.trim().chars().any(char::is_control) {
            return Err(invalid("contains control characters".to_string()));
        }
        parse_active_color(fen).map_err(|e| invalid(e.to_string()))?;
        self.fen = fen.trim().to_string();
        self.send("ucinewgame")?;
        let fen = self.fen.clone();
        self.send(&format!("position fen {fen}"))
    }

    fn apply_move(&mut self, mv: &str) -> Result<(), OracleError> {
        if !is_move_token(mv) {
            return Err(OracleError::Rejected { mv: mv.to_string(), reason: "not a UCI move token".to_string() });
        }
        let fen = self.fen.clone();
        self.send(&format!("position fen {fen} moves {mv}"))?;
        self.fen = self.query_fen()?;
        Ok(())
    }

    fn position(&mut self) -> Result<String, OracleError> {
        let fen = self.fen.clone();
        self.send(&format!("position fen {fen}"))?;
        self.fen = self.query_fen()?;
        Ok(self.fen.clone())
    }

    fn best_move(&mut self) -> Result<Option<String>, OracleError> {
        Ok(self.search()?.bestmove)
    }

    fn evaluation(&mut self) -> Result<Evaluation, OracleError> {
        let report = self.search()?;
        let eval = report.score.unwrap_or(Evaluation::Centipawns(0));
        // Engines report from the mover's side; flip to White's.
        match parse_active_color(&self.fen) {
            Ok(Color::Black) => Ok(negate(eval)),
            _ => Ok(eval),
        }
    }
}

impl<R: BufRead, W: Write> UciOracle<R, W> {
    /// Ask the engine to print its board (`d`) and pick out the `Fen:` line.
    fn query_fen(&mut self) -> Result<String, OracleError> {
        self.send("d")?;
        let mut fen = None;
        loop {
            let line = self.read_line()?;
            if let Some(rest) = line.strip_prefix("Fen:") {
                fen = Some(rest.trim().to_string());
            } else if line.starts_with("Checkers:") {
                break;
            }
        }
        fen.ok_or_else(|| OracleError::Protocol("`d` output had no Fen line".to_string()))
    }
}

fn negate(eval: Evaluation) -> Evaluation {
    match eval {
        Evaluation::Centipawns(cp) => Evaluation::Centipawns(-cp),
        Evaluation::Mate(n) => Evaluation::Mate(-n),
    }
}

/// A single 4-5 character ASCII alphanumeric word. Anything else could
/// smuggle extra commands onto the engine's stdin.
pub fn is_move_token(mv: &str) -> bool {
    (4..=5).contains(&mv.len()) && mv.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// `bestmove e2e4 [ponder ..]` -> `Some(Some("e2e4"))`,
/// `bestmove (none)` -> `Some(None)`, other lines -> `None`.
pub fn parse_bestmove(line: &str) -> Option<Option<String>> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return None;
    }
    match tokens.next() {
        Some("(none)") | Some("0000") | None => Some(None),
        Some(mv) => Some(Some(mv.to_string())),
    }
}

/// Score from an `info ... score cp X | score mate X ...` line.
pub fn parse_info_score(line: &str) -> Option<Evaluation> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("info") {
        return None;
    }
    while let Some(tok) = tokens.next() {
        if tok != "score" {
            continue;
        }
        let kind = tokens.next()?;
        let value = tokens.next()?.parse::<i32>().ok()?;
        return match kind {
            "cp" => Some(Evaluation::Centipawns(value)),
            "mate" => Some(Evaluation::Mate(value)),
            _ => None,
        };
    }
    None
}

/// Stockfish (or any UCI engine binary) running as a child process.
pub struct StockfishOracle {
    child: Child,
    session: Option<UciOracle<BufReader<ChildStdout>, BufWriter<ChildStdin>>>,
}

impl StockfishOracle {
    pub fn spawn(path: &Path, settings: EngineSettings) -> Result<Self, OracleError> {
        info!("starting engine {}", path.display());
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OracleError::Spawn { path: path.to_path_buf(), source })?;
        let stdin = child.stdin.take().ok_or_else(|| OracleError::Protocol("engine stdin unavailable".to_string()))?;
        let stdout = child.stdout.take().ok_or_else(|| OracleError::Protocol("engine stdout unavailable".to_string()))?;
        let session = match UciOracle::handshake(BufReader::new(stdout), BufWriter::new(stdin), settings) {
            Ok(s) => s,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };
        info!("engine ready (depth {})", session.settings().depth);
        Ok(Self { child, session: Some(session) })
    }

    fn session(&mut self) -> Result<&mut UciOracle<BufReader<ChildStdout>, BufWriter<ChildStdin>>, OracleError> {
        self.session.as_mut().ok_or_else(|| OracleError::Protocol("engine session closed".to_string()))
    }
}

impl Oracle for StockfishOracle {
    fn set_position(&mut self, fen: &str) -> Result<(), OracleError> {
        self.session()?.set_position(fen)
    }

    fn apply_move(&mut self, mv: &str) -> Result<(), OracleError> {
        self.session()?.apply_move(mv)
    }

    fn position(&mut self) -> Result<String, OracleError> {
        self.session()?.position()
    }

    fn best_move(&mut self) -> Result<Option<String>, OracleError> {
        self.session()?.best_move()
    }

    fn evaluation(&mut self) -> Result<Evaluation, OracleError> {
        self.session()?.evaluation()
    }
}

impl Drop for StockfishOracle {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            let _ = session.send("quit");
        }
        if let Err(e) = self.child.wait() {
            warn!("engine did not exit cleanly: {e}");
        }
    }
}
