//! Synchronous UCI engine loop.
//!
//! Commands are handled one at a time on the calling thread. `go` runs the
//! search to completion before the next line is read, so `stop` has nothing
//! to interrupt.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use ava_core::Position;
use ava_engine::{Ava, SearchOutcome, Strategy, mate_distance};

use crate::command::{Command, GoParams, UciOption, parse_command};
use crate::error::UciError;

/// Configuration knobs adjustable via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth in plies for `go` without an explicit depth.
    pub depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: Ava::DEFAULT_DEPTH,
        }
    }
}

/// The UCI engine, holding the current position and the move strategy.
pub struct UciEngine {
    position: Position,
    strategy: Box<dyn Strategy>,
    config: EngineConfig,
}

impl UciEngine {
    /// Create a new engine with the starting position and the `ava` strategy.
    pub fn new() -> Self {
        Self::with_strategy(Box::new(Ava::default()))
    }

    /// Create a new engine playing through `strategy`.
    pub fn with_strategy(strategy: Box<dyn Strategy>) -> Self {
        let config = EngineConfig {
            depth: strategy.depth(),
        };
        Self {
            position: Position::starting(),
            strategy,
            config,
        }
    }

    /// The current configuration.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Run the UCI loop on stdin/stdout until `quit` or end of input.
    pub fn run(mut self) -> Result<(), UciError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout.lock())
    }

    /// Run the UCI loop over arbitrary input and output streams.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), UciError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.handle(cmd, out)?,
                Err(e) => {
                    warn!(error = %e, "UCI parse error");
                    // A GUI waits for bestmove after every go.
                    if trimmed.split_whitespace().next() == Some("go") {
                        writeln!(out, "bestmove 0000")?;
                    }
                }
            }
            out.flush()?;
        }

        info!("ava shutting down");
        Ok(())
    }

    fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<(), UciError> {
        match cmd {
            Command::Uci => self.handle_uci(out),
            Command::IsReady => Ok(writeln!(out, "readyok")?),
            Command::UciNewGame => {
                self.position = Position::starting();
                Ok(())
            }
            Command::Position(position) => {
                self.position = position;
                Ok(())
            }
            Command::Go(params) => self.handle_go(params, out),
            Command::SetOption(option) => {
                self.handle_setoption(option);
                Ok(())
            }
            Command::Stop | Command::Quit | Command::Unknown(_) => Ok(()),
        }
    }

    fn handle_uci<W: Write>(&self, out: &mut W) -> Result<(), UciError> {
        writeln!(out, "id name {}", self.strategy.name())?;
        writeln!(out, "id author the ava developers")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            Ava::DEFAULT_DEPTH,
            ava_engine::MAX_PLY
        )?;
        writeln!(out, "uciok")?;
        Ok(())
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Depth(depth) => {
                self.config.depth = depth;
                self.strategy.set_depth(depth);
            }
        }
    }

    fn handle_go<W: Write>(&mut self, params: GoParams, out: &mut W) -> Result<(), UciError> {
        let depth = params.depth.unwrap_or(self.config.depth);
        self.strategy.set_depth(depth);
        let outcome = self.strategy.choose(&self.position);
        self.strategy.set_depth(self.config.depth);

        match outcome {
            Ok(SearchOutcome::Move(result)) => {
                let pv: Vec<String> = result.pv.iter().map(|mv| mv.to_uci()).collect();
                writeln!(
                    out,
                    "info depth {} score {} nodes {} pv {}",
                    result.depth,
                    format_score(result.score),
                    result.nodes,
                    pv.join(" ")
                )?;
                writeln!(out, "bestmove {}", result.best_move.to_uci())?;
            }
            Ok(SearchOutcome::NoMove { reason, score }) => {
                info!(?reason, fen = %self.position, "no legal move");
                writeln!(out, "info depth 0 score {}", format_score(score))?;
                writeln!(out, "bestmove 0000")?;
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                writeln!(out, "bestmove 0000")?;
            }
        }
        Ok(())
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// UCI score token: `mate N` for forced mates, `cp N` otherwise.
fn format_score(score: i32) -> String {
    match mate_distance(score) {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {score}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ava_core::{GameState, Move};

    use super::*;

    fn run_script(engine: &mut UciEngine, script: &str) -> String {
        let mut out = Vec::new();
        engine.run_with(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn bestmove(output: &str) -> &str {
        output
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("bestmove "))
            .unwrap()
    }

    #[test]
    fn format_score_cp_and_mate() {
        assert_eq!(format_score(35), "cp 35");
        assert_eq!(format_score(-120), "cp -120");
        assert_eq!(format_score(ava_engine::MATE_SCORE - 1), "mate 1");
        assert_eq!(format_score(-(ava_engine::MATE_SCORE - 2)), "mate -1");
    }

    #[test]
    fn handshake() {
        let output = run_script(&mut UciEngine::new(), "uci\nisready\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "id name ava");
        assert!(lines.contains(&"option name Depth type spin default 4 min 1 max 128"));
        assert!(lines.contains(&"uciok"));
        assert_eq!(lines.last(), Some(&"readyok"));
    }

    #[test]
    fn go_plays_a_legal_move() {
        let mut engine = UciEngine::new();
        let output = run_script(&mut engine, "position startpos moves e2e4\ngo depth 2\n");
        assert!(output.contains("info depth 2 score cp "));

        let pos = Position::starting().play_uci("e2e4").unwrap();
        let played = bestmove(&output);
        assert!(Move::from_uci(played, &pos).is_some(), "{played}");
        assert!(pos.legal_moves().iter().any(|mv| mv.to_uci() == played));
    }

    #[test]
    fn go_finds_mate_and_reports_it() {
        let script = "position fen r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4\n\
                      go depth 2\n";
        let output = run_script(&mut UciEngine::new(), script);
        assert!(output.contains("score mate 1"));
        assert_eq!(bestmove(&output), "h5f7");
    }

    #[test]
    fn mated_side_answers_null_move() {
        let script = "position fen 4R1k1/5ppp/8/8/8/8/8/6K1 b - - 1 1\ngo\n";
        let output = run_script(&mut UciEngine::new(), script);
        assert!(output.contains("info depth 0 score mate 0"));
        assert_eq!(bestmove(&output), "0000");
    }

    #[test]
    fn setoption_sets_default_depth() {
        let mut engine = UciEngine::new();
        let output = run_script(&mut engine, "setoption name Depth value 1\ngo\n");
        assert_eq!(engine.config().depth, 1);
        assert!(output.contains("info depth 1 "));
    }

    #[test]
    fn go_depth_does_not_change_the_default() {
        let mut engine = UciEngine::new();
        run_script(&mut engine, "go depth 1\n");
        assert_eq!(engine.config().depth, Ava::DEFAULT_DEPTH);
    }

    #[test]
    fn bad_commands_are_skipped() {
        let script = "position fen not a fen\nposition startpos moves e2e5\nsetoption name Hash value 1\nisready\n";
        let output = run_script(&mut UciEngine::new(), script);
        assert_eq!(output.trim(), "readyok");
    }

    #[test]
    fn malformed_go_still_answers() {
        let output = run_script(&mut UciEngine::new(), "go depth
go depth -2
isready
");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["bestmove 0000", "bestmove 0000", "readyok"]);
    }

    #[test]
    fn quit_stops_reading() {
        let output = run_script(&mut UciEngine::new(), "isready\nquit\nisready\n");
        assert_eq!(output.matches("readyok").count(), 1);
    }

    #[test]
    fn ucinewgame_resets_the_position() {
        let mut engine = UciEngine::new();
        run_script(&mut engine, "position startpos moves e2e4\nucinewgame\n");
        assert_eq!(engine.position.to_fen(), Position::starting().to_fen());
    }
}
