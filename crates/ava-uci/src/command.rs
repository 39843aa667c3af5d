//! UCI command parsing.

use ava_core::{Position, RulesError};
use ava_engine::MAX_PLY;

use crate::error::UciError;

/// Clock-related `go` parameters. They are accepted so GUIs can send them,
/// but the search depth never depends on the clock.
const CLOCK_PARAMS: [&str; 7] = [
    "wtime",
    "btime",
    "winc",
    "binc",
    "movestogo",
    "movetime",
    "nodes",
];

/// Parameters for the `go` command.
///
/// A bare `go` searches to the configured depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Search to this depth instead of the configured one.
    pub depth: Option<u8>,
}

/// An option settable through `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    /// Search depth in plies.
    Depth(u8),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a position with optional moves applied.
    Position(Position),
    /// `go` -- search and report the best move.
    Go(GoParams),
    /// `setoption` -- change an engine option.
    SetOption(UciOption),
    /// `stop` -- nothing to stop; searches finish before the next command is read.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (silently ignored per UCI convention).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "position" => parse_position(rest),
        "go" => parse_go(rest),
        "setoption" => parse_setoption(rest),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    let moves_at = tokens
        .iter()
        .position(|&t| t == "moves")
        .unwrap_or(tokens.len());
    let (setup, moves) = tokens.split_at(moves_at);

    let mut position = match setup.split_first() {
        Some((&"startpos", [])) => Position::starting(),
        Some((&"fen", fields)) => {
            let fen = fields.join(" ");
            Position::from_fen(&fen).map_err(|e| UciError::InvalidFen {
                fen: fen.clone(),
                reason: match e {
                    RulesError::InvalidFen { reason, .. } => reason,
                    other => other.to_string(),
                },
            })?
        }
        _ => return Err(UciError::MalformedPosition),
    };

    // Skip the "moves" keyword itself.
    for uci_move in moves.iter().skip(1) {
        position = position
            .play_uci(uci_move)
            .map_err(|_| UciError::InvalidMove {
                uci_move: uci_move.to_string(),
            })?;
    }

    Ok(Command::Position(position))
}

/// Parse the `go` command arguments.
///
/// Only `depth` is used; values above `MAX_PLY` are clamped. Clock
/// parameters and their values are skipped, as are unknown tokens.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                params.depth = Some(clamped_depth(tokens.get(i + 1))?);
                i += 2;
            }
            param if CLOCK_PARAMS.contains(&param) => i += 2,
            _ => i += 1,
        }
    }

    Ok(Command::Go(params))
}

/// Parse `setoption name <name> [value <value>]`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    let value_at = tokens
        .iter()
        .position(|&t| t == "value")
        .unwrap_or(tokens.len());
    let name = match tokens[..value_at].split_first() {
        Some((&"name", words)) if !words.is_empty() => words.join(" "),
        _ => {
            return Err(UciError::MissingValue {
                param: "name".to_string(),
            });
        }
    };

    if name.eq_ignore_ascii_case("depth") {
        let depth = parse_depth(tokens.get(value_at + 1), "Depth", 1)?;
        Ok(Command::SetOption(UciOption::Depth(depth)))
    } else {
        Err(UciError::UnknownOption { name })
    }
}

/// Parse a `go depth` value, clamping it to `MAX_PLY`.
fn clamped_depth(token: Option<&&str>) -> Result<u8, UciError> {
    let value = token.ok_or_else(|| UciError::MissingValue {
        param: "depth".to_string(),
    })?;
    let depth: u64 = value.parse().map_err(|_| UciError::InvalidValue {
        param: "depth".to_string(),
        value: value.to_string(),
    })?;
    // MAX_PLY fits in a u8.
    Ok(depth.min(MAX_PLY as u64) as u8)
}

/// Parse a search depth in `min..=MAX_PLY`.
fn parse_depth(token: Option<&&str>, param: &str, min: u8) -> Result<u8, UciError> {
    let value = token.ok_or_else(|| UciError::MissingValue {
        param: param.to_string(),
    })?;
    let invalid = || UciError::InvalidValue {
        param: param.to_string(),
        value: value.to_string(),
    };
    let depth: u8 = value.parse().map_err(|_| invalid())?;
    if depth < min || usize::from(depth) > MAX_PLY {
        return Err(invalid());
    }
    Ok(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(line: &str) -> GoParams {
        match parse_command(line).unwrap() {
            Command::Go(params) => params,
            other => panic!("expected Go, got {other:?}"),
        }
    }

    fn position(line: &str) -> Position {
        match parse_command(line).unwrap() {
            Command::Position(pos) => pos,
            other => panic!("expected Position, got {other:?}"),
        }
    }

    #[test]
    fn parse_simple_commands() {
        assert!(matches!(parse_command("uci").unwrap(), Command::Uci));
        assert!(matches!(parse_command("isready").unwrap(), Command::IsReady));
        assert!(matches!(parse_command("ucinewgame").unwrap(), Command::UciNewGame));
        assert!(matches!(parse_command("stop").unwrap(), Command::Stop));
        assert!(matches!(parse_command("quit").unwrap(), Command::Quit));
    }

    #[test]
    fn unknown_and_blank_lines_are_ignored() {
        assert!(matches!(parse_command("xyzzy 1 2").unwrap(), Command::Unknown(ref s) if s == "xyzzy"));
        assert!(matches!(parse_command("   ").unwrap(), Command::Unknown(ref s) if s.is_empty()));
    }

    #[test]
    fn parse_position_startpos() {
        assert_eq!(position("position startpos").to_fen(), Position::starting().to_fen());
    }

    #[test]
    fn parse_position_startpos_with_moves() {
        let pos = position("position startpos moves e2e4 e7e5 g1f3");
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn parse_position_fen() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        assert_eq!(position(&format!("position fen {fen}")).to_fen(), fen);
    }

    #[test]
    fn parse_position_fen_with_moves() {
        let pos = position("position fen 8/8/4k3/8/8/3K4/4P3/8 w - - 0 1 moves e2e4");
        assert_eq!(pos.to_fen(), "8/8/4k3/8/4P3/3K4/8/8 b - - 0 1");
    }

    #[test]
    fn position_without_setup_is_malformed() {
        assert!(matches!(parse_command("position"), Err(UciError::MalformedPosition)));
        assert!(matches!(
            parse_command("position moves e2e4"),
            Err(UciError::MalformedPosition)
        ));
        assert!(matches!(
            parse_command("position startpos e2e4"),
            Err(UciError::MalformedPosition)
        ));
    }

    #[test]
    fn bad_fen_is_reported() {
        assert!(matches!(
            parse_command("position fen not/a/fen w"),
            Err(UciError::InvalidFen { .. })
        ));
    }

    #[test]
    fn illegal_move_is_reported() {
        match parse_command("position startpos moves e2e4 e2e4") {
            Err(UciError::InvalidMove { uci_move }) => assert_eq!(uci_move, "e2e4"),
            other => panic!("expected InvalidMove, got {other:?}"),
        }
    }

    #[test]
    fn parse_go_depth() {
        assert_eq!(go("go depth 6").depth, Some(6));
        assert_eq!(go("go depth 0").depth, Some(0));
    }

    #[test]
    fn parse_go_bare_defaults() {
        assert_eq!(go("go"), GoParams::default());
    }

    #[test]
    fn clock_params_are_skipped() {
        let params = go("go wtime 300000 btime 300000 winc 2000 binc 2000 depth 3 movestogo 40");
        assert_eq!(params.depth, Some(3));
        assert_eq!(go("go movetime 5000 infinite").depth, None);
    }

    #[test]
    fn bad_go_depth_is_rejected() {
        assert!(matches!(
            parse_command("go depth"),
            Err(UciError::MissingValue { .. })
        ));
        assert!(matches!(
            parse_command("go depth -1"),
            Err(UciError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_command("go depth deep"),
            Err(UciError::InvalidValue { .. })
        ));
    }

    #[test]
    fn oversized_go_depth_is_clamped() {
        assert_eq!(go("go depth 200").depth, Some(128));
        assert_eq!(go("go depth 100000").depth, Some(128));
        assert_eq!(go("go depth 128").depth, Some(128));
    }

    #[test]
    fn parse_setoption_depth() {
        assert!(matches!(
            parse_command("setoption name Depth value 6").unwrap(),
            Command::SetOption(UciOption::Depth(6))
        ));
        assert!(matches!(
            parse_command("setoption name depth value 2").unwrap(),
            Command::SetOption(UciOption::Depth(2))
        ));
    }

    #[test]
    fn setoption_errors() {
        assert!(matches!(
            parse_command("setoption name Hash value 64"),
            Err(UciError::UnknownOption { ref name }) if name == "Hash"
        ));
        assert!(matches!(
            parse_command("setoption name Depth value 0"),
            Err(UciError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_command("setoption name Depth"),
            Err(UciError::MissingValue { .. })
        ));
        assert!(matches!(
            parse_command("setoption value 3"),
            Err(UciError::MissingValue { .. })
        ));
    }
}
