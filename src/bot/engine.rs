//! UCI engine session
//!
//! Wraps an external UCI engine process (Stockfish or compatible) as a
//! long-lived session: spawned once per bot run, queried once per decision
//! point, and shut down when the run stops. Each query is bounded by the
//! configured search budget plus a small grace allowance; a reply that never
//! arrives is a per-call compute failure, not a crash.
//!
//! Dialogue per the UCI protocol: `uci`/`uciok` and `isready`/`readyok` at
//! session start, then `position fen ...` + `go movetime ...` per query,
//! scanning engine output for the `bestmove` line.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, EnPassantMode, Move};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::bot::capabilities::DecisionEngine;
use crate::bot::error::EngineError;

/// Wall-clock allowance on top of the search budget before a reply is
/// declared lost.
const REPLY_GRACE: Duration = Duration::from_secs(2);

/// Time limit for each handshake marker at session start.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// A running UCI engine process, exclusively owned by one control loop.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
}

impl UciEngine {
    /// Start the engine process and complete the UCI handshake.
    ///
    /// Any failure here is [`EngineError::Unavailable`] and fatal for the
    /// run that requested the session.
    pub async fn spawn(program: &Path) -> Result<Self, EngineError> {
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                EngineError::Unavailable(format!("failed to start {}: {}", program.display(), e))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Unavailable("engine stdin not captured".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Unavailable("engine stdout not captured".into()))?;

        let mut engine = Self {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
        };

        engine
            .send("uci")
            .await
            .map_err(EngineError::Unavailable)?;
        engine
            .wait_for("uciok", HANDSHAKE_TIMEOUT)
            .await
            .map_err(EngineError::Unavailable)?;
        engine
            .send("setoption name Hash value 16")
            .await
            .map_err(EngineError::Unavailable)?;
        engine
            .send("setoption name Threads value 1")
            .await
            .map_err(EngineError::Unavailable)?;
        engine
            .send("isready")
            .await
            .map_err(EngineError::Unavailable)?;
        engine
            .wait_for("readyok", HANDSHAKE_TIMEOUT)
            .await
            .map_err(EngineError::Unavailable)?;

        info!("[ENGINE] Session ready: {}", program.display());
        Ok(engine)
    }

    async fn send(&mut self, command: &str) -> Result<(), String> {
        debug!("[ENGINE] >> {}", command);
        self.stdin
            .write_all(command.as_bytes())
            .await
            .map_err(|e| e.to_string())?;
        self.stdin.write_all(b"\n").await.map_err(|e| e.to_string())?;
        self.stdin.flush().await.map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Read engine output until a line equals `marker`, within `limit`.
    async fn wait_for(&mut self, marker: &str, limit: Duration) -> Result<(), String> {
        let scan = async {
            loop {
                match self.lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim() == marker {
                            return Ok(());
                        }
                    }
                    Ok(None) => return Err("engine closed its output stream".to_string()),
                    Err(e) => return Err(e.to_string()),
                }
            }
        };
        timeout(limit, scan)
            .await
            .map_err(|_| format!("no {} from engine within {:?}", marker, limit))?
    }
}

/// Extract the move token from a `bestmove` line, if this is one.
fn parse_bestmove(line: &str) -> Option<&str> {
    let mut parts = line.trim().split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    parts.next()
}

#[async_trait]
impl DecisionEngine for UciEngine {
    async fn best_move(
        &mut self,
        position: &Chess,
        budget: Duration,
    ) -> Result<Move, EngineError> {
        let fen = Fen::from_position(position.clone(), EnPassantMode::Legal);
        self.send(&format!("position fen {}", fen))
            .await
            .map_err(EngineError::Compute)?;
        self.send(&format!("go movetime {}", budget.as_millis()))
            .await
            .map_err(EngineError::Compute)?;

        let scan = async {
            loop {
                match self.lines.next_line().await {
                    Ok(Some(line)) => {
                        if let Some(token) = parse_bestmove(&line) {
                            return Ok(token.to_string());
                        }
                    }
                    Ok(None) => return Err("engine closed its output stream".to_string()),
                    Err(e) => return Err(e.to_string()),
                }
            }
        };
        let token = timeout(budget + REPLY_GRACE, scan)
            .await
            .map_err(|_| EngineError::Compute("no bestmove within the time budget".into()))?
            .map_err(EngineError::Compute)?;

        if token == "(none)" {
            return Err(EngineError::Compute("engine reported no legal move".into()));
        }

        let uci = UciMove::from_ascii(token.as_bytes())
            .map_err(|e| EngineError::Compute(format!("unreadable bestmove {:?}: {}", token, e)))?;
        uci.to_move(position).map_err(|e| {
            EngineError::Compute(format!("bestmove {:?} is illegal here: {}", token, e))
        })
    }

    async fn shutdown(&mut self) {
        let _ = self.send("quit").await;
        match timeout(Duration::from_secs(1), self.child.wait()).await {
            Ok(Ok(status)) => debug!("[ENGINE] Exited: {}", status),
            _ => {
                warn!("[ENGINE] Engine did not exit after quit, killing it");
                let _ = self.child.kill().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bestmove_plain() {
        assert_eq!(parse_bestmove("bestmove e2e4"), Some("e2e4"));
    }

    #[test]
    fn test_parse_bestmove_with_ponder() {
        assert_eq!(parse_bestmove("bestmove g1f3 ponder b8c6"), Some("g1f3"));
    }

    #[test]
    fn test_parse_bestmove_none_marker() {
        assert_eq!(parse_bestmove("bestmove (none)"), Some("(none)"));
    }

    #[test]
    fn test_parse_bestmove_ignores_info_lines() {
        assert_eq!(
            parse_bestmove("info depth 20 score cp 31 pv e2e4 e7e5"),
            None
        );
        assert_eq!(parse_bestmove(""), None);
    }
}
