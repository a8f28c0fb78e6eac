//! Remote move oracle wrapped around the local heuristic.
//!
//! The oracle is only ever advisory: every failure (deadline, transport
//! error, garbage reply, closed or off-board cell) falls back to the
//! heuristic for that turn.

use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::core::{BoardView, Command, Coordinate, MatchState, ShotReport, Side, StrategyError, VolleyReport};

use super::{Action, HeuristicStrategy, OpponentStrategy};

/// Default time the oracle gets to answer.
pub const ORACLE_DEADLINE: Duration = Duration::from_secs(5);

/// Transport to a remote move generator. Returns its raw text reply.
#[async_trait::async_trait]
pub trait OracleClient: Send + Sync {
    async fn propose(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Deserialize)]
struct OracleMove {
    row: i64,
    col: i64,
}

/// Prompt sent to the oracle: rules preamble plus the `O`/`M`/`H` grid.
pub fn build_prompt(view: &BoardView) -> String {
    format!(
        "You are playing naval combat on a {n}x{n} grid (0-indexed).\n\
         'O' is open water, 'M' is a miss and 'H' is a hit.\n\
         If there are hits, fire next to them to finish the ship; otherwise search open cells.\n\
         Respond ONLY with JSON: {{\"row\": number, \"col\": number}}.\n\n\
         Board:\n{grid}\n",
        n = view.size,
        grid = view.render_grid(),
    )
}

/// Drop a surrounding ``` fence (with optional language tag).
fn strip_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    match inner.find('\n') {
        Some(pos) if !inner[..pos].trim_start().starts_with('{') => inner[pos + 1..].trim(),
        _ => inner.trim(),
    }
}

/// Validate an oracle reply against what the attacker already knows.
pub fn parse_reply(reply: &str, view: &BoardView) -> Result<Coordinate, StrategyError> {
    let mv: OracleMove = serde_json::from_str(strip_fence(reply))
        .map_err(|_| StrategyError::OracleInvalidMove("malformed reply"))?;
    let (Ok(row), Ok(col)) = (usize::try_from(mv.row), usize::try_from(mv.col)) else {
        return Err(StrategyError::OracleInvalidMove("negative coordinate"));
    };
    let at = Coordinate::new(row, col);
    if !view.grid().in_bounds(at) {
        return Err(StrategyError::OracleInvalidMove("out of bounds"));
    }
    if !view.is_open(at) {
        return Err(StrategyError::OracleInvalidMove("already fired"));
    }
    Ok(at)
}

/// Asks `client` for each move and falls back to `fallback` on any failure.
pub struct OracleStrategy<C> {
    client: C,
    fallback: HeuristicStrategy,
    deadline: Duration,
    fallbacks: usize,
}

impl<C: OracleClient> OracleStrategy<C> {
    pub fn new(client: C, fallback: HeuristicStrategy) -> Self {
        Self {
            client,
            fallback,
            deadline: ORACLE_DEADLINE,
            fallbacks: 0,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Turns answered by the heuristic instead of the oracle.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    async fn ask(&self, view: &BoardView) -> Result<Coordinate, StrategyError> {
        let prompt = build_prompt(view);
        let reply = tokio::time::timeout(self.deadline, self.client.propose(&prompt))
            .await
            .map_err(|_| StrategyError::OracleTimeout)?
            .map_err(|_| StrategyError::OracleUnavailable)?;
        parse_reply(&reply, view)
    }
}

#[async_trait::async_trait]
impl<C: OracleClient> OpponentStrategy for OracleStrategy<C> {
    fn deploy(&mut self, state: &MatchState, side: Side) -> anyhow::Result<Vec<Command>> {
        self.fallback.deploy(state, side)
    }

    async fn next_move(&mut self, view: &BoardView) -> Coordinate {
        match self.ask(view).await {
            Ok(at) => at,
            Err(e) => {
                warn!("oracle move rejected ({e}); using heuristic");
                self.fallbacks += 1;
                self.fallback.choose(view)
            }
        }
    }

    async fn next_action(&mut self, view: &BoardView) -> Action {
        match crate::core::plan_activation(view) {
            Some(activation) => Action::Activate(activation),
            None => Action::Fire(self.next_move(view).await),
        }
    }

    fn record_outcome(&mut self, report: &ShotReport) {
        self.fallback.record_outcome(report);
    }

    fn record_volley(&mut self, report: &VolleyReport) {
        self.fallback.record_volley(report);
    }
}
