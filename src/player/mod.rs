//! Opponent strategies
//!
//! This module defines the OpponentStrategy trait and its implementations:
//! - HeuristicStrategy: local hunt/search targeting, never fails
//! - OracleStrategy: remote move oracle with heuristic fallback
//! - CliPlayer: interactive command-line player

use alloc::vec::Vec;

use crate::core::{
    random_deployment, Activation, BoardView, Command, Coordinate, MatchState, ShotReport, Side,
    VolleyReport,
};

/// A decision for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fire(Coordinate),
    Activate(Activation),
}

/// Interface implemented by everything that can take a side's turns.
///
/// A strategy is responsible for:
/// - Deploying its fleet
/// - Choosing the next cell to fire at (or an advantage to trigger)
/// - Absorbing feedback about its own shots
#[async_trait::async_trait]
pub trait OpponentStrategy: Send {
    /// Commands that complete `side`'s deployment.
    fn deploy(&mut self, state: &MatchState, side: Side) -> anyhow::Result<Vec<Command>>;

    /// Choose an open cell of the opposing grid.
    async fn next_move(&mut self, view: &BoardView) -> Coordinate;

    /// Choose this turn's action. Defaults to firing.
    async fn next_action(&mut self, view: &BoardView) -> Action {
        Action::Fire(self.next_move(view).await)
    }

    /// Result of one of our own shots.
    fn record_outcome(&mut self, _report: &ShotReport) {}

    /// Result of one of our own volleys.
    fn record_volley(&mut self, _report: &VolleyReport) {}
}

pub(crate) fn deploy_randomly<R: rand::Rng + ?Sized>(
    state: &MatchState,
    side: Side,
    rng: &mut R,
) -> anyhow::Result<Vec<Command>> {
    random_deployment(state, side, rng).map_err(|e| anyhow::anyhow!("{side} deployment failed: {e}"))
}

pub mod ai;
pub use ai::HeuristicStrategy;

pub mod oracle;
pub use oracle::{OracleClient, OracleStrategy};

pub mod cli;
pub use cli::{parse_command, CliCommand, CliPlayer};
