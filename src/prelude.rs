//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    Activation, Advantage, BoardView, Command, Coordinate, EngineError, Event, Fleet, MatchConfig,
    MatchOutcome, MatchState, Orientation, Outcome, Phase, ShotOutcome, Side,
};

#[cfg(feature = "std")]
pub use crate::{
    init_logging, Action, CliPlayer, HeuristicStrategy, MatchResult, MatchSession, OpponentStrategy,
    OracleClient, OracleStrategy,
};
