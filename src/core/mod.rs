//! Core naval combat rules engine (no_std compatible)
//!
//! This module contains the pure match logic with no I/O. It only needs
//! `alloc` plus num-traits, libm, rand, log and thiserror, so it can be
//! embedded in a UI or compiled to WebAssembly.

pub mod advantage;
pub mod ai;
pub mod bitboard;
pub mod common;
pub mod config;
pub mod fleet;
pub mod game;
pub mod grid;
pub mod resolver;
pub mod ship;
pub mod view;

// Re-export commonly used types
pub use advantage::{Activation, Advantage, AdvantageInfo, AdvantageKind, AdvantageSlot, UnknownAdvantage};
pub use ai::{cell_weight, plan_activation, HuntState};
pub use bitboard::{BitBoard, BitBoardError, CellMask};
pub use common::*;
pub use config::*;
pub use fleet::{DecoyMarker, DefenseBuoy, Fleet, Neutralized, NeutralizedShot};
pub use game::{
    apply, random_deployment, Command, Event, MatchOutcome, MatchState, Phase, Transition, TurnState,
};
pub use grid::{Coordinate, Grid, Orientation};
pub use resolver::{evaluate_outcome, ScanContact, ShotReport, VolleyImpact, VolleyReport, VolleyShot};
pub use ship::{HitEffect, Ship, ShipSpec};
pub use view::BoardView;
