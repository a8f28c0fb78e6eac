#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
pub mod prelude;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod snapshot;
#[cfg(feature = "std")]
pub mod ui;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player::{Action, CliPlayer, HeuristicStrategy, OpponentStrategy, OracleClient, OracleStrategy};
#[cfg(feature = "std")]
pub use session::{MatchResult, MatchSession};
