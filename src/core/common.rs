//! Common types for the engine: sides, shot results and error taxonomy.

use core::fmt;

use crate::core::bitboard::BitBoardError;
use crate::core::grid::Coordinate;

/// One of the two fleets in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Slot index for per-side arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Which single-cell trap a shot sprang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TrapKind {
    Decoy,
    Buoy,
}

/// Result of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot landed in open water (or was deflected).
    Miss,
    /// Shot struck a ship segment. `absorbed` hits were soaked by bonus health.
    Hit { absorbed: bool },
    /// Shot sank a ship, carrying its catalog id.
    Sunk { ship_id: u8 },
    /// Shot struck the decoy marker.
    DecoyHit,
    /// Shot struck a defense buoy.
    BuoyHit,
}

impl ShotOutcome {
    /// True when a ship segment actually took damage.
    pub fn is_damage(&self) -> bool {
        matches!(self, ShotOutcome::Hit { absorbed: false } | ShotOutcome::Sunk { .. })
    }
}

/// Side effects reported alongside a shot outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    ShieldDeflected,
    TargetingRedirect { from: Coordinate },
    HullAbsorbed { ship_id: u8 },
    ExtraShot,
    TrapSprung(TrapKind),
}

/// What happens to the attacker's turn after a resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnContinuation {
    /// Turn passes to the defender.
    Pass,
    /// Attacker fires again.
    Keep,
    /// Attacker's turn is forfeited and must be closed with `EndTurn`.
    Forfeit,
}

/// Why a turn was forfeited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    Trap(TrapKind),
    Sabotage,
}

/// Terminal result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// Errors returned while building a fleet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("placement is out of bounds")]
    OutOfBounds,
    #[error("placement overlaps another ship or marker")]
    Overlap,
    #[error("ship is not in the catalog or is already placed")]
    WrongShipCount,
    #[error("no more markers of this kind may be placed")]
    MarkerLimit,
    #[error("fleets can only be changed during placement")]
    WrongPhase,
}

impl From<BitBoardError> for PlacementError {
    fn from(_: BitBoardError) -> Self {
        PlacementError::OutOfBounds
    }
}

/// Errors returned when a shot or turn command is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShotError {
    #[error("cell {0} was already fired upon")]
    AlreadyFired(Coordinate),
    #[error("command not allowed in the current phase")]
    WrongPhase,
    #[error("it is not this side's turn")]
    NotYourTurn,
    #[error("cell {0} is off the board")]
    OutOfBounds(Coordinate),
    #[error("this turn was forfeited; end it instead")]
    TurnForfeited,
    #[error("turn is not forfeited")]
    TurnNotForfeited,
}

/// Errors returned when activating an advantage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvantageError {
    #[error("no advantage is bound to this side")]
    NotBound,
    #[error("passive advantages trigger automatically")]
    Passive,
    #[error("advantage was already used")]
    AlreadyUsed,
    #[error("advantage is disabled this turn")]
    Disabled,
    #[error("activation does not match the bound advantage")]
    WrongActivation,
}

/// Invalid match configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {0} is too small")]
    BoardTooSmall(usize),
    #[error("board size {0} exceeds the supported maximum")]
    BoardTooLarge(usize),
    #[error("ship catalog is empty")]
    EmptyCatalog,
    #[error("ship {0} does not fit on the board")]
    ShipTooLong(u8),
    #[error("ship id {0} appears twice in the catalog")]
    DuplicateShipId(u8),
    #[error("{0} buoys cannot be placed")]
    TooManyBuoys(usize),
}

/// Failure modes of a remote move oracle. Always recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    #[error("oracle did not answer before the deadline")]
    OracleTimeout,
    #[error("oracle proposed an invalid move: {0}")]
    OracleInvalidMove(&'static str),
    #[error("oracle request failed")]
    OracleUnavailable,
}

/// Any rejected engine command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Shot(#[from] ShotError),
    #[error(transparent)]
    Advantage(#[from] AdvantageError),
}
