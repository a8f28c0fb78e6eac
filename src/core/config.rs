use alloc::vec::Vec;

use super::common::{ConfigError, Side};
use super::ship::ShipSpec;

pub const BOARD_SIZE: usize = 8;
/// Largest board a `CellMask` can hold.
pub const MAX_BOARD_SIZE: usize = 11;
pub const NUM_SHIPS: usize = 3;
pub const SHIP_CATALOG: [ShipSpec; NUM_SHIPS] = [
    ShipSpec::new(1, "Carrier", 3),
    ShipSpec::new(2, "Battleship", 3),
    ShipSpec::new(3, "Destroyer", 2),
];

pub const MAX_BUOYS: usize = 2;
/// Side length of the square revealed by a radar scan.
pub const RADAR_BLOCK: usize = 2;
/// Chance that sabotage skips an opposing turn.
pub const SABOTAGE_CHANCE: f64 = 0.25;
/// Share of the wager a losing salvage crew recovers. Applied by the economy layer.
pub const SALVAGE_REFUND_PERCENT: u8 = 25;

/// Rules for a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    pub board_size: usize,
    pub catalog: Vec<ShipSpec>,
    /// Defense buoys each fleet must place before combat.
    pub buoys_per_fleet: usize,
    /// Insert a hand-off screen between turns (two humans on one device).
    pub hot_seat: bool,
    pub first_turn: Side,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            catalog: SHIP_CATALOG.to_vec(),
            buoys_per_fleet: 0,
            hot_seat: false,
            first_turn: Side::Player,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, spec) in self.catalog.iter().enumerate() {
            if spec.length() == 0 || spec.length() > self.board_size {
                return Err(ConfigError::ShipTooLong(spec.id()));
            }
            if self.catalog[..i].iter().any(|s| s.id() == spec.id()) {
                return Err(ConfigError::DuplicateShipId(spec.id()));
            }
        }
        let ship_cells: usize = self.catalog.iter().map(|s| s.length()).sum();
        if self.buoys_per_fleet > MAX_BUOYS
            || ship_cells + self.buoys_per_fleet + 1 > self.board_size * self.board_size
        {
            return Err(ConfigError::TooManyBuoys(self.buoys_per_fleet));
        }
        Ok(())
    }

    pub fn spec(&self, ship_id: u8) -> Option<&ShipSpec> {
        self.catalog.iter().find(|s| s.id() == ship_id)
    }

    /// Ship that receives the reinforced hull: the longest, first on ties.
    pub fn flagship(&self) -> Option<&ShipSpec> {
        self.catalog
            .iter()
            .fold(None, |best: Option<&ShipSpec>, s| match best {
                Some(b) if b.length() >= s.length() => Some(b),
                _ => Some(s),
            })
    }
}
