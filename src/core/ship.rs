//! Ship catalog entries and placed ships with their damage record.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use crate::core::common::PlacementError;
use crate::core::grid::{Coordinate, Grid, Orientation};

/// Catalog entry: identifier, name and length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipSpec {
    id: u8,
    name: Cow<'static, str>,
    length: usize,
}

impl ShipSpec {
    /// Create a new catalog entry.
    pub const fn new(id: u8, name: &'static str, length: usize) -> Self {
        Self {
            id,
            name: Cow::Borrowed(name),
            length,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Effect of a shot landing on one of a ship's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitEffect {
    /// Bonus health soaked the hit; nothing was recorded.
    Absorbed,
    /// A new segment was damaged.
    Damaged,
    /// The final segment was damaged.
    Sunk,
    /// The cell was already damaged.
    AlreadyHit,
    /// The cell is not part of this ship.
    Missed,
}

/// A ship placed on a fleet's grid.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    spec: ShipSpec,
    orientation: Orientation,
    placements: Vec<Coordinate>,
    hits: Vec<Coordinate>,
    sunk: bool,
    extra_health: u8,
}

impl Ship {
    /// Lay `spec` out from `origin` along `orientation`.
    pub fn new(
        spec: ShipSpec,
        origin: Coordinate,
        orientation: Orientation,
        grid: Grid,
    ) -> Result<Self, PlacementError> {
        let placements = grid
            .segment(origin, orientation, spec.length())
            .ok_or(PlacementError::OutOfBounds)?;
        Ok(Ship {
            spec,
            orientation,
            placements,
            hits: Vec::new(),
            sunk: false,
            extra_health: 0,
        })
    }

    /// Register a shot on `at`.
    pub fn register_hit(&mut self, at: Coordinate) -> HitEffect {
        if !self.contains(at) {
            return HitEffect::Missed;
        }
        if self.hits.contains(&at) {
            return HitEffect::AlreadyHit;
        }
        if self.extra_health > 0 {
            self.extra_health -= 1;
            return HitEffect::Absorbed;
        }
        self.hits.push(at);
        if self.hits.len() == self.placements.len() {
            self.sunk = true;
            HitEffect::Sunk
        } else {
            HitEffect::Damaged
        }
    }

    /// Grant one point of bonus health.
    pub fn reinforce(&mut self) {
        self.extra_health = 1;
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.placements.contains(&at)
    }

    pub fn is_hit(&self, at: Coordinate) -> bool {
        self.hits.contains(&at)
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn spec(&self) -> &ShipSpec {
        &self.spec
    }

    pub fn id(&self) -> u8 {
        self.spec.id()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn placements(&self) -> &[Coordinate] {
        &self.placements
    }

    pub fn hits(&self) -> &[Coordinate] {
        &self.hits
    }

    pub fn extra_health(&self) -> u8 {
        self.extra_health
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: {}, orientation: {:?}, hits: {}/{}, extra_health: {} }}",
            self.spec.name(),
            self.placements.first().copied().unwrap_or(Coordinate::new(0, 0)),
            self.orientation,
            self.hits.len(),
            self.placements.len(),
            self.extra_health,
        )
    }
}
