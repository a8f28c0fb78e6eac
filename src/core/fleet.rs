//! A side's fleet: placed ships, traps and the record of shots received.
//!
//! Placement is all-or-nothing: every check runs before the fleet is touched,
//! so a rejected placement leaves no partial ship behind.

use alloc::vec::Vec;
use rand::Rng;

use crate::core::bitboard::{BitBoardError, CellMask};
use crate::core::common::{PlacementError, TrapKind};
use crate::core::grid::{Coordinate, Grid, Orientation};
use crate::core::ship::{HitEffect, Ship, ShipSpec};

/// Random attempts before falling back to an exhaustive scan.
const RANDOM_ATTEMPTS: usize = 100;

/// A fake one-cell ship signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoyMarker {
    pub position: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DefenseBuoy {
    pub position: Coordinate,
    pub used: bool,
}

/// Why a logged shot left its cell open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Neutralized {
    /// Ghost shield turned the shot away.
    Deflected,
    /// Bonus hull health soaked the hit.
    Absorbed,
    /// A volley passed over a ship after its single damaging hit.
    Grazed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct NeutralizedShot {
    pub at: Coordinate,
    pub kind: Neutralized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    grid: Grid,
    ships: Vec<Ship>,
    decoy: Option<DecoyMarker>,
    buoys: Vec<DefenseBuoy>,
    shots_received: Vec<Coordinate>,
    shot_mask: CellMask,
    occupied: CellMask,
    neutralized: Vec<NeutralizedShot>,
}

impl Fleet {
    /// Create an empty fleet on `grid`.
    pub fn new(grid: Grid) -> Result<Self, BitBoardError> {
        let empty = CellMask::new(grid.size())?;
        Ok(Fleet {
            grid,
            ships: Vec::new(),
            decoy: None,
            buoys: Vec::new(),
            shots_received: Vec::new(),
            shot_mask: empty,
            occupied: empty,
            neutralized: Vec::new(),
        })
    }

    /// Place `spec` from `origin` along `orientation`.
    pub fn place_ship(
        &mut self,
        spec: &ShipSpec,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if self.ships.iter().any(|s| s.id() == spec.id()) {
            return Err(PlacementError::WrongShipCount);
        }
        let ship = Ship::new(spec.clone(), origin, orientation, self.grid)?;
        let mask = CellMask::from_cells(self.grid.size(), ship.placements().iter().copied())?;
        // ensure no overlap
        if !(self.occupied & mask).is_empty() {
            return Err(PlacementError::Overlap);
        }
        self.occupied |= mask;
        self.ships.push(ship);
        Ok(())
    }

    /// Place the fleet's single decoy marker.
    pub fn place_decoy(&mut self, at: Coordinate) -> Result<(), PlacementError> {
        self.check_marker_cell(at)?;
        if self.decoy.is_some() {
            return Err(PlacementError::MarkerLimit);
        }
        self.occupied.set(at)?;
        self.decoy = Some(DecoyMarker { position: at });
        Ok(())
    }

    /// Place a defense buoy, allowing at most `limit` per fleet.
    pub fn place_buoy(&mut self, at: Coordinate, limit: usize) -> Result<(), PlacementError> {
        self.check_marker_cell(at)?;
        if self.buoys.len() >= limit {
            return Err(PlacementError::MarkerLimit);
        }
        self.occupied.set(at)?;
        self.buoys.push(DefenseBuoy {
            position: at,
            used: false,
        });
        Ok(())
    }

    fn check_marker_cell(&self, at: Coordinate) -> Result<(), PlacementError> {
        if !self.grid.in_bounds(at) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.occupied.get(at) {
            return Err(PlacementError::Overlap);
        }
        Ok(())
    }

    /// Grant bonus health to the ship with `ship_id`. Returns false if it is not placed.
    pub fn reinforce(&mut self, ship_id: u8) -> bool {
        match self.ships.iter_mut().find(|s| s.id() == ship_id) {
            Some(ship) => {
                ship.reinforce();
                true
            }
            None => false,
        }
    }

    /// True once every catalog ship and the required markers are placed.
    pub fn is_complete(&self, catalog: &[ShipSpec], decoy_required: bool, buoys: usize) -> bool {
        self.ships.len() == catalog.len()
            && catalog
                .iter()
                .all(|spec| self.ships.iter().any(|s| s.id() == spec.id()))
            && self.decoy.is_some() == decoy_required
            && self.buoys.len() == buoys
    }

    /// No two placements share a cell and no shot is recorded twice.
    pub fn check_invariants(&self) -> bool {
        let Ok(mut seen) = CellMask::new(self.grid.size()) else {
            return false;
        };
        let markers = self
            .decoy
            .iter()
            .map(|d| d.position)
            .chain(self.buoys.iter().map(|b| b.position));
        for at in self
            .ships
            .iter()
            .flat_map(|s| s.placements().iter().copied())
            .chain(markers)
        {
            if seen.get(at) || seen.set(at).is_err() {
                return false;
            }
        }
        self.shot_mask.count_ones() == self.shots_received.len()
    }

    /// Index of the ship occupying `at`.
    pub fn ship_at(&self, at: Coordinate) -> Option<usize> {
        self.ships.iter().position(|s| s.contains(at))
    }

    /// Armed trap sitting on `at`.
    pub fn trap_at(&self, at: Coordinate) -> Option<TrapKind> {
        if self.decoy.is_some_and(|d| d.position == at) {
            return Some(TrapKind::Decoy);
        }
        if self.buoys.iter().any(|b| !b.used && b.position == at) {
            return Some(TrapKind::Buoy);
        }
        None
    }

    /// Consume the trap on `at`, if any.
    pub(crate) fn spring_trap(&mut self, at: Coordinate) -> Option<TrapKind> {
        if self.decoy.is_some_and(|d| d.position == at) {
            self.decoy = None;
            return Some(TrapKind::Decoy);
        }
        if let Some(buoy) = self.buoys.iter_mut().find(|b| !b.used && b.position == at) {
            buoy.used = true;
            return Some(TrapKind::Buoy);
        }
        None
    }

    pub(crate) fn hit_ship(&mut self, index: usize, at: Coordinate) -> HitEffect {
        match self.ships.get_mut(index) {
            Some(ship) => ship.register_hit(at),
            None => HitEffect::Missed,
        }
    }

    /// Close `at`: it can no longer be fired upon.
    pub(crate) fn record_shot(&mut self, at: Coordinate) {
        if self.shot_mask.get(at) {
            return;
        }
        if self.shot_mask.set(at).is_ok() {
            self.shots_received.push(at);
        }
    }

    pub(crate) fn log_neutralized(&mut self, at: Coordinate, kind: Neutralized) {
        self.neutralized.push(NeutralizedShot { at, kind });
    }

    pub fn has_been_shot(&self, at: Coordinate) -> bool {
        self.shot_mask.get(at)
    }

    /// Ship cells that have neither been damaged nor fired upon.
    pub fn open_ship_cells(&self) -> Vec<Coordinate> {
        self.ships
            .iter()
            .flat_map(|s| s.placements().iter().copied().filter(move |c| !s.is_hit(*c)))
            .filter(|c| !self.shot_mask.get(*c))
            .collect()
    }

    /// True when the fleet has ships and all of them are sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk())
    }

    /// Lengths of ships still afloat.
    pub fn remaining_lengths(&self) -> Vec<usize> {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(|s| s.spec().length())
            .collect()
    }

    /// Returns a random non-overlapping origin and orientation for `spec`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        spec: &ShipSpec,
    ) -> Result<(Coordinate, Orientation), PlacementError> {
        let n = self.grid.size();
        if spec.length() > n {
            return Err(PlacementError::OutOfBounds);
        }
        for _ in 0..RANDOM_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (n - 1, n - spec.length()),
                Orientation::Vertical => (n - spec.length(), n - 1),
            };
            let origin = Coordinate::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.fits(origin, orient, spec.length()) {
                return Ok((origin, orient));
            }
        }
        // crowded board: take the first free slot
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            for origin in self.grid.cells() {
                if self.fits(origin, orient, spec.length()) {
                    return Ok((origin, orient));
                }
            }
        }
        Err(PlacementError::Overlap)
    }

    /// Returns a random unoccupied cell for a marker.
    pub fn random_free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coordinate> {
        let free: Vec<Coordinate> = (!self.occupied).iter().collect();
        if free.is_empty() {
            None
        } else {
            Some(free[rng.random_range(0..free.len())])
        }
    }

    fn fits(&self, origin: Coordinate, orientation: Orientation, len: usize) -> bool {
        match self.grid.segment(origin, orientation, len) {
            Some(cells) => cells.iter().all(|c| !self.occupied.get(*c)),
            None => false,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn decoy(&self) -> Option<DecoyMarker> {
        self.decoy
    }

    pub fn buoys(&self) -> &[DefenseBuoy] {
        &self.buoys
    }

    pub fn shots_received(&self) -> &[Coordinate] {
        &self.shots_received
    }

    /// Cells closed by a recorded shot.
    pub fn shot_mask(&self) -> CellMask {
        self.shot_mask
    }

    pub fn neutralized(&self) -> &[NeutralizedShot] {
        &self.neutralized
    }

    /// Cells holding a ship or marker.
    pub fn occupancy(&self) -> CellMask {
        self.occupied
    }
}
