//! The attacker's knowledge of an opposing grid.

use alloc::string::String;
use alloc::vec::Vec;

use crate::core::advantage::AdvantageSlot;
use crate::core::bitboard::CellMask;
use crate::core::fleet::{Fleet, Neutralized};
use crate::core::grid::{Coordinate, Grid};
use crate::core::resolver::ScanContact;

/// Everything a strategy may see of the defending fleet. Ship positions are
/// only exposed once they have been hit, sunk, absorbed or pinged by radar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub size: usize,
    /// Closed cells, in firing order.
    pub shots: Vec<Coordinate>,
    /// Damaged ship segments, sunk or not.
    pub hits: Vec<Coordinate>,
    pub sunk_cells: Vec<Coordinate>,
    pub remaining_lengths: Vec<usize>,
    /// Open cells reported as ships (absorbed or grazed) that still need firing.
    pub known_targets: Vec<Coordinate>,
    /// Open cells where radar found a signature.
    pub contacts: Vec<Coordinate>,
    pub advantage: Option<AdvantageSlot>,
    pub advantage_disabled: bool,
    closed: CellMask,
}

impl BoardView {
    pub fn observe(
        defender: &Fleet,
        revealed: &[ScanContact],
        advantage: Option<AdvantageSlot>,
        advantage_disabled: bool,
    ) -> Self {
        let grid = defender.grid();
        let shots = defender.shots_received().to_vec();
        let closed = defender.shot_mask();
        let hits = defender
            .ships()
            .iter()
            .flat_map(|s| s.hits().iter().copied())
            .collect();
        let sunk_cells = defender
            .ships()
            .iter()
            .filter(|s| s.is_sunk())
            .flat_map(|s| s.placements().iter().copied())
            .collect();
        let mut known_targets: Vec<Coordinate> = Vec::new();
        for n in defender.neutralized() {
            let still_open = !closed.get(n.at) && n.kind != Neutralized::Deflected;
            if still_open && !known_targets.contains(&n.at) {
                known_targets.push(n.at);
            }
        }
        let contacts = revealed
            .iter()
            .filter(|c| c.contact && !closed.get(c.at))
            .map(|c| c.at)
            .collect();
        BoardView {
            size: grid.size(),
            shots,
            hits,
            sunk_cells,
            remaining_lengths: defender.remaining_lengths(),
            known_targets,
            contacts,
            advantage,
            advantage_disabled,
            closed,
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.size)
    }

    /// True when `at` is on the board and has not been closed by a shot.
    pub fn is_open(&self, at: Coordinate) -> bool {
        self.grid().in_bounds(at) && !self.closed.get(at)
    }

    pub fn open_cells(&self) -> Vec<Coordinate> {
        self.grid().cells().filter(|c| self.is_open(*c)).collect()
    }

    /// Hit segments belonging to ships that are still afloat.
    pub fn unresolved_hits(&self) -> Vec<Coordinate> {
        self.hits
            .iter()
            .copied()
            .filter(|c| !self.sunk_cells.contains(c))
            .collect()
    }

    /// Text grid: `O` open, `M` miss, `H` hit; cells separated by spaces.
    pub fn render_grid(&self) -> String {
        let mut out = String::with_capacity(self.size * self.size * 2);
        for row in 0..self.size {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.size {
                let at = Coordinate::new(row, col);
                if col > 0 {
                    out.push(' ');
                }
                out.push(if self.hits.contains(&at) {
                    'H'
                } else if self.closed.get(at) {
                    'M'
                } else {
                    'O'
                });
            }
        }
        out
    }
}
