//! Modifier abilities a side may bring into a match.
//!
//! Every advantage is described by one row of [`Advantage::info`]; the
//! resolver matches on the enum directly, so adding an advantage is a
//! compile-checked change.

use core::fmt;
use core::str::FromStr;

use crate::core::grid::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Advantage {
    RadarScan,
    ExtraShot,
    GhostShield,
    ReinforcedHull,
    DecoyBuoy,
    VolleyFire,
    EmpBlast,
    Sabotage,
    TargetingComputer,
    SalvageCrew,
}

/// Active advantages consume the holder's turn; passive ones trigger on events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AdvantageKind {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvantageInfo {
    pub kind: AdvantageKind,
    pub usable_once: bool,
    pub title: &'static str,
    pub summary: &'static str,
}

impl Advantage {
    pub const ALL: [Advantage; 10] = [
        Advantage::RadarScan,
        Advantage::ExtraShot,
        Advantage::GhostShield,
        Advantage::ReinforcedHull,
        Advantage::DecoyBuoy,
        Advantage::VolleyFire,
        Advantage::EmpBlast,
        Advantage::Sabotage,
        Advantage::TargetingComputer,
        Advantage::SalvageCrew,
    ];

    pub const fn info(self) -> AdvantageInfo {
        use AdvantageKind::{Active, Passive};
        let (kind, usable_once, title, summary) = match self {
            Advantage::RadarScan => (Active, true, "Satellite Scan", "Reveal a 2x2 area of the enemy grid."),
            Advantage::ExtraShot => (Passive, true, "Rapid Fire", "Your next hit grants another shot."),
            Advantage::GhostShield => (Passive, true, "Ghost Shield", "The first enemy shot is guaranteed to miss."),
            Advantage::ReinforcedHull => (Passive, false, "Reinforced Hull", "Your largest ship survives one extra hit."),
            Advantage::DecoyBuoy => (Passive, false, "Decoy Buoy", "A fake ship signature wastes an enemy turn."),
            Advantage::VolleyFire => (Active, true, "Volley Fire", "Fire on a whole column; only the first ship hit takes damage."),
            Advantage::EmpBlast => (Active, true, "EMP Blast", "Disable the enemy advantage for their next turn."),
            Advantage::Sabotage => (Passive, false, "Sabotage", "25% chance to skip each enemy turn."),
            Advantage::TargetingComputer => (Passive, true, "Targeting Computer", "Your first miss is rerouted onto a ship."),
            Advantage::SalvageCrew => (Passive, false, "Salvage Crew", "Recover part of the wager on a loss."),
        };
        AdvantageInfo {
            kind,
            usable_once,
            title,
            summary,
        }
    }

    pub const fn kind(self) -> AdvantageKind {
        self.info().kind
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Advantage::RadarScan => "radar_scan",
            Advantage::ExtraShot => "extra_shot",
            Advantage::GhostShield => "ghost_shield",
            Advantage::ReinforcedHull => "reinforced_hull",
            Advantage::DecoyBuoy => "decoy_buoy",
            Advantage::VolleyFire => "volley_fire",
            Advantage::EmpBlast => "emp_blast",
            Advantage::Sabotage => "sabotage",
            Advantage::TargetingComputer => "targeting_computer",
            Advantage::SalvageCrew => "salvage_crew",
        }
    }
}

impl fmt::Display for Advantage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown advantage")]
pub struct UnknownAdvantage;

impl FromStr for Advantage {
    type Err = UnknownAdvantage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Advantage::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or(UnknownAdvantage)
    }
}

/// An advantage bound to a side along with its consumption state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvantageSlot {
    pub advantage: Advantage,
    pub used: bool,
}

impl AdvantageSlot {
    pub const fn new(advantage: Advantage) -> Self {
        Self {
            advantage,
            used: false,
        }
    }

    /// Whether `want` is bound here and still has a charge.
    pub fn is_ready(&self, want: Advantage) -> bool {
        self.advantage == want && !(self.advantage.info().usable_once && self.used)
    }

    pub fn consume(&mut self) {
        self.used = true;
    }
}

/// Arguments for triggering an active advantage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Activation {
    RadarScan { origin: Coordinate },
    VolleyFire { column: usize },
    EmpBlast,
}

impl Activation {
    pub const fn advantage(&self) -> Advantage {
        match self {
            Activation::RadarScan { .. } => Advantage::RadarScan,
            Activation::VolleyFire { .. } => Advantage::VolleyFire,
            Activation::EmpBlast => Advantage::EmpBlast,
        }
    }
}
