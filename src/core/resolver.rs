//! Resolution of shots, volleys and radar scans against a defending fleet.
//!
//! Every entry point validates its target before touching the fleet, so a
//! rejected action leaves the engagement unchanged.

use alloc::vec::Vec;
use rand::Rng;

use crate::core::advantage::{Advantage, AdvantageSlot};
use crate::core::common::{Effect, Outcome, ShotError, ShotOutcome, Side, TrapKind, TurnContinuation};
use crate::core::config::RADAR_BLOCK;
use crate::core::fleet::{Fleet, Neutralized};
use crate::core::grid::Coordinate;
use crate::core::ship::HitEffect;

/// One attacker acting on one defending fleet.
pub struct Engagement<'a> {
    pub defender: &'a mut Fleet,
    pub attacker_advantage: Option<&'a mut AdvantageSlot>,
    pub defender_advantage: Option<&'a mut AdvantageSlot>,
    /// Attacker passives are suppressed this turn (EMP).
    pub attacker_disabled: bool,
}

impl Engagement<'_> {
    fn attacker_ready(&self, want: Advantage) -> bool {
        !self.attacker_disabled
            && self
                .attacker_advantage
                .as_deref()
                .is_some_and(|slot| slot.is_ready(want))
    }

    fn consume_attacker(&mut self) {
        if let Some(slot) = self.attacker_advantage.as_deref_mut() {
            slot.consume();
        }
    }

    /// Consume the defender's ghost shield if it is still charged.
    fn raise_shield(&mut self) -> bool {
        match self.defender_advantage.as_deref_mut() {
            Some(slot) if slot.is_ready(Advantage::GhostShield) => {
                slot.consume();
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    /// Cell the attacker asked for.
    pub requested: Coordinate,
    /// Cell actually resolved, which differs after a targeting redirect.
    pub target: Coordinate,
    pub outcome: ShotOutcome,
    pub effects: Vec<Effect>,
    pub continuation: TurnContinuation,
}

/// What a volley did to one cell of its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum VolleyImpact {
    Water,
    Damaged { ship_id: u8, sunk: bool },
    Absorbed { ship_id: u8 },
    /// Passed over a ship after the volley's single hit landed.
    Grazed { ship_id: u8 },
    Trap(TrapKind),
    Deflected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct VolleyShot {
    pub at: Coordinate,
    pub impact: VolleyImpact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct VolleyReport {
    pub column: usize,
    pub shots: Vec<VolleyShot>,
}

impl VolleyReport {
    /// The ship that took the volley's damage, if any.
    pub fn damaged_ship(&self) -> Option<u8> {
        self.shots.iter().find_map(|s| match s.impact {
            VolleyImpact::Damaged { ship_id, .. } => Some(ship_id),
            _ => None,
        })
    }

    pub fn was_deflected(&self) -> bool {
        self.shots.iter().any(|s| s.impact == VolleyImpact::Deflected)
    }
}

/// A cell revealed by radar and whether something answered the ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanContact {
    pub at: Coordinate,
    pub contact: bool,
}

fn check_target(fleet: &Fleet, at: Coordinate) -> Result<(), ShotError> {
    if !fleet.grid().in_bounds(at) {
        return Err(ShotError::OutOfBounds(at));
    }
    if fleet.has_been_shot(at) {
        return Err(ShotError::AlreadyFired(at));
    }
    Ok(())
}

/// Resolve a single shot at `requested`.
pub fn resolve<R: Rng + ?Sized>(
    eng: &mut Engagement<'_>,
    requested: Coordinate,
    rng: &mut R,
) -> Result<ShotReport, ShotError> {
    check_target(eng.defender, requested)?;
    let mut effects = Vec::new();

    if eng.raise_shield() {
        eng.defender.log_neutralized(requested, Neutralized::Deflected);
        effects.push(Effect::ShieldDeflected);
        return Ok(ShotReport {
            requested,
            target: requested,
            outcome: ShotOutcome::Miss,
            effects,
            continuation: TurnContinuation::Pass,
        });
    }

    let mut target = requested;
    let raw_miss = eng.defender.ship_at(target).is_none() && eng.defender.trap_at(target).is_none();
    if raw_miss && eng.attacker_ready(Advantage::TargetingComputer) {
        let open = eng.defender.open_ship_cells();
        if !open.is_empty() {
            target = open[rng.random_range(0..open.len())];
            eng.consume_attacker();
            effects.push(Effect::TargetingRedirect { from: requested });
        }
    }

    if let Some(kind) = eng.defender.spring_trap(target) {
        eng.defender.record_shot(target);
        effects.push(Effect::TrapSprung(kind));
        let outcome = match kind {
            TrapKind::Decoy => ShotOutcome::DecoyHit,
            TrapKind::Buoy => ShotOutcome::BuoyHit,
        };
        return Ok(ShotReport {
            requested,
            target,
            outcome,
            effects,
            continuation: TurnContinuation::Forfeit,
        });
    }

    let outcome = match eng.defender.ship_at(target) {
        Some(index) => {
            let ship_id = eng.defender.ships()[index].id();
            match eng.defender.hit_ship(index, target) {
                HitEffect::Absorbed => {
                    eng.defender.log_neutralized(target, Neutralized::Absorbed);
                    effects.push(Effect::HullAbsorbed { ship_id });
                    ShotOutcome::Hit { absorbed: true }
                }
                HitEffect::Damaged => {
                    eng.defender.record_shot(target);
                    ShotOutcome::Hit { absorbed: false }
                }
                HitEffect::Sunk => {
                    eng.defender.record_shot(target);
                    ShotOutcome::Sunk { ship_id }
                }
                HitEffect::AlreadyHit | HitEffect::Missed => {
                    return Err(ShotError::AlreadyFired(target));
                }
            }
        }
        None => {
            eng.defender.record_shot(target);
            ShotOutcome::Miss
        }
    };

    let mut continuation = TurnContinuation::Pass;
    if outcome.is_damage() && eng.attacker_ready(Advantage::ExtraShot) {
        eng.consume_attacker();
        effects.push(Effect::ExtraShot);
        continuation = TurnContinuation::Keep;
    }

    Ok(ShotReport {
        requested,
        target,
        outcome,
        effects,
        continuation,
    })
}

/// Fire at every open cell of `column`. Only the first ship cell met in row
/// order takes the hit; later ship cells are grazed and stay open.
pub fn volley(eng: &mut Engagement<'_>, column: usize) -> Result<VolleyReport, ShotError> {
    let grid = eng.defender.grid();
    if column >= grid.size() {
        return Err(ShotError::OutOfBounds(Coordinate::new(0, column)));
    }
    let cells: Vec<Coordinate> = grid
        .column(column)
        .filter(|c| !eng.defender.has_been_shot(*c))
        .collect();
    let mut shots = Vec::with_capacity(cells.len());

    if eng.raise_shield() {
        for at in cells {
            eng.defender.log_neutralized(at, Neutralized::Deflected);
            shots.push(VolleyShot {
                at,
                impact: VolleyImpact::Deflected,
            });
        }
        return Ok(VolleyReport { column, shots });
    }

    let mut landed = false;
    for at in cells {
        let impact = if let Some(kind) = eng.defender.spring_trap(at) {
            eng.defender.record_shot(at);
            VolleyImpact::Trap(kind)
        } else if let Some(index) = eng.defender.ship_at(at) {
            let ship_id = eng.defender.ships()[index].id();
            if landed {
                eng.defender.log_neutralized(at, Neutralized::Grazed);
                VolleyImpact::Grazed { ship_id }
            } else {
                landed = true;
                match eng.defender.hit_ship(index, at) {
                    HitEffect::Absorbed => {
                        eng.defender.log_neutralized(at, Neutralized::Absorbed);
                        VolleyImpact::Absorbed { ship_id }
                    }
                    HitEffect::Sunk => {
                        eng.defender.record_shot(at);
                        VolleyImpact::Damaged { ship_id, sunk: true }
                    }
                    _ => {
                        eng.defender.record_shot(at);
                        VolleyImpact::Damaged { ship_id, sunk: false }
                    }
                }
            }
        } else {
            eng.defender.record_shot(at);
            VolleyImpact::Water
        };
        shots.push(VolleyShot { at, impact });
    }
    Ok(VolleyReport { column, shots })
}

/// Reveal the radar block anchored at `origin`, clipped at the board edge.
/// Decoys and buoys answer like ships.
pub fn scan(fleet: &Fleet, origin: Coordinate) -> Result<Vec<ScanContact>, ShotError> {
    let grid = fleet.grid();
    if !grid.in_bounds(origin) {
        return Err(ShotError::OutOfBounds(origin));
    }
    Ok(grid
        .block(origin, RADAR_BLOCK, RADAR_BLOCK)
        .into_iter()
        .map(|at| ScanContact {
            at,
            contact: fleet.ship_at(at).is_some() || fleet.trap_at(at).is_some(),
        })
        .collect())
}

/// Win check run after every resolving action. Both fleets sunk is a draw.
pub fn evaluate_outcome(player: &Fleet, opponent: &Fleet) -> Option<Outcome> {
    match (player.all_sunk(), opponent.all_sunk()) {
        (true, true) => Some(Outcome::Draw),
        (true, false) => Some(Outcome::Winner(Side::Opponent)),
        (false, true) => Some(Outcome::Winner(Side::Player)),
        (false, false) => None,
    }
}
