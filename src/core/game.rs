//! The match state machine, written as a pure reducer.
//!
//! [`MatchState::apply`] never mutates its receiver: it works on a copy and
//! returns the successor state together with the events the command
//! produced, or the error that rejected it.

use alloc::vec::Vec;
use log::{debug, info};
use rand::Rng;

use crate::core::advantage::{Activation, Advantage, AdvantageKind, AdvantageSlot};
use crate::core::common::{
    AdvantageError, ConfigError, EngineError, Outcome, PlacementError, ShotError, ShotOutcome, Side,
    SkipReason, TrapKind, TurnContinuation,
};
use crate::core::config::{MatchConfig, SABOTAGE_CHANCE};
use crate::core::fleet::Fleet;
use crate::core::grid::{Coordinate, Grid, Orientation};
use crate::core::resolver::{self, Engagement, ScanContact, ShotReport, VolleyReport};
use crate::core::view::BoardView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placement,
    /// Hand-off screen: waiting for the side to move to declare itself ready.
    Transition,
    Combat,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnState {
    Active,
    /// The turn owner may only end the turn.
    Forfeited(SkipReason),
}

/// Terminal result handed to the economy collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOutcome {
    pub outcome: Outcome,
    /// Per side: lost the match while holding `salvage_crew`.
    pub salvage: [bool; 2],
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::Winner(side) => Some(side),
            Outcome::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    PlaceShip {
        side: Side,
        ship_id: u8,
        origin: Coordinate,
        orientation: Orientation,
    },
    PlaceDecoy {
        side: Side,
        at: Coordinate,
    },
    PlaceBuoy {
        side: Side,
        at: Coordinate,
    },
    Ready {
        side: Side,
    },
    Fire {
        side: Side,
        at: Coordinate,
    },
    Activate {
        side: Side,
        activation: Activation,
    },
    EndTurn {
        side: Side,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    ShipPlaced { side: Side, ship_id: u8 },
    MarkerPlaced { side: Side, kind: TrapKind, at: Coordinate },
    PhaseChanged(Phase),
    Shot { side: Side, report: ShotReport },
    Volley { side: Side, report: VolleyReport },
    Scanned { side: Side, contacts: Vec<ScanContact> },
    EmpBlast { side: Side },
    TurnPassed { to: Side },
    TurnSkipped { side: Side, reason: SkipReason },
    Finished(MatchOutcome),
}

/// Successor state and the events that led to it.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: MatchState,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    config: MatchConfig,
    phase: Phase,
    turn: Side,
    turn_state: TurnState,
    turn_number: u32,
    fleets: [Fleet; 2],
    advantages: [Option<AdvantageSlot>; 2],
    disabled_next_turn: [bool; 2],
    revealed: [Vec<ScanContact>; 2],
    outcome: Option<MatchOutcome>,
}

/// Free-function form of [`MatchState::apply`].
pub fn apply<R: Rng + ?Sized>(
    state: &MatchState,
    command: Command,
    rng: &mut R,
) -> Result<Transition, EngineError> {
    state.apply(command, rng)
}

impl MatchState {
    /// Start a match in the placement phase with one optional advantage per side.
    pub fn new(config: MatchConfig, advantages: [Option<Advantage>; 2]) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.board_size);
        let fleet = Fleet::new(grid).map_err(|_| ConfigError::BoardTooLarge(config.board_size))?;
        Ok(Self {
            phase: Phase::Placement,
            turn: config.first_turn,
            turn_state: TurnState::Active,
            turn_number: 0,
            fleets: [fleet.clone(), fleet],
            advantages: advantages.map(|a| a.map(AdvantageSlot::new)),
            disabled_next_turn: [false; 2],
            revealed: [Vec::new(), Vec::new()],
            outcome: None,
            config,
        })
    }

    /// Apply `command` to a copy of this state.
    pub fn apply<R: Rng + ?Sized>(&self, command: Command, rng: &mut R) -> Result<Transition, EngineError> {
        let mut state = self.clone();
        let mut events = Vec::new();
        state.step(command, rng, &mut events)?;
        Ok(Transition { state, events })
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        command: Command,
        rng: &mut R,
        events: &mut Vec<Event>,
    ) -> Result<(), EngineError> {
        match command {
            Command::PlaceShip {
                side,
                ship_id,
                origin,
                orientation,
            } => {
                self.require_placement()?;
                let spec = self
                    .config
                    .spec(ship_id)
                    .cloned()
                    .ok_or(PlacementError::WrongShipCount)?;
                let reinforced = self.holds(side, Advantage::ReinforcedHull)
                    && self.config.flagship().map(|s| s.id()) == Some(ship_id);
                let fleet = &mut self.fleets[side.index()];
                fleet.place_ship(&spec, origin, orientation)?;
                if reinforced {
                    fleet.reinforce(ship_id);
                }
                debug!("{side} placed {} at {origin} {orientation:?}", spec.name());
                events.push(Event::ShipPlaced { side, ship_id });
                self.maybe_start_combat(rng, events);
            }
            Command::PlaceDecoy { side, at } => {
                self.require_placement()?;
                if !self.holds(side, Advantage::DecoyBuoy) {
                    return Err(PlacementError::MarkerLimit.into());
                }
                self.fleets[side.index()].place_decoy(at)?;
                events.push(Event::MarkerPlaced {
                    side,
                    kind: TrapKind::Decoy,
                    at,
                });
                self.maybe_start_combat(rng, events);
            }
            Command::PlaceBuoy { side, at } => {
                self.require_placement()?;
                self.fleets[side.index()].place_buoy(at, self.config.buoys_per_fleet)?;
                events.push(Event::MarkerPlaced {
                    side,
                    kind: TrapKind::Buoy,
                    at,
                });
                self.maybe_start_combat(rng, events);
            }
            Command::Ready { side } => {
                if self.phase != Phase::Transition {
                    return Err(ShotError::WrongPhase.into());
                }
                if side != self.turn {
                    return Err(ShotError::NotYourTurn.into());
                }
                self.set_phase(Phase::Combat, events);
            }
            Command::Fire { side, at } => {
                self.require_turn(side)?;
                let report = {
                    let mut eng = self.engagement(side);
                    resolver::resolve(&mut eng, at, rng)?
                };
                debug!("{side} fired at {at}: {:?} {:?}", report.outcome, report.effects);
                let continuation = report.continuation;
                let outcome = report.outcome;
                events.push(Event::Shot { side, report });
                if self.check_finished(events) {
                    return Ok(());
                }
                match continuation {
                    TurnContinuation::Pass => self.hand_over(rng, events),
                    TurnContinuation::Keep => {}
                    TurnContinuation::Forfeit => {
                        let kind = match outcome {
                            ShotOutcome::BuoyHit => TrapKind::Buoy,
                            _ => TrapKind::Decoy,
                        };
                        self.forfeit(side, SkipReason::Trap(kind), events);
                    }
                }
            }
            Command::Activate { side, activation } => {
                self.require_turn(side)?;
                self.check_activation(side, &activation)?;
                match activation {
                    Activation::RadarScan { origin } => {
                        let contacts = resolver::scan(&self.fleets[side.other().index()], origin)?;
                        let revealed = &mut self.revealed[side.index()];
                        for contact in &contacts {
                            if !revealed.iter().any(|c| c.at == contact.at) {
                                revealed.push(*contact);
                            }
                        }
                        debug!("{side} scanned {origin}: {contacts:?}");
                        events.push(Event::Scanned { side, contacts });
                    }
                    Activation::VolleyFire { column } => {
                        let report = {
                            let mut eng = self.engagement(side);
                            eng.attacker_advantage = None;
                            resolver::volley(&mut eng, column)?
                        };
                        debug!("{side} volleyed column {column}: {:?}", report.damaged_ship());
                        events.push(Event::Volley { side, report });
                    }
                    Activation::EmpBlast => {
                        self.disabled_next_turn[side.other().index()] = true;
                        debug!("{side} disabled {} for their next turn", side.other());
                        events.push(Event::EmpBlast { side });
                    }
                }
                if let Some(slot) = self.advantages[side.index()].as_mut() {
                    slot.consume();
                }
                if self.check_finished(events) {
                    return Ok(());
                }
                self.hand_over(rng, events);
            }
            Command::EndTurn { side } => {
                if self.phase != Phase::Combat {
                    return Err(ShotError::WrongPhase.into());
                }
                if side != self.turn {
                    return Err(ShotError::NotYourTurn.into());
                }
                if self.turn_state == TurnState::Active {
                    return Err(ShotError::TurnNotForfeited.into());
                }
                self.hand_over(rng, events);
            }
        }
        Ok(())
    }

    fn require_placement(&self) -> Result<(), PlacementError> {
        if self.phase == Phase::Placement {
            Ok(())
        } else {
            Err(PlacementError::WrongPhase)
        }
    }

    fn require_turn(&self, side: Side) -> Result<(), ShotError> {
        if self.phase != Phase::Combat {
            return Err(ShotError::WrongPhase);
        }
        if side != self.turn {
            return Err(ShotError::NotYourTurn);
        }
        if let TurnState::Forfeited(_) = self.turn_state {
            return Err(ShotError::TurnForfeited);
        }
        Ok(())
    }

    fn check_activation(&self, side: Side, activation: &Activation) -> Result<(), AdvantageError> {
        let slot = self.advantages[side.index()].ok_or(AdvantageError::NotBound)?;
        let info = slot.advantage.info();
        if info.kind == AdvantageKind::Passive {
            return Err(AdvantageError::Passive);
        }
        if info.usable_once && slot.used {
            return Err(AdvantageError::AlreadyUsed);
        }
        if self.disabled_next_turn[side.index()] {
            return Err(AdvantageError::Disabled);
        }
        if activation.advantage() != slot.advantage {
            return Err(AdvantageError::WrongActivation);
        }
        Ok(())
    }

    fn holds(&self, side: Side, advantage: Advantage) -> bool {
        self.advantages[side.index()].is_some_and(|slot| slot.advantage == advantage)
    }

    /// `side` attacking the other fleet.
    fn engagement(&mut self, side: Side) -> Engagement<'_> {
        let attacker_disabled = self.disabled_next_turn[side.index()];
        let [player_fleet, opponent_fleet] = &mut self.fleets;
        let [player_adv, opponent_adv] = &mut self.advantages;
        let (defender, attacker_advantage, defender_advantage) = match side {
            Side::Player => (opponent_fleet, player_adv.as_mut(), opponent_adv.as_mut()),
            Side::Opponent => (player_fleet, opponent_adv.as_mut(), player_adv.as_mut()),
        };
        Engagement {
            defender,
            attacker_advantage,
            defender_advantage,
            attacker_disabled,
        }
    }

    fn set_phase(&mut self, phase: Phase, events: &mut Vec<Event>) {
        info!("phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        events.push(Event::PhaseChanged(phase));
    }

    fn maybe_start_combat<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        if !Side::BOTH.iter().all(|s| self.fleet_complete(*s)) {
            return;
        }
        debug_assert!(self.fleets.iter().all(Fleet::check_invariants));
        self.set_phase(Phase::Transition, events);
        self.begin_turn(rng, events);
    }

    /// True once `side` has placed its catalog and required markers.
    pub fn fleet_complete(&self, side: Side) -> bool {
        self.fleets[side.index()].is_complete(
            &self.config.catalog,
            self.holds(side, Advantage::DecoyBuoy),
            self.config.buoys_per_fleet,
        )
    }

    /// Roll the opposing sabotage for the turn that is starting.
    fn begin_turn<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        self.turn_state = TurnState::Active;
        let saboteur = self.turn.other();
        if self.holds(saboteur, Advantage::Sabotage) && rng.random_bool(SABOTAGE_CHANCE) {
            self.forfeit(self.turn, SkipReason::Sabotage, events);
        }
    }

    fn forfeit(&mut self, side: Side, reason: SkipReason, events: &mut Vec<Event>) {
        debug!("{side} forfeits the turn: {reason:?}");
        self.turn_state = TurnState::Forfeited(reason);
        events.push(Event::TurnSkipped { side, reason });
    }

    fn hand_over<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        self.disabled_next_turn[self.turn.index()] = false;
        self.turn = self.turn.other();
        self.turn_number += 1;
        debug!("turn {} passes to {}", self.turn_number, self.turn);
        events.push(Event::TurnPassed { to: self.turn });
        if self.config.hot_seat {
            self.set_phase(Phase::Transition, events);
        }
        self.begin_turn(rng, events);
    }

    fn check_finished(&mut self, events: &mut Vec<Event>) -> bool {
        let [player, opponent] = &self.fleets;
        let Some(outcome) = resolver::evaluate_outcome(player, opponent) else {
            return false;
        };
        let salvage = Side::BOTH.map(|s| {
            outcome == Outcome::Winner(s.other()) && self.holds(s, Advantage::SalvageCrew)
        });
        let result = MatchOutcome { outcome, salvage };
        info!("match finished: {outcome:?}");
        self.outcome = Some(result);
        self.set_phase(Phase::Finished, events);
        events.push(Event::Finished(result));
        true
    }

    /// What `side` knows about the opposing fleet.
    pub fn view_for(&self, side: Side) -> BoardView {
        BoardView::observe(
            &self.fleets[side.other().index()],
            &self.revealed[side.index()],
            self.advantages[side.index()],
            self.disabled_next_turn[side.index()],
        )
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn_state
    }

    /// Hand-overs so far.
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        &self.fleets[side.index()]
    }

    pub fn advantage(&self, side: Side) -> Option<AdvantageSlot> {
        self.advantages[side.index()]
    }

    /// EMP flag for `side`'s current or next turn.
    pub fn is_disabled(&self, side: Side) -> bool {
        self.disabled_next_turn[side.index()]
    }

    pub fn revealed(&self, side: Side) -> &[ScanContact] {
        &self.revealed[side.index()]
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

/// Commands that deploy `side`'s missing ships and markers at random.
pub fn random_deployment<R: Rng + ?Sized>(
    state: &MatchState,
    side: Side,
    rng: &mut R,
) -> Result<Vec<Command>, PlacementError> {
    let mut fleet = state.fleet(side).clone();
    let mut commands = Vec::new();
    for spec in &state.config().catalog {
        if fleet.ships().iter().any(|s| s.id() == spec.id()) {
            continue;
        }
        let (origin, orientation) = fleet.random_placement(rng, spec)?;
        fleet.place_ship(spec, origin, orientation)?;
        commands.push(Command::PlaceShip {
            side,
            ship_id: spec.id(),
            origin,
            orientation,
        });
    }
    if state.holds(side, Advantage::DecoyBuoy) && fleet.decoy().is_none() {
        let at = fleet.random_free_cell(rng).ok_or(PlacementError::Overlap)?;
        fleet.place_decoy(at)?;
        commands.push(Command::PlaceDecoy { side, at });
    }
    let limit = state.config().buoys_per_fleet;
    while fleet.buoys().len() < limit {
        let at = fleet.random_free_cell(rng).ok_or(PlacementError::Overlap)?;
        fleet.place_buoy(at, limit)?;
        commands.push(Command::PlaceBuoy { side, at });
    }
    Ok(commands)
}
