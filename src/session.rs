#![cfg(feature = "std")]

//! Drives one match between two strategies.
//!
//! The session owns the `MatchState` exclusively and awaits each strategy
//! before applying its command, so at most one command is ever in flight.

use anyhow::{anyhow, bail};
use log::{debug, info, warn};
use rand::rngs::SmallRng;

use crate::core::{
    Activation, Command, EngineError, Event, MatchOutcome, MatchState, Phase, Side, TurnState,
};
use crate::player::{Action, OpponentStrategy};

/// Rejected actions tolerated from a strategy before the session fires for it.
const MAX_REJECTIONS: usize = 3;

/// Everything the economy collaborator needs once a match is over.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: MatchState,
    /// Accepted firing actions (shots and volleys) per side.
    pub shots_fired: [usize; 2],
}

pub struct MatchSession {
    state: MatchState,
    strategies: [Box<dyn OpponentStrategy>; 2],
    rng: SmallRng,
    shots_fired: [usize; 2],
}

impl MatchSession {
    pub fn new(
        state: MatchState,
        player: Box<dyn OpponentStrategy>,
        opponent: Box<dyn OpponentStrategy>,
        rng: SmallRng,
    ) -> Self {
        Self {
            state,
            strategies: [player, opponent],
            rng,
            shots_fired: [0; 2],
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    fn apply(&mut self, command: Command) -> Result<Vec<Event>, EngineError> {
        let transition = self.state.apply(command, &mut self.rng)?;
        self.state = transition.state;
        Ok(transition.events)
    }

    /// Let each strategy complete its own deployment.
    pub fn deploy(&mut self) -> anyhow::Result<()> {
        for side in Side::BOTH {
            let commands = self.strategies[side.index()].deploy(&self.state, side)?;
            for command in commands {
                self.apply(command)
                    .map_err(|e| anyhow!("{side} deployment rejected: {e}"))?;
            }
        }
        if self.state.phase() == Phase::Placement {
            bail!("fleets are incomplete after deployment");
        }
        Ok(())
    }

    /// Play the match to completion.
    pub async fn run(mut self) -> anyhow::Result<MatchResult> {
        if self.state.phase() == Phase::Placement {
            self.deploy()?;
        }
        let cells = self.state.config().board_size.pow(2);
        let max_steps = 8 * cells + 64;
        let mut rejections = 0;

        for _ in 0..max_steps {
            let side = self.state.turn();
            match self.state.phase() {
                Phase::Finished => break,
                Phase::Placement => bail!("match fell back into placement"),
                Phase::Transition => {
                    self.apply(Command::Ready { side })?;
                    continue;
                }
                Phase::Combat => {}
            }
            if let TurnState::Forfeited(reason) = self.state.turn_state() {
                debug!("{side} turn skipped: {reason:?}");
                self.apply(Command::EndTurn { side })?;
                continue;
            }

            let view = self.state.view_for(side);
            let action = if rejections >= MAX_REJECTIONS {
                let at = view
                    .open_cells()
                    .first()
                    .copied()
                    .ok_or_else(|| anyhow!("{side} has no open cell to fire at"))?;
                warn!("{side} keeps proposing rejected moves; firing at {at}");
                Action::Fire(at)
            } else {
                self.strategies[side.index()].next_action(&view).await
            };
            let command = match action {
                Action::Fire(at) => Command::Fire { side, at },
                Action::Activate(activation) => Command::Activate { side, activation },
            };
            match self.apply(command) {
                Ok(events) => {
                    rejections = 0;
                    if matches!(
                        action,
                        Action::Fire(_) | Action::Activate(Activation::VolleyFire { .. })
                    ) {
                        self.shots_fired[side.index()] += 1;
                    }
                    self.feedback(side, &events);
                }
                Err(e) => {
                    warn!("{side} action {action:?} rejected: {e}");
                    rejections += 1;
                }
            }
        }

        let outcome = self
            .state
            .outcome()
            .ok_or_else(|| anyhow!("match did not finish within {max_steps} steps"))?;
        info!(
            "match over after {} turns: {:?}",
            self.state.turn_number(),
            outcome.outcome
        );
        Ok(MatchResult {
            outcome,
            final_state: self.state,
            shots_fired: self.shots_fired,
        })
    }

    fn feedback(&mut self, side: Side, events: &[Event]) {
        let strategy = &mut self.strategies[side.index()];
        for event in events {
            match event {
                Event::Shot { side: s, report } if *s == side => strategy.record_outcome(report),
                Event::Volley { side: s, report } if *s == side => strategy.record_volley(report),
                _ => {}
            }
        }
    }
}
