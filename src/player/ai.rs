use rand::{rngs::SmallRng, SeedableRng};

use crate::core::{
    ai, BoardView, Command, Coordinate, Grid, HuntState, MatchState, ShotReport, Side, VolleyReport,
    BOARD_SIZE,
};

use super::{deploy_randomly, Action, OpponentStrategy};

/// Local hunt/search opponent. Deterministic for a given seed.
pub struct HeuristicStrategy {
    rng: SmallRng,
    hunt: HuntState,
    grid: Grid,
    use_advantages: bool,
}

impl HeuristicStrategy {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            hunt: HuntState::new(),
            grid: Grid::new(BOARD_SIZE),
            use_advantages: true,
        }
    }

    /// Never trigger active advantages; always fire.
    pub fn without_advantages(mut self) -> Self {
        self.use_advantages = false;
        self
    }

    /// Synchronous form of `next_move`, shared with wrapping strategies.
    pub fn choose(&mut self, view: &BoardView) -> Coordinate {
        self.grid = view.grid();
        self.hunt.next_target(view, &mut self.rng)
    }

    pub fn hunt(&self) -> &HuntState {
        &self.hunt
    }
}

#[async_trait::async_trait]
impl OpponentStrategy for HeuristicStrategy {
    fn deploy(&mut self, state: &MatchState, side: Side) -> anyhow::Result<Vec<Command>> {
        deploy_randomly(state, side, &mut self.rng)
    }

    async fn next_move(&mut self, view: &BoardView) -> Coordinate {
        self.choose(view)
    }

    async fn next_action(&mut self, view: &BoardView) -> Action {
        if self.use_advantages {
            if let Some(activation) = ai::plan_activation(view) {
                return Action::Activate(activation);
            }
        }
        Action::Fire(self.choose(view))
    }

    fn record_outcome(&mut self, report: &ShotReport) {
        self.hunt.record(report, self.grid);
    }

    fn record_volley(&mut self, report: &VolleyReport) {
        self.hunt.record_volley(report, self.grid);
    }
}
