use broadside::{
    plan_activation, random_deployment, Advantage, Command, Fleet, MatchConfig, MatchState,
    Outcome, Phase, Side, TurnState,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn pick_advantage(rng: &mut SmallRng) -> Option<Advantage> {
    let i = rng.random_range(0..=Advantage::ALL.len());
    Advantage::ALL.get(i).copied()
}

fn deployed_match(seed: u64, buoys: usize, hot_seat: bool) -> (MatchState, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = MatchConfig {
        buoys_per_fleet: buoys,
        hot_seat,
        ..MatchConfig::default()
    };
    let advantages = [pick_advantage(&mut rng), pick_advantage(&mut rng)];
    let mut state = MatchState::new(config, advantages).unwrap();
    for side in Side::BOTH {
        for command in random_deployment(&state, side, &mut rng).unwrap() {
            state = state.apply(command, &mut rng).unwrap().state;
        }
    }
    (state, rng)
}

fn damage_is_consistent(fleet: &Fleet) -> bool {
    fleet.check_invariants()
        && fleet.ships().iter().all(|ship| {
            let hits = ship.hits();
            hits.len() <= ship.placements().len()
                && hits.iter().all(|h| ship.contains(*h) && fleet.has_been_shot(*h))
                && hits.iter().enumerate().all(|(i, h)| !hits[..i].contains(h))
                && ship.is_sunk() == (hits.len() == ship.placements().len())
        })
}

/// Drive a match to completion with random legal play.
fn play_out(mut state: MatchState, rng: &mut SmallRng) -> Result<MatchState, TestCaseError> {
    let mut shots = [0usize; 2];
    for _ in 0..2_000 {
        if state.is_finished() {
            return Ok(state);
        }
        let side = state.turn();
        let command = if state.phase() == Phase::Transition {
            Command::Ready { side }
        } else if let TurnState::Forfeited(_) = state.turn_state() {
            Command::EndTurn { side }
        } else {
            let view = state.view_for(side);
            let activation = plan_activation(&view).filter(|_| rng.random_bool(0.3));
            match activation {
                Some(activation) if state.apply(Command::Activate { side, activation }, rng).is_ok() => {
                    Command::Activate { side, activation }
                }
                _ => {
                    let open = view.open_cells();
                    prop_assert!(!open.is_empty());
                    Command::Fire {
                        side,
                        at: open[rng.random_range(0..open.len())],
                    }
                }
            }
        };
        state = match state.apply(command, rng) {
            Ok(t) => t.state,
            Err(err) => return Err(TestCaseError::fail(format!("{command:?} rejected: {err}"))),
        };
        for s in Side::BOTH {
            let fleet = state.fleet(s);
            prop_assert!(damage_is_consistent(fleet));
            // closed cells only ever grow
            prop_assert!(fleet.shots_received().len() >= shots[s.index()]);
            shots[s.index()] = fleet.shots_received().len();
        }
    }
    Err(TestCaseError::fail("match did not finish"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn deployment_never_overlaps(seed in any::<u64>(), buoys in 0usize..=2) {
        let (state, _) = deployed_match(seed, buoys, false);
        prop_assert_ne!(state.phase(), Phase::Placement);
        for side in Side::BOTH {
            let fleet = state.fleet(side);
            prop_assert!(fleet.check_invariants());
            let ship_cells: usize = fleet.ships().iter().map(|s| s.placements().len()).sum();
            let markers = fleet.buoys().len() + usize::from(fleet.decoy().is_some());
            prop_assert_eq!(fleet.occupancy().count_ones(), ship_cells + markers);
        }
    }

    #[test]
    fn matches_end_with_a_single_result(seed in any::<u64>(), buoys in 0usize..=2, hot_seat in any::<bool>()) {
        let (state, mut rng) = deployed_match(seed, buoys, hot_seat);
        let end = play_out(state, &mut rng)?;
        let outcome = end.outcome().unwrap();
        prop_assert_eq!(end.phase(), Phase::Finished);
        match outcome.outcome {
            Outcome::Winner(side) => {
                prop_assert!(end.fleet(side.other()).all_sunk());
                prop_assert!(!end.fleet(side).all_sunk());
                prop_assert!(!outcome.salvage[side.index()]);
            }
            Outcome::Draw => {
                prop_assert!(end.fleet(Side::Player).all_sunk());
                prop_assert!(end.fleet(Side::Opponent).all_sunk());
            }
        }
    }

    #[test]
    fn rejected_commands_change_nothing(seed in any::<u64>(), row in 0usize..10, col in 0usize..10) {
        let (state, mut rng) = deployed_match(seed, 0, false);
        let before = state.clone();
        let command = Command::Fire { side: state.turn().other(), at: (row, col).into() };
        prop_assert!(state.apply(command, &mut rng).is_err());
        prop_assert_eq!(state, before);
    }
}
