use broadside::snapshot::{decode, encode, load, save};
use broadside::{
    random_deployment, Advantage, Command, Coordinate, MatchConfig, MatchState, Side,
};
use rand::{rngs::SmallRng, SeedableRng};

fn mid_match() -> MatchState {
    let mut rng = SmallRng::seed_from_u64(21);
    let config = MatchConfig {
        buoys_per_fleet: 1,
        ..MatchConfig::default()
    };
    let mut state = MatchState::new(config, [Some(Advantage::RadarScan), Some(Advantage::DecoyBuoy)]).unwrap();
    for side in Side::BOTH {
        for command in random_deployment(&state, side, &mut rng).unwrap() {
            state = state.apply(command, &mut rng).unwrap().state;
        }
    }
    state = state.apply(Command::Ready { side: Side::Player }, &mut rng).unwrap().state;
    let open = state.view_for(Side::Player).open_cells();
    let at = open.iter().copied().find(|c| *c != Coordinate::new(0, 0)).unwrap();
    state.apply(Command::Fire { side: Side::Player, at }, &mut rng).unwrap().state
}

#[test]
fn test_snapshot_round_trip() {
    let state = mid_match();
    let bytes = encode(&state).unwrap();
    let restored = decode(&bytes).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.turn(), state.turn());
    assert_eq!(restored.fleet(Side::Player).shots_received(), state.fleet(Side::Player).shots_received());
}

#[test]
fn test_snapshot_file() {
    let state = mid_match();
    let path = std::env::temp_dir().join(format!("broadside-snapshot-{}.bin", std::process::id()));
    save(&state, &path).unwrap();
    let restored = load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn test_corrupt_snapshot_is_rejected() {
    let bytes = encode(&mid_match()).unwrap();
    assert!(decode(&bytes[..bytes.len() / 2]).is_err());
    assert!(decode(&[]).is_err());
    let missing = std::env::temp_dir().join("broadside-no-such-snapshot.bin");
    let err = load(&missing).unwrap_err();
    assert!(err.to_string().contains("reading snapshot"));
}
