use broadside::{Activation, Advantage, AdvantageKind, AdvantageSlot, Coordinate, UnknownAdvantage};

#[test]
fn test_names_round_trip() {
    for advantage in Advantage::ALL {
        assert_eq!(advantage.as_str().parse::<Advantage>(), Ok(advantage));
        assert_eq!(advantage.to_string(), advantage.as_str());
    }
    assert_eq!("laser".parse::<Advantage>(), Err(UnknownAdvantage));
    assert_eq!("Radar_Scan".parse::<Advantage>(), Err(UnknownAdvantage));
}

#[test]
fn test_serde_uses_snake_case() {
    let json = serde_json::to_string(&Advantage::TargetingComputer).unwrap();
    assert_eq!(json, "\"targeting_computer\"");
    let back: Advantage = serde_json::from_str("\"ghost_shield\"").unwrap();
    assert_eq!(back, Advantage::GhostShield);
}

#[test]
fn test_info_table() {
    let active: Vec<_> = Advantage::ALL
        .iter()
        .copied()
        .filter(|a| a.kind() == AdvantageKind::Active)
        .collect();
    assert_eq!(
        active,
        vec![Advantage::RadarScan, Advantage::VolleyFire, Advantage::EmpBlast]
    );
    assert!(Advantage::GhostShield.info().usable_once);
    assert!(!Advantage::ReinforcedHull.info().usable_once);
    assert!(!Advantage::Sabotage.info().usable_once);
    assert!(Advantage::ALL.iter().all(|a| !a.info().title.is_empty()));
}

#[test]
fn test_slot_consumption() {
    let mut slot = AdvantageSlot::new(Advantage::ExtraShot);
    assert!(slot.is_ready(Advantage::ExtraShot));
    assert!(!slot.is_ready(Advantage::GhostShield));
    slot.consume();
    assert!(!slot.is_ready(Advantage::ExtraShot));

    // permanent advantages never run out
    let mut slot = AdvantageSlot::new(Advantage::Sabotage);
    slot.consume();
    assert!(slot.is_ready(Advantage::Sabotage));
}

#[test]
fn test_activation_maps_to_advantage() {
    assert_eq!(
        Activation::RadarScan {
            origin: Coordinate::new(1, 1)
        }
        .advantage(),
        Advantage::RadarScan
    );
    assert_eq!(Activation::VolleyFire { column: 3 }.advantage(), Advantage::VolleyFire);
    assert_eq!(Activation::EmpBlast.advantage(), Advantage::EmpBlast);
}
