use broadside::{HeuristicStrategy, MatchConfig, MatchSession, MatchState, Outcome, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!(
            "Usage: {} <seed1> <seed2>",
            args.first().map_or("sim", String::as_str)
        );
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let state = MatchState::new(MatchConfig::default(), [None, None])?;
    let session = MatchSession::new(
        state,
        Box::new(HeuristicStrategy::new(seed1)),
        Box::new(HeuristicStrategy::new(seed2)),
        SmallRng::seed_from_u64(seed1 ^ seed2.rotate_left(32)),
    );
    let result = session.run().await?;

    let winner = match result.outcome.outcome {
        Outcome::Winner(Side::Player) => Some("player1"),
        Outcome::Winner(Side::Opponent) => Some("player2"),
        Outcome::Draw => None,
    };
    let fleet_summary = |side: Side| {
        let fleet = result.final_state.fleet(side);
        json!({
            "shots": result.shots_fired[side.index()],
            "ships_afloat": fleet.remaining_lengths().len(),
            "hits_taken": fleet.ships().iter().map(|s| s.hits().len()).sum::<usize>(),
        })
    };

    let summary = json!({
        "player1": fleet_summary(Side::Player),
        "player2": fleet_summary(Side::Opponent),
        "turns": result.final_state.turn_number(),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
