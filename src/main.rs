#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, player::cli::announce, snapshot, ui, Advantage, CliPlayer, HeuristicStrategy,
    MatchConfig, MatchSession, MatchState, OpponentStrategy, Side,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Match rules shared by every subcommand.
#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct MatchArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = broadside::BOARD_SIZE, help = "Board side length")]
    size: usize,
    #[arg(long, default_value_t = 0, help = "Defense buoys per fleet (0-2)")]
    buoys: usize,
    #[arg(long, help = "Insert a hand-off screen between turns")]
    hot_seat: bool,
    #[arg(long, help = "Advantage for the player side (e.g., radar_scan)")]
    advantage: Option<Advantage>,
    #[arg(long, help = "Advantage for the opponent side")]
    opponent_advantage: Option<Advantage>,
    #[arg(long, help = "Write the final match state to this file")]
    save: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Watch two AIs play on the local machine.
    Local {
        #[command(flatten)]
        args: MatchArgs,
    },
    /// Play against the AI from this terminal.
    Play {
        #[command(flatten)]
        args: MatchArgs,
    },
}

#[cfg(feature = "std")]
impl MatchArgs {
    fn build(&self) -> anyhow::Result<(MatchState, SmallRng)> {
        let config = MatchConfig {
            board_size: self.size,
            buoys_per_fleet: self.buoys,
            hot_seat: self.hot_seat,
            ..MatchConfig::default()
        };
        let state = MatchState::new(config, [self.advantage, self.opponent_advantage])?;
        let rng = match self.seed {
            Some(s) => {
                println!("Using fixed seed: {} (game will be reproducible)", s);
                SmallRng::seed_from_u64(s)
            }
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        };
        Ok((state, rng))
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (args, human) = match cli.command {
        Commands::Local { args } => {
            println!("Starting local AI vs AI game...");
            (args, false)
        }
        Commands::Play { args } => (args, true),
    };
    let (state, mut rng) = args.build()?;
    let opponent = HeuristicStrategy::from_rng(SmallRng::from_rng(&mut rng));
    let player: Box<dyn OpponentStrategy> = if human {
        Box::new(CliPlayer::new(HeuristicStrategy::from_rng(SmallRng::from_rng(&mut rng))))
    } else {
        Box::new(HeuristicStrategy::from_rng(SmallRng::from_rng(&mut rng)))
    };

    let result = MatchSession::new(state, player, Box::new(opponent), rng)
        .run()
        .await?;

    println!("\n═══════════════════════ GAME OVER ═══════════════════════");
    for side in Side::BOTH {
        println!("\n{} fleet:", side);
        print!("{}", ui::render_fleet(result.final_state.fleet(side), true));
    }
    if human {
        announce(result.outcome.outcome, Side::Player);
    } else {
        println!("\nOutcome: {:?}", result.outcome.outcome);
    }
    println!(
        "Shots fired: player {}, opponent {}",
        result.shots_fired[0], result.shots_fired[1]
    );
    if let Some(path) = args.save {
        snapshot::save(&result.final_state, &path)?;
        println!("Final state saved to {}", path.display());
    }
    Ok(())
}
