use tokio::io::{self as tio, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::core::{
    Activation, BoardView, Command, Coordinate, MatchState, Outcome, ShotOutcome, ShotReport, Side,
    VolleyReport,
};
use crate::ui;

use super::{Action, HeuristicStrategy, OpponentStrategy};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Fire(Coordinate),
    Scan(Coordinate),
    Volley(usize),
    Emp,
    Help,
}

fn parse_column(ch: char, size: usize) -> Result<usize, String> {
    let ch = ch.to_ascii_uppercase();
    if !ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter", ch));
    }
    let col = (ch as u8).wrapping_sub(b'A') as usize;
    if col >= size {
        return Err(format!("Column '{}' out of bounds - board has {} columns", ch, size));
    }
    Ok(col)
}

/// Parse a cell such as `B4` (column letter, 1-based row).
pub fn parse_coord(input: &str, size: usize) -> Result<Coordinate, String> {
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col = parse_column(chars.next().ok_or("No column letter")?, size)?;
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row_str))?;
    if row == 0 {
        return Err("Row cannot be 0".to_string());
    }
    if row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok(Coordinate::new(row - 1, col))
}

/// Parse `B4`, `scan B4`, `volley C`, `emp` or `help`.
pub fn parse_command(line: &str, size: usize) -> Result<CliCommand, String> {
    let mut parts = line.split_whitespace();
    let head = parts.next().ok_or("Empty input")?;
    let arg = parts.next();
    match head.to_ascii_lowercase().as_str() {
        "help" => Ok(CliCommand::Help),
        "emp" => Ok(CliCommand::Emp),
        "scan" => {
            let at = arg.ok_or("scan needs a cell, e.g. scan B4")?;
            Ok(CliCommand::Scan(parse_coord(at, size)?))
        }
        "volley" => {
            let col = arg
                .and_then(|s| s.chars().next())
                .ok_or("volley needs a column, e.g. volley C")?;
            Ok(CliCommand::Volley(parse_column(col, size)?))
        }
        _ => Ok(CliCommand::Fire(parse_coord(head, size)?)),
    }
}

/// Human player reading commands from stdin. Deploys at random and offers
/// the heuristic's pick as the default move.
pub struct CliPlayer {
    input: Lines<BufReader<Stdin>>,
    advisor: HeuristicStrategy,
}

impl CliPlayer {
    pub fn new(advisor: HeuristicStrategy) -> Self {
        Self {
            input: BufReader::new(tio::stdin()).lines(),
            advisor,
        }
    }

    async fn read_line(&mut self) -> Option<String> {
        match self.input.next_line().await {
            Ok(line) => line,
            Err(e) => {
                log::warn!("stdin read failed: {e}");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl OpponentStrategy for CliPlayer {
    fn deploy(&mut self, state: &MatchState, side: Side) -> anyhow::Result<Vec<Command>> {
        let commands = self.advisor.deploy(state, side)?;
        println!("Your fleet has been deployed.");
        Ok(commands)
    }

    async fn next_move(&mut self, view: &BoardView) -> Coordinate {
        loop {
            match self.next_action(view).await {
                Action::Fire(at) => return at,
                Action::Activate(_) => println!("✗ Only a target cell is accepted here."),
            }
        }
    }

    async fn next_action(&mut self, view: &BoardView) -> Action {
        let suggestion = self.advisor.choose(view);
        ui::print_target_view(view);
        loop {
            print!("\nEnter target [suggested: {}] (or 'help'): ", suggestion);
            ui::flush();
            let Some(line) = self.read_line().await else {
                return Action::Fire(suggestion);
            };
            let line = line.trim();
            if line.is_empty() {
                println!("Using suggestion: {}", suggestion);
                return Action::Fire(suggestion);
            }
            match parse_command(line, view.size) {
                Ok(CliCommand::Help) => ui::print_targeting_help(),
                Ok(CliCommand::Fire(at)) if !view.is_open(at) => {
                    println!("✗ You already fired at {}! Choose another target.", at);
                }
                Ok(CliCommand::Fire(at)) => return Action::Fire(at),
                Ok(CliCommand::Scan(origin)) => return Action::Activate(Activation::RadarScan { origin }),
                Ok(CliCommand::Volley(column)) => return Action::Activate(Activation::VolleyFire { column }),
                Ok(CliCommand::Emp) => return Action::Activate(Activation::EmpBlast),
                Err(e) => {
                    println!("✗ Invalid input: {}", e);
                    println!("   Example: A5, scan B2, volley C, emp");
                }
            }
        }
    }

    fn record_outcome(&mut self, report: &ShotReport) {
        self.advisor.record_outcome(report);
        match report.outcome {
            ShotOutcome::Miss => println!("\n💧 Miss at {}.", report.target),
            ShotOutcome::Hit { absorbed: true } => {
                println!("\n🛡  Hit at {} was absorbed by reinforced plating!", report.target)
            }
            ShotOutcome::Hit { absorbed: false } => println!("\n🎯 HIT at {}!", report.target),
            ShotOutcome::Sunk { .. } => println!("\n💥 SUNK! Your shot at {} finished a ship!", report.target),
            ShotOutcome::DecoyHit => println!("\n🎭 {} was a decoy. Your turn is lost.", report.target),
            ShotOutcome::BuoyHit => println!("\n⚓ {} was a defense buoy. Your turn is lost.", report.target),
        }
    }

    fn record_volley(&mut self, report: &VolleyReport) {
        self.advisor.record_volley(report);
        match report.damaged_ship() {
            Some(_) => println!("\n🎯 Volley connected with an enemy ship!"),
            None => println!("\n💧 Volley fire missed!"),
        }
    }
}

/// Final banner for a human player on `side`.
pub fn announce(outcome: Outcome, side: Side) {
    match outcome {
        Outcome::Winner(w) if w == side => println!("\n🏆 Victory! The enemy fleet is destroyed."),
        Outcome::Winner(_) => println!("\n💀 Defeat. Your fleet is lost."),
        Outcome::Draw => println!("\n🤝 Draw. Both fleets went down together."),
    }
}
