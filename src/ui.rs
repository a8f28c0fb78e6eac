#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::core::{BoardView, Coordinate, Fleet, TrapKind};

fn header(out: &mut String, size: usize) {
    out.push_str("    ");
    for c in 0..size {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
}

/// Own fleet: `S` ship, `X` hit, `o` miss, `D` decoy, `B` buoy, `.` water.
pub fn render_fleet(fleet: &Fleet, reveal: bool) -> String {
    let size = fleet.grid().size();
    let mut out = String::new();
    header(&mut out, size);
    for r in 0..size {
        let _ = write!(out, "  {:2}", r + 1);
        for c in 0..size {
            let at = Coordinate::new(r, c);
            let ship = fleet.ship_at(at).map(|i| &fleet.ships()[i]);
            let ch = if ship.is_some_and(|s| s.is_hit(at)) {
                'X'
            } else if fleet.has_been_shot(at) {
                'o'
            } else if !reveal {
                '.'
            } else if ship.is_some() {
                'S'
            } else {
                match fleet.trap_at(at) {
                    Some(TrapKind::Decoy) => 'D',
                    Some(TrapKind::Buoy) => 'B',
                    None => '.',
                }
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Opposing grid as the attacker knows it: `X` hit, `#` sunk, `o` miss,
/// `?` radar contact, `.` unknown.
pub fn render_view(view: &BoardView) -> String {
    let mut out = String::new();
    header(&mut out, view.size);
    for r in 0..view.size {
        let _ = write!(out, "  {:2}", r + 1);
        for c in 0..view.size {
            let at = Coordinate::new(r, c);
            let ch = if view.sunk_cells.contains(&at) {
                '#'
            } else if view.hits.contains(&at) {
                'X'
            } else if !view.is_open(at) {
                'o'
            } else if view.contacts.contains(&at) || view.known_targets.contains(&at) {
                '?'
            } else {
                '.'
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

pub fn print_target_view(view: &BoardView) {
    println!("\nEnemy waters:");
    print!("{}", render_view(view));
    println!("    Legend: X=Hit  #=Sunk  o=Miss  ?=Contact  .=Unknown");
    if let Some(slot) = view.advantage {
        let info = slot.advantage.info();
        let status = if view.advantage_disabled {
            "disabled"
        } else if slot.is_ready(slot.advantage) {
            "ready"
        } else {
            "used"
        };
        println!("    Advantage: {} ({})", info.title, status);
    }
}

pub fn print_fleet(fleet: &Fleet) {
    println!("\nYour fleet:");
    print!("{}", render_fleet(fleet, true));
    println!("    Legend: S=Ship  X=Hit  o=Miss  D=Decoy  B=Buoy  .=Water");
}

pub fn print_targeting_help() {
    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║                  TARGETING HELP                        ║");
    println!("╠════════════════════════════════════════════════════════╣");
    println!("║   A5        - fire at cell A5                          ║");
    println!("║   scan B2   - radar scan the 2x2 block from B2         ║");
    println!("║   volley C  - volley fire down column C                ║");
    println!("║   emp       - disable the enemy advantage next turn    ║");
    println!("║   ENTER     - take the suggested target                ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
}

pub fn flush() {
    let _ = io::stdout().flush();
}
