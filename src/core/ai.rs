// Hunt/search targeting for the local opponent.
// Works on a BoardView only, so it never sees hidden ship positions.

use alloc::vec::Vec;
use rand::Rng;

use crate::core::advantage::{Activation, Advantage, AdvantageKind};
use crate::core::common::ShotOutcome;
use crate::core::config::RADAR_BLOCK;
use crate::core::grid::{Coordinate, Grid, Orientation};
use crate::core::resolver::{ShotReport, VolleyImpact, VolleyReport};
use crate::core::view::BoardView;

/// Multiplier for cells on the parity lattice of the shortest ship afloat.
const PARITY_BOOST: f64 = 1.5;

/// Hunt queue plus the decision procedure that drains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuntState {
    queue: Vec<Coordinate>,
}

impl HuntState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &[Coordinate] {
        &self.queue
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Feed back the result of our own shot.
    pub fn record(&mut self, report: &ShotReport, grid: Grid) {
        match report.outcome {
            ShotOutcome::Hit { absorbed: false } => self.seed(report.target, grid),
            ShotOutcome::Sunk { .. } => self.queue.clear(),
            _ => {}
        }
    }

    pub fn record_volley(&mut self, report: &VolleyReport, grid: Grid) {
        for shot in &report.shots {
            match shot.impact {
                VolleyImpact::Damaged { sunk: false, .. } => self.seed(shot.at, grid),
                VolleyImpact::Damaged { sunk: true, .. } => self.queue.clear(),
                _ => {}
            }
        }
    }

    fn seed(&mut self, hit: Coordinate, grid: Grid) {
        for n in grid.neighbors4(hit) {
            if !self.queue.contains(&n) {
                self.queue.push(n);
            }
        }
    }

    /// Pick the next cell to fire at. Only ever returns an open cell while one exists.
    pub fn next_target<R: Rng + ?Sized>(&mut self, view: &BoardView, rng: &mut R) -> Coordinate {
        if let Some(at) = view.known_targets.iter().copied().find(|c| view.is_open(*c)) {
            return at;
        }

        let unresolved = view.unresolved_hits();
        if let Some(at) = extend_line(view, &unresolved) {
            return at;
        }

        while !self.queue.is_empty() {
            let at = self.queue.remove(0);
            if view.is_open(at) {
                return at;
            }
        }

        let grid = view.grid();
        if let Some(at) = unresolved
            .iter()
            .flat_map(|h| grid.neighbors4(*h))
            .find(|c| view.is_open(*c))
        {
            return at;
        }

        if let Some(at) = view.contacts.iter().copied().find(|c| view.is_open(*c)) {
            return at;
        }

        best_cell(view, rng).unwrap_or(Coordinate::new(0, 0))
    }
}

/// Longest run of collinear unresolved hits with an open cell at either end.
fn extend_line(view: &BoardView, unresolved: &[Coordinate]) -> Option<Coordinate> {
    let grid = view.grid();
    let mut runs: Vec<(Vec<Coordinate>, Orientation)> = Vec::new();
    for &hit in unresolved {
        for axis in [Orientation::Horizontal, Orientation::Vertical] {
            let run = run_through(hit, axis, unresolved);
            if run.len() >= 2 && !runs.iter().any(|(r, a)| *a == axis && r.contains(&hit)) {
                runs.push((run, axis));
            }
        }
    }
    runs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    runs.iter().find_map(|(run, axis)| {
        grid.line_extension(run, *axis)
            .into_iter()
            .find(|c| view.is_open(*c))
    })
}

/// Contiguous hits along `axis` that include `from`.
fn run_through(from: Coordinate, axis: Orientation, hits: &[Coordinate]) -> Vec<Coordinate> {
    let mut run = alloc::vec![from];
    let mut cur = from;
    while axis.along(cur) > 0 {
        let prev = match axis {
            Orientation::Horizontal => Coordinate::new(cur.row, cur.col - 1),
            Orientation::Vertical => Coordinate::new(cur.row - 1, cur.col),
        };
        if !hits.contains(&prev) {
            break;
        }
        run.push(prev);
        cur = prev;
    }
    cur = from;
    loop {
        let Some(next) = cur.offset(axis, 1).filter(|c| hits.contains(c)) else {
            break;
        };
        run.push(next);
        cur = next;
    }
    run
}

/// Search weight of an open cell: how many remaining ships could cover it,
/// scaled toward the board centre and boosted on the parity lattice.
pub fn cell_weight(view: &BoardView, at: Coordinate) -> f64 {
    if !view.is_open(at) {
        return 0.0;
    }
    let grid = view.grid();
    let mut fits = 0usize;
    for &len in &view.remaining_lengths {
        if len == 0 {
            continue;
        }
        for axis in [Orientation::Horizontal, Orientation::Vertical] {
            for k in 0..len {
                let along = axis.along(at);
                if along < k {
                    break;
                }
                let origin = match axis {
                    Orientation::Horizontal => Coordinate::new(at.row, at.col - k),
                    Orientation::Vertical => Coordinate::new(at.row - k, at.col),
                };
                let clear = grid
                    .segment(origin, axis, len)
                    .is_some_and(|cells| cells.iter().all(|c| view.is_open(*c)));
                if clear {
                    fits += 1;
                }
            }
        }
    }

    let centre = (view.size as f64 - 1.0) / 2.0;
    let dr = at.row as f64 - centre;
    let dc = at.col as f64 - centre;
    let reach = libm::sqrt(2.0 * centre * centre).max(1.0);
    let mut weight = (1.0 + fits as f64) * (2.0 - libm::sqrt(dr * dr + dc * dc) / reach);

    let step = view.remaining_lengths.iter().copied().min().unwrap_or(2).max(2);
    if (at.row + at.col) % step == 0 {
        weight *= PARITY_BOOST;
    }
    weight
}

/// Highest-weighted open cell, ties broken at random.
fn best_cell<R: Rng + ?Sized>(view: &BoardView, rng: &mut R) -> Option<Coordinate> {
    let mut best: Vec<Coordinate> = Vec::new();
    let mut best_weight = f64::MIN;
    for at in view.open_cells() {
        let w = cell_weight(view, at);
        if w > best_weight + f64::EPSILON {
            best_weight = w;
            best.clear();
            best.push(at);
        } else if libm::fabs(w - best_weight) <= f64::EPSILON {
            best.push(at);
        }
    }
    if best.is_empty() {
        None
    } else {
        Some(best[rng.random_range(0..best.len())])
    }
}

/// Decide whether to spend an active advantage this turn instead of firing.
/// EMP goes out at once; radar and volley are held back while a damaged
/// ship is being hunted.
pub fn plan_activation(view: &BoardView) -> Option<Activation> {
    let slot = view.advantage?;
    if view.advantage_disabled
        || slot.advantage.kind() != AdvantageKind::Active
        || !slot.is_ready(slot.advantage)
    {
        return None;
    }
    let hunting = !view.unresolved_hits().is_empty() || !view.known_targets.is_empty();
    match slot.advantage {
        Advantage::EmpBlast => Some(Activation::EmpBlast),
        Advantage::RadarScan if !hunting && view.contacts.is_empty() => {
            best_block(view).map(|origin| Activation::RadarScan { origin })
        }
        Advantage::VolleyFire if !hunting => {
            best_column(view).map(|column| Activation::VolleyFire { column })
        }
        _ => None,
    }
}

fn best_block(view: &BoardView) -> Option<Coordinate> {
    let grid = view.grid();
    let span = view.size.saturating_sub(RADAR_BLOCK - 1).max(1);
    let mut best: Option<(Coordinate, f64)> = None;
    for row in 0..span {
        for col in 0..span {
            let origin = Coordinate::new(row, col);
            let score: f64 = grid
                .block(origin, RADAR_BLOCK, RADAR_BLOCK)
                .into_iter()
                .map(|c| cell_weight(view, c))
                .sum();
            if score > 0.0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((origin, score));
            }
        }
    }
    best.map(|(origin, _)| origin)
}

fn best_column(view: &BoardView) -> Option<usize> {
    let grid = view.grid();
    let mut best: Option<(usize, f64)> = None;
    for col in 0..view.size {
        let score: f64 = grid.column(col).map(|c| cell_weight(view, c)).sum();
        if score > 0.0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((col, score));
        }
    }
    best.map(|(col, _)| col)
}
