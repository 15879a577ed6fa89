//! Air pathfinder (spec §4.10): a deterministic pseudo-random stepper for
//! projectiles, seeded from the caller's tick counter rather than the wall
//! clock so runs replay identically.

use crate::stepping::StepOutcome;
use crate::terrain::Cell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct AirPathfinder {
    rng: StdRng,
}

impl AirPathfinder {
    /// `seed` must come from the simulation's own tick counter; never from
    /// the wall clock (spec §9 open question "air pathfinder seed source").
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Advances one step toward `to`, biasing the x/y choice by the ratio
    /// of the residual distance on each axis. `from` must be a single
    /// source; a source set is a caller error.
    pub fn next(&mut self, from: &[Cell], to: Cell) -> StepOutcome {
        assert_eq!(from.len(), 1, "air pathfinder does not accept a multi-source set");
        let from = from[0];
        if from == to {
            return StepOutcome::Complete(to);
        }

        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let abs_dx = dx.unsigned_abs();
        let abs_dy = dy.unsigned_abs();
        let total = abs_dx + abs_dy;

        let move_on_x = if abs_dx == 0 {
            false
        } else if abs_dy == 0 {
            true
        } else {
            self.rng.random_range(0..total) < abs_dx
        };

        let next = if move_on_x {
            Cell::new(from.x + dx.signum(), from.y)
        } else {
            Cell::new(from.x, from.y + dy.signum())
        };

        if next == to {
            StepOutcome::Complete(to)
        } else {
            StepOutcome::Next(next)
        }
    }
}
