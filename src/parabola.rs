//! Parabola pathfinder (spec §4.10): a cubic Bezier arc used for shells and
//! other ballistic movement. Curve evaluation is necessarily floating-point
//! (there is no integer cubic Bezier); only the returned [`Cell`] is ever
//! rounded back to grid coordinates.

use crate::stepping::StepOutcome;
use crate::terrain::Cell;

#[derive(Clone, Copy, Debug)]
struct Point {
    x: f64,
    y: f64,
}

#[derive(Clone, Copy, Debug)]
struct Curve {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
}

fn evaluate(curve: &Curve, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point {
        x: a * curve.p0.x + b * curve.p1.x + c * curve.p2.x + d * curve.p3.x,
        y: a * curve.p0.y + b * curve.p1.y + c * curve.p2.y + d * curve.p3.y,
    }
}

fn build_curve(from: Cell, to: Cell, height_scale: f64, min_height: f64) -> Curve {
    let p0 = Point { x: from.x as f64, y: from.y as f64 };
    let p3 = Point { x: to.x as f64, y: to.y as f64 };
    let dx = p3.x - p0.x;
    let dy = p3.y - p0.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let height = (distance * height_scale).max(min_height);

    let (perp_x, perp_y) = if distance > 0.0 {
        (-dy / distance, dx / distance)
    } else {
        (0.0, 1.0)
    };

    let p1 = Point {
        x: p0.x + dx / 3.0 + perp_x * height,
        y: p0.y + dy / 3.0 + perp_y * height,
    };
    let p2 = Point {
        x: p0.x + dx * 2.0 / 3.0 + perp_x * height,
        y: p0.y + dy * 2.0 / 3.0 + perp_y * height,
    };
    Curve { p0, p1, p2, p3 }
}

fn round_to_cell(p: Point) -> Cell {
    Cell::new(p.x.round() as i32, p.y.round() as i32)
}

/// Configuration for the perpendicular control-point offset and parameter
/// discretisation, matching the enumerated tunables in spec §6.
#[derive(Clone, Copy, Debug)]
pub struct ParabolaConfig {
    pub height_scale: f64,
    pub min_height: f64,
    pub increment: f64,
}

impl Default for ParabolaConfig {
    fn default() -> Self {
        Self { height_scale: 0.25, min_height: 1.0, increment: 0.05 }
    }
}

pub struct ParabolaPathfinder {
    config: ParabolaConfig,
    curve: Option<Curve>,
    cached_to: Option<Cell>,
    t: f64,
}

impl ParabolaPathfinder {
    pub fn new(config: ParabolaConfig) -> Self {
        Self { config, curve: None, cached_to: None, t: 0.0 }
    }

    /// Advances the curve parameter by `speed * increment` and returns the
    /// rounded point on the arc. Rebuilds the curve whenever `to` changes.
    pub fn next(&mut self, from: Cell, to: Cell, speed: f64) -> StepOutcome {
        if from == to {
            return StepOutcome::Complete(to);
        }
        if self.cached_to != Some(to) {
            self.curve = Some(build_curve(from, to, self.config.height_scale, self.config.min_height));
            self.cached_to = Some(to);
            self.t = 0.0;
        }

        self.t = (self.t + speed * self.config.increment).min(1.0);
        let curve = self.curve.as_ref().unwrap();
        if self.t >= 1.0 {
            self.curve = None;
            self.cached_to = None;
            return StepOutcome::Complete(to);
        }
        StepOutcome::Next(round_to_cell(evaluate(curve, self.t)))
    }
}
