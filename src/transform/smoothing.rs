use crate::terrain::Cell;
use crate::transform::Pathfinder;

/// Post-processes a returned path with sliding-window Bresenham
/// line-of-sight smoothing (spec §4.8 "Bresenham smoothing transformer").
/// Grounded on the teacher's `has_line_of_sight` symmetric-error-term
/// tracer, generalised here to emit a strictly 4-connected tile sequence
/// (diagonal steps expanded into two orthogonal moves, X-first then
/// Y-first on failure) and wrapped in the sliding-window replace loop the
/// source describes.
pub struct BresenhamSmoothingTransformer<Inner, F> {
    inner: Inner,
    window_base: u32,
    traversable: F,
}

impl<Inner: Pathfinder, F: Fn(Cell) -> bool> BresenhamSmoothingTransformer<Inner, F> {
    pub fn new(inner: Inner, window_base: u32, traversable: F) -> Self {
        Self { inner, window_base, traversable }
    }
}

/// Scales the window with path length to amortise cost on long paths
/// (spec §4.8: "100, 200, or 300").
fn window_for_length(base: u32, len: usize) -> usize {
    let base = base as usize;
    if len > 12 * base {
        3 * base
    } else if len > 4 * base {
        2 * base
    } else {
        base
    }
}

fn trace_4connected(a: Cell, b: Cell, x_first: bool) -> Vec<Cell> {
    let mut points = vec![a];
    let (mut x0, mut y0) = (a.x, a.y);
    let (x1, y1) = (b.x, b.y);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    while x0 != x1 || y0 != y1 {
        let e2 = 2 * err;
        let move_x = e2 >= dy && x0 != x1;
        let move_y = e2 <= dx && y0 != y1;
        if move_x && move_y {
            if x_first {
                x0 += sx;
                points.push(Cell::new(x0, y0));
                err += dy;
                y0 += sy;
                points.push(Cell::new(x0, y0));
                err += dx;
            } else {
                y0 += sy;
                points.push(Cell::new(x0, y0));
                err += dx;
                x0 += sx;
                points.push(Cell::new(x0, y0));
                err += dy;
            }
        } else if move_x {
            err += dy;
            x0 += sx;
            points.push(Cell::new(x0, y0));
        } else {
            err += dx;
            y0 += sy;
            points.push(Cell::new(x0, y0));
        }
    }
    points
}

fn bresenham_line(a: Cell, b: Cell, traversable: &impl Fn(Cell) -> bool) -> Option<Vec<Cell>> {
    let x_first = trace_4connected(a, b, true);
    if x_first.iter().all(|&c| traversable(c)) {
        return Some(x_first);
    }
    let y_first = trace_4connected(a, b, false);
    if y_first.iter().all(|&c| traversable(c)) {
        return Some(y_first);
    }
    None
}

fn smooth(path: &[Cell], window_base: u32, traversable: &impl Fn(Cell) -> bool) -> Vec<Cell> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let window = window_for_length(window_base, path.len()).max(2);
    let guard = path.len() * 4 + 16;

    let mut out = vec![path[0]];
    let mut i = 0usize;
    let mut steps = 0usize;
    while i < path.len() - 1 {
        steps += 1;
        if steps > guard {
            out.extend_from_slice(&path[i + 1..]);
            break;
        }
        let window_end = (i + window).min(path.len() - 1);
        let mut replaced_to = None;
        let mut j = window_end;
        while j > i + 1 {
            if let Some(line) = bresenham_line(path[i], path[j], traversable) {
                out.extend(line.into_iter().skip(1));
                replaced_to = Some(j);
                break;
            }
            j -= 1;
        }
        match replaced_to {
            Some(j) => i = j,
            None => {
                i += 1;
                out.push(path[i]);
            }
        }
    }
    out
}

impl<Inner: Pathfinder, F: Fn(Cell) -> bool> Pathfinder for BresenhamSmoothingTransformer<Inner, F> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let path = self.inner.find_path(from, to)?;
        Some(smooth(&path, self.window_base, &self.traversable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StraightLine(Vec<Cell>);
    impl Pathfinder for StraightLine {
        fn find_path(&mut self, _from: &[Cell], _to: Cell) -> Option<Vec<Cell>> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn collapses_a_fully_traversable_zigzag_into_fewer_waypoints() {
        // A staircase path from (0,0) to (4,4) that a straight 4-connected
        // trace can reproduce entirely.
        let zigzag: Vec<Cell> = (0..=8)
            .map(|i| if i % 2 == 0 { Cell::new(i / 2, i / 2) } else { Cell::new(i / 2 + 1, i / 2) })
            .collect();
        let inner = StraightLine(zigzag.clone());
        let mut transformer = BresenhamSmoothingTransformer::new(inner, 100, |_| true);
        let smoothed = transformer.find_path(&[zigzag[0]], *zigzag.last().unwrap()).unwrap();
        assert_eq!(smoothed.first(), Some(&zigzag[0]));
        assert_eq!(smoothed.last(), zigzag.last());
        assert!(smoothed.len() <= zigzag.len());
    }

    #[test]
    fn never_traces_through_untraversable_tiles() {
        let path = vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)];
        let blocked = Cell::new(1, 1);
        let inner = StraightLine(path.clone());
        let mut transformer =
            BresenhamSmoothingTransformer::new(inner, 100, move |c| c != blocked);
        let smoothed = transformer.find_path(&[path[0]], *path.last().unwrap()).unwrap();
        assert!(!smoothed.contains(&blocked));
    }

    #[test]
    fn short_paths_pass_through_unchanged_endpoints() {
        let path = vec![Cell::new(0, 0), Cell::new(1, 0)];
        let inner = StraightLine(path.clone());
        let mut transformer = BresenhamSmoothingTransformer::new(inner, 100, |_| true);
        let smoothed = transformer.find_path(&[path[0]], path[1]).unwrap();
        assert_eq!(smoothed, path);
    }
}
