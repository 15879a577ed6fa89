use crate::terrain::Cell;
use crate::transform::Pathfinder;

/// Downscales full-resolution coordinates to the minimap, delegates, then
/// upscales the result back to full resolution with endpoints pinned
/// exactly (spec §4.8 "Minimap transformer"). No floating-point
/// coordinates are used anywhere in the interpolation.
pub struct MinimapTransformer<Inner> {
    inner: Inner,
}

impl<Inner: Pathfinder> MinimapTransformer<Inner> {
    pub fn new(inner: Inner) -> Self {
        Self { inner }
    }
}

fn downscale(cell: Cell) -> Cell {
    Cell::new(cell.x.div_euclid(2), cell.y.div_euclid(2))
}

fn round_div(n: i32, d: i32) -> i32 {
    debug_assert!(d > 0);
    let q = n.div_euclid(d);
    let r = n.rem_euclid(d);
    if r * 2 >= d {
        q + 1
    } else {
        q
    }
}

fn lerp_coord(a: i32, b: i32, step: i32, steps: i32) -> i32 {
    a + round_div((b - a) * step, steps)
}

/// Multiplies each minimap cell by 2 and linearly interpolates between
/// consecutive scaled cells with `max(|dx|,|dy|)` sub-steps.
fn upscale(path: &[Cell]) -> Vec<Cell> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };
    let mut out = vec![Cell::new(first.x * 2, first.y * 2)];
    for &cell in &path[1..] {
        let prev = *out.last().unwrap();
        let scaled = Cell::new(cell.x * 2, cell.y * 2);
        let steps = (scaled.x - prev.x).abs().max((scaled.y - prev.y).abs()).max(1);
        for step in 1..=steps {
            out.push(Cell::new(
                lerp_coord(prev.x, scaled.x, step, steps),
                lerp_coord(prev.y, scaled.y, step, steps),
            ));
        }
    }
    out
}

fn pin_start(path: &mut Vec<Cell>, sources: &[Cell]) {
    let anchor = path.first().copied().unwrap_or(sources[0]);
    let chosen = *sources
        .iter()
        .min_by_key(|s| s.manhattan(anchor))
        .unwrap_or(&sources[0]);
    match path.iter().position(|&c| c == chosen) {
        Some(pos) => {
            path.drain(0..pos);
        }
        None => path.insert(0, chosen),
    }
}

fn pin_goal(path: &mut Vec<Cell>, goal: Cell) {
    match path.iter().rposition(|&c| c == goal) {
        Some(pos) => path.truncate(pos + 1),
        None => path.push(goal),
    }
}

impl<Inner: Pathfinder> Pathfinder for MinimapTransformer<Inner> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let minimap_from: Vec<Cell> = from.iter().copied().map(downscale).collect();
        let minimap_to = downscale(to);
        let minimap_path = self.inner.find_path(&minimap_from, minimap_to)?;
        let mut path = upscale(&minimap_path);
        pin_start(&mut path, from);
        pin_goal(&mut path, to);
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMinimapPath(Vec<Cell>);
    impl Pathfinder for FixedMinimapPath {
        fn find_path(&mut self, _from: &[Cell], _to: Cell) -> Option<Vec<Cell>> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn upscales_and_pins_endpoints() {
        let inner = FixedMinimapPath(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
        let mut transformer = MinimapTransformer::new(inner);
        let path = transformer
            .find_path(&[Cell::new(1, 0)], Cell::new(5, 0))
            .unwrap();
        assert_eq!(path.first(), Some(&Cell::new(1, 0)));
        assert_eq!(path.last(), Some(&Cell::new(5, 0)));
    }

    #[test]
    fn multi_source_pins_the_closest_source() {
        let inner = FixedMinimapPath(vec![Cell::new(3, 0), Cell::new(4, 0)]);
        let mut transformer = MinimapTransformer::new(inner);
        let path = transformer
            .find_path(&[Cell::new(0, 0), Cell::new(6, 0)], Cell::new(8, 0))
            .unwrap();
        // Upscaled first cell is (6,0); the closer source is (6,0) itself.
        assert_eq!(path.first(), Some(&Cell::new(6, 0)));
    }

    #[test]
    fn no_inner_path_yields_none() {
        struct Never;
        impl Pathfinder for Never {
            fn find_path(&mut self, _from: &[Cell], _to: Cell) -> Option<Vec<Cell>> {
                None
            }
        }
        let mut transformer = MinimapTransformer::new(Never);
        assert_eq!(transformer.find_path(&[Cell::new(0, 0)], Cell::new(1, 1)), None);
    }
}
