use crate::components::WaterComponents;
use crate::terrain::{Cell, TerrainView};
use crate::transform::Pathfinder;

/// Short-circuits to `None` before delegating when any source and the
/// goal land in different water components (spec §4.8 "Component-check
/// transformer").
pub struct ComponentCheckTransformer<'a, T, Inner> {
    terrain: &'a T,
    components: &'a WaterComponents,
    inner: Inner,
}

impl<'a, T: TerrainView, Inner: Pathfinder> ComponentCheckTransformer<'a, T, Inner> {
    pub fn new(terrain: &'a T, components: &'a WaterComponents, inner: Inner) -> Self {
        Self { terrain, components, inner }
    }
}

impl<'a, T: TerrainView, Inner: Pathfinder> Pathfinder for ComponentCheckTransformer<'a, T, Inner> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let Some(goal_tile) = self.terrain.tile_at(to) else {
            return None;
        };
        let any_connected = from.iter().any(|&cell| {
            self.terrain
                .tile_at(cell)
                .map(|tile| self.components.in_same_component(tile, goal_tile))
                .unwrap_or(false)
        });
        if !any_connected {
            return None;
        }
        self.inner.find_path(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainGrid;

    struct AlwaysPath;
    impl Pathfinder for AlwaysPath {
        fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
            Some(vec![from[0], to])
        }
    }

    #[test]
    fn short_circuits_across_disjoint_components() {
        let grid = TerrainGrid::new(3, 1, |x, _| x == 1);
        let components = WaterComponents::build(&grid);
        let mut transformer = ComponentCheckTransformer::new(&grid, &components, AlwaysPath);
        let result = transformer.find_path(&[Cell::new(0, 0)], Cell::new(2, 0));
        assert_eq!(result, None);
    }

    #[test]
    fn delegates_when_same_component() {
        let grid = TerrainGrid::new(3, 1, |_, _| false);
        let components = WaterComponents::build(&grid);
        let mut transformer = ComponentCheckTransformer::new(&grid, &components, AlwaysPath);
        let result = transformer.find_path(&[Cell::new(0, 0)], Cell::new(2, 0));
        assert!(result.is_some());
    }
}
