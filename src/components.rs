//! Water-connectivity component labeller (spec §4.4).
//!
//! A one-shot flood fill over the water tiles of a [`TerrainView`],
//! producing an O(1) `in_same_component` check used to short-circuit
//! pathfinding between tiles that can never be connected by water.

use crate::terrain::{Tile, TerrainView};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Labels every water tile with the id of its connected component.
/// Land tiles carry no label (`None`). Built once over an immutable
/// grid, then queried for the lifetime of the graph.
pub struct WaterComponents {
    labels: Vec<Option<u32>>,
    count: u32,
}

impl WaterComponents {
    pub fn build<T: TerrainView>(terrain: &T) -> Self {
        let size = terrain.width() * terrain.height();
        let mut labels = vec![None; size];
        let mut next_id = 0u32;
        let mut queue = VecDeque::new();

        for idx in 0..size {
            if labels[idx].is_some() {
                continue;
            }
            let tile = Tile(idx as u32);
            if !terrain.is_water(tile) {
                continue;
            }
            let id = next_id;
            next_id += 1;
            labels[idx] = Some(id);
            queue.push_back(tile);
            while let Some(t) = queue.pop_front() {
                let mut neighbours = SmallVec::<[Tile; 4]>::new();
                terrain.neighbours(t, &mut neighbours);
                for n in neighbours {
                    let nidx = terrain.tile_index(n);
                    if labels[nidx].is_some() {
                        continue;
                    }
                    if !terrain.is_water(n) {
                        continue;
                    }
                    labels[nidx] = Some(id);
                    queue.push_back(n);
                }
            }
        }

        Self { labels, count: next_id }
    }

    /// `None` for land tiles or tiles outside any water component.
    pub fn component_id(&self, tile: Tile) -> Option<u32> {
        self.labels[tile.0 as usize]
    }

    pub fn in_same_component(&self, a: Tile, b: Tile) -> bool {
        match (self.component_id(a), self.component_id(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn component_count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Cell, TerrainGrid};

    #[test]
    fn connected_water_shares_a_component() {
        let grid = TerrainGrid::new(5, 1, |_, _| false);
        let components = WaterComponents::build(&grid);
        let a = grid.tile_at(Cell::new(0, 0)).unwrap();
        let b = grid.tile_at(Cell::new(4, 0)).unwrap();
        assert!(components.in_same_component(a, b));
    }

    #[test]
    fn land_splits_water_into_separate_components() {
        // Two water tiles separated by a land column.
        let grid = TerrainGrid::new(3, 1, |x, _| x == 1);
        let components = WaterComponents::build(&grid);
        let a = grid.tile_at(Cell::new(0, 0)).unwrap();
        let b = grid.tile_at(Cell::new(2, 0)).unwrap();
        assert!(!components.in_same_component(a, b));
        assert_eq!(components.component_count(), 2);
    }

    #[test]
    fn land_tiles_have_no_component_id() {
        let grid = TerrainGrid::new(3, 1, |x, _| x == 1);
        let components = WaterComponents::build(&grid);
        let land = grid.tile_at(Cell::new(1, 0)).unwrap();
        assert_eq!(components.component_id(land), None);
    }

    #[test]
    fn disjoint_water_bodies_on_larger_map() {
        // 7x5 map with a solid land wall down column 3.
        let grid = TerrainGrid::new(7, 5, |x, _| x == 3);
        let components = WaterComponents::build(&grid);
        let left = grid.tile_at(Cell::new(0, 0)).unwrap();
        let right = grid.tile_at(Cell::new(6, 0)).unwrap();
        assert!(!components.in_same_component(left, right));
    }
}
