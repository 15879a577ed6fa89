//! Inlined grid water A\* (spec §4.5.2): the same algorithm as the generic
//! adapter, specialised to a uniform-cost 4-connected water grid so the
//! hot loop avoids adapter indirection. Correctness matches the adapter
//! form; this exists purely for throughput on the most common query.

use crate::astar::SearchFailure;
use crate::queue::BucketQueue;
use crate::terrain::{Tile, TerrainView};

const NO_PARENT: u32 = u32::MAX;

/// Heuristic weight applied to the Manhattan distance. Deliberately
/// greedy (> 1) to trade strict optimality for speed on large water
/// regions (spec §4.5.1 "Water grid" adapter note).
pub const HEURISTIC_WEIGHT: u32 = 15;

pub struct WaterAStar {
    stamp: u32,
    open_stamp: Vec<u32>,
    closed_stamp: Vec<u32>,
    g: Vec<u32>,
    parent: Vec<u32>,
    queue: BucketQueue,
    max_iterations: u32,
}

impl WaterAStar {
    pub fn new(num_tiles: usize, max_priority: u32) -> Self {
        Self {
            stamp: 0,
            open_stamp: vec![0; num_tiles],
            closed_stamp: vec![0; num_tiles],
            g: vec![0; num_tiles],
            parent: vec![NO_PARENT; num_tiles],
            queue: BucketQueue::new(max_priority),
            max_iterations: crate::astar::DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn advance_stamp(&mut self) {
        if self.stamp == u32::MAX {
            self.open_stamp.iter_mut().for_each(|s| *s = 0);
            self.closed_stamp.iter_mut().for_each(|s| *s = 0);
            self.stamp = 1;
        } else {
            self.stamp += 1;
        }
    }

    pub fn search<T: TerrainView>(
        &mut self,
        terrain: &T,
        starts: &[Tile],
        goal: Tile,
    ) -> Result<Vec<Tile>, SearchFailure> {
        self.advance_stamp();
        self.queue.clear();

        for &start in starts {
            let idx = terrain.tile_index(start);
            let h = terrain.manhattan_dist(start, goal) * HEURISTIC_WEIGHT;
            self.g[idx] = 0;
            self.parent[idx] = NO_PARENT;
            self.open_stamp[idx] = self.stamp;
            self.queue.push(start.0, h);
        }

        let mut iterations: u32 = 0;
        let mut neighbours = smallvec::SmallVec::<[Tile; 4]>::new();
        while let Some(current_raw) = self.queue.pop() {
            let current = Tile(current_raw);
            let cidx = terrain.tile_index(current);
            if self.closed_stamp[cidx] == self.stamp {
                continue;
            }
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SearchFailure::IterationLimit);
            }
            self.closed_stamp[cidx] = self.stamp;

            if current == goal {
                return Ok(self.reconstruct(terrain, current));
            }

            terrain.neighbours(current, &mut neighbours);
            for &n in &neighbours {
                if !terrain.is_water(n) {
                    continue;
                }
                let nidx = terrain.tile_index(n);
                if self.closed_stamp[nidx] == self.stamp {
                    continue;
                }
                let tentative_g = self.g[cidx] + 1;
                let has_g = self.open_stamp[nidx] == self.stamp;
                if !has_g || tentative_g < self.g[nidx] {
                    self.g[nidx] = tentative_g;
                    self.parent[nidx] = current.0;
                    self.open_stamp[nidx] = self.stamp;
                    let f = tentative_g + terrain.manhattan_dist(n, goal) * HEURISTIC_WEIGHT;
                    self.queue.push(n.0, f);
                }
            }
        }
        Err(SearchFailure::NoPath)
    }

    fn reconstruct<T: TerrainView>(&self, terrain: &T, mut current: Tile) -> Vec<Tile> {
        let mut path = vec![current];
        loop {
            let idx = terrain.tile_index(current);
            let parent = self.parent[idx];
            if parent == NO_PARENT {
                break;
            }
            current = Tile(parent);
            path.push(current);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::{GenericAStar, WaterAdapter};
    use crate::terrain::{Cell, TerrainGrid};

    #[test]
    fn finds_straight_water_path() {
        let grid = TerrainGrid::new(4, 1, |_, _| false);
        let start = grid.tile_at(Cell::new(0, 0)).unwrap();
        let goal = grid.tile_at(Cell::new(3, 0)).unwrap();
        let max_priority = (grid.width() + grid.height()) as u32 * HEURISTIC_WEIGHT;
        let mut astar = WaterAStar::new(grid.width() * grid.height(), max_priority);
        let path = astar.search(&grid, &[start], goal).unwrap();
        assert_eq!(
            path,
            vec![
                grid.tile_at(Cell::new(0, 0)).unwrap(),
                grid.tile_at(Cell::new(1, 0)).unwrap(),
                grid.tile_at(Cell::new(2, 0)).unwrap(),
                grid.tile_at(Cell::new(3, 0)).unwrap(),
            ]
        );
    }

    #[test]
    fn land_blocks_the_inlined_search() {
        let grid = TerrainGrid::new(3, 1, |x, _| x == 1);
        let start = grid.tile_at(Cell::new(0, 0)).unwrap();
        let goal = grid.tile_at(Cell::new(2, 0)).unwrap();
        let max_priority = (grid.width() + grid.height()) as u32 * HEURISTIC_WEIGHT;
        let mut astar = WaterAStar::new(grid.width() * grid.height(), max_priority);
        let result = astar.search(&grid, &[start], goal);
        assert_eq!(result, Err(SearchFailure::NoPath));
    }

    #[test]
    fn multi_source_water_path() {
        let grid = TerrainGrid::new(10, 2, |_, _| false);
        let s1 = grid.tile_at(Cell::new(9, 0)).unwrap();
        let s2 = grid.tile_at(Cell::new(8, 1)).unwrap();
        let goal = grid.tile_at(Cell::new(8, 0)).unwrap();
        let max_priority = (grid.width() + grid.height()) as u32 * HEURISTIC_WEIGHT;
        let mut astar = WaterAStar::new(grid.width() * grid.height(), max_priority);
        let path = astar.search(&grid, &[s1, s2], goal).unwrap();
        assert_eq!(path.len(), 2);
        assert!(path[0] == s1 || path[0] == s2);
        assert_eq!(*path.last().unwrap(), goal);
    }

    #[test]
    fn matches_the_generic_adapter_form() {
        // A water grid with an obstacle, searched both through the inlined
        // specialisation and through the generic adapter core, must agree
        // tile-for-tile: the two forms implement the same contract.
        let grid = TerrainGrid::new(6, 6, |x, y| x == 3 && y < 4);
        let start = grid.tile_at(Cell::new(0, 0)).unwrap();
        let goal = grid.tile_at(Cell::new(5, 5)).unwrap();

        let max_priority = (grid.width() + grid.height()) as u32 * HEURISTIC_WEIGHT;
        let mut inlined = WaterAStar::new(grid.width() * grid.height(), max_priority);
        let inlined_path: Vec<u32> = inlined.search(&grid, &[start], goal).unwrap().into_iter().map(|t| t.0).collect();

        let adapter = WaterAdapter::new(&grid, HEURISTIC_WEIGHT);
        let mut generic = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        let adapter_path = generic.search(&adapter, &[start.0], goal.0).unwrap();

        assert_eq!(inlined_path, adapter_path);
    }
}
