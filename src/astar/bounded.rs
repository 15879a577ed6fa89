//! Bounded A\* (spec §4.5.3): a search confined to an axis-aligned
//! rectangle, with per-node state re-indexed into the rectangle's local
//! frame so arrays stay sized to the window rather than the whole map.
//!
//! This is the workhorse behind intra-cluster edge probing and hierarchical
//! refinement (spec §4.6, §4.7) — both run many small searches over the
//! same instance, so its state is preallocated once to a capacity and
//! reused via stamp advancement like the generic adapter core.

use crate::queue::BucketQueue;
use crate::terrain::{Cell, Tile, TerrainView};

const NO_PARENT: u32 = u32::MAX;

/// Inclusive axis-aligned tile rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl Rect {
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    pub fn node_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min_x as i32
            && cell.x <= self.max_x as i32
            && cell.y >= self.min_y as i32
            && cell.y <= self.max_y as i32
    }

    /// Clamps a cell outside the rectangle onto its nearest border tile
    /// (spec §4.5.3: "endpoints outside the rectangle are clamped").
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(self.min_x as i32, self.max_x as i32),
            cell.y.clamp(self.min_y as i32, self.max_y as i32),
        )
    }

    fn local_index(&self, cell: Cell) -> u32 {
        let lx = cell.x - self.min_x as i32;
        let ly = cell.y - self.min_y as i32;
        (ly as u32) * self.width() as u32 + lx as u32
    }

    fn cell_of_local(&self, local: u32) -> Cell {
        let width = self.width() as u32;
        Cell::new(
            self.min_x as i32 + (local % width) as i32,
            self.min_y as i32 + (local / width) as i32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedError {
    NoPath,
    IterationLimit,
    RegionTooLarge,
}

/// Reusable bounded-window search. `preallocated_capacity` bounds the
/// largest rectangle this instance can search; exceeding it is a caller
/// error (spec §7 "region-too-large").
pub struct BoundedAStar {
    capacity: usize,
    stamp: u32,
    open_stamp: Vec<u32>,
    closed_stamp: Vec<u32>,
    g: Vec<u32>,
    parent: Vec<u32>,
    queue: BucketQueue,
    max_iterations: u32,
}

impl BoundedAStar {
    pub fn new(preallocated_capacity: usize) -> Self {
        Self {
            capacity: preallocated_capacity,
            stamp: 0,
            open_stamp: vec![0; preallocated_capacity],
            closed_stamp: vec![0; preallocated_capacity],
            g: vec![0; preallocated_capacity],
            parent: vec![NO_PARENT; preallocated_capacity],
            queue: BucketQueue::new(preallocated_capacity as u32),
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

    /// Searches `rect` for a water path from `start` to `goal`, both full
    /// terrain cells, clamped into the rectangle first. `traversable`
    /// additionally gates which tiles may be entered (e.g. rail's
    /// shoreline exception).
    pub fn search<T: TerrainView>(
        &mut self,
        terrain: &T,
        rect: Rect,
        start: Cell,
        goal: Cell,
        traversable: impl Fn(Tile) -> bool,
    ) -> Result<Vec<Tile>, BoundedError> {
        let node_count = rect.node_count();
        if node_count > self.capacity {
            // A caller error (spec §7 "region-too-large"): logged loudly
            // rather than asserted, since the fallback below must still be
            // exercisable by tests run with debug assertions enabled.
            tracing::warn!(node_count, capacity = self.capacity, "bounded search region exceeds preallocated capacity");
            return Err(BoundedError::RegionTooLarge);
        }

        let start = rect.clamp(start);
        let goal = rect.clamp(goal);
        let max_priority = (rect.width() + rect.height()) as u32;
        self.queue.ensure_max_priority(max_priority);
        self.queue.clear();
        self.advance_stamp();

        let start_local = rect.local_index(start);
        let goal_local = rect.local_index(goal);

        self.g[start_local as usize] = 0;
        self.parent[start_local as usize] = NO_PARENT;
        self.open_stamp[start_local as usize] = self.stamp;
        self.queue.push(start_local, heuristic(&rect, start_local, goal_local));

        let mut iterations: u32 = 0;
        while let Some(current) = self.queue.pop() {
            if self.closed_stamp[current as usize] == self.stamp {
                continue;
            }
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(BoundedError::IterationLimit);
            }
            self.closed_stamp[current as usize] = self.stamp;

            if current == goal_local {
                return Ok(self.reconstruct(terrain, &rect, current));
            }

            let current_cell = rect.cell_of_local(current);
            for (dx, dy) in [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)] {
                let ncell = Cell::new(current_cell.x + dx, current_cell.y + dy);
                if !rect.contains(ncell) {
                    continue;
                }
                let Some(ntile) = terrain.tile_at(ncell) else {
                    continue;
                };
                if !traversable(ntile) {
                    continue;
                }
                let nlocal = rect.local_index(ncell);
                if self.closed_stamp[nlocal as usize] == self.stamp {
                    continue;
                }
                let tentative_g = self.g[current as usize] + 1;
                let has_g = self.open_stamp[nlocal as usize] == self.stamp;
                if !has_g || tentative_g < self.g[nlocal as usize] {
                    self.g[nlocal as usize] = tentative_g;
                    self.parent[nlocal as usize] = current;
                    self.open_stamp[nlocal as usize] = self.stamp;
                    let f = tentative_g + heuristic(&rect, nlocal, goal_local);
                    self.queue.push(nlocal, f);
                }
            }
        }
        Err(BoundedError::NoPath)
    }

    fn reconstruct<T: TerrainView>(&self, terrain: &T, rect: &Rect, mut current: u32) -> Vec<Tile> {
        let mut path = vec![terrain.tile_at(rect.cell_of_local(current)).unwrap()];
        while self.parent[current as usize] != NO_PARENT {
            current = self.parent[current as usize];
            path.push(terrain.tile_at(rect.cell_of_local(current)).unwrap());
        }
        path.reverse();
        path
    }
}

fn heuristic(rect: &Rect, a: u32, b: u32) -> u32 {
    let ca = rect.cell_of_local(a);
    let cb = rect.cell_of_local(b);
    ca.manhattan(cb)
}
