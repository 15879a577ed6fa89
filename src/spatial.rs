//! Spatial query helpers (spec §4.3): bounded BFS nearest-match and
//! Manhattan-nearest reductions over a tile grid.

use crate::terrain::{Tile, TerrainView};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Water-respecting BFS from `from`, expanding only tiles that pass
/// `traversable`, halting once the frontier distance exceeds `max_dist`.
/// Returns the first visited tile for which `predicate` holds.
pub fn bfs_nearest<T: TerrainView>(
    terrain: &T,
    from: Tile,
    max_dist: u32,
    traversable: impl Fn(Tile) -> bool,
    predicate: impl Fn(Tile) -> bool,
) -> Option<Tile> {
    let mut visited = fixedbitset::FixedBitSet::with_capacity(terrain.width() * terrain.height());
    let mut queue = VecDeque::new();
    visited.insert(terrain.tile_index(from));
    queue.push_back((from, 0u32));

    while let Some((tile, dist)) = queue.pop_front() {
        if predicate(tile) {
            return Some(tile);
        }
        if dist >= max_dist {
            continue;
        }
        let mut neighbours = SmallVec::<[Tile; 4]>::new();
        terrain.neighbours(tile, &mut neighbours);
        for n in neighbours {
            let idx = terrain.tile_index(n);
            if visited.contains(idx) {
                continue;
            }
            if !traversable(n) {
                continue;
            }
            visited.insert(idx);
            queue.push_back((n, dist + 1));
        }
    }
    None
}

/// All matching tiles reachable within `max_dist`, used to enumerate
/// candidate shores.
pub fn bfs_within_distance<T: TerrainView>(
    terrain: &T,
    from: Tile,
    max_dist: u32,
    traversable: impl Fn(Tile) -> bool,
    predicate: impl Fn(Tile) -> bool,
) -> Vec<Tile> {
    let mut visited = fixedbitset::FixedBitSet::with_capacity(terrain.width() * terrain.height());
    let mut queue = VecDeque::new();
    let mut matches = Vec::new();
    visited.insert(terrain.tile_index(from));
    queue.push_back((from, 0u32));

    while let Some((tile, dist)) = queue.pop_front() {
        if predicate(tile) {
            matches.push(tile);
        }
        if dist >= max_dist {
            continue;
        }
        let mut neighbours = SmallVec::<[Tile; 4]>::new();
        terrain.neighbours(tile, &mut neighbours);
        for n in neighbours {
            let idx = terrain.tile_index(n);
            if visited.contains(idx) {
                continue;
            }
            if !traversable(n) {
                continue;
            }
            visited.insert(idx);
            queue.push_back((n, dist + 1));
        }
    }
    matches
}

/// Straight linear reduction to the Manhattan-nearest tile to `target`,
/// ties broken by first-seen.
pub fn manhattan_nearest<T: TerrainView>(terrain: &T, tiles: &[Tile], target: Tile) -> Option<Tile> {
    let mut best: Option<(Tile, u32)> = None;
    for &tile in tiles {
        let dist = terrain.manhattan_dist(tile, target);
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((tile, dist)),
        }
    }
    best.map(|(t, _)| t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Cell, TerrainGrid};

    #[test]
    fn bfs_nearest_finds_closest_matching_tile() {
        let grid = TerrainGrid::new(5, 1, |_, _| false);
        let from = grid.tile_at(Cell::new(0, 0)).unwrap();
        let target = grid.tile_at(Cell::new(3, 0)).unwrap();
        let found = bfs_nearest(&grid, from, 10, |_| true, |t| t == target);
        assert_eq!(found, Some(target));
    }

    #[test]
    fn bfs_nearest_respects_max_dist() {
        let grid = TerrainGrid::new(5, 1, |_, _| false);
        let from = grid.tile_at(Cell::new(0, 0)).unwrap();
        let target = grid.tile_at(Cell::new(4, 0)).unwrap();
        let found = bfs_nearest(&grid, from, 2, |_| true, |t| t == target);
        assert_eq!(found, None);
    }

    #[test]
    fn manhattan_nearest_breaks_ties_first_seen() {
        let grid = TerrainGrid::new(5, 5, |_, _| false);
        let target = grid.tile_at(Cell::new(2, 2)).unwrap();
        let a = grid.tile_at(Cell::new(0, 2)).unwrap();
        let b = grid.tile_at(Cell::new(2, 0)).unwrap();
        let nearest = manhattan_nearest(&grid, &[a, b], target);
        assert_eq!(nearest, Some(a));
    }

    #[test]
    fn bfs_within_distance_enumerates_all_matches() {
        let grid = TerrainGrid::new(5, 1, |_, _| false);
        let from = grid.tile_at(Cell::new(0, 0)).unwrap();
        let matches = bfs_within_distance(&grid, from, 3, |_| true, |_| true);
        assert_eq!(matches.len(), 4); // distances 0..=3
    }
}
