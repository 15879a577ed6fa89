//! Hierarchical pathfinder core (spec §4.7). Operates entirely at minimap
//! resolution; the transformer pipeline is responsible for downscaling,
//! shore coercion, component gating, upscaling and smoothing around it.

use crate::astar::{BoundedAStar, HeapAStar, Rect};
use crate::gateway::{GatewayGraph, GatewayId};
use crate::spatial;
use crate::terrain::{Cell, Tile, TerrainView};
use crate::transform::Pathfinder;

pub struct HierarchicalPathfinder<'a, T> {
    terrain: &'a T,
    graph: &'a GatewayGraph,
    cluster_size: u32,
    short_distance_bypass_threshold: u32,
    bounded: BoundedAStar,
    heap: HeapAStar,
}

impl<'a, T: TerrainView> HierarchicalPathfinder<'a, T> {
    pub fn new(
        terrain: &'a T,
        graph: &'a GatewayGraph,
        cluster_size: u32,
        short_distance_bypass_threshold: u32,
    ) -> Self {
        let window_side = 3 * cluster_size as usize;
        Self {
            terrain,
            graph,
            cluster_size,
            short_distance_bypass_threshold,
            bounded: BoundedAStar::new(window_side * window_side),
            heap: HeapAStar::new(graph.len().max(1)),
        }
    }

    fn cluster_window(&self, center: Cell) -> Rect {
        let c = self.cluster_size as i32;
        let cx = center.x.div_euclid(c);
        let cy = center.y.div_euclid(c);
        let min_cx = (cx - 1).max(0);
        let min_cy = (cy - 1).max(0);
        let max_x = (((cx + 2) * c).min(self.terrain.width() as i32) - 1).max(0) as usize;
        let max_y = (((cy + 2) * c).min(self.terrain.height() as i32) - 1).max(0) as usize;
        Rect {
            min_x: (min_cx * c) as usize,
            max_x,
            min_y: (min_cy * c) as usize,
            max_y,
        }
    }

    fn cluster_center(&self, coord: (i32, i32)) -> Cell {
        let c = self.cluster_size as i32;
        Cell::new(coord.0 * c + c / 2, coord.1 * c + c / 2)
    }

    /// Nearest gateway reachable by water BFS from `tile`, restricted to
    /// the 3x3 cluster block around `cell` and a `3*cluster_size` radius
    /// (spec §4.7 step 2 "Endpoint snapping").
    fn snap_to_gateway(&self, tile: Tile, cell: Cell) -> Option<GatewayId> {
        let c = self.cluster_size as i32;
        let (cx, cy) = (cell.x.div_euclid(c), cell.y.div_euclid(c));
        let mut candidates: Vec<(Tile, GatewayId)> = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                for &id in self.graph.gateways_in_cluster((cx + dx, cy + dy)) {
                    candidates.push((self.graph.gateway(id).tile, id));
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        let radius = 3 * self.cluster_size;
        let found = spatial::bfs_nearest(
            self.terrain,
            tile,
            radius,
            |t| self.terrain.is_water(t),
            |t| candidates.iter().any(|&(ct, _)| ct == t),
        )?;
        candidates.iter().find(|&&(ct, _)| ct == found).map(|&(_, id)| id)
    }

    fn bounded_segment(&mut self, a: Tile, b: Tile, center: Cell) -> Option<Vec<Tile>> {
        let rect = self.cluster_window(center);
        self.bounded
            .search(self.terrain, rect, self.terrain.cell_of(a), self.terrain.cell_of(b), |t| {
                self.terrain.is_water(t)
            })
            .ok()
    }

    /// Tile sequence for one abstract edge, using the eagerly-cached path
    /// when present and reversing it if traversed the other way (spec §3:
    /// "a cached path on an abstract edge is direction-independent").
    fn edge_tiles(&mut self, a: GatewayId, b: GatewayId) -> Option<Vec<Tile>> {
        let edge = self.graph.edge_between(a, b)?.clone();
        let a_tile = self.graph.gateway(a).tile;
        if let Some(cached) = &edge.cached_path {
            return if cached.first() == Some(&a_tile) {
                Some(cached.clone())
            } else {
                let mut reversed = cached.clone();
                reversed.reverse();
                Some(reversed)
            };
        }
        let b_tile = self.graph.gateway(b).tile;
        let center = self.cluster_center(edge.cluster);
        self.bounded_segment(a_tile, b_tile, center)
    }

    fn append_segment(path: &mut Vec<Tile>, segment: Vec<Tile>) {
        if path.last() == segment.first() {
            path.extend(segment.into_iter().skip(1));
        } else {
            path.extend(segment);
        }
    }
}

impl<'a, T: TerrainView> Pathfinder for HierarchicalPathfinder<'a, T> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        if from.is_empty() {
            return None;
        }
        // Multiple sources collapse to the one closest to the goal; the
        // bypass/snapping/refinement stages below all operate on a single
        // representative tile (see design note on multi-source collapse).
        let start = *from.iter().min_by_key(|c| c.manhattan(to)).unwrap();

        let to_tiles = |path: Vec<Tile>| path.into_iter().map(|t| self.terrain.cell_of(t)).collect();

        let start_tile = crate::error::require_tile(self.terrain, start).ok()?;
        let goal_tile = crate::error::require_tile(self.terrain, to).ok()?;

        // 1. Short-distance bypass.
        if start.manhattan(to) <= self.short_distance_bypass_threshold {
            if let Some(path) = self.bounded_segment(start_tile, goal_tile, start) {
                return Some(to_tiles(path));
            }
        }

        // 2. Endpoint snapping.
        let start_gateway = self.snap_to_gateway(start_tile, start)?;
        let goal_gateway = self.snap_to_gateway(goal_tile, to)?;

        // 3. Same gateway.
        if start_gateway == goal_gateway {
            return self.bounded_segment(start_tile, goal_tile, start).map(to_tiles);
        }

        // 4. Abstract search.
        let abstract_path = self.heap.search(self.graph, start_gateway.0, goal_gateway.0).ok()?;

        // 5. Refinement.
        let first_gateway_tile = self.graph.gateway(GatewayId(abstract_path[0])).tile;
        let mut full_path = self.bounded_segment(start_tile, first_gateway_tile, start)?;

        for pair in abstract_path.windows(2) {
            let segment = self.edge_tiles(GatewayId(pair[0]), GatewayId(pair[1]))?;
            Self::append_segment(&mut full_path, segment);
        }

        let last_gateway_tile = self.graph.gateway(GatewayId(*abstract_path.last().unwrap())).tile;
        let final_segment = self.bounded_segment(last_gateway_tile, goal_tile, to)?;
        Self::append_segment(&mut full_path, final_segment);

        Some(to_tiles(full_path))
    }
}
