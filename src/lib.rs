//! Hierarchical naval pathfinding engine.
//!
//! Routes units — chiefly ships — across large water regions of a
//! tile-based world map. The hard part lives in three layers: a family of
//! A\* variants (generic adapter-driven, inlined grid, bounded-window), a
//! gateway/cluster graph that accelerates long-range queries by searching
//! an abstract graph of cluster-boundary crossings instead of the raw
//! grid, and a transformer pipeline that glues minimap downscaling, shore
//! coercion, water-component gating and line-of-sight smoothing around the
//! hierarchical core. A stepping facade lets game units consume a computed
//! path one tile per tick; the air and parabola pathfinders provide
//! non-search movement for projectiles.
//!
//! Entry point: build a [`PathfinderBuilder`] over a [`TerrainView`], then
//! call [`PathfinderBuilder::water_pathfinder`] for the naval router, or
//! construct [`RailPathfinder`] / [`StationsPathfinder`] / [`AirPathfinder`]
//! / [`ParabolaPathfinder`] / [`GridWaterPathfinder`] directly for the
//! other movement kinds.

mod air;
mod astar;
mod builder;
mod components;
mod config;
mod error;
mod gateway;
mod hierarchical;
mod parabola;
mod queue;
mod spatial;
mod stepping;
mod terrain;
mod transform;

pub use air::AirPathfinder;
pub use builder::{PathfinderBuilder, WaterPathfinder};
pub use components::WaterComponents;
pub use config::{init_tracing, ConfigError, PathfinderConfig};
pub use error::PathfindError;
pub use gateway::{build_gateway_graph, AbstractEdge, Cluster, ClusterSide, Gateway, GatewayGraph, GatewayId};
pub use hierarchical::HierarchicalPathfinder;
pub use parabola::{ParabolaConfig, ParabolaPathfinder};
pub use stepping::{SteppingFacade, StepOutcome};
pub use terrain::{Cell, Minimap, Tile, TerrainGrid, TerrainView};
pub use transform::Pathfinder;

use astar::{
    GenericAStar, RailAdapter, SearchAdapter, SearchFailure, StationAdapter, StationGraph, WaterAStar, HEURISTIC_WEIGHT,
};

/// Direct (non-hierarchical) full-grid water router (spec §4.5.2): the
/// inlined water A\* specialisation, for callers who want a single flat
/// search over the whole grid rather than the clustered pipeline
/// [`PathfinderBuilder::water_pathfinder`] assembles.
pub struct GridWaterPathfinder<'a, T> {
    terrain: &'a T,
    astar: WaterAStar,
}

impl<'a, T: TerrainView> GridWaterPathfinder<'a, T> {
    pub fn new(terrain: &'a T) -> Self {
        let num_tiles = terrain.width() * terrain.height();
        let max_priority = (terrain.width() + terrain.height()) as u32 * HEURISTIC_WEIGHT;
        Self { terrain, astar: WaterAStar::new(num_tiles, max_priority) }
    }
}

impl<'a, T: TerrainView> Pathfinder for GridWaterPathfinder<'a, T> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let starts: Vec<Tile> = from
            .iter()
            .filter_map(|&c| crate::error::require_tile(self.terrain, c).ok())
            .collect();
        let goal = crate::error::require_tile(self.terrain, to).ok()?;
        if starts.is_empty() {
            return None;
        }
        let path = self.astar.search(self.terrain, &starts, goal).ok()?;
        Some(path.into_iter().map(|t| self.terrain.cell_of(t)).collect())
    }
}

/// Rail-network router over a full-resolution [`TerrainView`]: land by
/// default, water only by shoreline crossing (spec §4.5.1).
pub struct RailPathfinder<'a, T> {
    terrain: &'a T,
    astar: GenericAStar,
    water_penalty: u32,
    direction_change_penalty: u32,
}

impl<'a, T: TerrainView> RailPathfinder<'a, T> {
    pub fn new(terrain: &'a T, water_penalty: u32, direction_change_penalty: u32) -> Self {
        let adapter = RailAdapter::new(terrain, water_penalty, direction_change_penalty);
        let astar = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        Self { terrain, astar, water_penalty, direction_change_penalty }
    }
}

impl<'a, T: TerrainView> Pathfinder for RailPathfinder<'a, T> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let adapter = RailAdapter::new(self.terrain, self.water_penalty, self.direction_change_penalty);
        let starts: Vec<u32> = from
            .iter()
            .filter_map(|&c| crate::error::require_tile(self.terrain, c).ok())
            .map(|t| t.0)
            .collect();
        let goal = crate::error::require_tile(self.terrain, to).ok()?.0;
        if starts.is_empty() {
            return None;
        }
        let path = self.astar.search(&adapter, &starts, goal).ok()?;
        Some(path.into_iter().map(|n| self.terrain.cell_of(Tile(n))).collect())
    }
}

/// Precomputed station-to-station router (spec §4.5.1). The station
/// network itself is built by an external collaborator; this only
/// consumes the contract.
pub struct StationsPathfinder<'a> {
    graph: &'a StationGraph,
    astar: GenericAStar,
}

impl<'a> StationsPathfinder<'a> {
    pub fn new(graph: &'a StationGraph) -> Self {
        let adapter = StationAdapter::new(graph);
        let astar = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        Self { graph, astar }
    }

    fn station_index(&self, cell: Cell) -> Option<u32> {
        self.graph.positions.iter().position(|&p| p == cell).map(|i| i as u32)
    }
}

impl<'a> Pathfinder for StationsPathfinder<'a> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let adapter = StationAdapter::new(self.graph);
        let starts: Vec<u32> = from.iter().filter_map(|&c| self.station_index(c)).collect();
        let goal = self.station_index(to)?;
        if starts.is_empty() {
            return None;
        }
        match self.astar.search(&adapter, &starts, goal) {
            Ok(path) => Some(path.into_iter().map(|i| self.graph.positions[i as usize]).collect()),
            Err(SearchFailure::NoPath | SearchFailure::IterationLimit) => None,
        }
    }
}
