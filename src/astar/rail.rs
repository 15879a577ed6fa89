//! Rail, station, and water adapters for the generic A\* core (spec
//! §4.5.1).

use crate::astar::adapter::SearchAdapter;
use crate::terrain::{Cell, Tile, TerrainView};

/// Generic-adapter form of the water grid (spec §4.5.1 "Water" adapter):
/// cost 1, traversable iff water, heuristic `weight * manhattan`. The
/// inlined [`crate::astar::WaterAStar`] specialises this same contract for
/// throughput (spec §9 "Adapter vs. inlined A*"); both forms are kept so
/// the polymorphic core has a real water-grid instance to be generic over.
pub struct WaterAdapter<'a, T> {
    terrain: &'a T,
    heuristic_weight: u32,
}

impl<'a, T: TerrainView> WaterAdapter<'a, T> {
    pub fn new(terrain: &'a T, heuristic_weight: u32) -> Self {
        Self { terrain, heuristic_weight }
    }
}

impl<'a, T: TerrainView> SearchAdapter for WaterAdapter<'a, T> {
    fn num_nodes(&self) -> usize {
        self.terrain.width() * self.terrain.height()
    }

    fn max_neighbours(&self) -> usize {
        4
    }

    fn max_priority(&self) -> u32 {
        (self.terrain.width() + self.terrain.height()) as u32 * self.heuristic_weight
    }

    fn neighbours(&self, node: u32, out: &mut Vec<u32>) {
        let mut buf = smallvec::SmallVec::<[Tile; 4]>::new();
        self.terrain.neighbours(Tile(node), &mut buf);
        for n in buf {
            if self.terrain.is_water(n) {
                out.push(n.0);
            }
        }
    }

    fn cost(&self, _from: u32, _to: u32, _prev: Option<u32>) -> u32 {
        1
    }

    fn heuristic(&self, node: u32, goal: u32) -> u32 {
        self.terrain.manhattan_dist(Tile(node), Tile(goal)) * self.heuristic_weight
    }
}

/// Rail-network traversal: land is the default medium, water may be
/// entered only from a shoreline tile (the rail "jumps" a crossing), and
/// carries a configurable penalty plus an optional direction-change
/// penalty to discourage zig-zagging track.
pub struct RailAdapter<'a, T: TerrainView> {
    terrain: &'a T,
    water_penalty: u32,
    direction_change_penalty: u32,
    heuristic_weight: u32,
}

impl<'a, T: TerrainView> RailAdapter<'a, T> {
    pub fn new(terrain: &'a T, water_penalty: u32, direction_change_penalty: u32) -> Self {
        Self {
            terrain,
            water_penalty,
            direction_change_penalty,
            heuristic_weight: 1,
        }
    }

    fn direction(&self, from: Tile, to: Tile) -> (i32, i32) {
        let a = self.terrain.cell_of(from);
        let b = self.terrain.cell_of(to);
        (b.x - a.x, b.y - a.y)
    }
}

impl<'a, T: TerrainView> SearchAdapter for RailAdapter<'a, T> {
    fn num_nodes(&self) -> usize {
        self.terrain.width() * self.terrain.height()
    }

    fn max_neighbours(&self) -> usize {
        4
    }

    fn max_priority(&self) -> u32 {
        (self.terrain.width() + self.terrain.height()) as u32
            * (self.heuristic_weight + self.water_penalty + 1)
    }

    fn neighbours(&self, node: u32, out: &mut Vec<u32>) {
        let from = Tile(node);
        let mut buf = smallvec::SmallVec::<[Tile; 4]>::new();
        self.terrain.neighbours(from, &mut buf);
        let from_is_shore = self.terrain.is_shore(from);
        for n in buf {
            if self.terrain.is_water(n) && !from_is_shore {
                continue;
            }
            out.push(n.0);
        }
    }

    fn cost(&self, from: u32, to: u32, prev: Option<u32>) -> u32 {
        let mut cost = 1;
        if self.terrain.is_water(Tile(to)) {
            cost += self.water_penalty;
        }
        if self.direction_change_penalty > 0 {
            if let Some(prev) = prev {
                let incoming = self.direction(Tile(prev), Tile(from));
                let outgoing = self.direction(Tile(from), Tile(to));
                if incoming != outgoing {
                    cost += self.direction_change_penalty;
                }
            }
        }
        cost
    }

    fn heuristic(&self, node: u32, goal: u32) -> u32 {
        self.terrain.manhattan_dist(Tile(node), Tile(goal)) * self.heuristic_weight
    }
}

/// Precomputed station network: fixed positions and an adjacency list.
/// Built by an external collaborator (the rail-station construction
/// system is out of scope); the core only consumes this contract.
pub struct StationGraph {
    pub positions: Vec<Cell>,
    pub edges: Vec<Vec<u32>>,
}

impl StationGraph {
    pub fn new(positions: Vec<Cell>, edges: Vec<Vec<u32>>) -> Self {
        debug_assert_eq!(positions.len(), edges.len());
        Self { positions, edges }
    }
}

pub struct StationAdapter<'a> {
    graph: &'a StationGraph,
}

impl<'a> StationAdapter<'a> {
    pub fn new(graph: &'a StationGraph) -> Self {
        Self { graph }
    }
}

impl<'a> SearchAdapter for StationAdapter<'a> {
    fn num_nodes(&self) -> usize {
        self.graph.positions.len()
    }

    fn max_neighbours(&self) -> usize {
        self.graph.edges.iter().map(|e| e.len()).max().unwrap_or(0)
    }

    fn max_priority(&self) -> u32 {
        self.graph
            .positions
            .iter()
            .map(|p| p.x.unsigned_abs() + p.y.unsigned_abs())
            .max()
            .unwrap_or(0)
            * 2
            + self.graph.positions.len() as u32
    }

    fn neighbours(&self, node: u32, out: &mut Vec<u32>) {
        out.extend_from_slice(&self.graph.edges[node as usize]);
    }

    fn cost(&self, _from: u32, _to: u32, _prev: Option<u32>) -> u32 {
        1
    }

    fn heuristic(&self, node: u32, goal: u32) -> u32 {
        self.graph.positions[node as usize].manhattan(self.graph.positions[goal as usize])
    }
}
