use crate::astar::SearchAdapter;
use crate::gateway::types::{AbstractEdge, Cluster, Gateway, GatewayId};
use rustc_hash::FxHashMap;

/// The built, read-only hierarchical graph: gateways, the edges probed
/// between them, and the cluster partition they belong to. Immutable for
/// the map's lifetime and freely shareable across pathfinder instances
/// (spec §3, §5).
pub struct GatewayGraph {
    pub gateways: Vec<Gateway>,
    pub edges: Vec<AbstractEdge>,
    clusters: FxHashMap<(i32, i32), Cluster>,
    adjacency: Vec<Vec<u32>>,
    edge_lookup: FxHashMap<(u32, u32), usize>,
}

impl GatewayGraph {
    pub fn new(gateways: Vec<Gateway>, edges: Vec<AbstractEdge>, clusters: FxHashMap<(i32, i32), Cluster>) -> Self {
        let mut adjacency = vec![Vec::new(); gateways.len()];
        let mut edge_lookup = FxHashMap::default();
        for (idx, edge) in edges.iter().enumerate() {
            adjacency[edge.a.0 as usize].push(idx as u32);
            adjacency[edge.b.0 as usize].push(idx as u32);
            edge_lookup.insert((edge.a.0, edge.b.0), idx);
            edge_lookup.insert((edge.b.0, edge.a.0), idx);
        }
        Self {
            gateways,
            edges,
            clusters,
            adjacency,
            edge_lookup,
        }
    }

    pub fn gateway(&self, id: GatewayId) -> &Gateway {
        &self.gateways[id.0 as usize]
    }

    pub fn gateways_in_cluster(&self, coord: (i32, i32)) -> &[GatewayId] {
        self.clusters
            .get(&coord)
            .map(|c| c.gateways.as_slice())
            .unwrap_or(&[])
    }

    pub fn edge_between(&self, a: GatewayId, b: GatewayId) -> Option<&AbstractEdge> {
        self.edge_lookup.get(&(a.0, b.0)).map(|&idx| &self.edges[idx])
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}

impl SearchAdapter for GatewayGraph {
    fn num_nodes(&self) -> usize {
        self.gateways.len()
    }

    fn max_neighbours(&self) -> usize {
        self.adjacency.iter().map(|a| a.len()).max().unwrap_or(0)
    }

    fn max_priority(&self) -> u32 {
        // Unused by the heap-backed search over this graph, but required
        // by the shared adapter contract (spec §4.5.1).
        u32::MAX / 4
    }

    fn neighbours(&self, node: u32, out: &mut Vec<u32>) {
        for &edge_idx in &self.adjacency[node as usize] {
            let edge = &self.edges[edge_idx as usize];
            let other = if edge.a.0 == node { edge.b.0 } else { edge.a.0 };
            out.push(other);
        }
    }

    fn cost(&self, from: u32, to: u32, _prev: Option<u32>) -> u32 {
        self.edge_between(GatewayId(from), GatewayId(to))
            .map(|e| e.cost)
            .unwrap_or(u32::MAX)
    }

    fn heuristic(&self, node: u32, goal: u32) -> u32 {
        self.gateways[node as usize]
            .position
            .manhattan(self.gateways[goal as usize].position)
    }
}
