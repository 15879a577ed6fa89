use crate::terrain::{Cell, Tile};

/// Index into [`GatewayGraph::gateways`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GatewayId(pub u32);

/// Which interior cluster edge a gateway lives on. Only right and bottom
/// edges produce gateways; the node is shared with the neighbouring
/// cluster across that edge (spec §4.6, §9 "Gateway-shared-across-clusters").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterSide {
    Right,
    Bottom,
}

/// One abstract node: a maximal contiguous water run on a cluster
/// boundary. `position` is the midpoint of the run (the chosen convention,
/// spec §9 open question "Gateway primary position"); `tile` is the
/// representative minimap tile used as a search endpoint.
#[derive(Clone, Debug)]
pub struct Gateway {
    pub id: GatewayId,
    pub cluster_a: (i32, i32),
    pub cluster_b: (i32, i32),
    pub side: ClusterSide,
    pub position: Cell,
    pub tile: Tile,
    pub length: u32,
}

/// Connection between two gateways of the same cluster, found by a bounded
/// probe at build time. `cached_path` holds the refined tile sequence
/// eagerly when `cache_refined_edges` is enabled — see the graph-build
/// design note on when this is populated.
#[derive(Clone, Debug)]
pub struct AbstractEdge {
    pub a: GatewayId,
    pub b: GatewayId,
    pub cost: u32,
    pub cluster: (i32, i32),
    pub cached_path: Option<Vec<Tile>>,
}

/// One cluster of the minimap partition: its coordinate and the gateways
/// that belong to it (a gateway belongs to both clusters it separates).
#[derive(Clone, Debug, Default)]
pub struct Cluster {
    pub coord: (i32, i32),
    pub gateways: Vec<GatewayId>,
}
