//! Gateway/cluster graph (spec §4.6): the minimap is tiled into square
//! clusters, contiguous traversable stretches on cluster boundaries become
//! abstract nodes, and intra-cluster connectivity is probed once at build
//! time and cached as edges.

mod build;
mod graph;
mod types;

pub use build::build_gateway_graph;
pub use graph::GatewayGraph;
pub use types::{AbstractEdge, Cluster, ClusterSide, Gateway, GatewayId};
