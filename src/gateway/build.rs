//! Gateway discovery and intra-cluster edge probing (spec §4.6).
//!
//! Grounded on the teacher's portal-scanning sweep (`graph.rs`
//! `build_graph_sync`'s vertical/horizontal maximal-run scan) and on the
//! entrance-discovery pass in the cluster-entrance reference example,
//! generalised from a walkability bitmask to the water predicate.

use crate::astar::{BoundedAStar, Rect};
use crate::gateway::graph::GatewayGraph;
use crate::gateway::types::{Cluster, ClusterSide, Gateway, GatewayId};
use crate::terrain::{Cell, TerrainView};
use rustc_hash::FxHashMap;

/// Builds the gateway graph over a minimap-resolution terrain view.
/// `cluster_size` is the cluster side length `C` in minimap tiles;
/// `cache_refined_edges` controls whether the bounded-A\* tile sequence
/// found while probing an edge is retained on the edge (spec §3's
/// "optional cached refined tile sequence", resolved here to populate
/// eagerly at build time so the graph stays immutable post-construction —
/// see the design note on `cache_refined_edges`).
#[cormorant_macros::profile]
pub fn build_gateway_graph<T: TerrainView>(
    terrain: &T,
    cluster_size: usize,
    cache_refined_edges: bool,
) -> GatewayGraph {
    let width = terrain.width();
    let height = terrain.height();
    let clusters_x = width.div_ceil(cluster_size).max(1);
    let clusters_y = height.div_ceil(cluster_size).max(1);

    let mut gateways: Vec<Gateway> = Vec::new();
    let mut clusters: FxHashMap<(i32, i32), Cluster> = FxHashMap::default();
    for cy in 0..clusters_y {
        for cx in 0..clusters_x {
            clusters.insert(
                (cx as i32, cy as i32),
                Cluster { coord: (cx as i32, cy as i32), gateways: Vec::new() },
            );
        }
    }

    // Right-edge (vertical boundary) gateways: interior boundaries only.
    for cy in 0..clusters_y {
        for cx in 0..clusters_x.saturating_sub(1) {
            let edge_x = (cx + 1) * cluster_size - 1;
            let cross_x = (cx + 1) * cluster_size;
            if cross_x >= width {
                continue;
            }
            let y_start = cy * cluster_size;
            let y_end = ((cy + 1) * cluster_size).min(height);
            scan_boundary_run(
                terrain,
                (y_start, y_end),
                |y| {
                    let a = terrain.tile_at(Cell::new(edge_x as i32, y as i32));
                    let b = terrain.tile_at(Cell::new(cross_x as i32, y as i32));
                    matches!((a, b), (Some(a), Some(b)) if terrain.is_water(a) && terrain.is_water(b))
                },
                |run_start, run_end| {
                    let mid = (run_start + run_end) / 2;
                    let position = Cell::new(edge_x as i32, mid as i32);
                    let tile = terrain.tile_at(position).expect("boundary position in bounds");
                    let id = GatewayId(gateways.len() as u32);
                    let cluster_a = (cx as i32, cy as i32);
                    let cluster_b = (cx as i32 + 1, cy as i32);
                    gateways.push(Gateway {
                        id,
                        cluster_a,
                        cluster_b,
                        side: ClusterSide::Right,
                        position,
                        tile,
                        length: (run_end - run_start) as u32,
                    });
                    clusters.get_mut(&cluster_a).unwrap().gateways.push(id);
                    clusters.get_mut(&cluster_b).unwrap().gateways.push(id);
                },
            );
        }
    }

    // Bottom-edge (horizontal boundary) gateways.
    for cx in 0..clusters_x {
        for cy in 0..clusters_y.saturating_sub(1) {
            let edge_y = (cy + 1) * cluster_size - 1;
            let cross_y = (cy + 1) * cluster_size;
            if cross_y >= height {
                continue;
            }
            let x_start = cx * cluster_size;
            let x_end = ((cx + 1) * cluster_size).min(width);
            scan_boundary_run(
                terrain,
                (x_start, x_end),
                |x| {
                    let a = terrain.tile_at(Cell::new(x as i32, edge_y as i32));
                    let b = terrain.tile_at(Cell::new(x as i32, cross_y as i32));
                    matches!((a, b), (Some(a), Some(b)) if terrain.is_water(a) && terrain.is_water(b))
                },
                |run_start, run_end| {
                    let mid = (run_start + run_end) / 2;
                    let position = Cell::new(mid as i32, edge_y as i32);
                    let tile = terrain.tile_at(position).expect("boundary position in bounds");
                    let id = GatewayId(gateways.len() as u32);
                    let cluster_a = (cx as i32, cy as i32);
                    let cluster_b = (cx as i32, cy as i32 + 1);
                    gateways.push(Gateway {
                        id,
                        cluster_a,
                        cluster_b,
                        side: ClusterSide::Bottom,
                        position,
                        tile,
                        length: (run_end - run_start) as u32,
                    });
                    clusters.get_mut(&cluster_a).unwrap().gateways.push(id);
                    clusters.get_mut(&cluster_b).unwrap().gateways.push(id);
                },
            );
        }
    }

    let max_window = (cluster_size + 2) * (cluster_size + 2);
    let mut bounded = BoundedAStar::new(max_window);
    // Keyed by gateway pair; the stored cluster is whichever probe window
    // actually produced the cheapest path, not re-derived from either
    // gateway's own `cluster_a` afterwards (spec §3: `cluster` names the
    // window that should be used to refine the edge).
    let mut probed: FxHashMap<(u32, u32), (u32, (i32, i32), Option<Vec<crate::terrain::Tile>>)> = FxHashMap::default();

    for cluster in clusters.values() {
        let rect = expanded_cluster_rect(cluster.coord, cluster_size, width, height);
        let members = &cluster.gateways;
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let a = members[i];
                let b = members[j];
                let ga = &gateways[a.0 as usize];
                let gb = &gateways[b.0 as usize];
                let result = bounded.search(terrain, rect, ga.position, gb.position, |t| terrain.is_water(t));
                if let Ok(path) = result {
                    let cost = path.len() as u32;
                    let key = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
                    let cached = if cache_refined_edges { Some(path) } else { None };
                    probed
                        .entry(key)
                        .and_modify(|(best_cost, best_cluster, best_path)| {
                            if cost < *best_cost {
                                *best_cost = cost;
                                *best_cluster = cluster.coord;
                                *best_path = cached.clone();
                            }
                        })
                        .or_insert((cost, cluster.coord, cached));
                }
            }
        }
    }

    let edges = probed
        .into_iter()
        .map(|((a, b), (cost, cluster, cached_path))| crate::gateway::types::AbstractEdge {
            a: GatewayId(a),
            b: GatewayId(b),
            cost,
            cluster,
            cached_path,
        })
        .collect();

    GatewayGraph::new(gateways, edges, clusters)
}

fn expanded_cluster_rect(coord: (i32, i32), cluster_size: usize, width: usize, height: usize) -> Rect {
    let (cx, cy) = coord;
    let unexpanded_max_x = ((cx as usize + 1) * cluster_size).min(width);
    let unexpanded_max_y = ((cy as usize + 1) * cluster_size).min(height);
    let min_x = (cx as usize * cluster_size).saturating_sub(1);
    let max_x = unexpanded_max_x.min(width - 1);
    let min_y = (cy as usize * cluster_size).saturating_sub(1);
    let max_y = unexpanded_max_y.min(height - 1);
    Rect { min_x, max_x, min_y, max_y }
}

/// Walks `range` calling `is_run` per position, collapsing maximal runs of
/// `true` into one `on_run(start, end_inclusive)` callback each.
fn scan_boundary_run(
    _terrain: &impl TerrainView,
    range: (usize, usize),
    is_run: impl Fn(usize) -> bool,
    mut on_run: impl FnMut(usize, usize),
) {
    let (start, end) = range;
    let mut run_start: Option<usize> = None;
    for pos in start..end {
        if is_run(pos) {
            if run_start.is_none() {
                run_start = Some(pos);
            }
        } else if let Some(s) = run_start.take() {
            on_run(s, pos - 1);
        }
    }
    if let Some(s) = run_start {
        on_run(s, end - 1);
    }
}
