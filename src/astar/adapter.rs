//! Generic, adapter-driven A\* (spec §4.5.1).
//!
//! `GenericAStar` owns all per-node search state (stamp arrays, g-scores,
//! parents) and a bucket queue, sized once to the adapter's node count and
//! reused across queries via stamp advancement rather than O(n) clearing
//! (spec §3, §9 "Stamp-based reuse instead of zero-filling").

use crate::astar::{SearchFailure, DEFAULT_MAX_ITERATIONS};
use crate::queue::BucketQueue;

const NO_PARENT: u32 = u32::MAX;

/// Graph contract consumed by [`GenericAStar`]. Implementors provide node
/// count, neighbour enumeration, edge cost and heuristic; the algorithm is
/// identical for water, rail, station and abstract-gateway graphs.
pub trait SearchAdapter {
    fn num_nodes(&self) -> usize;
    fn max_neighbours(&self) -> usize;
    fn max_priority(&self) -> u32;

    /// Appends up to `max_neighbours` neighbours of `node` into `out`.
    fn neighbours(&self, node: u32, out: &mut Vec<u32>);

    /// Cost of the edge `from -> to`. `prev` is the node preceding `from`
    /// on the current best path, when known (used by direction-penalty
    /// adapters).
    fn cost(&self, from: u32, to: u32, prev: Option<u32>) -> u32;

    fn heuristic(&self, node: u32, goal: u32) -> u32;
}

/// Reusable search-state container. One instance per caller/thread; not
/// reentrant (spec §5).
pub struct GenericAStar {
    stamp: u32,
    open_stamp: Vec<u32>,
    closed_stamp: Vec<u32>,
    g: Vec<u32>,
    parent: Vec<u32>,
    queue: BucketQueue,
    neighbour_buf: Vec<u32>,
    max_iterations: u32,
}

impl GenericAStar {
    pub fn new(num_nodes: usize, max_priority: u32) -> Self {
        Self {
            stamp: 0,
            open_stamp: vec![0; num_nodes],
            closed_stamp: vec![0; num_nodes],
            g: vec![0; num_nodes],
            parent: vec![NO_PARENT; num_nodes],
            queue: BucketQueue::new(max_priority),
            neighbour_buf: Vec::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
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

    fn is_open(&self, node: u32) -> bool {
        self.open_stamp[node as usize] == self.stamp
    }

    fn is_closed(&self, node: u32) -> bool {
        self.closed_stamp[node as usize] == self.stamp
    }

    /// Runs a search from `starts` (multi-source) to `goal`, returning the
    /// node sequence from the closest source to `goal` inclusive.
    pub fn search<A: SearchAdapter>(
        &mut self,
        adapter: &A,
        starts: &[u32],
        goal: u32,
    ) -> Result<Vec<u32>, SearchFailure> {
        self.advance_stamp();
        self.queue.ensure_max_priority(adapter.max_priority());
        self.queue.clear();

        for &start in starts {
            let h = adapter.heuristic(start, goal);
            self.g[start as usize] = 0;
            self.parent[start as usize] = NO_PARENT;
            self.open_stamp[start as usize] = self.stamp;
            self.queue.push(start, h);
        }

        let mut iterations: u32 = 0;
        while let Some(current) = self.queue.pop() {
            if self.is_closed(current) {
                continue;
            }
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SearchFailure::IterationLimit);
            }
            self.closed_stamp[current as usize] = self.stamp;

            if current == goal {
                return Ok(self.reconstruct(current));
            }

            self.neighbour_buf.clear();
            adapter.neighbours(current, &mut self.neighbour_buf);
            let prev = self.parent[current as usize];
            let prev = if prev == NO_PARENT { None } else { Some(prev) };

            for i in 0..self.neighbour_buf.len() {
                let neighbour = self.neighbour_buf[i];
                if self.is_closed(neighbour) {
                    continue;
                }
                let tentative_g =
                    self.g[current as usize] + adapter.cost(current, neighbour, prev);
                let has_g = self.is_open(neighbour);
                if !has_g || tentative_g < self.g[neighbour as usize] {
                    self.g[neighbour as usize] = tentative_g;
                    self.parent[neighbour as usize] = current;
                    self.open_stamp[neighbour as usize] = self.stamp;
                    let f = tentative_g + adapter.heuristic(neighbour, goal);
                    self.queue.push(neighbour, f);
                }
            }
        }
        Err(SearchFailure::NoPath)
    }

    fn reconstruct(&self, mut current: u32) -> Vec<u32> {
        let mut path = vec![current];
        while self.parent[current as usize] != NO_PARENT {
            current = self.parent[current as usize];
            path.push(current);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Linear chain 0-1-2-...-(n-1), uniform cost 1.
    struct ChainAdapter {
        len: u32,
    }

    impl SearchAdapter for ChainAdapter {
        fn num_nodes(&self) -> usize {
            self.len as usize
        }
        fn max_neighbours(&self) -> usize {
            2
        }
        fn max_priority(&self) -> u32 {
            self.len * 2
        }
        fn neighbours(&self, node: u32, out: &mut Vec<u32>) {
            if node > 0 {
                out.push(node - 1);
            }
            if node + 1 < self.len {
                out.push(node + 1);
            }
        }
        fn cost(&self, _from: u32, _to: u32, _prev: Option<u32>) -> u32 {
            1
        }
        fn heuristic(&self, node: u32, goal: u32) -> u32 {
            node.abs_diff(goal)
        }
    }

    #[test]
    fn finds_shortest_path_on_a_chain() {
        let adapter = ChainAdapter { len: 10 };
        let mut astar = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        let path = astar.search(&adapter, &[0], 9).unwrap();
        assert_eq!(path, (0..=9).collect::<Vec<_>>());
    }

    #[test]
    fn multi_source_picks_nearest_start() {
        let adapter = ChainAdapter { len: 10 };
        let mut astar = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        let path = astar.search(&adapter, &[0, 7], 9).unwrap();
        assert_eq!(path.first(), Some(&7));
        assert_eq!(path.last(), Some(&9));
    }

    #[test]
    fn reuses_state_across_queries_via_stamp() {
        let adapter = ChainAdapter { len: 5 };
        let mut astar = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        let first = astar.search(&adapter, &[0], 4).unwrap();
        let second = astar.search(&adapter, &[4], 0).unwrap();
        assert_eq!(first, vec![0, 1, 2, 3, 4]);
        assert_eq!(second, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn unreachable_goal_returns_no_path() {
        struct IslandAdapter;
        impl SearchAdapter for IslandAdapter {
            fn num_nodes(&self) -> usize {
                3
            }
            fn max_neighbours(&self) -> usize {
                0
            }
            fn max_priority(&self) -> u32 {
                10
            }
            fn neighbours(&self, _node: u32, _out: &mut Vec<u32>) {}
            fn cost(&self, _from: u32, _to: u32, _prev: Option<u32>) -> u32 {
                1
            }
            fn heuristic(&self, node: u32, goal: u32) -> u32 {
                node.abs_diff(goal)
            }
        }
        let adapter = IslandAdapter;
        let mut astar = GenericAStar::new(adapter.num_nodes(), adapter.max_priority());
        let result = astar.search(&adapter, &[0], 2);
        assert_eq!(result, Err(SearchFailure::NoPath));
    }

    #[test]
    fn iteration_limit_is_reported_distinctly() {
        let adapter = ChainAdapter { len: 100 };
        let mut astar =
            GenericAStar::new(adapter.num_nodes(), adapter.max_priority()).with_max_iterations(2);
        let result = astar.search(&adapter, &[0], 99);
        assert_eq!(result, Err(SearchFailure::IterationLimit));
    }
}
