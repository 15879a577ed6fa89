//! Heap-based A\* (spec §9 "Bucket vs. heap"): same algorithm as
//! [`GenericAStar`], but queued on a [`BinaryMinHeap`] instead of a bucket
//! queue. Used where edge costs are hard to bound tightly — chiefly the
//! abstract gateway graph, whose edge costs are refined path lengths
//! rather than small integer-weighted Manhattan distances.

use crate::astar::adapter::SearchAdapter;
use crate::astar::SearchFailure;
use crate::queue::BinaryMinHeap;

const NO_PARENT: u32 = u32::MAX;

pub struct HeapAStar {
    stamp: u32,
    open_stamp: Vec<u32>,
    closed_stamp: Vec<u32>,
    g: Vec<u32>,
    parent: Vec<u32>,
    queue: BinaryMinHeap,
    max_iterations: u32,
}

impl HeapAStar {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            stamp: 0,
            open_stamp: vec![0; num_nodes],
            closed_stamp: vec![0; num_nodes],
            g: vec![0; num_nodes],
            parent: vec![NO_PARENT; num_nodes],
            queue: BinaryMinHeap::new(true),
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

    pub fn search<A: SearchAdapter>(
        &mut self,
        adapter: &A,
        start: u32,
        goal: u32,
    ) -> Result<Vec<u32>, SearchFailure> {
        self.advance_stamp();
        self.queue.clear();

        let h0 = adapter.heuristic(start, goal);
        self.g[start as usize] = 0;
        self.parent[start as usize] = NO_PARENT;
        self.open_stamp[start as usize] = self.stamp;
        self.queue.push(start, h0, 0);

        let mut iterations: u32 = 0;
        let mut neighbour_buf = Vec::new();
        while let Some(current) = self.queue.pop() {
            if self.closed_stamp[current as usize] == self.stamp {
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

            neighbour_buf.clear();
            adapter.neighbours(current, &mut neighbour_buf);
            let prev = self.parent[current as usize];
            let prev = if prev == NO_PARENT { None } else { Some(prev) };

            for i in 0..neighbour_buf.len() {
                let neighbour = neighbour_buf[i];
                if self.closed_stamp[neighbour as usize] == self.stamp {
                    continue;
                }
                let tentative_g = self.g[current as usize] + adapter.cost(current, neighbour, prev);
                let has_g = self.open_stamp[neighbour as usize] == self.stamp;
                if !has_g || tentative_g < self.g[neighbour as usize] {
                    self.g[neighbour as usize] = tentative_g;
                    self.parent[neighbour as usize] = current;
                    self.open_stamp[neighbour as usize] = self.stamp;
                    let f = tentative_g + adapter.heuristic(neighbour, goal);
                    self.queue.push(neighbour, f, tentative_g);
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
