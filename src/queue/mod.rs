//! Priority queues shared by every A* variant (spec §4.2).
//!
//! Both queues are reusable across searches via `clear()`; neither
//! allocates in the hot path once warmed to a map's size.

mod bucket;
mod heap;

pub use bucket::BucketQueue;
pub use heap::BinaryMinHeap;
