//! The A\* family (spec §4.5): a generic adapter-driven core, an inlined
//! grid specialisation, a bounded variant confined to a rectangle, and the
//! rail/station adapters that plug into the generic core.

mod adapter;
mod bounded;
mod heap_search;
mod rail;
mod water;

pub use adapter::{GenericAStar, SearchAdapter};
pub use bounded::{BoundedAStar, BoundedError, Rect};
pub use heap_search::HeapAStar;
pub use rail::{RailAdapter, StationAdapter, StationGraph, WaterAdapter};
pub use water::{WaterAStar, HEURISTIC_WEIGHT};

/// Shared failure mode across every A\* variant (spec §7): exhausting the
/// search is always a domain outcome, never a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    NoPath,
    IterationLimit,
}

pub const DEFAULT_MAX_ITERATIONS: u32 = 500_000;
