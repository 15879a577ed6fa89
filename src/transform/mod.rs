//! Transformer pipeline (spec §4.8): composable wrappers around a core
//! pathfinder. Each implements the same [`Pathfinder`] contract by
//! delegating to an inner pathfinder and transforming inputs or outputs,
//! so every stage is independent and unit-testable (spec §9
//! "Coerce-at-boundary, not in-core").

mod component_check;
mod minimap;
mod shore;
mod smoothing;

pub use component_check::ComponentCheckTransformer;
pub use minimap::MinimapTransformer;
pub use shore::ShoreCoercingTransformer;
pub use smoothing::BresenhamSmoothingTransformer;

use crate::terrain::Cell;

/// Shared contract for the hierarchical core and every wrapper around it.
/// `from` may carry multiple sources (spec §4.5 "search(start |
/// set-of-starts, goal)"); instances are mutable because the search state
/// they close over is reused, not reentrant, across calls (spec §5).
pub trait Pathfinder {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>>;
}
