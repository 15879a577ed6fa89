//! Structural-violation error type (spec §7).
//!
//! Soft outcomes (no path, iteration limit) are never represented here —
//! they return `None` from the pathfinder APIs. This type carries only the
//! programmer-error cases spec §7 calls out as faulting loudly in debug.

use crate::terrain::{Cell, Tile, TerrainView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathfindError {
    /// A bounded search was asked to cover more tiles than its
    /// preallocated capacity.
    RegionTooLarge,
    /// A supplied tile index or cell lies outside the terrain grid.
    InvalidEndpoint,
}

impl std::fmt::Display for PathfindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathfindError::RegionTooLarge => write!(f, "bounded search region exceeds preallocated capacity"),
            PathfindError::InvalidEndpoint => write!(f, "endpoint lies outside the terrain grid"),
        }
    }
}

impl std::error::Error for PathfindError {}

/// Resolves `cell` to a tile, asserting loudly in debug when the caller
/// handed in a cell outside the grid (spec §7 "bad tile index").
pub fn require_tile<T: TerrainView>(terrain: &T, cell: Cell) -> Result<Tile, PathfindError> {
    match terrain.tile_at(cell) {
        Some(tile) => Ok(tile),
        None => {
            tracing::warn!(?cell, "endpoint lies outside the terrain grid");
            Err(PathfindError::InvalidEndpoint)
        }
    }
}
