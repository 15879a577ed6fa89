use crate::terrain::{Cell, TerrainView};
use crate::transform::Pathfinder;

/// Substitutes a land endpoint adjacent to water with that water tile
/// before delegating; fails an endpoint with no water neighbour at all
/// (spec §4.8 "Shore-coercing transformer"). Does not restore the
/// original land endpoint on return — the caller treats shore departure
/// as part of the routing contract.
pub struct ShoreCoercingTransformer<'a, T, Inner> {
    terrain: &'a T,
    inner: Inner,
}

impl<'a, T: TerrainView, Inner: Pathfinder> ShoreCoercingTransformer<'a, T, Inner> {
    pub fn new(terrain: &'a T, inner: Inner) -> Self {
        Self { terrain, inner }
    }

    fn coerce(&self, cell: Cell) -> Option<Cell> {
        let tile = self.terrain.tile_at(cell)?;
        if self.terrain.is_water(tile) {
            return Some(cell);
        }
        let mut neighbours = smallvec::SmallVec::<[crate::terrain::Tile; 4]>::new();
        self.terrain.neighbours(tile, &mut neighbours);
        neighbours
            .into_iter()
            .find(|&n| self.terrain.is_water(n))
            .map(|n| self.terrain.cell_of(n))
    }
}

impl<'a, T: TerrainView, Inner: Pathfinder> Pathfinder for ShoreCoercingTransformer<'a, T, Inner> {
    fn find_path(&mut self, from: &[Cell], to: Cell) -> Option<Vec<Cell>> {
        let coerced_from: Vec<Cell> = from.iter().filter_map(|&c| self.coerce(c)).collect();
        if coerced_from.is_empty() {
            return None;
        }
        let coerced_to = self.coerce(to)?;
        self.inner.find_path(&coerced_from, coerced_to)
    }
}
