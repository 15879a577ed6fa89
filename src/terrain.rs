//! Terrain view contract (spec §4.1).
//!
//! The pathfinder never owns map data. It consumes a read-only grid through
//! [`TerrainView`] and, for long-range queries, a half-resolution
//! [`Minimap`] built over any `TerrainView`. Both expose the same
//! coordinate-bijection and predicate API so search code is generic over
//! resolution.

use smallvec::SmallVec;

/// Opaque grid-local tile index. Equality is by integer identity
/// (`y * width + x`); a `Tile` from one grid is meaningless against another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(pub u32);

/// Resolution-agnostic (x, y) coordinate. Used at pathfinder trait
/// boundaries so a caller never needs to know which grid's `Tile` encoding
/// is in play underneath a transformer stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Read-only grid abstraction consumed by the whole pathfinding core.
///
/// Implementors provide the coordinate bijection and tile-classification
/// predicates; the core never needs anything else. Neighbour order is
/// stable (up, down, left, right) to satisfy the ordering guarantee in
/// spec §5.
pub trait TerrainView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Coordinate -> tile bijection. `None` outside the grid.
    fn tile_at(&self, cell: Cell) -> Option<Tile>;
    fn cell_of(&self, tile: Tile) -> Cell;

    fn is_water(&self, tile: Tile) -> bool;
    fn is_land(&self, tile: Tile) -> bool {
        !self.is_water(tile)
    }
    /// A tile adjacent to at least one tile of the opposite land/water class.
    fn is_shore(&self, tile: Tile) -> bool;

    /// Up to 4 orthogonal neighbours, bounded by map edges, in stable
    /// (up, down, left, right) order.
    fn neighbours(&self, tile: Tile, out: &mut SmallVec<[Tile; 4]>);

    fn manhattan_dist(&self, a: Tile, b: Tile) -> u32 {
        self.cell_of(a).manhattan(self.cell_of(b))
    }

    fn tile_index(&self, tile: Tile) -> usize {
        tile.0 as usize
    }
}

/// Concrete full-resolution terrain grid. Bit 7 of each byte marks land;
/// this is a hot-loop implementation detail the inlined water A* may
/// exploit, never a correctness dependency — the predicates above are the
/// source of truth (spec §4.1).
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
    shore: fixedbitset::FixedBitSet,
}

const LAND_BIT: u8 = 0x80;

impl TerrainGrid {
    /// `land` flags the tile at `(x, y)` as land when true.
    pub fn new(width: usize, height: usize, land: impl Fn(usize, usize) -> bool) -> Self {
        let mut bytes = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                if land(x, y) {
                    bytes[y * width + x] = LAND_BIT;
                }
            }
        }
        let mut grid = Self {
            width,
            height,
            bytes,
            shore: fixedbitset::FixedBitSet::with_capacity(width * height),
        };
        grid.recompute_shore();
        grid
    }

    fn recompute_shore(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let land_here = self.bytes[idx] & LAND_BIT != 0;
                let mut shore = false;
                for (dx, dy) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
                    let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                    if nx < 0 || ny < 0 || nx as usize >= self.width || ny as usize >= self.height {
                        continue;
                    }
                    let nidx = ny as usize * self.width + nx as usize;
                    let land_there = self.bytes[nidx] & LAND_BIT != 0;
                    if land_there != land_here {
                        shore = true;
                        break;
                    }
                }
                self.shore.set(idx, shore);
            }
        }
    }

    pub fn set_land(&mut self, x: usize, y: usize, land: bool) {
        let idx = y * self.width + x;
        if land {
            self.bytes[idx] |= LAND_BIT;
        } else {
            self.bytes[idx] &= !LAND_BIT;
        }
        self.recompute_shore();
    }
}

impl TerrainView for TerrainGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn tile_at(&self, cell: Cell) -> Option<Tile> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Tile((y * self.width + x) as u32))
    }

    fn cell_of(&self, tile: Tile) -> Cell {
        let idx = tile.0 as usize;
        Cell::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    fn is_water(&self, tile: Tile) -> bool {
        self.bytes[tile.0 as usize] & LAND_BIT == 0
    }

    fn is_shore(&self, tile: Tile) -> bool {
        self.shore.contains(tile.0 as usize)
    }

    fn neighbours(&self, tile: Tile, out: &mut SmallVec<[Tile; 4]>) {
        out.clear();
        let cell = self.cell_of(tile);
        for (dx, dy) in [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)] {
            if let Some(n) = self.tile_at(Cell::new(cell.x + dx, cell.y + dy)) {
                out.push(n);
            }
        }
    }
}

/// Half-linear-resolution view over any `TerrainView`. A minimap tile is
/// water iff any of its four full-resolution children is water (spec §4.1,
/// glossary "Minimap").
pub struct Minimap<'a, T: TerrainView> {
    base: &'a T,
    width: usize,
    height: usize,
}

impl<'a, T: TerrainView> Minimap<'a, T> {
    pub fn new(base: &'a T) -> Self {
        let width = base.width().div_ceil(2);
        let height = base.height().div_ceil(2);
        Self { base, width, height }
    }

    fn children(&self, cell: Cell) -> [Cell; 4] {
        let bx = cell.x * 2;
        let by = cell.y * 2;
        [
            Cell::new(bx, by),
            Cell::new(bx + 1, by),
            Cell::new(bx, by + 1),
            Cell::new(bx + 1, by + 1),
        ]
    }
}

impl<'a, T: TerrainView> TerrainView for Minimap<'a, T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn tile_at(&self, cell: Cell) -> Option<Tile> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as usize, cell.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Tile((y * self.width + x) as u32))
    }

    fn cell_of(&self, tile: Tile) -> Cell {
        let idx = tile.0 as usize;
        Cell::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    fn is_water(&self, tile: Tile) -> bool {
        let cell = self.cell_of(tile);
        self.children(cell).into_iter().any(|c| {
            self.base
                .tile_at(c)
                .map(|t| self.base.is_water(t))
                .unwrap_or(false)
        })
    }

    fn is_shore(&self, tile: Tile) -> bool {
        let cell = self.cell_of(tile);
        let here = self.is_water(tile);
        for (dx, dy) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
            if let Some(n) = self.tile_at(Cell::new(cell.x + dx, cell.y + dy)) {
                if self.is_water(n) != here {
                    return true;
                }
            }
        }
        false
    }

    fn neighbours(&self, tile: Tile, out: &mut SmallVec<[Tile; 4]>) {
        out.clear();
        let cell = self.cell_of(tile);
        for (dx, dy) in [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)] {
            if let Some(n) = self.tile_at(Cell::new(cell.x + dx, cell.y + dy)) {
                out.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(x: usize, y: usize) -> bool {
        (x + y) % 5 == 0
    }

    #[test]
    fn coordinate_bijection_round_trips() {
        let grid = TerrainGrid::new(10, 8, checker);
        for y in 0..8 {
            for x in 0..10 {
                let tile = grid.tile_at(Cell::new(x as i32, y as i32)).unwrap();
                assert_eq!(grid.cell_of(tile), Cell::new(x as i32, y as i32));
            }
        }
    }

    #[test]
    fn land_tiles_have_zero_component_eligible_shore_flag() {
        let grid = TerrainGrid::new(4, 1, |x, _| x == 2);
        let land_tile = grid.tile_at(Cell::new(2, 0)).unwrap();
        assert!(grid.is_land(land_tile));
        assert!(grid.is_shore(land_tile));
        let water_tile = grid.tile_at(Cell::new(0, 0)).unwrap();
        assert!(grid.is_water(water_tile));
        assert!(!grid.is_shore(water_tile));
    }

    #[test]
    fn minimap_tile_is_water_iff_any_child_is_water() {
        // 4x4 full-res, single land tile at (0,0). The minimap tile covering
        // (0,0)-(1,1) should still read water because 3 of its 4 children are.
        let grid = TerrainGrid::new(4, 4, |x, y| x == 0 && y == 0);
        let minimap = Minimap::new(&grid);
        let t = minimap.tile_at(Cell::new(0, 0)).unwrap();
        assert!(minimap.is_water(t));
    }

    #[test]
    fn minimap_neighbours_bounded_by_edges() {
        let grid = TerrainGrid::new(4, 4, |_, _| false);
        let minimap = Minimap::new(&grid);
        let mut out = SmallVec::new();
        let corner = minimap.tile_at(Cell::new(0, 0)).unwrap();
        minimap.neighbours(corner, &mut out);
        assert_eq!(out.len(), 2);
    }
}
