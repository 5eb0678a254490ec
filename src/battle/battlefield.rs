//! Battlefield: a finished rectangular hex map
//!
//! Axial coordinates with `q` in `0..cols` and `r` in `0..rows`.
//! Tiles are fixed once the map is loaded.

use serde::{Deserialize, Serialize};

use crate::battle::hex::HexCoord;
use crate::battle::terrain::Terrain;

/// Highest elevation level a tile can carry
pub const MAX_ELEVATION: u8 = 9;

/// A single hex on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub district: String,
    pub elevation: u8,
}

impl Tile {
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            district: String::new(),
            elevation: 0,
        }
    }
}

/// The full battlefield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battlefield {
    cols: u32,
    rows: u32,
    /// Row-major: index = r * cols + q
    tiles: Vec<Tile>,
}

impl Battlefield {
    /// Create a battlefield filled with one terrain
    pub fn new(cols: u32, rows: u32, terrain: Terrain) -> Self {
        let mut tiles = Vec::with_capacity(cols as usize * rows as usize);
        for r in 0..rows as i32 {
            for q in 0..cols as i32 {
                tiles.push(Tile::new(HexCoord::new(q, r), terrain));
            }
        }
        Self { cols, rows, tiles }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Check if coordinate is within map bounds
    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.q >= 0 && coord.r >= 0 && coord.q < self.cols as i32 && coord.r < self.rows as i32
    }

    fn index(&self, coord: HexCoord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| (coord.r as usize) * self.cols as usize + coord.q as usize)
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.index(coord).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.index(coord).map(move |i| &mut self.tiles[i])
    }

    pub fn terrain_at(&self, coord: HexCoord) -> Option<Terrain> {
        self.tile(coord).map(|t| t.terrain)
    }

    /// Entry cost of a hex; `None` when off-map or impassable
    pub fn movement_cost_at(&self, coord: HexCoord) -> Option<u32> {
        self.terrain_at(coord).and_then(|t| t.movement_cost())
    }

    pub fn is_passable(&self, coord: HexCoord) -> bool {
        self.movement_cost_at(coord).is_some()
    }

    /// Terrain defense bonus; off-map hexes give none
    pub fn defense_bonus_at(&self, coord: HexCoord) -> i32 {
        self.terrain_at(coord).map_or(0, |t| t.defense_bonus())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.iter().map(|t| t.coord)
    }

    /// Set terrain at a coordinate
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) {
        if let Some(tile) = self.tile_mut(coord) {
            tile.terrain = terrain;
        }
    }

    pub fn set_district(&mut self, coord: HexCoord, district: &str) {
        if let Some(tile) = self.tile_mut(coord) {
            tile.district = district.to_string();
        }
    }

    /// Set elevation at a coordinate, clamped to `MAX_ELEVATION`
    pub fn set_elevation(&mut self, coord: HexCoord, elevation: u8) {
        if let Some(tile) = self.tile_mut(coord) {
            tile.elevation = elevation.min(MAX_ELEVATION);
        }
    }

    /// Paint every in-bounds hex with `q` in `q_range` and `r` in `r_range`
    pub fn paint_rect(
        &mut self,
        q_range: std::ops::RangeInclusive<i32>,
        r_range: std::ops::RangeInclusive<i32>,
        terrain: Terrain,
    ) {
        for q in q_range {
            for r in r_range.clone() {
                self.set_terrain(HexCoord::new(q, r), terrain);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_rectangle() {
        let field = Battlefield::new(6, 4, Terrain::Steppe);
        assert_eq!(field.tiles().count(), 24);
        assert!(field.in_bounds(HexCoord::new(5, 3)));
        assert!(!field.in_bounds(HexCoord::new(6, 0)));
        assert!(!field.in_bounds(HexCoord::new(0, -1)));
    }

    #[test]
    fn test_tile_lookup_matches_coord() {
        let field = Battlefield::new(5, 5, Terrain::Steppe);
        for coord in field.coords() {
            assert_eq!(field.tile(coord).map(|t| t.coord), Some(coord));
        }
    }

    #[test]
    fn test_off_map_impassable() {
        let field = Battlefield::new(3, 3, Terrain::Steppe);
        assert!(!field.is_passable(HexCoord::new(-1, 0)));
        assert_eq!(field.defense_bonus_at(HexCoord::new(10, 10)), 0);
    }

    #[test]
    fn test_paint_rect() {
        let mut field = Battlefield::new(8, 8, Terrain::Steppe);
        field.paint_rect(3..=4, 0..=7, Terrain::River);
        assert!(!field.is_passable(HexCoord::new(3, 5)));
        assert!(field.is_passable(HexCoord::new(5, 5)));
        assert_eq!(field.terrain_at(HexCoord::new(4, 7)), Some(Terrain::River));
    }

    #[test]
    fn test_elevation_clamped() {
        let mut field = Battlefield::new(2, 2, Terrain::Hill);
        field.set_elevation(HexCoord::new(1, 1), 200);
        let tile = field.tile(HexCoord::new(1, 1)).unwrap();
        assert_eq!(tile.elevation, MAX_ELEVATION);
    }
}
