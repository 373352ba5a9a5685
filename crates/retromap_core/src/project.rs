//! The whole document: maps, charset and palette

use serde::{Deserialize, Serialize};

use crate::{Charset, Palette, PixPoint, TilePoint, Tilemap};

/// Width of the map in a fresh project (one C64 screen).
pub const DEFAULT_MAP_W: i32 = 40;
/// Height of the map in a fresh project.
pub const DEFAULT_MAP_H: i32 = 25;

/// A complete project.
///
/// Maps are addressed by position, so indices shift when maps are inserted
/// or removed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Proj {
    pub maps: Vec<Tilemap>,
    pub charset: Charset,
    pub palette: Palette,
}

impl Proj {
    /// The start-of-session project: one blank 40x25 map, the fallback
    /// two-tile charset and the C64 palette.
    pub fn default_project() -> Self {
        Self::with_map_size(DEFAULT_MAP_W, DEFAULT_MAP_H)
    }

    /// Like [`default_project`](Self::default_project) with a custom first map size.
    pub fn with_map_size(w: i32, h: i32) -> Self {
        Self {
            maps: vec![Tilemap::new(w, h)],
            charset: Charset::fallback(),
            palette: Palette::c64(),
        }
    }

    /// Pixel position to the tile containing it.
    ///
    /// Rounds towards negative infinity, so a point just left of or above the
    /// map lands on tile -1 rather than tile 0.
    pub fn to_tile_point(&self, pp: PixPoint) -> TilePoint {
        let tw = self.charset.tw.max(1) as i32;
        let th = self.charset.th.max(1) as i32;
        TilePoint::new(pp.x.div_euclid(tw), pp.y.div_euclid(th))
    }

    /// Top-left pixel of a tile.
    pub fn to_pix_point(&self, tp: TilePoint) -> PixPoint {
        PixPoint::new(tp.x * self.charset.tw as i32, tp.y * self.charset.th as i32)
    }

    pub fn map(&self, map_num: usize) -> Option<&Tilemap> {
        self.maps.get(map_num)
    }

    pub fn map_mut(&mut self, map_num: usize) -> Option<&mut Tilemap> {
        self.maps.get_mut(map_num)
    }
}
