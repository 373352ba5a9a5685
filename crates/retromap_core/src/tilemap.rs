//! Tilemap and cell types

use serde::{Deserialize, Serialize};

use crate::{Ent, MapRect, TilePoint};

/// One map grid entry: a tile index plus ink (foreground) and paper
/// (background) palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub tile: u16,
    pub ink: u8,
    pub paper: u8,
}

impl Cell {
    pub const fn new(tile: u16, ink: u8, paper: u8) -> Self {
        Self { tile, ink, paper }
    }
}

/// A rectangular grid of cells, plus the entities placed on it.
///
/// `cells` is row-major, so the cell at `(x, y)` lives at `y * w + x`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tilemap {
    pub w: i32,
    pub h: i32,
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub ents: Vec<Ent>,
}

impl Tilemap {
    /// Create a map filled with default cells.
    pub fn new(w: i32, h: i32) -> Self {
        let w = w.max(0);
        let h = h.max(0);
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w * h) as usize],
            ents: Vec::new(),
        }
    }

    /// Create a map filled with `cell`.
    pub fn filled(w: i32, h: i32, cell: Cell) -> Self {
        let mut map = Self::new(w, h);
        map.cells.fill(cell);
        map
    }

    /// Bounding rect of the whole map.
    pub fn bounds(&self) -> MapRect {
        MapRect::new(0, 0, self.w, self.h)
    }

    /// A 0x0 map (used for "no brush").
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn is_valid(&self, p: TilePoint) -> bool {
        p.x >= 0 && p.x < self.w && p.y >= 0 && p.y < self.h
    }

    fn index(&self, p: TilePoint) -> usize {
        assert!(
            self.is_valid(p),
            "cell ({}, {}) outside {}x{} map",
            p.x,
            p.y,
            self.w,
            self.h
        );
        (p.y * self.w + p.x) as usize
    }

    /// # Panics
    ///
    /// Panics if `p` is outside the map.
    pub fn cell(&self, p: TilePoint) -> &Cell {
        &self.cells[self.index(p)]
    }

    /// # Panics
    ///
    /// Panics if `p` is outside the map.
    pub fn cell_mut(&mut self, p: TilePoint) -> &mut Cell {
        let idx = self.index(p);
        &mut self.cells[idx]
    }

    /// Cells `[x, x + len)` of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the span leaves the map.
    pub fn span(&self, x: i32, y: i32, len: i32) -> &[Cell] {
        let start = self.index(TilePoint::new(x, y));
        &self.cells[start..start + len as usize]
    }

    /// Mutable version of [`span`](Self::span).
    pub fn span_mut(&mut self, x: i32, y: i32, len: i32) -> &mut [Cell] {
        let start = self.index(TilePoint::new(x, y));
        &mut self.cells[start..start + len as usize]
    }

    /// Whole row `y`.
    pub fn row(&self, y: i32) -> &[Cell] {
        self.span(0, y, self.w)
    }

    pub fn row_mut(&mut self, y: i32) -> &mut [Cell] {
        let w = self.w;
        self.span_mut(0, y, w)
    }

    /// Extract a sub-map sized exactly `rect.w x rect.h`.
    ///
    /// Source cells outside this map come back as `Cell::default()`, so any
    /// rect is allowed. Entities are not copied.
    pub fn copy(&self, rect: &MapRect) -> Tilemap {
        let mut out = Tilemap::new(rect.w, rect.h);
        if out.is_empty() {
            return out;
        }
        let src = self.bounds().clip(rect);
        for y in src.y..src.y_max() {
            let from = self.span(src.x, y, src.w);
            let to = out.span_mut(src.x - rect.x, y - rect.y, src.w);
            to.copy_from_slice(from);
        }
        out
    }
}
