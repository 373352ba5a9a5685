//! Points and rectangles in map space

use serde::{Deserialize, Serialize};

/// A position on a map, in tile coords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A position on a map, in map pixels.
///
/// Kept apart from [`TilePoint`] on purpose: the only way between the two is
/// through [`Proj::to_tile_point`](crate::Proj::to_tile_point) and
/// [`Proj::to_pix_point`](crate::Proj::to_pix_point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixPoint {
    pub x: i32,
    pub y: i32,
}

impl PixPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in tile coords.
///
/// A rect with no area is "empty" and acts as the identity for [`MapRect::merge`].
/// The canonical empty rect is [`MapRect::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MapRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl MapRect {
    pub const EMPTY: MapRect = MapRect {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect with its top-left corner at `pos`.
    pub const fn at(pos: TilePoint, w: i32, h: i32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    /// Smallest rect covering both corners (inclusive), in any order.
    ///
    /// This is what a drag from `a` to `b` selects.
    pub fn from_corners(a: TilePoint, b: TilePoint) -> Self {
        let xmin = a.x.min(b.x);
        let ymin = a.y.min(b.y);
        let xmax = a.x.max(b.x);
        let ymax = a.y.max(b.y);
        Self::new(xmin, ymin, 1 + xmax - xmin, 1 + ymax - ymin)
    }

    pub fn pos(&self) -> TilePoint {
        TilePoint::new(self.x, self.y)
    }

    /// Exclusive right edge.
    pub fn x_max(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn y_max(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.w as usize * self.h as usize
        }
    }

    pub fn contains(&self, p: TilePoint) -> bool {
        p.x >= self.x && p.x < self.x_max() && p.y >= self.y && p.y < self.y_max()
    }

    /// Grow this rect to cover `other`. Merging an empty rect changes nothing,
    /// and merging into an empty rect yields `other`.
    pub fn merge(&mut self, other: &MapRect) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        let xmin = self.x.min(other.x);
        let ymin = self.y.min(other.y);
        let xmax = self.x_max().max(other.x_max());
        let ymax = self.y_max().max(other.y_max());
        *self = MapRect::new(xmin, ymin, xmax - xmin, ymax - ymin);
    }

    /// Grow this rect to cover a single cell.
    pub fn merge_point(&mut self, p: TilePoint) {
        self.merge(&MapRect::at(p, 1, 1));
    }

    /// Non-mutating [`merge`](Self::merge).
    pub fn union(mut self, other: &MapRect) -> MapRect {
        self.merge(other);
        self
    }

    /// Intersection of the two rects, or [`MapRect::EMPTY`] if they don't overlap.
    ///
    /// Clipping against `map.bounds()` restricts a rect to `[0,w) x [0,h)`.
    pub fn clip(&self, other: &MapRect) -> MapRect {
        if self.is_empty() || other.is_empty() {
            return MapRect::EMPTY;
        }
        let xmin = self.x.max(other.x);
        let ymin = self.y.max(other.y);
        let xmax = self.x_max().min(other.x_max());
        let ymax = self.y_max().min(other.y_max());
        if xmax <= xmin || ymax <= ymin {
            return MapRect::EMPTY;
        }
        MapRect::new(xmin, ymin, xmax - xmin, ymax - ymin)
    }
}
