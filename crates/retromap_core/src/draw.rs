//! Drawing primitives that work directly on a [`Tilemap`].
//!
//! Every function returns the rect it touched, which callers use both to
//! redraw and to scope undo backups. None of them keep any state.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{Cell, MapRect, TilePoint, Tilemap};

bitflags! {
    /// Which parts of a cell a drawing operation may overwrite.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DrawFlags: u8 {
        const TILE  = 0x01;
        const INK   = 0x02;
        const PAPER = 0x04;
        const ALL   = Self::TILE.bits() | Self::INK.bits() | Self::PAPER.bits();
    }
}

impl Default for DrawFlags {
    fn default() -> Self {
        DrawFlags::ALL
    }
}

/// `pen` on the channels selected by `flags`, `dest` on the rest.
pub fn combine(dest: &Cell, pen: &Cell, flags: DrawFlags) -> Cell {
    Cell {
        tile: if flags.contains(DrawFlags::TILE) { pen.tile } else { dest.tile },
        ink: if flags.contains(DrawFlags::INK) { pen.ink } else { dest.ink },
        paper: if flags.contains(DrawFlags::PAPER) { pen.paper } else { dest.paper },
    }
}

/// True if `a` and `b` agree on every channel selected by `flags`.
pub fn matches(a: &Cell, b: &Cell, flags: DrawFlags) -> bool {
    (!flags.contains(DrawFlags::TILE) || a.tile == b.tile)
        && (!flags.contains(DrawFlags::INK) || a.ink == b.ink)
        && (!flags.contains(DrawFlags::PAPER) || a.paper == b.paper)
}

/// Write a single cell.
///
/// # Panics
///
/// Panics if `pos` is outside the map.
pub fn plonk(map: &mut Tilemap, pos: TilePoint, pen: &Cell, flags: DrawFlags) -> MapRect {
    let cell = map.cell_mut(pos);
    *cell = combine(cell, pen, flags);
    MapRect::at(pos, 1, 1)
}

/// Fill `area` (clipped to the map) with `pen`.
pub fn draw_rect(map: &mut Tilemap, area: &MapRect, pen: &Cell, flags: DrawFlags) -> MapRect {
    let dest = map.bounds().clip(area);
    for y in dest.y..dest.y_max() {
        for cell in map.span_mut(dest.x, y, dest.w) {
            *cell = combine(cell, pen, flags);
        }
    }
    dest
}

/// Stamp `brush` onto the map with its top-left at `pos`.
///
/// Brush cells whose tile equals `transparent.tile` are skipped.
pub fn draw_brush(
    map: &mut Tilemap,
    pos: TilePoint,
    brush: &Tilemap,
    transparent: &Cell,
    flags: DrawFlags,
) -> MapRect {
    blit_brush(map, pos, brush, transparent, |dest, src| {
        *dest = combine(dest, src, flags)
    })
}

/// Erase the brush footprint: every non-transparent brush cell resets the
/// map cell under it to `transparent`.
pub fn erase_brush(
    map: &mut Tilemap,
    pos: TilePoint,
    brush: &Tilemap,
    transparent: &Cell,
    flags: DrawFlags,
) -> MapRect {
    blit_brush(map, pos, brush, transparent, |dest, _| {
        *dest = combine(dest, transparent, flags)
    })
}

fn blit_brush(
    map: &mut Tilemap,
    pos: TilePoint,
    brush: &Tilemap,
    transparent: &Cell,
    mut apply: impl FnMut(&mut Cell, &Cell),
) -> MapRect {
    let dest = map.bounds().clip(&MapRect::at(pos, brush.w, brush.h));
    // Clipped area in brush space.
    let src_x = dest.x - pos.x;
    let src_y = dest.y - pos.y;

    for row in 0..dest.h {
        let src = brush.span(src_x, src_y + row, dest.w);
        let dst = map.span_mut(dest.x, dest.y + row, dest.w);
        for (d, s) in dst.iter_mut().zip(src) {
            if s.tile != transparent.tile {
                apply(d, s);
            }
        }
    }
    dest
}

/// Four-way scanline flood fill from `start`.
///
/// A cell belongs to the fill region if it matches the seed cell on every
/// channel in `flags`. Returns the bounding box of everything filled, or an
/// empty rect if the seed already matches `pen` (nothing to do).
///
/// # Panics
///
/// Panics if `start` is outside the map.
pub fn flood_fill(map: &mut Tilemap, start: TilePoint, pen: &Cell, flags: DrawFlags) -> MapRect {
    let mut damage = MapRect::EMPTY;

    let old = *map.cell(start);
    if matches(&old, pen, flags) {
        // already done...
        return damage;
    }

    let mut stack = vec![start];
    while let Some(pt) = stack.pop() {
        // May have been filled by an earlier span.
        if !matches(map.cell(pt), &old, flags) {
            continue;
        }

        let y = pt.y;
        let mut l = pt.x;
        while l > 0 && matches(map.cell(TilePoint::new(l - 1, y)), &old, flags) {
            l -= 1;
        }
        let mut r = pt.x;
        while r < map.w - 1 && matches(map.cell(TilePoint::new(r + 1, y)), &old, flags) {
            r += 1;
        }

        for cell in map.span_mut(l, y, r - l + 1) {
            *cell = combine(cell, pen, flags);
        }
        damage.merge(&MapRect::new(l, y, r - l + 1, 1));

        for ny in [y - 1, y + 1] {
            if ny < 0 || ny >= map.h {
                continue;
            }
            for x in l..=r {
                let p = TilePoint::new(x, ny);
                if matches(map.cell(p), &old, flags) {
                    stack.push(p);
                }
            }
        }
    }
    damage
}
