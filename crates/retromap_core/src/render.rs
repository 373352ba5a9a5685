//! Cell to pixel mapping

use crate::{Cell, Charset, Palette};

/// RGBA pixels for one cell, `tw * th * 4` bytes, row-major.
///
/// Tile pixel 0 takes the cell's paper colour, anything else its ink.
/// A tile the charset doesn't have renders as solid paper.
pub fn cell_rgba(charset: &Charset, palette: &Palette, cell: &Cell) -> Vec<u8> {
    let ink = palette.colour(cell.ink as usize);
    let paper = palette.colour(cell.paper as usize);

    let mut out = Vec::with_capacity(charset.tile_len() * 4);
    match charset.tile_image(cell.tile as usize) {
        Some(image) => {
            for &p in image {
                out.extend_from_slice(if p == 0 { &paper } else { &ink });
            }
        }
        None => {
            for _ in 0..charset.tile_len() {
                out.extend_from_slice(&paper);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rgba() {
        let mut charset = Charset::new(2, 1, 1);
        charset.tile_image_mut(0).copy_from_slice(&[0, 3]);
        let palette = Palette::c64();
        let px = cell_rgba(&charset, &palette, &Cell::new(0, 1, 2));
        assert_eq!(px.len(), 8);
        assert_eq!(&px[..4], &palette.colour(2));
        assert_eq!(&px[4..], &palette.colour(1));
    }

    #[test]
    fn test_fallback_tiles() {
        let charset = Charset::fallback();
        let palette = Palette::c64();
        let solid = cell_rgba(&charset, &palette, &Cell::new(1, 7, 0));
        assert_eq!(solid.len(), 8 * 8 * 4);
        assert!(solid.chunks(4).all(|c| c == palette.colour(7)));
    }

    #[test]
    fn test_missing_tile_is_paper() {
        let charset = Charset::fallback();
        let palette = Palette::c64();
        let px = cell_rgba(&charset, &palette, &Cell::new(99, 1, 6));
        assert!(px.chunks(4).all(|c| c == palette.colour(6)));
    }
}
