//! Charset (tile images) and palette

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building a charset from an image
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("image {w}x{h} has {len} pixels")]
    BadImage { w: usize, h: usize, len: usize },
    #[error("image {w}x{h} holds no {tw}x{th} tiles")]
    NoTiles {
        w: usize,
        h: usize,
        tw: usize,
        th: usize,
    },
    #[error("too many tiles: {0}")]
    TooManyTiles(usize),
}

/// An already-decoded 8-bit indexed image, one byte per pixel, row-major.
///
/// Decoding (PNG or otherwise) happens outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u8>,
}

impl IndexedImage {
    pub fn new(w: usize, h: usize, pixels: Vec<u8>) -> Self {
        Self { w, h, pixels }
    }
}

/// The set of tile images available for drawing.
///
/// Each tile is a `tw x th` block of palette-free pixels, one byte each:
/// 0 shows the cell's paper colour, anything else its ink colour.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Charset {
    pub tw: usize,
    pub th: usize,
    pub ntiles: usize,
    pub images: Vec<u8>,
}

impl Charset {
    /// A charset of `ntiles` blank tiles.
    pub fn new(tw: usize, th: usize, ntiles: usize) -> Self {
        Self {
            tw,
            th,
            ntiles,
            images: vec![0; tw * th * ntiles],
        }
    }

    /// Two 8x8 tiles: blank (0) and solid (1). Used when no charset art is available.
    pub fn fallback() -> Self {
        let mut charset = Self::new(8, 8, 2);
        charset.tile_image_mut(1).fill(1);
        charset
    }

    /// Bytes per tile image.
    pub fn tile_len(&self) -> usize {
        self.tw * self.th
    }

    /// Pixels for `tile`, or `None` if the charset doesn't have it.
    pub fn tile_image(&self, tile: usize) -> Option<&[u8]> {
        if tile >= self.ntiles {
            return None;
        }
        let len = self.tile_len();
        self.images.get(tile * len..(tile + 1) * len)
    }

    /// # Panics
    ///
    /// Panics if `tile` is out of range.
    pub fn tile_image_mut(&mut self, tile: usize) -> &mut [u8] {
        assert!(tile < self.ntiles, "tile {} out of range ({} tiles)", tile, self.ntiles);
        let len = self.tile_len();
        &mut self.images[tile * len..(tile + 1) * len]
    }

    /// Slice an indexed image into `tw x th` tiles.
    ///
    /// Tiles are numbered left to right, top to bottom. Partial tiles at the
    /// right and bottom edges are ignored.
    pub fn from_indexed_image(
        image: &IndexedImage,
        tw: usize,
        th: usize,
    ) -> Result<Self, CharsetError> {
        if image.pixels.len() != image.w * image.h {
            return Err(CharsetError::BadImage {
                w: image.w,
                h: image.h,
                len: image.pixels.len(),
            });
        }
        let no_tiles = CharsetError::NoTiles {
            w: image.w,
            h: image.h,
            tw,
            th,
        };
        if tw == 0 || th == 0 {
            return Err(no_tiles);
        }
        let gridw = image.w / tw;
        let gridh = image.h / th;
        if gridw < 1 || gridh < 1 {
            return Err(no_tiles);
        }
        let ntiles = gridw * gridh;
        if ntiles > u16::MAX as usize {
            return Err(CharsetError::TooManyTiles(ntiles));
        }

        let mut charset = Charset::new(tw, th, ntiles);
        let mut tile = 0;
        for ty in 0..gridh {
            for tx in 0..gridw {
                let dest = charset.tile_image_mut(tile);
                for y in 0..th {
                    let src = (ty * th + y) * image.w + tx * tw;
                    dest[y * tw..(y + 1) * tw].copy_from_slice(&image.pixels[src..src + tw]);
                }
                tile += 1;
            }
        }
        Ok(charset)
    }
}

// https://en.wikipedia.org/wiki/List_of_8-bit_computer_hardware_graphics#C-64
const C64_PALETTE: [[u8; 3]; 16] = [
    [0, 0, 0],       // Black
    [255, 255, 255], // White
    [136, 57, 50],   // Red
    [103, 182, 189], // Cyan
    [139, 63, 150],  // Purple
    [85, 160, 73],   // Green
    [64, 49, 141],   // Blue
    [191, 206, 114], // Yellow
    [139, 84, 41],   // Orange
    [87, 66, 0],     // Brown
    [184, 105, 98],  // Light Red
    [80, 80, 80],    // Dark Grey
    [120, 120, 120], // Grey
    [148, 224, 137], // Light Green
    [120, 105, 196], // Light Blue
    [159, 159, 159], // Light Grey
];

/// Colour table indexed by a cell's ink and paper values. RGBA, 4 bytes per colour.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Palette {
    pub ncolours: usize,
    pub colours: Vec<u8>,
}

impl Palette {
    pub fn new(ncolours: usize) -> Self {
        Self {
            ncolours,
            colours: vec![0; ncolours * 4],
        }
    }

    /// The 16 C64 colours, fully opaque.
    pub fn c64() -> Self {
        let mut palette = Self::new(C64_PALETTE.len());
        for (i, rgb) in C64_PALETTE.iter().enumerate() {
            palette.set_colour(i, [rgb[0], rgb[1], rgb[2], 255]);
        }
        palette
    }

    /// RGBA for a colour index. Indices past the end come back transparent black.
    pub fn colour(&self, idx: usize) -> [u8; 4] {
        match self.colours.get(idx * 4..idx * 4 + 4) {
            Some(c) if idx < self.ncolours => [c[0], c[1], c[2], c[3]],
            _ => [0, 0, 0, 0],
        }
    }

    /// # Panics
    ///
    /// Panics if `idx` is out of range.
    pub fn set_colour(&mut self, idx: usize, rgba: [u8; 4]) {
        assert!(idx < self.ncolours, "colour {} out of range", idx);
        self.colours[idx * 4..idx * 4 + 4].copy_from_slice(&rgba);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_charset() {
        let charset = Charset::fallback();
        assert_eq!(charset.ntiles, 2);
        assert_eq!(charset.images.len(), 128);
        assert!(charset.tile_image(0).unwrap().iter().all(|&p| p == 0));
        assert!(charset.tile_image(1).unwrap().iter().all(|&p| p == 1));
        assert!(charset.tile_image(2).is_none());
    }

    #[test]
    fn test_from_indexed_image() {
        // 5x2 image of 2x2 tiles -> 2 tiles, last column ignored
        #[rustfmt::skip]
        let pixels = vec![
            1, 2, 5, 6, 9,
            3, 4, 7, 8, 9,
        ];
        let image = IndexedImage::new(5, 2, pixels);
        let charset = Charset::from_indexed_image(&image, 2, 2).unwrap();
        assert_eq!(charset.ntiles, 2);
        assert_eq!(charset.tile_image(0).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(charset.tile_image(1).unwrap(), &[5, 6, 7, 8]);
    }

    #[test]
    fn test_from_indexed_image_too_small() {
        let image = IndexedImage::new(7, 8, vec![0; 56]);
        let err = Charset::from_indexed_image(&image, 8, 8).unwrap_err();
        assert!(matches!(err, CharsetError::NoTiles { .. }));
    }

    #[test]
    fn test_from_indexed_image_bad_len() {
        let image = IndexedImage::new(8, 8, vec![0; 10]);
        let err = Charset::from_indexed_image(&image, 8, 8).unwrap_err();
        assert!(matches!(err, CharsetError::BadImage { .. }));
    }

    #[test]
    fn test_from_indexed_image_tile_limit() {
        // The file format counts tiles in a u16.
        let image = IndexedImage::new(u16::MAX as usize, 1, vec![0; u16::MAX as usize]);
        let charset = Charset::from_indexed_image(&image, 1, 1).unwrap();
        assert_eq!(charset.ntiles, u16::MAX as usize);
        let proj = crate::Proj {
            charset,
            ..crate::Proj::default_project()
        };
        assert!(crate::encode(&proj).is_ok());

        let image = IndexedImage::new(u16::MAX as usize + 1, 1, vec![0; u16::MAX as usize + 1]);
        let err = Charset::from_indexed_image(&image, 1, 1).unwrap_err();
        assert!(matches!(err, CharsetError::TooManyTiles(65536)));
    }

    #[test]
    fn test_c64_palette() {
        let palette = Palette::c64();
        assert_eq!(palette.ncolours, 16);
        assert_eq!(palette.colour(0), [0, 0, 0, 255]);
        assert_eq!(palette.colour(1), [255, 255, 255, 255]);
        assert_eq!(palette.colour(15), [159, 159, 159, 255]);
        assert_eq!(palette.colour(16), [0, 0, 0, 0]);
    }
}
