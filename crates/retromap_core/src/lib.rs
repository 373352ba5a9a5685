//! Core data structures and algorithms for retromap
//!
//! This crate holds everything that doesn't need editor state:
//! - `Tilemap` / `Cell` - Grids of tile + ink + paper cells, with entities
//! - `Charset` / `Palette` - Tile images and colour table
//! - `Ent` - Free-form `name=value` entities
//! - `Proj` - A complete project (maps, charset, palette)
//! - `draw` - Plot, rect, brush and flood fill primitives
//! - `format` - The versioned binary file format
//! - `render` - Cell to RGBA pixels

mod charset;
pub mod draw;
mod entity;
pub mod format;
mod geometry;
mod project;
pub mod render;
mod tilemap;

pub use charset::{Charset, CharsetError, IndexedImage, Palette};
pub use draw::DrawFlags;
pub use entity::{Ent, EntAttr};
pub use format::{decode, encode, DecodeError, EncodeError};
pub use geometry::{MapRect, PixPoint, TilePoint};
pub use project::{Proj, DEFAULT_MAP_H, DEFAULT_MAP_W};
pub use tilemap::{Cell, Tilemap};
