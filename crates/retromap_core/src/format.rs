//! Binary project format
//!
//! All integers are little-endian. A file starts with a two byte magic
//! cookie, `r` plus a version digit. Version `r1` has no entities and no
//! template count; `r2` adds both. [`encode`] always writes the latest
//! version, [`decode`] accepts either.

use thiserror::Error;
use tracing::warn;

use crate::{Cell, Charset, Ent, EntAttr, Palette, Proj, Tilemap};

const MAGIC: u8 = b'r';
/// Version written by [`encode`].
pub const CURRENT_VERSION: u8 = b'2';

/// Errors that can occur when decoding a project
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of data at offset {0}")]
    Truncated(usize),
    #[error("not a project file")]
    BadMagic,
    #[error("unsupported format version byte {0:#04x}")]
    UnsupportedVersion(u8),
    #[error("invalid UTF-8 in entity attribute at offset {0}")]
    BadString(usize),
}

/// Errors that can occur when encoding a project
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("too many maps: {0}")]
    TooManyMaps(usize),
    #[error("map {map} is {w}x{h}, larger than the format allows")]
    MapTooBig { map: usize, w: i32, h: i32 },
    #[error("map {map} has {count} entities (max 255)")]
    TooManyEnts { map: usize, count: usize },
    #[error("entity {ent} on map {map} has {count} attributes (max 255)")]
    TooManyAttrs { map: usize, ent: usize, count: usize },
    #[error("entity attribute string is {0} bytes (max 255)")]
    StringTooLong(usize),
    #[error("charset tile size {tw}x{th} is too big")]
    TileTooBig { tw: usize, th: usize },
    #[error("too many tiles: {0}")]
    TooManyTiles(usize),
    #[error("too many colours: {0}")]
    TooManyColours(usize),
}

/// Serialize a project in the current format version.
pub fn encode(proj: &Proj) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    out.push(MAGIC);
    out.push(CURRENT_VERSION);

    // Reserved entity template count.
    push_u16(&mut out, 0);

    let nmaps = u16::try_from(proj.maps.len()).map_err(|_| EncodeError::TooManyMaps(proj.maps.len()))?;
    push_u16(&mut out, nmaps);
    for (i, map) in proj.maps.iter().enumerate() {
        encode_map(&mut out, i, map)?;
    }

    let charset = &proj.charset;
    let (tw, th) = match (u8::try_from(charset.tw), u8::try_from(charset.th)) {
        (Ok(tw), Ok(th)) => (tw, th),
        _ => {
            return Err(EncodeError::TileTooBig {
                tw: charset.tw,
                th: charset.th,
            })
        }
    };
    let ntiles = u16::try_from(charset.ntiles).map_err(|_| EncodeError::TooManyTiles(charset.ntiles))?;
    out.push(tw);
    out.push(th);
    push_u16(&mut out, ntiles);
    out.extend_from_slice(&charset.images);

    let palette = &proj.palette;
    let ncolours =
        u16::try_from(palette.ncolours).map_err(|_| EncodeError::TooManyColours(palette.ncolours))?;
    push_u16(&mut out, ncolours);
    out.extend_from_slice(&palette.colours);

    Ok(out)
}

fn encode_map(out: &mut Vec<u8>, idx: usize, map: &Tilemap) -> Result<(), EncodeError> {
    let too_big = || EncodeError::MapTooBig {
        map: idx,
        w: map.w,
        h: map.h,
    };
    let w = u16::try_from(map.w).map_err(|_| too_big())?;
    let h = u16::try_from(map.h).map_err(|_| too_big())?;
    push_u16(out, w);
    push_u16(out, h);
    for cell in &map.cells {
        push_u16(out, cell.tile);
        out.push(cell.ink);
        out.push(cell.paper);
    }

    let nents = u8::try_from(map.ents.len()).map_err(|_| EncodeError::TooManyEnts {
        map: idx,
        count: map.ents.len(),
    })?;
    out.push(nents);
    for (e, ent) in map.ents.iter().enumerate() {
        let nattrs = u8::try_from(ent.attrs.len()).map_err(|_| EncodeError::TooManyAttrs {
            map: idx,
            ent: e,
            count: ent.attrs.len(),
        })?;
        out.push(nattrs);
        for attr in &ent.attrs {
            push_str(out, &attr.name)?;
            push_str(out, &attr.value)?;
        }
    }
    Ok(())
}

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_str(out: &mut Vec<u8>, s: &str) -> Result<(), EncodeError> {
    let len = u8::try_from(s.len()).map_err(|_| EncodeError::StringTooLong(s.len()))?;
    out.push(len);
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Bounds-checked cursor over the input.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated(self.pos));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn string(&mut self) -> Result<String, DecodeError> {
        let len = self.u8()? as usize;
        let start = self.pos;
        let raw = self.bytes(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::BadString(start))
    }
}

/// Parse a project from bytes, accepting any supported format version.
///
/// Extra bytes after the palette are ignored with a warning.
pub fn decode(buf: &[u8]) -> Result<Proj, DecodeError> {
    let mut r = Reader::new(buf);

    if r.remaining() < 2 {
        return Err(DecodeError::Truncated(0));
    }
    if r.u8()? != MAGIC {
        return Err(DecodeError::BadMagic);
    }
    let version = r.u8()?;
    let has_ents = match version {
        b'1' => false,
        b'2' => true,
        v => return Err(DecodeError::UnsupportedVersion(v)),
    };

    if has_ents {
        // Template count, reserved.
        let _ = r.u16()?;
    }

    let nmaps = r.u16()? as usize;
    let mut maps = Vec::with_capacity(nmaps);
    for _ in 0..nmaps {
        maps.push(decode_map(&mut r, has_ents)?);
    }

    let tw = r.u8()? as usize;
    let th = r.u8()? as usize;
    let ntiles = r.u16()? as usize;
    let images = r.bytes(tw * th * ntiles)?.to_vec();
    let charset = Charset {
        tw,
        th,
        ntiles,
        images,
    };

    let ncolours = r.u16()? as usize;
    let colours = r.bytes(ncolours * 4)?.to_vec();
    let palette = Palette { ncolours, colours };

    if r.remaining() > 0 {
        warn!("{} bytes of trailing data after project", r.remaining());
    }

    Ok(Proj {
        maps,
        charset,
        palette,
    })
}

fn decode_map(r: &mut Reader<'_>, has_ents: bool) -> Result<Tilemap, DecodeError> {
    let w = r.u16()? as i32;
    let h = r.u16()? as i32;
    let raw = r.bytes(w as usize * h as usize * 4)?;
    let cells = raw
        .chunks_exact(4)
        .map(|c| Cell::new(u16::from_le_bytes([c[0], c[1]]), c[2], c[3]))
        .collect();

    let mut ents = Vec::new();
    if has_ents {
        let nents = r.u8()?;
        for _ in 0..nents {
            let nattrs = r.u8()?;
            let mut attrs = Vec::with_capacity(nattrs as usize);
            for _ in 0..nattrs {
                let name = r.string()?;
                let value = r.string()?;
                attrs.push(EntAttr { name, value });
            }
            ents.push(Ent { attrs });
        }
    }

    Ok(Tilemap { w, h, cells, ents })
}
