//! Test helpers for `retromap_editor`.
//!
//! Model factories and a recording listener for use in `#[cfg(test)]`
//! modules within this crate:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use crate::testing::*;
//!     // ...
//! }
//! ```
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use retromap_core::{Cell, Ent, MapRect, PixPoint, Proj, TilePoint, Tilemap};

use crate::listener::{ModelListener, SharedListener};
use crate::tools::ToolKind;
use crate::Model;

/// One recorded listener callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MapModified(usize, MapRect),
    MapsInserted(usize, usize),
    MapsRemoved(usize, usize),
    EntsInserted(usize, usize, usize),
    EntsRemoved(usize, usize, usize),
    EntChanged(usize, usize, Ent, Ent),
    Nuke,
    CharsetModified,
    PenChanged,
    ToolChanged(ToolKind),
    BrushChanged(bool),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Listener that appends every callback to a shared log.
pub struct Recorder {
    log: EventLog,
}

impl ModelListener for Recorder {
    fn map_modified(&mut self, _proj: &Proj, map_num: usize, dirty: &MapRect) {
        self.log.borrow_mut().push(Event::MapModified(map_num, *dirty));
    }

    fn maps_inserted(&mut self, _proj: &Proj, first: usize, count: usize) {
        self.log.borrow_mut().push(Event::MapsInserted(first, count));
    }

    fn maps_removed(&mut self, _proj: &Proj, first: usize, count: usize) {
        self.log.borrow_mut().push(Event::MapsRemoved(first, count));
    }

    fn ents_inserted(&mut self, _proj: &Proj, map_num: usize, first: usize, count: usize) {
        self.log
            .borrow_mut()
            .push(Event::EntsInserted(map_num, first, count));
    }

    fn ents_removed(&mut self, _proj: &Proj, map_num: usize, first: usize, count: usize) {
        self.log
            .borrow_mut()
            .push(Event::EntsRemoved(map_num, first, count));
    }

    fn ent_changed(
        &mut self,
        _proj: &Proj,
        map_num: usize,
        ent_num: usize,
        old: &Ent,
        new: &Ent,
    ) {
        self.log.borrow_mut().push(Event::EntChanged(
            map_num,
            ent_num,
            old.clone(),
            new.clone(),
        ));
    }

    fn nuke(&mut self, _proj: &Proj) {
        self.log.borrow_mut().push(Event::Nuke);
    }

    fn charset_modified(&mut self, _proj: &Proj) {
        self.log.borrow_mut().push(Event::CharsetModified);
    }

    fn pen_changed(&mut self, _left: &Cell, _right: &Cell) {
        self.log.borrow_mut().push(Event::PenChanged);
    }

    fn tool_changed(&mut self, kind: ToolKind) {
        self.log.borrow_mut().push(Event::ToolChanged(kind));
    }

    fn brush_changed(&mut self, _brush: &Tilemap, use_brush: bool) {
        self.log.borrow_mut().push(Event::BrushChanged(use_brush));
    }
}

/// A recording listener ready to register, plus its log.
pub fn recorder() -> (SharedListener, EventLog) {
    let log = EventLog::default();
    let rec: SharedListener = Rc::new(RefCell::new(Recorder { log: log.clone() }));
    (rec, log)
}

/// Model with one `w x h` map where every cell differs from its neighbours.
pub fn model_with_pattern(w: i32, h: i32) -> Model {
    let mut map = Tilemap::new(w, h);
    for (i, cell) in map.cells.iter_mut().enumerate() {
        *cell = Cell::new(i as u16 + 100, (i % 16) as u8, (i % 7) as u8);
    }
    let mut proj = Proj::default_project();
    proj.maps = vec![map];
    Model::new(proj)
}

/// Pixel point at the top-left of a tile, for the default 8x8 charset.
pub fn px(x: i32, y: i32) -> PixPoint {
    PixPoint::new(x * 8, y * 8)
}

/// Tile at `(x, y)` on map 0.
pub fn tile_at(model: &Model, x: i32, y: i32) -> u16 {
    model.map(0).cell(TilePoint::new(x, y)).tile
}
