//! Map-level commands: insert, delete, resize, exchange

use retromap_core::{MapRect, Tilemap};

use super::{CmdState, Command};
use crate::Model;

/// Insert a run of maps at a position.
pub struct InsertMapsCmd {
    pos: usize,
    count: usize,
    /// The maps to insert, while they aren't in the project.
    maps: Vec<Tilemap>,
    state: CmdState,
}

impl InsertMapsCmd {
    pub fn new(maps: Vec<Tilemap>, pos: usize) -> Self {
        Self {
            pos,
            count: maps.len(),
            maps,
            state: CmdState::NotDone,
        }
    }
}

impl Command for InsertMapsCmd {
    fn execute(&mut self, model: &mut Model) {
        let maps = &mut model.proj_mut().maps;
        assert!(self.pos <= maps.len(), "insert position {} out of range", self.pos);
        maps.splice(self.pos..self.pos, self.maps.drain(..));
        let (pos, count) = (self.pos, self.count);
        model.notify(|l, proj| l.maps_inserted(proj, pos, count));
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        let (pos, count) = (self.pos, self.count);
        self.maps = model.proj_mut().maps.drain(pos..pos + count).collect();
        model.notify(|l, proj| l.maps_removed(proj, pos, count));
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        if self.count == 1 {
            "Insert Map"
        } else {
            "Insert Maps"
        }
    }
}

/// Delete maps `[begin, end)`. The removed maps are kept for undo.
pub struct DeleteMapsCmd {
    begin: usize,
    end: usize,
    backup: Vec<Tilemap>,
    state: CmdState,
}

impl DeleteMapsCmd {
    pub fn new(begin: usize, end: usize) -> Self {
        assert!(begin <= end, "bad map range {}..{}", begin, end);
        Self {
            begin,
            end,
            backup: Vec::new(),
            state: CmdState::NotDone,
        }
    }
}

impl Command for DeleteMapsCmd {
    fn execute(&mut self, model: &mut Model) {
        let (begin, end) = (self.begin, self.end);
        self.backup = model.proj_mut().maps.drain(begin..end).collect();
        model.notify(|l, proj| l.maps_removed(proj, begin, end - begin));
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        let (begin, end) = (self.begin, self.end);
        model
            .proj_mut()
            .maps
            .splice(begin..begin, self.backup.drain(..));
        model.notify(|l, proj| l.maps_inserted(proj, begin, end - begin));
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        if self.end - self.begin == 1 {
            "Delete Map"
        } else {
            "Delete Maps"
        }
    }
}

/// Resize (or crop) a map. Entities move with the cells under them.
pub struct ResizeMapCmd {
    map_num: usize,
    /// The version of the map not currently in the project.
    alt: Tilemap,
    state: CmdState,
}

impl ResizeMapCmd {
    /// `new_area` is relative to the current map, so a negative `x`/`y`
    /// grows the map up or left. Cells outside the old map come out blank.
    /// Ents are kept even if they end up outside the new bounds.
    pub fn new(model: &Model, map_num: usize, new_area: &MapRect) -> Self {
        let map = model.map(map_num);
        let mut alt = map.copy(new_area);
        alt.ents = map.ents.clone();
        for ent in &mut alt.ents {
            ent.translate(-new_area.x, -new_area.y);
        }
        Self {
            map_num,
            alt,
            state: CmdState::NotDone,
        }
    }
}

impl Command for ResizeMapCmd {
    fn execute(&mut self, model: &mut Model) {
        std::mem::swap(model.map_mut(self.map_num), &mut self.alt);
        model.notify(|l, proj| l.nuke(proj));
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        self.execute(model);
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Resize Map"
    }
}

/// Swap the positions of two maps.
pub struct ExchangeMapsCmd {
    a: usize,
    b: usize,
    state: CmdState,
}

impl ExchangeMapsCmd {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            a,
            b,
            state: CmdState::NotDone,
        }
    }
}

impl Command for ExchangeMapsCmd {
    fn execute(&mut self, model: &mut Model) {
        // Range-check both through the asserting accessor.
        model.map(self.a);
        model.map(self.b);
        model.proj_mut().maps.swap(self.a, self.b);
        model.notify(|l, proj| l.nuke(proj));
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        self.execute(model);
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Exchange Maps"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use retromap_core::{Cell, Ent, Proj, TilePoint};

    fn three_maps() -> Model {
        let mut proj = Proj::default_project();
        proj.maps = (0..3).map(|i| Tilemap::filled(2, 2, Cell::new(i, 0, 0))).collect();
        Model::new(proj)
    }

    fn map_ids(model: &Model) -> Vec<u16> {
        model.proj().maps.iter().map(|m| m.cells[0].tile).collect()
    }

    #[test]
    fn test_insert_maps() {
        let mut model = three_maps();
        let (rec, log) = recorder();
        model.add_listener(rec);

        let new_maps = vec![Tilemap::filled(2, 2, Cell::new(10, 0, 0)), Tilemap::filled(2, 2, Cell::new(11, 0, 0))];
        model.add_cmd(Box::new(InsertMapsCmd::new(new_maps, 1)));
        assert_eq!(map_ids(&model), vec![0, 10, 11, 1, 2]);
        assert_eq!(model.undo_description(), Some("Insert Maps"));

        model.undo();
        assert_eq!(map_ids(&model), vec![0, 1, 2]);
        model.redo();
        assert_eq!(map_ids(&model), vec![0, 10, 11, 1, 2]);

        assert_eq!(
            *log.borrow(),
            vec![
                Event::MapsInserted(1, 2),
                Event::MapsRemoved(1, 2),
                Event::MapsInserted(1, 2),
            ]
        );
    }

    #[test]
    fn test_insert_at_end() {
        let mut model = three_maps();
        model.add_cmd(Box::new(InsertMapsCmd::new(vec![Tilemap::filled(1, 1, Cell::new(7, 0, 0))], 3)));
        assert_eq!(map_ids(&model), vec![0, 1, 2, 7]);
    }

    #[test]
    fn test_delete_maps_preserves_order_on_undo() {
        let mut model = three_maps();
        model.map_mut(1).ents.push(Ent::new().with("kind", "keep"));
        let before = model.proj().clone();

        model.add_cmd(Box::new(DeleteMapsCmd::new(1, 3)));
        assert_eq!(map_ids(&model), vec![0]);
        model.undo();
        assert_eq!(*model.proj(), before);
    }

    #[test]
    fn test_resize_map() {
        let mut model = three_maps();
        model.map_mut(0).ents.push(Ent::new().with("x", "1"));
        model.map_mut(0).cell_mut(TilePoint::new(1, 1)).tile = 42;
        let before = model.map(0).clone();

        let cmd = ResizeMapCmd::new(&model, 0, &MapRect::new(-1, 0, 4, 3));
        model.add_cmd(Box::new(cmd));
        let map = model.map(0);
        assert_eq!((map.w, map.h), (4, 3));
        assert_eq!(map.cell(TilePoint::new(2, 1)).tile, 42);
        assert_eq!(map.cell(TilePoint::new(0, 0)), &Cell::default());
        // The ent stays on the same cell.
        assert_eq!(map.ents, vec![Ent::new().with("x", "2")]);

        model.undo();
        assert_eq!(*model.map(0), before);
        model.redo();
        assert_eq!((model.map(0).w, model.map(0).h), (4, 3));
    }

    #[test]
    fn test_resize_crop_moves_ents() {
        let mut model = three_maps();
        model.map_mut(1).ents.push(Ent::new().with("kind", "key").with("x", "2").with("y", "1"));

        model.add_cmd(Box::new(ResizeMapCmd::new(&model, 1, &MapRect::new(1, 1, 2, 2))));
        assert_eq!(model.ent(1, 0).geometry().pos(), TilePoint::new(1, 0));
        assert_eq!(model.ent(1, 0).kind(), "key");

        model.undo();
        assert_eq!(model.ent(1, 0).geometry().pos(), TilePoint::new(2, 1));
    }

    #[test]
    fn test_exchange_maps() {
        let mut model = three_maps();
        let (rec, log) = recorder();
        model.add_listener(rec);

        model.add_cmd(Box::new(ExchangeMapsCmd::new(0, 2)));
        assert_eq!(map_ids(&model), vec![2, 1, 0]);
        model.undo();
        assert_eq!(map_ids(&model), vec![0, 1, 2]);
        assert_eq!(*log.borrow(), vec![Event::Nuke, Event::Nuke]);
    }

    #[test]
    #[should_panic]
    fn test_exchange_out_of_range_panics() {
        let mut model = three_maps();
        model.add_cmd(Box::new(ExchangeMapsCmd::new(0, 3)));
    }
}
