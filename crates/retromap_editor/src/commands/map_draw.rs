//! Freehand drawing command

use retromap_core::{draw, Cell, DrawFlags, MapRect, TilePoint, Tilemap};

use super::{CmdState, Command};
use crate::Model;

/// Undoable edit of one map's cells.
///
/// Drawing happens live: the command starts out `Done` and each draw call
/// changes the map immediately and reports the damage. Once drawing is over,
/// [`commit`](Self::commit) keeps only the pre-edit cells under the total
/// damage rect. After that, undo and redo both swap those cells with the
/// live map.
pub struct MapDrawCmd {
    map_num: usize,
    state: CmdState,
    damage: MapRect,
    /// Whole pre-edit map until commit, then just the damaged region.
    backup: Tilemap,
    committed: bool,
}

impl MapDrawCmd {
    /// # Panics
    ///
    /// Panics if there is no map `map_num`.
    pub fn new(model: &Model, map_num: usize) -> Self {
        let map = model.map(map_num);
        Self {
            map_num,
            state: CmdState::Done,
            damage: MapRect::EMPTY,
            backup: map.copy(&map.bounds()),
            committed: false,
        }
    }

    pub fn map_num(&self) -> usize {
        self.map_num
    }

    /// Total damage so far.
    pub fn damage(&self) -> MapRect {
        self.damage
    }

    /// True if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.damage.is_empty()
    }

    pub fn plonk(&mut self, model: &mut Model, pos: TilePoint, pen: &Cell, flags: DrawFlags) -> MapRect {
        let damage = draw::plonk(self.live_map(model), pos, pen, flags);
        self.add_damage(model, &damage);
        damage
    }

    pub fn draw_rect(&mut self, model: &mut Model, area: &MapRect, pen: &Cell, flags: DrawFlags) -> MapRect {
        let damage = draw::draw_rect(self.live_map(model), area, pen, flags);
        self.add_damage(model, &damage);
        damage
    }

    pub fn draw_brush(
        &mut self,
        model: &mut Model,
        pos: TilePoint,
        brush: &Tilemap,
        transparent: &Cell,
        flags: DrawFlags,
    ) -> MapRect {
        let damage = draw::draw_brush(self.live_map(model), pos, brush, transparent, flags);
        self.add_damage(model, &damage);
        damage
    }

    pub fn erase_brush(
        &mut self,
        model: &mut Model,
        pos: TilePoint,
        brush: &Tilemap,
        transparent: &Cell,
        flags: DrawFlags,
    ) -> MapRect {
        let damage = draw::erase_brush(self.live_map(model), pos, brush, transparent, flags);
        self.add_damage(model, &damage);
        damage
    }

    pub fn flood_fill(&mut self, model: &mut Model, start: TilePoint, pen: &Cell, flags: DrawFlags) -> MapRect {
        let damage = draw::flood_fill(self.live_map(model), start, pen, flags);
        self.add_damage(model, &damage);
        damage
    }

    /// Record damage from a change the caller already made to the map.
    pub fn add_damage(&mut self, model: &Model, rect: &MapRect) {
        assert!(!self.committed, "drawing into a committed MapDrawCmd");
        let rect = model.map(self.map_num).bounds().clip(rect);
        if rect.is_empty() {
            return;
        }
        self.damage.merge(&rect);

        let map_num = self.map_num;
        model.notify(|l, proj| l.map_modified(proj, map_num, &rect));
    }

    /// Finish drawing. Call exactly once.
    pub fn commit(&mut self) {
        assert!(!self.committed, "MapDrawCmd committed twice");
        self.backup = self.backup.copy(&self.damage);
        self.committed = true;
    }

    fn live_map<'a>(&self, model: &'a mut Model) -> &'a mut Tilemap {
        assert!(!self.committed, "drawing into a committed MapDrawCmd");
        model.map_mut(self.map_num)
    }

    fn swap(&mut self, model: &mut Model) {
        assert!(self.committed, "MapDrawCmd used before commit");
        let map = model.map_mut(self.map_num);
        let region = map.bounds().clip(&self.damage);
        for y in region.y..region.y_max() {
            let live = map.span_mut(region.x, y, region.w);
            let saved = self
                .backup
                .span_mut(region.x - self.damage.x, y - self.damage.y, region.w);
            live.swap_with_slice(saved);
        }
        if region.is_empty() {
            return;
        }
        let map_num = self.map_num;
        model.notify(|l, proj| l.map_modified(proj, map_num, &region));
    }
}

impl Command for MapDrawCmd {
    fn execute(&mut self, model: &mut Model) {
        self.swap(model);
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        self.swap(model);
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Draw"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_undo_redo_is_bit_exact() {
        let mut model = model_with_pattern(6, 5);
        let before = model.map(0).clone();

        let mut cmd = MapDrawCmd::new(&model, 0);
        cmd.plonk(&mut model, TilePoint::new(0, 0), &Cell::new(99, 1, 1), DrawFlags::ALL);
        cmd.draw_rect(&mut model, &MapRect::new(2, 1, 3, 2), &Cell::new(7, 0, 0), DrawFlags::TILE);
        cmd.plonk(&mut model, TilePoint::new(5, 4), &Cell::new(3, 3, 3), DrawFlags::INK);
        cmd.commit();
        assert_eq!(cmd.damage(), MapRect::new(0, 0, 6, 5));
        let after = model.map(0).clone();
        assert_ne!(before, after);

        model.add_cmd(Box::new(cmd));
        assert_eq!(*model.map(0), after, "adding a done command must not re-run it");

        model.undo();
        assert_eq!(*model.map(0), before);
        model.redo();
        assert_eq!(*model.map(0), after);
        model.undo();
        assert_eq!(*model.map(0), before);
    }

    #[test]
    fn test_backup_is_cropped_to_damage() {
        let mut model = model_with_pattern(40, 25);
        let mut cmd = MapDrawCmd::new(&model, 0);
        cmd.draw_rect(&mut model, &MapRect::new(3, 4, 2, 2), &Cell::new(1, 1, 1), DrawFlags::ALL);
        cmd.commit();
        assert_eq!((cmd.backup.w, cmd.backup.h), (2, 2));
    }

    #[test]
    fn test_brush_and_flood() {
        let mut model = model_with_pattern(5, 5);
        let before = model.map(0).clone();
        let brush = Tilemap::filled(2, 2, Cell::new(50, 2, 2));

        let mut cmd = MapDrawCmd::new(&model, 0);
        cmd.draw_brush(&mut model, TilePoint::new(-1, 3), &brush, &Cell::new(32, 0, 0), DrawFlags::ALL);
        cmd.erase_brush(&mut model, TilePoint::new(3, 0), &brush, &Cell::new(32, 0, 0), DrawFlags::ALL);
        cmd.flood_fill(&mut model, TilePoint::new(2, 2), &Cell::new(60, 0, 0), DrawFlags::TILE);
        cmd.commit();
        model.add_cmd(Box::new(cmd));

        model.undo();
        assert_eq!(*model.map(0), before);
    }

    #[test]
    fn test_live_notifications_and_swap_damage() {
        let mut model = model_with_pattern(4, 4);
        let (rec, log) = recorder();
        model.add_listener(rec);

        let mut cmd = MapDrawCmd::new(&model, 0);
        cmd.plonk(&mut model, TilePoint::new(1, 1), &Cell::new(9, 0, 0), DrawFlags::ALL);
        cmd.draw_rect(&mut model, &MapRect::new(10, 10, 2, 2), &Cell::new(9, 0, 0), DrawFlags::ALL);
        cmd.plonk(&mut model, TilePoint::new(2, 3), &Cell::new(9, 0, 0), DrawFlags::ALL);
        cmd.commit();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::MapModified(0, MapRect::new(1, 1, 1, 1)),
                Event::MapModified(0, MapRect::new(2, 3, 1, 1)),
            ]
        );

        log.borrow_mut().clear();
        model.add_cmd(Box::new(cmd));
        model.undo();
        assert_eq!(*log.borrow(), vec![Event::MapModified(0, MapRect::new(1, 1, 2, 3))]);
    }

    #[test]
    fn test_empty_command() {
        let mut model = model_with_pattern(4, 4);
        let mut cmd = MapDrawCmd::new(&model, 0);
        cmd.draw_rect(&mut model, &MapRect::new(-5, -5, 2, 2), &Cell::new(1, 1, 1), DrawFlags::ALL);
        cmd.commit();
        assert!(cmd.is_empty());

        let before = model.map(0).clone();
        model.add_cmd(Box::new(cmd));
        model.undo();
        model.redo();
        assert_eq!(*model.map(0), before);
    }

    #[test]
    #[should_panic]
    fn test_double_commit_panics() {
        let model = model_with_pattern(2, 2);
        let mut cmd = MapDrawCmd::new(&model, 0);
        cmd.commit();
        cmd.commit();
    }
}
