use retromap_core::{MapRect, PixPoint, TilePoint};

use super::{Buttons, Tool, ToolAction, ToolKind};
use crate::commands::MapDrawCmd;
use crate::Model;

/// Freehand drawing with the pens, or stamping with the brush.
///
/// Left button draws with the left pen (or stamps the brush). Right button
/// draws with the right pen (or erases the brush footprint back to the
/// right pen). A whole press-drag-release is one undoable command.
#[derive(Default)]
pub struct DrawTool {
    cmd: Option<MapDrawCmd>,
    prev: Option<TilePoint>,
    cursor: Option<MapRect>,
}

impl DrawTool {
    fn update_cursor(&mut self, model: &Model, tp: TilePoint) {
        let (w, h) = if model.use_brush() {
            (model.brush().w, model.brush().h)
        } else {
            (1, 1)
        };
        self.cursor = Some(MapRect::at(tp, w, h));
    }

    fn paint(&mut self, model: &mut Model, tp: TilePoint, buttons: Buttons) {
        let Some(cmd) = self.cmd.as_mut() else {
            return;
        };
        let flags = model.draw_flags();
        if model.use_brush() {
            let brush = model.brush().clone();
            let transparent = model.right_pen();
            if buttons.contains(Buttons::LEFT) {
                cmd.draw_brush(model, tp, &brush, &transparent, flags);
            }
            if buttons.contains(Buttons::RIGHT) {
                cmd.erase_brush(model, tp, &brush, &transparent, flags);
            }
        } else {
            if buttons.contains(Buttons::LEFT) {
                let pen = model.left_pen();
                cmd.plonk(model, tp, &pen, flags);
            }
            if buttons.contains(Buttons::RIGHT) {
                let pen = model.right_pen();
                cmd.plonk(model, tp, &pen, flags);
            }
        }
    }

    /// Commit and add the in-progress command, if there is one.
    fn finish(&mut self, model: &mut Model) {
        if let Some(mut cmd) = self.cmd.take() {
            cmd.commit();
            if !cmd.is_empty() {
                model.add_cmd(Box::new(cmd));
            }
        }
        self.prev = None;
    }
}

impl Tool for DrawTool {
    fn press(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction {
        let tp = model.proj().to_tile_point(pos);
        self.prev = Some(tp);
        self.update_cursor(model, tp);

        if self.cmd.is_none() {
            self.cmd = Some(MapDrawCmd::new(model, map_num));
        }
        if model.map(map_num).is_valid(tp) {
            self.paint(model, tp, buttons);
        }
        ToolAction::None
    }

    fn move_to(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction {
        let tp = model.proj().to_tile_point(pos);
        self.update_cursor(model, tp);

        if self.cmd.is_none() || !model.map(map_num).is_valid(tp) {
            return ToolAction::None;
        }
        if self.prev == Some(tp) {
            return ToolAction::None;
        }
        self.prev = Some(tp);
        self.paint(model, tp, buttons);
        ToolAction::None
    }

    fn release(&mut self, model: &mut Model, _map_num: usize, _pos: PixPoint, _buttons: Buttons) -> ToolAction {
        self.finish(model);
        ToolAction::None
    }

    fn reset(&mut self, model: &mut Model) {
        self.finish(model);
        self.cursor = None;
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Draw
    }

    fn cursor(&self) -> Option<MapRect> {
        self.cursor
    }
}
