use retromap_core::{MapRect, PixPoint};

use super::{pen_for, tile_on_map, Buttons, Tool, ToolAction, ToolKind};
use crate::commands::MapDrawCmd;
use crate::Model;

/// Flood fill from the clicked cell.
#[derive(Default)]
pub struct FloodFillTool {
    cursor: Option<MapRect>,
}

impl Tool for FloodFillTool {
    fn press(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction {
        let Some(tp) = tile_on_map(model, map_num, pos) else {
            return ToolAction::None;
        };
        let Some(pen) = pen_for(model, buttons) else {
            return ToolAction::None;
        };

        let flags = model.draw_flags();
        let mut cmd = MapDrawCmd::new(model, map_num);
        cmd.flood_fill(model, tp, &pen, flags);
        cmd.commit();
        if !cmd.is_empty() {
            model.add_cmd(Box::new(cmd));
        }
        ToolAction::None
    }

    fn move_to(&mut self, model: &mut Model, _map_num: usize, pos: PixPoint, _buttons: Buttons) -> ToolAction {
        let tp = model.proj().to_tile_point(pos);
        self.cursor = Some(MapRect::at(tp, 1, 1));
        ToolAction::None
    }

    fn release(&mut self, _model: &mut Model, _map_num: usize, _pos: PixPoint, _buttons: Buttons) -> ToolAction {
        ToolAction::None
    }

    fn reset(&mut self, _model: &mut Model) {
        self.cursor = None;
    }

    fn kind(&self) -> ToolKind {
        ToolKind::FloodFill
    }

    fn cursor(&self) -> Option<MapRect> {
        self.cursor
    }
}
