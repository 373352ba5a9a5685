use retromap_core::{MapRect, PixPoint};

use super::{tile_on_map, Buttons, DragSelect, Tool, ToolAction, ToolKind};
use crate::Model;

/// Drag out a rectangle and copy it into the brush, then go back to drawing.
#[derive(Default)]
pub struct PickupTool {
    drag: DragSelect,
}

impl Tool for PickupTool {
    fn press(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction {
        if let Some(tp) = tile_on_map(model, map_num, pos) {
            self.drag.start(tp, buttons);
        }
        ToolAction::None
    }

    fn move_to(&mut self, model: &mut Model, _map_num: usize, pos: PixPoint, _buttons: Buttons) -> ToolAction {
        let tp = model.proj().to_tile_point(pos);
        self.drag.update(tp);
        ToolAction::None
    }

    fn release(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, _buttons: Buttons) -> ToolAction {
        let tp = model.proj().to_tile_point(pos);
        let Some((_, selection)) = self.drag.finish(tp) else {
            return ToolAction::None;
        };
        let brush = model.map(map_num).copy(&selection);
        model.pick_up_brush(brush);
        ToolAction::SwitchTool(ToolKind::Draw)
    }

    fn reset(&mut self, _model: &mut Model) {
        self.drag.reset();
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Pickup
    }

    fn cursor(&self) -> Option<MapRect> {
        self.drag.cursor()
    }
}
