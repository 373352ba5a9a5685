use retromap_core::{MapRect, PixPoint};

use super::{pen_for, tile_on_map, Buttons, DragSelect, Tool, ToolAction, ToolKind};
use crate::commands::MapDrawCmd;
use crate::Model;

/// Drag out a rectangle, fill it with the pen of the button that started the drag.
#[derive(Default)]
pub struct RectTool {
    drag: DragSelect,
}

impl Tool for RectTool {
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
        let Some((latch, selection)) = self.drag.finish(tp) else {
            return ToolAction::None;
        };
        let Some(pen) = pen_for(model, latch) else {
            return ToolAction::None;
        };

        let flags = model.draw_flags();
        let mut cmd = MapDrawCmd::new(model, map_num);
        cmd.draw_rect(model, &selection, &pen, flags);
        cmd.commit();
        if !cmd.is_empty() {
            model.add_cmd(Box::new(cmd));
        }
        ToolAction::None
    }

    fn reset(&mut self, _model: &mut Model) {
        self.drag.reset();
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Rect
    }

    fn cursor(&self) -> Option<MapRect> {
        self.drag.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use retromap_core::{Cell, TilePoint};

    #[test]
    fn test_fill_rect() {
        let mut model = Model::default();
        let mut tool = RectTool::default();

        tool.press(&mut model, 0, px(3, 2), Buttons::LEFT);
        tool.move_to(&mut model, 0, px(5, 5), Buttons::LEFT);
        assert_eq!(tool.cursor(), Some(MapRect::new(3, 2, 3, 4)));
        // Drag back past the anchor.
        tool.release(&mut model, 0, px(1, 1), Buttons::LEFT);
        assert_eq!(tool.cursor(), None);

        for y in 1..=2 {
            for x in 1..=3 {
                assert_eq!(*model.map(0).cell(TilePoint::new(x, y)), Cell::new(1, 1, 0));
            }
        }
        assert_eq!(tile_at(&model, 4, 2), 0);
        model.undo();
        assert_eq!(tile_at(&model, 2, 2), 0);
    }

    #[test]
    fn test_right_button_and_clipping() {
        let mut model = Model::default();
        let mut tool = RectTool::default();
        tool.press(&mut model, 0, px(38, 23), Buttons::RIGHT);
        tool.release(&mut model, 0, px(45, 30), Buttons::RIGHT);
        assert_eq!(*model.map(0).cell(TilePoint::new(39, 24)), Cell::new(32, 0, 0));
        assert!(model.can_undo());
    }

    #[test]
    fn test_press_off_map_does_nothing() {
        let mut model = Model::default();
        let mut tool = RectTool::default();
        tool.press(&mut model, 0, px(-1, 0), Buttons::LEFT);
        tool.release(&mut model, 0, px(2, 2), Buttons::LEFT);
        assert!(!model.can_undo());
    }

    #[test]
    fn test_reset_drops_drag() {
        let mut model = Model::default();
        let mut tool = RectTool::default();
        tool.press(&mut model, 0, px(1, 1), Buttons::LEFT);
        tool.reset(&mut model);
        tool.release(&mut model, 0, px(2, 2), Buttons::LEFT);
        assert!(!model.can_undo());
    }
}
