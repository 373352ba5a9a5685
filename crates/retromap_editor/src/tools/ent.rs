use retromap_core::{Ent, MapRect, PixPoint, TilePoint};

use super::{Buttons, Tool, ToolAction, ToolKind};
use crate::commands::EditEntCmd;
use crate::Model;

struct EntDrag {
    map_num: usize,
    ent_num: usize,
    /// Ent data when the drag started.
    orig: Ent,
    /// Pointer offset from the ent's top-left corner.
    grab: TilePoint,
    /// Where the ent's top-left corner would go now.
    pos: TilePoint,
}

/// Select and drag entities around.
///
/// Pressing picks the topmost (last) ent under the pointer. Releasing after
/// a drag moves it with a single [`EditEntCmd`].
#[derive(Default)]
pub struct EntTool {
    drag: Option<EntDrag>,
}

impl EntTool {
    /// Map and ent index of the ent being dragged.
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.drag.as_ref().map(|d| (d.map_num, d.ent_num))
    }
}

/// Index of the last ent whose footprint contains `tp`. Ents with no size
/// count as one tile.
pub fn ent_at(model: &Model, map_num: usize, tp: TilePoint) -> Option<usize> {
    model
        .map(map_num)
        .ents
        .iter()
        .rposition(|ent| footprint(ent).contains(tp))
}

fn footprint(ent: &Ent) -> MapRect {
    let g = ent.geometry();
    MapRect::new(g.x, g.y, g.w.max(1), g.h.max(1))
}

impl Tool for EntTool {
    fn press(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction {
        self.drag = None;
        if !buttons.contains(Buttons::LEFT) {
            return ToolAction::None;
        }
        let tp = model.proj().to_tile_point(pos);
        if let Some(ent_num) = ent_at(model, map_num, tp) {
            let orig = model.ent(map_num, ent_num).clone();
            let g = orig.geometry();
            self.drag = Some(EntDrag {
                map_num,
                ent_num,
                grab: TilePoint::new(tp.x - g.x, tp.y - g.y),
                pos: g.pos(),
                orig,
            });
        }
        ToolAction::None
    }

    fn move_to(&mut self, model: &mut Model, _map_num: usize, pos: PixPoint, _buttons: Buttons) -> ToolAction {
        if let Some(drag) = self.drag.as_mut() {
            let tp = model.proj().to_tile_point(pos);
            drag.pos = TilePoint::new(tp.x - drag.grab.x, tp.y - drag.grab.y);
        }
        ToolAction::None
    }

    fn release(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction {
        self.move_to(model, map_num, pos, buttons);
        let Some(drag) = self.drag.take() else {
            return ToolAction::None;
        };
        if drag.pos != drag.orig.geometry().pos() {
            let mut moved = drag.orig;
            moved.set_pos(drag.pos.x, drag.pos.y);
            model.add_cmd(Box::new(EditEntCmd::new(drag.map_num, drag.ent_num, moved)));
        }
        ToolAction::None
    }

    fn reset(&mut self, _model: &mut Model) {
        self.drag = None;
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Ent
    }

    fn cursor(&self) -> Option<MapRect> {
        self.drag.as_ref().map(|d| {
            let f = footprint(&d.orig);
            MapRect::at(d.pos, f.w, f.h)
        })
    }
}
