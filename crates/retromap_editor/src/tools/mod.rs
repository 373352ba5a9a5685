//! Pointer tools
//!
//! A tool turns presses, drags and releases on a map into commands. Tools
//! never hold on to the model; the [`Editor`](crate::Editor) owns the active
//! tool and passes the model into every call.

mod draw;
mod ent;
mod flood_fill;
mod pickup;
mod rect;

pub use draw::DrawTool;
pub use ent::{ent_at, EntTool};
pub use flood_fill::FloodFillTool;
pub use pickup::PickupTool;
pub use rect::RectTool;

use bitflags::bitflags;
use retromap_core::{Cell, MapRect, PixPoint, TilePoint};
use serde::{Deserialize, Serialize};

use crate::Model;

/// Available editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Draw,
    Rect,
    Pickup,
    FloodFill,
    Ent,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Draw,
        ToolKind::Rect,
        ToolKind::Pickup,
        ToolKind::FloodFill,
        ToolKind::Ent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Draw => "Draw",
            ToolKind::Rect => "Rectangle",
            ToolKind::Pickup => "Pick Up Brush",
            ToolKind::FloodFill => "Flood Fill",
            ToolKind::Ent => "Entities",
        }
    }
}

bitflags! {
    /// Pointer buttons held during a tool event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const LEFT  = 0x01;
        const RIGHT = 0x02;
    }
}

/// What the editor should do after a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    None,
    SwitchTool(ToolKind),
}

pub trait Tool {
    fn press(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction;
    fn move_to(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction;
    fn release(&mut self, model: &mut Model, map_num: usize, pos: PixPoint, buttons: Buttons) -> ToolAction;
    /// Drop any half-finished operation. Called before switching away.
    fn reset(&mut self, model: &mut Model);
    fn kind(&self) -> ToolKind;
    /// Highlight rect to show on the map, if any.
    fn cursor(&self) -> Option<MapRect>;
}

/// Create a fresh tool.
pub fn make_tool(kind: ToolKind) -> Box<dyn Tool> {
    match kind {
        ToolKind::Draw => Box::<DrawTool>::default(),
        ToolKind::Rect => Box::<RectTool>::default(),
        ToolKind::Pickup => Box::<PickupTool>::default(),
        ToolKind::FloodFill => Box::<FloodFillTool>::default(),
        ToolKind::Ent => Box::<EntTool>::default(),
    }
}

/// A rubber-band selection latched to the buttons that started it.
#[derive(Debug, Default)]
struct DragSelect {
    latch: Buttons,
    anchor: TilePoint,
    selection: MapRect,
}

impl DragSelect {
    fn start(&mut self, tp: TilePoint, buttons: Buttons) {
        self.latch = buttons;
        self.anchor = tp;
        self.selection = MapRect::from_corners(tp, tp);
    }

    /// Stretch to `tp`. False if no drag is in progress.
    fn update(&mut self, tp: TilePoint) -> bool {
        if self.latch.is_empty() {
            return false;
        }
        self.selection = MapRect::from_corners(self.anchor, tp);
        true
    }

    /// End the drag, giving back the latched buttons and final selection.
    fn finish(&mut self, tp: TilePoint) -> Option<(Buttons, MapRect)> {
        if !self.update(tp) {
            return None;
        }
        let latch = std::mem::take(&mut self.latch);
        Some((latch, self.selection))
    }

    fn cursor(&self) -> Option<MapRect> {
        (!self.latch.is_empty()).then_some(self.selection)
    }

    fn reset(&mut self) {
        self.latch = Buttons::empty();
    }
}

/// Pen for the first pressed button, left taking priority.
fn pen_for(model: &Model, buttons: Buttons) -> Option<Cell> {
    if buttons.contains(Buttons::LEFT) {
        Some(model.left_pen())
    } else if buttons.contains(Buttons::RIGHT) {
        Some(model.right_pen())
    } else {
        None
    }
}

/// Tile under `pos`, if it is on map `map_num`.
fn tile_on_map(model: &Model, map_num: usize, pos: PixPoint) -> Option<TilePoint> {
    let tp = model.proj().to_tile_point(pos);
    model.map(map_num).is_valid(tp).then_some(tp)
}
