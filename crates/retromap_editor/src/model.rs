//! The editing model: the project plus all editor state and undo history

use std::path::PathBuf;

use retromap_core::{Cell, Charset, DrawFlags, Ent, Proj, Tilemap};
use tracing::debug;

use crate::commands::{CmdState, Command};
use crate::listener::{ListenerId, Listeners, ModelListener, SharedListener};
use crate::preferences::EditorPreferences;

/// Owns a [`Proj`] and holds all the editing state.
pub struct Model {
    proj: Proj,
    modified: bool,
    pub filename: Option<PathBuf>,
    listeners: Listeners,

    /// Stack of commands that have been executed
    undo_stack: Vec<Box<dyn Command>>,
    /// Stack of commands that have been undone
    redo_stack: Vec<Box<dyn Command>>,
    /// 0 for unlimited
    max_undo: usize,

    /// Custom brush (0x0 = none)
    brush: Tilemap,
    left_pen: Cell,
    right_pen: Cell,
    use_brush: bool,
    draw_flags: DrawFlags,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Proj::default_project())
    }
}

impl Model {
    pub fn new(proj: Proj) -> Self {
        Self {
            proj,
            modified: false,
            filename: None,
            listeners: Listeners::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo: 0,
            brush: Tilemap::new(0, 0),
            left_pen: Cell::new(1, 1, 0),
            right_pen: Cell::new(32, 0, 0),
            use_brush: false,
            draw_flags: DrawFlags::ALL,
        }
    }

    /// Fresh default project set up from the user's preferences.
    pub fn with_preferences(prefs: &EditorPreferences) -> Self {
        let mut proj = Proj::with_map_size(prefs.default_map_w, prefs.default_map_h);
        if (prefs.tile_w, prefs.tile_h) != (proj.charset.tw, proj.charset.th) {
            proj.charset = Charset::new(prefs.tile_w, prefs.tile_h, 2);
            proj.charset.tile_image_mut(1).fill(1);
        }
        let mut model = Self::new(proj);
        model.left_pen = prefs.left_pen;
        model.right_pen = prefs.right_pen;
        model.draw_flags = prefs.draw_flags;
        model.max_undo = prefs.max_undo;
        model
    }

    pub fn proj(&self) -> &Proj {
        &self.proj
    }

    /// Raw access to the project. Changes made through here are not
    /// notified or undoable; commands use it and report their own damage.
    pub fn proj_mut(&mut self) -> &mut Proj {
        &mut self.proj
    }

    /// Swap in a whole new project (e.g. after loading a file).
    ///
    /// Clears undo history and the modified flag.
    pub fn replace_proj(&mut self, proj: Proj) -> Proj {
        let old = std::mem::replace(&mut self.proj, proj);
        self.clear_history();
        self.modified = false;
        self.notify(|l, proj| l.nuke(proj));
        old
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Called after a successful save.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // Some accessors with asserts.

    /// # Panics
    ///
    /// Panics if there is no map `map_num`.
    pub fn map(&self, map_num: usize) -> &Tilemap {
        assert!(
            map_num < self.proj.maps.len(),
            "map {} out of range ({} maps)",
            map_num,
            self.proj.maps.len()
        );
        &self.proj.maps[map_num]
    }

    /// # Panics
    ///
    /// Panics if there is no map `map_num`.
    pub fn map_mut(&mut self, map_num: usize) -> &mut Tilemap {
        assert!(
            map_num < self.proj.maps.len(),
            "map {} out of range ({} maps)",
            map_num,
            self.proj.maps.len()
        );
        &mut self.proj.maps[map_num]
    }

    /// # Panics
    ///
    /// Panics if the map or ent doesn't exist.
    pub fn ent(&self, map_num: usize, ent_num: usize) -> &Ent {
        let map = self.map(map_num);
        assert!(
            ent_num < map.ents.len(),
            "ent {} out of range on map {}",
            ent_num,
            map_num
        );
        &map.ents[ent_num]
    }

    // Listeners

    pub fn add_listener(&mut self, listener: SharedListener) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Call `f` on every listener with read-only access to the project.
    pub fn notify(&self, mut f: impl FnMut(&mut dyn ModelListener, &Proj)) {
        let proj = &self.proj;
        self.listeners.notify(|l| f(l, proj));
    }

    // Undo/redo

    /// Add a command to the undo stack, running it first if it isn't done yet.
    ///
    /// Throws away anything that could have been redone.
    pub fn add_cmd(&mut self, mut cmd: Box<dyn Command>) {
        if cmd.state() == CmdState::NotDone {
            cmd.execute(self);
        }
        debug!("add cmd: {}", cmd.description());
        self.undo_stack.push(cmd);
        self.redo_stack.clear();

        if self.max_undo > 0 && self.undo_stack.len() > self.max_undo {
            let excess = self.undo_stack.len() - self.max_undo;
            self.undo_stack.drain(..excess);
        }
        self.modified = true;
    }

    /// Undo the last command. Does nothing if there isn't one.
    pub fn undo(&mut self) {
        if let Some(mut cmd) = self.undo_stack.pop() {
            debug!("undo: {}", cmd.description());
            cmd.undo(self);
            self.redo_stack.push(cmd);
            self.modified = true;
        }
    }

    /// Redo the last undone command. Does nothing if there isn't one.
    pub fn redo(&mut self) {
        if let Some(mut cmd) = self.redo_stack.pop() {
            debug!("redo: {}", cmd.description());
            cmd.execute(self);
            self.undo_stack.push(cmd);
            self.modified = true;
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn max_undo(&self) -> usize {
        self.max_undo
    }

    pub fn set_max_undo(&mut self, max_undo: usize) {
        self.max_undo = max_undo;
    }

    // Pens and brush

    pub fn left_pen(&self) -> Cell {
        self.left_pen
    }

    pub fn right_pen(&self) -> Cell {
        self.right_pen
    }

    pub fn set_left_pen(&mut self, pen: Cell) {
        self.left_pen = pen;
        self.notify_pens();
    }

    pub fn set_right_pen(&mut self, pen: Cell) {
        self.right_pen = pen;
        self.notify_pens();
    }

    fn notify_pens(&self) {
        let (left, right) = (self.left_pen, self.right_pen);
        self.listeners.notify(|l| l.pen_changed(&left, &right));
    }

    pub fn draw_flags(&self) -> DrawFlags {
        self.draw_flags
    }

    pub fn set_draw_flags(&mut self, flags: DrawFlags) {
        self.draw_flags = flags;
        self.notify_pens();
    }

    pub fn brush(&self) -> &Tilemap {
        &self.brush
    }

    pub fn use_brush(&self) -> bool {
        self.use_brush
    }

    pub fn set_brush(&mut self, brush: Tilemap) {
        self.brush = brush;
        self.notify_brush();
    }

    /// Turning the brush on with an empty brush leaves it off.
    pub fn set_use_brush(&mut self, use_brush: bool) {
        self.use_brush = use_brush && !self.brush.is_empty();
        self.notify_brush();
    }

    /// Set a new brush and start drawing with it.
    pub fn pick_up_brush(&mut self, brush: Tilemap) {
        self.use_brush = !brush.is_empty();
        self.brush = brush;
        self.notify_brush();
    }

    fn notify_brush(&self) {
        let (brush, use_brush) = (&self.brush, self.use_brush);
        self.listeners.notify(|l| l.brush_changed(brush, use_brush));
    }
}
