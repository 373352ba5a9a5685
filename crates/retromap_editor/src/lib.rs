//! retromap_editor - Editing engine for retro tilemap projects
//!
//! This crate provides everything behind an editor window:
//! - [`Model`] holding the project, pens, brush and undo/redo history
//! - Undoable commands for drawing, maps, entities and the charset
//! - [`ModelListener`] change notifications for views
//! - Pointer tools (draw, rectangle, brush pickup, flood fill, entities)
//! - [`MapPresenter`] tracking the map being edited
//! - Project file I/O and persistent preferences
//!
//! # Usage
//!
//! ```rust,ignore
//! use retromap_core::PixPoint;
//! use retromap_editor::{Buttons, Editor, Model, ToolKind};
//!
//! let mut editor = Editor::new(Model::default());
//! editor.set_tool(ToolKind::Rect);
//! editor.press(PixPoint::new(0, 0), Buttons::LEFT);
//! editor.release(PixPoint::new(32, 16), Buttons::LEFT);
//! editor.model_mut().undo();
//! ```

pub mod commands;
pub mod listener;
pub mod model;
pub mod preferences;
pub mod presenter;
pub mod project;
pub mod tools;

#[cfg(test)]
mod testing;

pub use retromap_core;

pub use commands::{CmdState, Command};
pub use listener::{ListenerId, ModelListener, SharedListener};
pub use model::Model;
pub use preferences::EditorPreferences;
pub use presenter::MapPresenter;
pub use project::{load_project, save_project, ProjectError};
pub use tools::{Buttons, Tool, ToolAction, ToolKind};

use std::cell::{Ref, RefCell};
use std::path::Path;
use std::rc::Rc;

use retromap_core::{MapRect, PixPoint};
use tracing::debug;

/// A model plus the active tool and the current-map presenter.
///
/// Pointer events go to the active tool against the presenter's current map.
pub struct Editor {
    model: Model,
    tool: Box<dyn Tool>,
    presenter: Rc<RefCell<MapPresenter>>,
    presenter_id: ListenerId,
}

impl Editor {
    pub fn new(mut model: Model) -> Self {
        let presenter = Rc::new(RefCell::new(MapPresenter::new()));
        let presenter_id = model.add_listener(presenter.clone());
        Self {
            model,
            tool: tools::make_tool(ToolKind::default()),
            presenter,
            presenter_id,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn presenter(&self) -> Ref<'_, MapPresenter> {
        self.presenter.borrow()
    }

    pub fn current_map(&self) -> usize {
        self.presenter.borrow().current_map()
    }

    pub fn set_current_map(&mut self, map_num: usize) {
        self.tool.reset(&mut self.model);
        self.presenter.borrow_mut().set_current_map(self.model.proj(), map_num);
    }

    pub fn nav_linear(&mut self, delta: i32) {
        self.tool.reset(&mut self.model);
        self.presenter.borrow_mut().nav_linear(self.model.proj(), delta);
    }

    pub fn nav_2d(&mut self, dx: i32, dy: i32) {
        self.tool.reset(&mut self.model);
        self.presenter.borrow_mut().nav_2d(self.model.proj(), dx, dy);
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Swap in a fresh tool of `kind`, finishing whatever the old one was doing.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.tool.reset(&mut self.model);
        self.tool = tools::make_tool(kind);
        debug!("Tool: {}", kind.name());
        self.model.notify(|l, _| l.tool_changed(kind));
    }

    pub fn press(&mut self, pos: PixPoint, buttons: Buttons) {
        if let Some(map_num) = self.target_map() {
            let action = self.tool.press(&mut self.model, map_num, pos, buttons);
            self.apply(action);
        }
    }

    pub fn move_to(&mut self, pos: PixPoint, buttons: Buttons) {
        if let Some(map_num) = self.target_map() {
            let action = self.tool.move_to(&mut self.model, map_num, pos, buttons);
            self.apply(action);
        }
    }

    pub fn release(&mut self, pos: PixPoint, buttons: Buttons) {
        if let Some(map_num) = self.target_map() {
            let action = self.tool.release(&mut self.model, map_num, pos, buttons);
            self.apply(action);
        }
    }

    pub fn cursor(&self) -> Option<MapRect> {
        self.tool.cursor()
    }

    pub fn undo(&mut self) {
        self.tool.reset(&mut self.model);
        self.model.undo();
    }

    pub fn redo(&mut self) {
        self.tool.reset(&mut self.model);
        self.model.redo();
    }

    /// Load `path`, replacing the current project. On error nothing changes.
    pub fn open(&mut self, path: &Path) -> Result<(), ProjectError> {
        let proj = load_project(path)?;
        self.tool.reset(&mut self.model);
        self.model.replace_proj(proj);
        self.model.filename = Some(path.to_path_buf());
        Ok(())
    }

    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.tool.reset(&mut self.model);
        save_project(self.model.proj(), path)?;
        self.model.mark_saved();
        self.model.filename = Some(path.to_path_buf());
        Ok(())
    }

    /// Give the model back, detaching the presenter.
    pub fn into_model(mut self) -> Model {
        self.tool.reset(&mut self.model);
        self.model.remove_listener(self.presenter_id);
        self.model
    }

    fn target_map(&self) -> Option<usize> {
        let map_num = self.current_map();
        (map_num < self.model.proj().maps.len()).then_some(map_num)
    }

    fn apply(&mut self, action: ToolAction) {
        match action {
            ToolAction::None => {}
            ToolAction::SwitchTool(kind) => self.set_tool(kind),
        }
    }
}
