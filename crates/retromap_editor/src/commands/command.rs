//! Command pattern for undo/redo

use crate::Model;

/// Whether a command's effect is currently applied to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdState {
    NotDone,
    Done,
}

/// A command that can be undone/redone
///
/// `execute` moves a command from `NotDone` to `Done` and `undo` moves it
/// back. Each call reports its own changes to the model's listeners.
pub trait Command {
    /// Execute the command (do/redo)
    fn execute(&mut self, model: &mut Model);
    /// Undo the command
    fn undo(&mut self, model: &mut Model);
    fn state(&self) -> CmdState;
    /// Get a description of the command
    fn description(&self) -> &str;
}
