//! Undo/redo command system

mod charset;
mod command;
mod ents;
mod map_draw;
mod maps;

pub use charset::ReplaceCharsetCmd;
pub use command::{CmdState, Command};
pub use ents::{DeleteEntsCmd, EditEntCmd, InsertEntsCmd};
pub use map_draw::MapDrawCmd;
pub use maps::{DeleteMapsCmd, ExchangeMapsCmd, InsertMapsCmd, ResizeMapCmd};
