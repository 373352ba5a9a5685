//! Change notification
//!
//! Anything that shows the document (map views, ent lists, pen widgets)
//! implements [`ModelListener`] and registers with the [`Model`](crate::Model).
//! Every mutation is reported synchronously, in registration order, before
//! the mutating call returns.

use std::cell::RefCell;
use std::rc::Rc;

use retromap_core::{Cell, Ent, MapRect, Proj, Tilemap};
use tracing::warn;

use crate::tools::ToolKind;

/// Callback interface for things that want to know about changes.
///
/// All methods default to doing nothing. Callbacks get read-only access to
/// the project and must not try to mutate the model from inside one.
#[allow(unused_variables)]
pub trait ModelListener {
    /// Cells inside `dirty` on map `map_num` changed.
    fn map_modified(&mut self, proj: &Proj, map_num: usize, dirty: &MapRect) {}
    /// `count` maps were inserted at `first`; every map index `>= first` shifted up.
    fn maps_inserted(&mut self, proj: &Proj, first: usize, count: usize) {}
    /// `count` maps were removed at `first`; every later map index shifted down.
    fn maps_removed(&mut self, proj: &Proj, first: usize, count: usize) {}
    fn ents_inserted(&mut self, proj: &Proj, map_num: usize, first: usize, count: usize) {}
    fn ents_removed(&mut self, proj: &Proj, map_num: usize, first: usize, count: usize) {}
    fn ent_changed(
        &mut self,
        proj: &Proj,
        map_num: usize,
        ent_num: usize,
        old: &Ent,
        new: &Ent,
    ) {
    }
    /// Assume everything changed.
    fn nuke(&mut self, proj: &Proj) {}
    fn charset_modified(&mut self, proj: &Proj) {}

    fn pen_changed(&mut self, left: &Cell, right: &Cell) {}
    fn tool_changed(&mut self, kind: ToolKind) {}
    fn brush_changed(&mut self, brush: &Tilemap, use_brush: bool) {}
}

pub type SharedListener = Rc<RefCell<dyn ModelListener>>;

/// Handle returned by [`Listeners::add`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered listener registry.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, SharedListener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: SharedListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if `id` wasn't registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call `f` on every listener, in registration order.
    ///
    /// Works from a snapshot of the registry. A listener that is already
    /// borrowed (a notification arriving from inside its own callback) is
    /// skipped.
    pub fn notify(&self, mut f: impl FnMut(&mut dyn ModelListener)) {
        let snapshot: Vec<SharedListener> = self.entries.iter().map(|(_, l)| l.clone()).collect();
        for listener in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut l) => f(&mut *l),
                Err(_) => warn!("listener busy, skipping re-entrant notification"),
            }
        }
    }
}
