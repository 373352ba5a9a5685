//! Entity commands, scoped to one map's entity list

use retromap_core::Ent;

use super::{CmdState, Command};
use crate::Model;

/// Insert ents into a map at a position.
pub struct InsertEntsCmd {
    map_num: usize,
    pos: usize,
    count: usize,
    ents: Vec<Ent>,
    state: CmdState,
}

impl InsertEntsCmd {
    pub fn new(map_num: usize, ents: Vec<Ent>, pos: usize) -> Self {
        Self {
            map_num,
            pos,
            count: ents.len(),
            ents,
            state: CmdState::NotDone,
        }
    }
}

impl Command for InsertEntsCmd {
    fn execute(&mut self, model: &mut Model) {
        let ents = &mut model.map_mut(self.map_num).ents;
        assert!(self.pos <= ents.len(), "ent position {} out of range", self.pos);
        ents.splice(self.pos..self.pos, self.ents.drain(..));

        let (map_num, pos, count) = (self.map_num, self.pos, self.count);
        model.notify(|l, proj| l.ents_inserted(proj, map_num, pos, count));
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        let (map_num, pos, count) = (self.map_num, self.pos, self.count);
        self.ents = model.map_mut(map_num).ents.drain(pos..pos + count).collect();
        model.notify(|l, proj| l.ents_removed(proj, map_num, pos, count));
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Add Entity"
    }
}

/// Delete ents `[begin, end)` from a map, keeping them for undo.
pub struct DeleteEntsCmd {
    map_num: usize,
    begin: usize,
    end: usize,
    backup: Vec<Ent>,
    state: CmdState,
}

impl DeleteEntsCmd {
    pub fn new(map_num: usize, begin: usize, end: usize) -> Self {
        assert!(begin <= end, "bad ent range {}..{}", begin, end);
        Self {
            map_num,
            begin,
            end,
            backup: Vec::new(),
            state: CmdState::NotDone,
        }
    }
}

impl Command for DeleteEntsCmd {
    fn execute(&mut self, model: &mut Model) {
        let (map_num, begin, end) = (self.map_num, self.begin, self.end);
        self.backup = model.map_mut(map_num).ents.drain(begin..end).collect();
        model.notify(|l, proj| l.ents_removed(proj, map_num, begin, end - begin));
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        let (map_num, begin, end) = (self.map_num, self.begin, self.end);
        model
            .map_mut(map_num)
            .ents
            .splice(begin..begin, self.backup.drain(..));
        model.notify(|l, proj| l.ents_inserted(proj, map_num, begin, end - begin));
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Delete Entity"
    }
}

/// Replace one ent with new data. Its own inverse.
pub struct EditEntCmd {
    map_num: usize,
    ent_num: usize,
    /// The version of the ent not currently in the map.
    ent: Ent,
    state: CmdState,
}

impl EditEntCmd {
    pub fn new(map_num: usize, ent_num: usize, new_data: Ent) -> Self {
        Self {
            map_num,
            ent_num,
            ent: new_data,
            state: CmdState::NotDone,
        }
    }

    fn swap(&mut self, model: &mut Model) {
        // Asserting accessor for the range check.
        model.ent(self.map_num, self.ent_num);
        std::mem::swap(&mut model.map_mut(self.map_num).ents[self.ent_num], &mut self.ent);

        let (map_num, ent_num) = (self.map_num, self.ent_num);
        let old = &self.ent;
        model.notify(|l, proj| l.ent_changed(proj, map_num, ent_num, old, &proj.maps[map_num].ents[ent_num]));
    }
}

impl Command for EditEntCmd {
    fn execute(&mut self, model: &mut Model) {
        self.swap(model);
        self.state = CmdState::Done;
    }

    fn undo(&mut self, model: &mut Model) {
        self.swap(model);
        self.state = CmdState::NotDone;
    }

    fn state(&self) -> CmdState {
        self.state
    }

    fn description(&self) -> &str {
        "Edit Entity"
    }
}
