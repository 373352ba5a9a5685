//! Tracks which map is being edited
//!
//! The presenter listens to the model so that the current map index and ent
//! selection stay pointing at the same things while maps and ents are
//! inserted or removed underneath them.

use retromap_core::Proj;

use crate::listener::ModelListener;

/// Maps per row when navigating the project as a 2D world grid.
pub const WORLD_GRID_W: usize = 5;

#[derive(Debug, Default)]
pub struct MapPresenter {
    current: usize,
    selected_ents: Vec<usize>,
}

impl MapPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_map(&self) -> usize {
        self.current
    }

    /// # Panics
    ///
    /// Panics if `map_num` isn't a map in `proj`.
    pub fn set_current_map(&mut self, proj: &Proj, map_num: usize) {
        assert!(
            map_num < proj.maps.len(),
            "map {} out of range ({} maps)",
            map_num,
            proj.maps.len()
        );
        if map_num != self.current {
            self.selected_ents.clear();
        }
        self.current = map_num;
    }

    /// Step through the maps in order, wrapping at either end.
    pub fn nav_linear(&mut self, proj: &Proj, delta: i32) {
        let n = proj.maps.len() as i64;
        if n == 0 {
            return;
        }
        let next = (self.current as i64 + delta as i64).rem_euclid(n);
        self.set_current_map(proj, next as usize);
    }

    /// Move around the maps as a grid [`WORLD_GRID_W`] wide, wrapping on both axes.
    /// Moves that land past the last map are ignored.
    pub fn nav_2d(&mut self, proj: &Proj, dx: i32, dy: i32) {
        let count = proj.maps.len();
        if count == 0 {
            return;
        }
        let w = WORLD_GRID_W as i64;
        let h = count.div_ceil(WORLD_GRID_W) as i64;
        let x = (self.current as i64 % w + dx as i64).rem_euclid(w);
        let y = (self.current as i64 / w + dy as i64).rem_euclid(h);
        let n = (y * w + x) as usize;
        if n < count {
            self.set_current_map(proj, n);
        }
    }

    pub fn selected_ents(&self) -> &[usize] {
        &self.selected_ents
    }

    pub fn set_selected_ents(&mut self, sel: Vec<usize>) {
        self.selected_ents = sel;
    }

    pub fn is_ent_selected(&self, ent_num: usize) -> bool {
        self.selected_ents.contains(&ent_num)
    }

    fn clamp_to(&mut self, proj: &Proj) {
        let last = proj.maps.len().saturating_sub(1);
        if self.current > last {
            self.current = last;
            self.selected_ents.clear();
        }
    }
}

impl ModelListener for MapPresenter {
    fn maps_inserted(&mut self, proj: &Proj, first: usize, count: usize) {
        if proj.maps.len() == count {
            // There was no current map to follow; show the first new one.
            self.current = first;
            self.selected_ents.clear();
        } else if self.current >= first {
            self.current += count;
        }
    }

    fn maps_removed(&mut self, proj: &Proj, first: usize, count: usize) {
        if self.current >= first + count {
            self.current -= count;
        } else if self.current >= first {
            // The current map itself went away.
            self.current = first.min(proj.maps.len().saturating_sub(1));
            self.selected_ents.clear();
        }
    }

    fn ents_inserted(&mut self, _proj: &Proj, map_num: usize, _first: usize, _count: usize) {
        if map_num == self.current {
            self.selected_ents.clear();
        }
    }

    fn ents_removed(&mut self, _proj: &Proj, map_num: usize, _first: usize, _count: usize) {
        if map_num == self.current {
            self.selected_ents.clear();
        }
    }

    fn nuke(&mut self, proj: &Proj) {
        self.clamp_to(proj);
    }
}
