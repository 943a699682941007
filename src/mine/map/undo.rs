use crate::mine::prelude::*;

use super::Map;

/// Discriminates the kind of move a `Map::run` step performed, carrying
/// just enough to reverse it. `Move` folds the single/double-step cases
/// into one variant with a `double` flag instead of separate tags per
/// direction, since the offset already determines the direction.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Action {
    Move { offset: Point, double: bool },
    RotateClockwise,
    RotateCounterClockwise,
    Noop,
    ExtendManipulator,
    ActivateFast,
    ActivateDrill,
    PlaceReset,
    Teleport,
    Clone,
}

/// Enough state to reverse one `Map::run` call.
#[derive(Clone, Debug)]
pub(crate) struct UndoEntry {
    pub(crate) wrapper_index: usize,
    pub(crate) pre_drill_count: u32,
    pub(crate) pre_fast_count: u32,
    pub(crate) pre_pending_booster: Option<Booster>,
    pub(crate) action: Action,
    pub(crate) teleport_origin: Option<Point>,
    pub(crate) first_pickup: Option<Booster>,
    pub(crate) second_pickup: Option<Booster>,
    pub(crate) updated_cells: Vec<(Point, Cell)>,
}

impl UndoEntry {
    pub(crate) fn new(wrapper_index: usize, pre_drill_count: u32, pre_fast_count: u32, pre_pending_booster: Option<Booster>) -> UndoEntry {
        UndoEntry {
            wrapper_index,
            pre_drill_count,
            pre_fast_count,
            pre_pending_booster,
            action: Action::Noop,
            teleport_origin: None,
            first_pickup: None,
            second_pickup: None,
            updated_cells: Vec::new(),
        }
    }
}

impl Map {
    /// Pops the tail backlog entry and reverses it: restores filled
    /// cells, reverses the action itself, reverts the deferred booster
    /// commit, restores the drill/fast counters, and decrements the step
    /// counter. Panics if the backlog is empty — calling `undo` with
    /// nothing to undo is a caller bug, not a recoverable condition.
    pub fn undo(&mut self) {
        let entry = self.backlog.pop().expect("undo called with an empty backlog");
        let idx = entry.wrapper_index;

        for &(p, prior) in entry.updated_cells.iter().rev() {
            self.set_cell_unchecked(p, prior);
            if prior == Cell::Empty {
                self.remaining += 1;
            }
        }

        match entry.action {
            Action::Move { offset, double } => {
                if double {
                    if let Some(b) = entry.second_pickup {
                        let p = self.wrappers[idx].position;
                        self.grid.boosters.insert(p, b);
                    }
                    self.wrappers[idx].position = self.wrappers[idx].position - offset;
                }
                if let Some(b) = entry.first_pickup {
                    let p = self.wrappers[idx].position;
                    self.grid.boosters.insert(p, b);
                }
                self.wrappers[idx].position = self.wrappers[idx].position - offset;
            }
            Action::RotateClockwise => self.wrappers[idx].rotate_counter_clockwise(),
            Action::RotateCounterClockwise => self.wrappers[idx].rotate_clockwise(),
            Action::Noop => {}
            Action::ExtendManipulator => {
                self.wrappers[idx].remove_manipulator();
                self.collected_b += 1;
            }
            Action::ActivateFast => self.collected_f += 1,
            Action::ActivateDrill => self.collected_l += 1,
            Action::PlaceReset => {
                let p = self.wrappers[idx].position;
                self.grid.resets.remove(&p);
                self.collected_r += 1;
            }
            Action::Teleport => {
                self.wrappers[idx].position = entry.teleport_origin.expect("teleport undo entry missing origin");
            }
            Action::Clone => {
                self.wrappers.pop();
                self.collected_c += 1;
            }
        }

        if let Some(b) = entry.pre_pending_booster {
            self.add_collected(b, -1);
        }
        self.wrappers[idx].pending_booster = entry.pre_pending_booster;

        self.wrappers[idx].drill_count = entry.pre_drill_count;
        self.wrappers[idx].fast_count = entry.pre_fast_count;

        self.num_steps -= 1;
    }
}
