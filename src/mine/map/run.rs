use crate::mine::prelude::*;

use super::{Action, Map, UndoEntry};

/// The outcome of `Map::run`/`Map::dry_run`. A plain value, not wrapped in
/// `Result` — in-game rule violations are frequent and expected, not
/// exceptional, so callers match on this directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunResult {
    Success,
    NoWrapper,
    OutOfMap,
    Wall,
    NoBooster,
    BadManipulatorPosition,
    BadTeleportPosition,
    UnknownTeleportPosition,
    BadClonePosition,
    UnknownInstruction,
}

impl Map {
    /// Executes one instruction for one agent. Commits the agent's
    /// deferred booster pickup first, dispatches the instruction, then
    /// decrements the drill/fast timers. On anything but `Success` the
    /// map is left exactly as it was before the call, including the
    /// booster commit.
    pub fn run(&mut self, agent_idx: usize, instruction: Instruction) -> RunResult {
        if agent_idx >= self.wrappers.len() {
            return RunResult::NoWrapper;
        }

        let pre_drill_count = self.wrappers[agent_idx].drill_count;
        let pre_fast_count = self.wrappers[agent_idx].fast_count;
        let pre_pending_booster = self.wrappers[agent_idx].pending_booster;

        if let Some(b) = pre_pending_booster {
            self.add_collected(b, 1);
            self.wrappers[agent_idx].pending_booster = None;
        }

        let mut entry = UndoEntry::new(agent_idx, pre_drill_count, pre_fast_count, pre_pending_booster);
        let result = self.dispatch(agent_idx, instruction, &mut entry);

        if result != RunResult::Success {
            if let Some(b) = pre_pending_booster {
                self.add_collected(b, -1);
                self.wrappers[agent_idx].pending_booster = pre_pending_booster;
            }
            return result;
        }

        let w = &mut self.wrappers[agent_idx];
        if w.fast_count > 0 {
            w.fast_count -= 1;
        }
        if w.drill_count > 0 {
            w.drill_count -= 1;
        }

        self.num_steps += 1;
        self.backlog.push(entry);
        result
    }

    /// The pure check of what `run` would do, without mutating state.
    /// Implemented as a scratch clone rather than mutate-then-undo, since
    /// this is a read-only query in the public API.
    pub fn dry_run(&self, agent_idx: usize, instruction: Instruction) -> RunResult {
        self.clone().run(agent_idx, instruction)
    }

    pub(crate) fn add_collected(&mut self, booster: Booster, delta: i32) {
        let field = match booster {
            Booster::B => &mut self.collected_b,
            Booster::F => &mut self.collected_f,
            Booster::L => &mut self.collected_l,
            Booster::R => &mut self.collected_r,
            Booster::C => &mut self.collected_c,
            Booster::X => return,
        };
        *field = (*field as i32 + delta) as u32;
    }

    fn dispatch(&mut self, agent_idx: usize, instruction: Instruction, entry: &mut UndoEntry) -> RunResult {
        match instruction.kind {
            InstructionType::W => self.run_move(agent_idx, Point::new(0, 1), entry),
            InstructionType::S => self.run_move(agent_idx, Point::new(0, -1), entry),
            InstructionType::A => self.run_move(agent_idx, Point::new(-1, 0), entry),
            InstructionType::D => self.run_move(agent_idx, Point::new(1, 0), entry),
            InstructionType::Q => {
                entry.action = Action::RotateCounterClockwise;
                self.wrappers[agent_idx].rotate_counter_clockwise();
                self.fill(agent_idx, Some(entry));
                RunResult::Success
            }
            InstructionType::E => {
                entry.action = Action::RotateClockwise;
                self.wrappers[agent_idx].rotate_clockwise();
                self.fill(agent_idx, Some(entry));
                RunResult::Success
            }
            InstructionType::Z => {
                entry.action = Action::Noop;
                RunResult::Success
            }
            InstructionType::B => self.run_extend(agent_idx, instruction.arg, entry),
            InstructionType::F => self.run_activate_fast(agent_idx, entry),
            InstructionType::L => self.run_activate_drill(agent_idx, entry),
            InstructionType::R => self.run_place_reset(agent_idx, entry),
            InstructionType::T => self.run_teleport(agent_idx, instruction.arg, entry),
            InstructionType::C => self.run_clone(agent_idx, entry),
        }
    }

    fn run_move(&mut self, agent_idx: usize, offset: Point, entry: &mut UndoEntry) -> RunResult {
        if let Err(result) = self.move_substep(agent_idx, offset, entry, true) {
            return result;
        }

        let mut double = false;
        if self.wrappers[agent_idx].fast_count > 0 && self.move_substep(agent_idx, offset, entry, false).is_ok() {
            double = true;
        }

        entry.action = Action::Move { offset, double };
        RunResult::Success
    }

    fn move_substep(&mut self, agent_idx: usize, offset: Point, entry: &mut UndoEntry, first: bool) -> std::result::Result<(), RunResult> {
        let target = self.wrappers[agent_idx].position + offset;
        if !self.grid.in_bounds(target) {
            return Err(RunResult::OutOfMap);
        }
        let drill_active = self.wrappers[agent_idx].drill_count > 0;
        if !drill_active && self.cell_unchecked(target) == Cell::Wall {
            return Err(RunResult::Wall);
        }

        self.wrappers[agent_idx].position = target;
        self.fill(agent_idx, Some(entry));

        if let Some(booster) = self.grid.booster_at(target) {
            if booster != Booster::X {
                self.grid.boosters.remove(&target);
                self.wrappers[agent_idx].pending_booster = Some(booster);
                if first {
                    entry.first_pickup = Some(booster);
                } else {
                    entry.second_pickup = Some(booster);
                }
            }
        }
        Ok(())
    }

    fn run_extend(&mut self, agent_idx: usize, arg: Option<Point>, entry: &mut UndoEntry) -> RunResult {
        let Some(p) = arg else {
            return RunResult::BadManipulatorPosition;
        };
        if self.collected_b == 0 {
            return RunResult::NoBooster;
        }
        if !self.wrappers[agent_idx].can_extend_to(p) {
            return RunResult::BadManipulatorPosition;
        }
        self.collected_b -= 1;
        self.wrappers[agent_idx].add_manipulator(p);
        entry.action = Action::ExtendManipulator;
        self.fill(agent_idx, Some(entry));
        RunResult::Success
    }

    fn run_activate_fast(&mut self, agent_idx: usize, entry: &mut UndoEntry) -> RunResult {
        if self.collected_f == 0 {
            return RunResult::NoBooster;
        }
        self.collected_f -= 1;
        self.wrappers[agent_idx].fast_count = FAST_WHEELS_TURNS;
        entry.action = Action::ActivateFast;
        RunResult::Success
    }

    fn run_activate_drill(&mut self, agent_idx: usize, entry: &mut UndoEntry) -> RunResult {
        if self.collected_l == 0 {
            return RunResult::NoBooster;
        }
        self.collected_l -= 1;
        self.wrappers[agent_idx].drill_count = DRILL_TURNS;
        entry.action = Action::ActivateDrill;
        RunResult::Success
    }

    fn run_place_reset(&mut self, agent_idx: usize, entry: &mut UndoEntry) -> RunResult {
        if self.collected_r == 0 {
            return RunResult::NoBooster;
        }
        let p = self.wrappers[agent_idx].position;
        if self.grid.resets.contains(&p) || matches!(self.grid.booster_at(p), Some(Booster::X)) {
            return RunResult::BadTeleportPosition;
        }
        self.collected_r -= 1;
        self.grid.resets.insert(p);
        entry.action = Action::PlaceReset;
        RunResult::Success
    }

    fn run_teleport(&mut self, agent_idx: usize, arg: Option<Point>, entry: &mut UndoEntry) -> RunResult {
        let Some(p) = arg else {
            return RunResult::UnknownTeleportPosition;
        };
        if !self.grid.resets.contains(&p) {
            return RunResult::UnknownTeleportPosition;
        }
        entry.teleport_origin = Some(self.wrappers[agent_idx].position);
        entry.action = Action::Teleport;
        self.wrappers[agent_idx].position = p;
        self.fill(agent_idx, Some(entry));
        RunResult::Success
    }

    fn run_clone(&mut self, agent_idx: usize, entry: &mut UndoEntry) -> RunResult {
        if self.collected_c == 0 {
            return RunResult::NoBooster;
        }
        let p = self.wrappers[agent_idx].position;
        if !matches!(self.grid.booster_at(p), Some(Booster::X)) {
            return RunResult::BadClonePosition;
        }
        self.collected_c -= 1;
        self.wrappers.push(Wrapper::new(p));
        entry.action = Action::Clone;
        RunResult::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::descriptor::Descriptor;
    use crate::mine::instruction::Instruction;

    fn map_3x3() -> Map {
        let desc: Descriptor = "(0,0),(3,0),(3,3),(0,3)#(0,0)##".parse().unwrap();
        Map::new(&desc)
    }

    #[test]
    fn initial_remaining_matches_minimal_scenario() {
        let m = map_3x3();
        assert_eq!(m.remaining(), 6);
    }

    #[test]
    fn rotation_without_new_visible_cells_leaves_remaining_unchanged() {
        let mut m = map_3x3();
        let before = m.remaining();
        assert_eq!(m.run(0, Instruction::new(InstructionType::E)), RunResult::Success);
        assert_eq!(m.run(0, Instruction::new(InstructionType::E)), RunResult::Success);
        assert_eq!(m.wrappers()[0].manipulators(), &[Point::new(-1, 1), Point::new(-1, 0), Point::new(-1, -1)]);
        assert_eq!(m.remaining(), before);
    }

    #[test]
    fn move_out_of_bounds_fails_and_does_not_mutate() {
        let mut m = map_3x3();
        let before = m.remaining();
        assert_eq!(m.run(0, Instruction::new(InstructionType::A)), RunResult::OutOfMap);
        assert_eq!(m.remaining(), before);
        assert_eq!(m.wrappers()[0].position(), Point::new(0, 0));
    }

    #[test]
    fn unknown_wrapper_index_fails() {
        let mut m = map_3x3();
        assert_eq!(m.run(5, Instruction::new(InstructionType::Z)), RunResult::NoWrapper);
    }

    #[test]
    fn booster_pickup_is_deferred_to_the_next_step() {
        let desc: Descriptor = "(0,0),(5,0),(5,1),(0,1)#(0,0)##B(3,0)".parse().unwrap();
        let mut m = Map::new(&desc);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.wrappers()[0].pending_booster(), Some(Booster::B));
        assert_eq!(m.collected_b(), 0);

        let target = Point::new(1, 2);
        assert_eq!(m.run(0, Instruction::with_point(InstructionType::B, target)), RunResult::Success);
        assert_eq!(m.collected_b(), 0);
        assert!(m.wrappers()[0].manipulators().contains(&target));
    }

    #[test]
    fn fast_wheels_double_step_after_activation_turn() {
        let desc: Descriptor = "(0,0),(10,0),(10,1),(0,1)#(0,0)##F(1,0)".parse().unwrap();
        let mut m = Map::new(&desc);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.wrappers()[0].pending_booster(), Some(Booster::F));
        assert_eq!(m.run(0, Instruction::new(InstructionType::Z)), RunResult::Success);
        assert_eq!(m.collected_f(), 1);
        assert_eq!(m.run(0, Instruction::new(InstructionType::F)), RunResult::Success);
        assert_eq!(m.collected_f(), 0);
        assert_eq!(m.wrappers()[0].fast_count(), 50);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.wrappers()[0].position(), Point::new(3, 0));
        assert_eq!(m.wrappers()[0].fast_count(), 49);
    }

    #[test]
    fn run_then_undo_restores_position_and_remaining() {
        let mut m = map_3x3();
        let remaining_before = m.remaining();
        let pos_before = m.wrappers()[0].position();
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_ne!(m.remaining(), remaining_before);
        m.undo();
        assert_eq!(m.remaining(), remaining_before);
        assert_eq!(m.wrappers()[0].position(), pos_before);
        assert_eq!(m.num_steps(), 0);
    }

    #[test]
    fn dry_run_never_mutates() {
        let m = map_3x3();
        let before = m.remaining();
        let result = m.dry_run(0, Instruction::new(InstructionType::D));
        assert_eq!(result, RunResult::Success);
        assert_eq!(m.remaining(), before);
    }

    #[test]
    fn clone_adds_a_wrapper_and_undo_removes_it() {
        let desc: Descriptor = "(0,0),(3,0),(3,1),(0,1)#(0,0)##X(1,0);C(2,0)".parse().unwrap();
        let mut m = Map::new(&desc);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.run(0, Instruction::new(InstructionType::D)), RunResult::Success);
        assert_eq!(m.wrappers()[0].pending_booster(), Some(Booster::C));
        assert_eq!(m.run(0, Instruction::new(InstructionType::Z)), RunResult::Success);
        assert_eq!(m.collected_c(), 1);
        assert_eq!(m.run(0, Instruction::new(InstructionType::A)), RunResult::Success);
        assert_eq!(m.run(0, Instruction::new(InstructionType::C)), RunResult::Success);
        assert_eq!(m.wrappers().len(), 2);
        m.undo();
        assert_eq!(m.wrappers().len(), 1);
        assert_eq!(m.collected_c(), 1);
    }
}
