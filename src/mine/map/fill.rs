use crate::mine::prelude::*;

use super::{Map, UndoEntry};

impl Map {
    /// Wraps the cell under `wrapper_index`'s body, then every cell
    /// visible from the body through a manipulator offset. Only `Empty`
    /// cells transition to `Filled`; a drilled cell that is still `Wall`
    /// is left untouched. When `entry` is `Some`, every flipped cell's
    /// prior value is recorded so `Map::undo` can restore it.
    pub(crate) fn fill(&mut self, wrapper_index: usize, mut entry: Option<&mut UndoEntry>) {
        let body = self.wrappers[wrapper_index].position;
        self.fill_one(body, &mut entry);

        let targets: Vec<Point> = self.wrappers[wrapper_index]
            .manipulators
            .iter()
            .map(|&m| body + m)
            .collect();

        for target in targets {
            if self.is_visible(body, target) {
                self.fill_one(target, &mut entry);
            }
        }
    }

    fn fill_one(&mut self, p: Point, entry: &mut Option<&mut UndoEntry>) {
        if !self.grid.in_bounds(p) {
            return;
        }
        let idx = self.grid.index(p);
        if self.grid.cells[idx] == Cell::Empty {
            if let Some(e) = entry.as_deref_mut() {
                e.updated_cells.push((p, Cell::Empty));
            }
            self.grid.cells[idx] = Cell::Filled;
            self.remaining -= 1;
        }
    }
}
