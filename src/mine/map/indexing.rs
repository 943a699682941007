use crate::mine::prelude::*;

use super::Map;

impl Map {
    /// Checked cell lookup; `None` when `p` is out of bounds.
    pub fn cell(&self, p: Point) -> Option<Cell> {
        self.grid.get(p)
    }

    pub(crate) fn cell_unchecked(&self, p: Point) -> Cell {
        self.grid.cells[self.grid.index(p)]
    }

    pub(crate) fn set_cell_unchecked(&mut self, p: Point, value: Cell) {
        let idx = self.grid.index(p);
        self.grid.cells[idx] = value;
    }
}
