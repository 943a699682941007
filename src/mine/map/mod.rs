mod fill;
mod indexing;
mod run;
mod serialize;
mod undo;
mod visibility;

use crate::mine::geometry::{bounding_dimensions, fill_polygon};
use crate::mine::prelude::*;

pub use run::RunResult;
pub(crate) use undo::{Action, UndoEntry};

/// The simulator: a grid, a booster map, a reset set, a wrapper roster,
/// and an undo backlog, all owned exclusively — callers are responsible
/// for not sharing a `Map` across threads.
#[derive(Clone, Debug)]
pub struct Map {
    pub(crate) grid: Grid,
    pub(crate) wrappers: Vec<Wrapper>,
    pub(crate) remaining: usize,
    pub(crate) collected_b: u32,
    pub(crate) collected_f: u32,
    pub(crate) collected_l: u32,
    pub(crate) collected_r: u32,
    pub(crate) collected_c: u32,
    pub(crate) num_steps: usize,
    pub(crate) backlog: Vec<UndoEntry>,
}

impl Map {
    /// Builds a new map from a parsed task descriptor: fills the mine
    /// polygon as `Empty` over a `Wall` background, overwrites obstacle
    /// interiors back to `Wall`, seeds the booster map, and performs the
    /// initial `Fill` for wrapper 0.
    pub fn new(desc: &Descriptor) -> Map {
        let (width, height) = bounding_dimensions(&desc.polygon);
        let mut cells = vec![Cell::Wall; width * height];
        fill_polygon(&mut cells, width, height, &desc.polygon, Cell::Empty);
        for obstacle in &desc.obstacles {
            fill_polygon(&mut cells, width, height, obstacle, Cell::Wall);
        }

        let grid = Grid {
            width,
            height,
            cells,
            boosters: desc.boosters.iter().copied().collect(),
            resets: BTreeSet::new(),
        };

        let mut map = Map {
            grid,
            wrappers: vec![Wrapper::new(desc.start)],
            remaining: 0,
            collected_b: 0,
            collected_f: 0,
            collected_l: 0,
            collected_r: 0,
            collected_c: 0,
            num_steps: 0,
            backlog: Vec::new(),
        };
        map.remaining = map.grid.cells.iter().filter(|&&c| c == Cell::Empty).count();
        map.fill(0, None);
        map
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn wrappers(&self) -> &[Wrapper] {
        &self.wrappers
    }

    pub fn in_map(&self, p: Point) -> bool {
        self.grid.in_bounds(p)
    }

    pub fn get_booster(&self, p: Point) -> Option<Booster> {
        self.grid.booster_at(p)
    }

    pub fn collected_b(&self) -> u32 {
        self.collected_b
    }

    pub fn collected_f(&self) -> u32 {
        self.collected_f
    }

    pub fn collected_l(&self) -> u32 {
        self.collected_l
    }

    pub fn collected_r(&self) -> u32 {
        self.collected_r
    }

    pub fn collected_c(&self) -> u32 {
        self.collected_c
    }
}

impl std::ops::Index<Point> for Map {
    type Output = Cell;
    fn index(&self, p: Point) -> &Cell {
        &self.grid.cells[self.grid.index(p)]
    }
}
