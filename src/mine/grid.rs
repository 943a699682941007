use crate::mine::prelude::*;

/// The state of a single grid cell. `Filled` is monotonic under normal
/// play — it only reverses via `Map::undo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled,
    Wall,
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Cell::Empty => ' ',
            Cell::Filled => '.',
            Cell::Wall => '#',
        };
        write!(f, "{c}")
    }
}

/// A booster kind, keyed by its single-letter notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Booster {
    /// Extra manipulator.
    B,
    /// Fast wheels.
    F,
    /// Drill.
    L,
    /// Clone spawn pad; immovable, never consumed by pickup.
    X,
    /// Teleport reset beacon stock.
    R,
    /// Cloning stock.
    C,
}

impl Booster {
    pub fn letter(&self) -> char {
        match self {
            Booster::B => 'B',
            Booster::F => 'F',
            Booster::L => 'L',
            Booster::X => 'X',
            Booster::R => 'R',
            Booster::C => 'C',
        }
    }
}

impl std::str::FromStr for Booster {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "B" => Ok(Booster::B),
            "F" => Ok(Booster::F),
            "L" => Ok(Booster::L),
            "X" => Ok(Booster::X),
            "R" => Ok(Booster::R),
            "C" => Ok(Booster::C),
            _ => Err(anyhow!("invalid booster letter {s}, expected one of B F L X R C")),
        }
    }
}

/// A `width * height` grid of cells plus the booster map and the set of
/// reset beacons deployed so far. Owns all positional state the simulator
/// mutates; `Map` wraps this with the wrapper roster and undo backlog.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) boosters: BTreeMap<Point, Booster>,
    pub(crate) resets: BTreeSet<Point>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    #[inline]
    pub(crate) fn index(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    pub fn get(&self, p: Point) -> Option<Cell> {
        if self.in_bounds(p) {
            Some(self.cells[self.index(p)])
        } else {
            None
        }
    }

    pub fn booster_at(&self, p: Point) -> Option<Booster> {
        self.boosters.get(&p).copied()
    }

    pub fn resets(&self) -> impl Iterator<Item = &Point> {
        self.resets.iter()
    }
}
