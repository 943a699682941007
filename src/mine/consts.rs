/// Number of turns a fast-wheels activation remains in effect, counting the
/// activation turn itself. Set on `F`; `Map::run` decrements it once per
/// turn, so 50 turns of double-stepping follow the turn `F` was issued.
pub const FAST_WHEELS_TURNS: u32 = 51;

/// Number of turns a drill activation remains in effect, counting the
/// activation turn itself. Set on `L`.
pub const DRILL_TURNS: u32 = 31;

/// Default manipulator offsets every wrapper starts (and resets, on `C`) with.
pub const DEFAULT_MANIPULATORS: [(i32, i32); 3] = [(1, -1), (1, 0), (1, 1)];
