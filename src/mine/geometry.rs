use crate::mine::prelude::*;

/// An integer grid coordinate with a total order (lexicographic, x then
/// y), so it can key a `BTreeMap`/`BTreeSet`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl std::str::FromStr for Point {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let inner = s
            .strip_prefix('(')
            .and_then(|v| v.strip_suffix(')'))
            .ok_or_else(|| anyhow!("expected a parenthesised point, received {s}"))?;
        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| anyhow!("expected <x>,<y> inside point, received {s}"))?;
        Ok(Point {
            x: x.trim().parse().with_context(|| format!("bad x coordinate in point {s}"))?,
            y: y.trim().parse().with_context(|| format!("bad y coordinate in point {s}"))?,
        })
    }
}

impl Add<Point> for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<&Point> for Point {
    type Output = Point;
    fn add(self, rhs: &Point) -> Point {
        self + *rhs
    }
}

impl Sub<Point> for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<&Point> for Point {
    type Output = Point;
    fn sub(self, rhs: &Point) -> Point {
        self - *rhs
    }
}

/// Fills the interior of `polygon` into `cells` (a flat, row-major `width *
/// height` grid) with `value`, using a horizontal scanline over the
/// polygon's vertical edges.
///
/// For each row `y`, collects the x-coordinates of vertical edges whose
/// span `[min(y1, y2), max(y1, y2))` contains `y`, sorts them, and fills
/// `[x_even, x_odd)` pairs. Exact for axis-aligned (orthogonal) polygons.
pub fn fill_polygon(cells: &mut [Cell], width: usize, height: usize, polygon: &[Point], value: Cell) {
    if polygon.len() < 2 {
        return;
    }

    let mut bars = Vec::new();
    for y in 0..height as i32 {
        bars.clear();
        for i in 0..polygon.len() {
            let p1 = polygon[i];
            let p2 = polygon[(i + 1) % polygon.len()];
            if p1.x != p2.x {
                continue;
            }
            let (lo, hi) = (p1.y.min(p2.y), p1.y.max(p2.y));
            if lo <= y && y < hi {
                bars.push(p1.x);
            }
        }
        bars.sort_unstable();
        for pair in bars.chunks_exact(2) {
            let (x0, x1) = (pair[0], pair[1]);
            for x in x0..x1 {
                if x >= 0 && (x as usize) < width {
                    cells[y as usize * width + x as usize] = value;
                }
            }
        }
    }
}

/// Derives the grid dimensions from the maximum x/y coordinate of the mine
/// polygon's vertices.
pub fn bounding_dimensions(polygon: &[Point]) -> (usize, usize) {
    let width = polygon.iter().map(|p| p.x).max().unwrap_or(0).max(0) as usize;
    let height = polygon.iter().map(|p| p.y).max().unwrap_or(0).max(0) as usize;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::grid::Cell;

    #[test]
    fn point_roundtrips_through_display_and_parse() {
        let p = Point::new(-3, 7);
        let s = p.to_string();
        assert_eq!(s, "(-3,7)");
        assert_eq!(s.parse::<Point>().unwrap(), p);
    }

    #[test]
    fn point_rejects_malformed_input() {
        assert!("3,4".parse::<Point>().is_err());
        assert!("(3,4".parse::<Point>().is_err());
        assert!("(x,4)".parse::<Point>().is_err());
    }

    #[test]
    fn fills_a_3x3_square() {
        let polygon = [
            Point::new(0, 0),
            Point::new(3, 0),
            Point::new(3, 3),
            Point::new(0, 3),
        ];
        let (w, h) = bounding_dimensions(&polygon);
        assert_eq!((w, h), (3, 3));
        let mut cells = vec![Cell::Wall; w * h];
        fill_polygon(&mut cells, w, h, &polygon, Cell::Empty);
        assert!(cells.iter().all(|&c| c == Cell::Empty));
    }

    #[test]
    fn obstacle_overwrites_mine_interior() {
        let polygon = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        let obstacle = [
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(1, 2),
        ];
        let (w, h) = bounding_dimensions(&polygon);
        let mut cells = vec![Cell::Wall; w * h];
        fill_polygon(&mut cells, w, h, &polygon, Cell::Empty);
        fill_polygon(&mut cells, w, h, &obstacle, Cell::Wall);
        assert_eq!(cells[1 * w + 1], Cell::Wall);
        assert_eq!(cells[0 * w + 0], Cell::Empty);
    }
}
