use crate::mine::prelude::*;

use super::Map;

impl Map {
    /// Whether the straight segment from `origin` to `target` (cell
    /// centers) crosses only non-wall, in-bounds cells. The origin cell
    /// always counts as visible. Uses exact rational arithmetic so that
    /// segments grazing a cell corner don't depend on floating-point
    /// rounding.
    pub fn is_visible(&self, origin: Point, target: Point) -> bool {
        let mut touched = Vec::new();

        if origin.x == target.x {
            let (lo, hi) = (origin.y.min(target.y), origin.y.max(target.y));
            for y in lo..=hi {
                touched.push(Point::new(origin.x, y));
            }
        } else {
            let (s, g) = if origin.x <= target.x { (origin, target) } else { (target, origin) };
            let grad = Rational::new((g.y - s.y) as i64, (g.x - s.x) as i64);

            for x in s.x..=g.x {
                let left = Rational::whole(s.x as i64).max(Rational::whole(x as i64) - Rational::new(1, 2));
                let right = Rational::whole(g.x as i64).min(Rational::whole(x as i64) + Rational::new(1, 2));

                let left_y = Rational::whole(s.y as i64) + (left - Rational::whole(s.x as i64)) * grad + Rational::new(1, 2);
                let right_y = Rational::whole(s.y as i64) + (right - Rational::whole(s.x as i64)) * grad + Rational::new(1, 2);

                let lo = left_y.floor().min(right_y.floor());
                let hi = left_y.ceil().max(right_y.ceil());
                for y in lo..hi {
                    touched.push(Point::new(x, y as i32));
                }
            }
        }

        for p in touched {
            match self.grid.get(p) {
                None => return false,
                Some(Cell::Wall) => return false,
                Some(_) => {}
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::descriptor::Descriptor;

    fn open_map() -> Map {
        let desc: Descriptor = "(0,0),(6,0),(6,6),(0,6)#(0,0)##".parse().unwrap();
        Map::new(&desc)
    }

    #[test]
    fn origin_is_always_visible() {
        let m = open_map();
        assert!(m.is_visible(Point::new(2, 2), Point::new(2, 2)));
    }

    #[test]
    fn visibility_is_symmetric() {
        let m = open_map();
        for &(ox, oy, tx, ty) in &[(0, 0, 3, 4), (1, 5, 5, 1), (2, 2, 2, 2)] {
            let o = Point::new(ox, oy);
            let t = Point::new(tx, ty);
            assert_eq!(m.is_visible(o, t), m.is_visible(t, o));
        }
    }

    #[test]
    fn wall_blocks_visibility() {
        let desc: Descriptor = "(0,0),(5,0),(5,5),(0,5)#(0,0)#(2,0),(3,0),(3,5),(2,5)#".parse().unwrap();
        let m = Map::new(&desc);
        assert!(!m.is_visible(Point::new(0, 2), Point::new(4, 2)));
    }

    #[test]
    fn out_of_bounds_target_is_not_visible() {
        let m = open_map();
        assert!(!m.is_visible(Point::new(0, 0), Point::new(-1, -1)));
    }
}
