use itertools::Itertools;

use crate::mine::prelude::*;

use super::Map;

impl Map {
    /// Debug grid rendering: rows printed top-down (`y` descending),
    /// `#` wall, ` ` empty, `.` wrapped, booster letters (upper-case over
    /// empty/wall, lower-case once wrapped), `%` wrapper body, `&`
    /// manipulator reach.
    fn render(&self) -> String {
        let width = self.grid.width();
        let height = self.grid.height();
        let mut rows: Vec<Vec<char>> = (0..height)
            .map(|y| (0..width).map(|x| self.cell_unchecked(Point::new(x as i32, y as i32)).to_string().chars().next().unwrap()).collect())
            .collect();

        for (&p, booster) in self.grid.boosters.iter() {
            let row = &mut rows[p.y as usize];
            let wrapped = row[p.x as usize] == '.';
            let letter = booster.letter();
            row[p.x as usize] = if wrapped { letter.to_ascii_lowercase() } else { letter };
        }

        for wrapper in &self.wrappers {
            let body = wrapper.position();
            if self.grid.in_bounds(body) {
                rows[body.y as usize][body.x as usize] = '%';
            }
            for &m in wrapper.manipulators() {
                let p = body + m;
                if !self.grid.in_bounds(p) {
                    continue;
                }
                let c = rows[p.y as usize][p.x as usize];
                if c == ' ' || c == '.' {
                    rows[p.y as usize][p.x as usize] = '&';
                }
            }
        }

        rows.into_iter().rev().map(|row| row.into_iter().collect::<String>()).join("\n")
    }
}

impl std::fmt::Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::descriptor::Descriptor;

    #[test]
    fn renders_wrapper_body_and_walls() {
        let desc: Descriptor = "(0,0),(3,0),(3,3),(0,3)#(0,0)##".parse().unwrap();
        let m = Map::new(&desc);
        let rendered = m.to_string();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].chars().next(), Some('%'));
    }

    #[test]
    fn uppercase_booster_lowercases_once_wrapped() {
        let desc: Descriptor = "(0,0),(5,0),(5,1),(0,1)#(0,0)##B(4,0)".parse().unwrap();
        let m = Map::new(&desc);
        let rendered = m.to_string();
        assert!(rendered.contains('B'));
    }
}
