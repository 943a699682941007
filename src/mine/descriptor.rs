use regex::Regex;
use std::sync::OnceLock;

use crate::mine::prelude::*;

static POINT_PATTERN: OnceLock<Regex> = OnceLock::new();
static BOOSTER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn point_pattern() -> &'static Regex {
    POINT_PATTERN.get_or_init(|| Regex::new(r"^\((-?\d+),(-?\d+)\)").unwrap())
}

fn booster_pattern() -> &'static Regex {
    BOOSTER_PATTERN.get_or_init(|| Regex::new(r"^([BFLXRC])(\(-?\d+,-?\d+\))$").unwrap())
}

/// Parses a comma-separated list of `(x,y)` vertices into a polygon. An
/// empty string yields an empty polygon. Anchors each vertex match at the
/// front of the remaining text and requires a literal `,` between vertices,
/// so garbage characters anywhere in the section are rejected rather than
/// silently skipped.
fn parse_polygon(s: &str) -> Result<Vec<Point>> {
    if s.is_empty() {
        return Ok(vec![]);
    }
    let mut points = Vec::new();
    let mut rest = s;
    loop {
        let caps = point_pattern()
            .captures(rest)
            .ok_or_else(|| anyhow!("expected a (x,y) vertex at \"{rest}\" in polygon {s}"))?;
        let matched_len = caps[0].len();
        points.push(Point::new(
            caps[1].parse().with_context(|| format!("bad vertex in polygon {s}"))?,
            caps[2].parse().with_context(|| format!("bad vertex in polygon {s}"))?,
        ));
        rest = &rest[matched_len..];
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix(',')
            .ok_or_else(|| anyhow!("expected ',' between vertices at \"{rest}\" in polygon {s}"))?;
    }
    Ok(points)
}

fn parse_obstacles(s: &str) -> Result<Vec<Vec<Point>>> {
    if s.is_empty() {
        return Ok(vec![]);
    }
    s.split(';').map(parse_polygon).collect::<Result<Vec<_>>>()
        .context("malformed obstacles section")
}

fn parse_boosters(s: &str) -> Result<Vec<(Point, Booster)>> {
    if s.is_empty() {
        return Ok(vec![]);
    }
    s.split(';')
        .map(|token| {
            let caps = booster_pattern()
                .captures(token)
                .ok_or_else(|| anyhow!("malformed booster entry {token} in boosters section"))?;
            let kind: Booster = caps[1].parse()?;
            let point: Point = caps[2].parse()?;
            Ok((point, kind))
        })
        .collect::<Result<Vec<_>>>()
        .context("malformed boosters section")
}

/// A parsed task description: the mine polygon, the initial agent
/// position, any obstacle polygons, and the booster placements.
#[derive(Clone, Debug)]
pub struct Descriptor {
    pub polygon: Vec<Point>,
    pub start: Point,
    pub obstacles: Vec<Vec<Point>>,
    pub boosters: Vec<(Point, Booster)>,
}

impl std::str::FromStr for Descriptor {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let sections: Vec<&str> = s.trim().split('#').collect();
        if sections.is_empty() || sections[0].is_empty() {
            return Err(anyhow!("task description is missing a mine polygon section"));
        }

        let polygon = parse_polygon(sections[0]).context("malformed mine polygon section")?;
        if polygon.len() < 3 {
            return Err(anyhow!("mine polygon section needs at least 3 vertices, received {}", polygon.len()));
        }

        let start_section = sections.get(1).copied().unwrap_or("");
        let start = {
            let pts = parse_polygon(start_section).context("malformed initial-position section")?;
            match pts.as_slice() {
                [p] => *p,
                _ => return Err(anyhow!("initial-position section must contain exactly one point, received {start_section}")),
            }
        };

        let obstacles = parse_obstacles(sections.get(2).copied().unwrap_or(""))?;
        let boosters = parse_boosters(sections.get(3).copied().unwrap_or(""))?;

        Ok(Descriptor { polygon, start, obstacles, boosters })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_descriptor() {
        let d: Descriptor = "(0,0),(3,0),(3,3),(0,3)#(0,0)##".parse().unwrap();
        assert_eq!(d.polygon.len(), 4);
        assert_eq!(d.start, Point::new(0, 0));
        assert!(d.obstacles.is_empty());
        assert!(d.boosters.is_empty());
    }

    #[test]
    fn parses_obstacles_and_boosters() {
        let text = "(0,0),(5,0),(5,5),(0,5)#(1,1)#(2,2),(3,2),(3,3),(2,3)#B(3,0);X(4,4)";
        let d: Descriptor = text.parse().unwrap();
        assert_eq!(d.obstacles.len(), 1);
        assert_eq!(d.boosters, vec![(Point::new(3, 0), Booster::B), (Point::new(4, 4), Booster::X)]);
    }

    #[test]
    fn rejects_polygon_with_too_few_vertices() {
        let err = "(0,0),(1,0)#(0,0)##".parse::<Descriptor>().unwrap_err();
        assert!(err.to_string().contains("at least 3 vertices"));
    }

    #[test]
    fn rejects_malformed_booster_letter() {
        let err = "(0,0),(3,0),(3,3),(0,3)#(0,0)##Z(1,1)".parse::<Descriptor>().unwrap_err();
        assert!(format!("{err:#}").contains("boosters section"));
    }

    #[test]
    fn rejects_garbage_between_vertices() {
        let err = "junk(0,0)(3,0)garbage(3,3),(0,3)#(0,0)##".parse::<Descriptor>().unwrap_err();
        assert!(format!("{err:#}").contains("mine polygon section"));
    }
}
