//! Region outlines parsed from their geometry descriptors.
//!
//! Only the absolute `M`, `L` and `Z` path commands are understood. Anything
//! else ends the current ring; a descriptor with no usable ring yields an
//! empty outline and the region is drawn as a label only.

use earcutr::earcut;
use region_atlas::data::{total_facilities, Point, RegionStore};

/// Drawable outline of one region.
#[derive(Debug, Clone)]
pub struct RegionOutline {
    pub id: String,
    pub name: String,
    pub center: Point,
    pub facility_count: usize,
    /// Closed polygons in world coordinates.
    pub rings: Vec<Vec<Point>>,
    /// Fill triangles in world coordinates, even-odd over `rings`.
    pub fill: Vec<[Point; 3]>,
}

impl RegionOutline {
    /// Even-odd hit test over all rings.
    pub fn contains(&self, p: Point) -> bool {
        self.rings
            .iter()
            .filter(|ring| point_in_ring(p, ring))
            .count()
            % 2
            == 1
    }
}

/// Outlines for every region in the store, in store order.
pub fn outlines_from_store(store: &RegionStore) -> Vec<RegionOutline> {
    let outlines: Vec<RegionOutline> = store
        .iter()
        .map(|region| {
            let rings = region
                .geometry
                .as_deref()
                .map(parse_path)
                .unwrap_or_default();
            RegionOutline {
                id: region.id.clone(),
                name: region.name.clone(),
                center: region.center,
                facility_count: total_facilities(region),
                fill: triangulate(&rings),
                rings,
            }
        })
        .collect();

    let missing = outlines.iter().filter(|o| o.rings.is_empty()).count();
    if missing > 0 {
        log::warn!("{} region(s) have no drawable outline", missing);
    }
    outlines
}

/// Parses the absolute `M x,y L x,y ... Z` subset into rings.
pub fn parse_path(d: &str) -> Vec<Vec<Point>> {
    let mut rings = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut numbers: Vec<f64> = Vec::new();
    let mut command = None;

    let flush_numbers = |command: Option<char>, numbers: &mut Vec<f64>, ring: &mut Vec<Point>| {
        if matches!(command, Some('M') | Some('L')) {
            for pair in numbers.chunks_exact(2) {
                ring.push(Point {
                    x: pair[0],
                    y: pair[1],
                });
            }
        }
        numbers.clear();
    };

    for token in tokenize(d) {
        match token {
            Token::Command(c) => {
                flush_numbers(command, &mut numbers, &mut current);
                if c != 'L' {
                    finish_ring(&mut current, &mut rings);
                }
                command = Some(c);
            }
            Token::Number(n) => numbers.push(n),
        }
    }
    flush_numbers(command, &mut numbers, &mut current);
    finish_ring(&mut current, &mut rings);

    rings
}

fn finish_ring(ring: &mut Vec<Point>, rings: &mut Vec<Vec<Point>>) {
    if ring.len() >= 3 {
        rings.push(std::mem::take(ring));
    } else {
        ring.clear();
    }
}

enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(d: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    let push_number = |number: &mut String, tokens: &mut Vec<Token>| {
        if !number.is_empty() {
            if let Ok(n) = number.parse::<f64>() {
                tokens.push(Token::Number(n));
            }
            number.clear();
        }
    };

    for ch in d.chars() {
        match ch {
            '0'..='9' | '.' | 'e' => number.push(ch),
            '-' | '+' => {
                // A sign starts a new number unless it follows an exponent.
                if !number.ends_with('e') {
                    push_number(&mut number, &mut tokens);
                }
                number.push(ch);
            }
            c if c.is_ascii_alphabetic() => {
                push_number(&mut number, &mut tokens);
                tokens.push(Token::Command(c));
            }
            _ => push_number(&mut number, &mut tokens),
        }
    }
    push_number(&mut number, &mut tokens);
    tokens
}

/// Triangulates rings under the even-odd rule.
///
/// A ring nested inside an odd number of other rings is a hole of the
/// innermost even-depth ring that contains it.
pub fn triangulate(rings: &[Vec<Point>]) -> Vec<[Point; 3]> {
    let depth = |i: usize| -> usize {
        let Some(probe) = rings[i].first() else {
            return 0;
        };
        rings
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && point_in_ring(*probe, other))
            .count()
    };
    let depths: Vec<usize> = (0..rings.len()).map(depth).collect();

    let mut triangles = Vec::new();
    for (outer, ring) in rings.iter().enumerate() {
        if depths[outer] % 2 == 1 || ring.len() < 3 {
            continue;
        }

        let mut vertices: Vec<Point> = ring.clone();
        let mut hole_indices = Vec::new();
        for (hole, candidate) in rings.iter().enumerate() {
            let is_direct_hole = depths[hole] == depths[outer] + 1
                && candidate
                    .first()
                    .is_some_and(|p| point_in_ring(*p, ring));
            if is_direct_hole && candidate.len() >= 3 {
                hole_indices.push(vertices.len());
                vertices.extend_from_slice(candidate);
            }
        }

        let coords: Vec<f64> = vertices.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = match earcut(&coords, &hole_indices, 2) {
            Ok(indices) => indices,
            Err(e) => {
                log::warn!("Failed to triangulate outline ring: {:?}", e);
                continue;
            }
        };
        triangles.extend(
            indices
                .chunks_exact(3)
                .map(|t| [vertices[t[0]], vertices[t[1]], vertices[t[2]]]),
        );
    }
    triangles
}

fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> RegionOutline {
        let rings = parse_path("M0,0 L10,0 L10,10 L0,10 Z");
        RegionOutline {
            id: "01".into(),
            name: "Square".into(),
            center: Point { x: 5.0, y: 5.0 },
            facility_count: 0,
            fill: triangulate(&rings),
            rings,
        }
    }

    fn area(triangles: &[[Point; 3]]) -> f64 {
        triangles
            .iter()
            .map(|[a, b, c]| {
                let cross = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
                cross.abs() / 2.0
            })
            .sum()
    }

    fn centroid([a, b, c]: &[Point; 3]) -> Point {
        Point {
            x: (a.x + b.x + c.x) / 3.0,
            y: (a.y + b.y + c.y) / 3.0,
        }
    }

    #[test]
    fn test_concave_ring_fill_stays_inside() {
        // L shape: the notch at the top right must stay unfilled.
        let rings = parse_path("M0,0 L10,0 L10,4 L4,4 L4,10 L0,10 Z");
        let fill = triangulate(&rings);
        assert_eq!(fill.len(), 4);
        assert!((area(&fill) - 64.0).abs() < 1e-9);
        for t in &fill {
            assert!(point_in_ring(centroid(t), &rings[0]));
        }
    }

    #[test]
    fn test_nested_ring_is_a_hole() {
        let rings = parse_path("M0,0 L10,0 L10,10 L0,10 Z M3,3 L7,3 L7,7 L3,7 Z");
        let fill = triangulate(&rings);
        assert!((area(&fill) - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_separate_rings_both_filled() {
        let rings = parse_path("M0,0 L2,0 L2,2 L0,2 Z M5,5 L8,5 L8,8 L5,8 Z");
        assert!((area(&triangulate(&rings)) - 13.0).abs() < 1e-9);
        assert!(triangulate(&[]).is_empty());
    }

    #[test]
    fn test_parse_single_ring() {
        let rings = parse_path("M 0,0 L 10,0 L 10,10 Z");
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
        assert_eq!(rings[0][1], Point { x: 10.0, y: 0.0 });
    }

    #[test]
    fn test_parse_multiple_rings_and_implicit_lineto() {
        let rings = parse_path("M0,0 10,0 10,10Z M20,20 L30,20 L30,30 L20,30Z");
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 3);
        assert_eq!(rings[1].len(), 4);
    }

    #[test]
    fn test_parse_negative_and_compact_numbers() {
        let rings = parse_path("M-5-5L5-5L5,5Z");
        assert_eq!(rings[0][0], Point { x: -5.0, y: -5.0 });
        assert_eq!(rings[0][1], Point { x: 5.0, y: -5.0 });
    }

    #[test]
    fn test_unsupported_commands_drop_ring() {
        assert!(parse_path("M0,0 C1,1 2,2 3,3").is_empty());
        assert!(parse_path("").is_empty());
    }

    #[test]
    fn test_contains() {
        let outline = square();
        assert!(outline.contains(Point { x: 5.0, y: 5.0 }));
        assert!(!outline.contains(Point { x: 15.0, y: 5.0 }));
    }

    #[test]
    fn test_bundled_regions_have_outlines() {
        let store = RegionStore::bundled();
        let outlines = outlines_from_store(&store);
        assert_eq!(outlines.len(), store.len());
        for outline in &outlines {
            assert!(!outline.rings.is_empty(), "{}", outline.id);
            assert!(outline.contains(outline.center), "{}", outline.id);
        }
    }
}
