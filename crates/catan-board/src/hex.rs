//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the geometry underneath the board graph:
//! - `HexCoord`: identifies individual hex tiles
//! - `Point`: a pixel-space position (hex centers, corners)
//! - Enumeration of every hex within a given radius of the origin
//! - Pointy-top corner offsets used to place vertices
//!
//! We use axial coordinates because they make neighbor calculations elegant and
//! avoid the wasted space of offset coordinates.

use serde::{Deserialize, Serialize};

const SQRT3: f64 = 1.732_050_807_568_877_2;

/// A position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The six neighboring hexes in clockwise order starting from East
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),     // East
            HexCoord::new(self.q, self.r + 1),     // SouthEast
            HexCoord::new(self.q - 1, self.r + 1), // SouthWest
            HexCoord::new(self.q - 1, self.r),     // West
            HexCoord::new(self.q, self.r - 1),     // NorthWest
            HexCoord::new(self.q + 1, self.r - 1), // NorthEast
        ]
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Ring index: distance from the origin hex
    pub fn ring(&self) -> u32 {
        self.distance_to(&HexCoord::default())
    }

    /// Convert to pixel coordinates (center of hex).
    /// Uses pointy-top orientation with the given hex size (center to corner).
    pub fn to_pixel(&self, hex_size: f64) -> Point {
        let q = f64::from(self.q);
        let r = f64::from(self.r);
        Point::new(hex_size * SQRT3 * (q + r / 2.0), hex_size * 1.5 * r)
    }

    /// Convert from pixel coordinates to the hex containing that point
    pub fn from_pixel(x: f64, y: f64, hex_size: f64) -> Self {
        let q = (SQRT3 / 3.0 * x - 1.0 / 3.0 * y) / hex_size;
        let r = (2.0 / 3.0 * y) / hex_size;
        Self::axial_round(q, r)
    }

    /// Round fractional axial coordinates to nearest hex
    fn axial_round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }
}

/// Every hex within `radius` steps of the origin.
///
/// Ordered by `r` ascending, then `q` ascending. Hex IDs are handed out in this
/// order, so it must stay stable. A negative radius yields no hexes.
pub fn hexes_in_radius(radius: i32) -> Vec<HexCoord> {
    if radius < 0 {
        return Vec::new();
    }

    let mut coords: Vec<HexCoord> = (-radius..=radius)
        .flat_map(|q| (-radius..=radius).map(move |r| HexCoord::new(q, r)))
        .filter(|c| c.q.abs().max(c.r.abs()).max(c.s().abs()) <= radius)
        .collect();

    coords.sort_by_key(|c| (c.r, c.q));
    coords
}

/// Offsets from a hex center to its six corners.
///
/// Pointy-top: corner 0 is straight north of the center, the rest follow
/// clockwise (NE, SE, S, SW, NW).
pub fn corner_offsets(hex_size: f64) -> [Point; 6] {
    let a = SQRT3 / 2.0 * hex_size;
    let b = 0.5 * hex_size;
    [
        Point::new(0.0, -hex_size),
        Point::new(a, -b),
        Point::new(a, b),
        Point::new(0.0, hex_size),
        Point::new(-a, b),
        Point::new(-a, -b),
    ]
}
