//! Tile geometry as it arrives from upstream: integer rings without outer/inner tagging.

pub mod classify;

pub use classify::{classify_rings, limit_holes};

/// Tile-space point. Projection and simplification have already happened upstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i16,
    pub y: i16,
}

impl Coordinate {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

pub type Ring = Vec<Coordinate>;

/// Unordered ring soup for one feature.
pub type GeometryCollection = Vec<Ring>;

/// One outer ring plus its holes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    pub exterior: Ring,
    pub interiors: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self { exterior, interiors }
    }

    /// Exterior first, then holes in order.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn vertex_count(&self) -> usize {
        self.rings().map(Vec::len).sum()
    }
}

/// Twice the signed shoelace area, in the tile's y-down space.
///
/// Zero for empty and degenerate rings.
pub fn signed_area(ring: &[Coordinate]) -> i64 {
    if ring.len() < 3 {
        return 0;
    }
    let mut sum = 0i64;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (p1, p2) = (ring[j], ring[i]);
        sum += (p2.x as i64 - p1.x as i64) * (p1.y as i64 + p2.y as i64);
        j = i;
    }
    sum
}
