//! Fill triangulation: polygon (exterior + holes) into polygon-local triangle indices.
//!
//! Design constraints:
//! - Indices are 0-based over the polygon's own vertices, in ring order (exterior first).
//!   The bucket re-bases them onto the receiving group.
//! - Empty rings contribute nothing, so indices line up with the vertices the bucket appends.

use crate::error::BucketError;
use crate::geometry::Polygon;

// earcut handles polygons-with-holes robustly; it runs at add_geometry time, off the render path.
use earcutr::earcut;

/// Triangulate `polygon`; the result length is always a multiple of 3.
pub fn triangulate(polygon: &Polygon) -> Result<Vec<u32>, BucketError> {
    let mut coords: Vec<f64> = Vec::with_capacity(polygon.vertex_count() * 2);
    let mut hole_starts: Vec<usize> = Vec::new();
    let mut vertex_count = 0usize;

    for ring in polygon.rings() {
        if ring.is_empty() {
            continue;
        }
        // The first non-empty ring is the exterior; everything after starts a hole.
        if vertex_count > 0 {
            hole_starts.push(vertex_count);
        }
        for c in ring {
            coords.push(c.x as f64);
            coords.push(c.y as f64);
        }
        vertex_count += ring.len();
    }

    if vertex_count < 3 {
        return Ok(Vec::new());
    }

    let idx = earcut(&coords, &hole_starts, 2)
        .map_err(|_| BucketError::Triangulation(format!("{vertex_count} vertices, {} holes", hole_starts.len())))?;
    if idx.len() % 3 != 0 {
        return Err(BucketError::Triangulation(format!("{} indices is not a triangle list", idx.len())));
    }

    Ok(idx.into_iter().map(|i| i as u32).collect())
}
