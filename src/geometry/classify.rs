use super::{signed_area, GeometryCollection, Polygon, Ring};

/// Split a ring soup into polygons by winding.
///
/// The first ring with non-zero area fixes the "outer" winding. Every later ring with that winding
/// opens a new polygon; rings with the opposite winding become holes of the open polygon.
/// Zero-area rings are dropped.
pub fn classify_rings(rings: &GeometryCollection) -> Vec<Polygon> {
    let mut polygons: Vec<Polygon> = Vec::new();
    let mut outer_negative: Option<bool> = None;
    let mut current: Option<Polygon> = None;

    for ring in rings {
        let area = signed_area(ring);
        if area == 0 {
            continue;
        }
        let negative = area < 0;
        let outer = *outer_negative.get_or_insert(negative);

        if negative == outer {
            if let Some(done) = current.take() {
                polygons.push(done);
            }
            current = Some(Polygon::new(ring.clone(), Vec::new()));
        } else if let Some(open) = current.as_mut() {
            open.interiors.push(ring.clone());
        }
    }

    polygons.extend(current);
    polygons
}

/// Cap the number of holes so earcut's hole elimination stays tractable.
///
/// Keeps the `max_holes` holes with the largest absolute area (earlier hole wins a tie), in their
/// original order. Returns how many holes were dropped.
pub fn limit_holes(polygon: &mut Polygon, max_holes: usize) -> usize {
    let total = polygon.interiors.len();
    if total <= max_holes {
        return 0;
    }

    let mut ranked: Vec<(usize, i64)> = polygon
        .interiors
        .iter()
        .enumerate()
        .map(|(i, ring)| (i, signed_area(ring).abs()))
        .collect();
    // Stable sort keeps input order among equal areas.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut keep = vec![false; total];
    for &(i, _) in ranked.iter().take(max_holes) {
        keep[i] = true;
    }

    let holes: Vec<Ring> = std::mem::take(&mut polygon.interiors);
    polygon.interiors = holes
        .into_iter()
        .zip(keep)
        .filter_map(|(ring, k)| k.then_some(ring))
        .collect();

    let dropped = total - max_holes;
    log::debug!("limit_holes: kept {} of {} holes", max_holes, total);
    dropped
}
