use bytemuck::{Pod, Zeroable};

use crate::geometry::Coordinate;

/// GPU vertex: two signed 16-bit tile coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

impl From<Coordinate> for Vertex {
    fn from(c: Coordinate) -> Self {
        Self { x: c.x, y: c.y }
    }
}

/// One outline segment, group-local indices.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct LineIndex {
    pub a: u16,
    pub b: u16,
}

/// One fill triangle, group-local indices.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TriangleIndex {
    pub a: u16,
    pub b: u16,
    pub c: u16,
}

/// CPU-side buffers while the bucket is still accepting geometry.
///
/// One vertex list shared by both draw streams; line and triangle indices are relative to the
/// window of whichever group they were appended under.
#[derive(Debug, Default)]
pub struct BuildBuffers {
    pub vertices: Vec<Vertex>,
    pub lines: Vec<LineIndex>,
    pub triangles: Vec<TriangleIndex>,
}

impl BuildBuffers {
    /// Append a ring's vertices and its closed outline loop.
    ///
    /// `base` is the group-local index of the ring's first vertex. The loop starts with the
    /// closing segment `(last, first)`, then `(i - 1, i)` for the rest.
    pub fn push_ring(&mut self, ring: &[Coordinate], base: u16) {
        let n = ring.len();
        if n == 0 {
            return;
        }
        debug_assert!(base as usize + n - 1 <= u16::MAX as usize);

        self.vertices.extend(ring.iter().copied().map(Vertex::from));
        self.lines.push(LineIndex { a: base + (n - 1) as u16, b: base });
        for i in 1..n as u16 {
            self.lines.push(LineIndex { a: base + i - 1, b: base + i });
        }
    }

    /// Append polygon-local triangle indices re-based by `base`.
    pub fn push_triangles(&mut self, indices: &[u32], base: u16) {
        debug_assert!(indices.len() % 3 == 0);
        self.triangles.extend(indices.chunks_exact(3).map(|t| TriangleIndex {
            a: base + t[0] as u16,
            b: base + t[1] as u16,
            c: base + t[2] as u16,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_layout_is_16_bit() {
        assert_eq!(std::mem::size_of::<Vertex>(), 4);
        assert_eq!(std::mem::size_of::<LineIndex>(), 4);
        assert_eq!(std::mem::size_of::<TriangleIndex>(), 6);
    }

    #[test]
    fn ring_emits_closed_loop() {
        let mut b = BuildBuffers::default();
        let ring = [Coordinate::new(0, 0), Coordinate::new(10, 0), Coordinate::new(0, 10)];
        b.push_ring(&ring, 7);
        assert_eq!(b.vertices.len(), 3);
        assert_eq!(
            b.lines,
            vec![LineIndex { a: 9, b: 7 }, LineIndex { a: 7, b: 8 }, LineIndex { a: 8, b: 9 }]
        );
    }

    #[test]
    fn empty_ring_emits_nothing() {
        let mut b = BuildBuffers::default();
        b.push_ring(&[], 0);
        assert!(b.vertices.is_empty());
        assert!(b.lines.is_empty());
    }

    #[test]
    fn single_vertex_ring_is_a_self_loop() {
        let mut b = BuildBuffers::default();
        b.push_ring(&[Coordinate::new(3, 4)], 2);
        assert_eq!(b.lines, vec![LineIndex { a: 2, b: 2 }]);
    }

    #[test]
    fn triangles_are_rebased() {
        let mut b = BuildBuffers::default();
        b.push_triangles(&[0, 1, 2, 2, 3, 0], 100);
        assert_eq!(
            b.triangles,
            vec![TriangleIndex { a: 100, b: 101, c: 102 }, TriangleIndex { a: 102, b: 103, c: 100 }]
        );
    }
}
