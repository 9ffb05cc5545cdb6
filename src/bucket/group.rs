use crate::render::context::{Context, VertexArrayId};

use super::{MAX_GROUP_ELEMENTS, MAX_GROUP_VERTICES};

/// A batch drawn with one call: a window of the shared vertex buffer plus a run of primitives.
#[derive(Debug, Default)]
pub struct Group {
    /// Vertices in this group's window.
    pub vertex_length: usize,
    /// Line segments or triangles in this group.
    pub elements_length: usize,
    /// Created at upload, one per `ShaderVariant::binding_slot`.
    vertex_arrays: Option<[VertexArrayId; 4]>,
}

impl Group {
    fn fits(&self, vertices: usize, elements: usize) -> bool {
        self.vertex_length + vertices <= MAX_GROUP_VERTICES
            && self.elements_length + elements <= MAX_GROUP_ELEMENTS
    }

    pub fn commit(&mut self, vertices: usize, elements: usize) {
        self.vertex_length += vertices;
        self.elements_length += elements;
        debug_assert!(self.vertex_length <= MAX_GROUP_VERTICES);
        debug_assert!(self.elements_length <= MAX_GROUP_ELEMENTS);
    }

    pub fn vertex_array(&self, slot: usize) -> Option<VertexArrayId> {
        self.vertex_arrays.and_then(|arrays| arrays.get(slot).copied())
    }
}

/// Append-only list of groups over one shared vertex buffer.
///
/// Only the last group is ever written to; earlier groups are frozen once a new one opens.
#[derive(Debug, Default)]
pub struct GroupList {
    groups: Vec<Group>,
}

impl GroupList {
    /// Group that can take `vertices` more vertices and `elements` more primitives, opening a new
    /// one when the current group would overflow. Callers must keep both counts within the limits.
    pub fn reserve(&mut self, vertices: usize, elements: usize) -> &mut Group {
        debug_assert!(vertices <= MAX_GROUP_VERTICES && elements <= MAX_GROUP_ELEMENTS);
        let needs_new = self.groups.last().map_or(true, |g| !g.fits(vertices, elements));
        if needs_new {
            if let Some(full) = self.groups.last() {
                log::debug!(
                    "group {} closed at {} vertices / {} elements",
                    self.groups.len() - 1,
                    full.vertex_length,
                    full.elements_length
                );
            }
            self.groups.push(Group::default());
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn as_slice(&self) -> &[Group] {
        &self.groups
    }

    pub fn total_elements(&self) -> usize {
        self.groups.iter().map(|g| g.elements_length).sum()
    }

    pub(crate) fn attach_vertex_arrays(&mut self, context: &mut dyn Context) {
        for group in &mut self.groups {
            group.vertex_arrays = Some(std::array::from_fn(|_| context.create_vertex_array()));
        }
    }
}
