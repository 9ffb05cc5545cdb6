//! Headless `Context` that keeps uploaded bytes in memory and records every draw call.
//!
//! Useful for tests and for dumping what a bucket would submit without a GPU.

use std::collections::HashMap;

use crate::geometry::Coordinate;
use crate::render::context::{
    BufferId, Context, IndexType, PrimitiveKind, VertexArrayBinding, VertexArrayId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub primitive: PrimitiveKind,
    pub count: usize,
    pub index_type: IndexType,
    pub index_byte_offset: usize,
    pub array: VertexArrayId,
    pub binding: VertexArrayBinding,
}

#[derive(Default)]
pub struct RecordingContext {
    vertex_buffers: HashMap<BufferId, Vec<u8>>,
    index_buffers: HashMap<BufferId, Vec<u8>>,
    next_buffer: u32,
    arrays: Vec<Option<VertexArrayBinding>>,
    bound: Option<VertexArrayId>,
    pub draws: Vec<DrawCall>,
    /// Times a vertex array had to be re-pointed because its binding changed.
    pub rebinds: usize,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_array_count(&self) -> usize {
        self.arrays.len()
    }

    pub fn vertex_bytes(&self, id: BufferId) -> Option<&[u8]> {
        self.vertex_buffers.get(&id).map(Vec::as_slice)
    }

    pub fn index_bytes(&self, id: BufferId) -> Option<&[u8]> {
        self.index_buffers.get(&id).map(Vec::as_slice)
    }

    pub fn buffer_count(&self) -> usize {
        self.vertex_buffers.len() + self.index_buffers.len()
    }

    /// Group-local indices read by `call`, in index-buffer order.
    pub fn indices(&self, call: &DrawCall) -> Option<Vec<u16>> {
        let bytes = self.index_bytes(call.binding.index_buffer)?;
        let end = call.index_byte_offset + call.count * call.index_type.size();
        let window = bytes.get(call.index_byte_offset..end)?;
        Some(window.chunks_exact(2).map(|b| u16::from_ne_bytes([b[0], b[1]])).collect())
    }

    /// Coordinates `call` would fetch, after applying the bound vertex window.
    pub fn resolve(&self, call: &DrawCall) -> Option<Vec<Coordinate>> {
        let vertices = self.vertex_bytes(call.binding.vertex_buffer)?;
        let base = call.binding.vertex_byte_offset;
        self.indices(call)?
            .into_iter()
            .map(|i| {
                let at = base + i as usize * 4;
                let v = vertices.get(at..at + 4)?;
                Some(Coordinate::new(i16::from_ne_bytes([v[0], v[1]]), i16::from_ne_bytes([v[2], v[3]])))
            })
            .collect()
    }

    fn next_id(&mut self) -> BufferId {
        self.next_buffer += 1;
        BufferId(self.next_buffer)
    }
}

impl Context for RecordingContext {
    fn create_vertex_buffer_object(&mut self, bytes: &[u8]) -> BufferId {
        let id = self.next_id();
        self.vertex_buffers.insert(id, bytes.to_vec());
        id
    }

    fn create_index_buffer_object(&mut self, bytes: &[u8]) -> BufferId {
        let id = self.next_id();
        self.index_buffers.insert(id, bytes.to_vec());
        id
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        self.arrays.push(None);
        VertexArrayId(self.arrays.len() as u32 - 1)
    }

    fn bind_vertex_array(&mut self, array: VertexArrayId, binding: VertexArrayBinding) {
        if let Some(slot) = self.arrays.get_mut(array.0 as usize) {
            if slot.is_some_and(|b| b != binding) {
                self.rebinds += 1;
            }
            *slot = Some(binding);
        }
        self.bound = Some(array);
    }

    fn draw_elements(&mut self, primitive: PrimitiveKind, count: usize, index_type: IndexType, byte_offset: usize) {
        let Some(array) = self.bound else {
            log::warn!("draw_elements with no vertex array bound");
            return;
        };
        let Some(binding) = self.arrays.get(array.0 as usize).copied().flatten() else {
            log::warn!("draw_elements with unconfigured vertex array {:?}", array);
            return;
        };
        self.draws.push(DrawCall { primitive, count, index_type, index_byte_offset: byte_offset, array, binding });
    }
}
