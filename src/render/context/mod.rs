pub mod recording;

use std::marker::PhantomData;

use bytemuck::Pod;

/// Opaque handle to a GPU buffer object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Opaque handle to a vertex-array object (attribute binding state).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    Lines,
    Triangles,
}

impl PrimitiveKind {
    pub fn indices_per_primitive(self) -> usize {
        match self {
            PrimitiveKind::Lines => 2,
            PrimitiveKind::Triangles => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexType {
    U16,
}

impl IndexType {
    pub fn size(self) -> usize {
        match self {
            IndexType::U16 => 2,
        }
    }
}

/// `Overdraw` binds the same buffers through the debug overdraw program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintMode {
    #[default]
    Normal,
    Overdraw,
}

/// The four programs that can draw a fill bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderVariant {
    Fill,
    FillPattern,
    Outline,
    OutlinePattern,
}

impl ShaderVariant {
    pub const ALL: [ShaderVariant; 4] = [
        ShaderVariant::Fill,
        ShaderVariant::FillPattern,
        ShaderVariant::Outline,
        ShaderVariant::OutlinePattern,
    ];

    /// Outline variants walk line groups, fill variants walk triangle groups.
    pub fn primitive(self) -> PrimitiveKind {
        match self {
            ShaderVariant::Fill | ShaderVariant::FillPattern => PrimitiveKind::Triangles,
            ShaderVariant::Outline | ShaderVariant::OutlinePattern => PrimitiveKind::Lines,
        }
    }

    pub fn is_pattern(self) -> bool {
        matches!(self, ShaderVariant::FillPattern | ShaderVariant::OutlinePattern)
    }

    /// Index into a group's per-variant vertex arrays.
    ///
    /// 0 = plain, 1 = plain overdraw, 2 = pattern, 3 = pattern overdraw.
    pub fn binding_slot(self, mode: PaintMode) -> usize {
        let base = if self.is_pattern() { 2 } else { 0 };
        base + usize::from(mode == PaintMode::Overdraw)
    }
}

/// Everything a vertex array needs to point attributes at a group's vertex window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexArrayBinding {
    pub shader: ShaderVariant,
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
    pub vertex_byte_offset: usize,
}

/// Rendering context that owns GPU memory and issues draw calls.
///
/// Design rule: only implementations of this trait touch the graphics API.
pub trait Context {
    fn create_vertex_buffer_object(&mut self, bytes: &[u8]) -> BufferId;

    fn create_index_buffer_object(&mut self, bytes: &[u8]) -> BufferId;

    fn create_vertex_array(&mut self) -> VertexArrayId;

    /// Bind `array` and (re)point its attributes when the binding changed.
    fn bind_vertex_array(&mut self, array: VertexArrayId, binding: VertexArrayBinding);

    /// `count` is in indices, `byte_offset` into the bound index buffer.
    fn draw_elements(&mut self, primitive: PrimitiveKind, count: usize, index_type: IndexType, byte_offset: usize);
}

/// Uploaded vertex buffer. The CPU-side data is gone once this exists.
#[derive(Debug)]
pub struct VertexBuffer<V> {
    pub id: BufferId,
    pub len: usize,
    _vertex: PhantomData<V>,
}

impl<V: Pod> VertexBuffer<V> {
    pub const VERTEX_SIZE: usize = std::mem::size_of::<V>();

    pub fn vertex_size(&self) -> usize {
        Self::VERTEX_SIZE
    }
}

/// Uploaded index buffer of fixed-size primitives (a line pair or a triangle triple).
#[derive(Debug)]
pub struct IndexBuffer<P> {
    pub id: BufferId,
    pub len: usize,
    _primitive: PhantomData<P>,
}

impl<P: Pod> IndexBuffer<P> {
    pub const PRIMITIVE_SIZE: usize = std::mem::size_of::<P>();

    pub fn primitive_size(&self) -> usize {
        Self::PRIMITIVE_SIZE
    }
}

pub fn create_vertex_buffer<V: Pod>(context: &mut dyn Context, vertices: Vec<V>) -> VertexBuffer<V> {
    let id = context.create_vertex_buffer_object(bytemuck::cast_slice(&vertices));
    VertexBuffer { id, len: vertices.len(), _vertex: PhantomData }
}

pub fn create_index_buffer<P: Pod>(context: &mut dyn Context, primitives: Vec<P>) -> IndexBuffer<P> {
    let id = context.create_index_buffer_object(bytemuck::cast_slice(&primitives));
    IndexBuffer { id, len: primitives.len(), _primitive: PhantomData }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_slots_are_distinct_per_kind() {
        let fill: Vec<usize> = [ShaderVariant::Fill, ShaderVariant::FillPattern]
            .iter()
            .flat_map(|v| [v.binding_slot(PaintMode::Normal), v.binding_slot(PaintMode::Overdraw)])
            .collect();
        assert_eq!(fill, vec![0, 1, 2, 3]);
        assert_eq!(ShaderVariant::OutlinePattern.binding_slot(PaintMode::Overdraw), 3);
        assert_eq!(ShaderVariant::Outline.binding_slot(PaintMode::Normal), 0);
    }

    #[test]
    fn buffer_handles_record_element_counts() {
        use crate::bucket::{TriangleIndex, Vertex};
        use crate::render::context::recording::RecordingContext;

        let mut ctx = RecordingContext::new();
        let vb = create_vertex_buffer(&mut ctx, vec![Vertex { x: 1, y: -2 }, Vertex { x: 3, y: 4 }]);
        let ib = create_index_buffer(&mut ctx, vec![TriangleIndex { a: 0, b: 1, c: 0 }]);

        assert_eq!((vb.len, vb.vertex_size()), (2, 4));
        assert_eq!((ib.len, ib.primitive_size()), (1, 6));
        assert_eq!(ctx.vertex_bytes(vb.id).map(<[u8]>::len), Some(8));
        assert_eq!(ctx.index_bytes(ib.id).map(<[u8]>::len), Some(6));
    }

    #[test]
    fn variants_pick_their_primitive() {
        assert_eq!(ShaderVariant::Fill.primitive(), PrimitiveKind::Triangles);
        assert_eq!(ShaderVariant::FillPattern.primitive(), PrimitiveKind::Triangles);
        assert_eq!(ShaderVariant::Outline.primitive().indices_per_primitive(), 2);
        assert_eq!(ShaderVariant::OutlinePattern.primitive().indices_per_primitive(), 2);
    }
}
