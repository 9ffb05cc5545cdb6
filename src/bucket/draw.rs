use crate::render::context::{BufferId, Context, IndexType, PaintMode, ShaderVariant, VertexArrayBinding};

use super::group::Group;

/// Where one group's draw call reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBatch {
    pub group: usize,
    pub vertex_byte_offset: usize,
    pub index_byte_offset: usize,
    /// Indices to draw (`elements_length * indices_per_primitive`).
    pub index_count: usize,
}

/// Running byte offsets through `groups`, strictly in creation order.
pub fn draw_batches(
    groups: &[Group],
    vertex_size: usize,
    primitive_size: usize,
    indices_per_primitive: usize,
) -> impl Iterator<Item = DrawBatch> + '_ {
    groups.iter().enumerate().scan((0usize, 0usize), move |(vertex_at, index_at), (i, g)| {
        let batch = DrawBatch {
            group: i,
            vertex_byte_offset: *vertex_at,
            index_byte_offset: *index_at,
            index_count: g.elements_length * indices_per_primitive,
        };
        *vertex_at += g.vertex_length * vertex_size;
        *index_at += g.elements_length * primitive_size;
        Some(batch)
    })
}

/// The uploaded buffers one draw stream reads.
#[derive(Clone, Copy, Debug)]
pub struct DrawTarget {
    pub vertex_buffer: BufferId,
    pub vertex_size: usize,
    pub index_buffer: BufferId,
    pub primitive_size: usize,
}

/// Issue one draw call per group. Returns the number of calls made.
pub fn submit(
    groups: &[Group],
    shader: ShaderVariant,
    mode: PaintMode,
    target: DrawTarget,
    context: &mut dyn Context,
) -> usize {
    let primitive = shader.primitive();
    let slot = shader.binding_slot(mode);
    let mut calls = 0;

    for batch in draw_batches(groups, target.vertex_size, target.primitive_size, primitive.indices_per_primitive()) {
        // Upload attaches every slot to every group, so a missing array means a skipped draw.
        let Some(array) = groups[batch.group].vertex_array(slot) else {
            debug_assert!(false, "group {} has no vertex array for {:?}", batch.group, shader);
            log::error!("group {} has no vertex array for {:?}; draw dropped", batch.group, shader);
            continue;
        };
        context.bind_vertex_array(
            array,
            VertexArrayBinding {
                shader,
                vertex_buffer: target.vertex_buffer,
                index_buffer: target.index_buffer,
                vertex_byte_offset: batch.vertex_byte_offset,
            },
        );
        context.draw_elements(primitive, batch.index_count, IndexType::U16, batch.index_byte_offset);
        calls += 1;
    }
    calls
}
