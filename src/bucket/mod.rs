//! Fill bucket: tessellated map fills packed into 16-bit addressable draw groups.
//!
//! Lifecycle: `add_geometry`* -> `upload` (once) -> `render` / `draw_*`*.
//! Geometry is rejected after upload, drawing is rejected before it.

pub mod buffers;
pub mod draw;
pub mod group;

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::{BucketError, Overflow, Precondition};
use crate::geometry::{classify_rings, limit_holes, GeometryCollection, Polygon};
use crate::render::context::{
    create_index_buffer, create_vertex_buffer, Context, IndexBuffer, PaintMode, PrimitiveKind, ShaderVariant,
    VertexBuffer,
};
use crate::render::{Layer, PaintParameters, Painter, RenderTile};
use crate::tessellate::triangulate;
use crate::util::config::{bucket_config, BucketConfig};

pub use buffers::{BuildBuffers, LineIndex, TriangleIndex, Vertex};
pub use draw::{draw_batches, DrawBatch, DrawTarget};
pub use group::{Group, GroupList};

/// Highest vertex count one group may address with u16 indices.
pub const MAX_GROUP_VERTICES: usize = u16::MAX as usize;
/// Highest primitive count one group may hold.
pub const MAX_GROUP_ELEMENTS: usize = u16::MAX as usize;

static TOO_LARGE_WARN_COUNT: AtomicU32 = AtomicU32::new(0);
const TOO_LARGE_WARN_MAX: u32 = 16;

#[derive(Debug)]
struct GpuBuffers {
    vertex_buffer: VertexBuffer<Vertex>,
    line_index_buffer: IndexBuffer<LineIndex>,
    triangle_index_buffer: IndexBuffer<TriangleIndex>,
}

#[derive(Debug)]
enum BucketState {
    Building(BuildBuffers),
    Uploaded(GpuBuffers),
}

/// A polygon that passed every check and only needs appending.
struct PreparedPolygon {
    polygon: Polygon,
    vertex_count: usize,
    indices: Vec<u32>,
}

#[derive(Debug)]
pub struct FillBucket {
    config: BucketConfig,
    state: BucketState,
    line_groups: GroupList,
    triangle_groups: GroupList,
}

impl Default for FillBucket {
    fn default() -> Self {
        Self::new()
    }
}

impl FillBucket {
    pub fn new() -> Self {
        Self::with_config(*bucket_config())
    }

    pub fn with_config(config: BucketConfig) -> Self {
        Self {
            config,
            state: BucketState::Building(BuildBuffers::default()),
            line_groups: GroupList::default(),
            triangle_groups: GroupList::default(),
        }
    }

    /// Classify, triangulate and append one feature's rings.
    ///
    /// All-or-nothing: if any polygon of `geometry` is too large, nothing from this call is kept
    /// and earlier calls are unaffected.
    pub fn add_geometry(&mut self, geometry: &GeometryCollection) -> Result<(), BucketError> {
        let BucketState::Building(buffers) = &mut self.state else {
            return Err(violated(Precondition::AlreadyUploaded, "add_geometry"));
        };

        let max_holes = self.config.max_holes;
        let prepared = classify_rings(geometry)
            .into_iter()
            .map(|polygon| prepare(polygon, max_holes))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                if let BucketError::GeometryTooLarge(_) = e {
                    if TOO_LARGE_WARN_COUNT.fetch_add(1, Ordering::Relaxed) < TOO_LARGE_WARN_MAX {
                        log::warn!("fill feature dropped: {e}");
                    }
                }
            })?;

        for p in prepared {
            for ring in p.polygon.rings() {
                let n = ring.len();
                if n == 0 {
                    continue;
                }
                let group = self.line_groups.reserve(n, n);
                buffers.push_ring(ring, group.vertex_length as u16);
                group.commit(n, n);
            }

            if p.vertex_count == 0 {
                continue;
            }
            let triangles = p.indices.len() / 3;
            let group = self.triangle_groups.reserve(p.vertex_count, triangles);
            buffers.push_triangles(&p.indices, group.vertex_length as u16);
            group.commit(p.vertex_count, triangles);
        }

        Ok(())
    }

    /// Hand the buffers to `context`. Valid exactly once.
    pub fn upload(&mut self, context: &mut dyn Context) -> Result<(), BucketError> {
        let BucketState::Building(buffers) = &mut self.state else {
            return Err(violated(Precondition::AlreadyUploaded, "upload"));
        };
        let BuildBuffers { vertices, lines, triangles } = std::mem::take(buffers);
        let gpu = GpuBuffers {
            vertex_buffer: create_vertex_buffer(context, vertices),
            line_index_buffer: create_index_buffer(context, lines),
            triangle_index_buffer: create_index_buffer(context, triangles),
        };
        debug_assert_eq!(gpu.line_index_buffer.len, self.line_groups.total_elements());
        debug_assert_eq!(gpu.triangle_index_buffer.len, self.triangle_groups.total_elements());
        log::debug!(
            "upload: {} vertices, {} lines in {} groups, {} triangles in {} groups",
            gpu.vertex_buffer.len,
            gpu.line_index_buffer.len,
            self.line_groups.len(),
            gpu.triangle_index_buffer.len,
            self.triangle_groups.len()
        );
        self.line_groups.attach_vertex_arrays(context);
        self.triangle_groups.attach_vertex_arrays(context);

        self.state = BucketState::Uploaded(gpu);
        Ok(())
    }

    pub fn render(
        &self,
        painter: &mut dyn Painter,
        parameters: &mut PaintParameters,
        layer: &dyn Layer,
        tile: &RenderTile,
    ) -> Result<(), BucketError> {
        if !self.is_uploaded() {
            return Err(violated(Precondition::NotUploaded, "render"));
        }
        let fill = layer.as_fill().ok_or(BucketError::NotAFillLayer)?;
        painter.render_fill(parameters, self, fill, tile);
        Ok(())
    }

    pub fn has_data(&self) -> bool {
        !self.triangle_groups.is_empty() || !self.line_groups.is_empty()
    }

    /// Fills always need the tile clip applied.
    pub fn needs_clipping(&self) -> bool {
        true
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self.state, BucketState::Uploaded(_))
    }

    pub fn line_groups(&self) -> &[Group] {
        self.line_groups.as_slice()
    }

    pub fn triangle_groups(&self) -> &[Group] {
        self.triangle_groups.as_slice()
    }

    /// CPU buffers; `None` once uploaded.
    pub fn vertices(&self) -> Option<&[Vertex]> {
        self.building().map(|b| b.vertices.as_slice())
    }

    pub fn lines(&self) -> Option<&[LineIndex]> {
        self.building().map(|b| b.lines.as_slice())
    }

    pub fn triangles(&self) -> Option<&[TriangleIndex]> {
        self.building().map(|b| b.triangles.as_slice())
    }

    fn building(&self) -> Option<&BuildBuffers> {
        match &self.state {
            BucketState::Building(b) => Some(b),
            BucketState::Uploaded(_) => None,
        }
    }

    /// Draw every group of the stream `shader` reads, one call per group. Returns the call count.
    pub fn draw(&self, shader: ShaderVariant, context: &mut dyn Context, mode: PaintMode) -> Result<usize, BucketError> {
        let BucketState::Uploaded(gpu) = &self.state else {
            return Err(violated(Precondition::NotUploaded, "draw"));
        };

        let (groups, target) = match shader.primitive() {
            PrimitiveKind::Triangles => (
                &self.triangle_groups,
                DrawTarget {
                    vertex_buffer: gpu.vertex_buffer.id,
                    vertex_size: gpu.vertex_buffer.vertex_size(),
                    index_buffer: gpu.triangle_index_buffer.id,
                    primitive_size: gpu.triangle_index_buffer.primitive_size(),
                },
            ),
            PrimitiveKind::Lines => (
                &self.line_groups,
                DrawTarget {
                    vertex_buffer: gpu.vertex_buffer.id,
                    vertex_size: gpu.vertex_buffer.vertex_size(),
                    index_buffer: gpu.line_index_buffer.id,
                    primitive_size: gpu.line_index_buffer.primitive_size(),
                },
            ),
        };

        Ok(draw::submit(groups.as_slice(), shader, mode, target, context))
    }

    pub fn draw_fill(&self, context: &mut dyn Context, mode: PaintMode) -> Result<usize, BucketError> {
        self.draw(ShaderVariant::Fill, context, mode)
    }

    pub fn draw_fill_pattern(&self, context: &mut dyn Context, mode: PaintMode) -> Result<usize, BucketError> {
        self.draw(ShaderVariant::FillPattern, context, mode)
    }

    pub fn draw_outline(&self, context: &mut dyn Context, mode: PaintMode) -> Result<usize, BucketError> {
        self.draw(ShaderVariant::Outline, context, mode)
    }

    pub fn draw_outline_pattern(&self, context: &mut dyn Context, mode: PaintMode) -> Result<usize, BucketError> {
        self.draw(ShaderVariant::OutlinePattern, context, mode)
    }
}

/// Hole-limit, size-check and triangulate one polygon without touching the bucket.
fn prepare(mut polygon: Polygon, max_holes: usize) -> Result<PreparedPolygon, BucketError> {
    limit_holes(&mut polygon, max_holes);

    let mut vertex_count = 0usize;
    for ring in polygon.rings() {
        vertex_count += ring.len();
        if vertex_count > MAX_GROUP_VERTICES {
            return Err(BucketError::GeometryTooLarge(Overflow::Vertices(polygon.vertex_count())));
        }
    }

    let indices = triangulate(&polygon)?;
    let triangles = indices.len() / 3;
    if triangles > MAX_GROUP_ELEMENTS {
        return Err(BucketError::GeometryTooLarge(Overflow::Triangles(triangles)));
    }

    Ok(PreparedPolygon { polygon, vertex_count, indices })
}

fn violated(p: Precondition, op: &str) -> BucketError {
    log::error!("FillBucket::{op}: {p}");
    BucketError::Precondition(p)
}
