pub mod context;

use crate::bucket::FillBucket;
use crate::render::context::PaintMode;

/// Canonical tile address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// The tile a bucket belongs to. Clipping and matrices are the painter's business.
#[derive(Clone, Debug, Default)]
pub struct RenderTile {
    pub id: TileId,
}

/// Per-frame state the painter threads through every bucket.
#[derive(Clone, Debug, Default)]
pub struct PaintParameters {
    pub paint_mode: PaintMode,
}

/// Style properties the painter reads; this crate only passes it through.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillLayer {
    pub id: String,
    /// Whether the painter should also stroke the outline.
    pub antialias: bool,
    pub pattern: Option<String>,
}

/// A style layer of any type.
pub trait Layer {
    fn id(&self) -> &str;

    fn as_fill(&self) -> Option<&FillLayer> {
        None
    }
}

impl Layer for FillLayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn as_fill(&self) -> Option<&FillLayer> {
        Some(self)
    }
}

/// Decides colors, passes and shaders, then calls back into the bucket's `draw_*` methods.
pub trait Painter {
    fn render_fill(&mut self, parameters: &mut PaintParameters, bucket: &FillBucket, layer: &FillLayer, tile: &RenderTile);
}
