//! fill_bucket
//!
//! Turns map-fill polygons into 16-bit indexed vertex/index buffers and drives the draw calls
//! that render them.
//!
//! Design rule: keep this file thin.

pub mod bucket;
pub mod error;
pub mod geometry;
pub mod render;
pub mod tessellate;
pub mod util;

pub use bucket::FillBucket;
pub use error::{BucketError, Overflow, Precondition};
pub use geometry::{Coordinate, GeometryCollection, Polygon, Ring};
pub use render::context::{Context, PaintMode, ShaderVariant};
pub use util::logging::init_logger;
