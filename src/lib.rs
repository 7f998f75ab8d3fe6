//! Pseudo-3D illustration engine.
//!
//! A scene is a tree of [`Node`]s, each holding a local [`Transform`] and one
//! drawable [`Item`]. Every frame runs two passes over the root:
//!
//! 1. [`Node::update_graph`] composes transforms into render space and
//!    caches every item's projected geometry and sort value.
//! 2. [`Node::render_graph`] walks the tree again, painting each node's
//!    children from farthest to nearest through a [`Renderer`].
//!
//! There is no z-buffer. Curved solids ([`TruncatedCone`], [`SphericalCap`])
//! are reduced each frame to flat discs plus an analytically derived
//! silhouette, which both the raster and the SVG backend can draw.
//!
//! ```
//! use flatland::{CanvasRenderer, DisplayList, Node, SphericalCap, Vector};
//!
//! let mut scene = Node::anchor().with_child(
//!     Node::new(SphericalCap::hemisphere(40.0)?).with_rotate(Vector::x(-0.6)),
//! );
//! scene.update_graph();
//!
//! let mut renderer = CanvasRenderer::new(DisplayList::new());
//! scene.render_graph(&mut renderer);
//! assert!(!renderer.canvas().ops().is_empty());
//! # Ok::<(), flatland::ConfigError>(())
//! ```

pub mod color;
pub mod defaults;
pub mod errors;
pub mod log;
pub mod node;
pub mod path;
pub mod render;
pub mod shapes;
pub mod transform;
pub mod vector;

pub use color::Color;
pub use errors::{ConfigError, RenderError};
pub use node::Node;
pub use path::{Path, PathCommand, PathMethod, Segment};
pub use render::{
    Canvas, CanvasOp, CanvasRenderer, DisplayList, DrawTarget, EllipseArc, PixmapCanvas,
    Renderer, RendererKind, SvgElement, SvgRenderer,
};
pub use shapes::{
    Anchor, Backface, CapOptions, ConeOptions, Disc, DomeOutline, Drawable, Item, PathShape,
    SphericalCap, Style, TruncatedCone,
};
pub use transform::{Frame, Transform};
pub use vector::{TAU, Vector, ease_in_out, lerp};
