//! Output backends
//!
//! This module is organized into submodules:
//! - `canvas`: immediate-mode drawing (display lists, tiny-skia rasterization)
//! - `svg`: declarative drawing (retained `<path>` elements, SVG serialization)
//!
//! Shapes compute all geometry themselves and talk to a backend only through
//! [`Renderer`]: one `begin`, an outline, `stroke`, `fill`, then `end` per draw.

pub mod canvas;
pub mod svg;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::color::Color;
use crate::path::Segment;
use crate::vector::Vector;

pub use canvas::{Canvas, CanvasOp, CanvasRenderer, DisplayList, PixmapCanvas};
pub use svg::{SvgElement, SvgRenderer};

/// What kind of output a backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// Draws paths and native elliptical arcs as it is told to.
    Immediate,
    /// Only accepts path description strings plus a transform string.
    Declarative,
}

/// Stable identity of one drawable part, used by declarative backends to
/// keep one retained element per part across frames.
///
/// Cloning allocates a fresh identity, so a copied shape never shares
/// retained elements with its original.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawTarget(u64);

static NEXT_TARGET: AtomicU64 = AtomicU64::new(1);

impl DrawTarget {
    pub fn new() -> Self {
        DrawTarget(NEXT_TARGET.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for DrawTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DrawTarget {
    fn clone(&self) -> Self {
        DrawTarget::new()
    }
}

/// One elliptical arc, in render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseArc {
    pub center: Vector,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x axis, in radians.
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// An output backend.
///
/// A draw call is `begin`, exactly one outline call (`path`, `arcs` or
/// `path_data`), then `stroke`, `fill` and `end`. Immediate backends ignore
/// `path_data`; declarative ones ignore `arcs`. Callers pick by [`kind`].
///
/// [`kind`]: Renderer::kind
pub trait Renderer {
    fn kind(&self) -> RendererKind;

    fn is_immediate(&self) -> bool {
        self.kind() == RendererKind::Immediate
    }

    fn is_declarative(&self) -> bool {
        self.kind() == RendererKind::Declarative
    }

    /// Start a draw call for `target`.
    fn begin(&mut self, target: &DrawTarget);

    /// Emit a render-space path.
    fn path(&mut self, segments: &[Segment], closed: bool);

    /// Emit a sequence of elliptical arcs as one subpath, joined by straight
    /// lines. Immediate backends only.
    fn arcs(&mut self, arcs: &[EllipseArc]);

    /// Set a path description and transform verbatim. Declarative backends only.
    fn path_data(&mut self, d: &str, transform: Option<&str>);

    /// Stroke the current outline, or clear any stroke when `width` is `None`.
    fn stroke(&mut self, width: Option<f64>, color: &Color);

    /// Fill the current outline, or clear any fill when `fill` is false.
    fn fill(&mut self, fill: bool, color: &Color);

    /// Finish the draw call.
    fn end(&mut self);
}
