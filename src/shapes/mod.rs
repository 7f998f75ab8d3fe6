//! Drawable items
//!
//! This module is organized into submodules:
//! - `flat`: `PathShape` and `Disc`, shapes drawn straight from their path
//! - `cone`: `TruncatedCone`, a disc plus a tangent-line lateral surface
//! - `cap`: `SphericalCap`, a disc plus an elliptical dome silhouette
//!
//! Every node in a scene holds exactly one [`Item`]. Items compute all their
//! render-space geometry in [`Drawable::update`] and only read it back in
//! [`Drawable::render`].

mod cap;
mod cone;
mod flat;

use enum_dispatch::enum_dispatch;

pub use cap::{CapOptions, DomeOutline, SphericalCap};
pub use cone::{ConeOptions, TruncatedCone, is_apex_visible};
pub use flat::{Disc, PathShape};

use crate::color::Color;
use crate::defaults;
use crate::errors::ConfigError;
use crate::path::{Path, Segment};
use crate::render::{DrawTarget, EllipseArc, Renderer};
use crate::transform::Frame;
use crate::vector::{TAU, Vector};

/// What to do when a flat face turns away from the viewer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Backface {
    /// Draw it anyway, in the front color.
    #[default]
    Visible,
    /// Skip it.
    Hidden,
    /// Draw it in this color instead.
    Color(Color),
}

/// Stroke, fill and visibility settings shared by every drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: Color,
    pub backface: Backface,
    /// Stroke width, or `None` for no stroke.
    pub stroke: Option<f64>,
    pub fill: bool,
    pub closed: bool,
    pub visible: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::default(),
            backface: Backface::Visible,
            stroke: Some(defaults::STROKE_WIDTH),
            fill: false,
            closed: true,
            visible: true,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default style of the curved composites: filled.
    pub fn solid() -> Self {
        Self::default().with_fill(true)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_backface(mut self, backface: Backface) -> Self {
        self.backface = backface;
        self
    }

    pub fn with_stroke(mut self, stroke: Option<f64>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(width) = self.stroke {
            ConfigError::check_finite("stroke", width)?;
        }
        Ok(())
    }

    /// Color to paint with, or `None` when the face is hidden.
    pub fn face_color(&self, facing_back: bool) -> Option<&Color> {
        match (&self.backface, facing_back) {
            (_, false) | (Backface::Visible, true) => Some(&self.color),
            (Backface::Hidden, true) => None,
            (Backface::Color(color), true) => Some(color),
        }
    }
}

/// Per-frame behavior of a scene item.
#[enum_dispatch]
pub trait Drawable {
    /// Recompute render-space geometry from the owning node's frame.
    fn update(&mut self, frame: &Frame);

    /// Depth key for painter's ordering, as of the last update.
    fn sort_value(&self) -> f64;

    /// Issue draw calls from cached geometry.
    fn render(&self, renderer: &mut dyn Renderer);

    fn style(&self) -> Option<&Style>;

    /// Restyle the item, including any parts it owns.
    fn set_style(&mut self, style: Style);
}

/// The closed set of scene items.
#[enum_dispatch(Drawable)]
#[derive(Debug, Clone)]
pub enum Item {
    Anchor(Anchor),
    PathShape(PathShape),
    Disc(Disc),
    TruncatedCone(TruncatedCone),
    SphericalCap(SphericalCap),
}

impl Default for Item {
    fn default() -> Self {
        Item::Anchor(Anchor::default())
    }
}

/// A pure transform node with nothing to draw.
#[derive(Debug, Clone, Default)]
pub struct Anchor {
    origin: Vector,
}

impl Anchor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drawable for Anchor {
    fn update(&mut self, frame: &Frame) {
        self.origin = frame.origin();
    }

    fn sort_value(&self) -> f64 {
        self.origin.z
    }

    fn render(&self, _renderer: &mut dyn Renderer) {}

    fn style(&self) -> Option<&Style> {
        None
    }

    fn set_style(&mut self, _style: Style) {}
}

/// Draw a path as a flat shape facing `normal`.
pub(crate) fn draw_flat(
    path: &Path,
    target: &DrawTarget,
    style: &Style,
    normal: Vector,
    renderer: &mut dyn Renderer,
) {
    if !style.visible || path.is_empty() {
        return;
    }
    let facing_back = normal.z < 0.0;
    let Some(color) = style.face_color(facing_back) else {
        crate::log::trace!(id = target.id(), "backface hidden");
        return;
    };

    if path.is_dot() {
        draw_dot(path, target, style, color, renderer);
        return;
    }

    let closed = style.closed && !path.is_two_point_line();
    renderer.begin(target);
    renderer.path(&path.segments(), closed);
    renderer.stroke(style.stroke, color);
    renderer.fill(style.fill, color);
    renderer.end();
}

fn draw_dot(
    path: &Path,
    target: &DrawTarget,
    style: &Style,
    color: &Color,
    renderer: &mut dyn Renderer,
) {
    let (Some(point), Some(width)) = (path.first_render_point(), style.stroke) else {
        return;
    };
    renderer.begin(target);
    if renderer.is_immediate() {
        let radius = width / 2.0;
        renderer.arcs(&[EllipseArc {
            center: point,
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            start_angle: 0.0,
            end_angle: TAU,
        }]);
        renderer.stroke(None, color);
        renderer.fill(true, color);
    } else {
        // A zero-length line; the round cap draws the dot
        renderer.path(&[Segment::Move(point), Segment::Line(point)], false);
        renderer.stroke(Some(width), color);
        renderer.fill(false, color);
    }
    renderer.end();
}

/// Outward base normal of a composite: the negated image of local +z.
///
/// Adding zero turns `-0.0` components into `+0.0`, so a face-on shape gets
/// `atan2(0, 0) == 0` rather than `-π`.
pub(crate) fn outward_normal(frame: &Frame) -> Vector {
    -frame.normal() + Vector::ZERO
}

/// Render-space distance from a disc's origin to its outline.
pub(crate) fn outline_radius(origin: Vector, path: &Path) -> Option<f64> {
    path.first_render_point()
        .map(|point| (origin - point).magnitude())
}
