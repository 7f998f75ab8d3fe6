use super::{Drawable, Style, draw_flat, outline_radius};
use crate::errors::ConfigError;
use crate::path::Path;
use crate::render::{DrawTarget, Renderer};
use crate::transform::Frame;
use crate::vector::Vector;

/// An arbitrary user path: polylines, curves, dots.
#[derive(Debug, Clone)]
pub struct PathShape {
    path: Path,
    style: Style,
    origin: Vector,
    normal: Vector,
    target: DrawTarget,
}

impl PathShape {
    pub fn new(path: Path) -> Self {
        Self {
            path,
            style: Style::default(),
            origin: Vector::ZERO,
            normal: Vector::Z,
            target: DrawTarget::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn target(&self) -> &DrawTarget {
        &self.target
    }
}

impl Drawable for PathShape {
    fn update(&mut self, frame: &Frame) {
        self.origin = frame.origin();
        self.normal = frame.normal();
        self.path.update(frame);
    }

    /// Mean depth of the path's end points.
    fn sort_value(&self) -> f64 {
        self.path.mean_render_z().unwrap_or(self.origin.z)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        draw_flat(&self.path, &self.target, &self.style, self.normal, renderer);
    }

    fn style(&self) -> Option<&Style> {
        Some(&self.style)
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

/// A flat circle facing local +z.
#[derive(Debug, Clone)]
pub struct Disc {
    diameter: f64,
    path: Path,
    style: Style,
    frame: Frame,
    target: DrawTarget,
}

impl Disc {
    pub fn new(diameter: f64) -> Result<Self, ConfigError> {
        let diameter = ConfigError::check_finite("diameter", diameter)?;
        if diameter < 0.0 {
            crate::log::warn!(diameter, "rejecting disc with negative diameter");
            return Err(ConfigError::NegativeDiameter {
                shape: "Disc",
                value: diameter,
            });
        }
        Ok(Self::with_diameter(diameter))
    }

    /// Build from an already validated diameter.
    pub(crate) fn with_diameter(diameter: f64) -> Self {
        Self {
            diameter,
            path: Path::circle(diameter),
            style: Style::default(),
            frame: Frame::IDENTITY,
            target: DrawTarget::new(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn target(&self) -> &DrawTarget {
        &self.target
    }

    pub fn render_origin(&self) -> Vector {
        self.frame.origin()
    }

    /// Render-space radius: distance from the origin to the outline's first
    /// point, as of the last update.
    pub fn render_radius(&self) -> f64 {
        outline_radius(self.frame.origin(), &self.path).unwrap_or(0.0)
    }

    pub fn is_facing_back(&self) -> bool {
        self.frame.normal().z < 0.0
    }
}

impl Drawable for Disc {
    fn update(&mut self, frame: &Frame) {
        self.frame = *frame;
        self.path.update(frame);
    }

    fn sort_value(&self) -> f64 {
        self.frame.origin().z
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        draw_flat(
            &self.path,
            &self.target,
            &self.style,
            self.frame.normal(),
            renderer,
        );
    }

    fn style(&self) -> Option<&Style> {
        Some(&self.style)
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}
