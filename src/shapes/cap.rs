//! Spherical cap: a hemisphere on a base disc, optionally cut flat by a
//! smaller opening disc.
//!
//! The dome is drawn as two elliptical arcs around the base origin. Between
//! them, a gap of `2 * mid_angle` leaves room for the opening's rim.

use super::{Backface, Disc, Drawable, Style, outline_radius, outward_normal};
use crate::color::Color;
use crate::defaults;
use crate::errors::ConfigError;
use crate::render::svg::fmt_num;
use crate::render::{DrawTarget, EllipseArc, Renderer};
use crate::transform::{Frame, Transform};
use crate::vector::{TAU, Vector};

/// Construction parameters for a [`SphericalCap`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapOptions {
    pub diameter: f64,
    /// Diameter of the opening; 0 gives a full hemisphere.
    pub opening_diameter: f64,
    pub style: Style,
    /// Color of the opening face. Defaults to the main color.
    pub front_color: Option<Color>,
}

impl Default for CapOptions {
    fn default() -> Self {
        Self {
            diameter: defaults::DIAMETER,
            opening_diameter: 0.0,
            style: Style::solid(),
            front_color: None,
        }
    }
}

impl CapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn opening_diameter(mut self, opening_diameter: f64) -> Self {
        self.opening_diameter = opening_diameter;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn front_color(mut self, color: Color) -> Self {
        self.front_color = Some(color);
        self
    }

    pub fn build(self) -> Result<SphericalCap, ConfigError> {
        SphericalCap::from_options(self)
    }
}

/// The dome's visible silhouette for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomeOutline {
    /// Render-space base origin.
    pub center: Vector,
    pub base_radius: f64,
    pub dome_radius: f64,
    /// Half the angular gap left for the opening's rim.
    pub mid_angle: f64,
    /// Render-space direction of the outward base normal.
    pub contour_angle: f64,
}

impl DomeOutline {
    /// The two arcs for backends with native ellipses.
    pub fn arcs(&self) -> [EllipseArc; 2] {
        let arc = |start_angle, end_angle| EllipseArc {
            center: self.center,
            radius_x: self.dome_radius,
            radius_y: self.base_radius,
            rotation: self.contour_angle,
            start_angle,
            end_angle,
        };
        [
            arc(TAU / 4.0, TAU / 2.0 - self.mid_angle),
            arc(TAU / 2.0 + self.mid_angle, 3.0 * TAU / 4.0),
        ]
    }

    /// Path description, in a frame rotated so the dome points up (-y).
    pub fn svg_path(&self) -> String {
        let base = self.base_radius;
        let dome = self.dome_radius;
        // sin(pi - m) == sin(m), cos(pi - m) == -cos(m)
        let end_x = base * self.mid_angle.sin();
        let end_y = -dome * self.mid_angle.cos();
        format!(
            "M {},0 A {},{} 0 0 1 {},{} H {} A {},{} 0 0 1 {},0",
            fmt_num(-base),
            fmt_num(base),
            fmt_num(dome),
            fmt_num(-end_x),
            fmt_num(end_y),
            fmt_num(end_x),
            fmt_num(base),
            fmt_num(dome),
            fmt_num(base),
        )
    }

    /// Transform placing [`svg_path`](Self::svg_path) in render space.
    pub fn svg_transform(&self) -> String {
        let degrees = (self.contour_angle - TAU / 4.0) / TAU * 360.0;
        format!(
            "translate({},{}) rotate({})",
            fmt_num(self.center.x),
            fmt_num(self.center.y),
            fmt_num(degrees)
        )
    }
}

#[derive(Debug, Clone)]
pub struct SphericalCap {
    diameter: f64,
    opening_diameter: f64,
    height_ratio: f64,
    centroid_factor: f64,
    style: Style,
    front_color: Option<Color>,
    base: Disc,
    opening: Option<Disc>,
    frame: Frame,
    apex_origin: Vector,
    dome: DrawTarget,
}

impl SphericalCap {
    /// Cap with the default style.
    pub fn new(diameter: f64, opening_diameter: f64) -> Result<Self, ConfigError> {
        CapOptions::new()
            .diameter(diameter)
            .opening_diameter(opening_diameter)
            .build()
    }

    /// Full hemisphere.
    pub fn hemisphere(diameter: f64) -> Result<Self, ConfigError> {
        Self::new(diameter, 0.0)
    }

    pub fn from_options(options: CapOptions) -> Result<Self, ConfigError> {
        let CapOptions {
            diameter,
            opening_diameter,
            style,
            front_color,
        } = options;
        let diameter = ConfigError::check_finite("diameter", diameter)?;
        let opening_diameter = ConfigError::check_finite("opening_diameter", opening_diameter)?;
        style.validate()?;

        if diameter < 0.0 {
            crate::log::warn!(diameter, "rejecting cap with negative diameter");
            return Err(ConfigError::NegativeDiameter {
                shape: "SphericalCap",
                value: diameter,
            });
        }
        if opening_diameter >= diameter {
            crate::log::warn!(opening_diameter, diameter, "rejecting cap: opening too large");
            return Err(ConfigError::InnerDiameterTooLarge {
                shape: "SphericalCap",
                inner: opening_diameter,
                diameter,
            });
        }
        let opening_diameter = opening_diameter.max(0.0);

        // Height of the cut over the sphere radius
        let x = if opening_diameter > 0.0 {
            (opening_diameter / diameter).acos().sin()
        } else {
            1.0
        };
        let centroid_factor = 0.75 * (2.0 * x * x - x.powi(4)) / (3.0 * x - x.powi(3));

        let opening = (opening_diameter > 0.0).then(|| Disc::with_diameter(opening_diameter));
        let mut cap = SphericalCap {
            diameter,
            opening_diameter,
            height_ratio: x,
            centroid_factor,
            style: Style::solid(),
            front_color,
            base: Disc::with_diameter(diameter),
            opening,
            frame: Frame::IDENTITY,
            apex_origin: Vector::z(diameter / 2.0),
            dome: DrawTarget::new(),
        };
        cap.set_style(style);
        Ok(cap)
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn opening_diameter(&self) -> f64 {
        self.opening_diameter
    }

    /// Local z of the opening disc.
    pub fn opening_height(&self) -> f64 {
        self.height_ratio * self.diameter / 2.0
    }

    pub fn centroid_factor(&self) -> f64 {
        self.centroid_factor
    }

    pub fn base(&self) -> &Disc {
        &self.base
    }

    pub fn opening(&self) -> Option<&Disc> {
        self.opening.as_ref()
    }

    pub fn apex_origin(&self) -> Vector {
        self.apex_origin
    }

    pub fn dome_target(&self) -> &DrawTarget {
        &self.dome
    }

    /// The dome silhouette as of the last update, or `None` when the
    /// orientation is degenerate.
    pub fn dome_outline(&self) -> Option<DomeOutline> {
        let origin = self.frame.origin();
        // Points from the dome back toward the base
        let normal = outward_normal(&self.frame);

        let normal_scale = normal.magnitude();
        if !(normal_scale > 0.0) {
            crate::log::trace!(normal_scale, "dome skipped: degenerate normal");
            return None;
        }
        let normal_projected_scale = normal.magnitude_2d();
        let cos_eccen_angle = normal_projected_scale / normal_scale;
        let eccen = cos_eccen_angle.acos().sin();

        let contour_angle = normal.y.atan2(normal.x);
        let dome_radius = self.diameter / 2.0
            * (normal_projected_scale * normal_projected_scale + eccen * eccen).sqrt();
        let base_radius = outline_radius(origin, self.base.path())?;

        let mut mid_angle = 0.0;
        if let Some(opening) = &self.opening {
            let opening_origin = opening.render_origin();
            let top_radius = outline_radius(opening_origin, opening.path())?;
            let top_surface_top = top_radius * eccen;
            let top_surface_height = (opening_origin - origin).magnitude() * cos_eccen_angle;

            let b = dome_radius * top_radius;
            let b2 = b * b;
            let a2 = base_radius * base_radius * top_surface_top * top_surface_top;
            let bc = b * top_surface_height * top_radius;
            if a2 != b2 {
                let m = bc / (b2 - a2);
                if m <= 1.0 {
                    mid_angle = m.acos();
                }
            }
        }

        let outline = DomeOutline {
            center: origin,
            base_radius,
            dome_radius,
            mid_angle,
            contour_angle,
        };
        let finite = [eccen, dome_radius, base_radius, mid_angle, contour_angle]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            crate::log::trace!(?outline, "dome skipped: non-finite geometry");
            return None;
        }
        Some(outline)
    }

    fn opening_style(&self) -> Style {
        let face = self
            .front_color
            .clone()
            .unwrap_or_else(|| self.style.color.clone());
        self.style
            .clone()
            .with_color(face)
            .with_backface(Backface::Color(self.style.color.clone()))
    }

    fn render_dome(&self, renderer: &mut dyn Renderer) {
        if !self.style.visible {
            return;
        }
        let Some(outline) = self.dome_outline() else {
            return;
        };
        renderer.begin(&self.dome);
        if renderer.is_immediate() {
            renderer.arcs(&outline.arcs());
        } else {
            renderer.path_data(&outline.svg_path(), Some(&outline.svg_transform()));
        }
        renderer.stroke(self.style.stroke, &self.style.color);
        renderer.fill(self.style.fill, &self.style.color);
        renderer.end();
    }
}

impl Drawable for SphericalCap {
    fn update(&mut self, frame: &Frame) {
        self.frame = *frame;
        self.base.update(frame);
        let height = self.opening_height();
        if let Some(opening) = &mut self.opening {
            let placement = Transform::new().with_translate(Vector::z(height));
            opening.update(&frame.compose(&placement));
        }
        self.apex_origin = frame.point(Vector::z(self.diameter / 2.0));
    }

    fn sort_value(&self) -> f64 {
        self.frame
            .origin()
            .lerp(self.apex_origin, self.centroid_factor)
            .z
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.render_dome(renderer);
        let mut faces: Vec<&Disc> = std::iter::once(&self.base).chain(&self.opening).collect();
        faces.sort_by(|a, b| a.sort_value().total_cmp(&b.sort_value()));
        for face in faces {
            face.render(renderer);
        }
    }

    fn style(&self) -> Option<&Style> {
        Some(&self.style)
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
        self.base.set_style(self.style.clone());
        let opening_style = self.opening_style();
        if let Some(opening) = &mut self.opening {
            opening.set_style(opening_style);
        }
    }
}
