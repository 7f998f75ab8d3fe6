//! Truncated cone: a base disc, an optional smaller front disc, and the
//! lateral surface between them.
//!
//! The surface is never tessellated. Each frame it is reduced to the
//! quadrilateral between the tangent points of the two discs' outlines,
//! as seen from the (possibly virtual) apex.

use super::{Backface, Disc, Drawable, Style, outline_radius, outward_normal};
use crate::color::Color;
use crate::defaults;
use crate::errors::ConfigError;
use crate::path::Segment;
use crate::render::{DrawTarget, Renderer};
use crate::transform::{Frame, Transform};
use crate::vector::{TAU, Vector};

/// Construction parameters for a [`TruncatedCone`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConeOptions {
    pub diameter: f64,
    /// Diameter of the front face; 0 gives a pointed cone.
    pub front_diameter: f64,
    pub length: f64,
    pub style: Style,
    /// Color of the front face. Defaults to the main color.
    pub front_color: Option<Color>,
}

impl Default for ConeOptions {
    fn default() -> Self {
        Self {
            diameter: defaults::DIAMETER,
            front_diameter: 0.0,
            length: defaults::CONE_LENGTH,
            style: Style::solid(),
            front_color: None,
        }
    }
}

impl ConeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn front_diameter(mut self, front_diameter: f64) -> Self {
        self.front_diameter = front_diameter;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
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

    pub fn build(self) -> Result<TruncatedCone, ConfigError> {
        TruncatedCone::from_options(self)
    }
}

/// Whether the apex pokes out of the base ellipse. The boundary counts as
/// hidden.
pub fn is_apex_visible(radius: f64, eccen: f64, apex_distance: f64) -> bool {
    radius * eccen < apex_distance
}

#[derive(Debug, Clone)]
pub struct TruncatedCone {
    diameter: f64,
    front_diameter: f64,
    length: f64,
    ratio: f64,
    projected_length: f64,
    centroid_factor: f64,
    style: Style,
    front_color: Option<Color>,
    base: Disc,
    front: Option<Disc>,
    frame: Frame,
    apex_origin: Vector,
    surface: DrawTarget,
}

impl TruncatedCone {
    /// Cone with the default style.
    pub fn new(diameter: f64, front_diameter: f64, length: f64) -> Result<Self, ConfigError> {
        ConeOptions::new()
            .diameter(diameter)
            .front_diameter(front_diameter)
            .length(length)
            .build()
    }

    pub fn from_options(options: ConeOptions) -> Result<Self, ConfigError> {
        let ConeOptions {
            diameter,
            front_diameter,
            length,
            style,
            front_color,
        } = options;
        let diameter = ConfigError::check_finite("diameter", diameter)?;
        let front_diameter = ConfigError::check_finite("front_diameter", front_diameter)?;
        let length = ConfigError::check_finite("length", length)?;
        style.validate()?;

        if diameter < 0.0 {
            crate::log::warn!(diameter, "rejecting cone with negative diameter");
            return Err(ConfigError::NegativeDiameter {
                shape: "TruncatedCone",
                value: diameter,
            });
        }
        if front_diameter >= diameter {
            crate::log::warn!(front_diameter, diameter, "rejecting cone: front face too large");
            return Err(ConfigError::InnerDiameterTooLarge {
                shape: "TruncatedCone",
                inner: front_diameter,
                diameter,
            });
        }
        let front_diameter = front_diameter.max(0.0);

        // A zero-width cone collapses to a segment ending at the front face
        let ratio = if diameter == 0.0 {
            1.0
        } else {
            diameter / (diameter - front_diameter)
        };
        let projected_length = ratio * length;
        let centroid_factor = if diameter == 0.0 {
            1.0 / 3.0
        } else {
            (diameter + 2.0 * front_diameter) / ((diameter + front_diameter) * 3.0 * ratio)
        };

        let front = (front_diameter > 0.0).then(|| Disc::with_diameter(front_diameter));
        let mut cone = TruncatedCone {
            diameter,
            front_diameter,
            length,
            ratio,
            projected_length,
            centroid_factor,
            style: Style::solid(),
            front_color,
            base: Disc::with_diameter(diameter),
            front,
            frame: Frame::IDENTITY,
            apex_origin: Vector::z(projected_length),
            surface: DrawTarget::new(),
        };
        cone.set_style(style);
        Ok(cone)
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn front_diameter(&self) -> f64 {
        self.front_diameter
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// `D / (D - d)`: how far past the front face the virtual apex sits,
    /// relative to the length.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Local z of the virtual apex.
    pub fn projected_length(&self) -> f64 {
        self.projected_length
    }

    /// Fraction of the way from base to apex where the solid's centroid sits.
    pub fn centroid_factor(&self) -> f64 {
        self.centroid_factor
    }

    pub fn base(&self) -> &Disc {
        &self.base
    }

    pub fn front(&self) -> Option<&Disc> {
        self.front.as_ref()
    }

    pub fn apex_origin(&self) -> Vector {
        self.apex_origin
    }

    pub fn surface_target(&self) -> &DrawTarget {
        &self.surface
    }

    /// The lateral surface quadrilateral: base tangent, front tangent (or
    /// apex) twice, base tangent. `None` when the apex is hidden inside the
    /// base ellipse or the orientation is degenerate.
    pub fn surface_outline(&self) -> Option<[Vector; 4]> {
        let origin = self.frame.origin();
        // Points from the front face back toward the base
        let normal = outward_normal(&self.frame);

        let scale = normal.magnitude();
        let apex_distance = (self.apex_origin - origin).magnitude_2d();
        let normal_distance = normal.magnitude_2d();
        let eccen = (normal_distance / scale).acos().sin();
        let radius = outline_radius(origin, self.base.path())?;

        if !eccen.is_finite() {
            crate::log::trace!(scale, "cone surface skipped: degenerate normal");
            return None;
        }
        if !is_apex_visible(radius, eccen, apex_distance) {
            crate::log::trace!(radius, eccen, apex_distance, "cone surface skipped: apex hidden");
            return None;
        }

        let apex_angle = normal.y.atan2(normal.x) + TAU / 2.0;
        let project_length = apex_distance / eccen;
        let project_angle = (radius / project_length).acos();

        let (base_a, base_b) = tangent_points(origin, radius, eccen, project_angle, apex_angle);
        let (front_a, front_b) = match &self.front {
            Some(front) => {
                let front_origin = front.render_origin();
                let front_radius = outline_radius(front_origin, front.path())?;
                tangent_points(front_origin, front_radius, eccen, project_angle, apex_angle)
            }
            None => (self.apex_origin, self.apex_origin),
        };
        Some([base_a, front_a, front_b, base_b])
    }

    fn front_style(&self) -> Style {
        let face = self
            .front_color
            .clone()
            .unwrap_or_else(|| self.style.color.clone());
        self.style
            .clone()
            .with_color(face)
            .with_backface(Backface::Color(self.style.color.clone()))
    }

    fn render_surface(&self, renderer: &mut dyn Renderer) {
        if !self.style.visible {
            return;
        }
        let Some([a, b, c, d]) = self.surface_outline() else {
            return;
        };
        let segments = [
            Segment::Move(a),
            Segment::Line(b),
            Segment::Line(c),
            Segment::Line(d),
        ];
        renderer.begin(&self.surface);
        renderer.path(&segments, true);
        renderer.stroke(self.style.stroke, &self.style.color);
        renderer.fill(self.style.fill, &self.style.color);
        renderer.end();
    }
}

/// Tangent points on an ellipse of `radius` squashed by `eccen` along the
/// apex direction, mirrored across the apex axis.
fn tangent_points(
    origin: Vector,
    radius: f64,
    eccen: f64,
    project_angle: f64,
    apex_angle: f64,
) -> (Vector, Vector) {
    let x = project_angle.cos() * radius * eccen;
    let y = project_angle.sin() * radius;
    let a = Vector::new(x, y, 0.0).rotate_z(apex_angle) + origin;
    let b = Vector::new(x, -y, 0.0).rotate_z(apex_angle) + origin;
    (a, b)
}

impl Drawable for TruncatedCone {
    fn update(&mut self, frame: &Frame) {
        self.frame = *frame;
        self.base.update(frame);
        if let Some(front) = &mut self.front {
            let placement = Transform::new().with_translate(Vector::z(self.length));
            front.update(&frame.compose(&placement));
        }
        self.apex_origin = frame.point(Vector::z(self.projected_length));
    }

    /// Depth of the centroid, between base and apex.
    fn sort_value(&self) -> f64 {
        self.frame
            .origin()
            .lerp(self.apex_origin, self.centroid_factor)
            .z
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.render_surface(renderer);
        let mut faces: Vec<&Disc> = std::iter::once(&self.base).chain(&self.front).collect();
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
        let front_style = self.front_style();
        if let Some(front) = &mut self.front {
            front.set_style(front_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CanvasRenderer, DisplayList, SvgRenderer};

    fn tilted(angle: f64) -> Frame {
        Frame::IDENTITY.compose(&Transform::new().with_rotate(Vector::x(angle)))
    }

    #[test]
    fn rejects_front_face_at_least_as_wide_as_base() {
        for front in [2.0, 3.0] {
            assert!(matches!(
                TruncatedCone::new(2.0, front, 1.0),
                Err(ConfigError::InnerDiameterTooLarge { shape: "TruncatedCone", .. })
            ));
        }
    }

    #[test]
    fn negative_front_diameter_clamps_to_zero() {
        let cone = TruncatedCone::new(2.0, -1.0, 1.0).unwrap();
        assert_eq!(cone.front_diameter(), 0.0);
        assert!(cone.front().is_none());
    }

    #[test]
    fn virtual_apex_lies_past_the_front_face() {
        let cone = TruncatedCone::new(4.0, 2.0, 3.0).unwrap();
        assert_eq!(cone.ratio(), 2.0);
        assert_eq!(cone.projected_length(), 6.0);
        // (4 + 4) / (6 * 3 * 2)
        assert!((cone.centroid_factor() - 8.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn face_on_cone_hides_its_surface() {
        let mut cone = TruncatedCone::new(2.0, 0.0, 1.0).unwrap();
        cone.update(&Frame::IDENTITY);
        assert!(cone.surface_outline().is_none());
    }

    #[test]
    fn side_view_surface_spans_the_base() {
        let mut cone = TruncatedCone::new(2.0, 0.0, 3.0).unwrap();
        // Apex points down the screen (+y)
        cone.update(&tilted(-TAU / 4.0));
        let [a, b, c, d] = cone.surface_outline().unwrap();
        assert!((b - cone.apex_origin()).magnitude() < 1e-12);
        assert!((c - cone.apex_origin()).magnitude() < 1e-12);
        assert!((a.x.abs() - 1.0).abs() < 1e-9);
        assert!((d.x + a.x).abs() < 1e-9);
        assert!(a.y.abs() < 1e-9 && d.y.abs() < 1e-9);
    }

    #[test]
    fn side_view_truncated_surface_spans_both_faces() {
        let mut cone = TruncatedCone::new(2.0, 1.0, 2.0).unwrap();
        cone.update(&tilted(-TAU / 4.0));
        let base_origin = cone.base().render_origin();
        let front_origin = cone.front().unwrap().render_origin();
        assert!((front_origin - Vector::y(2.0)).magnitude() < 1e-9);

        let [a, b, c, d] = cone.surface_outline().unwrap();
        for (point, origin, half_width) in [
            (a, base_origin, 1.0),
            (b, front_origin, 0.5),
            (c, front_origin, 0.5),
            (d, base_origin, 1.0),
        ] {
            let offset = point - origin;
            assert!((offset.x.abs() - half_width).abs() < 1e-9, "{point} vs {origin}");
            assert!(offset.y.abs() < 1e-9, "{point} vs {origin}");
        }
        assert!((a.x + d.x).abs() < 1e-9);
        assert!((b.x + c.x).abs() < 1e-9);
        // Both tangents on the same side pair up
        assert!(a.x * b.x > 0.0);
    }

    #[test]
    fn zero_diameter_cone_keeps_a_finite_sort_value() {
        let mut cone = TruncatedCone::new(0.0, -1.0, 2.0).unwrap();
        assert_eq!(cone.ratio(), 1.0);
        assert_eq!(cone.projected_length(), 2.0);
        cone.update(&tilted(0.3));
        assert!(cone.sort_value().is_finite());
        assert!(cone.apex_origin().magnitude().is_finite());
    }

    #[test]
    fn front_face_gets_front_color_and_main_backface() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let cone = ConeOptions::new()
            .diameter(2.0)
            .front_diameter(1.0)
            .style(Style::solid().with_color(red.clone()))
            .front_color(blue.clone())
            .build()
            .unwrap();
        let front_style = cone.front().unwrap().style().unwrap();
        assert_eq!(front_style.color, blue);
        assert_eq!(front_style.backface, Backface::Color(red));
    }

    #[test]
    fn surface_renders_before_the_faces() {
        let mut cone = TruncatedCone::new(2.0, 1.0, 2.0).unwrap();
        cone.update(&tilted(-TAU / 8.0));
        let mut renderer = SvgRenderer::new();
        cone.render(&mut renderer);
        let first = renderer.drawn().next().unwrap();
        assert_eq!(first, renderer.element(cone.surface_target()).unwrap());
        assert_eq!(renderer.drawn().count(), 3);
    }

    #[test]
    fn surface_quad_is_closed() {
        let mut cone = TruncatedCone::new(2.0, 0.0, 3.0).unwrap();
        cone.update(&tilted(-TAU / 4.0));
        let mut renderer = SvgRenderer::new();
        cone.render(&mut renderer);
        let d = renderer.element(cone.surface_target()).unwrap().get("d").unwrap();
        assert!(d.starts_with('M') && d.ends_with('Z'), "{d}");
    }

    #[test]
    fn apex_visibility_boundary_is_exclusive() {
        assert!(!is_apex_visible(2.0, 0.5, 1.0));
        assert!(is_apex_visible(2.0, 0.5, 1.0 + 1e-12));
        assert!(!is_apex_visible(2.0, 0.5, 1.0 - 1e-12));
    }

    #[test]
    fn sort_value_uses_the_centroid() {
        let mut cone = TruncatedCone::new(2.0, 0.0, 3.0).unwrap();
        cone.update(&Frame::IDENTITY);
        assert!((cone.sort_value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invisible_cone_draws_nothing() {
        let mut cone = ConeOptions::new()
            .length(4.0)
            .style(Style::solid().with_visible(false))
            .build()
            .unwrap();
        cone.update(&tilted(1.0));
        let mut renderer = CanvasRenderer::new(DisplayList::new());
        cone.render(&mut renderer);
        assert!(renderer.canvas().ops().is_empty());
    }
}
