//! Immediate-mode output
//!
//! [`Canvas`] is a minimal 2D drawing context: build a path, then stroke and
//! fill it. [`CanvasRenderer`] adapts any canvas to [`Renderer`].
//! Two canvases ship here: [`DisplayList`] records operations for replay and
//! inspection, and [`PixmapCanvas`] rasterizes through tiny-skia.

use glam::{DVec2, dvec2};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke};

use super::{DrawTarget, EllipseArc, Renderer, RendererKind};
use crate::color::Color;
use crate::errors::RenderError;
use crate::path::Segment;
use crate::vector::TAU;

/// A 2D drawing context. Coordinates are render-space x and y.
pub trait Canvas {
    fn begin_path(&mut self);
    fn move_to(&mut self, point: DVec2);
    fn line_to(&mut self, point: DVec2);
    fn bezier_curve_to(&mut self, control_a: DVec2, control_b: DVec2, end: DVec2);
    /// Append an elliptical arc. When a subpath is open, a straight line joins
    /// its current point to the arc's start.
    fn ellipse(&mut self, arc: &EllipseArc);
    fn close_path(&mut self);
    fn stroke(&mut self, color: &Color, width: f64);
    fn fill(&mut self, color: &Color);
}

// ============================================================================
// Display list
// ============================================================================

/// A recorded canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    BeginPath,
    MoveTo(DVec2),
    LineTo(DVec2),
    BezierCurveTo(DVec2, DVec2, DVec2),
    Ellipse(EllipseArc),
    ClosePath,
    Stroke { color: Color, width: f64 },
    Fill { color: Color },
}

/// A canvas that records what it is asked to draw.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    ops: Vec<CanvasOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Colors of every stroke and fill, in paint order.
    pub fn paint_colors(&self) -> Vec<&Color> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Stroke { color, .. } | CanvasOp::Fill { color } => Some(color),
                _ => None,
            })
            .collect()
    }

    /// Play the recording onto another canvas.
    pub fn replay(&self, canvas: &mut impl Canvas) {
        for op in &self.ops {
            match op {
                CanvasOp::BeginPath => canvas.begin_path(),
                CanvasOp::MoveTo(p) => canvas.move_to(*p),
                CanvasOp::LineTo(p) => canvas.line_to(*p),
                CanvasOp::BezierCurveTo(a, b, p) => canvas.bezier_curve_to(*a, *b, *p),
                CanvasOp::Ellipse(arc) => canvas.ellipse(arc),
                CanvasOp::ClosePath => canvas.close_path(),
                CanvasOp::Stroke { color, width } => canvas.stroke(color, *width),
                CanvasOp::Fill { color } => canvas.fill(color),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn begin_path(&mut self) {
        self.ops.push(CanvasOp::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.ops.push(CanvasOp::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.ops.push(CanvasOp::LineTo(point));
    }

    fn bezier_curve_to(&mut self, control_a: DVec2, control_b: DVec2, end: DVec2) {
        self.ops
            .push(CanvasOp::BezierCurveTo(control_a, control_b, end));
    }

    fn ellipse(&mut self, arc: &EllipseArc) {
        self.ops.push(CanvasOp::Ellipse(*arc));
    }

    fn close_path(&mut self) {
        self.ops.push(CanvasOp::ClosePath);
    }

    fn stroke(&mut self, color: &Color, width: f64) {
        self.ops.push(CanvasOp::Stroke {
            color: color.clone(),
            width,
        });
    }

    fn fill(&mut self, color: &Color) {
        self.ops.push(CanvasOp::Fill {
            color: color.clone(),
        });
    }
}

// ============================================================================
// Raster canvas
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum PathEl {
    MoveTo(DVec2),
    LineTo(DVec2),
    CubicTo(DVec2, DVec2, DVec2),
    Close,
}

/// A canvas that rasterizes into an RGBA pixmap.
///
/// Render-space `(0, 0)` sits at the center of the surface.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    transform: tiny_skia::Transform,
    elements: Vec<PathEl>,
    current: Option<DVec2>,
    subpath_start: Option<DVec2>,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSurface { width, height })?;
        crate::log::debug!(width, height, "allocated raster surface");
        Ok(Self {
            pixmap,
            transform: tiny_skia::Transform::from_translate(width as f32 / 2.0, height as f32 / 2.0),
            elements: Vec::new(),
            current: None,
            subpath_start: None,
        })
    }

    /// Scale render space by `zoom` about the surface center.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        let (w, h) = (self.pixmap.width() as f32, self.pixmap.height() as f32);
        self.transform = tiny_skia::Transform::from_translate(w / 2.0, h / 2.0)
            .pre_scale(zoom as f32, zoom as f32);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fill the whole surface with `color`, discarding previous frames.
    pub fn clear(&mut self, color: &Color) {
        self.pixmap.fill(skia_color(color));
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`, in surface coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap
            .pixel(x, y)
            .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    fn push_point(&mut self, point: DVec2) {
        if self.current.is_some() {
            self.line_to(point);
        } else {
            self.move_to(point);
        }
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
                PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
                PathEl::CubicTo(a, b, p) => pb.cubic_to(
                    a.x as f32, a.y as f32, b.x as f32, b.y as f32, p.x as f32, p.y as f32,
                ),
                PathEl::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

impl Canvas for PixmapCanvas {
    fn begin_path(&mut self) {
        self.elements.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, point: DVec2) {
        self.elements.push(PathEl::MoveTo(point));
        self.current = Some(point);
        self.subpath_start = Some(point);
    }

    fn line_to(&mut self, point: DVec2) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.elements.push(PathEl::LineTo(point));
        self.current = Some(point);
    }

    fn bezier_curve_to(&mut self, control_a: DVec2, control_b: DVec2, end: DVec2) {
        if self.current.is_none() {
            self.move_to(control_a);
        }
        self.elements.push(PathEl::CubicTo(control_a, control_b, end));
        self.current = Some(end);
    }

    fn ellipse(&mut self, arc: &EllipseArc) {
        let (start, curves) = ellipse_to_cubics(arc);
        self.push_point(start);
        for [a, b, p] in curves {
            self.elements.push(PathEl::CubicTo(a, b, p));
            self.current = Some(p);
        }
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.elements.push(PathEl::Close);
            self.current = self.subpath_start;
        }
    }

    fn stroke(&mut self, color: &Color, width: f64) {
        let Some(path) = self.build_path() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }

    fn fill(&mut self, color: &Color) {
        let Some(path) = self.build_path() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(skia_color(color));
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
    }
}

fn skia_color(color: &Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Approximate an elliptical arc with cubic beziers, at most a quarter turn
/// each. Returns the arc's start point and the curves that follow it.
///
/// The sweep runs clockwise in screen space (increasing angle) from
/// `start_angle` to `end_angle`, wrapping like a 2D canvas context does.
pub fn ellipse_to_cubics(arc: &EllipseArc) -> (DVec2, Vec<[DVec2; 3]>) {
    let raw_sweep = arc.end_angle - arc.start_angle;
    let sweep = if raw_sweep >= TAU {
        TAU
    } else {
        raw_sweep.rem_euclid(TAU)
    };

    let center = dvec2(arc.center.x, arc.center.y);
    let axes = DVec2::from_angle(arc.rotation);
    let radii = dvec2(arc.radius_x, arc.radius_y);
    let map = |unit: DVec2| center + axes.rotate(unit * radii);

    let start = map(DVec2::from_angle(arc.start_angle));
    if sweep == 0.0 {
        return (start, Vec::new());
    }

    let count = (sweep / (TAU / 4.0)).ceil().max(1.0) as usize;
    let step = sweep / count as f64;
    let handle = 4.0 / 3.0 * (step / 4.0).tan();

    let mut curves = Vec::with_capacity(count);
    let mut angle = arc.start_angle;
    for _ in 0..count {
        let next = angle + step;
        let p0 = DVec2::from_angle(angle);
        let p3 = DVec2::from_angle(next);
        // Tangents of the unit circle at each end
        let t0 = dvec2(-p0.y, p0.x);
        let t3 = dvec2(-p3.y, p3.x);
        curves.push([map(p0 + t0 * handle), map(p3 - t3 * handle), map(p3)]);
        angle = next;
    }
    (start, curves)
}

// ============================================================================
// Renderer adapter
// ============================================================================

/// Drives a [`Canvas`] as a [`Renderer`].
#[derive(Debug, Default)]
pub struct CanvasRenderer<C> {
    canvas: C,
}

impl<C: Canvas> CanvasRenderer<C> {
    pub fn new(canvas: C) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

impl<C: Canvas> Renderer for CanvasRenderer<C> {
    fn kind(&self) -> RendererKind {
        RendererKind::Immediate
    }

    fn begin(&mut self, _target: &DrawTarget) {
        self.canvas.begin_path();
    }

    fn path(&mut self, segments: &[Segment], closed: bool) {
        for segment in segments {
            match *segment {
                Segment::Move(p) => self.canvas.move_to(p.xy()),
                Segment::Line(p) => self.canvas.line_to(p.xy()),
                Segment::Bezier(a, b, p) => self.canvas.bezier_curve_to(a.xy(), b.xy(), p.xy()),
            }
        }
        if closed {
            self.canvas.close_path();
        }
    }

    fn arcs(&mut self, arcs: &[EllipseArc]) {
        for arc in arcs {
            self.canvas.ellipse(arc);
        }
    }

    fn path_data(&mut self, _d: &str, _transform: Option<&str>) {
        crate::log::trace!("immediate renderer ignores path data");
    }

    fn stroke(&mut self, width: Option<f64>, color: &Color) {
        if let Some(width) = width {
            self.canvas.stroke(color, width);
        }
    }

    fn fill(&mut self, fill: bool, color: &Color) {
        if fill {
            self.canvas.fill(color);
        }
    }

    fn end(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;

    fn full_circle(radius: f64) -> EllipseArc {
        EllipseArc {
            center: Vector::ZERO,
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            start_angle: 0.0,
            end_angle: TAU,
        }
    }

    #[test]
    fn full_ellipse_uses_four_quarter_curves() {
        let (start, curves) = ellipse_to_cubics(&full_circle(2.0));
        assert_eq!(curves.len(), 4);
        assert!((start - dvec2(2.0, 0.0)).length() < 1e-12);
        let end = curves[3][2];
        assert!((end - dvec2(2.0, 0.0)).length() < 1e-9);
        // Quarter turn ends at +y (screen down)
        assert!((curves[0][2] - dvec2(0.0, 2.0)).length() < 1e-9);
    }

    #[test]
    fn rotated_ellipse_maps_its_axes() {
        let arc = EllipseArc {
            center: Vector::new(1.0, 1.0, 0.0),
            radius_x: 3.0,
            radius_y: 1.0,
            rotation: TAU / 4.0,
            start_angle: 0.0,
            end_angle: TAU / 4.0,
        };
        let (start, curves) = ellipse_to_cubics(&arc);
        // The x radius now points down the screen
        assert!((start - dvec2(1.0, 4.0)).length() < 1e-9);
        assert!((curves[0][2] - dvec2(0.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn empty_sweep_has_no_curves() {
        let mut arc = full_circle(1.0);
        arc.start_angle = 1.0;
        arc.end_angle = 1.0;
        assert!(ellipse_to_cubics(&arc).1.is_empty());
    }

    #[test]
    fn renderer_skips_disabled_stroke_and_fill() {
        let mut renderer = CanvasRenderer::new(DisplayList::new());
        let color = Color::rgb(1, 2, 3);
        renderer.begin(&DrawTarget::new());
        renderer.path(&[Segment::Move(Vector::ZERO), Segment::Line(Vector::x(1.0))], false);
        renderer.stroke(None, &color);
        renderer.fill(false, &color);
        renderer.end();
        assert_eq!(
            renderer.canvas().ops(),
            &[
                CanvasOp::BeginPath,
                CanvasOp::MoveTo(dvec2(0.0, 0.0)),
                CanvasOp::LineTo(dvec2(1.0, 0.0)),
            ]
        );
    }

    #[test]
    fn pixmap_fills_a_circle_at_the_center() {
        let mut renderer = CanvasRenderer::new(PixmapCanvas::new(32, 32).unwrap());
        let color = Color::rgb(255, 0, 0);
        renderer.begin(&DrawTarget::new());
        renderer.arcs(&[full_circle(8.0)]);
        renderer.fill(true, &color);
        renderer.end();

        let canvas = renderer.canvas();
        assert_eq!(canvas.pixel(16, 16), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn zoom_magnifies_about_the_center() {
        let canvas = PixmapCanvas::new(32, 32).unwrap().with_zoom(2.0);
        let mut renderer = CanvasRenderer::new(canvas);
        renderer.begin(&DrawTarget::new());
        renderer.arcs(&[full_circle(4.0)]);
        renderer.fill(true, &Color::rgb(0, 255, 0));

        let canvas = renderer.canvas();
        assert_eq!(canvas.pixel(22, 16), Some([0, 255, 0, 255]));
        assert_eq!(canvas.pixel(27, 16), Some([0, 0, 0, 0]));
    }

    #[test]
    fn zero_sized_surface_is_an_error() {
        assert!(matches!(
            PixmapCanvas::new(0, 10),
            Err(RenderError::InvalidSurface { width: 0, height: 10 })
        ));
    }

    #[test]
    fn display_list_replays_onto_another_canvas() {
        let mut source = DisplayList::new();
        source.begin_path();
        source.ellipse(&full_circle(1.0));
        source.fill(&Color::rgb(0, 0, 255));

        let mut copy = DisplayList::new();
        source.replay(&mut copy);
        assert_eq!(copy.ops(), source.ops());
    }
}
