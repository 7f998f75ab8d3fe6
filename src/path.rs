//! Path commands: local control points plus their per-frame render-space copies.

use crate::defaults;
use crate::transform::Frame;
use crate::vector::Vector;

/// Segment kinds a path is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMethod {
    Move,
    Line,
    /// Two control points and an end point.
    Bezier,
    /// A quarter-ellipse: corner point and end point.
    Arc,
}

impl PathMethod {
    /// Number of control points a command of this kind holds.
    pub fn point_count(self) -> usize {
        match self {
            PathMethod::Move | PathMethod::Line => 1,
            PathMethod::Arc => 2,
            PathMethod::Bezier => 3,
        }
    }
}

/// One path command.
///
/// `render_points` is a cache: rewritten from `points` and the owner's frame
/// on every update pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    method: PathMethod,
    points: Vec<Vector>,
    render_points: Vec<Vector>,
}

impl PathCommand {
    fn new(method: PathMethod, points: Vec<Vector>) -> Self {
        debug_assert_eq!(points.len(), method.point_count());
        let render_points = points.clone();
        Self {
            method,
            points,
            render_points,
        }
    }

    pub fn move_to(point: Vector) -> Self {
        Self::new(PathMethod::Move, vec![point])
    }

    pub fn line_to(point: Vector) -> Self {
        Self::new(PathMethod::Line, vec![point])
    }

    pub fn bezier(control_a: Vector, control_b: Vector, end: Vector) -> Self {
        Self::new(PathMethod::Bezier, vec![control_a, control_b, end])
    }

    pub fn arc(corner: Vector, end: Vector) -> Self {
        Self::new(PathMethod::Arc, vec![corner, end])
    }

    pub fn method(&self) -> PathMethod {
        self.method
    }

    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    pub fn render_points(&self) -> &[Vector] {
        &self.render_points
    }

    /// Local end point.
    pub fn end_point(&self) -> Vector {
        self.points[self.points.len() - 1]
    }

    /// Render-space end point as of the last update pass.
    pub fn end_render_point(&self) -> Vector {
        self.render_points[self.render_points.len() - 1]
    }

    fn update(&mut self, frame: &Frame) {
        for (render, local) in self.render_points.iter_mut().zip(&self.points) {
            *render = frame.point(*local);
        }
    }
}

/// A render-space drawing instruction handed to a [`crate::render::Renderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Move(Vector),
    Line(Vector),
    Bezier(Vector, Vector, Vector),
}

impl Segment {
    pub fn end(&self) -> Vector {
        match *self {
            Segment::Move(p) | Segment::Line(p) => p,
            Segment::Bezier(_, _, p) => p,
        }
    }
}

/// An ordered sequence of path commands.
///
/// The first command is always a move, whatever it was declared as.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: impl IntoIterator<Item = PathCommand>) -> Self {
        let mut path = Path::new();
        for command in commands {
            path.push(command);
        }
        path
    }

    /// A polyline through `points`.
    pub fn from_points(points: impl IntoIterator<Item = Vector>) -> Self {
        Path::from_commands(points.into_iter().map(PathCommand::line_to))
    }

    pub fn push(&mut self, command: PathCommand) {
        let command = if self.commands.is_empty() && command.method != PathMethod::Move {
            // Only the end point survives being turned into a move
            PathCommand::move_to(command.end_point())
        } else {
            command
        };
        self.commands.push(command);
    }

    pub fn move_to(mut self, point: Vector) -> Self {
        self.push(PathCommand::move_to(point));
        self
    }

    pub fn line_to(mut self, point: Vector) -> Self {
        self.push(PathCommand::line_to(point));
        self
    }

    pub fn bezier_to(mut self, control_a: Vector, control_b: Vector, end: Vector) -> Self {
        self.push(PathCommand::bezier(control_a, control_b, end));
        self
    }

    pub fn arc_to(mut self, corner: Vector, end: Vector) -> Self {
        self.push(PathCommand::arc(corner, end));
        self
    }

    /// Closed circular outline of `diameter`, centered on the origin in the
    /// local (x, y) plane, starting at the top (`-y`) and running clockwise.
    pub fn circle(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Path::new()
            .move_to(Vector::new(0.0, -r, 0.0))
            .arc_to(Vector::new(r, -r, 0.0), Vector::new(r, 0.0, 0.0))
            .arc_to(Vector::new(r, r, 0.0), Vector::new(0.0, r, 0.0))
            .arc_to(Vector::new(-r, r, 0.0), Vector::new(-r, 0.0, 0.0))
            .arc_to(Vector::new(-r, -r, 0.0), Vector::new(0.0, -r, 0.0))
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// A lone point, drawn as a dot.
    pub fn is_dot(&self) -> bool {
        self.commands.len() == 1
    }

    /// A single move+line pair never gets closed.
    pub fn is_two_point_line(&self) -> bool {
        self.commands.len() == 2 && self.commands[1].method == PathMethod::Line
    }

    /// Recompute every render point from `frame`.
    pub fn update(&mut self, frame: &Frame) {
        for command in &mut self.commands {
            command.update(frame);
        }
    }

    /// Render-space position of the first control point.
    pub fn first_render_point(&self) -> Option<Vector> {
        self.commands.first().map(|c| c.render_points[0])
    }

    /// Mean render-space z of the command end points, counting a point the
    /// path closes back onto only once.
    pub fn mean_render_z(&self) -> Option<f64> {
        let first = self.commands.first()?.end_render_point();
        let last = self.commands.last()?.end_render_point();
        let mut count = self.commands.len();
        if count > 2 && first.is_same(last) {
            count -= 1;
        }
        let total: f64 = self.commands[..count]
            .iter()
            .map(|c| c.end_render_point().z)
            .sum();
        Some(total / count as f64)
    }

    /// Expand into render-space segments; arcs become cubic beziers.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.commands.len());
        let mut previous = Vector::ZERO;
        for command in &self.commands {
            let rp = &command.render_points;
            let segment = match command.method {
                PathMethod::Move => Segment::Move(rp[0]),
                PathMethod::Line => Segment::Line(rp[0]),
                PathMethod::Bezier => Segment::Bezier(rp[0], rp[1], rp[2]),
                PathMethod::Arc => arc_segment(previous, rp[0], rp[1]),
            };
            previous = segment.end();
            segments.push(segment);
        }
        segments
    }
}

/// Quarter-ellipse from `start` to `end` bulging toward `corner`.
pub fn arc_segment(start: Vector, corner: Vector, end: Vector) -> Segment {
    let control_a = start.lerp(corner, defaults::ARC_HANDLE_LENGTH);
    let control_b = end.lerp(corner, defaults::ARC_HANDLE_LENGTH);
    Segment::Bezier(control_a, control_b, end)
}
