//! Declarative output: one retained `<path>` element per draw target.
//!
//! Elements are created the first time a target is drawn and then mutated in
//! place on every later frame. The document lists them in the order they
//! were last drawn. [`SvgRenderer::end_frame`] releases the elements of
//! targets that stopped drawing.

use std::collections::HashMap;
use std::fmt::Write;

use super::{DrawTarget, EllipseArc, Renderer, RendererKind};
use crate::color::Color;
use crate::defaults;
use crate::path::Segment;
use crate::vector::Vector;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A retained `<path>` element.
///
/// Attributes keep the order they were first set in, so serialization is
/// stable across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    attributes: Vec<(&'static str, String)>,
}

impl SvgElement {
    /// A fresh path element with round caps and joins.
    pub fn path() -> Self {
        let mut element = SvgElement {
            attributes: Vec::new(),
        };
        element.set("stroke-linecap", "round");
        element.set("stroke-linejoin", "round");
        element
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| *key != name);
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::from("<path");
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        out.push_str("/>");
        out
    }
}

/// Renders into retained SVG elements.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    elements: HashMap<u64, SvgElement>,
    order: Vec<u64>,
    current: Option<u64>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame's draw order. Retained elements survive.
    pub fn begin_frame(&mut self) {
        self.order.clear();
        self.current = None;
    }

    /// Drop every retained element that was not drawn since the last
    /// [`begin_frame`](Self::begin_frame). Returns how many were dropped.
    ///
    /// Shapes that were removed, replaced or skipped this frame lose their
    /// elements; a skipped shape gets a fresh one when it next draws.
    pub fn end_frame(&mut self) -> usize {
        let before = self.elements.len();
        self.elements.retain(|id, _| self.order.contains(id));
        let dropped = before - self.elements.len();
        if dropped > 0 {
            crate::log::trace!(dropped, "pruned retained svg elements");
        }
        dropped
    }

    pub fn element(&self, target: &DrawTarget) -> Option<&SvgElement> {
        self.elements.get(&target.id())
    }

    /// Number of retained elements, drawn this frame or not.
    pub fn retained_len(&self) -> usize {
        self.elements.len()
    }

    /// Elements drawn this frame, in paint order.
    pub fn drawn(&self) -> impl Iterator<Item = &SvgElement> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Serialize this frame as a standalone document centered on the origin.
    pub fn to_svg_string(&self, width: f64, height: f64) -> String {
        self.to_svg_string_with_zoom(width, height, 1.0)
    }

    /// Like [`to_svg_string`](Self::to_svg_string), magnifying render space
    /// by `zoom` through the view box.
    pub fn to_svg_string_with_zoom(&self, width: f64, height: f64, zoom: f64) -> String {
        let (view_w, view_h) = (width / zoom, height / zoom);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">",
            SVG_NS,
            fmt_num(width),
            fmt_num(height),
            fmt_num(-view_w / 2.0),
            fmt_num(-view_h / 2.0),
            fmt_num(view_w),
            fmt_num(view_h),
        );
        for element in self.drawn() {
            let _ = writeln!(out, "  {}", element.to_markup());
        }
        out.push_str("</svg>\n");
        out
    }

    fn current_element(&mut self) -> Option<&mut SvgElement> {
        let id = self.current?;
        self.elements.get_mut(&id)
    }
}

impl Renderer for SvgRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Declarative
    }

    fn begin(&mut self, target: &DrawTarget) {
        let id = target.id();
        self.elements.entry(id).or_insert_with(|| {
            crate::log::trace!(id, "creating retained svg element");
            SvgElement::path()
        });
        self.current = Some(id);
    }

    fn path(&mut self, segments: &[Segment], closed: bool) {
        let d = path_data(segments, closed);
        if let Some(element) = self.current_element() {
            element.set("d", d);
            element.remove("transform");
        }
    }

    fn arcs(&mut self, _arcs: &[EllipseArc]) {
        crate::log::trace!("declarative renderer ignores native arcs");
    }

    fn path_data(&mut self, d: &str, transform: Option<&str>) {
        if let Some(element) = self.current_element() {
            element.set("d", d);
            match transform {
                Some(transform) => element.set("transform", transform),
                None => element.remove("transform"),
            }
        }
    }

    fn stroke(&mut self, width: Option<f64>, color: &Color) {
        if let Some(element) = self.current_element() {
            match width {
                Some(width) => {
                    element.set("stroke", color.as_css());
                    element.set("stroke-width", fmt_num(width));
                }
                None => {
                    element.remove("stroke");
                    element.remove("stroke-width");
                }
            }
        }
    }

    fn fill(&mut self, fill: bool, color: &Color) {
        if let Some(element) = self.current_element() {
            let value = if fill { color.as_css() } else { "none" };
            element.set("fill", value);
        }
    }

    fn end(&mut self) {
        if let Some(id) = self.current.take() {
            // Drawing again moves the element to the top
            self.order.retain(|drawn| *drawn != id);
            self.order.push(id);
        }
    }
}

/// Path description for render-space segments. Every point is rounded to
/// three decimals and followed by a space.
pub fn path_data(segments: &[Segment], closed: bool) -> String {
    let mut d = String::new();
    for segment in segments {
        match *segment {
            Segment::Move(p) => {
                let _ = write!(d, "M{} ", fmt_point(p));
            }
            Segment::Line(p) => {
                let _ = write!(d, "L{} ", fmt_point(p));
            }
            Segment::Bezier(a, b, p) => {
                let _ = write!(d, "C{} {} {} ", fmt_point(a), fmt_point(b), fmt_point(p));
            }
        }
    }
    if closed {
        d.push('Z');
    }
    d
}

fn fmt_point(point: Vector) -> String {
    format!("{},{}", round_coord(point.x), round_coord(point.y))
}

fn round_coord(value: f64) -> String {
    let scale = 10_f64.powi(defaults::PATH_PRECISION);
    fmt_num((value * scale).round() / scale)
}

/// Shortest round-trip formatting, with negative zero printed as `0`.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
