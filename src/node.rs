//! The scene tree.
//!
//! Each [`Node`] exclusively owns its children. A frame is one
//! [`update`](Node::update_graph) pass followed by one
//! [`render`](Node::render_graph) pass. Render reads only what the last
//! update cached, so edits made in between show up on the next frame.

use crate::render::Renderer;
use crate::shapes::{Anchor, Drawable, Item, Style};
use crate::transform::{Frame, Transform};
use crate::vector::Vector;

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub transform: Transform,
    item: Item,
    children: Vec<Node>,
    frame: Frame,
    sort_value: f64,
}

impl Node {
    pub fn new(item: impl Into<Item>) -> Self {
        Self {
            item: item.into(),
            ..Self::default()
        }
    }

    /// A node with nothing to draw, used to group and place children.
    pub fn anchor() -> Self {
        Self::new(Anchor::new())
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_translate(mut self, translate: Vector) -> Self {
        self.transform.translate = translate;
        self
    }

    pub fn with_rotate(mut self, rotate: Vector) -> Self {
        self.transform.rotate = rotate;
        self
    }

    pub fn with_scale(mut self, scale: Vector) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Restyle this node's item. Anchors ignore styles.
    pub fn with_style(mut self, style: Style) -> Self {
        self.item.set_style(style);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child; returns its index.
    pub fn add_child(&mut self, child: Node) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Detach and return the child at `index`. Siblings are left untouched.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.item
    }

    /// Deep copy of this subtree. Every drawable in the copy gets fresh
    /// draw targets, so it never shares retained output with the original.
    pub fn copy(&self) -> Node {
        self.clone()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn render_origin(&self) -> Vector {
        self.frame.origin()
    }

    /// Render-space image of local +z.
    pub fn render_normal(&self) -> Vector {
        self.frame.normal()
    }

    pub fn render_scale(&self) -> Vector {
        self.frame.scale()
    }

    pub fn sort_value(&self) -> f64 {
        self.sort_value
    }

    /// Update pass from the root.
    pub fn update_graph(&mut self) {
        self.update(&Frame::IDENTITY);
    }

    /// Recompute this subtree's render-space state under `parent`.
    pub fn update(&mut self, parent: &Frame) {
        self.frame = parent.compose(&self.transform);
        self.item.update(&self.frame);
        self.sort_value = self.item.sort_value();
        for child in &mut self.children {
            child.update(&self.frame);
        }
    }

    /// Render pass: this node's item, then its children from lowest to
    /// highest sort value. Ties keep insertion order.
    pub fn render_graph(&self, renderer: &mut dyn Renderer) {
        self.item.render(renderer);
        let mut ordered: Vec<&Node> = self.children.iter().collect();
        ordered.sort_by(|a, b| a.sort_value.total_cmp(&b.sort_value));
        for child in ordered {
            child.render_graph(renderer);
        }
    }
}

impl From<Item> for Node {
    fn from(item: Item) -> Self {
        Node::new(item)
    }
}
