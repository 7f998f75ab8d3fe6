use flatland::{Color, Disc, Node, Path, PathShape, SvgRenderer, Style, Vector};
use insta::assert_snapshot;

fn render(scene: &mut Node, width: f64, height: f64) -> String {
    scene.update_graph();
    let mut renderer = SvgRenderer::new();
    renderer.begin_frame();
    scene.render_graph(&mut renderer);
    renderer.to_svg_string(width, height)
}

fn color(css: &str) -> Color {
    Color::parse(css).unwrap()
}

#[test]
fn open_line() {
    let line = PathShape::new(Path::from_points([
        Vector::new(-10.0, 0.0, 0.0),
        Vector::new(10.0, 5.0, 0.0),
    ]))
    .with_style(Style::new().with_color(color("#C25")).with_stroke(Some(2.0)));
    let mut scene = Node::anchor().with_child(Node::new(line));

    assert_snapshot!(render(&mut scene, 40.0, 20.0), @r##"
    <svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="-20 -10 40 20">
      <path stroke-linecap="round" stroke-linejoin="round" d="M-10,0 L10,5 " stroke="#C25" stroke-width="2" fill="none"/>
    </svg>
    "##);
}

#[test]
fn unit_disc_outline() {
    let mut scene = Node::anchor().with_child(Node::new(Disc::new(2.0).unwrap()));

    assert_snapshot!(render(&mut scene, 4.0, 4.0), @r##"
    <svg xmlns="http://www.w3.org/2000/svg" width="4" height="4" viewBox="-2 -2 4 4">
      <path stroke-linecap="round" stroke-linejoin="round" d="M0,-1 C0.563,-1 1,-0.563 1,0 C1,0.563 0.563,1 0,1 C-0.563,1 -1,0.563 -1,0 C-1,-0.563 -0.563,-1 0,-1 Z" stroke="#333" stroke-width="1" fill="none"/>
    </svg>
    "##);
}

#[test]
fn nearer_disc_is_painted_last() {
    let near = Node::new(Disc::new(2.0).unwrap())
        .with_style(Style::new().with_color(color("#f00")).with_fill(true).with_stroke(None))
        .with_translate(Vector::z(1.0));
    let far = Node::new(Disc::new(2.0).unwrap())
        .with_style(Style::new().with_color(color("#00f")).with_fill(true).with_stroke(None))
        .with_translate(Vector::new(1.0, 0.0, -1.0));
    let mut scene = Node::anchor().with_child(near).with_child(far);

    assert_snapshot!(render(&mut scene, 10.0, 10.0), @r##"
    <svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="-5 -5 10 10">
      <path stroke-linecap="round" stroke-linejoin="round" d="M1,-1 C1.563,-1 2,-0.563 2,0 C2,0.563 1.563,1 1,1 C0.438,1 0,0.563 0,0 C0,-0.563 0.438,-1 1,-1 Z" fill="#00f"/>
      <path stroke-linecap="round" stroke-linejoin="round" d="M0,-1 C0.563,-1 1,-0.563 1,0 C1,0.563 0.563,1 0,1 C-0.563,1 -1,0.563 -1,0 C-1,-0.563 -0.563,-1 0,-1 Z" fill="#f00"/>
    </svg>
    "##);
}
