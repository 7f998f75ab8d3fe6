//! Demo scenes rendered by `cargo xtask gallery`.

use flatland::{
    Backface, CapOptions, Color, ConeOptions, ConfigError, Node, Style, TAU, Vector,
};

const EGGPLANT: &str = "#636";
const GARNET: &str = "#C25";
const ORANGE: &str = "#E62";
const GOLD: &str = "#EA0";
const YELLOW: &str = "#ED0";
const NAVY: &str = "#249";

pub struct Scene {
    pub name: &'static str,
    /// Output width and height in pixels.
    pub size: u32,
    pub zoom: f64,
    pub build: fn() -> Result<Node, ConfigError>,
}

pub const SCENES: &[Scene] = &[
    Scene {
        name: "hourglass",
        size: 320,
        zoom: 48.0,
        build: hourglass,
    },
    Scene {
        name: "cone",
        size: 320,
        zoom: 48.0,
        build: cone,
    },
    Scene {
        name: "frustum",
        size: 320,
        zoom: 48.0,
        build: frustum,
    },
    Scene {
        name: "bowl",
        size: 320,
        zoom: 48.0,
        build: bowl,
    },
    Scene {
        name: "ring",
        size: 480,
        zoom: 8.0,
        build: ring,
    },
];

fn color(css: &str) -> Result<Color, ConfigError> {
    Color::parse(css)
}

/// Camera tilt shared by the single-solid scenes.
fn view() -> Node {
    Node::anchor().with_rotate(Vector::new(-TAU / 14.0, TAU / 10.0, 0.0))
}

fn hourglass() -> Result<Node, ConfigError> {
    let upper = Node::new(
        CapOptions::new()
            .diameter(2.0)
            .style(
                Style::new()
                    .with_color(color(GARNET)?)
                    .with_backface(Backface::Color(color(ORANGE)?))
                    .with_stroke(Some(0.5)),
            )
            .build()?,
    )
    .with_translate(Vector::z(-1.0));

    let lower = upper
        .copy()
        .with_translate(Vector::z(1.0))
        .with_rotate(Vector::y(TAU / 2.0))
        .with_style(
            Style::new()
                .with_color(color(EGGPLANT)?)
                .with_backface(Backface::Color(color(GOLD)?))
                .with_stroke(Some(0.5)),
        );

    Ok(view().with_child(upper).with_child(lower))
}

fn cone() -> Result<Node, ConfigError> {
    let cone = ConeOptions::new()
        .diameter(2.0)
        .length(2.0)
        .style(Style::solid().with_color(color(GOLD)?).with_stroke(None))
        .build()?;
    Ok(view().with_child(Node::new(cone).with_translate(Vector::z(-1.0))))
}

fn frustum() -> Result<Node, ConfigError> {
    let frustum = ConeOptions::new()
        .diameter(2.0)
        .front_diameter(1.2)
        .length(1.5)
        .style(Style::solid().with_color(color(NAVY)?).with_stroke(Some(0.1)))
        .front_color(color(YELLOW)?)
        .build()?;
    Ok(view().with_child(Node::new(frustum).with_translate(Vector::z(-0.75))))
}

fn bowl() -> Result<Node, ConfigError> {
    let bowl = CapOptions::new()
        .diameter(2.0)
        .opening_diameter(1.2)
        .style(Style::solid().with_color(color(GARNET)?).with_stroke(None))
        .front_color(color(ORANGE)?)
        .build()?;
    Ok(view().with_child(Node::new(bowl).with_rotate(Vector::x(TAU / 2.0))))
}

/// Five spokes of alternating caps and cones around a pair of hemispheres.
fn ring() -> Result<Node, ConfigError> {
    let wheel = [NAVY, GARNET, ORANGE, GOLD, YELLOW];
    let hemi = Node::new(
        CapOptions::new()
            .diameter(13.0)
            .style(
                Style::solid()
                    .with_color(color(GARNET)?)
                    .with_backface(Backface::Color(color(NAVY)?))
                    .with_stroke(None),
            )
            .build()?,
    );

    let mut root = Node::anchor()
        .with_rotate(Vector::x(-TAU / 16.0))
        .with_child(
            hemi.copy()
                .with_translate(Vector::y(-16.0))
                .with_rotate(Vector::x(-TAU / 4.0)),
        )
        .with_child(
            hemi.copy()
                .with_translate(Vector::y(16.0))
                .with_rotate(Vector::x(TAU / 4.0)),
        );

    for (i, css) in wheel.iter().enumerate() {
        let style = Style::solid().with_color(color(css)?).with_stroke(None);
        let solid = if i % 2 == 0 {
            Node::new(
                ConeOptions::new()
                    .diameter(6.0)
                    .length(8.0)
                    .style(style)
                    .build()?,
            )
        } else {
            Node::new(
                CapOptions::new()
                    .diameter(7.0)
                    .opening_diameter(3.0)
                    .style(style)
                    .front_color(color(NAVY)?)
                    .build()?,
            )
        };
        let spoke = Node::anchor()
            .with_rotate(Vector::x(TAU / 6.0))
            .with_child(solid.with_translate(Vector::z(14.0)));
        root.add_child(
            Node::anchor()
                .with_rotate(Vector::y(TAU / 5.0 * i as f64))
                .with_child(spoke),
        );
    }
    Ok(root)
}
