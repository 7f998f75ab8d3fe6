use flatland::shapes::is_apex_visible;
use flatland::{
    CanvasRenderer, Color, ConfigError, ConeOptions, Disc, DisplayList, DomeOutline, Drawable,
    Item, Node, SphericalCap, Style, SvgRenderer, TAU, Transform, TruncatedCone, Vector,
};

const EPS: f64 = 1e-9;

fn colored_disc(css: &str) -> Node {
    Node::new(Disc::new(2.0).unwrap()).with_style(Style::new().with_color(Color::parse(css).unwrap()))
}

fn paint_order(scene: &Node) -> Vec<String> {
    let mut renderer = CanvasRenderer::new(DisplayList::new());
    scene.render_graph(&mut renderer);
    renderer
        .canvas()
        .paint_colors()
        .into_iter()
        .map(|c| c.to_string())
        .collect()
}

fn svg_frame(scene: &Node, renderer: &mut SvgRenderer) -> String {
    renderer.begin_frame();
    scene.render_graph(renderer);
    renderer.to_svg_string(100.0, 100.0)
}

// ==== Construction ====

#[test]
fn composites_accept_inner_diameters_below_the_base() {
    for diameter in [0.5, 1.0, 10.0, 400.0] {
        for fraction in [0.0, 0.25, 0.5, 0.999] {
            let inner = diameter * fraction;
            assert!(TruncatedCone::new(diameter, inner, 3.0).is_ok());
            assert!(SphericalCap::new(diameter, inner).is_ok());
        }
    }
}

#[test]
fn composites_reject_inner_diameters_at_or_above_the_base() {
    for inner in [10.0, 10.5, 1e6] {
        let cone = TruncatedCone::new(10.0, inner, 3.0);
        assert!(
            matches!(cone, Err(ConfigError::InnerDiameterTooLarge { .. })),
            "cone with front {inner} should fail"
        );
        let cap = SphericalCap::new(10.0, inner);
        assert!(
            matches!(cap, Err(ConfigError::InnerDiameterTooLarge { .. })),
            "cap with opening {inner} should fail"
        );
    }
}

#[test]
fn configuration_errors_carry_diagnostic_codes() {
    use miette::Diagnostic;
    let err = TruncatedCone::new(1.0, 2.0, 1.0).unwrap_err();
    assert_eq!(
        err.code().unwrap().to_string(),
        "flatland::config::inner_diameter_too_large"
    );
    assert!(err.to_string().contains("TruncatedCone"));
}

#[test]
fn non_finite_parameters_are_rejected() {
    assert!(matches!(
        ConeOptions::new().length(f64::NAN).build(),
        Err(ConfigError::NonFinite { field: "length", .. })
    ));
}

// ==== Centroids ====

#[test]
fn hemisphere_centroid_is_three_eighths_for_any_diameter() {
    for diameter in [0.1, 1.0, 3.7, 1000.0] {
        let cap = SphericalCap::hemisphere(diameter).unwrap();
        assert!((cap.centroid_factor() - 3.0 / 8.0).abs() < EPS);
    }
}

#[test]
fn cone_centroid_approaches_a_third_as_the_front_shrinks() {
    let mut previous = f64::INFINITY;
    for front in [1.0, 0.1, 0.01, 1e-6] {
        let cone = TruncatedCone::new(2.0, front, 1.0).unwrap();
        let error = (cone.centroid_factor() - 1.0 / 3.0).abs();
        assert!(error < previous);
        previous = error;
    }
    assert!(previous < 1e-6);
    let pointed = TruncatedCone::new(2.0, 0.0, 1.0).unwrap();
    assert!((pointed.centroid_factor() - 1.0 / 3.0).abs() < EPS);
}

// ==== Cone surface ====

fn cone_at(length: f64, tilt: f64) -> TruncatedCone {
    let mut cone = TruncatedCone::new(2.0, 0.0, length).unwrap();
    cone.update(&flatland::Frame::IDENTITY.compose(&Transform::new().with_rotate(Vector::x(tilt))));
    cone
}

#[test]
fn apex_visibility_flips_across_the_threshold() {
    // At an eighth-turn tilt the base squashes to cos(45°) while the apex
    // drifts length * sin(45°), so the threshold length is 1.
    let tilt = -TAU / 8.0;
    assert!(cone_at(1.001, tilt).surface_outline().is_some());
    assert!(cone_at(0.999, tilt).surface_outline().is_none());
}

#[test]
fn apex_exactly_on_the_base_outline_is_hidden() {
    assert!(!is_apex_visible(1.0, 0.5, 0.5));
    assert!(!is_apex_visible(3.0, 1.0, 3.0));
    assert!(is_apex_visible(3.0, 1.0, 3.0 + EPS));
}

#[test]
fn hidden_surface_is_not_drawn() {
    let cone = cone_at(0.5, -TAU / 8.0);
    let mut renderer = SvgRenderer::new();
    cone.render(&mut renderer);
    assert!(renderer.element(cone.surface_target()).is_none());
    assert!(renderer.element(cone.base().target()).is_some());
}

// ==== Draw order ====

#[test]
fn equal_sort_values_keep_insertion_order() {
    let mut scene = Node::anchor()
        .with_child(colored_disc("#a00"))
        .with_child(colored_disc("#0b0"));
    for _ in 0..100 {
        scene.update_graph();
        assert_eq!(paint_order(&scene), ["#a00", "#0b0"]);
    }
}

#[test]
fn larger_sort_values_render_later() {
    let build = |first_z: f64, second_z: f64| {
        let mut scene = Node::anchor()
            .with_child(colored_disc("#a00").with_translate(Vector::z(first_z)))
            .with_child(colored_disc("#0b0").with_translate(Vector::z(second_z)));
        scene.update_graph();
        scene
    };
    assert_eq!(paint_order(&build(-1.0, 1.0)), ["#a00", "#0b0"]);
    assert_eq!(paint_order(&build(1.0, -1.0)), ["#0b0", "#a00"]);
}

#[test]
fn sorting_is_local_to_each_parent() {
    // The far group's child is nearer than anything in the near group, but
    // groups are ordered by their own origins.
    let far_group = Node::anchor()
        .with_translate(Vector::z(-5.0))
        .with_child(colored_disc("#a00").with_translate(Vector::z(20.0)));
    let near_group = Node::anchor()
        .with_translate(Vector::z(5.0))
        .with_child(colored_disc("#0b0"));
    let mut scene = Node::anchor().with_child(near_group).with_child(far_group);
    scene.update_graph();
    assert_eq!(paint_order(&scene), ["#a00", "#0b0"]);
}

#[test]
fn node_draws_its_own_item_before_children() {
    let mut scene = colored_disc("#a00").with_child(colored_disc("#0b0").with_translate(Vector::z(-3.0)));
    scene.update_graph();
    assert_eq!(paint_order(&scene), ["#a00", "#0b0"]);
}

// ==== Frame passes ====

#[test]
fn render_uses_state_from_the_last_update() {
    let mut scene = Node::anchor().with_child(
        Node::new(TruncatedCone::new(4.0, 1.0, 3.0).unwrap()).with_rotate(Vector::x(0.4)),
    );
    scene.update_graph();

    let mut before = CanvasRenderer::new(DisplayList::new());
    scene.render_graph(&mut before);

    scene.child_mut(0).unwrap().transform.rotate = Vector::new(1.2, 0.3, 0.0);
    let mut stale = CanvasRenderer::new(DisplayList::new());
    scene.render_graph(&mut stale);
    assert_eq!(before.canvas().ops(), stale.canvas().ops());

    scene.update_graph();
    let mut fresh = CanvasRenderer::new(DisplayList::new());
    scene.render_graph(&mut fresh);
    assert_ne!(before.canvas().ops(), fresh.canvas().ops());
}

#[test]
fn repeated_updates_are_idempotent() {
    let mut scene = Node::anchor()
        .with_rotate(Vector::new(0.3, -0.8, 0.1))
        .with_child(Node::new(SphericalCap::new(6.0, 3.0).unwrap()).with_translate(Vector::x(4.0)))
        .with_child(Node::new(TruncatedCone::new(4.0, 2.0, 5.0).unwrap()));
    let mut renderer = SvgRenderer::new();

    scene.update_graph();
    let frames: Vec<_> = scene.children().iter().map(|c| (*c.frame(), c.sort_value())).collect();
    let first = svg_frame(&scene, &mut renderer);

    scene.update_graph();
    let again: Vec<_> = scene.children().iter().map(|c| (*c.frame(), c.sort_value())).collect();
    let second = svg_frame(&scene, &mut renderer);

    assert_eq!(frames, again);
    assert_eq!(first, second);
}

// ==== Declarative output ====

#[test]
fn dome_path_golden() {
    let outline = DomeOutline {
        center: Vector::ZERO,
        base_radius: 6.5,
        dome_radius: 4.2,
        mid_angle: 0.0,
        contour_angle: 0.0,
    };
    assert_eq!(
        outline.svg_path(),
        "M -6.5,0 A 6.5,4.2 0 0 1 0,-4.2 H 0 A 6.5,4.2 0 0 1 6.5,0"
    );
    assert_eq!(outline.svg_transform(), "translate(0,0) rotate(-90)");
}

#[test]
fn dome_transform_follows_the_base_origin() {
    let outline = DomeOutline {
        center: Vector::new(12.5, -3.0, 7.0),
        base_radius: 2.0,
        dome_radius: 2.0,
        mid_angle: 0.0,
        contour_angle: TAU / 4.0,
    };
    assert_eq!(outline.svg_transform(), "translate(12.5,-3) rotate(0)");
}

#[test]
fn retained_elements_are_reused_across_frames() {
    let mut scene = Node::anchor().with_child(Node::new(SphericalCap::new(6.0, 2.0).unwrap()));
    let mut renderer = SvgRenderer::new();
    for step in 0..5 {
        scene.transform.rotate = Vector::y(step as f64 * 0.3);
        scene.update_graph();
        svg_frame(&scene, &mut renderer);
    }
    // Dome, base and opening
    assert_eq!(renderer.retained_len(), 3);
}

#[test]
fn rebuilt_scenes_release_their_old_elements() {
    let mut renderer = SvgRenderer::new();
    for _ in 0..100 {
        let mut scene = Node::anchor().with_child(
            Node::new(SphericalCap::new(6.0, 2.0).unwrap()).with_rotate(Vector::x(-0.6)),
        );
        scene.update_graph();
        svg_frame(&scene, &mut renderer);
        renderer.end_frame();
    }
    // Dome, base and opening of the latest build only
    assert_eq!(renderer.retained_len(), 3);

    renderer.begin_frame();
    renderer.end_frame();
    assert_eq!(renderer.retained_len(), 0);
    assert_eq!(renderer.to_svg_string(10.0, 10.0).lines().count(), 2);
}

#[test]
fn copies_get_their_own_elements() {
    let original = Node::new(TruncatedCone::new(4.0, 2.0, 3.0).unwrap()).with_rotate(Vector::x(-0.5));
    let copy = original.copy().with_translate(Vector::x(10.0));
    let mut scene = Node::anchor().with_child(original).with_child(copy);
    scene.update_graph();

    let mut renderer = SvgRenderer::new();
    svg_frame(&scene, &mut renderer);
    // Surface, base and front face for each cone
    assert_eq!(renderer.retained_len(), 6);

    let (Item::TruncatedCone(a), Item::TruncatedCone(b)) =
        (scene.child(0).unwrap().item(), scene.child(1).unwrap().item())
    else {
        panic!("expected two cones");
    };
    assert_ne!(a.surface_target(), b.surface_target());
    assert_eq!(a.centroid_factor(), b.centroid_factor());
}
