mod scenes;

use camino::{Utf8Path, Utf8PathBuf};
use flatland::{CanvasRenderer, Color, PixmapCanvas, SvgRenderer};
use miette::{IntoDiagnostic, WrapErr};
use rayon::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

use scenes::{SCENES, Scene};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery [out_dir]    Render the demo scenes to SVG and PNG");
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "gallery" => {
            let out_dir = args
                .get(2)
                .map(Utf8PathBuf::from)
                .unwrap_or_else(default_out_dir);
            gallery(&out_dir)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

fn default_out_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target/gallery")
}

fn gallery(out_dir: &Utf8Path) -> miette::Result<()> {
    fs::create_dir_all(out_dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("creating {out_dir}"))?;

    let written: Vec<Vec<Utf8PathBuf>> = SCENES
        .par_iter()
        .map(|scene| render_scene(scene, out_dir))
        .collect::<miette::Result<_>>()?;

    for path in written.iter().flatten() {
        eprintln!("wrote {path}");
    }
    eprintln!("{} scenes rendered to {out_dir}", SCENES.len());
    Ok(())
}

fn render_scene(scene: &Scene, out_dir: &Utf8Path) -> miette::Result<Vec<Utf8PathBuf>> {
    let mut root = (scene.build)().wrap_err_with(|| format!("building scene {}", scene.name))?;
    root.update_graph();
    tracing::debug!(scene = scene.name, "scene updated");

    let size = f64::from(scene.size);
    let mut svg = SvgRenderer::new();
    svg.begin_frame();
    root.render_graph(&mut svg);
    svg.end_frame();
    let svg_path = out_dir.join(format!("{}.svg", scene.name));
    fs::write(&svg_path, svg.to_svg_string_with_zoom(size, size, scene.zoom))
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {svg_path}"))?;

    let mut canvas = PixmapCanvas::new(scene.size, scene.size)?.with_zoom(scene.zoom);
    canvas.clear(&Color::rgb(255, 255, 255));
    let mut raster = CanvasRenderer::new(canvas);
    root.render_graph(&mut raster);
    let png = raster.canvas().encode_png()?;
    let png_path = out_dir.join(format!("{}.png", scene.name));
    fs::write(&png_path, png)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {png_path}"))?;

    tracing::info!(scene = scene.name, "rendered");
    Ok(vec![svg_path, png_path])
}
