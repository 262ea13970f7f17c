//! Render command - write animation frames to PNG files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rat_tide::{Scene, WaveField, WaveGauge};

use super::common::render_scene;
use super::recipe::{load_recipe, Recipe, WidgetKind};

/// Execute the render command.
pub fn cmd_render(args: &[String]) {
    let mut recipe = Recipe::default();
    let mut frames = 60usize;
    let mut output_dir: Option<PathBuf> = None;
    let mut widget_override: Option<WidgetKind> = None;
    let mut width_override: Option<f64> = None;
    let mut height_override: Option<f64> = None;
    let mut progress_override: Option<i32> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-w" | "--widget" => {
                i += 1;
                if i < args.len() {
                    match WidgetKind::from_name(&args[i]) {
                        Some(kind) => widget_override = Some(kind),
                        None => {
                            eprintln!("Unknown widget: {}. Use 'field' or 'gauge'.", args[i]);
                            std::process::exit(1);
                        }
                    }
                }
            }
            "-n" | "--frames" => {
                i += 1;
                if i < args.len() {
                    frames = args[i].parse().unwrap_or(60);
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_dir = Some(PathBuf::from(&args[i]));
                }
            }
            "--width" => {
                i += 1;
                if i < args.len() {
                    width_override = args[i].parse().ok();
                }
            }
            "--height" => {
                i += 1;
                if i < args.len() {
                    height_override = args[i].parse().ok();
                }
            }
            "-p" | "--progress" => {
                i += 1;
                if i < args.len() {
                    progress_override = args[i].parse().ok();
                }
            }
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    match load_recipe(Path::new(&args[i])) {
                        Ok(loaded) => recipe = loaded,
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            std::process::exit(1);
                        }
                    }
                }
            }
            other => {
                eprintln!("Unknown render option: {}", other);
                print_render_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let widget = widget_override.unwrap_or(recipe.widget);
    let width = width_override.unwrap_or(recipe.surface.width);
    let height = height_override.unwrap_or(recipe.surface.height);
    let progress = progress_override.or(recipe.progress);

    let output_dir = output_dir.unwrap_or_else(|| {
        PathBuf::from(format!(
            "rat-tide-frames-{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ))
    });

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("Failed to create {}: {}", output_dir.display(), e);
        std::process::exit(1);
    }

    let start = Instant::now();
    let written = match widget {
        WidgetKind::Field => render_field(&recipe, width, height, frames, &output_dir),
        WidgetKind::Gauge => render_gauge(&recipe, width, height, frames, progress, &output_dir),
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "Wrote {} frame(s) to {} in {:.1}ms",
        written,
        output_dir.display(),
        elapsed_ms
    );
}

fn write_frame(scene: &Scene, dir: &Path, index: usize) {
    let img = render_scene(scene);
    let path = dir.join(format!("frame_{:04}.png", index));
    if let Err(e) = img.save(&path) {
        eprintln!("Failed to write {}: {}", path.display(), e);
        std::process::exit(1);
    }
}

fn render_field(
    recipe: &Recipe,
    width: f64,
    height: f64,
    frames: usize,
    dir: &Path,
) -> usize {
    let mut field = WaveField::new(recipe.style.to_field_style());
    field.layout(width, height);

    for frame in 0..frames {
        write_frame(&field.scene(), dir, frame);
        field.tick();
    }
    frames
}

fn render_gauge(
    recipe: &Recipe,
    width: f64,
    height: f64,
    frames: usize,
    progress: Option<i32>,
    dir: &Path,
) -> usize {
    let mut gauge = WaveGauge::new(recipe.style.to_gauge_style());
    gauge.layout(width, height);
    if let Some(target) = progress {
        gauge.set_progress(target.clamp(0, 100));
    }

    let mut written = 0usize;
    for frame in 0..frames {
        write_frame(&gauge.scene(), dir, frame);
        written += 1;
        if !gauge.tick() {
            // The terminal solid-disc frame, then stop.
            write_frame(&gauge.scene(), dir, frame + 1);
            written += 1;
            break;
        }
    }
    written
}

fn print_render_usage() {
    eprintln!("rat-tide render - Write animation frames as PNG files");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rat-tide render [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -w, --widget <field|gauge>   Widget to render (default: field)");
    eprintln!("    -n, --frames <count>         Frames to render (default: 60)");
    eprintln!("    -o, --output <dir>           Output directory (default: timestamped)");
    eprintln!("        --width <px>             Surface width (default: 400)");
    eprintln!("        --height <px>            Surface height (default: 225)");
    eprintln!("    -p, --progress <0-100>       Gauge target progress");
    eprintln!("    -c, --config <recipe.yaml>   Apply a recipe file");
}
