//! Trace command - dump per-frame engine state as JSON.
//!
//! Gives tooling (and the integration tests) a rendering-free view of the
//! recurrence: every anchor/control coordinate, the vertical levels, and the
//! SVG path data for each simulated frame.

use std::path::Path;

use serde::Serialize;

use rat_tide::{build_wave_path, FillPhase, WaveField, WaveGauge, WaveState};

use super::recipe::{load_recipe, Recipe, WidgetKind};

/// One simulated frame in JSON output.
#[derive(Serialize)]
struct TraceFrame {
    frame: usize,
    reseeded: bool,
    start0: f64,
    end0: f64,
    ctrl0: f64,
    end1: f64,
    ctrl1: f64,
    end2: f64,
    ctrl2: f64,
    baseline: f64,
    level_a: f64,
    level_b: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phase: Option<String>,
    path: String,
}

/// Full trace output.
#[derive(Serialize)]
struct TraceReport {
    widget: String,
    width: f64,
    height: f64,
    speed: f64,
    frames: Vec<TraceFrame>,
}

fn snapshot(
    frame: usize,
    state: &WaveState,
    previous_end2: Option<f64>,
    stroke_only: bool,
    progress: Option<u8>,
    phase: Option<&str>,
) -> TraceFrame {
    // A reseed is the only thing that ever moves end2 backwards.
    let reseeded = previous_end2.is_some_and(|prev| state.end2 < prev);
    let path = if phase == Some("full") {
        String::new()
    } else {
        build_wave_path(state, stroke_only).to_svg_data()
    };
    TraceFrame {
        frame,
        reseeded,
        start0: state.start0,
        end0: state.end0,
        ctrl0: state.ctrl0,
        end1: state.end1,
        ctrl1: state.ctrl1,
        end2: state.end2,
        ctrl2: state.ctrl2,
        baseline: state.baseline,
        level_a: state.level_a,
        level_b: state.level_b,
        progress,
        phase: phase.map(str::to_string),
        path,
    }
}

/// Execute the trace command.
pub fn cmd_trace(args: &[String]) {
    let mut recipe = Recipe::default();
    let mut frames = 60usize;
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
                eprintln!("Unknown trace option: {}", other);
                print_trace_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let widget = widget_override.unwrap_or(recipe.widget);
    let width = width_override.unwrap_or(recipe.surface.width);
    let height = height_override.unwrap_or(recipe.surface.height);
    let progress = progress_override.or(recipe.progress);

    let report = match widget {
        WidgetKind::Field => trace_field(&recipe, width, height, frames),
        WidgetKind::Gauge => trace_gauge(&recipe, width, height, frames, progress),
    };

    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize trace");
    println!("{}", json);
}

fn trace_field(recipe: &Recipe, width: f64, height: f64, frames: usize) -> TraceReport {
    let style = recipe.style.to_field_style();
    let stroke_only = style.stroke_only;
    let speed = style.speed;
    let mut field = WaveField::new(style);
    field.layout(width, height);

    let mut trace = Vec::with_capacity(frames);
    let mut previous_end2 = None;
    for frame in 0..frames {
        let state = field.state().expect("field was laid out");
        trace.push(snapshot(frame, state, previous_end2, stroke_only, None, None));
        previous_end2 = Some(state.end2);
        field.tick();
    }

    TraceReport {
        widget: "field".to_string(),
        width,
        height,
        speed,
        frames: trace,
    }
}

fn trace_gauge(
    recipe: &Recipe,
    width: f64,
    height: f64,
    frames: usize,
    progress: Option<i32>,
) -> TraceReport {
    let style = recipe.style.to_gauge_style();
    let speed = style.speed;
    let mut gauge = WaveGauge::new(style);
    gauge.layout(width, height);
    if let Some(target) = progress {
        gauge.set_progress(target.clamp(0, 100));
    }

    let mut trace = Vec::with_capacity(frames);
    let mut previous_end2 = None;
    for frame in 0..frames {
        let state = gauge.state().expect("gauge was laid out");
        let phase = match gauge.phase() {
            FillPhase::Filling => "filling",
            FillPhase::Full => "full",
        };
        trace.push(snapshot(
            frame,
            state,
            previous_end2,
            false,
            Some(gauge.progress()),
            Some(phase),
        ));
        previous_end2 = Some(state.end2);

        if !gauge.tick() {
            // One final frame captures the terminal solid-disc state.
            let state = gauge.state().expect("gauge was laid out");
            trace.push(snapshot(
                frame + 1,
                state,
                previous_end2,
                false,
                Some(gauge.progress()),
                Some("full"),
            ));
            break;
        }
    }

    TraceReport {
        widget: "gauge".to_string(),
        width,
        height,
        speed,
        frames: trace,
    }
}

fn print_trace_usage() {
    eprintln!("rat-tide trace - Dump per-frame engine state as JSON");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rat-tide trace [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -w, --widget <field|gauge>   Widget to simulate (default: field)");
    eprintln!("    -n, --frames <count>         Frames to simulate (default: 60)");
    eprintln!("        --width <px>             Surface width (default: 400)");
    eprintln!("        --height <px>            Surface height (default: 225)");
    eprintln!("    -p, --progress <0-100>       Gauge target progress");
    eprintln!("    -c, --config <recipe.yaml>   Apply a recipe file");
}
