//! Benchmark command - engine throughput without any rendering.

use std::time::Instant;

use rat_tide::{build_wave_path, FieldStyle, GaugeStyle, WaveField, WaveGauge};

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) {
    let mut iterations = 100_000usize;
    let mut width = 400.0f64;
    let mut height = 225.0f64;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--iterations" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(100_000);
                }
            }
            "--width" => {
                i += 1;
                if i < args.len() {
                    width = args[i].parse().unwrap_or(400.0);
                }
            }
            "--height" => {
                i += 1;
                if i < args.len() {
                    height = args[i].parse().unwrap_or(225.0);
                }
            }
            other => {
                eprintln!("Unknown benchmark option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    eprintln!("=== rat-tide BENCHMARK ===");
    eprintln!("Surface: {}x{}, {} iterations", width, height, iterations);
    eprintln!();

    // Recurrence alone.
    let mut field = WaveField::new(FieldStyle::default());
    field.layout(width, height);
    let start = Instant::now();
    for _ in 0..iterations {
        field.tick();
    }
    let advance_ms = start.elapsed().as_secs_f64() * 1000.0;
    eprintln!(
        "Advance:              {:>8} frames  Time: {:>8.2}ms  ({:.0} frames/sec)",
        iterations,
        advance_ms,
        iterations as f64 / (advance_ms / 1000.0)
    );

    // Recurrence plus path building.
    let mut field = WaveField::new(FieldStyle::default());
    field.layout(width, height);
    let start = Instant::now();
    let mut commands = 0usize;
    for _ in 0..iterations {
        let state = field.state().expect("field was laid out");
        commands += build_wave_path(state, false).commands.len();
        field.tick();
    }
    let path_ms = start.elapsed().as_secs_f64() * 1000.0;
    eprintln!(
        "Advance + path build: {:>8} frames  Time: {:>8.2}ms  ({:.0} frames/sec, {} commands)",
        iterations,
        path_ms,
        iterations as f64 / (path_ms / 1000.0),
        commands
    );

    // A full gauge fill cycle, 0 to 100.
    let mut gauge = WaveGauge::new(GaugeStyle::default());
    gauge.layout(width, height);
    gauge.set_progress(100);
    let start = Instant::now();
    let mut frames = 0usize;
    while gauge.tick() {
        frames += 1;
    }
    let gauge_ms = start.elapsed().as_secs_f64() * 1000.0;
    eprintln!(
        "Gauge fill 0 -> 100:  {:>8} frames  Time: {:>8.2}ms",
        frames + 1,
        gauge_ms
    );
}
