//! rat-tide - TUI and CLI for the wave widgets
//!
//! Usage:
//!   rat-tide [field|gauge]           Launch TUI preview (default: field)
//!   rat-tide render [options]        Write animation frames as PNGs
//!   rat-tide trace [options]         Dump per-frame engine state as JSON
//!   rat-tide benchmark [options]     Measure engine throughput
//!
//! The TUI animates the selected widget live: frames are composed by the
//! engine, rasterized through resvg, and displayed with ratatui-image.

use std::env;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use ratatui_image::{
    picker::{Picker, ProtocolType},
    protocol::StatefulProtocol,
    StatefulImage,
};

use rat_tide::{FillPhase, FrameDriver, FrameTicket, WaveField, WaveGauge, FRAME_DELAY};

mod cli;

use cli::{
    cmd_benchmark, cmd_render, cmd_trace, load_recipe, render_scene, Recipe, StyleConfig,
    WidgetKind, PREVIEW_HEIGHT, PREVIEW_WIDTH,
};

/// Auto-fill cadence: bump the gauge target every this many frames.
const AUTO_FILL_INTERVAL: u64 = 30;

/// The widget under preview.
enum View {
    Field(WaveField),
    Gauge(WaveGauge),
}

impl View {
    fn build(kind: WidgetKind, style: &StyleConfig, width: f64, height: f64) -> View {
        match kind {
            WidgetKind::Field => {
                let mut field = WaveField::new(style.to_field_style());
                field.layout(width, height);
                View::Field(field)
            }
            WidgetKind::Gauge => {
                let mut gauge = WaveGauge::new(style.to_gauge_style());
                gauge.layout(width, height);
                View::Gauge(gauge)
            }
        }
    }

    fn kind(&self) -> WidgetKind {
        match self {
            View::Field(_) => WidgetKind::Field,
            View::Gauge(_) => WidgetKind::Gauge,
        }
    }
}

/// Application state for TUI
struct App {
    /// Widget being previewed
    view: View,
    /// Shared styling for rebuilds on switch/reset
    style: StyleConfig,
    /// Surface dimensions fed to the widget
    surface: (f64, f64),
    /// Handle to the running frame loop
    ticket: FrameTicket,
    /// Channel of frame ticks from the driver
    frame_rx: Receiver<Instant>,
    /// Image picker for terminal protocol detection
    picker: Picker,
    /// Current rendered image protocol state
    image_state: Option<Box<dyn StatefulProtocol>>,
    /// Flag to indicate image needs re-rendering
    needs_image_update: bool,
    /// Animation paused by the user
    paused: bool,
    /// Gauge demo mode: keep bumping the target automatically
    auto_fill: bool,
    /// Randomness for auto-fill bumps
    rng: StdRng,
    /// Frames stepped since launch
    frame_count: u64,
    /// The gauge reached its terminal state; the driver is stopped
    animation_done: bool,
    /// Should exit
    should_quit: bool,
}

impl App {
    fn new(kind: WidgetKind, recipe: Recipe, width: f64, height: f64) -> App {
        let mut view = View::build(kind, &recipe.style, width, height);
        if let (View::Gauge(gauge), Some(target)) = (&mut view, recipe.progress) {
            gauge.set_progress(target.clamp(0, 100));
        }

        let (ticket, frame_rx) = FrameDriver::channel(FRAME_DELAY);

        // Initialize image picker - force Sixel protocol
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.protocol_type = ProtocolType::Sixel;

        App {
            view,
            style: recipe.style,
            surface: (width, height),
            ticket,
            frame_rx,
            picker,
            image_state: None,
            needs_image_update: true,
            paused: false,
            auto_fill: false,
            rng: StdRng::from_os_rng(),
            frame_count: 0,
            animation_done: false,
            should_quit: false,
        }
    }

    /// Step the widget one frame.
    fn step(&mut self) {
        self.frame_count += 1;
        match &mut self.view {
            View::Field(field) => {
                field.tick();
            }
            View::Gauge(gauge) => {
                if self.auto_fill
                    && self.frame_count % AUTO_FILL_INTERVAL == 0
                    && gauge.phase() == FillPhase::Filling
                {
                    let bump = self.rng.random_range(2..9);
                    let target = i32::from(gauge.target()) + bump;
                    gauge.set_progress(target.min(100));
                }
                if !gauge.tick() {
                    // Terminal state: stop scheduling frames entirely.
                    self.animation_done = true;
                    self.ticket.cancel();
                }
            }
        }
        self.needs_image_update = true;
    }

    /// Drain pending driver ticks; returns how many frames to step.
    fn pending_ticks(&mut self) -> usize {
        let mut ticks = 0;
        while self.frame_rx.try_recv().is_ok() {
            ticks += 1;
        }
        ticks
    }

    fn update_image(&mut self) {
        if !self.needs_image_update {
            return;
        }
        let scene = match &self.view {
            View::Field(field) => field.scene(),
            View::Gauge(gauge) => gauge.scene(),
        };
        if !scene.is_empty() {
            let img = render_scene(&scene);
            self.image_state = Some(self.picker.new_resize_protocol(img));
        }
        self.needs_image_update = false;
    }

    /// Replace the widget, restarting the frame loop if it was stopped.
    fn rebuild(&mut self, kind: WidgetKind) {
        let (width, height) = self.surface;
        self.view = View::build(kind, &self.style, width, height);
        self.frame_count = 0;
        self.needs_image_update = true;
        if self.animation_done || self.ticket.is_cancelled() {
            let (ticket, frame_rx) = FrameDriver::channel(FRAME_DELAY);
            self.ticket = ticket;
            self.frame_rx = frame_rx;
        }
        self.animation_done = false;
    }

    fn adjust_progress(&mut self, delta: i32) {
        if let View::Gauge(gauge) = &mut self.view {
            if gauge.phase() == FillPhase::Filling {
                let target = (i32::from(gauge.target()) + delta).clamp(0, 100);
                gauge.set_progress(target);
            }
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Check for CLI subcommands
    if args.len() >= 2 {
        match args[1].as_str() {
            "render" => {
                cmd_render(&args[2..]);
                return;
            }
            "trace" => {
                cmd_trace(&args[2..]);
                return;
            }
            "benchmark" => {
                cmd_benchmark(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            _ => {}
        }
    }

    // Remaining args configure the TUI preview.
    let mut kind: Option<WidgetKind> = None;
    let mut recipe: Option<Recipe> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    match load_recipe(Path::new(&args[i])) {
                        Ok(loaded) => recipe = Some(loaded),
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            std::process::exit(1);
                        }
                    }
                }
            }
            name => match WidgetKind::from_name(name) {
                Some(parsed) => kind = Some(parsed),
                None => {
                    eprintln!("Unknown argument: {}", name);
                    eprintln!();
                    print_usage(&args[0]);
                    std::process::exit(1);
                }
            },
        }
        i += 1;
    }

    // A recipe supplies widget and surface unless overridden on the line;
    // without one the preview uses the wide default surface.
    let (recipe, width, height) = match recipe {
        Some(recipe) => {
            let (w, h) = (recipe.surface.width, recipe.surface.height);
            (recipe, w, h)
        }
        None => (Recipe::default(), PREVIEW_WIDTH, PREVIEW_HEIGHT),
    };
    let kind = kind.unwrap_or(recipe.widget);

    if let Err(e) = run_tui(kind, recipe, width, height) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(kind: WidgetKind, recipe: Recipe, width: f64, height: f64) -> Result<(), String> {
    // Initialize terminal
    enable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(EnterAlternateScreen).map_err(|e| e.to_string())?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).map_err(|e| e.to_string())?;

    let mut app = App::new(kind, recipe, width, height);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| e.to_string())?;
    stdout().execute(LeaveAlternateScreen).map_err(|e| e.to_string())?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        // Consume frame ticks from the driver (non-blocking)
        let ticks = app.pending_ticks();
        if ticks > 0 && !app.paused && !app.animation_done {
            for _ in 0..ticks {
                app.step();
                if app.animation_done {
                    break;
                }
            }
        }

        app.update_image();

        terminal.draw(|frame| ui(frame, app)).map_err(|_| "Draw error".to_string())?;

        if event::poll(Duration::from_millis(5)).map_err(|e| e.to_string())? {
            if let Event::Key(key) = event::read().map_err(|e| e.to_string())? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            app.should_quit = true;
                        }
                        KeyCode::Char(' ') => {
                            app.paused = !app.paused;
                        }
                        KeyCode::Char('f') => {
                            app.rebuild(WidgetKind::Field);
                        }
                        KeyCode::Char('g') => {
                            app.rebuild(WidgetKind::Gauge);
                        }
                        KeyCode::Char('r') => {
                            let kind = app.view.kind();
                            app.rebuild(kind);
                        }
                        KeyCode::Char('a') => {
                            app.auto_fill = !app.auto_fill;
                        }
                        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.adjust_progress(5);
                        }
                        KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.adjust_progress(-5);
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            // Stop the frame loop before the surface goes away.
            app.ticket.cancel();
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(frame.area());

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(8)])
        .split(layout[0]);

    // Stats panel
    let mut stats = format!(
        "Widget: {}\nFrame: {}\nSpeed: {}px\n",
        app.view.kind().name(),
        app.frame_count,
        app.style.speed,
    );
    if let View::Gauge(gauge) = &app.view {
        let phase = match gauge.phase() {
            FillPhase::Filling => "filling",
            FillPhase::Full => "full",
        };
        stats.push_str(&format!(
            "Progress: {}% -> {}%\nPhase: {}\nAuto-fill: {}\n",
            gauge.progress(),
            gauge.target(),
            phase,
            if app.auto_fill { "on" } else { "off" },
        ));
    }
    if app.paused {
        stats.push_str("PAUSED\n");
    }

    let stats_widget = Paragraph::new(stats)
        .block(Block::default()
            .title(" Stats ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)))
        .style(Style::default().fg(Color::White));
    frame.render_widget(stats_widget, sidebar[0]);

    // Controls panel
    let controls = "\
q/esc  quit
space  pause
f      wave field
g      wave gauge
r      reset widget
+/-    gauge target
a      auto-fill demo";
    let controls_widget = Paragraph::new(controls)
        .block(Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(controls_widget, sidebar[1]);

    // Preview pane
    let (title, border_color) = if app.animation_done {
        (" rat-tide [full] ".to_string(), Color::Yellow)
    } else if app.paused {
        (" rat-tide [paused] ".to_string(), Color::DarkGray)
    } else {
        (" rat-tide ".to_string(), Color::Green)
    };

    let image_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = image_block.inner(layout[1]);
    frame.render_widget(image_block, layout[1]);

    // Render the image using ratatui-image
    if let Some(ref mut image_state) = app.image_state {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }
}

fn print_usage(program: &str) {
    eprintln!("rat-tide - Animated Bézier wave widgets for the terminal");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    {} [field|gauge] [-c recipe.yaml]   Launch TUI preview", program);
    eprintln!("    {} render [options]                 Write frames as PNGs", program);
    eprintln!("    {} trace [options]                  Per-frame state as JSON", program);
    eprintln!("    {} benchmark [options]              Engine throughput", program);
    eprintln!("    {} help                             Show this help", program);
    eprintln!();
    eprintln!("TUI KEYS:");
    eprintln!("    q/esc quit, space pause, f/g switch widget, r reset,");
    eprintln!("    +/- adjust gauge target, a toggle auto-fill demo");
}
