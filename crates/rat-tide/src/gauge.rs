//! The circular "liquid fill" progress widget.
//!
//! The same wave recurrence as the field, clipped to a disc and shifted
//! vertically by a 0-100 progress value. The shift is applied once per
//! reseed cycle so the resting level changes in steps aligned with tile
//! boundaries instead of jumping mid-tile.

use crate::engine::WaveState;
use crate::path::build_wave_path;
use crate::scene::{Circle, DrawOp, Paint, Scene};
use crate::style::GaugeStyle;

/// Label color drawn over the wave.
const LABEL_COLOR: &str = "#000000";

/// Gauge animation phase.
///
/// `Filling` self-loops every frame; reaching 100% enters `Full`, which is
/// terminal: the recurrence stops and the gauge renders as a solid disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    Filling,
    Full,
}

/// A circular progress gauge filled by the wave.
#[derive(Debug, Clone)]
pub struct WaveGauge {
    pub style: GaugeStyle,
    state: Option<WaveState>,
    target_progress: u8,
    current_progress: u8,
    phase: FillPhase,
}

impl WaveGauge {
    pub fn new(style: GaugeStyle) -> Self {
        Self {
            style,
            state: None,
            target_progress: 0,
            current_progress: 0,
            phase: FillPhase::Filling,
        }
    }

    /// Current engine state, once laid out.
    pub fn state(&self) -> Option<&WaveState> {
        self.state.as_ref()
    }

    /// The progress value currently rendered.
    pub fn progress(&self) -> u8 {
        self.current_progress
    }

    /// The progress value the gauge is animating toward.
    pub fn target(&self) -> u8 {
        self.target_progress
    }

    pub fn phase(&self) -> FillPhase {
        self.phase
    }

    /// Set the target progress percentage.
    ///
    /// Values outside 0-100 are clamped (and assert in debug builds).
    /// Decreases are accepted while filling - the wave sinks back down.
    /// Ignored once the gauge is full; there is no reset path.
    pub fn set_progress(&mut self, value: i32) {
        debug_assert!((0..=100).contains(&value), "progress out of range: {value}");
        if self.phase == FillPhase::Full {
            return;
        }
        self.target_progress = value.clamp(0, 100) as u8;
    }

    /// Set or update the surface size.
    ///
    /// The wave starts resting at the bottom edge: the lower control level
    /// sits on it, the upper one `amplitude` above it. The already-reached
    /// progress shift is re-applied so a resize does not drop the fill level.
    pub fn layout(&mut self, width: f64, height: f64) {
        let unchanged = self
            .state
            .as_ref()
            .is_some_and(|s| s.width == width && s.height == height);
        if unchanged {
            return;
        }

        let amplitude = self.style.amplitude;
        let mut state = WaveState::new(
            width,
            height,
            self.style.speed,
            height - amplitude / 2.0,
            height - amplitude,
            height,
        );
        let shift = Self::step_unit(height) * f64::from(self.current_progress);
        state.level_a -= shift;
        state.level_b -= shift;
        state.baseline -= shift;
        self.state = Some(state);
    }

    /// Pixels of vertical shift per percent of progress.
    #[inline]
    fn step_unit(height: f64) -> f64 {
        (height / 100.0).floor()
    }

    /// Apply any pending progress change; called once per reseed cycle.
    fn apply_progress(&mut self) {
        if self.current_progress == self.target_progress {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let delta = f64::from(self.target_progress) - f64::from(self.current_progress);
        let step = Self::step_unit(state.height) * delta;
        state.level_a -= step;
        state.level_b -= step;
        state.baseline -= step;
        self.current_progress = self.target_progress;
        if self.current_progress == 100 {
            self.phase = FillPhase::Full;
        }
    }

    /// Advance one frame; returns whether another frame should be scheduled.
    ///
    /// Returns `false` exactly once the gauge enters the full state; the
    /// host renders the final solid frame and stops its driver.
    pub fn tick(&mut self) -> bool {
        if self.phase == FillPhase::Full {
            return false;
        }
        if let Some(state) = self.state.as_mut() {
            if state.advance() {
                self.apply_progress();
            }
        }
        self.phase == FillPhase::Filling
    }

    /// Compose the current frame.
    ///
    /// Filling: clip to the inscribed circle, paint the background disc,
    /// paint the wave, then the percentage label on top (unclipped). Full:
    /// a solid disc of the wave color plus the label.
    pub fn scene(&self) -> Scene {
        let Some(state) = self.state.as_ref().filter(|s| s.has_surface()) else {
            return Scene::empty(0.0, 0.0);
        };

        let circle = Circle::inscribed(state.width, state.height);
        let label = DrawOp::Text {
            x: circle.cx,
            y: circle.cy,
            size: self.style.amplitude,
            color: LABEL_COLOR.to_string(),
            text: format!("{}%", self.current_progress),
        };

        let ops = match self.phase {
            FillPhase::Full => vec![
                DrawOp::FillCircle { circle, color: self.style.wave_color.clone() },
                label,
            ],
            FillPhase::Filling => {
                let mut ops = vec![DrawOp::ClipCircle(circle)];
                if let Some(background) = &self.style.background_color {
                    ops.push(DrawOp::FillCircle { circle, color: background.clone() });
                }
                ops.push(DrawOp::Path {
                    path: build_wave_path(state, false),
                    paint: Paint::Fill { color: self.style.wave_color.clone() },
                });
                ops.push(label);
                ops
            }
        };

        Scene { width: state.width, height: state.height, ops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(width: f64, height: f64) -> WaveGauge {
        let mut gauge = WaveGauge::new(GaugeStyle::default());
        gauge.layout(width, height);
        gauge
    }

    fn is_solid_disc(scene: &Scene) -> bool {
        matches!(scene.ops.first(), Some(DrawOp::FillCircle { .. }))
            && !scene.ops.iter().any(|op| matches!(op, DrawOp::Path { .. }))
    }

    #[test]
    fn layout_positions_wave_at_the_bottom() {
        let g = gauge(200.0, 200.0);
        let state = g.state().unwrap();
        assert_eq!(state.level_b, 200.0);
        assert_eq!(state.level_a, 170.0);
        assert_eq!(state.baseline, 185.0);
        assert_eq!(state.level_b - state.level_a, g.style.amplitude);
    }

    #[test]
    fn progress_steps_apply_once_per_reseed() {
        let mut g = gauge(200.0, 100.0);
        g.set_progress(50);
        // Progress stays put until the cycle wraps.
        assert!(g.tick());
        assert_eq!(g.progress(), 0);
        while g.progress() == 0 {
            assert!(g.tick());
        }
        assert_eq!(g.progress(), 50);
        let state = g.state().unwrap();
        // floor(100 / 100) * 50 = 50px lift.
        assert_eq!(state.baseline, 100.0 - 15.0 - 50.0);
    }

    #[test]
    fn cumulative_shift_matches_full_height() {
        let mut g = gauge(200.0, 100.0);
        let start_baseline = g.state().unwrap().baseline;

        for target in [0, 50, 100] {
            g.set_progress(target);
            while i32::from(g.progress()) != target {
                g.tick();
            }
        }
        let end_baseline = g.state().unwrap().baseline;
        assert_eq!(start_baseline - end_baseline, 100.0);
    }

    #[test]
    fn reaching_full_is_terminal_and_idempotent() {
        let mut g = gauge(200.0, 200.0);
        g.set_progress(100);
        while g.tick() {}
        assert_eq!(g.phase(), FillPhase::Full);
        assert_eq!(g.progress(), 100);

        let frozen = g.state().unwrap().clone();
        for _ in 0..10 {
            assert!(!g.tick());
        }
        assert_eq!(*g.state().unwrap(), frozen);

        // Progress updates are ignored in the terminal state.
        g.set_progress(10);
        assert_eq!(g.target(), 100);
    }

    #[test]
    fn full_scene_is_a_solid_disc_with_label() {
        let mut g = gauge(200.0, 200.0);
        g.set_progress(100);
        while g.tick() {}
        let scene = g.scene();
        assert!(is_solid_disc(&scene));
        let Some(DrawOp::Text { text, .. }) = scene.ops.last() else {
            panic!("expected a label");
        };
        assert_eq!(text, "100%");
    }

    #[test]
    fn filling_scene_clips_then_paints_then_labels() {
        let style = GaugeStyle {
            background_color: Some("#222222".to_string()),
            ..GaugeStyle::default()
        };
        let mut g = WaveGauge::new(style);
        g.layout(200.0, 200.0);
        let scene = g.scene();
        assert!(matches!(scene.ops[0], DrawOp::ClipCircle(_)));
        assert!(matches!(scene.ops[1], DrawOp::FillCircle { .. }));
        assert!(matches!(scene.ops[2], DrawOp::Path { .. }));
        assert!(matches!(scene.ops[3], DrawOp::Text { .. }));
    }

    #[test]
    fn progress_clamps_out_of_range_targets() {
        let mut g = gauge(200.0, 200.0);
        // Release builds clamp; debug builds assert. Exercise the release
        // path only when debug assertions are off.
        if cfg!(debug_assertions) {
            return;
        }
        g.set_progress(250);
        assert_eq!(g.target(), 100);
        g.set_progress(-5);
        assert_eq!(g.target(), 0);
    }

    #[test]
    fn progress_may_decrease_while_filling() {
        let mut g = gauge(200.0, 100.0);
        g.set_progress(60);
        while g.progress() != 60 {
            g.tick();
        }
        let raised = g.state().unwrap().baseline;

        g.set_progress(20);
        while g.progress() != 20 {
            g.tick();
        }
        let lowered = g.state().unwrap().baseline;
        assert_eq!(lowered - raised, 40.0);
    }

    #[test]
    fn fill_cycle_hits_every_progress_boundary() {
        // End-to-end: 400x100 surface, defaults otherwise, progress driven
        // through the boundary values.
        let mut g = gauge(400.0, 100.0);
        let mut solid_frames = 0usize;

        for target in [0, 1, 99, 100] {
            g.set_progress(target);
            loop {
                if is_solid_disc(&g.scene()) {
                    solid_frames += 1;
                }
                if !g.tick() {
                    break;
                }
                if i32::from(g.progress()) == target && g.phase() == FillPhase::Filling {
                    break;
                }
            }
        }

        assert_eq!(g.phase(), FillPhase::Full);
        assert_eq!(solid_frames, 0, "no solid frame renders while filling");
        // Exactly one solid-fill frame follows the last filling frame.
        assert!(is_solid_disc(&g.scene()));
    }

    #[test]
    fn resize_preserves_reached_fill_level() {
        let mut g = gauge(200.0, 100.0);
        g.set_progress(40);
        while g.progress() != 40 {
            g.tick();
        }
        g.layout(300.0, 100.0);
        let state = g.state().unwrap();
        // Same height, so the same 40px lift applies after the resize.
        assert_eq!(state.baseline, 100.0 - 15.0 - 40.0);
    }

    #[test]
    fn scene_before_layout_is_empty() {
        let g = WaveGauge::new(GaugeStyle::default());
        assert!(g.scene().is_empty());
    }
}
