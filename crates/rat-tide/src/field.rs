//! The rectangular, endlessly scrolling wave widget.

use crate::engine::WaveState;
use crate::path::build_wave_path;
use crate::scene::{DrawOp, Paint, Scene};
use crate::style::FieldStyle;

/// A decorative wave filling a rectangular surface.
///
/// The undulation swings across the full surface height: the control levels
/// sit at the top and bottom edges and the baseline at the vertical center.
/// The field never reaches a terminal state - it keeps scrolling for as long
/// as its host keeps scheduling frames.
#[derive(Debug, Clone)]
pub struct WaveField {
    pub style: FieldStyle,
    state: Option<WaveState>,
}

impl WaveField {
    pub fn new(style: FieldStyle) -> Self {
        Self { style, state: None }
    }

    /// Current engine state, once laid out.
    pub fn state(&self) -> Option<&WaveState> {
        self.state.as_ref()
    }

    /// Set or update the surface size.
    ///
    /// Creates the wave state on first layout; a size change re-creates it
    /// at the canonical tile layout.
    pub fn layout(&mut self, width: f64, height: f64) {
        let unchanged = self
            .state
            .as_ref()
            .is_some_and(|s| s.width == width && s.height == height);
        if unchanged {
            return;
        }
        self.state = Some(WaveState::new(
            width,
            height,
            self.style.speed,
            height / 2.0,
            0.0,
            height,
        ));
    }

    /// Compose the current frame.
    pub fn scene(&self) -> Scene {
        let Some(state) = self.state.as_ref().filter(|s| s.has_surface()) else {
            return Scene::empty(0.0, 0.0);
        };

        let path = build_wave_path(state, self.style.stroke_only);
        let paint = if self.style.stroke_only {
            Paint::Stroke {
                color: self.style.wave_color.clone(),
                width: self.style.line_width,
            }
        } else {
            Paint::Fill { color: self.style.wave_color.clone() }
        };

        Scene {
            width: state.width,
            height: state.height,
            ops: vec![DrawOp::Path { path, paint }],
        }
    }

    /// Advance one frame; returns `true` when the pattern reseeded.
    pub fn tick(&mut self) -> bool {
        match self.state.as_mut() {
            Some(state) => state.advance(),
            None => false,
        }
    }
}
