//! Widget styling - colors and animation parameters.
//!
//! Colors are CSS color strings passed straight through to whatever renders
//! the scene; the engine never interprets them.

/// Default scroll speed in pixels per frame.
pub const DEFAULT_SPEED: f64 = 5.0;

/// Default stroke width for outline rendering.
pub const DEFAULT_LINE_WIDTH: f64 = 5.0;

/// Default gauge wave height in pixels.
pub const DEFAULT_AMPLITUDE: f64 = 30.0;

/// Default wave fill color.
pub const DEFAULT_WAVE_COLOR: &str = "#ffff00";

/// Styling for the rectangular [`crate::WaveField`] widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldStyle {
    /// Pixels scrolled per frame.
    pub speed: f64,
    /// Draw the curve outline instead of filling under it.
    pub stroke_only: bool,
    /// Stroke width when `stroke_only` is set.
    pub line_width: f64,
    /// Wave fill/stroke color.
    pub wave_color: String,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            stroke_only: false,
            line_width: DEFAULT_LINE_WIDTH,
            wave_color: DEFAULT_WAVE_COLOR.to_string(),
        }
    }
}

/// Styling for the circular [`crate::WaveGauge`] widget.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeStyle {
    /// Pixels scrolled per frame.
    pub speed: f64,
    /// Vertical distance between the two control levels (wave height).
    pub amplitude: f64,
    /// Wave fill color; also the disc color in the full state.
    pub wave_color: String,
    /// Disc background behind the wave; `None` leaves it transparent.
    pub background_color: Option<String>,
}

impl Default for GaugeStyle {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            amplitude: DEFAULT_AMPLITUDE,
            wave_color: DEFAULT_WAVE_COLOR.to_string(),
            background_color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let field = FieldStyle::default();
        assert_eq!(field.speed, 5.0);
        assert_eq!(field.line_width, 5.0);
        assert!(!field.stroke_only);

        let gauge = GaugeStyle::default();
        assert_eq!(gauge.amplitude, 30.0);
        assert_eq!(gauge.background_color, None);
    }
}
