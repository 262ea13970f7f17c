//! Path builder - turns a [`WaveState`] into drawable path commands.
//!
//! Each of the three quadratic segments becomes its own subpath. In fill
//! mode a segment is closed down to the bottom edge of the surface so the
//! region under the curve can be painted; in stroke mode the curve stays
//! open and only the line itself is drawn.

use crate::engine::WaveState;
use crate::geometry::{Point, QuadCurve, CURVE_TOLERANCE};

/// A single path construction command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    QuadTo { ctrl: Point, to: Point },
    LineTo(Point),
    Close,
}

/// A built wave path: three subpaths, closed (fill) or open (stroke).
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    pub commands: Vec<PathCommand>,
}

/// Build the three wave segments from the current state.
///
/// Segments run right to left in anchor order: `start0 -> end0`,
/// `end0 -> end1`, `end1 -> end2`. Segments 0 and 2 curve through `level_a`,
/// segment 1 through `level_b`, producing the crest/trough alternation.
/// Returns an empty path for a surface that has not been laid out.
pub fn build_wave_path(state: &WaveState, stroke_only: bool) -> WavePath {
    let mut commands = Vec::new();
    if !state.has_surface() {
        return WavePath { commands };
    }

    let segments = [
        (state.start0, state.ctrl0, state.end0, state.level_a),
        (state.end0, state.ctrl1, state.end1, state.level_b),
        (state.end1, state.ctrl2, state.end2, state.level_a),
    ];

    for (from_x, ctrl_x, to_x, level) in segments {
        commands.push(PathCommand::MoveTo(Point::new(from_x, state.baseline)));
        commands.push(PathCommand::QuadTo {
            ctrl: Point::new(ctrl_x, level),
            to: Point::new(to_x, state.baseline),
        });
        if !stroke_only {
            commands.push(PathCommand::LineTo(Point::new(to_x, state.height)));
            commands.push(PathCommand::LineTo(Point::new(from_x, state.height)));
            commands.push(PathCommand::Close);
        }
    }

    WavePath { commands }
}

impl WavePath {
    /// Whether the path contains no drawable segments.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The curved segments of the path, in command order.
    pub fn curves(&self) -> Vec<QuadCurve> {
        let mut curves = Vec::new();
        let mut cursor: Option<Point> = None;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => cursor = Some(p),
                PathCommand::QuadTo { ctrl, to } => {
                    if let Some(from) = cursor {
                        curves.push(QuadCurve::new(from, ctrl, to));
                    }
                    cursor = Some(to);
                }
                PathCommand::Close => {}
            }
        }
        curves
    }

    /// Serialize to SVG path data ("M .. Q .. L .. Z").
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for command in &self.commands {
            if !data.is_empty() {
                data.push(' ');
            }
            match *command {
                PathCommand::MoveTo(p) => {
                    data.push_str(&format!("M {:.2} {:.2}", p.x, p.y));
                }
                PathCommand::QuadTo { ctrl, to } => {
                    data.push_str(&format!(
                        "Q {:.2} {:.2} {:.2} {:.2}",
                        ctrl.x, ctrl.y, to.x, to.y
                    ));
                }
                PathCommand::LineTo(p) => {
                    data.push_str(&format!("L {:.2} {:.2}", p.x, p.y));
                }
                PathCommand::Close => data.push('Z'),
            }
        }
        data
    }

    /// Flatten every subpath to a polyline.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<Point>> {
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    if current.len() >= 2 {
                        polylines.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::QuadTo { ctrl, to } => {
                    if let Some(&from) = current.last() {
                        let flattened = QuadCurve::new(from, ctrl, to).flatten(tolerance);
                        current.extend(flattened.into_iter().skip(1));
                    } else {
                        current.push(to);
                    }
                }
                PathCommand::Close => {
                    if let Some(&first) = current.first() {
                        current.push(first);
                    }
                }
            }
        }
        if current.len() >= 2 {
            polylines.push(current);
        }
        polylines
    }

    /// Bounding box as (min_x, min_y, max_x, max_y), or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let points: Vec<Point> = self.flatten(CURVE_TOLERANCE).into_iter().flatten().collect();
        if points.is_empty() {
            return None;
        }
        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Some((min_x, min_y, max_x, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WaveState {
        WaveState::new(200.0, 100.0, 5.0, 50.0, 0.0, 100.0)
    }

    #[test]
    fn fill_mode_builds_three_closed_regions() {
        let path = build_wave_path(&state(), false);
        let closes = path
            .commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Close))
            .count();
        assert_eq!(closes, 3);
        assert_eq!(path.commands.len(), 15); // 5 commands per segment
    }

    #[test]
    fn stroke_mode_leaves_curves_open() {
        let path = build_wave_path(&state(), true);
        assert_eq!(path.commands.len(), 6); // move + quad per segment
        assert!(!path.commands.iter().any(|c| matches!(c, PathCommand::Close)));
        assert!(!path.commands.iter().any(|c| matches!(c, PathCommand::LineTo(_))));
    }

    #[test]
    fn segments_share_anchors_at_the_seams() {
        let path = build_wave_path(&state(), true);
        let curves = path.curves();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[0].end, curves[1].start);
        assert_eq!(curves[1].end, curves[2].start);
    }

    #[test]
    fn anchors_sit_on_the_baseline() {
        let s = state();
        let path = build_wave_path(&s, true);
        for curve in path.curves() {
            assert_eq!(curve.start.y, s.baseline);
            assert_eq!(curve.end.y, s.baseline);
        }
    }

    #[test]
    fn controls_alternate_levels() {
        let s = state();
        let path = build_wave_path(&s, true);
        let curves = path.curves();
        assert_eq!(curves[0].ctrl.y, s.level_a);
        assert_eq!(curves[1].ctrl.y, s.level_b);
        assert_eq!(curves[2].ctrl.y, s.level_a);
    }

    #[test]
    fn svg_data_round_trips_commands() {
        let path = build_wave_path(&state(), false);
        let data = path.to_svg_data();
        assert!(data.starts_with("M 200.00 50.00 Q 150.00 0.00 100.00 50.00"));
        assert_eq!(data.matches('Z').count(), 3);
        assert_eq!(data.matches('Q').count(), 3);
    }

    #[test]
    fn unlaid_out_surface_builds_nothing() {
        let s = WaveState::new(0.0, 0.0, 5.0, 0.0, 0.0, 0.0);
        assert!(build_wave_path(&s, false).is_empty());
    }

    #[test]
    fn fill_bounds_cover_the_surface_band() {
        let s = state();
        let path = build_wave_path(&s, false);
        let (min_x, min_y, max_x, max_y) = path.bounds().unwrap();
        assert_eq!(min_x, s.end2);
        assert_eq!(max_x, s.start0);
        assert_eq!(max_y, s.height);
        // The crest reaches toward level_a (0) but a quadratic only gets
        // halfway from the baseline to its control at t = 0.5.
        assert!(min_y >= 0.0 && min_y <= s.baseline);
    }
}
