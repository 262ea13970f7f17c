//! Renderer-agnostic frame description.
//!
//! Widgets compose each frame as an ordered list of draw operations; the
//! front-end translates them to its target (the CLI builds SVG and
//! rasterizes it). Order matters: a clip applies to every operation after it
//! except text, which is always drawn on top unclipped.

use crate::path::WavePath;

/// A circle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    /// The largest circle that fits the surface, centered.
    pub fn inscribed(width: f64, height: f64) -> Self {
        Self {
            cx: width / 2.0,
            cy: height / 2.0,
            r: width.min(height) / 2.0,
        }
    }
}

/// How a path is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Fill { color: String },
    Stroke { color: String, width: f64 },
}

/// One draw operation within a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Restrict all following fills/strokes to the circle.
    ClipCircle(Circle),
    /// A solid filled circle.
    FillCircle { circle: Circle, color: String },
    /// The wave path with its paint.
    Path { path: WavePath, paint: Paint },
    /// Centered text; `(x, y)` is the anchor point, drawn unclipped.
    Text {
        x: f64,
        y: f64,
        size: f64,
        color: String,
        text: String,
    },
}

/// One frame of drawing for a `width` x `height` surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// A frame with nothing to draw (surface not laid out yet).
    pub fn empty(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inscribed_circle_uses_smaller_dimension() {
        let circle = Circle::inscribed(200.0, 100.0);
        assert_eq!(circle.cx, 100.0);
        assert_eq!(circle.cy, 50.0);
        assert_eq!(circle.r, 50.0);
    }

    #[test]
    fn empty_scene_has_no_ops() {
        assert!(Scene::empty(10.0, 10.0).is_empty());
    }
}
