//! # rat-tide
//!
//! Core wave geometry and animation engine.
//!
//! One shared recurrence ([`engine::WaveState`]) drives two widgets:
//! [`field::WaveField`], an endlessly scrolling wave over a rectangular
//! surface, and [`gauge::WaveGauge`], the same wave clipped to a disc and
//! lifted by a 0-100 progress value.
//!
//! ## Rust Lesson #9: Library vs Binary Crates
//!
//! This crate is a *library*: no `main`, just types and functions.
//! The `rat-tide-cli` crate depends on it via a path dependency and
//! provides the terminal front-end. Keeping the geometry here means it
//! compiles without any rendering stack at all.

pub mod driver;
pub mod engine;
pub mod field;
pub mod gauge;
pub mod geometry;
pub mod path;
pub mod scene;
pub mod style;

// Re-export common types at crate root for convenience.
pub use driver::{FrameDriver, FrameTicket, FRAME_DELAY};
pub use engine::WaveState;
pub use field::WaveField;
pub use gauge::{FillPhase, WaveGauge};
pub use geometry::{Point, QuadCurve};
pub use path::{build_wave_path, PathCommand, WavePath};
pub use scene::{Circle, DrawOp, Paint, Scene};
pub use style::{FieldStyle, GaugeStyle};
