//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `render` - Write animation frames as PNG files
//! - `trace` - Dump per-frame engine state as JSON
//! - `benchmark` - Measure engine throughput
//! - `recipe` - YAML configuration loading shared by all commands

pub mod benchmark;
pub mod common;
pub mod recipe;
pub mod render;
pub mod trace;

pub use benchmark::cmd_benchmark;
pub use common::{render_scene, scene_to_svg, PREVIEW_HEIGHT, PREVIEW_WIDTH};
pub use recipe::{load_recipe, Recipe, RecipeError, StyleConfig, Surface, WidgetKind};
pub use render::cmd_render;
pub use trace::cmd_trace;
