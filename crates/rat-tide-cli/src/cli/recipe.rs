//! Widget recipe system for declarative configuration.
//!
//! Recipes are YAML files selecting a widget and its styling, so a preview
//! or render run can be reproduced without retyping flags.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rat_tide::{FieldStyle, GaugeStyle};

/// Which widget a recipe drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Field,
    Gauge,
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Field => "field",
            WidgetKind::Gauge => "gauge",
        }
    }

    /// Parse widget kind from string.
    pub fn from_name(name: &str) -> Option<WidgetKind> {
        match name.to_lowercase().as_str() {
            "field" | "wave" => Some(WidgetKind::Field),
            "gauge" | "progress" => Some(WidgetKind::Gauge),
            _ => None,
        }
    }
}

/// A complete recipe for one widget run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Optional recipe name/title.
    #[serde(default)]
    pub name: Option<String>,

    /// Widget to drive.
    #[serde(default = "default_widget")]
    pub widget: WidgetKind,

    /// Drawing-surface dimensions.
    #[serde(default)]
    pub surface: Surface,

    /// Styling applied to the widget.
    #[serde(default)]
    pub style: StyleConfig,

    /// Target progress for the gauge (0-100).
    #[serde(default)]
    pub progress: Option<i32>,
}

fn default_widget() -> WidgetKind {
    WidgetKind::Field
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            name: None,
            widget: default_widget(),
            surface: Surface::default(),
            style: StyleConfig::default(),
            progress: None,
        }
    }
}

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Surface {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_width() -> f64 {
    400.0
}

fn default_height() -> f64 {
    225.0
}

impl Default for Surface {
    fn default() -> Self {
        Self { width: default_width(), height: default_height() }
    }
}

/// Style properties shared by both widgets.
///
/// Field widgets read `stroke_only`/`line_width`; gauge widgets read
/// `amplitude`/`background_color`. Unused fields are simply ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_speed")]
    pub speed: f64,

    #[serde(default)]
    pub stroke_only: bool,

    #[serde(default = "default_line_width")]
    pub line_width: f64,

    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    #[serde(default = "default_wave_color")]
    pub wave_color: String,

    #[serde(default)]
    pub background_color: Option<String>,
}

fn default_speed() -> f64 {
    5.0
}

fn default_line_width() -> f64 {
    5.0
}

fn default_amplitude() -> f64 {
    30.0
}

fn default_wave_color() -> String {
    "#ffff00".to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            stroke_only: false,
            line_width: default_line_width(),
            amplitude: default_amplitude(),
            wave_color: default_wave_color(),
            background_color: None,
        }
    }
}

impl StyleConfig {
    pub fn to_field_style(&self) -> FieldStyle {
        FieldStyle {
            speed: self.speed,
            stroke_only: self.stroke_only,
            line_width: self.line_width,
            wave_color: self.wave_color.clone(),
        }
    }

    pub fn to_gauge_style(&self) -> GaugeStyle {
        GaugeStyle {
            speed: self.speed,
            amplitude: self.amplitude,
            wave_color: self.wave_color.clone(),
            background_color: self.background_color.clone(),
        }
    }
}

/// Error type for recipe loading.
#[derive(Debug)]
pub enum RecipeError {
    ReadError(String),
    ParseError(String),
}

impl std::fmt::Display for RecipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeError::ReadError(msg) => write!(f, "Failed to read recipe: {}", msg),
            RecipeError::ParseError(msg) => write!(f, "Failed to parse recipe: {}", msg),
        }
    }
}

impl std::error::Error for RecipeError {}

/// Load a recipe from a YAML file.
pub fn load_recipe(path: &Path) -> Result<Recipe, RecipeError> {
    let content = fs::read_to_string(path)
        .map_err(|e| RecipeError::ReadError(format!("{}: {}", path.display(), e)))?;
    serde_yaml::from_str(&content).map_err(|e| RecipeError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_recipe_uses_defaults() {
        let recipe: Recipe = serde_yaml::from_str("widget: gauge").unwrap();
        assert_eq!(recipe.widget, WidgetKind::Gauge);
        assert_eq!(recipe.surface.width, 400.0);
        assert_eq!(recipe.style.speed, 5.0);
        assert_eq!(recipe.style.amplitude, 30.0);
        assert_eq!(recipe.progress, None);
    }

    #[test]
    fn full_recipe_parses() {
        let yaml = r##"
name: demo gauge
widget: gauge
surface:
  width: 300
  height: 300
style:
  speed: 8
  amplitude: 40
  wave_color: "#00c0ff"
  background_color: "#101010"
progress: 75
"##;
        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recipe.name.as_deref(), Some("demo gauge"));
        assert_eq!(recipe.surface.height, 300.0);
        assert_eq!(recipe.progress, Some(75));

        let style = recipe.style.to_gauge_style();
        assert_eq!(style.amplitude, 40.0);
        assert_eq!(style.background_color.as_deref(), Some("#101010"));
    }

    #[test]
    fn style_converts_to_field_style() {
        let config = StyleConfig { stroke_only: true, line_width: 2.0, ..StyleConfig::default() };
        let style = config.to_field_style();
        assert!(style.stroke_only);
        assert_eq!(style.line_width, 2.0);
    }

    #[test]
    fn bad_yaml_reports_parse_error() {
        let err = serde_yaml::from_str::<Recipe>("widget: [nope").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn unknown_widget_name_is_rejected() {
        assert_eq!(WidgetKind::from_name("spinner"), None);
        assert_eq!(WidgetKind::from_name("GAUGE"), Some(WidgetKind::Gauge));
    }
}
