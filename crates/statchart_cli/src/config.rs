//! Statchart configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statchart_charts::{BarLayout, TimeSeriesChartStyle};
use statchart_core::Size;
use statchart_theme::Palette;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "statchart.toml";

/// Top-level configuration (statchart.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StatchartConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub bar: BarConfig,
    #[serde(default)]
    pub theme: Palette,
}

/// Time-series canvas configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    #[serde(default = "default_canvas_height")]
    pub height: f64,
    /// Percent of the visible range per wheel step
    #[serde(default = "default_wheel_step")]
    pub wheel_step_percent: f64,
    /// Space between the y axis and the canvas
    #[serde(default = "default_canvas_offset")]
    pub canvas_offset: f64,
    #[serde(default = "default_axis_width")]
    pub axis_width: f64,
    /// Narrowest zoom, in seconds
    #[serde(default = "default_min_domain_range")]
    pub min_domain_range: f64,
}

fn default_canvas_width() -> f64 {
    550.0
}

fn default_canvas_height() -> f64 {
    400.0
}

fn default_wheel_step() -> f64 {
    8.0
}

fn default_canvas_offset() -> f64 {
    25.0
}

fn default_axis_width() -> f64 {
    30.0
}

fn default_min_domain_range() -> f64 {
    86_400.0
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            wheel_step_percent: default_wheel_step(),
            canvas_offset: default_canvas_offset(),
            axis_width: default_axis_width(),
            min_domain_range: default_min_domain_range(),
        }
    }
}

impl CanvasConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn chart_style(&self) -> TimeSeriesChartStyle {
        TimeSeriesChartStyle {
            canvas_offset: self.canvas_offset,
            axis_width: self.axis_width,
            wheel_step_percent: self.wheel_step_percent,
            min_domain_range: self.min_domain_range,
            ..TimeSeriesChartStyle::default()
        }
    }
}

/// Bar chart configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct BarConfig {
    #[serde(default = "default_bar_title")]
    pub title: String,
    /// Unit suffix for bar x values
    #[serde(default)]
    pub units: String,
    #[serde(default = "default_x_axis_left")]
    pub x_axis_left: f64,
    #[serde(default = "default_x_axis_width")]
    pub x_axis_width: f64,
    #[serde(default = "default_y_axis_height")]
    pub y_axis_height: f64,
    #[serde(default)]
    pub y_padding_top: f64,
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,
    #[serde(default = "default_y_max_tick_value")]
    pub y_max_tick_value: f64,
}

fn default_bar_title() -> String {
    "Occurrence".to_string()
}

fn default_x_axis_left() -> f64 {
    60.0
}

fn default_x_axis_width() -> f64 {
    500.0
}

fn default_y_axis_height() -> f64 {
    280.0
}

fn default_margin_top() -> f64 {
    20.0
}

fn default_y_max_tick_value() -> f64 {
    100.0
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            title: default_bar_title(),
            units: String::new(),
            x_axis_left: default_x_axis_left(),
            x_axis_width: default_x_axis_width(),
            y_axis_height: default_y_axis_height(),
            y_padding_top: 0.0,
            margin_top: default_margin_top(),
            y_max_tick_value: default_y_max_tick_value(),
        }
    }
}

impl BarConfig {
    pub fn layout(&self) -> BarLayout {
        BarLayout {
            x_axis_left: self.x_axis_left,
            x_axis_width: self.x_axis_width,
            y_axis_height: self.y_axis_height,
            y_padding_top: self.y_padding_top,
            margin_top: self.margin_top,
            y_max_tick_value: self.y_max_tick_value,
        }
    }
}

impl StatchartConfig {
    /// Load configuration from a file, or from `statchart.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `statchart init` to create one.",
                CONFIG_FILE_NAME,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Use an explicit path if given, else `./statchart.toml` when present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }
        let local = Path::new(CONFIG_FILE_NAME);
        if local.exists() {
            tracing::debug!("loading {}", local.display());
            return Self::load_from_path(local);
        }
        tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StatchartConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
