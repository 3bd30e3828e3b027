use crate::error::ConfigError;
use crate::theme::{Rgba, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas units per grid cell while compositing.
    pub scale: f32,
    /// Magnification applied to the finished canvas before encoding.
    pub final_upscale: f32,
    /// Fraction of the nominal map extent added around the cropped layers.
    pub padding_ratio: f32,
    /// Path stroke width in canvas units, before the final upscale.
    pub path_width: f32,
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            final_upscale: 3.0,
            padding_ratio: 0.01,
            path_width: 2.0,
            theme: Theme::valetudo_default(),
        }
    }
}

impl RenderConfig {
    /// Total magnification from grid cells to output pixels.
    pub fn magnification(&self) -> f32 {
        self.scale * self.final_upscale
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("scale", self.scale)?;
        check_positive("finalUpscale", self.final_upscale)?;
        check_non_negative("paddingRatio", self.padding_ratio)?;
        check_non_negative("pathWidth", self.path_width)?;
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, value })
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, value })
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    background: Option<Rgba>,
    wall: Option<Rgba>,
    floor: Option<Rgba>,
    segment: Option<Rgba>,
    path: Option<Rgba>,
    predicted_path: Option<Rgba>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeFile>,
    scale: Option<f32>,
    final_upscale: Option<f32>,
    padding_ratio: Option<f32>,
    path_width: Option<f32>,
}

/// Loads a JSON (or JSON5) config file over the defaults. `None` yields the
/// defaults unchanged.
pub fn load_config(path: Option<&Path>) -> Result<RenderConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<RenderConfig, ConfigError> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = RenderConfig::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "light" {
            config.theme = Theme::light();
        } else if theme_name == "default" || theme_name == "valetudo" {
            config.theme = Theme::valetudo_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.wall {
            config.theme.wall = v;
        }
        if let Some(v) = vars.floor {
            config.theme.floor = v;
        }
        if let Some(v) = vars.segment {
            config.theme.segment = v;
        }
        if let Some(v) = vars.path {
            config.theme.path = v;
        }
        if let Some(v) = vars.predicted_path {
            config.theme.predicted_path = v;
        }
    }

    if let Some(v) = parsed.scale {
        config.scale = v;
    }
    if let Some(v) = parsed.final_upscale {
        config.final_upscale = v;
    }
    if let Some(v) = parsed.padding_ratio {
        config.padding_ratio = v;
    }
    if let Some(v) = parsed.path_width {
        config.path_width = v;
    }

    config.validate()?;
    Ok(config)
}
