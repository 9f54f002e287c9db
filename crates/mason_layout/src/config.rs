//! Layout configuration
//!
//! Callers supply a [`PartialLayoutConfig`]; every option left unset takes the
//! default from [`LayoutConfig::default`]. Both deserialize from TOML
//! (`mason.toml`) or JSON with snake_case keys.

use crate::error::{LayoutError, Result};
use mason_animation::Easing;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where tiles come from on their entrance animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntranceDirection {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    /// Rise slightly from below the final position while fading in
    Fade,
}

/// Fully resolved layout configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Easing name for reposition animations
    pub easing: String,
    /// Seconds a reposition animation takes
    pub transition_duration: f32,
    /// Seconds between consecutive entrance animations
    pub stagger_seconds: f32,
    pub entrance_direction: EntranceDirection,
    pub hover_scale_enabled: bool,
    /// Scale applied on hover, strictly between 0 and 1
    pub hover_scale_factor: f32,
    pub blur_on_entrance_enabled: bool,
    /// Tint image tiles with a gradient overlay on hover
    pub color_shift_on_hover_enabled: bool,
    pub column_gap_px: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            easing: "power3.out".to_string(),
            transition_duration: 0.6,
            stagger_seconds: 0.05,
            entrance_direction: EntranceDirection::Bottom,
            hover_scale_enabled: true,
            hover_scale_factor: 0.95,
            blur_on_entrance_enabled: true,
            color_shift_on_hover_enabled: false,
            column_gap_px: 24.0,
        }
    }
}

impl LayoutConfig {
    /// Check every option, returning the parsed easing on success
    pub fn validate(&self) -> Result<Easing> {
        let easing = Easing::from_name(&self.easing)?;

        non_negative("transition_duration", self.transition_duration)?;
        non_negative("stagger_seconds", self.stagger_seconds)?;
        non_negative("column_gap_px", self.column_gap_px)?;

        if !(self.hover_scale_factor > 0.0 && self.hover_scale_factor < 1.0) {
            return Err(LayoutError::InvalidOption {
                option: "hover_scale_factor",
                reason: format!("must be between 0 and 1, got {}", self.hover_scale_factor),
            });
        }

        Ok(easing)
    }
}

fn non_negative(option: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidOption {
            option,
            reason: format!("must be a non-negative number, got {value}"),
        })
    }
}

/// Layout configuration with every option optional
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialLayoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_duration: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger_seconds: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance_direction: Option<EntranceDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_scale_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_scale_factor: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_on_entrance_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_shift_on_hover_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_gap_px: Option<f32>,
}

impl PartialLayoutConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load from a `.toml` or `.json` file, chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_toml_str(&source),
        }
    }

    /// Overlay `other`; options set in `other` win
    pub fn merge(&mut self, other: PartialLayoutConfig) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            easing,
            transition_duration,
            stagger_seconds,
            entrance_direction,
            hover_scale_enabled,
            hover_scale_factor,
            blur_on_entrance_enabled,
            color_shift_on_hover_enabled,
            column_gap_px
        );
    }

    /// Fill unset options from the defaults and validate the result
    pub fn resolve(&self) -> Result<LayoutConfig> {
        let defaults = LayoutConfig::default();
        let config = LayoutConfig {
            easing: self.easing.clone().unwrap_or(defaults.easing),
            transition_duration: self
                .transition_duration
                .unwrap_or(defaults.transition_duration),
            stagger_seconds: self.stagger_seconds.unwrap_or(defaults.stagger_seconds),
            entrance_direction: self
                .entrance_direction
                .unwrap_or(defaults.entrance_direction),
            hover_scale_enabled: self
                .hover_scale_enabled
                .unwrap_or(defaults.hover_scale_enabled),
            hover_scale_factor: self
                .hover_scale_factor
                .unwrap_or(defaults.hover_scale_factor),
            blur_on_entrance_enabled: self
                .blur_on_entrance_enabled
                .unwrap_or(defaults.blur_on_entrance_enabled),
            color_shift_on_hover_enabled: self
                .color_shift_on_hover_enabled
                .unwrap_or(defaults.color_shift_on_hover_enabled),
            column_gap_px: self.column_gap_px.unwrap_or(defaults.column_gap_px),
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<LayoutConfig> for PartialLayoutConfig {
    fn from(config: LayoutConfig) -> Self {
        Self {
            easing: Some(config.easing),
            transition_duration: Some(config.transition_duration),
            stagger_seconds: Some(config.stagger_seconds),
            entrance_direction: Some(config.entrance_direction),
            hover_scale_enabled: Some(config.hover_scale_enabled),
            hover_scale_factor: Some(config.hover_scale_factor),
            blur_on_entrance_enabled: Some(config.blur_on_entrance_enabled),
            color_shift_on_hover_enabled: Some(config.color_shift_on_hover_enabled),
            column_gap_px: Some(config.column_gap_px),
        }
    }
}
