//! Palette-wide settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::ColorSpace;
use crate::error::{Result, SplineError};
use crate::params::{param_kind, param_space, param_usize};
use crate::path::SplineKind;

/// Settings shared by every path in a [`Palette`](crate::Palette).
///
/// `working_space` is where interpolation math runs, `output_space` is what
/// [`Palette::sample_default`](crate::Palette::sample_default) returns,
/// `size` is its sample count and `kind` is the curve family used for paths
/// built with [`Palette::add_colors`](crate::Palette::add_colors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub working_space: ColorSpace,
    pub output_space: ColorSpace,
    pub size: usize,
    pub kind: SplineKind,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            working_space: ColorSpace::OkLch,
            output_space: ColorSpace::Srgb,
            size: 16,
            kind: SplineKind::CatmullRom,
        }
    }
}

impl PaletteConfig {
    /// Builds a config from a JSON params object.
    ///
    /// Missing or mistyped keys keep their defaults. An unknown space tag
    /// fails with `UnsupportedSpace`, and a `size` of 0 with
    /// `InvalidOperation`.
    ///
    /// ```
    /// use serde_json::json;
    /// use splinker_core::{ColorSpace, PaletteConfig};
    ///
    /// let config = PaletteConfig::from_params(&json!({"working_space": "hsl", "size": 5})).unwrap();
    /// assert_eq!(config.working_space, ColorSpace::Hsl);
    /// assert_eq!(config.size, 5);
    /// ```
    pub fn from_params(params: &Value) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            working_space: param_space(params, "working_space", defaults.working_space)?,
            output_space: param_space(params, "output_space", defaults.output_space)?,
            size: param_usize(params, "size", defaults.size),
            kind: param_kind(params, "kind", defaults.kind)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SplineError::InvalidOperation(
                "palette size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_working_space(mut self, space: ColorSpace) -> Self {
        self.working_space = space;
        self
    }

    pub fn with_output_space(mut self, space: ColorSpace) -> Self {
        self.output_space = space;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_kind(mut self, kind: SplineKind) -> Self {
        self.kind = kind;
        self
    }
}
