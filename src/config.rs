//! Configuration for the press demo.
//!
//! Everything has a default matching the classic classroom setup, so an
//! empty JSON object (or no file at all) is a valid configuration.

use crate::animation::AnimationConfig;
use crate::controls::PressureUnit;
use crate::error::{PressError, PressResult};
use crate::physics::{Parameter, ParameterBounds, PressParameters};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Starting values of the four inputs, also restored by reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultParameters {
    /// Newtons
    pub input_force: f64,
    /// Meters
    pub input_radius: f64,
    /// Meters
    pub output_radius: f64,
    /// Meters
    pub stroke_depth: f64,
}

impl Default for DefaultParameters {
    fn default() -> Self {
        let p = PressParameters::DEFAULT;
        Self {
            input_force: p.input_force(),
            input_radius: p.input_radius(),
            output_radius: p.output_radius(),
            stroke_depth: p.stroke_depth(),
        }
    }
}

impl DefaultParameters {
    pub fn set(&mut self, parameter: Parameter, value: f64) {
        match parameter {
            Parameter::InputForce => self.input_force = value,
            Parameter::InputRadius => self.input_radius = value,
            Parameter::OutputRadius => self.output_radius = value,
            Parameter::StrokeDepth => self.stroke_depth = value,
        }
    }
}

/// Overlay preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub pressure_unit: PressureUnit,
    /// Show the Pascal's principle explanation on startup.
    pub show_info: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pressure_unit: PressureUnit::Pascal,
            show_info: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressConfig {
    pub defaults: DefaultParameters,
    pub bounds: ParameterBounds,
    pub animation: AnimationConfig,
    pub display: DisplayConfig,
}

impl PressConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> PressResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PressError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| PressError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> PressResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| PressError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| PressError::ConfigIo {
            path: path.display().to_string(),
            source,
        })
    }

    /// The defaults as validated parameters, checked against the bounds.
    ///
    /// The bounds themselves are validated first.
    pub fn default_parameters(&self) -> PressResult<PressParameters> {
        self.bounds.validate()?;
        let d = &self.defaults;
        let params =
            PressParameters::new(d.input_force, d.input_radius, d.output_radius, d.stroke_depth)?;
        self.bounds.check_all(&params)?;
        Ok(params)
    }
}
