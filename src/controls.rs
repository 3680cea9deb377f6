//! Control-panel model
//!
//! Field specs describe how each parameter is shown and typed in (display
//! unit, multiplier, decimals, bounds). [`EditableValue`] is the two-state
//! widget that swaps between showing a value and editing it as text.
//! Nothing here touches the GPU or the window.

use crate::error::{PressError, PressResult};
use crate::physics::{
    DerivedQuantities, Parameter, ParameterBounds, ParameterRange, PressParameters,
};
use approx::relative_eq;
use serde::{Deserialize, Serialize};

const BOUND_TOLERANCE: f64 = 1e-9;

/// How one parameter is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub parameter: Parameter,
    pub unit: &'static str,
    /// SI value × multiplier = displayed value.
    pub multiplier: f64,
    pub decimals: usize,
    pub range: ParameterRange,
}

impl FieldSpec {
    pub fn for_parameter(parameter: Parameter, bounds: &ParameterBounds) -> Self {
        let (unit, multiplier, decimals) = match parameter {
            Parameter::InputForce => ("N", 1.0, 0),
            Parameter::InputRadius => ("mm", 1000.0, 1),
            Parameter::OutputRadius => ("mm", 1000.0, 1),
            Parameter::StrokeDepth => ("mm", 1000.0, 0),
        };
        Self {
            parameter,
            unit,
            multiplier,
            decimals,
            range: bounds.range(parameter),
        }
    }

    pub fn all(bounds: &ParameterBounds) -> [FieldSpec; 4] {
        Parameter::ALL.map(|p| Self::for_parameter(p, bounds))
    }

    pub fn display_min(&self) -> f64 {
        self.range.min * self.multiplier
    }

    pub fn display_max(&self) -> f64 {
        self.range.max * self.multiplier
    }

    pub fn format(&self, si_value: f64) -> String {
        format_fixed(si_value * self.multiplier, self.decimals)
    }

    pub fn format_with_unit(&self, si_value: f64) -> String {
        format!("{} {}", self.format(si_value), self.unit)
    }

    /// Parses text typed in display units into an SI value.
    pub fn parse(&self, input: &str) -> PressResult<f64> {
        let trimmed = input.trim();
        let shown: f64 = trimmed.parse().map_err(|_| {
            PressError::invalid_edit(self.parameter, input, "not a number")
        })?;
        if !shown.is_finite() {
            return Err(PressError::invalid_edit(self.parameter, input, "not a finite number"));
        }

        let (min, max) = (self.display_min(), self.display_max());
        let slack = BOUND_TOLERANCE * max.abs().max(1.0);
        if shown < min - slack || shown > max + slack {
            return Err(PressError::invalid_edit(
                self.parameter,
                input,
                format!(
                    "must be between {} and {} {}",
                    format_fixed(min, self.decimals),
                    format_fixed(max, self.decimals),
                    self.unit
                ),
            ));
        }

        Ok((shown / self.multiplier).clamp(self.range.min, self.range.max))
    }
}

/// Whether a value is being shown or typed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Display,
    Editing { buffer: String },
}

/// A value label that turns into a text field when clicked.
#[derive(Debug, Clone)]
pub struct EditableValue {
    spec: FieldSpec,
    mode: DisplayMode,
}

impl EditableValue {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            mode: DisplayMode::Display,
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DisplayMode::Editing { .. })
    }

    pub fn start_editing(&mut self, si_value: f64) {
        self.mode = DisplayMode::Editing {
            buffer: self.spec.format(si_value),
        };
    }

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            DisplayMode::Editing { buffer } => Some(buffer),
            DisplayMode::Display => None,
        }
    }

    /// Leaves edit mode. Returns the parsed SI value, or `None` when the
    /// field was not being edited.
    pub fn commit(&mut self) -> Option<PressResult<f64>> {
        match std::mem::take(&mut self.mode) {
            DisplayMode::Editing { buffer } => Some(self.spec.parse(&buffer)),
            DisplayMode::Display => None,
        }
    }

    pub fn cancel(&mut self) {
        self.mode = DisplayMode::Display;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    #[default]
    Pascal,
    Kilopascal,
}

impl PressureUnit {
    pub fn toggled(self) -> Self {
        match self {
            PressureUnit::Pascal => PressureUnit::Kilopascal,
            PressureUnit::Kilopascal => PressureUnit::Pascal,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::Kilopascal => "kPa",
        }
    }

    pub fn format(self, pascals: f64) -> String {
        match self {
            PressureUnit::Pascal => format!("{} Pa", format_fixed(pascals, 0)),
            PressureUnit::Kilopascal => format!("{} kPa", format_fixed(pascals / 1000.0, 2)),
        }
    }
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Result rows as shown in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsReadout {
    pub pressure: String,
    pub output_force: String,
    pub output_displacement: String,
    pub mechanical_advantage: String,
    pub input_area: String,
    pub output_area: String,
}

impl ResultsReadout {
    pub fn new(derived: &DerivedQuantities, unit: PressureUnit) -> Self {
        Self {
            pressure: unit.format(derived.pressure),
            output_force: format!("{} N", format_fixed(derived.output_force, 0)),
            output_displacement: format!(
                "{} mm",
                format_fixed(derived.output_displacement * 1000.0, 2)
            ),
            mechanical_advantage: format!("{}×", format_fixed(derived.mechanical_advantage(), 1)),
            input_area: format!("{} m²", format_fixed(derived.input_area, 6)),
            output_area: format!("{} m²", format_fixed(derived.output_area, 6)),
        }
    }
}

/// Relative tolerance for the conservation checks.
pub const VALIDATION_TOLERANCE: f64 = 1e-9;

/// One row of the physics-validation panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationCheck {
    pub label: String,
    pub holds: bool,
}

/// Pressure equality, volume conservation and the force/area ratio for
/// the given inputs.
pub fn validation_checks(
    params: &PressParameters,
    derived: &DerivedQuantities,
) -> [ValidationCheck; 3] {
    let volume_in = derived.displaced_volume(params.stroke_depth());
    let volume_out = derived.received_volume();
    let pressure_out = derived.output_force / derived.output_area;
    let force_ratio = derived.output_force / params.input_force();

    [
        ValidationCheck {
            label: format!("P₁ = P₂: {pressure_out:.0} Pa"),
            holds: relative_eq!(
                derived.pressure,
                pressure_out,
                max_relative = VALIDATION_TOLERANCE
            ),
        },
        ValidationCheck {
            label: format!("V₁ = V₂: {volume_in:.3e} m³"),
            holds: relative_eq!(volume_in, volume_out, max_relative = VALIDATION_TOLERANCE),
        },
        ValidationCheck {
            label: format!("F₂/F₁ = A₂/A₁: {force_ratio:.2}"),
            holds: relative_eq!(
                force_ratio,
                derived.mechanical_advantage(),
                max_relative = VALIDATION_TOLERANCE
            ),
        },
    ]
}
