use super::model::DerivedQuantities;
use crate::error::{PressError, PressResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four user-adjustable press inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    InputForce,
    InputRadius,
    OutputRadius,
    StrokeDepth,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::InputForce,
        Parameter::InputRadius,
        Parameter::OutputRadius,
        Parameter::StrokeDepth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Parameter::InputForce => "Input Force (F₁)",
            Parameter::InputRadius => "Input Radius (r₁)",
            Parameter::OutputRadius => "Output Radius (r₂)",
            Parameter::StrokeDepth => "Stroke Depth (d₁)",
        }
    }

    /// SI unit of the stored value.
    pub fn si_unit(self) -> &'static str {
        match self {
            Parameter::InputForce => "N",
            _ => "m",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::InputForce => "input force",
            Parameter::InputRadius => "input radius",
            Parameter::OutputRadius => "output radius",
            Parameter::StrokeDepth => "stroke depth",
        };
        f.write_str(name)
    }
}

/// Validated press inputs in SI units.
///
/// Every field is strictly positive and finite, and so is every derived
/// quantity. The only ways to build or change one go through
/// [`PressParameters::new`] and [`PressParameters::with`], so a value of this
/// type can always be fed to the physics model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressParameters {
    input_force: f64,
    input_radius: f64,
    output_radius: f64,
    stroke_depth: f64,
}

impl Default for PressParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PressParameters {
    /// 100 N on a 20 mm piston driving a 100 mm piston, 100 mm stroke.
    pub const DEFAULT: Self = Self {
        input_force: 100.0,
        input_radius: 0.02,
        output_radius: 0.1,
        stroke_depth: 0.1,
    };

    pub fn new(
        input_force: f64,
        input_radius: f64,
        output_radius: f64,
        stroke_depth: f64,
    ) -> PressResult<Self> {
        DerivedQuantities::compute(input_force, input_radius, output_radius, stroke_depth)?;
        Ok(Self {
            input_force,
            input_radius,
            output_radius,
            stroke_depth,
        })
    }

    pub fn input_force(&self) -> f64 {
        self.input_force
    }

    pub fn input_radius(&self) -> f64 {
        self.input_radius
    }

    pub fn output_radius(&self) -> f64 {
        self.output_radius
    }

    pub fn stroke_depth(&self) -> f64 {
        self.stroke_depth
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::InputForce => self.input_force,
            Parameter::InputRadius => self.input_radius,
            Parameter::OutputRadius => self.output_radius,
            Parameter::StrokeDepth => self.stroke_depth,
        }
    }

    /// Copy with one value replaced. `self` is untouched on error.
    pub fn with(&self, parameter: Parameter, value: f64) -> PressResult<Self> {
        let mut next = *self;
        match parameter {
            Parameter::InputForce => next.input_force = value,
            Parameter::InputRadius => next.input_radius = value,
            Parameter::OutputRadius => next.output_radius = value,
            Parameter::StrokeDepth => next.stroke_depth = value,
        }
        Self::new(
            next.input_force,
            next.input_radius,
            next.output_radius,
            next.stroke_depth,
        )
    }
}

pub(crate) fn check_positive(parameter: Parameter, value: f64) -> PressResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PressError::invalid_domain(parameter, value))
    }
}

/// Allowed interval and slider step for one parameter, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Requires `0 < min <= max` and `0 < step`, all finite.
    pub fn validate(&self, parameter: Parameter) -> PressResult<()> {
        let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
        if finite && self.min > 0.0 && self.min <= self.max && self.step > 0.0 {
            Ok(())
        } else {
            Err(PressError::InvalidRange {
                parameter,
                min: self.min,
                max: self.max,
                step: self.step,
            })
        }
    }
}

/// Input-validity ranges for the four parameters.
///
/// These are a UI convention rather than a physical requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterBounds {
    pub input_force: ParameterRange,
    pub input_radius: ParameterRange,
    pub output_radius: ParameterRange,
    pub stroke_depth: ParameterRange,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            input_force: ParameterRange::new(1.0, 5000.0, 1.0),
            input_radius: ParameterRange::new(0.005, 0.05, 0.001),
            output_radius: ParameterRange::new(0.02, 0.5, 0.001),
            stroke_depth: ParameterRange::new(0.01, 0.5, 0.01),
        }
    }
}

impl ParameterBounds {
    pub fn range(&self, parameter: Parameter) -> ParameterRange {
        match parameter {
            Parameter::InputForce => self.input_force,
            Parameter::InputRadius => self.input_radius,
            Parameter::OutputRadius => self.output_radius,
            Parameter::StrokeDepth => self.stroke_depth,
        }
    }

    /// Positivity first, then range membership.
    pub fn check(&self, parameter: Parameter, value: f64) -> PressResult<f64> {
        let value = check_positive(parameter, value)?;
        let range = self.range(parameter);
        if range.contains(value) {
            Ok(value)
        } else {
            Err(PressError::OutOfRange {
                parameter,
                value,
                min: range.min,
                max: range.max,
            })
        }
    }

    pub fn validate(&self) -> PressResult<()> {
        for parameter in Parameter::ALL {
            self.range(parameter).validate(parameter)?;
        }
        Ok(())
    }

    pub fn check_all(&self, params: &PressParameters) -> PressResult<()> {
        for parameter in Parameter::ALL {
            self.check(parameter, params.get(parameter))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = PressParameters::default();
        assert!((params.input_force() - 100.0).abs() < f64::EPSILON);
        assert!((params.input_radius() - 0.02).abs() < f64::EPSILON);
        assert!((params.output_radius() - 0.1).abs() < f64::EPSILON);
        assert!((params.stroke_depth() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(matches!(
            PressParameters::new(100.0, 0.0, 0.1, 0.1),
            Err(PressError::InvalidDomain {
                parameter: Parameter::InputRadius,
                ..
            })
        ));
        assert!(PressParameters::new(-5.0, 0.02, 0.1, 0.1).is_err());
        assert!(PressParameters::new(100.0, 0.02, f64::NAN, 0.1).is_err());
        assert!(PressParameters::new(100.0, 0.02, 0.1, f64::INFINITY).is_err());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let params = PressParameters::default();
        let changed = params.with(Parameter::InputForce, 250.0).unwrap();
        assert!((changed.input_force() - 250.0).abs() < f64::EPSILON);
        assert!((params.input_force() - 100.0).abs() < f64::EPSILON);

        assert!(params.with(Parameter::OutputRadius, -0.1).is_err());
    }

    #[test]
    fn test_new_rejects_overflowing_inputs() {
        assert!(matches!(
            PressParameters::new(1e308, 0.001, 0.5, 0.1),
            Err(PressError::InvalidDomain {
                parameter: Parameter::InputForce,
                ..
            })
        ));
        let params = PressParameters::default();
        assert!(params.with(Parameter::InputRadius, 1e-200).is_err());
    }

    #[test]
    fn test_bounds_check_order() {
        let bounds = ParameterBounds::default();
        assert!(matches!(
            bounds.check(Parameter::InputForce, 0.0),
            Err(PressError::InvalidDomain { .. })
        ));
        assert!(matches!(
            bounds.check(Parameter::InputForce, 6000.0),
            Err(PressError::OutOfRange { .. })
        ));
        assert!(bounds.check(Parameter::InputRadius, 0.005).is_ok());
        assert!(bounds.check(Parameter::InputRadius, 0.05).is_ok());
        assert!(bounds.check_all(&PressParameters::default()).is_ok());
    }

    #[test]
    fn test_bounds_validation() {
        assert!(ParameterBounds::default().validate().is_ok());

        let mut bounds = ParameterBounds::default();
        bounds.stroke_depth = ParameterRange::new(0.0, 0.5, 0.01);
        assert!(matches!(
            bounds.validate(),
            Err(PressError::InvalidRange {
                parameter: Parameter::StrokeDepth,
                ..
            })
        ));

        assert!(ParameterRange::new(0.02, 0.02, 0.001)
            .validate(Parameter::OutputRadius)
            .is_ok());
        assert!(ParameterRange::new(0.02, f64::INFINITY, 0.001)
            .validate(Parameter::OutputRadius)
            .is_err());
    }
}
