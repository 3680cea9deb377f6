use super::params::{check_positive, Parameter, PressParameters};
use crate::error::{PressError, PressResult};
use std::f64::consts::PI;

/// Everything the press derives from its four inputs.
///
/// Values are in SI units and unrounded; rounding for display is done by
/// [`controls`](crate::controls).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    /// A₁ = π·r₁², m²
    pub input_area: f64,
    /// A₂ = π·r₂², m²
    pub output_area: f64,
    /// P = F₁ / A₁, Pa
    pub pressure: f64,
    /// F₂ = P · A₂, N
    pub output_force: f64,
    /// d₂ = d₁ · A₁ / A₂, m
    pub output_displacement: f64,
}

impl DerivedQuantities {
    /// Maps validated parameters to their derived quantities.
    pub fn derive(params: &PressParameters) -> Self {
        Self::from_raw(
            params.input_force(),
            params.input_radius(),
            params.output_radius(),
            params.stroke_depth(),
        )
    }

    /// Checked entry point for values that did not go through
    /// [`PressParameters`]. Refuses to produce NaN, infinity or a zero
    /// quantity, including when valid inputs underflow or overflow.
    pub fn compute(
        input_force: f64,
        input_radius: f64,
        output_radius: f64,
        stroke_depth: f64,
    ) -> PressResult<Self> {
        check_positive(Parameter::InputForce, input_force)?;
        check_positive(Parameter::InputRadius, input_radius)?;
        check_positive(Parameter::OutputRadius, output_radius)?;
        check_positive(Parameter::StrokeDepth, stroke_depth)?;

        let derived = Self::from_raw(input_force, input_radius, output_radius, stroke_depth);

        // Each quantity is blamed on the input that drives it out of range.
        let quantities = [
            (Parameter::InputRadius, input_radius, derived.input_area),
            (Parameter::OutputRadius, output_radius, derived.output_area),
            (Parameter::InputForce, input_force, derived.pressure),
            (Parameter::OutputRadius, output_radius, derived.output_force),
            (Parameter::StrokeDepth, stroke_depth, derived.output_displacement),
        ];
        for (parameter, value, quantity) in quantities {
            if !(quantity.is_finite() && quantity > 0.0) {
                return Err(PressError::invalid_domain(parameter, value));
            }
        }
        Ok(derived)
    }

    fn from_raw(input_force: f64, input_radius: f64, output_radius: f64, stroke_depth: f64) -> Self {
        let input_area = PI * input_radius * input_radius;
        let output_area = PI * output_radius * output_radius;
        let pressure = input_force / input_area;
        let output_force = pressure * output_area;
        let output_displacement = stroke_depth * (input_area / output_area);

        Self {
            input_area,
            output_area,
            pressure,
            output_force,
            output_displacement,
        }
    }

    /// F₂ / F₁, equal to A₂ / A₁.
    pub fn mechanical_advantage(&self) -> f64 {
        self.output_area / self.input_area
    }

    /// Fluid volume pushed out of the input cylinder, A₁·d₁.
    pub fn displaced_volume(&self, stroke_depth: f64) -> f64 {
        self.input_area * stroke_depth
    }

    /// Fluid volume received by the output cylinder, A₂·d₂.
    pub fn received_volume(&self) -> f64 {
        self.output_area * self.output_displacement
    }

    pub fn pressure_kpa(&self) -> f64 {
        self.pressure / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_scenario() {
        let q = DerivedQuantities::derive(&PressParameters::DEFAULT);

        assert_relative_eq!(q.input_area, PI * 0.0004, max_relative = 1e-12);
        assert_relative_eq!(q.output_area, PI * 0.01, max_relative = 1e-12);
        assert_relative_eq!(q.pressure, 79_577.471_545_947_67, max_relative = 1e-9);
        assert_relative_eq!(q.output_force, 2500.0, max_relative = 1e-9);
        assert_relative_eq!(q.output_displacement, 0.004, max_relative = 1e-9);
        assert_relative_eq!(q.mechanical_advantage(), 25.0, max_relative = 1e-9);
    }

    #[test]
    fn test_volume_conserved() {
        let params = PressParameters::new(350.0, 0.013, 0.27, 0.42).unwrap();
        let q = DerivedQuantities::derive(&params);
        assert_relative_eq!(
            q.displaced_volume(params.stroke_depth()),
            q.received_volume(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_compute_rejects_zero_radius() {
        let result = DerivedQuantities::compute(100.0, 0.0, 0.1, 0.1);
        assert!(matches!(
            result,
            Err(PressError::InvalidDomain {
                parameter: Parameter::InputRadius,
                ..
            })
        ));
        assert!(DerivedQuantities::compute(100.0, 0.02, -0.1, 0.1).is_err());
    }

    #[test]
    fn test_compute_matches_derive() {
        let checked = DerivedQuantities::compute(100.0, 0.02, 0.1, 0.1).unwrap();
        let derived = DerivedQuantities::derive(&PressParameters::DEFAULT);
        assert_eq!(checked, derived);
    }

    #[test]
    fn test_compute_rejects_underflow_and_overflow() {
        assert!(matches!(
            DerivedQuantities::compute(100.0, 1e-200, 0.1, 0.1),
            Err(PressError::InvalidDomain {
                parameter: Parameter::InputRadius,
                ..
            })
        ));
        assert!(matches!(
            DerivedQuantities::compute(1e308, 0.001, 0.5, 0.1),
            Err(PressError::InvalidDomain {
                parameter: Parameter::InputForce,
                ..
            })
        ));
        assert!(DerivedQuantities::compute(100.0, 1e-200, 1e-200, 0.1).is_err());
    }

    #[test]
    fn test_kpa_conversion() {
        let q = DerivedQuantities::derive(&PressParameters::DEFAULT);
        assert_relative_eq!(q.pressure_kpa(), 79.577_471_545_947_67, max_relative = 1e-9);
    }
}
