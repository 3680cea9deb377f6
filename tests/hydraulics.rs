use approx::assert_relative_eq;
use pascal_press::{DerivedQuantities, Parameter, PressError, PressParameters};

fn sample_parameters() -> Vec<PressParameters> {
    [
        (100.0, 0.02, 0.1, 0.1),
        (1.0, 0.005, 0.5, 0.01),
        (5000.0, 0.05, 0.02, 0.5),
        (250.0, 0.013, 0.13, 0.07),
        (3333.0, 0.031, 0.47, 0.33),
    ]
    .into_iter()
    .map(|(f, r1, r2, d)| PressParameters::new(f, r1, r2, d).unwrap())
    .collect()
}

#[test]
fn reference_press() {
    let params = PressParameters::new(100.0, 0.02, 0.1, 0.1).unwrap();
    let derived = DerivedQuantities::derive(&params);

    assert_relative_eq!(derived.input_area, 0.001_256_637_061_4, max_relative = 1e-9);
    assert_relative_eq!(derived.output_area, 0.031_415_926_535_9, max_relative = 1e-9);
    assert_relative_eq!(derived.pressure, 79_577.471_545_9, max_relative = 1e-9);
    assert_relative_eq!(derived.output_force, 2500.0, max_relative = 1e-9);
    assert_relative_eq!(derived.output_displacement, 0.004, max_relative = 1e-9);
    assert_relative_eq!(derived.mechanical_advantage(), 25.0, max_relative = 1e-9);
}

#[test]
fn pressure_is_force_over_input_area() {
    for params in sample_parameters() {
        let derived = DerivedQuantities::derive(&params);
        let area = std::f64::consts::PI * params.input_radius().powi(2);
        assert_relative_eq!(derived.pressure, params.input_force() / area, max_relative = 1e-9);
    }
}

#[test]
fn fluid_volume_is_conserved() {
    for params in sample_parameters() {
        let derived = DerivedQuantities::derive(&params);
        assert_relative_eq!(
            derived.displaced_volume(params.stroke_depth()),
            derived.received_volume(),
            max_relative = 1e-9
        );
    }
}

#[test]
fn force_gain_matches_area_ratio() {
    for params in sample_parameters() {
        let derived = DerivedQuantities::derive(&params);
        assert_relative_eq!(
            derived.output_force / params.input_force(),
            derived.output_area / derived.input_area,
            max_relative = 1e-9
        );
    }
}

#[test]
fn derivation_is_idempotent() {
    for params in sample_parameters() {
        assert_eq!(DerivedQuantities::derive(&params), DerivedQuantities::derive(&params));
    }
}

#[test]
fn degenerate_inputs_are_rejected() {
    let cases = [
        (Parameter::InputRadius, DerivedQuantities::compute(100.0, 0.0, 0.1, 0.1)),
        (Parameter::InputForce, DerivedQuantities::compute(-5.0, 0.02, 0.1, 0.1)),
        (Parameter::OutputRadius, DerivedQuantities::compute(100.0, 0.02, f64::NAN, 0.1)),
        (Parameter::StrokeDepth, DerivedQuantities::compute(100.0, 0.02, 0.1, f64::INFINITY)),
    ];

    for (expected, result) in cases {
        match result {
            Err(PressError::InvalidDomain { parameter, .. }) => assert_eq!(parameter, expected),
            other => panic!("expected InvalidDomain for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn extreme_inputs_never_yield_non_finite_quantities() {
    let cases = [
        ((100.0, 1e-200, 0.1, 0.1), Parameter::InputRadius),
        ((1e308, 0.001, 0.5, 0.1), Parameter::InputForce),
        ((100.0, 1e-200, 1e-200, 0.1), Parameter::InputRadius),
    ];

    for ((f, r1, r2, d), expected) in cases {
        match DerivedQuantities::compute(f, r1, r2, d) {
            Err(PressError::InvalidDomain { parameter, .. }) => assert_eq!(parameter, expected),
            other => panic!("expected InvalidDomain for {expected}, got {other:?}"),
        }
        assert!(PressParameters::new(f, r1, r2, d).is_err());
    }
}
