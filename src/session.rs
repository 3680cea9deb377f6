//! Session context
//!
//! [`PressSession`] is the one object the presentation layer talks to. It
//! owns the current parameters and the animation trigger, validates every
//! inbound change, and hands out derived quantities and offsets for display.

use crate::animation::{
    AnimationState, AnimationTrigger, ElementOffsets, PressListener, Request, TriggerEvent,
};
use crate::config::PressConfig;
use crate::controls::FieldSpec;
use crate::error::PressResult;
use crate::physics::{DerivedQuantities, Parameter, ParameterBounds, PressParameters};

#[derive(Debug)]
pub struct PressSession {
    params: PressParameters,
    defaults: PressParameters,
    bounds: ParameterBounds,
    derived: DerivedQuantities,
    trigger: AnimationTrigger,
}

impl Default for PressSession {
    fn default() -> Self {
        Self::from_parts(
            PressParameters::DEFAULT,
            ParameterBounds::default(),
            AnimationTrigger::default(),
        )
    }
}

impl PressSession {
    pub fn new(config: &PressConfig) -> PressResult<Self> {
        let defaults = config.default_parameters()?;
        Ok(Self::from_parts(
            defaults,
            config.bounds,
            AnimationTrigger::new(config.animation),
        ))
    }

    fn from_parts(defaults: PressParameters, bounds: ParameterBounds, trigger: AnimationTrigger) -> Self {
        Self {
            params: defaults,
            defaults,
            bounds,
            derived: DerivedQuantities::derive(&defaults),
            trigger,
        }
    }

    pub fn with_listener<L: PressListener + 'static>(mut self, listener: L) -> Self {
        self.trigger.set_listener(listener);
        self
    }

    pub fn parameters(&self) -> &PressParameters {
        &self.params
    }

    pub fn bounds(&self) -> &ParameterBounds {
        &self.bounds
    }

    pub fn field_spec(&self, parameter: Parameter) -> FieldSpec {
        FieldSpec::for_parameter(parameter, &self.bounds)
    }

    /// Quantities for the current parameters, not the frozen ones of a
    /// running press.
    pub fn derived(&self) -> &DerivedQuantities {
        &self.derived
    }

    pub fn state(&self) -> AnimationState {
        self.trigger.state()
    }

    pub fn is_pressing(&self) -> bool {
        self.trigger.is_pressing()
    }

    pub fn offsets(&self) -> &ElementOffsets {
        self.trigger.offsets()
    }

    pub fn trigger(&self) -> &AnimationTrigger {
        &self.trigger
    }

    /// Replaces one input. On error the previous value is kept.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> PressResult<()> {
        let checked = self
            .bounds
            .check(parameter, value)
            .and_then(|v| self.params.with(parameter, v));

        match checked {
            Ok(next) => {
                if next != self.params {
                    log::debug!("{parameter} set to {value}");
                    self.params = next;
                    self.derived = DerivedQuantities::derive(&self.params);
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("rejected {parameter} = {value}: {err}");
                Err(err)
            }
        }
    }

    /// Commits text typed into a field, in that field's display unit.
    pub fn commit_edit(&mut self, parameter: Parameter, input: &str) -> PressResult<()> {
        let value = self.field_spec(parameter).parse(input).map_err(|err| {
            log::warn!("{err}");
            err
        })?;
        self.set_parameter(parameter, value)
    }

    pub fn request_press(&mut self) -> Request {
        self.trigger.request_press(&self.params)
    }

    /// Drives the animation from the frame loop.
    pub fn advance(&mut self, dt: f32) -> TriggerEvent {
        self.trigger.advance(dt)
    }

    /// Restores default parameters and rest offsets. Refused while pressing.
    pub fn reset(&mut self) -> Request {
        let request = self.trigger.reset_offsets();
        if request.accepted() {
            log::debug!("session reset to defaults");
            self.params = self.defaults;
            self.derived = DerivedQuantities::derive(&self.params);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PressError;

    #[test]
    fn test_set_parameter_updates_derived() {
        let mut session = PressSession::default();
        session.set_parameter(Parameter::InputForce, 200.0).unwrap();
        assert!((session.derived().output_force - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejected_parameter_keeps_previous() {
        let mut session = PressSession::default();
        let before = *session.parameters();

        assert!(matches!(
            session.set_parameter(Parameter::InputRadius, 0.0),
            Err(PressError::InvalidDomain { .. })
        ));
        assert!(matches!(
            session.set_parameter(Parameter::InputRadius, 0.9),
            Err(PressError::OutOfRange { .. })
        ));
        assert_eq!(*session.parameters(), before);
    }

    #[test]
    fn test_commit_edit_in_display_units() {
        let mut session = PressSession::default();
        session.commit_edit(Parameter::StrokeDepth, "250").unwrap();
        assert!((session.parameters().stroke_depth() - 0.25).abs() < 1e-12);

        assert!(matches!(
            session.commit_edit(Parameter::StrokeDepth, "9000"),
            Err(PressError::InvalidUserEdit { .. })
        ));
        assert!((session.parameters().stroke_depth() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_reset_restores_defaults_and_offsets() {
        let mut session = PressSession::default();
        session.set_parameter(Parameter::OutputRadius, 0.3).unwrap();
        assert!(session.request_press().accepted());

        assert_eq!(session.reset(), Request::Ignored);
        while session.is_pressing() {
            session.advance(0.1);
        }
        assert!(!session.offsets().is_baseline());

        assert_eq!(session.reset(), Request::Accepted);
        assert_eq!(*session.parameters(), PressParameters::DEFAULT);
        assert!(session.offsets().is_baseline());
        assert_eq!(session.state(), AnimationState::Idle);
    }

    #[test]
    fn test_new_from_config() {
        let mut config = PressConfig::default();
        config.defaults.input_force = 40.0;
        let session = PressSession::new(&config).unwrap();
        assert!((session.parameters().input_force() - 40.0).abs() < f64::EPSILON);

        config.defaults.input_force = -1.0;
        assert!(PressSession::new(&config).is_err());
    }
}
