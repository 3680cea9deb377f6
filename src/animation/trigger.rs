use super::ease::Ease;
use super::timeline::{Element, ElementOffsets, Timeline, TimelineStatus};
use super::tween::Tween;
use crate::physics::{DerivedQuantities, PressParameters};
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Pressing,
}

/// Outcome of a request that may be absorbed by the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Request {
    Accepted,
    Ignored,
}

impl Request {
    pub fn accepted(self) -> bool {
        self == Request::Accepted
    }
}

/// Timing and shape of one press stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds for the pistons, load and fluid to reach their targets.
    pub stroke_duration: f32,
    pub stroke_ease: Ease,
    /// Fraction of the stroke depth the input fluid column drops by.
    pub fluid_drop_ratio: f32,
    /// Peak camera displacement of the shake.
    pub shake_offset: [f32; 3],
    /// Seconds for one leg of the shake; it plays out and back.
    pub shake_duration: f32,
    pub shake_ease: Ease,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            stroke_duration: 1.2,
            stroke_ease: Ease::Power3InOut,
            fluid_drop_ratio: 0.5,
            shake_offset: [0.1, -0.1, 0.0],
            shake_duration: 0.1,
            shake_ease: Ease::Power1InOut,
        }
    }
}

/// What a press run computed when it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressSnapshot {
    pub parameters: PressParameters,
    pub derived: DerivedQuantities,
}

/// Observer for a running press.
pub trait PressListener {
    /// Called after every frame's offsets have been written.
    fn on_frame(&mut self, _offsets: &ElementOffsets) {}

    /// Called once per accepted press, after the final offsets are written.
    fn on_complete(&mut self, snapshot: &PressSnapshot);
}

/// Event produced by [`AnimationTrigger::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerEvent {
    Idle,
    Frame,
    Completed(PressSnapshot),
}

/// Gates the press animation: at most one run at a time, one completion per
/// accepted request.
pub struct AnimationTrigger {
    config: AnimationConfig,
    state: AnimationState,
    offsets: ElementOffsets,
    timeline: Option<Timeline>,
    snapshot: Option<PressSnapshot>,
    listener: Option<Box<dyn PressListener>>,
    presses_started: u64,
}

impl Default for AnimationTrigger {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl AnimationTrigger {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            state: AnimationState::Idle,
            offsets: ElementOffsets::BASELINE,
            timeline: None,
            snapshot: None,
            listener: None,
            presses_started: 0,
        }
    }

    pub fn with_listener<L: PressListener + 'static>(mut self, listener: L) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener<L: PressListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_pressing(&self) -> bool {
        self.state == AnimationState::Pressing
    }

    pub fn offsets(&self) -> &ElementOffsets {
        &self.offsets
    }

    /// Parameters and results frozen for the run in progress.
    pub fn snapshot(&self) -> Option<&PressSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn progress(&self) -> Option<f32> {
        self.timeline
            .as_ref()
            .filter(|t| t.is_active())
            .map(Timeline::progress)
    }

    pub fn presses_started(&self) -> u64 {
        self.presses_started
    }

    pub fn request_press(&mut self, params: &PressParameters) -> Request {
        if self.state == AnimationState::Pressing {
            log::debug!("press requested while pressing, ignored");
            return Request::Ignored;
        }

        if let Some(mut previous) = self.timeline.take() {
            if previous.is_active() {
                log::warn!("stopping stale press timeline before starting a new one");
                previous.kill();
            }
        }

        let derived = DerivedQuantities::derive(params);
        let timeline = self.build_timeline(params, &derived);
        log::info!(
            "press started: F1 = {:.1} N, F2 = {:.1} N, d2 = {:.4} m over {:.2} s",
            params.input_force(),
            derived.output_force,
            derived.output_displacement,
            timeline.duration()
        );

        self.snapshot = Some(PressSnapshot {
            parameters: *params,
            derived,
        });
        self.timeline = Some(timeline);
        self.state = AnimationState::Pressing;
        self.presses_started += 1;
        Request::Accepted
    }

    fn build_timeline(&self, params: &PressParameters, derived: &DerivedQuantities) -> Timeline {
        let cfg = &self.config;
        let stroke = params.stroke_depth() as f32;
        let rise = derived.output_displacement as f32;
        let current = self.offsets;

        let stroke_tween =
            |element: Element, delta: f32| Tween::by(current.get(element), delta, cfg.stroke_duration).with_ease(cfg.stroke_ease);

        Timeline::new()
            .camera(
                Tween::by(current.camera, Vec3::from(cfg.shake_offset), cfg.shake_duration)
                    .with_ease(cfg.shake_ease)
                    .with_yoyo(true)
                    .with_repeat(1),
            )
            .track(Element::InputPiston, stroke_tween(Element::InputPiston, -stroke))
            .track(Element::OutputPiston, stroke_tween(Element::OutputPiston, rise))
            .track(Element::Load, stroke_tween(Element::Load, rise))
            .track(Element::Fluid, stroke_tween(Element::Fluid, -stroke * cfg.fluid_drop_ratio))
    }

    /// Steps the running timeline by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> TriggerEvent {
        let Some(timeline) = self.timeline.as_mut() else {
            return TriggerEvent::Idle;
        };

        let status = timeline.advance(dt);
        if status == TimelineStatus::Inactive {
            return TriggerEvent::Idle;
        }

        timeline.apply(&mut self.offsets);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_frame(&self.offsets);
        }

        if status == TimelineStatus::Running {
            return TriggerEvent::Frame;
        }

        self.timeline = None;
        self.state = AnimationState::Idle;
        let Some(snapshot) = self.snapshot.take() else {
            return TriggerEvent::Idle;
        };
        log::info!("press complete");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_complete(&snapshot);
        }
        TriggerEvent::Completed(snapshot)
    }

    /// Returns every element to its rest position. Refused while pressing.
    pub fn reset_offsets(&mut self) -> Request {
        if self.state == AnimationState::Pressing {
            log::debug!("reset requested while pressing, ignored");
            return Request::Ignored;
        }
        self.timeline = None;
        self.offsets = ElementOffsets::BASELINE;
        Request::Accepted
    }
}

impl std::fmt::Debug for AnimationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationTrigger")
            .field("state", &self.state)
            .field("offsets", &self.offsets)
            .field("has_listener", &self.listener.is_some())
            .field("presses_started", &self.presses_started)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        completions: usize,
        last_input_offset: f32,
    }

    struct SharedRecorder(Rc<RefCell<Recorder>>);

    impl PressListener for SharedRecorder {
        fn on_frame(&mut self, offsets: &ElementOffsets) {
            let mut rec = self.0.borrow_mut();
            rec.frames += 1;
            rec.last_input_offset = offsets.input_piston;
        }

        fn on_complete(&mut self, _snapshot: &PressSnapshot) {
            self.0.borrow_mut().completions += 1;
        }
    }

    fn run_to_end(trigger: &mut AnimationTrigger) -> usize {
        let mut completions = 0;
        for _ in 0..240 {
            if let TriggerEvent::Completed(_) = trigger.advance(1.0 / 60.0) {
                completions += 1;
            }
        }
        completions
    }

    #[test]
    fn test_press_cycle() {
        let mut trigger = AnimationTrigger::default();
        assert_eq!(trigger.state(), AnimationState::Idle);

        assert!(trigger.request_press(&PressParameters::DEFAULT).accepted());
        assert!(trigger.is_pressing());
        assert_eq!(run_to_end(&mut trigger), 1);
        assert_eq!(trigger.state(), AnimationState::Idle);

        let offsets = trigger.offsets();
        assert!((offsets.input_piston + 0.1).abs() < 1e-6);
        assert!((offsets.output_piston - 0.004).abs() < 1e-6);
        assert!((offsets.load - 0.004).abs() < 1e-6);
        assert!((offsets.fluid + 0.05).abs() < 1e-6);
        assert_eq!(offsets.camera, Vec3::ZERO);
    }

    #[test]
    fn test_double_request_single_completion() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut trigger =
            AnimationTrigger::default().with_listener(SharedRecorder(recorder.clone()));

        assert_eq!(trigger.request_press(&PressParameters::DEFAULT), Request::Accepted);
        assert_eq!(trigger.request_press(&PressParameters::DEFAULT), Request::Ignored);
        assert_eq!(trigger.presses_started(), 1);

        assert_eq!(run_to_end(&mut trigger), 1);
        let rec = recorder.borrow();
        assert_eq!(rec.completions, 1);
        // one stroke's worth, not two overlapping ones
        assert!((rec.last_input_offset + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_parameters_frozen_at_request() {
        let mut trigger = AnimationTrigger::default();
        let _ = trigger.request_press(&PressParameters::DEFAULT);
        trigger.advance(0.3);

        // Later parameter changes never reach the running timeline.
        let other = PressParameters::DEFAULT
            .with(crate::physics::Parameter::StrokeDepth, 0.4)
            .unwrap();
        assert_eq!(trigger.request_press(&other), Request::Ignored);

        let completed = (0..120).find_map(|_| match trigger.advance(1.0 / 60.0) {
            TriggerEvent::Completed(snapshot) => Some(snapshot),
            _ => None,
        });
        let snapshot = completed.unwrap();
        assert!((snapshot.parameters.stroke_depth() - 0.1).abs() < f64::EPSILON);
        assert!((trigger.offsets().input_piston + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_offsets_accumulate_across_presses() {
        let mut trigger = AnimationTrigger::default();
        for _ in 0..2 {
            let _ = trigger.request_press(&PressParameters::DEFAULT);
            run_to_end(&mut trigger);
        }
        assert!((trigger.offsets().input_piston + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_reset_offsets_only_when_idle() {
        let mut trigger = AnimationTrigger::default();
        let _ = trigger.request_press(&PressParameters::DEFAULT);
        trigger.advance(0.6);
        assert_eq!(trigger.reset_offsets(), Request::Ignored);
        assert!(!trigger.offsets().is_baseline());

        run_to_end(&mut trigger);
        assert_eq!(trigger.reset_offsets(), Request::Accepted);
        assert!(trigger.offsets().is_baseline());
    }

    #[test]
    fn test_advance_when_idle_is_noop() {
        let mut trigger = AnimationTrigger::default();
        assert_eq!(trigger.advance(0.016), TriggerEvent::Idle);
        assert!(trigger.progress().is_none());
        assert!(trigger.offsets().is_baseline());
    }
}
