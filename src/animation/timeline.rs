use super::tween::Tween;
use glam::Vec3;

/// Moving parts of the press that the timeline drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    InputPiston,
    OutputPiston,
    Load,
    Fluid,
}

impl Element {
    pub const ALL: [Element; 4] = [
        Element::InputPiston,
        Element::OutputPiston,
        Element::Load,
        Element::Fluid,
    ];
}

/// Displacement of every animated element from its rest position.
///
/// Vertical offsets are in scene units (1 unit = 1 m). The camera offset is
/// added on top of wherever the orbit controller has put the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementOffsets {
    pub input_piston: f32,
    pub output_piston: f32,
    pub load: f32,
    pub fluid: f32,
    pub camera: Vec3,
}

impl ElementOffsets {
    pub const BASELINE: Self = Self {
        input_piston: 0.0,
        output_piston: 0.0,
        load: 0.0,
        fluid: 0.0,
        camera: Vec3::ZERO,
    };

    pub fn get(&self, element: Element) -> f32 {
        match element {
            Element::InputPiston => self.input_piston,
            Element::OutputPiston => self.output_piston,
            Element::Load => self.load,
            Element::Fluid => self.fluid,
        }
    }

    pub fn set(&mut self, element: Element, value: f32) {
        match element {
            Element::InputPiston => self.input_piston = value,
            Element::OutputPiston => self.output_piston = value,
            Element::Load => self.load = value,
            Element::Fluid => self.fluid = value,
        }
    }

    pub fn is_baseline(&self) -> bool {
        *self == Self::BASELINE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStatus {
    Running,
    /// Reported by exactly one `advance` call.
    Completed,
    /// Already completed or killed; nothing left to do.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Finished,
    Killed,
}

/// A set of tweens that start together and finish when the longest ends.
#[derive(Debug, Clone)]
pub struct Timeline {
    tracks: Vec<(Element, Tween<f32>)>,
    camera: Option<Tween<Vec3>>,
    elapsed: f32,
    phase: Phase,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            camera: None,
            elapsed: 0.0,
            phase: Phase::Running,
        }
    }

    pub fn track(mut self, element: Element, tween: Tween<f32>) -> Self {
        self.tracks.push((element, tween));
        self
    }

    pub fn camera(mut self, tween: Tween<Vec3>) -> Self {
        self.camera = Some(tween);
        self
    }

    pub fn duration(&self) -> f32 {
        let tracks = self.tracks.iter().map(|(_, t)| t.end_time());
        let camera = self.camera.iter().map(|t| t.end_time());
        tracks.chain(camera).fold(0.0, f32::max)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn progress(&self) -> f32 {
        let duration = self.duration();
        if duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / duration).min(1.0)
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len() + usize::from(self.camera.is_some())
    }

    /// Stops the timeline where it is. It will never report completion.
    pub fn kill(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Killed;
        }
    }

    pub fn advance(&mut self, dt: f32) -> TimelineStatus {
        if self.phase != Phase::Running {
            return TimelineStatus::Inactive;
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration() {
            self.elapsed = self.duration();
            self.phase = Phase::Finished;
            TimelineStatus::Completed
        } else {
            TimelineStatus::Running
        }
    }

    /// Writes the current value of every track into `offsets`.
    pub fn apply(&self, offsets: &mut ElementOffsets) {
        for (element, tween) in &self.tracks {
            offsets.set(*element, tween.sample(self.elapsed));
        }
        if let Some(camera) = &self.camera {
            offsets.camera = camera.sample(self.elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Ease;

    fn two_track_timeline() -> Timeline {
        Timeline::new()
            .track(Element::InputPiston, Tween::by(0.0, -0.1, 1.2).with_ease(Ease::Power3InOut))
            .track(Element::OutputPiston, Tween::by(0.0, 0.004, 1.2))
            .camera(
                Tween::new(Vec3::ZERO, Vec3::new(0.1, -0.1, 0.0), 0.1)
                    .with_yoyo(true)
                    .with_repeat(1),
            )
    }

    #[test]
    fn test_duration_is_longest_track() {
        let timeline = two_track_timeline();
        assert!((timeline.duration() - 1.2).abs() < 1e-6);
        assert_eq!(timeline.track_count(), 3);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut timeline = two_track_timeline();
        let mut completions = 0;
        for _ in 0..200 {
            if timeline.advance(1.0 / 60.0) == TimelineStatus::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert!(!timeline.is_active());
        assert!((timeline.progress() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_apply_writes_final_values() {
        let mut timeline = two_track_timeline();
        timeline.advance(5.0);

        let mut offsets = ElementOffsets::default();
        timeline.apply(&mut offsets);
        assert!((offsets.input_piston + 0.1).abs() < 1e-6);
        assert!((offsets.output_piston - 0.004).abs() < 1e-6);
        assert_eq!(offsets.camera, Vec3::ZERO);
        assert_eq!(offsets.load, 0.0);
    }

    #[test]
    fn test_killed_timeline_never_completes() {
        let mut timeline = two_track_timeline();
        timeline.advance(0.5);
        timeline.kill();
        assert_eq!(timeline.advance(5.0), TimelineStatus::Inactive);
        assert!((timeline.elapsed() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_offsets_accessors() {
        let mut offsets = ElementOffsets::BASELINE;
        for (i, element) in Element::ALL.into_iter().enumerate() {
            offsets.set(element, i as f32);
        }
        assert_eq!(offsets.get(Element::Fluid), 3.0);
        assert!(!offsets.is_baseline());
    }
}
