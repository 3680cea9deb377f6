use super::ease::Ease;
use glam::Vec3;

pub trait Interpolatable: Clone + Copy {
    fn zero() -> Self;
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn scale(self, factor: f32) -> Self;

    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.add(other.sub(self).scale(t))
    }
}

impl Interpolatable for f32 {
    fn zero() -> Self { 0.0 }
    fn add(self, other: Self) -> Self { self + other }
    fn sub(self, other: Self) -> Self { self - other }
    fn scale(self, factor: f32) -> Self { self * factor }
}

impl Interpolatable for Vec3 {
    fn zero() -> Self { Vec3::ZERO }
    fn add(self, other: Self) -> Self { self + other }
    fn sub(self, other: Self) -> Self { self - other }
    fn scale(self, factor: f32) -> Self { self * factor }
}

/// An eased move from one value to another over a fixed time span.
///
/// With `repeat = n` the tween plays `n + 1` cycles. With `yoyo` every odd
/// cycle plays backwards, so a yoyo tween with an odd repeat count ends
/// where it started.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Interpolatable> {
    from: T,
    to: T,
    delay: f32,
    duration: f32,
    ease: Ease,
    repeat: u32,
    yoyo: bool,
}

impl<T: Interpolatable> Tween<T> {
    pub fn new(from: T, to: T, duration: f32) -> Self {
        Self {
            from,
            to,
            delay: 0.0,
            duration: duration.max(0.0),
            ease: Ease::Linear,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Tween from `from` by a relative amount.
    pub fn by(from: T, delta: T, duration: f32) -> Self {
        Self::new(from, from.add(delta), duration)
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }

    /// Time at which the last cycle finishes, delay included.
    pub fn end_time(&self) -> f32 {
        self.delay + self.duration * (self.repeat + 1) as f32
    }

    /// Value reached once the tween has fully played.
    pub fn final_value(&self) -> T {
        if self.yoyo && self.repeat % 2 == 1 {
            self.from
        } else {
            self.to
        }
    }

    pub fn sample(&self, elapsed: f32) -> T {
        let local = elapsed - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        if local >= self.end_time() - self.delay || self.duration <= 0.0 {
            return self.final_value();
        }

        let cycle = (local / self.duration).floor();
        let mut progress = (local - cycle * self.duration) / self.duration;
        if self.yoyo && cycle as u32 % 2 == 1 {
            progress = 1.0 - progress;
        }

        self.from.lerp_to(self.to, self.ease.apply(progress))
    }
}
