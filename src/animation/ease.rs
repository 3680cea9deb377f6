use serde::{Deserialize, Serialize};

/// Easing curves used by the press timeline.
///
/// `PowerN` curves are polynomial of degree N + 1, so `Power1` is quadratic
/// and `Power3` is quartic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    Power1InOut,
    Power2InOut,
    #[default]
    Power3InOut,
}

impl Ease {
    fn degree(self) -> i32 {
        match self {
            Ease::Linear => 1,
            Ease::Power1InOut => 2,
            Ease::Power2InOut => 3,
            Ease::Power3InOut => 4,
        }
    }

    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self == Ease::Linear {
            return t;
        }

        let n = self.degree();
        if t < 0.5 {
            0.5 * (2.0 * t).powi(n)
        } else {
            1.0 - 0.5 * (2.0 - 2.0 * t).powi(n)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 4] = [
        Ease::Linear,
        Ease::Power1InOut,
        Ease::Power2InOut,
        Ease::Power3InOut,
    ];

    #[test]
    fn test_endpoints_and_midpoint() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
            assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_clamps_out_of_range_progress() {
        assert_eq!(Ease::Power3InOut.apply(-1.0), 0.0);
        assert!((Ease::Power3InOut.apply(2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_power3_is_quartic() {
        // 8t⁴ on the first half
        let t = 0.25_f32;
        assert!((Ease::Power3InOut.apply(t) - 8.0 * t.powi(4)).abs() < 1e-6);
        // 2t² for power1
        assert!((Ease::Power1InOut.apply(t) - 2.0 * t * t).abs() < 1e-6);
    }

    #[test]
    fn test_monotonic() {
        for ease in ALL {
            let mut previous = 0.0;
            for i in 1..=100 {
                let value = ease.apply(i as f32 / 100.0);
                assert!(value >= previous);
                previous = value;
            }
        }
    }
}
