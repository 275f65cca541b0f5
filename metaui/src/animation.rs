//! Easing curves and value tweens
//!
//! Tweens are driven by the host: call [`Tween::update`] with the frame
//! delta and read [`Tween::value`] when building or restyling widgets.

use crate::core::context::Color;
use crate::core::geometry::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    Bounce,
    Elastic,
}

impl Easing {
    /// Map linear progress `t` onto the curve. Saturates outside `0..1`.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Bounce => bounce_out(t),
            Easing::Elastic => {
                let c4 = std::f32::consts::TAU / 3.0;
                2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
            }
        }
    }
}

fn bounce_out(mut t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        t -= 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        t -= 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        t -= 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Linear interpolation between two values of the same type
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f32) -> Self {
        Point::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

impl Lerp for Color {
    fn lerp(self, to: Self, t: f32) -> Self {
        Color::new(
            self.r.lerp(to.r, t),
            self.g.lerp(to.g, t),
            self.b.lerp(to.b, t),
            self.a.lerp(to.a, t),
        )
    }
}

/// Time-based interpolation from `from` to `to` over `duration` seconds
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    easing: Easing,
    elapsed: f32,
    running: bool,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::default(),
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Restart from the beginning
    pub fn start(&mut self) {
        self.running = true;
        self.elapsed = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Rewind without changing the running state
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance by `dt` seconds. Returns true on the update that completes
    /// the tween and false otherwise, including when it is not running.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.running = false;
            return true;
        }
        false
    }

    pub fn value(&self) -> T {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        };
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Bounce,
        Easing::Elastic,
    ];

    #[test]
    fn test_curves_saturate_at_ends() {
        for easing in ALL {
            assert_eq!(easing.apply(-0.5), 0.0, "{easing:?}");
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
            assert_eq!(easing.apply(2.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_midpoints() {
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
        assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
        assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!((Easing::Bounce.apply(0.5) - 0.765625).abs() < 1e-5);
    }

    #[test]
    fn test_tween_completes_once() {
        let mut tween = Tween::new(0.0f32, 10.0, 1.0).easing(Easing::Linear);
        assert!(!tween.update(0.5), "not started yet");
        assert_eq!(tween.value(), 0.0);

        tween.start();
        assert!(!tween.update(0.5));
        assert_eq!(tween.value(), 5.0);
        assert!(tween.update(0.75));
        assert_eq!(tween.value(), 10.0);
        assert!(!tween.is_running());
        assert!(!tween.update(0.1));
    }

    #[test]
    fn test_stop_and_reset() {
        let mut tween = Tween::new(0.0f32, 1.0, 2.0).easing(Easing::Linear);
        tween.start();
        tween.update(1.0);
        tween.stop();
        assert!(!tween.update(1.0));
        assert_eq!(tween.value(), 0.5);
        tween.reset();
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_color_and_point_lerp() {
        let c = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(c, Color::new(0.5, 0.5, 0.5, 1.0));
        let p = Point::new(0.0, 10.0).lerp(Point::new(10.0, 20.0), 0.25);
        assert_eq!(p, Point::new(2.5, 12.5));
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let tween = Tween::new(Point::ZERO, Point::new(4.0, 4.0), 0.0);
        assert_eq!(tween.value(), Point::new(4.0, 4.0));
    }
}
