use std::time::Duration;

/// Easing curves used by the navigation animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out; slow at both ends. Used for opacity fades.
    CubicInOut,
    /// Quartic ease-out; fast start, long deceleration. Used for rotation.
    QuartOut,
}

impl Easing {
    /// Map normalized time `t` in \[0, 1\] to progress in \[0, 1\].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Interpolates one scalar from `from` to `to` over a fixed duration.
///
/// Driven by explicit `advance(dt)` calls from the frame tick; there is no
/// internal clock.
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Step forward and return the value at the new time.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
