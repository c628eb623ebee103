use crate::animation::ease::Ease;
use crate::foundation::core::{Millis, elapsed_ms};

/// Time-bounded scalar interpolation driving fade opacity.
///
/// A ramp moves from `from` to `to` over `duration_ms` starting at `start_ms`. Reading it never
/// mutates it; progress is derived from the caller's clock reading. Values are clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityRamp {
    from: f64,
    to: f64,
    start_ms: Millis,
    duration_ms: Millis,
    ease: Ease,
}

impl OpacityRamp {
    /// A finished ramp resting at `value`.
    pub fn resting(value: f64, ease: Ease) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self {
            from: value,
            to: value,
            start_ms: 0,
            duration_ms: 0,
            ease,
        }
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Target value of the current (or last) animation.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// True until the target has been reached. Reaching `duration_ms` exactly counts as finished.
    pub fn is_running(&self, now: Millis) -> bool {
        elapsed_ms(now, self.start_ms) < self.duration_ms
    }

    /// Interpolated value at `now`.
    pub fn value(&self, now: Millis) -> f64 {
        let elapsed = elapsed_ms(now, self.start_ms);
        if elapsed >= self.duration_ms {
            return self.to;
        }
        let t = f64::from(elapsed) / f64::from(self.duration_ms);
        let v = self.from + (self.to - self.from) * self.ease.apply(t);
        v.clamp(0.0, 1.0)
    }

    /// Animate from the value at `now` towards `target` over `duration_ms`.
    pub fn animate_to(&mut self, target: f64, now: Millis, duration_ms: Millis) {
        self.from = self.value(now);
        self.to = target.clamp(0.0, 1.0);
        self.start_ms = now;
        self.duration_ms = duration_ms;
    }

    /// Jump to `value` with no animation in flight.
    pub fn snap(&mut self, value: f64) {
        let value = value.clamp(0.0, 1.0);
        self.from = value;
        self.to = value;
        self.duration_ms = 0;
    }
}

impl Default for OpacityRamp {
    fn default() -> Self {
        Self::resting(0.0, Ease::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ramp.rs"]
mod tests;
