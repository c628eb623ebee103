use crate::animation::ease::Ease;
use crate::animation::ramp::OpacityRamp;
use crate::foundation::core::{Millis, elapsed_ms};

/// Duration of the opacity ramp that brings the flash up to full white.
///
/// Fixed; the configurable fade duration only applies to the image fades.
pub const FLASH_RAMP_MS: Millis = 500;

/// Phases of the effect. `Idle` is both initial and terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Flash,
    FadeInImage,
    ShowImage,
    FadeOut,
}

impl Phase {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// Phases that sample the image texture.
    pub fn shows_image(self) -> bool {
        matches!(self, Self::FadeInImage | Self::ShowImage | Self::FadeOut)
    }
}

/// Live duration settings, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Durations {
    pub flash_ms: Millis,
    pub image_show_ms: Millis,
    pub fade_ms: Millis,
}

impl Durations {
    pub const DEFAULT_FLASH_MS: Millis = 500;
    pub const DEFAULT_IMAGE_SHOW_MS: Millis = 2000;
    pub const DEFAULT_FADE_MS: Millis = 500;

    /// Time from trigger to idle when every poll lands exactly on a phase boundary.
    pub fn total_ms(&self, has_image: bool) -> Millis {
        if has_image {
            self.flash_ms
                .saturating_add(self.fade_ms)
                .saturating_add(self.image_show_ms)
                .saturating_add(self.fade_ms)
        } else {
            self.flash_ms
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            flash_ms: Self::DEFAULT_FLASH_MS,
            image_show_ms: Self::DEFAULT_IMAGE_SHOW_MS,
            fade_ms: Self::DEFAULT_FADE_MS,
        }
    }
}

/// A phase change reported by [`Session::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub at_ms: Millis,
}

impl Transition {
    pub fn finished(&self) -> bool {
        self.to.is_idle()
    }
}

/// One run of the flash / fade-in / hold / fade-out sequence.
///
/// The session is polled, never event-driven: each [`Session::poll`] compares the clock against
/// the current phase's guard and performs at most one transition.
#[derive(Clone, Debug)]
pub struct Session {
    phase: Phase,
    phase_start_ms: Millis,
    ramp: OpacityRamp,
    flash_ramp_ms: Millis,
}

impl Session {
    pub fn new(ease: Ease) -> Self {
        Self::with_flash_ramp(ease, FLASH_RAMP_MS)
    }

    pub fn with_flash_ramp(ease: Ease, flash_ramp_ms: Millis) -> Self {
        Self {
            phase: Phase::Idle,
            phase_start_ms: 0,
            ramp: OpacityRamp::resting(0.0, ease),
            flash_ramp_ms,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_start_ms(&self) -> Millis {
        self.phase_start_ms
    }

    pub fn ramp(&self) -> &OpacityRamp {
        &self.ramp
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self, now: Millis) -> f64 {
        self.ramp.value(now)
    }

    /// (Re)start from `Flash`, whatever the current phase.
    pub fn start(&mut self, now: Millis) {
        self.enter(Phase::Flash, now);
        self.ramp.animate_to(1.0, now, self.flash_ramp_ms);
    }

    /// Drop back to `Idle` without finishing the sequence.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.ramp.snap(0.0);
    }

    /// Advance the state machine against `now`.
    ///
    /// Without an image the sequence ends right after the flash hold.
    pub fn poll(
        &mut self,
        now: Millis,
        durations: &Durations,
        has_image: bool,
    ) -> Option<Transition> {
        let from = self.phase;
        let elapsed = elapsed_ms(now, self.phase_start_ms);

        match self.phase {
            Phase::Idle => return None,
            Phase::Flash => {
                if elapsed < durations.flash_ms {
                    return None;
                }
                if has_image {
                    self.enter(Phase::FadeInImage, now);
                    self.ramp.snap(0.0);
                    self.ramp.animate_to(1.0, now, durations.fade_ms);
                } else {
                    self.phase = Phase::Idle;
                    self.ramp.snap(0.0);
                }
            }
            Phase::FadeInImage => {
                if self.ramp.is_running(now) {
                    return None;
                }
                self.enter(Phase::ShowImage, now);
            }
            Phase::ShowImage => {
                if elapsed < durations.image_show_ms {
                    return None;
                }
                self.enter(Phase::FadeOut, now);
                self.ramp.animate_to(0.0, now, durations.fade_ms);
            }
            Phase::FadeOut => {
                if self.ramp.is_running(now) {
                    return None;
                }
                self.phase = Phase::Idle;
            }
        }

        Some(Transition {
            from,
            to: self.phase,
            at_ms: now,
        })
    }

    fn enter(&mut self, phase: Phase, now: Millis) {
        self.phase = phase;
        self.phase_start_ms = now;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Ease::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;
