use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::animation::sequence::{Durations, Phase, Session};
use crate::assets::decode::decode_png;
use crate::config::EffectConfig;
use crate::effects::compositor::{DrawOutcome, DrawRequest, FrameCompositor};
use crate::foundation::error::FlashError;
use crate::host::ports::{HostPorts, PostHook, lock};
use crate::plugin::ipc;
use crate::render::backend::TextureHandle;
use crate::render::upload::{release_texture, upload_texture};

/// Name used for activation arbitration and in log lines.
pub const PLUGIN_NAME: &str = "flashbang-job";

/// Result of a [`FlashbangEffect::trigger`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A session started from idle.
    Started,
    /// A session was already running and restarted from the flash.
    Restarted,
    /// The activation arbiter refused.
    Denied,
    /// The effect is disabled (missing capability or shut down).
    Disabled,
}

struct EffectState {
    session: Session,
    hook_set: bool,
    texture: Option<TextureHandle>,
}

/// The flash / image effect bound to one output.
///
/// Lifecycle is `init` → any number of `trigger`s, each followed by post-frame callbacks until
/// the sequence ends → `shutdown`. All mutable state sits behind one mutex so triggers arriving
/// from another thread never interleave with a frame's poll.
pub struct FlashbangEffect {
    ports: HostPorts,
    config: EffectConfig,
    enabled: AtomicBool,
    state: Mutex<EffectState>,
    compositor: FrameCompositor,
    self_ref: Weak<FlashbangEffect>,
}

impl FlashbangEffect {
    /// Check capabilities, load the image and expose the trigger method.
    ///
    /// Never fails: a missing capability leaves the effect disabled, a missing image leaves it
    /// flash-only.
    pub fn init(ports: HostPorts, config: EffectConfig) -> Arc<Self> {
        let session = Session::with_flash_ramp(config.ease, config.flash_ramp_ms);
        let effect = Arc::new_cyclic(|self_ref| Self {
            ports,
            config,
            enabled: AtomicBool::new(false),
            state: Mutex::new(EffectState {
                session,
                hook_set: false,
                texture: None,
            }),
            compositor: FrameCompositor,
            self_ref: self_ref.clone(),
        });

        if !effect.ports.graphics.supports_effect() {
            let err = FlashError::configuration_unavailable("requires GLES2 support");
            tracing::error!(plugin = PLUGIN_NAME, error = %err, "effect disabled");
            return effect;
        }

        effect.load_image();
        effect.enabled.store(true, Ordering::SeqCst);
        ipc::register_trigger(&effect);
        effect
    }

    fn load_image(&self) {
        let path = &self.config.image_path;
        let buffer = match decode_png(path) {
            Ok(buffer) => buffer,
            Err(e) => {
                let err = FlashError::from(e);
                tracing::error!(
                    plugin = PLUGIN_NAME,
                    path = %path.display(),
                    error = %err,
                    "failed to load image, running flash-only"
                );
                return;
            }
        };
        let (width, height) = (buffer.width, buffer.height);

        let mut pending = Some(buffer);
        let mut uploaded = None;
        let ran = self.ports.graphics.run(&mut |gpu| {
            if let Some(buffer) = pending.take() {
                uploaded = Some(upload_texture(gpu, buffer));
            }
        });

        match uploaded {
            Some(Ok(handle)) => {
                lock(&self.state).texture = Some(handle);
                tracing::info!(
                    plugin = PLUGIN_NAME,
                    path = %path.display(),
                    width,
                    height,
                    "loaded image"
                );
            }
            Some(Err(err)) => {
                tracing::error!(plugin = PLUGIN_NAME, error = %err, "texture upload failed");
            }
            None => {
                debug_assert!(!ran);
                tracing::error!(plugin = PLUGIN_NAME, "no graphics context for texture upload");
            }
        }
    }

    /// Start (or restart) the sequence from the flash.
    pub fn trigger(&self) -> TriggerOutcome {
        if !self.is_enabled() {
            tracing::debug!(plugin = PLUGIN_NAME, "trigger ignored, effect disabled");
            return TriggerOutcome::Disabled;
        }
        if !self.ports.arbiter.can_activate(PLUGIN_NAME) {
            let err = FlashError::activation_denied(PLUGIN_NAME);
            tracing::debug!(error = %err, "trigger ignored");
            return TriggerOutcome::Denied;
        }

        // Frames re-read the settings live and clamp quietly; warn once per session here.
        let (_, issues) = Durations::read_checked(self.ports.settings.as_ref());
        for issue in issues {
            tracing::warn!(
                key = issue.key,
                raw = issue.raw,
                used = issue.used,
                "duration setting out of range, clamped"
            );
        }

        let now = self.ports.clock.now_ms();
        let mut st = lock(&self.state);
        // Shutdown clears `enabled` before taking the state lock, so this sees any shutdown that
        // raced the checks above.
        if !self.is_enabled() {
            tracing::debug!(plugin = PLUGIN_NAME, "trigger ignored, shut down meanwhile");
            return TriggerOutcome::Disabled;
        }
        let restarted = !st.session.phase().is_idle();
        st.session = Session::with_flash_ramp(self.config.ease, self.config.flash_ramp_ms);
        st.session.start(now);

        if !st.hook_set {
            st.hook_set = true;
            self.ports.hooks.add_post_hook(self.hook_ref());
            self.ports.hooks.set_redraw_always(true);
            tracing::debug!(plugin = PLUGIN_NAME, "post hook registered");
        }

        tracing::info!(
            plugin = PLUGIN_NAME,
            at_ms = now,
            restarted,
            flash_only = st.texture.is_none(),
            "session started"
        );
        if restarted {
            TriggerOutcome::Restarted
        } else {
            TriggerOutcome::Started
        }
    }

    /// Deregister the frame callback and release the texture. Safe from any phase, idempotent.
    pub fn shutdown(&self) {
        self.enabled.store(false, Ordering::SeqCst);

        let mut st = lock(&self.state);
        self.finalize(&mut st);
        st.session.reset();

        if st.texture.is_some() {
            let slot = &mut st.texture;
            let ran = self.ports.graphics.run(&mut |gpu| release_texture(gpu, slot));
            if !ran {
                tracing::warn!(plugin = PLUGIN_NAME, "no graphics context, texture not released");
            }
        }
        drop(st);

        self.ports.methods.unregister_method(ipc::TRIGGER_METHOD);
        tracing::debug!(plugin = PLUGIN_NAME, "shut down");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> Phase {
        lock(&self.state).session.phase()
    }

    /// Opacity at the current clock time.
    pub fn opacity(&self) -> f64 {
        let now = self.ports.clock.now_ms();
        lock(&self.state).session.opacity(now)
    }

    pub fn has_texture(&self) -> bool {
        lock(&self.state).texture.is_some()
    }

    /// Whether the post hook is currently registered.
    pub fn is_hooked(&self) -> bool {
        lock(&self.state).hook_set
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub(crate) fn ports(&self) -> &HostPorts {
        &self.ports
    }

    fn hook_ref(&self) -> Weak<dyn PostHook> {
        self.self_ref.clone()
    }

    fn finalize(&self, st: &mut EffectState) {
        if st.hook_set {
            self.ports.hooks.remove_post_hook(&self.hook_ref());
            self.ports.hooks.set_redraw_always(false);
            st.hook_set = false;
            tracing::debug!(plugin = PLUGIN_NAME, "post hook removed");
        }
    }
}

impl PostHook for FlashbangEffect {
    fn on_post_frame(&self) {
        let mut st = lock(&self.state);
        if st.session.phase().is_idle() {
            return;
        }

        let now = self.ports.clock.now_ms();
        let durations = Durations::from_settings(self.ports.settings.as_ref());
        let has_image = st.texture.is_some();
        if let Some(t) = st.session.poll(now, &durations, has_image) {
            tracing::debug!(from = ?t.from, to = ?t.to, at_ms = t.at_ms, "phase transition");
            if t.finished() {
                self.finalize(&mut st);
                return;
            }
        }

        let request = DrawRequest {
            phase: st.session.phase(),
            opacity: st.session.opacity(now) as f32,
            texture: st.texture,
        };
        let compositor = self.compositor;
        let mut outcome = None;
        self.ports
            .graphics
            .run(&mut |gpu| outcome = Some(compositor.draw(gpu, &request)));

        match outcome {
            Some(Ok(DrawOutcome::SkippedNoTexture)) => {
                tracing::trace!(phase = ?request.phase, "image phase without texture, skipped");
            }
            Some(Ok(_)) => {}
            Some(Err(err)) => tracing::warn!(error = %err, "frame draw failed"),
            None => tracing::warn!("no graphics context for frame draw"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/controller.rs"]
mod tests;
