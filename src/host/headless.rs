use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::animation::sequence::Durations;
use crate::config::{SETTING_FADE_DURATION, SETTING_FLASH_DURATION, SETTING_IMAGE_SHOW_DURATION};
use crate::foundation::clock::ManualClock;
use crate::foundation::core::{Canvas, Rgba8};
use crate::host::ports::{
    ActivationArbiter, GraphicsScope, HostPorts, MethodHandler, MethodRegistry, PostHook,
    RenderHooks, SettingsStore, lock,
};
use crate::render::backend::{FrameRGBA, Gpu};
use crate::render::cpu::{CpuGpu, CpuGpuStats};

/// Registration bookkeeping, for exactly-once assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HookStats {
    pub added: u64,
    pub removed: u64,
    pub redraw_enabled: u64,
    pub redraw_disabled: u64,
}

/// In-process host implementing every port over a [`CpuGpu`] and a [`ManualClock`].
///
/// Each [`HeadlessHost::render_frame`] paints the background, runs the registered post hooks and
/// reads the frame back. Nothing happens between frames unless the caller advances the clock.
pub struct HeadlessHost {
    gpu: Mutex<CpuGpu>,
    gles2: bool,
    background: Rgba8,
    clock: ManualClock,
    hooks: Mutex<Vec<Weak<dyn PostHook>>>,
    hook_stats: Mutex<HookStats>,
    redraw_always: AtomicBool,
    settings: Mutex<HashMap<String, i64>>,
    methods: Mutex<HashMap<String, MethodHandler>>,
    activation_blocked: AtomicBool,
}

impl HeadlessHost {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            gpu: Mutex::new(CpuGpu::new(canvas)),
            gles2: true,
            background: Rgba8::BLACK,
            clock: ManualClock::new(0),
            hooks: Mutex::new(Vec::new()),
            hook_stats: Mutex::new(HookStats::default()),
            redraw_always: AtomicBool::new(false),
            settings: Mutex::new(HashMap::new()),
            methods: Mutex::new(HashMap::new()),
            activation_blocked: AtomicBool::new(false),
        }
    }

    /// Pretend the graphics context lacks GLES2 support.
    pub fn without_gles2(mut self) -> Self {
        self.gles2 = false;
        self
    }

    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Bundle this host's capabilities for the effect.
    pub fn ports(self: &Arc<Self>) -> HostPorts {
        HostPorts {
            graphics: self.clone(),
            hooks: self.clone(),
            arbiter: self.clone(),
            settings: self.clone(),
            methods: self.clone(),
            clock: Arc::new(self.clock.clone()),
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn set_setting(&self, key: &str, value: i64) {
        lock(&self.settings).insert(key.to_owned(), value);
    }

    pub fn remove_setting(&self, key: &str) {
        lock(&self.settings).remove(key);
    }

    pub fn set_durations(&self, d: &Durations) {
        self.set_setting(SETTING_FLASH_DURATION, i64::from(d.flash_ms));
        self.set_setting(SETTING_IMAGE_SHOW_DURATION, i64::from(d.image_show_ms));
        self.set_setting(SETTING_FADE_DURATION, i64::from(d.fade_ms));
    }

    /// Simulate another plugin holding exclusive activation.
    pub fn block_activation(&self, blocked: bool) {
        self.activation_blocked.store(blocked, Ordering::SeqCst);
    }

    /// Dispatch a remote call. `None` if no such method is registered.
    pub fn call_method(&self, name: &str, params: serde_json::Value) -> Option<serde_json::Value> {
        let handler = lock(&self.methods).get(name).cloned()?;
        Some(handler(params))
    }

    pub fn has_method(&self, name: &str) -> bool {
        lock(&self.methods).contains_key(name)
    }

    /// Produce one output frame at the current clock time.
    pub fn render_frame(&self) -> FrameRGBA {
        lock(&self.gpu).clear(self.background.to_array());

        // Hooks may unregister themselves, so run them from a snapshot.
        let hooks: Vec<Arc<dyn PostHook>> = {
            let mut hooks = lock(&self.hooks);
            hooks.retain(|h| h.strong_count() > 0);
            hooks.iter().filter_map(Weak::upgrade).collect()
        };
        for hook in hooks {
            hook.on_post_frame();
        }

        lock(&self.gpu).frame().clone()
    }

    /// Live post hooks.
    pub fn hook_count(&self) -> usize {
        lock(&self.hooks).len()
    }

    pub fn hook_stats(&self) -> HookStats {
        *lock(&self.hook_stats)
    }

    pub fn redraw_always(&self) -> bool {
        self.redraw_always.load(Ordering::SeqCst)
    }

    pub fn live_textures(&self) -> usize {
        lock(&self.gpu).live_textures()
    }

    pub fn gpu_stats(&self) -> CpuGpuStats {
        lock(&self.gpu).stats()
    }
}

impl GraphicsScope for HeadlessHost {
    fn supports_effect(&self) -> bool {
        self.gles2
    }

    fn run(&self, f: &mut dyn FnMut(&mut dyn Gpu)) -> bool {
        if !self.gles2 {
            return false;
        }
        let mut gpu = lock(&self.gpu);
        f(&mut *gpu);
        true
    }
}

impl RenderHooks for HeadlessHost {
    fn add_post_hook(&self, hook: Weak<dyn PostHook>) {
        lock(&self.hooks).push(hook);
        lock(&self.hook_stats).added += 1;
    }

    fn remove_post_hook(&self, hook: &Weak<dyn PostHook>) {
        let mut hooks = lock(&self.hooks);
        let before = hooks.len();
        hooks.retain(|h| !Weak::ptr_eq(h, hook));
        if hooks.len() != before {
            lock(&self.hook_stats).removed += 1;
        }
    }

    fn set_redraw_always(&self, enabled: bool) {
        self.redraw_always.store(enabled, Ordering::SeqCst);
        let mut stats = lock(&self.hook_stats);
        if enabled {
            stats.redraw_enabled += 1;
        } else {
            stats.redraw_disabled += 1;
        }
    }
}

impl ActivationArbiter for HeadlessHost {
    fn can_activate(&self, _name: &str) -> bool {
        !self.activation_blocked.load(Ordering::SeqCst)
    }
}

impl SettingsStore for HeadlessHost {
    fn get_int(&self, key: &str) -> Option<i64> {
        lock(&self.settings).get(key).copied()
    }
}

impl MethodRegistry for HeadlessHost {
    fn register_method(&self, name: &str, handler: MethodHandler) {
        lock(&self.methods).insert(name.to_owned(), handler);
    }

    fn unregister_method(&self, name: &str) {
        lock(&self.methods).remove(name);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
