use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::foundation::clock::Clock;
use crate::render::backend::Gpu;

/// The host's graphics context.
pub trait GraphicsScope: Send + Sync {
    /// Whether the context provides the pipeline the effect draws with (GLES2-class).
    fn supports_effect(&self) -> bool;

    /// Make the context current and run `f` inside it.
    ///
    /// Returns `false` without calling `f` when no suitable context is available.
    fn run(&self, f: &mut dyn FnMut(&mut dyn Gpu)) -> bool;
}

/// Per-frame callback implemented by the effect.
///
/// Invoked once per output frame, after the host scene is drawn, while registered.
pub trait PostHook: Send + Sync {
    fn on_post_frame(&self);
}

/// Post-frame hook registration.
pub trait RenderHooks: Send + Sync {
    fn add_post_hook(&self, hook: Weak<dyn PostHook>);

    fn remove_post_hook(&self, hook: &Weak<dyn PostHook>);

    /// Keep producing frames even when nothing else damaged the output.
    fn set_redraw_always(&self, enabled: bool);
}

/// Exclusive rendering priority arbitration.
pub trait ActivationArbiter: Send + Sync {
    fn can_activate(&self, name: &str) -> bool;
}

/// Integer option storage, read live.
pub trait SettingsStore: Send + Sync {
    fn get_int(&self, key: &str) -> Option<i64>;
}

/// Handler for one remote method: parameters in, reply out.
pub type MethodHandler = Arc<dyn Fn(serde_json::Value) -> serde_json::Value + Send + Sync>;

/// Remote method dispatch table.
pub trait MethodRegistry: Send + Sync {
    fn register_method(&self, name: &str, handler: MethodHandler);

    fn unregister_method(&self, name: &str);
}

/// Every host capability the effect consumes.
#[derive(Clone)]
pub struct HostPorts {
    pub graphics: Arc<dyn GraphicsScope>,
    pub hooks: Arc<dyn RenderHooks>,
    pub arbiter: Arc<dyn ActivationArbiter>,
    pub settings: Arc<dyn SettingsStore>,
    pub methods: Arc<dyn MethodRegistry>,
    pub clock: Arc<dyn Clock>,
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
