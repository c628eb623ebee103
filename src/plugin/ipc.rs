use std::sync::Arc;

use crate::host::ports::MethodHandler;
use crate::plugin::controller::FlashbangEffect;

/// Remote method that starts the effect. Takes no parameters.
pub const TRIGGER_METHOD: &str = "flashbang-job/trigger";

/// Standard acknowledgment reply.
pub fn json_ok() -> serde_json::Value {
    serde_json::json!({ "result": "ok" })
}

/// Handler for [`TRIGGER_METHOD`]. Holds the effect weakly; a dropped effect still acknowledges.
pub fn trigger_handler(effect: &Arc<FlashbangEffect>) -> MethodHandler {
    let effect = Arc::downgrade(effect);
    Arc::new(move |_params: serde_json::Value| {
        if let Some(effect) = effect.upgrade() {
            let outcome = effect.trigger();
            tracing::debug!(method = TRIGGER_METHOD, ?outcome, "handled");
        }
        json_ok()
    })
}

pub(crate) fn register_trigger(effect: &Arc<FlashbangEffect>) {
    effect
        .ports()
        .methods
        .register_method(TRIGGER_METHOD, trigger_handler(effect));
}

#[cfg(test)]
#[path = "../../tests/unit/plugin/ipc.rs"]
mod tests;
