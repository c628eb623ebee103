//! flashbang is a timed full-screen overlay effect for compositors.
//!
//! One trigger plays a four-phase sequence on an output: an instant white flash, a fade-in to a
//! configured image, a hold, and a fade-out. Each output frame is composited with standard alpha
//! blending over whatever the host already drew.
//!
//! # Pipeline overview
//!
//! 1. **Decode** (once, at init): PNG → premultiplied RGBA8 [`PixelBuffer`]
//! 2. **Upload**: [`PixelBuffer`] → one clamp-to-edge, linearly filtered GPU texture
//! 3. **Sequence** (every frame): [`Session::poll`] advances [`Phase`] from elapsed clock time
//!    and drives an [`OpacityRamp`]
//! 4. **Composite**: [`FrameCompositor`] draws a solid flash or the textured image
//!
//! # Host integration
//!
//! The crate never talks to a compositor directly. Everything the effect needs from its host is
//! a trait in [`HostPorts`]: a [`GraphicsScope`] handing out a [`Gpu`], [`RenderHooks`] for
//! per-frame callbacks, an [`ActivationArbiter`], a [`SettingsStore`], a [`MethodRegistry`] for
//! the remote trigger, and a [`Clock`]. [`HeadlessHost`] implements all of them over the
//! software [`CpuGpu`], which is what the `flashbang` binary and the tests run on.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never fatal**: load, trigger, frame and shutdown failures are logged and absorbed.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod config;
mod effects;
mod foundation;
mod host;
mod plugin;
mod render;

pub use animation::ease::Ease;
pub use animation::ramp::OpacityRamp;
pub use animation::sequence::{Durations, FLASH_RAMP_MS, Phase, Session, Transition};
pub use assets::decode::{
    DecodeError, PixelBuffer, PixelFormat, SourceLayout, convert_packed_argb32, convert_rows,
    decode_png, decode_png_bytes,
};
pub use config::{
    DEFAULT_IMAGE_SUBPATH, EffectConfig, SETTING_FADE_DURATION, SETTING_FLASH_DURATION,
    SETTING_IMAGE_SHOW_DURATION, SettingIssue, resolve_image_path,
};
pub use effects::composite::{Fragment, blend_fill_in_place, blend_pixel};
pub use effects::compositor::{DrawOutcome, DrawRequest, FrameCompositor};
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::{Canvas, Fps, Millis, Rgba8, elapsed_ms};
pub use foundation::error::{FlashError, FlashResult};
pub use host::headless::{HeadlessHost, HookStats};
pub use host::ports::{
    ActivationArbiter, GraphicsScope, HostPorts, MethodHandler, MethodRegistry, PostHook,
    RenderHooks, SettingsStore,
};
pub use plugin::controller::{FlashbangEffect, PLUGIN_NAME, TriggerOutcome};
pub use plugin::ipc::{TRIGGER_METHOD, json_ok, trigger_handler};
pub use render::backend::{
    BlendFactor, BlendFunc, Filter, FrameRGBA, Gpu, QuadFill, TextureDesc, TextureFormat,
    TextureHandle, Wrap,
};
pub use render::cpu::{CpuGpu, CpuGpuStats};
pub use render::upload::{release_texture, texture_desc, upload_texture};
