use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::animation::sequence::{Durations, FLASH_RAMP_MS};
use crate::foundation::core::Millis;
use crate::foundation::error::{FlashError, FlashResult};
use crate::host::ports::SettingsStore;

/// Flash hold, in milliseconds.
pub const SETTING_FLASH_DURATION: &str = "flashbang-job/flashbang_duration";
/// Image hold after fade-in, in milliseconds.
pub const SETTING_IMAGE_SHOW_DURATION: &str = "flashbang-job/image_show_duration";
/// Image fade-in and fade-out duration, in milliseconds.
pub const SETTING_FADE_DURATION: &str = "flashbang-job/fade_duration";

/// Image location relative to the home directory.
pub const DEFAULT_IMAGE_SUBPATH: &str = ".flashbang-job/job.png";

/// Resolve the image path under `home`. No home gives an empty path, which fails to load.
pub fn resolve_image_path(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) if !home.as_os_str().is_empty() => home.join(DEFAULT_IMAGE_SUBPATH),
        _ => PathBuf::new(),
    }
}

fn default_image_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    resolve_image_path(home.as_deref())
}

fn default_flash_ramp_ms() -> Millis {
    FLASH_RAMP_MS
}

/// Construction-time effect configuration.
///
/// Durations are not here: they are host settings read live on every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectConfig {
    /// PNG shown after the flash.
    #[serde(default = "default_image_path")]
    pub image_path: PathBuf,
    /// Easing of every opacity ramp.
    #[serde(default)]
    pub ease: Ease,
    /// How long the flash takes to reach full white.
    #[serde(default = "default_flash_ramp_ms")]
    pub flash_ramp_ms: Millis,
}

impl EffectConfig {
    pub fn from_home(home: Option<&Path>) -> Self {
        Self::with_image(resolve_image_path(home))
    }

    /// Resolve the image path from `$HOME`.
    pub fn from_env() -> Self {
        Self::with_image(default_image_path())
    }

    pub fn with_image(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            ease: Ease::default(),
            flash_ramp_ms: FLASH_RAMP_MS,
        }
    }

    pub fn from_json_str(s: &str) -> FlashResult<Self> {
        serde_json::from_str(s).map_err(|e| FlashError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> FlashResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read effect config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

/// Why a duration setting was not used verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingIssue {
    pub key: &'static str,
    pub raw: i64,
    pub used: Millis,
}

fn read_ms(
    store: &dyn SettingsStore,
    key: &'static str,
    default: Millis,
) -> (Millis, Option<SettingIssue>) {
    let Some(raw) = store.get_int(key) else {
        return (default, None);
    };
    match Millis::try_from(raw) {
        Ok(ms) => (ms, None),
        Err(_) => {
            let used = if raw < 0 { 0 } else { Millis::MAX };
            (used, Some(SettingIssue { key, raw, used }))
        }
    }
}

impl Durations {
    /// Read the three duration settings, falling back to defaults for missing keys and clamping
    /// out-of-range values.
    pub fn from_settings(store: &dyn SettingsStore) -> Self {
        Self::read_checked(store).0
    }

    /// Like [`Durations::from_settings`], also reporting clamped values.
    pub fn read_checked(store: &dyn SettingsStore) -> (Self, Vec<SettingIssue>) {
        let (flash_ms, a) = read_ms(store, SETTING_FLASH_DURATION, Self::DEFAULT_FLASH_MS);
        let (image_show_ms, b) =
            read_ms(store, SETTING_IMAGE_SHOW_DURATION, Self::DEFAULT_IMAGE_SHOW_MS);
        let (fade_ms, c) = read_ms(store, SETTING_FADE_DURATION, Self::DEFAULT_FADE_MS);
        let issues = [a, b, c].into_iter().flatten().collect();
        (
            Self {
                flash_ms,
                image_show_ms,
                fade_ms,
            },
            issues,
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
