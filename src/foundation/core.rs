use crate::foundation::error::{FlashError, FlashResult};

/// Monotonic timestamp or duration in milliseconds.
///
/// Timestamps wrap at `u32::MAX`; elapsed time is always computed with `wrapping_sub`.
pub type Millis = u32;

/// Milliseconds elapsed between `start` and `now` on a wrapping `u32` clock.
pub fn elapsed_ms(now: Millis, start: Millis) -> Millis {
    now.wrapping_sub(start)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> FlashResult<Self> {
        if den == 0 {
            return Err(FlashError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FlashError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timestamp of frame `frame` relative to the first frame, floored to whole milliseconds.
    pub fn frame_to_ms(self, frame: u64) -> Millis {
        let ms = (frame as f64) * 1000.0 * f64::from(self.den) / f64::from(self.num);
        ms.floor().clamp(0.0, f64::from(Millis::MAX)) as Millis
    }

    /// Number of frames needed to cover `ms` milliseconds, inclusive of the frame at `ms`.
    pub fn frames_covering_ms(self, ms: Millis) -> u64 {
        (f64::from(ms) * self.as_f64() / 1000.0).ceil().max(0.0) as u64 + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> FlashResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlashError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> FlashResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || FlashError::validation(format!("invalid hex color '{s}'"));
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Self::opaque(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(bad()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
