use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};

/// Background swatches offered next to the free color picker.
pub const BACKGROUND_PRESETS: [Rgba8; 10] = [
    Rgba8::rgb(0xf5, 0xa9, 0xb8),
    Rgba8::rgb(0xa9, 0xde, 0xf5),
    Rgba8::rgb(0xd4, 0xf5, 0xa9),
    Rgba8::rgb(0xf5, 0xd6, 0xa9),
    Rgba8::rgb(0xe5, 0xa9, 0xf5),
    Rgba8::rgb(0xf5, 0xf5, 0xf5),
    Rgba8::rgb(0x00, 0x00, 0x00),
    Rgba8::rgb(0xff, 0xff, 0xff),
    Rgba8::rgb(0xff, 0x4d, 0x4d),
    Rgba8::rgb(0x4d, 0x79, 0xff),
];

/// Date stamp color swatches.
pub const DATE_COLOR_PRESETS: [Rgba8; 9] = [
    Rgba8::rgb(0x00, 0x00, 0x00),
    Rgba8::rgb(0xff, 0xff, 0xff),
    Rgba8::rgb(0xff, 0x00, 0x00),
    Rgba8::rgb(0x00, 0xff, 0x00),
    Rgba8::rgb(0x00, 0x00, 0xff),
    Rgba8::rgb(0xff, 0xff, 0x00),
    Rgba8::rgb(0xff, 0x00, 0xff),
    Rgba8::rgb(0x00, 0xff, 0xff),
    Rgba8::rgb(0x80, 0x80, 0x80),
];

const WIDTH_RANGE: RangeInclusive<u32> = 200..=500;
const GAP_RANGE: RangeInclusive<u32> = 4..=24;
const PADDING_RANGE: RangeInclusive<u32> = 8..=40;
const RADIUS_RANGE: RangeInclusive<u32> = 0..=24;
const BORDER_WIDTH_RANGE: RangeInclusive<u32> = 0..=8;
const SCALE_RANGE: RangeInclusive<f64> = 1.0..=4.0;

/// Presentation parameters of the photo strip, in CSS pixels.
///
/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripConfig {
    pub background: Rgba8,
    pub width: u32,
    pub gap: u32,
    pub padding: u32,
    pub border_radius: u32,
    pub border_width: u32,
    pub border_color: Rgba8,
    pub date: DateStamp,
    /// Show photos mirrored, like the live camera preview.
    pub mirror: bool,
    /// Export pixel density (device pixels per CSS pixel).
    pub scale: f64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0xf5, 0xa9, 0xb8),
            width: 320,
            gap: 12,
            padding: 24,
            border_radius: 12,
            border_width: 2,
            border_color: Rgba8::WHITE,
            date: DateStamp::default(),
            mirror: true,
            scale: 2.0,
        }
    }
}

impl StripConfig {
    /// Check every numeric field against its slider range.
    pub fn validate(&self) -> BoothResult<()> {
        check_range("width", self.width, &WIDTH_RANGE)?;
        check_range("gap", self.gap, &GAP_RANGE)?;
        check_range("padding", self.padding, &PADDING_RANGE)?;
        check_range("border_radius", self.border_radius, &RADIUS_RANGE)?;
        check_range("border_width", self.border_width, &BORDER_WIDTH_RANGE)?;
        if !self.scale.is_finite() || !SCALE_RANGE.contains(&self.scale) {
            return Err(BoothError::validation(format!(
                "scale must be within {}..={} (got {})",
                SCALE_RANGE.start(),
                SCALE_RANGE.end(),
                self.scale
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(bytes: &[u8]) -> BoothResult<Self> {
        let cfg: Self = serde_json::from_slice(bytes)
            .map_err(|e| BoothError::serde(format!("strip config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> BoothResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read strip config '{}'", path.display()))?;
        Self::from_json(&bytes)
    }
}

fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> BoothResult<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(BoothError::validation(format!(
        "{field} must be within {}..={} px (got {value})",
        range.start(),
        range.end()
    )))
}

/// Date line printed under the photos.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateStamp {
    pub visible: bool,
    pub format: DateFormat,
    pub color: Rgba8,
}

impl Default for DateStamp {
    fn default() -> Self {
        Self {
            visible: true,
            format: DateFormat::Short,
            color: Rgba8::BLACK,
        }
    }
}

/// How the date stamp renders the export time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `10/16/2026`
    #[default]
    Short,
    /// `Friday, October 16, 2026`
    Long,
    /// `10/16/2026, 1:05:09 PM`
    Time,
}

impl DateFormat {
    /// Format `at` the way the stamp prints it.
    pub fn format(self, at: chrono::NaiveDateTime) -> String {
        let pattern = match self {
            Self::Short => "%-m/%-d/%Y",
            Self::Long => "%A, %B %-d, %Y",
            Self::Time => "%-m/%-d/%Y, %-I:%M:%S %p",
        };
        at.format(pattern).to_string()
    }
}

/// Width of the on-screen strip while minimized.
pub const MINIMIZED_WIDTH: u32 = 160;
/// Visual scale applied while minimized.
pub const MINIMIZED_SCALE: f64 = 0.6;
/// Date stamp font size in the full view.
pub const DATE_FONT_PX: f64 = 11.0;
/// Date stamp font size while minimized.
pub const MINIMIZED_DATE_FONT_PX: f64 = 9.0;

/// The composer's live view: configuration plus the minimized toggle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StripView {
    pub config: StripConfig,
    pub minimized: bool,
}

impl StripView {
    pub fn new(config: StripConfig) -> Self {
        Self {
            config,
            minimized: false,
        }
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Strip width as currently presented.
    pub fn display_width(&self) -> u32 {
        if self.minimized {
            MINIMIZED_WIDTH
        } else {
            self.config.width
        }
    }

    /// Visual zoom as currently presented.
    pub fn display_scale(&self) -> f64 {
        if self.minimized { MINIMIZED_SCALE } else { 1.0 }
    }

    /// Date stamp font size as currently presented.
    pub fn date_font_px(&self) -> f64 {
        if self.minimized {
            MINIMIZED_DATE_FONT_PX
        } else {
            DATE_FONT_PX
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip/config.rs"]
mod tests;
