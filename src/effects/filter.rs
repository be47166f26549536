use std::fmt;

use crate::effects::blur::blur_rgba8_premul;
use crate::foundation::color::{premultiply_in_place, unpremultiply_in_place};
use crate::foundation::core::Size;
use crate::foundation::error::{BoothError, BoothResult};

/// One primitive of a filter chain.
///
/// Amounts use CSS Filter Effects semantics: `1.0` is the full effect for grayscale, sepia and
/// invert, and the identity for brightness, contrast and saturate. `Blur` carries the Gaussian
/// standard deviation in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    /// Desaturate toward luma.
    Grayscale(f32),
    /// Warm brown tone.
    Sepia(f32),
    /// Invert channels.
    Invert(f32),
    /// Gaussian blur.
    Blur {
        /// Standard deviation in pixels.
        std_dev_px: f32,
    },
    /// Linear channel multiplier.
    Brightness(f32),
    /// Scale channel distance from mid-grey.
    Contrast(f32),
    /// Saturation matrix.
    Saturate(f32),
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Grayscale(a) => write!(f, "grayscale({a})"),
            Self::Sepia(a) => write!(f, "sepia({a})"),
            Self::Invert(a) => write!(f, "invert({a})"),
            Self::Blur { std_dev_px } => write!(f, "blur({std_dev_px}px)"),
            Self::Brightness(a) => write!(f, "brightness({a})"),
            Self::Contrast(a) => write!(f, "contrast({a})"),
            Self::Saturate(a) => write!(f, "saturate({a})"),
        }
    }
}

type Matrix3 = [[f32; 3]; 3];

impl FilterOp {
    fn color_matrix(self) -> Option<Matrix3> {
        match self {
            Self::Grayscale(a) => {
                let i = 1.0 - a.clamp(0.0, 1.0);
                Some([
                    [0.2126 + 0.7874 * i, 0.7152 - 0.7152 * i, 0.0722 - 0.0722 * i],
                    [0.2126 - 0.2126 * i, 0.7152 + 0.2848 * i, 0.0722 - 0.0722 * i],
                    [0.2126 - 0.2126 * i, 0.7152 - 0.7152 * i, 0.0722 + 0.9278 * i],
                ])
            }
            Self::Sepia(a) => {
                let i = 1.0 - a.clamp(0.0, 1.0);
                Some([
                    [0.393 + 0.607 * i, 0.769 - 0.769 * i, 0.189 - 0.189 * i],
                    [0.349 - 0.349 * i, 0.686 + 0.314 * i, 0.168 - 0.168 * i],
                    [0.272 - 0.272 * i, 0.534 - 0.534 * i, 0.131 + 0.869 * i],
                ])
            }
            Self::Saturate(s) => {
                let s = s.max(0.0);
                Some([
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ])
            }
            Self::Invert(_) | Self::Blur { .. } | Self::Brightness(_) | Self::Contrast(_) => None,
        }
    }

    /// Apply this op to one straight-alpha pixel. `Blur` is not a per-pixel op and is a no-op
    /// here.
    pub fn apply_pixel(self, px: [u8; 4]) -> [u8; 4] {
        let [r, g, b, a] = px;
        let rgb = [f32::from(r), f32::from(g), f32::from(b)];

        let out = if let Some(m) = self.color_matrix() {
            [
                m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
                m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
                m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
            ]
        } else {
            match self {
                Self::Invert(amount) => {
                    let amount = amount.clamp(0.0, 1.0);
                    rgb.map(|c| amount * (255.0 - c) + (1.0 - amount) * c)
                }
                Self::Brightness(k) => rgb.map(|c| c * k.max(0.0)),
                Self::Contrast(k) => rgb.map(|c| (c - 127.5) * k.max(0.0) + 127.5),
                _ => rgb,
            }
        };

        let [r, g, b] = out.map(|c| c.round().clamp(0.0, 255.0) as u8);
        [r, g, b, a]
    }

    /// Apply this op to a whole straight-alpha RGBA8 buffer in place.
    pub fn apply(self, rgba: &mut [u8], size: Size) -> BoothResult<()> {
        if rgba.len() != size.rgba_len() {
            return Err(BoothError::decode(format!(
                "filter buffer is {} bytes, expected {} for {}x{}",
                rgba.len(),
                size.rgba_len(),
                size.width,
                size.height
            )));
        }

        if let Self::Blur { std_dev_px } = self {
            premultiply_in_place(rgba);
            let blurred = blur_rgba8_premul(rgba, size, std_dev_px)?;
            rgba.copy_from_slice(&blurred);
            unpremultiply_in_place(rgba);
            return Ok(());
        }

        for px in rgba.chunks_exact_mut(4) {
            let out = self.apply_pixel([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        Ok(())
    }
}

/// The closed set of filters a shot can be tagged with.
///
/// Each variant owns exactly one op chain. The live preview string ([`FilterTag::css_filter`])
/// and the baked pixel transform ([`FilterTag::apply`]) are both derived from it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterTag {
    /// No filter.
    #[default]
    None,
    /// Full grayscale.
    Grayscale,
    /// Strong sepia.
    Sepia,
    /// Partial negative.
    Invert,
    /// Soft focus.
    Blur,
    /// Brighter, punchier.
    Brightness,
    /// Faded warm look.
    Vintage,
}

const NONE_OPS: &[FilterOp] = &[];
const GRAYSCALE_OPS: &[FilterOp] = &[FilterOp::Grayscale(1.0)];
const SEPIA_OPS: &[FilterOp] = &[FilterOp::Sepia(0.8)];
const INVERT_OPS: &[FilterOp] = &[FilterOp::Invert(0.8)];
const BLUR_OPS: &[FilterOp] = &[
    FilterOp::Blur { std_dev_px: 1.0 },
    FilterOp::Brightness(1.1),
];
const BRIGHTNESS_OPS: &[FilterOp] = &[FilterOp::Brightness(1.3), FilterOp::Contrast(1.1)];
const VINTAGE_OPS: &[FilterOp] = &[
    FilterOp::Sepia(0.3),
    FilterOp::Contrast(1.1),
    FilterOp::Brightness(0.9),
    FilterOp::Saturate(1.5),
];

impl FilterTag {
    /// Every tag, in picker order.
    pub const ALL: [FilterTag; 7] = [
        FilterTag::None,
        FilterTag::Grayscale,
        FilterTag::Sepia,
        FilterTag::Invert,
        FilterTag::Blur,
        FilterTag::Brightness,
        FilterTag::Vintage,
    ];

    /// The op chain this tag stands for.
    pub fn ops(self) -> &'static [FilterOp] {
        match self {
            Self::None => NONE_OPS,
            Self::Grayscale => GRAYSCALE_OPS,
            Self::Sepia => SEPIA_OPS,
            Self::Invert => INVERT_OPS,
            Self::Blur => BLUR_OPS,
            Self::Brightness => BRIGHTNESS_OPS,
            Self::Vintage => VINTAGE_OPS,
        }
    }

    /// Stable lowercase identifier, as stored in the session.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Invert => "invert",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Vintage => "vintage",
        }
    }

    /// Human-facing label for the picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Grayscale => "Grayscale",
            Self::Sepia => "Sepia",
            Self::Invert => "Negative",
            Self::Blur => "Soft Focus",
            Self::Brightness => "Bright",
            Self::Vintage => "Vintage",
        }
    }

    /// CSS `filter` value used for the non-destructive live preview.
    pub fn css_filter(self) -> String {
        let ops = self.ops();
        if ops.is_empty() {
            return "none".to_owned();
        }
        ops.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Bake the op chain into a straight-alpha RGBA8 buffer.
    pub fn apply(self, rgba: &mut [u8], size: Size) -> BoothResult<()> {
        for op in self.ops() {
            op.apply(rgba, size)?;
        }
        Ok(())
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FilterTag {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                BoothError::validation(format!(
                    "unknown filter \"{s}\" (expected one of: {})",
                    Self::ALL.map(FilterTag::name).join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
