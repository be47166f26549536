use crate::foundation::error::{BoothError, BoothResult};

pub use crate::foundation::color::Rgba8;

/// Number of photos in one strip. Only the counts the booth offers are representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShotCount {
    /// One photo.
    One,
    /// Three photos.
    Three,
    /// Four photos.
    Four,
}

/// One entry of the shot selector menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotOption {
    /// The count this option selects.
    pub count: ShotCount,
    /// Short title.
    pub label: &'static str,
    /// One-line description.
    pub description: &'static str,
}

impl ShotCount {
    /// All selectable counts, in menu order.
    pub const ALL: [ShotOption; 3] = [
        ShotOption {
            count: ShotCount::One,
            label: "Single Shot",
            description: "Perfect for a profile picture",
        },
        ShotOption {
            count: ShotCount::Three,
            label: "Triple Shot",
            description: "Explore different poses",
        },
        ShotOption {
            count: ShotCount::Four,
            label: "Multi Shot",
            description: "Full photo session experience",
        },
    ];

    /// Validate a raw count.
    pub fn new(n: u32) -> BoothResult<Self> {
        match n {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(BoothError::validation(format!(
                "shot count must be 1, 3 or 4 (got {other})"
            ))),
        }
    }

    /// Number of photos as an integer.
    pub fn get(self) -> usize {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl std::fmt::Display for ShotCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl std::str::FromStr for ShotCount {
    type Err = BoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<u32>()
            .map_err(|_| BoothError::validation(format!("invalid shot count \"{s}\"")))?;
        Self::new(n)
    }
}

// Stored as an integer-as-string, like the rest of the session keys.
impl serde::Serialize for ShotCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ShotCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Int(u32),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Int(n) => Self::new(n).map_err(serde::de::Error::custom),
        }
    }
}

/// Pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a validated, non-empty size.
    pub fn new(width: u32, height: u32) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::validation(format!(
                "size must be non-empty (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Height over width.
    pub fn aspect(self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
