use std::fmt;
use std::io::Cursor;

use base64::Engine as _;

use crate::effects::filter::FilterTag;
use crate::foundation::core::{ShotCount, Size};
use crate::foundation::error::{BoothError, BoothResult};

/// An encoded still frame (PNG or JPEG bytes).
///
/// On the wire it is a `data:<mime>;base64,<payload>` URI.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

/// A decoded image as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Dimensions.
    pub size: Size,
    /// Row-major straight RGBA8.
    pub rgba: Vec<u8>,
}

impl EncodedImage {
    /// Wrap already-encoded bytes. The format is sniffed lazily.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Encode straight RGBA8 pixels as PNG.
    pub fn encode_png(rgba: &[u8], size: Size) -> BoothResult<Self> {
        let img = image::RgbaImage::from_raw(size.width, size.height, rgba.to_vec())
            .ok_or_else(|| {
                BoothError::decode(format!(
                    "rgba buffer of {} bytes does not fit {}x{}",
                    rgba.len(),
                    size.width,
                    size.height
                ))
            })?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| BoothError::decode(format!("encode png: {e}")))?;
        Ok(Self { bytes: buf })
    }

    /// Raw encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type guessed from the byte signature.
    pub fn mime(&self) -> &'static str {
        match image::guess_format(&self.bytes) {
            Ok(image::ImageFormat::Jpeg) => "image/jpeg",
            Ok(image::ImageFormat::WebP) => "image/webp",
            Ok(image::ImageFormat::Gif) => "image/gif",
            Ok(image::ImageFormat::Bmp) => "image/bmp",
            _ => "image/png",
        }
    }

    /// Decode into straight RGBA8.
    pub fn decode(&self) -> BoothResult<DecodedImage> {
        let dyn_img = image::load_from_memory(&self.bytes)
            .map_err(|e| BoothError::decode(format!("decode image from memory: {e}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedImage {
            size: Size::new(width, height)?,
            rgba: rgba.into_raw(),
        })
    }

    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Parse a base64 `data:` URI.
    pub fn from_data_uri(uri: &str) -> BoothResult<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| BoothError::decode("image source is not a data: URI"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| BoothError::decode("data: URI has no payload"))?;
        if !meta.ends_with(";base64") {
            return Err(BoothError::decode("data: URI payload must be base64"));
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| BoothError::decode(format!("invalid base64 payload: {e}")))?;
        Ok(Self { bytes })
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime", &self.mime())
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl serde::Serialize for EncodedImage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> serde::Deserialize<'de> for EncodedImage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_data_uri(&s).map_err(serde::de::Error::custom)
    }
}

/// One captured frame plus the filter it was taken with.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Shot {
    /// Encoded frame.
    pub src: EncodedImage,
    /// Filter tag chosen at capture time.
    pub filter: FilterTag,
}

/// Append-only list of shots bounded by the selected count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShotList {
    target: ShotCount,
    shots: Vec<Shot>,
}

impl ShotList {
    /// Empty list for `target` shots.
    pub fn new(target: ShotCount) -> Self {
        Self {
            target,
            shots: Vec::with_capacity(target.get()),
        }
    }

    /// Append a shot. Fails once the list holds `target` shots.
    pub fn push(&mut self, shot: Shot) -> BoothResult<()> {
        if self.is_complete() {
            return Err(BoothError::validation(format!(
                "shot list already holds {} of {} shots",
                self.shots.len(),
                self.target
            )));
        }
        self.shots.push(shot);
        Ok(())
    }

    /// Drop every shot.
    pub fn clear(&mut self) {
        self.shots.clear();
    }

    /// Selected count.
    pub fn target(&self) -> ShotCount {
        self.target
    }

    /// Number of shots taken so far.
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    /// `true` when nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// `true` when the list holds exactly `target` shots.
    pub fn is_complete(&self) -> bool {
        self.shots.len() >= self.target.get()
    }

    /// Borrow the shots in capture order.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }
}

/// Shots whose filters are baked into their pixels, ready for the strip.
///
/// The length always equals a valid [`ShotCount`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BakedShots {
    target: ShotCount,
    shots: Vec<Shot>,
}

impl BakedShots {
    /// Validate that `shots` holds exactly `target` entries.
    pub fn new(target: ShotCount, shots: Vec<Shot>) -> BoothResult<Self> {
        if shots.len() != target.get() {
            return Err(BoothError::validation(format!(
                "expected {} baked shots, got {}",
                target,
                shots.len()
            )));
        }
        Ok(Self { target, shots })
    }

    /// Count the strip was captured for.
    pub fn target(&self) -> ShotCount {
        self.target
    }

    /// Borrow the shots in capture order.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Filter tags in capture order.
    pub fn filters(&self) -> Vec<FilterTag> {
        self.shots.iter().map(|s| s.filter).collect()
    }
}

impl serde::Serialize for BakedShots {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.shots.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for BakedShots {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let shots = Vec::<Shot>::deserialize(deserializer)?;
        let target = u32::try_from(shots.len())
            .map_err(|_| serde::de::Error::custom("too many shots"))
            .and_then(|n| ShotCount::new(n).map_err(serde::de::Error::custom))?;
        Ok(Self { target, shots })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/shot.rs"]
mod tests;
