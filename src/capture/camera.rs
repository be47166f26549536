use std::path::{Path, PathBuf};

use crate::foundation::core::Size;
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::shot::EncodedImage;

/// A live feed the booth can grab still frames from.
///
/// The booth screen owns its source exclusively for its lifetime.
pub trait FrameSource {
    /// Acquire the device. Failing here is terminal for the capture session.
    fn open(&mut self) -> BoothResult<()>;

    /// Grab the current frame. `Ok(None)` means the feed had no frame ready.
    fn grab_frame(&mut self) -> BoothResult<Option<EncodedImage>>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn open(&mut self) -> BoothResult<()> {
        (**self).open()
    }

    fn grab_frame(&mut self) -> BoothResult<Option<EncodedImage>> {
        (**self).grab_frame()
    }
}

/// Plays back the still images of a directory, in file name order, looping.
#[derive(Debug)]
pub struct DirectorySource {
    dir: PathBuf,
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectorySource {
    /// Source over `dir`; nothing is read until [`FrameSource::open`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
            next: 0,
        }
    }
}

fn is_still_image(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg"
    )
}

impl FrameSource for DirectorySource {
    fn open(&mut self) -> BoothResult<()> {
        let rd = std::fs::read_dir(&self.dir).map_err(|e| {
            BoothError::camera(format!("cannot open '{}': {e}", self.dir.display()))
        })?;

        let mut files: Vec<PathBuf> = rd
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && is_still_image(p))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(BoothError::camera(format!(
                "no png/jpeg frames in '{}'",
                self.dir.display()
            )));
        }
        tracing::debug!(dir = %self.dir.display(), frames = files.len(), "opened frame directory");
        self.files = files;
        self.next = 0;
        Ok(())
    }

    fn grab_frame(&mut self) -> BoothResult<Option<EncodedImage>> {
        if self.files.is_empty() {
            return Err(BoothError::camera("frame directory is not open"));
        }
        let path = &self.files[self.next % self.files.len()];
        self.next = self.next.wrapping_add(1);
        let bytes = std::fs::read(path).map_err(|e| {
            BoothError::camera(format!("failed to read frame '{}': {e}", path.display()))
        })?;
        Ok(Some(EncodedImage::from_bytes(bytes)))
    }
}

/// Deterministic test-card feed: a diagonal gradient with a moving band per frame.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    size: Size,
    frame: u32,
}

impl SyntheticSource {
    /// Feed producing frames of `size`.
    pub fn new(size: Size) -> Self {
        Self { size, frame: 0 }
    }

    /// Straight RGBA8 pixels of frame number `frame`. Empty for an empty size.
    pub fn render(size: Size, frame: u32) -> Vec<u8> {
        let (w, h) = (size.width, size.height);
        if w == 0 || h == 0 {
            return Vec::new();
        }
        let band_w = (w / 8).max(1);
        let band_x = (frame.wrapping_mul(band_w)) % w;

        let mut rgba = Vec::with_capacity(size.rgba_len());
        for y in 0..h {
            for x in 0..w {
                let r = (x * 255 / w.max(1)) as u8;
                let g = (y * 255 / h.max(1)) as u8;
                let b = (((x + y) * 255) / (w + h)) as u8;
                if x >= band_x && x < band_x + band_w {
                    rgba.extend_from_slice(&[255 - r, 255 - g, 255 - b, 255]);
                } else {
                    rgba.extend_from_slice(&[r, g, b, 255]);
                }
            }
        }
        rgba
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            size: Size {
                width: 640,
                height: 480,
            },
            frame: 0,
        }
    }
}

impl SyntheticSource {
    fn frame_size(&self) -> BoothResult<Size> {
        Size::new(self.size.width, self.size.height)
            .map_err(|e| BoothError::camera(format!("synthetic feed: {e}")))
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self) -> BoothResult<()> {
        self.frame_size().map(drop)
    }

    fn grab_frame(&mut self) -> BoothResult<Option<EncodedImage>> {
        let size = self.frame_size()?;
        let rgba = Self::render(size, self.frame);
        self.frame = self.frame.wrapping_add(1);
        EncodedImage::encode_png(&rgba, size).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/camera.rs"]
mod tests;
