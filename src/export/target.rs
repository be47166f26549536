use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::foundation::error::{BoothError, BoothResult};
use crate::session::shot::EncodedImage;

/// Environment variable holding the share command, e.g. `xdg-open` or `my-share --to phone`.
pub const SHARE_CMD_ENV: &str = "STRIPBOOTH_SHARE_CMD";

/// Offers an encoded image to the user as a file.
pub trait DownloadTarget {
    /// Store `image` under `file_name`; returns the name it was actually stored as.
    fn offer(&mut self, file_name: &str, image: &EncodedImage) -> BoothResult<String>;
}

/// A platform share sheet.
pub trait ShareSheet {
    /// Whether sharing is possible at all; exporters fall back to a download otherwise.
    fn is_available(&self) -> bool;

    /// Hand `png` to the platform under `title` and `file_name`.
    fn share(&mut self, title: &str, file_name: &str, png: &EncodedImage) -> BoothResult<()>;
}

/// First free name in the sequence `name`, `stem (1).ext`, `stem (2).ext`, ...
pub fn dedupe_file_name(file_name: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(file_name) {
        return file_name.to_string();
    }
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (file_name, String::new()),
    };
    (1u32..)
        .map(|n| format!("{stem} ({n}){ext}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| file_name.to_string())
}

/// Downloads written into a directory, never overwriting an earlier file.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadTarget for DirectoryDownloads {
    #[tracing::instrument(skip(self, image), fields(dir = %self.dir.display()))]
    fn offer(&mut self, file_name: &str, image: &EncodedImage) -> BoothResult<String> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(BoothError::export(format!(
                "invalid download file name \"{file_name}\""
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir '{}'", self.dir.display()))?;

        let name = dedupe_file_name(file_name, |n| self.dir.join(n).exists());
        let path = self.dir.join(&name);
        std::fs::write(&path, image.as_bytes())
            .with_context(|| format!("write download '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = image.as_bytes().len(), "download saved");
        Ok(name)
    }
}

/// One recorded download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub image: EncodedImage,
}

/// In-memory download target.
#[derive(Debug, Default)]
pub struct MemoryDownloads {
    pub downloads: Vec<Download>,
    /// Fail every offer, to exercise error paths.
    pub fail: bool,
}

impl MemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DownloadTarget for MemoryDownloads {
    fn offer(&mut self, file_name: &str, image: &EncodedImage) -> BoothResult<String> {
        if self.fail {
            return Err(BoothError::export("download refused"));
        }
        let name = dedupe_file_name(file_name, |n| {
            self.downloads.iter().any(|d| d.file_name == n)
        });
        self.downloads.push(Download {
            file_name: name.clone(),
            image: image.clone(),
        });
        Ok(name)
    }
}

/// No share capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShareSheet;

impl ShareSheet for NoShareSheet {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _file_name: &str, _png: &EncodedImage) -> BoothResult<()> {
        Err(BoothError::export("sharing is not available on this platform"))
    }
}

/// Shares by writing the file to a staging directory and running an external command on it.
///
/// The command receives the file path as its last argument and the title in
/// `STRIPBOOTH_SHARE_TITLE`.
#[derive(Debug, Clone)]
pub struct CommandShareSheet {
    program: String,
    args: Vec<String>,
    staging_dir: PathBuf,
}

impl CommandShareSheet {
    pub fn new(program: impl Into<String>, args: Vec<String>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            staging_dir: staging_dir.into(),
        }
    }

    /// Command from `$STRIPBOOTH_SHARE_CMD` (whitespace separated), if set and non-empty.
    pub fn from_env(staging_dir: impl Into<PathBuf>) -> Option<Self> {
        let raw = std::env::var(SHARE_CMD_ENV).ok()?;
        let mut parts = raw.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect(), staging_dir))
    }
}

impl ShareSheet for CommandShareSheet {
    fn is_available(&self) -> bool {
        true
    }

    #[tracing::instrument(skip(self, png), fields(program = %self.program))]
    fn share(&mut self, title: &str, file_name: &str, png: &EncodedImage) -> BoothResult<()> {
        std::fs::create_dir_all(&self.staging_dir).with_context(|| {
            format!("create share staging dir '{}'", self.staging_dir.display())
        })?;
        let path = self.staging_dir.join(file_name);
        std::fs::write(&path, png.as_bytes())
            .with_context(|| format!("write share file '{}'", path.display()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .env("STRIPBOOTH_SHARE_TITLE", title)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BoothError::export(format!("failed to spawn '{}': {e}", self.program)))?;

        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            if let Err(e) = pipe.read_to_string(&mut stderr) {
                tracing::debug!(error = %e, "could not read share command stderr");
            }
        }
        let status = child
            .wait()
            .map_err(|e| BoothError::export(format!("failed to wait for '{}': {e}", self.program)))?;
        if !status.success() {
            return Err(BoothError::export(format!(
                "share command '{}' exited with {status}: {}",
                self.program,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// One recorded share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub title: String,
    pub file_name: String,
    pub image: EncodedImage,
}

/// In-memory share sheet.
#[derive(Debug)]
pub struct MemoryShareSheet {
    pub available: bool,
    /// Fail every share, as when the user dismisses the sheet.
    pub fail: bool,
    pub shared: Vec<SharedFile>,
}

impl MemoryShareSheet {
    pub fn new() -> Self {
        Self {
            available: true,
            fail: false,
            shared: Vec::new(),
        }
    }
}

impl Default for MemoryShareSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareSheet for MemoryShareSheet {
    fn is_available(&self) -> bool {
        self.available
    }

    fn share(&mut self, title: &str, file_name: &str, png: &EncodedImage) -> BoothResult<()> {
        if !self.available || self.fail {
            return Err(BoothError::export("share sheet dismissed"));
        }
        self.shared.push(SharedFile {
            title: title.to_string(),
            file_name: file_name.to_string(),
            image: png.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/target.rs"]
mod tests;
