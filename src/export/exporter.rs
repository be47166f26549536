use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};

use crate::export::target::{DownloadTarget, ShareSheet};
use crate::foundation::error::BoothResult;
use crate::session::shot::{BakedShots, EncodedImage};
use crate::strip::config::StripView;
use crate::strip::raster::{PreparedStrip, StripFrame, rasterize};

/// Title passed to the share sheet.
pub const SHARE_TITLE: &str = "My Photo Strip";
/// File name passed to the share sheet.
pub const SHARE_FILE_NAME: &str = "photo-strip.png";

/// Current local time, the timestamp exports are stamped with.
pub fn now() -> DateTime<FixedOffset> {
    chrono::Local::now().fixed_offset()
}

/// Download name for a strip exported at `at`: `photo-strip-<UTC date>.png`.
pub fn download_file_name(at: DateTime<FixedOffset>) -> String {
    format!(
        "photo-strip-{}.png",
        at.with_timezone(&Utc).date_naive().format("%Y-%m-%d")
    )
}

/// User-facing failure of a save or share action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alert {
    SaveFailed,
    ShareFailed,
    PrepareShareFailed,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Self::SaveFailed => "There was a problem saving your photo strip. Please try again.",
            Self::ShareFailed => {
                "There was a problem sharing your photo strip. You can try saving it instead."
            }
            Self::PrepareShareFailed => {
                "There was a problem preparing your photo strip for sharing. Please try again."
            }
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What a save or share action ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Written to the download target under `file_name`.
    Saved { file_name: String },
    /// Handed to the share sheet.
    Shared,
    /// Nothing was delivered; the user may retry.
    Failed(Alert),
}

// Puts the previous minimized state back on drop.
struct FullSize<'v> {
    view: &'v mut StripView,
    was_minimized: bool,
}

impl<'v> FullSize<'v> {
    fn force(view: &'v mut StripView) -> Self {
        let was_minimized = std::mem::replace(&mut view.minimized, false);
        Self {
            view,
            was_minimized,
        }
    }
}

impl Drop for FullSize<'_> {
    fn drop(&mut self) {
        self.view.minimized = self.was_minimized;
    }
}

/// A strip resolved from a view that is held at full size until this value is consumed or
/// dropped.
pub struct Prepared<'v> {
    full: FullSize<'v>,
    strip: PreparedStrip,
}

impl Prepared<'_> {
    pub fn strip(&self) -> &PreparedStrip {
        &self.strip
    }

    /// Rasterize at the configured export scale, then restore the view.
    pub fn rasterize(self) -> BoothResult<StripFrame> {
        let Self { full, strip } = self;
        let frame = rasterize(strip, full.view.config.scale);
        drop(full);
        frame
    }
}

/// Force `view` to full size and resolve the strip for `shots`.
///
/// The view's minimized state is restored once the returned value is rasterized or dropped,
/// and immediately when this function fails.
pub fn prepare<'v>(
    view: &'v mut StripView,
    shots: &BakedShots,
    at: DateTime<FixedOffset>,
) -> BoothResult<Prepared<'v>> {
    let full = FullSize::force(view);
    let strip = PreparedStrip::new(full.view, shots, at.naive_local())?;
    Ok(Prepared { full, strip })
}

/// Prepare, rasterize and encode the strip as PNG.
#[tracing::instrument(skip(view, shots), fields(minimized = view.minimized))]
pub fn render_png(
    view: &mut StripView,
    shots: &BakedShots,
    at: DateTime<FixedOffset>,
) -> BoothResult<EncodedImage> {
    let frame = prepare(view, shots, at)?.rasterize()?;
    frame.to_png()
}

/// Render the strip and offer it as `photo-strip-<date>.png`.
#[tracing::instrument(skip_all)]
pub fn save(
    view: &mut StripView,
    shots: &BakedShots,
    downloads: &mut dyn DownloadTarget,
    at: DateTime<FixedOffset>,
) -> ExportOutcome {
    let result = render_png(view, shots, at)
        .and_then(|png| downloads.offer(&download_file_name(at), &png));
    match result {
        Ok(file_name) => ExportOutcome::Saved { file_name },
        Err(e) => {
            tracing::error!(error = %e, "saving photo strip failed");
            ExportOutcome::Failed(Alert::SaveFailed)
        }
    }
}

/// Render the strip and hand it to the share sheet, or download it when sharing is unavailable.
#[tracing::instrument(skip_all)]
pub fn share(
    view: &mut StripView,
    shots: &BakedShots,
    sheet: &mut dyn ShareSheet,
    downloads: &mut dyn DownloadTarget,
    at: DateTime<FixedOffset>,
) -> ExportOutcome {
    let png = match render_png(view, shots, at) {
        Ok(png) => png,
        Err(e) => {
            tracing::error!(error = %e, "preparing photo strip for sharing failed");
            return ExportOutcome::Failed(Alert::PrepareShareFailed);
        }
    };

    let result = if sheet.is_available() {
        sheet
            .share(SHARE_TITLE, SHARE_FILE_NAME, &png)
            .map(|()| ExportOutcome::Shared)
    } else {
        tracing::info!("no share sheet, falling back to download");
        downloads
            .offer(&download_file_name(at), &png)
            .map(|file_name| ExportOutcome::Saved { file_name })
    };
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "sharing photo strip failed");
        ExportOutcome::Failed(Alert::ShareFailed)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
