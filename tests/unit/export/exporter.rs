use super::*;
use crate::effects::filter::FilterTag;
use crate::export::target::{MemoryDownloads, MemoryShareSheet, NoShareSheet};
use crate::foundation::core::{ShotCount, Size};
use crate::session::shot::Shot;
use crate::strip::config::StripConfig;

fn at() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-10-16T13:05:09+00:00").unwrap()
}

fn shots() -> BakedShots {
    let size = Size::new(4, 3).unwrap();
    let rgba = [40u8, 80, 120, 255].repeat(12);
    let shot = Shot {
        src: EncodedImage::encode_png(&rgba, size).unwrap(),
        filter: FilterTag::Sepia,
    };
    BakedShots::new(ShotCount::Three, vec![shot.clone(), shot.clone(), shot]).unwrap()
}

fn small_view() -> StripView {
    StripView::new(StripConfig {
        scale: 1.0,
        ..StripConfig::default()
    })
}

#[test]
fn download_name_uses_the_utc_date() {
    assert_eq!(download_file_name(at()), "photo-strip-2026-10-16.png");
    let late_evening = DateTime::parse_from_rfc3339("2026-10-16T22:30:00-05:00").unwrap();
    assert_eq!(download_file_name(late_evening), "photo-strip-2026-10-17.png");
}

#[test]
fn alerts_carry_the_user_facing_messages() {
    assert_eq!(
        Alert::SaveFailed.to_string(),
        "There was a problem saving your photo strip. Please try again."
    );
    assert!(Alert::ShareFailed.message().contains("try saving it instead"));
    assert!(Alert::PrepareShareFailed.message().contains("preparing"));
}

#[test]
fn prepare_forces_full_size_and_restores_after_rasterize() {
    let mut view = small_view();
    view.toggle_minimized();

    let prepared = prepare(&mut view, &shots(), at()).unwrap();
    assert_eq!(prepared.strip().layout().width, 320.0);
    let frame = prepared.rasterize().unwrap();
    assert_eq!(frame.width, 320);
    assert!(view.minimized);
}

#[test]
fn failed_prepare_restores_minimized_state() {
    let mut view = StripView::new(StripConfig {
        padding: 0,
        ..StripConfig::default()
    });
    view.toggle_minimized();
    assert!(prepare(&mut view, &shots(), at()).is_err());
    assert!(view.minimized);
}

#[test]
fn minimized_export_matches_full_size_export() {
    let mut full = small_view();
    let mut mini = small_view();
    mini.toggle_minimized();

    let a = render_png(&mut full, &shots(), at()).unwrap();
    let b = render_png(&mut mini, &shots(), at()).unwrap();
    assert_eq!(a.decode().unwrap(), b.decode().unwrap());
    assert!(mini.minimized);
}

#[test]
fn two_saves_produce_two_dated_downloads() {
    let mut view = small_view();
    let before = view.clone();
    let strip = shots();
    let mut downloads = MemoryDownloads::new();

    let first = save(&mut view, &strip, &mut downloads, at());
    let second = save(&mut view, &strip, &mut downloads, at());
    assert_eq!(
        first,
        ExportOutcome::Saved {
            file_name: "photo-strip-2026-10-16.png".into()
        }
    );
    assert_eq!(
        second,
        ExportOutcome::Saved {
            file_name: "photo-strip-2026-10-16 (1).png".into()
        }
    );
    assert!(downloads.downloads.iter().all(|d| d.file_name.contains("2026-10-16")));
    assert_eq!(view, before);
    assert_eq!(strip, shots());
}

#[test]
fn save_failure_becomes_an_alert_and_allows_retry() {
    let mut view = small_view();
    let mut downloads = MemoryDownloads {
        fail: true,
        ..MemoryDownloads::default()
    };
    assert_eq!(
        save(&mut view, &shots(), &mut downloads, at()),
        ExportOutcome::Failed(Alert::SaveFailed)
    );

    downloads.fail = false;
    assert!(matches!(
        save(&mut view, &shots(), &mut downloads, at()),
        ExportOutcome::Saved { .. }
    ));
}

#[test]
fn share_uses_title_and_fixed_file_name() {
    let mut view = small_view();
    let mut sheet = MemoryShareSheet::new();
    let mut downloads = MemoryDownloads::new();

    let out = share(&mut view, &shots(), &mut sheet, &mut downloads, at());
    assert_eq!(out, ExportOutcome::Shared);
    assert_eq!(sheet.shared[0].title, SHARE_TITLE);
    assert_eq!(sheet.shared[0].file_name, SHARE_FILE_NAME);
    assert_eq!(sheet.shared[0].image.mime(), "image/png");
    assert!(downloads.downloads.is_empty());
}

#[test]
fn share_without_a_sheet_falls_back_to_download() {
    let mut view = small_view();
    let mut downloads = MemoryDownloads::new();
    let out = share(&mut view, &shots(), &mut NoShareSheet, &mut downloads, at());
    assert_eq!(
        out,
        ExportOutcome::Saved {
            file_name: "photo-strip-2026-10-16.png".into()
        }
    );
}

#[test]
fn share_failures_map_to_their_alerts() {
    let mut view = small_view();
    let mut sheet = MemoryShareSheet {
        fail: true,
        ..MemoryShareSheet::new()
    };
    let mut downloads = MemoryDownloads::new();
    assert_eq!(
        share(&mut view, &shots(), &mut sheet, &mut downloads, at()),
        ExportOutcome::Failed(Alert::ShareFailed)
    );

    let mut broken = StripView::new(StripConfig {
        width: 10,
        ..StripConfig::default()
    });
    assert_eq!(
        share(&mut broken, &shots(), &mut sheet, &mut downloads, at()),
        ExportOutcome::Failed(Alert::PrepareShareFailed)
    );
}
