use super::*;
use crate::foundation::core::Size;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "stripbooth_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png() -> EncodedImage {
    EncodedImage::encode_png(&[1, 2, 3, 255], Size::new(1, 1).unwrap()).unwrap()
}

#[test]
fn dedupe_appends_browser_style_counters() {
    let taken = ["a.png", "a (1).png"];
    assert_eq!(dedupe_file_name("b.png", |n| taken.contains(&n)), "b.png");
    assert_eq!(dedupe_file_name("a.png", |n| taken.contains(&n)), "a (2).png");
    assert_eq!(dedupe_file_name("noext", |n| n == "noext"), "noext (1)");
    assert_eq!(dedupe_file_name(".png", |n| n == ".png"), ".png (1)");
}

#[test]
fn directory_downloads_never_clobber() {
    let dir = temp_dir("downloads");
    let mut target = DirectoryDownloads::new(&dir);

    let first = target.offer("photo-strip-2026-10-16.png", &png()).unwrap();
    let second = target.offer("photo-strip-2026-10-16.png", &png()).unwrap();
    assert_eq!(first, "photo-strip-2026-10-16.png");
    assert_eq!(second, "photo-strip-2026-10-16 (1).png");
    assert!(dir.join(&first).is_file());
    assert_eq!(std::fs::read(dir.join(&second)).unwrap(), png().as_bytes());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn directory_downloads_reject_paths() {
    let mut target = DirectoryDownloads::new(temp_dir("bad_names"));
    assert!(target.offer("../escape.png", &png()).is_err());
    assert!(target.offer("", &png()).is_err());
}

#[test]
fn memory_downloads_record_in_order() {
    let mut target = MemoryDownloads::new();
    target.offer("x.png", &png()).unwrap();
    target.offer("x.png", &png()).unwrap();
    let names = target
        .downloads
        .iter()
        .map(|d| d.file_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["x.png", "x (1).png"]);

    target.fail = true;
    assert!(target.offer("x.png", &png()).is_err());
    assert_eq!(target.downloads.len(), 2);
}

#[test]
fn memory_share_sheet_records_or_refuses() {
    let mut sheet = MemoryShareSheet::new();
    sheet.share("My Photo Strip", "photo-strip.png", &png()).unwrap();
    assert_eq!(sheet.shared[0].title, "My Photo Strip");

    sheet.fail = true;
    assert!(sheet.share("t", "f.png", &png()).is_err());

    assert!(!NoShareSheet.is_available());
    assert!(NoShareSheet.share("t", "f.png", &png()).is_err());
}

#[cfg(unix)]
#[test]
fn command_share_sheet_reports_exit_status() {
    let dir = temp_dir("share_cmd");

    let mut ok = CommandShareSheet::new("true", vec![], &dir);
    assert!(ok.is_available());
    ok.share("My Photo Strip", "photo-strip.png", &png()).unwrap();
    assert!(dir.join("photo-strip.png").is_file());

    let mut failing = CommandShareSheet::new("false", vec![], &dir);
    let err = failing.share("t", "photo-strip.png", &png()).unwrap_err();
    assert!(matches!(err, BoothError::Export(_)));

    let mut missing = CommandShareSheet::new("stripbooth-no-such-program", vec![], &dir);
    assert!(missing.share("t", "photo-strip.png", &png()).is_err());

    std::fs::remove_dir_all(&dir).ok();
}
