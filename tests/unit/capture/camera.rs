use super::*;

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

#[test]
fn synthetic_frames_decode_at_requested_size() {
    let size = Size::new(16, 12).unwrap();
    let mut src = SyntheticSource::new(size);
    src.open().unwrap();
    let a = src.grab_frame().unwrap().unwrap();
    let b = src.grab_frame().unwrap().unwrap();
    assert_eq!(a.decode().unwrap().size, size);
    assert_ne!(a, b);
}

#[test]
fn synthetic_feed_with_an_empty_size_is_a_camera_error() {
    let empty = Size {
        width: 0,
        height: 4,
    };
    assert!(SyntheticSource::render(empty, 2).is_empty());

    let mut src = SyntheticSource::new(empty);
    assert!(matches!(src.open(), Err(BoothError::Camera(_))));
    assert!(matches!(src.grab_frame(), Err(BoothError::Camera(_))));
}

#[test]
fn synthetic_render_is_deterministic() {
    let size = Size::new(8, 8).unwrap();
    assert_eq!(
        SyntheticSource::render(size, 3),
        SyntheticSource::render(size, 3)
    );
}

#[test]
fn missing_directory_is_a_camera_failure() {
    let mut src = DirectorySource::new(temp_dir("missing"));
    let err = src.open().unwrap_err();
    assert!(matches!(err, BoothError::Camera(_)));
    assert!(src.grab_frame().is_err());
}

#[test]
fn empty_directory_is_a_camera_failure() {
    let dir = temp_dir("empty_frames");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("notes.txt"), b"not a frame").unwrap();

    let mut src = DirectorySource::new(&dir);
    assert!(matches!(src.open().unwrap_err(), BoothError::Camera(_)));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn directory_frames_play_in_name_order_and_loop() {
    let dir = temp_dir("frames");
    std::fs::create_dir_all(&dir).unwrap();
    let size = Size::new(1, 1).unwrap();
    let first = EncodedImage::encode_png(&[1, 1, 1, 255], size).unwrap();
    let second = EncodedImage::encode_png(&[2, 2, 2, 255], size).unwrap();
    std::fs::write(dir.join("b.png"), second.as_bytes()).unwrap();
    std::fs::write(dir.join("a.PNG"), first.as_bytes()).unwrap();

    let mut src = DirectorySource::new(&dir);
    src.open().unwrap();
    assert_eq!(src.grab_frame().unwrap().unwrap(), first);
    assert_eq!(src.grab_frame().unwrap().unwrap(), second);
    assert_eq!(src.grab_frame().unwrap().unwrap(), first);

    std::fs::remove_dir_all(&dir).ok();
}
