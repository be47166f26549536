use super::*;
use crate::effects::filter::FilterTag;
use crate::foundation::core::ShotCount;
use crate::session::shot::Shot;

fn noon() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// 8x6 photo, left half `left`, right half `right`.
fn split_photo(left: [u8; 4], right: [u8; 4]) -> Shot {
    let size = Size::new(8, 6).unwrap();
    let mut rgba = Vec::with_capacity(size.rgba_len());
    for _y in 0..6 {
        for x in 0..8 {
            rgba.extend_from_slice(if x < 4 { &left } else { &right });
        }
    }
    Shot {
        src: EncodedImage::encode_png(&rgba, size).unwrap(),
        filter: FilterTag::None,
    }
}

fn one_shot(shot: Shot) -> BakedShots {
    BakedShots::new(ShotCount::One, vec![shot]).unwrap()
}

fn undated(config: StripConfig) -> StripView {
    StripView::new(StripConfig {
        date: crate::strip::config::DateStamp {
            visible: false,
            ..Default::default()
        },
        ..config
    })
}

fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(e) <= 2, "{actual:?} != {expected:?}");
    }
}

const BLUE: [u8; 4] = [0, 0, 255, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];

#[test]
fn frame_size_follows_layout_and_scale() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let view = undated(StripConfig::default());

    let p = PreparedStrip::new(&view, &shots, noon()).unwrap();
    assert_eq!(p.layout().height, 253.0);
    let frame = rasterize(p, 1.0).unwrap();
    assert_eq!((frame.width, frame.height), (320, 253));
    assert_eq!(frame.data.len(), 320 * 253 * 4);

    let p = PreparedStrip::new(&view, &shots, noon()).unwrap();
    let frame = rasterize(p, 2.0).unwrap();
    assert_eq!((frame.width, frame.height), (640, 506));
}

#[test]
fn card_border_and_photo_layers_paint_in_order() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let view = undated(StripConfig {
        border_color: Rgba8::rgb(255, 0, 0),
        mirror: false,
        ..StripConfig::default()
    });
    let frame = rasterize(PreparedStrip::new(&view, &shots, noon()).unwrap(), 1.0).unwrap();

    // Rounded card corner stays transparent.
    assert_eq!(frame.pixel(0, 0).unwrap()[3], 0);
    // Padding shows the background.
    assert_close(frame.pixel(12, 120).unwrap(), [0xf5, 0xa9, 0xb8, 255]);
    // Border band along the top edge of the photo box.
    assert_close(frame.pixel(150, 24).unwrap(), [255, 0, 0, 255]);
    // Photo halves, unmirrored.
    assert_close(frame.pixel(60, 120).unwrap(), BLUE);
    assert_close(frame.pixel(260, 120).unwrap(), GREEN);
}

#[test]
fn mirrored_photos_swap_sides() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let view = undated(StripConfig::default());
    let frame = rasterize(PreparedStrip::new(&view, &shots, noon()).unwrap(), 1.0).unwrap();
    assert_close(frame.pixel(60, 120).unwrap(), GREEN);
    assert_close(frame.pixel(260, 120).unwrap(), BLUE);
}

#[test]
fn translucent_photo_pixels_sit_on_white_backing() {
    let clear = [0, 0, 0, 0];
    let shots = one_shot(split_photo(clear, clear));
    let view = undated(StripConfig::default());
    let frame = rasterize(PreparedStrip::new(&view, &shots, noon()).unwrap(), 1.0).unwrap();
    assert_close(frame.pixel(160, 120).unwrap(), [255, 255, 255, 255]);
}

#[test]
fn date_line_is_prepared_from_the_configured_format() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let view = StripView::default();
    let p = PreparedStrip::new(&view, &shots, noon()).unwrap();
    assert_eq!(p.date_text(), Some("10/16/2026"));
    assert!(p.layout().date_line.is_some());

    let frame = rasterize(p, 1.0).unwrap();
    assert_eq!(frame.height, 253 + 12 + 4 + 11);
}

#[test]
fn minimized_view_prepares_a_narrow_strip() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let mut view = StripView::default();
    view.toggle_minimized();
    let p = PreparedStrip::new(&view, &shots, noon()).unwrap();
    assert_eq!(p.layout().width, 160.0);
    assert_eq!(p.config().width, 160);
}

#[test]
fn invalid_config_and_scale_are_rejected() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let view = StripView::new(StripConfig {
        gap: 99,
        ..StripConfig::default()
    });
    assert!(PreparedStrip::new(&view, &shots, noon()).is_err());

    let p = PreparedStrip::new(&StripView::default(), &shots, noon()).unwrap();
    assert!(matches!(rasterize(p, 0.0), Err(BoothError::Export(_))));
}

#[test]
fn png_export_unpremultiplies() {
    let shots = one_shot(split_photo(BLUE, GREEN));
    let view = undated(StripConfig::default());
    let frame = rasterize(PreparedStrip::new(&view, &shots, noon()).unwrap(), 1.0).unwrap();
    let decoded = frame.to_png().unwrap().decode().unwrap();
    assert_eq!(decoded.size, Size::new(320, 253).unwrap());
}

#[test]
fn mirror_row_reverses_pixels() {
    let mut row = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    mirror_row(&mut row);
    assert_eq!(row, vec![9, 10, 11, 12, 5, 6, 7, 8, 1, 2, 3, 4]);
}
