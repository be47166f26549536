use super::*;

#[test]
fn raster_covers_line_box_plus_overhang() {
    let r = render_stamp("10/16/2026", Rgba8::BLACK, 11.0, 272.0, 2.0).unwrap();
    assert_eq!(r.width, 544);
    assert_eq!(r.height, 33);
    assert_eq!(r.rgba8_premul.len(), 544 * 33 * 4);
}

#[test]
fn stamp_pixels_are_premultiplied() {
    let r = render_stamp("Friday, October 16, 2026", Rgba8::rgb(255, 0, 0), 11.0, 272.0, 1.0)
        .unwrap();
    for px in r.rgba8_premul.chunks_exact(4) {
        assert!(px[0] <= px[3]);
        assert_eq!(px[1], 0);
        assert_eq!(px[2], 0);
    }
}

#[test]
fn markup_in_text_is_escaped() {
    assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    render_stamp("</text><rect/>", Rgba8::BLACK, 9.0, 100.0, 1.0).unwrap();
}

#[test]
fn overhang_scales_with_font() {
    assert_eq!(overhang(8.0), 2.0);
}
