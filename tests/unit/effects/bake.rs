use super::*;
use crate::effects::filter::FilterTag;
use crate::foundation::core::{ShotCount, Size};

fn frame(rgba: [u8; 4]) -> EncodedImage {
    let size = Size::new(4, 3).unwrap();
    EncodedImage::encode_png(&rgba.repeat(12), size).unwrap()
}

#[test]
fn bake_applies_the_shots_own_filter() {
    let shot = Shot {
        src: frame([200, 40, 90, 255]),
        filter: FilterTag::Grayscale,
    };
    let baked = bake_shot(&shot).unwrap();
    assert_eq!(baked.filter, FilterTag::Grayscale);

    let decoded = baked.src.decode().unwrap();
    assert_eq!(decoded.size, Size::new(4, 3).unwrap());
    for px in decoded.rgba.chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}

#[test]
fn bake_none_preserves_pixels() {
    let shot = Shot {
        src: frame([1, 2, 3, 255]),
        filter: FilterTag::None,
    };
    let baked = bake_shot(&shot).unwrap();
    assert_eq!(
        baked.src.decode().unwrap().rgba,
        shot.src.decode().unwrap().rgba
    );
}

#[test]
fn bake_keeps_order_and_tags() {
    let tags = [FilterTag::None, FilterTag::Sepia, FilterTag::Vintage];
    let mut list = ShotList::new(ShotCount::Three);
    for tag in tags {
        list.push(Shot {
            src: frame([120, 130, 140, 255]),
            filter: tag,
        })
        .unwrap();
    }

    let baked = bake_shots(&list).unwrap();
    assert_eq!(baked.filters(), tags.to_vec());
    assert_eq!(baked.target(), ShotCount::Three);
}

#[test]
fn decode_failure_is_reported_not_swallowed() {
    let mut list = ShotList::new(ShotCount::Three);
    list.push(Shot {
        src: frame([0, 0, 0, 255]),
        filter: FilterTag::Sepia,
    })
    .unwrap();
    list.push(Shot {
        src: EncodedImage::from_bytes(vec![0x89, b'P', b'N', b'G']),
        filter: FilterTag::Sepia,
    })
    .unwrap();
    list.push(Shot {
        src: frame([0, 0, 0, 255]),
        filter: FilterTag::Sepia,
    })
    .unwrap();

    let err = bake_shots(&list).unwrap_err();
    assert!(matches!(err, BoothError::Bake { index: 1, .. }));
}

#[test]
fn incomplete_lists_are_rejected() {
    let list = ShotList::new(ShotCount::One);
    assert!(matches!(
        bake_shots(&list).unwrap_err(),
        BoothError::Validation(_)
    ));
}
