use kurbo::{Rect, RoundedRect};

use crate::foundation::core::Size;
use crate::foundation::error::{BoothError, BoothResult};
use crate::strip::config::StripConfig;

/// Corner radius of the strip card itself.
pub const STRIP_CORNER_RADIUS: f64 = 8.0;

/// Extra space between the last photo and the date line.
pub const DATE_TOP_MARGIN: f64 = 4.0;

/// One framed photo. `outer` includes the border, `inner` is the visible photo area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoBox {
    pub outer: Rect,
    pub inner: Rect,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl PhotoBox {
    pub fn outer_shape(&self) -> RoundedRect {
        RoundedRect::from_rect(self.outer, self.outer_radius)
    }

    pub fn inner_shape(&self) -> RoundedRect {
        RoundedRect::from_rect(self.inner, self.inner_radius)
    }
}

/// Geometry of a whole strip in CSS pixels, origin at the strip's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct StripLayout {
    pub width: f64,
    pub height: f64,
    pub photos: Vec<PhotoBox>,
    /// Line box of the date stamp, when shown.
    pub date_line: Option<Rect>,
}

impl StripLayout {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn card_shape(&self) -> RoundedRect {
        RoundedRect::from_rect(self.bounds(), STRIP_CORNER_RADIUS)
    }
}

/// Stack `photos` vertically inside the strip described by `config`.
///
/// Each photo is scaled to the content width keeping its aspect ratio. `date_font_px` adds a
/// date line of that height below the photos.
pub fn layout(
    config: &StripConfig,
    photos: &[Size],
    date_font_px: Option<f64>,
) -> BoothResult<StripLayout> {
    if photos.is_empty() {
        return Err(BoothError::validation("strip needs at least one photo"));
    }

    let width = f64::from(config.width);
    let padding = f64::from(config.padding);
    let gap = f64::from(config.gap);
    let border = f64::from(config.border_width);
    let radius = f64::from(config.border_radius);

    let content_w = width - 2.0 * padding;
    let inner_w = content_w - 2.0 * border;
    if inner_w <= 0.0 {
        return Err(BoothError::validation(format!(
            "strip width {width} leaves no room for photos"
        )));
    }

    let mut boxes = Vec::with_capacity(photos.len());
    let mut y = padding;
    for (i, size) in photos.iter().enumerate() {
        if i > 0 {
            y += gap;
        }
        let inner_h = inner_w * size.aspect();
        let outer = Rect::new(padding, y, padding + content_w, y + inner_h + 2.0 * border);
        boxes.push(PhotoBox {
            outer,
            inner: outer.inset(-border),
            outer_radius: radius,
            inner_radius: (radius - border).max(0.0),
        });
        y = outer.y1;
    }

    let date_line = date_font_px.map(|font| {
        let top = y + gap + DATE_TOP_MARGIN;
        y = top + font;
        Rect::new(padding, top, padding + content_w, top + font)
    });

    Ok(StripLayout {
        width,
        height: y + padding,
        photos: boxes,
        date_line,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/strip/layout.rs"]
mod tests;
