use std::sync::Arc;

use crate::foundation::color::{Rgba8, premultiply_in_place, unpremultiply_in_place};
use crate::foundation::core::Size;
use crate::foundation::error::{BoothError, BoothResult};
use crate::session::shot::{BakedShots, DecodedImage, EncodedImage};
use crate::strip::config::{StripConfig, StripView};
use crate::strip::date_stamp;
use crate::strip::layout::{StripLayout, layout};

/// A strip whose style has been resolved and whose photos are decoded.
///
/// Building one is the "apply style" step; [`rasterize`] consumes it, so a frame can only ever
/// be produced from a fully prepared strip.
#[derive(Clone, Debug)]
pub struct PreparedStrip {
    config: StripConfig,
    layout: StripLayout,
    photos: Vec<DecodedImage>,
    date: Option<(String, f64)>,
}

impl PreparedStrip {
    /// Resolve `view` for `shots`, stamping the date of `at`.
    ///
    /// Uses the view as currently presented, so a minimized view lays out at the minimized
    /// width and font size.
    #[tracing::instrument(skip(view, shots), fields(shots = shots.shots().len()))]
    pub fn new(view: &StripView, shots: &BakedShots, at: chrono::NaiveDateTime) -> BoothResult<Self> {
        view.config.validate()?;

        let photos = shots
            .shots()
            .iter()
            .map(|shot| shot.src.decode())
            .collect::<BoothResult<Vec<_>>>()?;
        let sizes = photos.iter().map(|p| p.size).collect::<Vec<_>>();

        let config = StripConfig {
            width: view.display_width(),
            ..view.config.clone()
        };
        let date = config
            .date
            .visible
            .then(|| (config.date.format.format(at), view.date_font_px()));
        let layout = layout(&config, &sizes, date.as_ref().map(|(_, font)| *font))?;

        Ok(Self {
            config,
            layout,
            photos,
            date,
        })
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    /// Text of the date stamp, when shown.
    pub fn date_text(&self) -> Option<&str> {
        self.date.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }
}

/// A rasterized strip, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl StripFrame {
    /// Straight-alpha RGBA8 at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
        unpremultiply_in_place(&mut px);
        Some(px)
    }

    /// Encode as PNG (straight alpha).
    pub fn to_png(&self) -> BoothResult<EncodedImage> {
        let mut rgba = self.data.clone();
        unpremultiply_in_place(&mut rgba);
        EncodedImage::encode_png(&rgba, Size::new(self.width, self.height)?)
    }
}

/// Paint a prepared strip at `scale` device pixels per CSS pixel.
///
/// Draws, back to front: the rounded card, then per photo its border, a white backing and the
/// baked photo clipped to the inner rounded rect, then the date stamp. Photos are drawn as
/// stored; filters are already baked into them.
#[tracing::instrument(skip(prepared), fields(photos = prepared.photos.len()))]
pub fn rasterize(prepared: PreparedStrip, scale: f64) -> BoothResult<StripFrame> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BoothError::export(format!("invalid export scale {scale}")));
    }
    let PreparedStrip {
        config,
        layout,
        photos,
        date,
    } = prepared;

    let width = device_px(layout.width, scale, "width")?;
    let height = device_px(layout.height, scale, "height")?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::scale(scale));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_paint(solid(config.background));
    ctx.fill_path(&rounded_rect_to_cpu(layout.card_shape()));

    for (photo, frame) in photos.iter().zip(&layout.photos) {
        if config.border_width > 0 {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(solid(config.border_color));
            ctx.fill_path(&rounded_rect_to_cpu(frame.outer_shape()));
        }

        let inner = rounded_rect_to_cpu(frame.inner_shape());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(solid(Rgba8::WHITE));
        ctx.fill_path(&inner);

        let pixmap = photo_pixmap(photo, config.mirror)?;
        let sx = frame.inner.width() / f64::from(photo.size.width);
        let sy = frame.inner.height() / f64::from(photo.size.height);
        ctx.set_paint_transform(
            vello_cpu::kurbo::Affine::translate((frame.inner.x0, frame.inner.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy),
        );
        ctx.set_paint(image_paint(pixmap));
        ctx.fill_path(&inner);
    }

    if let (Some((text, font_px)), Some(line)) = (date, layout.date_line) {
        let stamp =
            date_stamp::render_stamp(&text, config.date.color, font_px, line.width(), scale)?;
        let x0 = line.x0;
        let y0 = line.y0 - date_stamp::overhang(font_px);
        let w = f64::from(stamp.width) / scale;
        let h = f64::from(stamp.height) / scale;
        let pixmap = premul_bytes_to_pixmap(&stamp.rgba8_premul, stamp.width, stamp.height)?;

        ctx.set_paint_transform(
            vello_cpu::kurbo::Affine::translate((x0, y0))
                * vello_cpu::kurbo::Affine::scale(1.0 / scale),
        );
        ctx.set_paint(image_paint(pixmap));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x0 + w, y0 + h));
    }

    let mut target = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut target);

    tracing::debug!(width, height, "strip rasterized");
    Ok(StripFrame {
        width: u32::from(width),
        height: u32::from(height),
        data: target.data_as_u8_slice().to_vec(),
    })
}

fn device_px(css: f64, scale: f64, what: &str) -> BoothResult<u16> {
    let px = (css * scale).ceil();
    if !(1.0..=f64::from(u16::MAX)).contains(&px) {
        return Err(BoothError::export(format!(
            "strip {what} of {px} device pixels is out of range"
        )));
    }
    Ok(px as u16)
}

fn solid(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn image_paint(pixmap: vello_cpu::Pixmap) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn photo_pixmap(photo: &DecodedImage, mirror: bool) -> BoothResult<vello_cpu::Pixmap> {
    let mut rgba = photo.rgba.clone();
    if mirror {
        let row = photo.size.width as usize * 4;
        for line in rgba.chunks_exact_mut(row) {
            mirror_row(line);
        }
    }
    premultiply_in_place(&mut rgba);
    premul_bytes_to_pixmap(&rgba, photo.size.width, photo.size.height)
}

fn mirror_row(row: &mut [u8]) {
    let n = row.len() / 4;
    for i in 0..n / 2 {
        let j = n - 1 - i;
        for c in 0..4 {
            row.swap(i * 4 + c, j * 4 + c);
        }
    }
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoothError::export("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoothError::export("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(BoothError::export("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rounded_rect_to_cpu(shape: kurbo::RoundedRect) -> vello_cpu::kurbo::BezPath {
    use kurbo::{PathEl, Shape as _};

    let p = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        match el {
            PathEl::MoveTo(a) => out.move_to(p(a)),
            PathEl::LineTo(a) => out.line_to(p(a)),
            PathEl::QuadTo(a, b) => out.quad_to(p(a), p(b)),
            PathEl::CurveTo(a, b, c) => out.curve_to(p(a), p(b), p(c)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/strip/raster.rs"]
mod tests;
