use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Context as _;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};

/// Directory of extra `.ttf`/`.otf`/`.ttc` files loaded next to the system fonts.
pub const FONTS_DIR_ENV: &str = "STRIPBOOTH_FONTS_DIR";

/// The raster box extends this many ems above and below the line box so glyphs are not clipped.
const OVERHANG_EM: f64 = 0.25;
/// Baseline offset inside a line box whose height equals the font size.
const BASELINE_EM: f64 = 0.83;

/// Rasterized date text, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StampRaster {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

/// Where the stamp raster sits relative to its line box, in CSS px.
pub fn overhang(font_px: f64) -> f64 {
    font_px * OVERHANG_EM
}

/// Render `text` centered in a line box `line_width` CSS px wide and `font_px` tall, at
/// `density` device pixels per CSS pixel.
///
/// The returned raster covers the line box grown by [`overhang`] on the top and bottom.
#[tracing::instrument(skip(color))]
pub fn render_stamp(
    text: &str,
    color: Rgba8,
    font_px: f64,
    line_width: f64,
    density: f64,
) -> BoothResult<StampRaster> {
    let box_h = font_px + 2.0 * overhang(font_px);
    let width = (line_width * density).ceil().max(1.0) as u32;
    let height = (box_h * density).ceil().max(1.0) as u32;

    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{line_width}" height="{box_h}" viewBox="0 0 {line_width} {box_h}"><text x="{x}" y="{y}" font-family="sans-serif" font-size="{font_px}" text-anchor="middle" fill="{fill}" fill-opacity="{opacity}">{body}</text></svg>"#,
        x = line_width / 2.0,
        y = overhang(font_px) + font_px * BASELINE_EM,
        fill = Rgba8 { a: 255, ..color }.to_hex(),
        opacity = f64::from(color.a) / 255.0,
        body = escape_xml(text),
    );

    let opts = usvg::Options {
        fontdb: shared_fontdb(),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse date stamp svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BoothError::export("failed to allocate date stamp pixmap"))?;
    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(StampRaster {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// Loading system fonts is slow; do it once per process.
fn shared_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = std::env::var_os(FONTS_DIR_ENV) {
            load_fonts_from_dir(&mut db, Path::new(&dir));
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Arc::new(db)
    })
    .clone()
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc") {
            let _ = db.load_font_file(&path);
        }
    }
}

// Prefer the requested families, then any sans-serif face, then whatever is installed.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                })
                .collect::<Vec<_>>();
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip/date_stamp.rs"]
mod tests;
