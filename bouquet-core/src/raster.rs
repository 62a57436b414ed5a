//! Software rasterizer for circle lists, plus point-in-time PNG
//! export. Every call is a full repaint: clear to the background,
//! then paint each circle in list order (paint order = list order).

use crate::physics::Circle;
use crate::types::TimestampMs;
use image::{Rgba, RgbaImage};
use log::info;
use std::path::Path;

/// Renders the circles into a fresh RGBA image.
pub fn rasterize(circles: &[Circle], width: u32, height: u32, background: [u8; 3]) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(
        width,
        height,
        Rgba([background[0], background[1], background[2], 255]),
    );
    for c in circles {
        paint_circle(&mut img, c);
    }
    img
}

/// Fills one circle by scanning its bounding box. Pixels are sampled
/// at their centers.
fn paint_circle(img: &mut RgbaImage, c: &Circle) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let x_lo = ((c.pos.x - c.radius).floor() as i64).max(0);
    let x_hi = ((c.pos.x + c.radius).ceil() as i64).min(w - 1);
    let y_lo = ((c.pos.y - c.radius).floor() as i64).max(0);
    let y_hi = ((c.pos.y + c.radius).ceil() as i64).min(h - 1);

    let r2 = c.radius * c.radius;
    let fill = Rgba([c.color[0], c.color[1], c.color[2], 255]);

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = x as f32 + 0.5 - c.pos.x;
            let dy = y as f32 + 0.5 - c.pos.y;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, fill);
            }
        }
    }
}

/// File name for an export taken at the given time.
pub fn export_filename(timestamp_ms: TimestampMs) -> String {
    format!("bouquet-{timestamp_ms}.png")
}

/// Rasterizes the circles as they are at this instant and writes a
/// standalone PNG. A zero-sized surface is a silent skip, not an
/// error.
pub fn export_png(
    circles: &[Circle],
    width: u32,
    height: u32,
    background: [u8; 3],
    path: &Path,
) -> image::ImageResult<()> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    rasterize(circles, width, height, background).save(path)?;
    info!("exported {width}x{height} canvas to {}", path.display());
    Ok(())
}
