use rusttype::{point, Font, Scale};
use std::fs;
use std::path::Path;

pub struct FontRenderer {
    font: Font<'static>,
}

impl FontRenderer {
    /// Naive search across common macOS/Linux font paths for a family like
    /// "Arial" or "DejaVuSans". Falls back to the bitmap font when nothing
    /// loads.
    pub fn try_load(family: &str) -> Option<Self> {
        let paths = [
            format!("/Library/Fonts/{}.ttf", family),
            format!("/System/Library/Fonts/{}.ttf", family),
            format!("/System/Library/Fonts/Supplemental/{}.ttf", family),
            format!("/usr/share/fonts/truetype/{}.ttf", family),
            format!("/usr/share/fonts/truetype/dejavu/{}.ttf", family),
            // Check local dir
            format!("{}.ttf", family),
        ];

        for p in paths.iter() {
            if Path::new(p).exists() {
                if let Ok(data) = fs::read(p) {
                    if let Some(font) = Font::try_from_vec(data) {
                        println!("Loaded font from {}", p);
                        return Some(Self { font });
                    }
                }
            }
        }

        println!(
            "Could not find font family '{}'. Falling back to bitmap.",
            family
        );
        None
    }

    /// Draw text into an RGB8 buffer, alpha-blending the glyph coverage so
    /// the large labels keep smooth edges over the camera image.
    pub fn draw_text(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        text: &str,
        color: (u8, u8, u8),
        size_pt: f32,
    ) {
        let scale = Scale::uniform(size_pt);
        let v_metrics = self.font.v_metrics(scale);
        let start = point(x as f32, y as f32 + v_metrics.ascent);

        for glyph in self.font.layout(text, scale, start) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    if v <= 0.0 {
                        return;
                    }
                    let px = bb.min.x + gx as i32;
                    let py = bb.min.y + gy as i32;
                    if px < 0 || py < 0 {
                        return;
                    }
                    let (px, py) = (px as usize, py as usize);
                    if px < width && py < height {
                        let idx = (py * width + px) * 3;
                        if idx + 2 < buffer.len() {
                            blend(&mut buffer[idx], color.0, v);
                            blend(&mut buffer[idx + 1], color.1, v);
                            blend(&mut buffer[idx + 2], color.2, v);
                        }
                    }
                });
            }
        }
    }

    pub fn measure_height(&self, size_pt: f32) -> usize {
        let scale = Scale::uniform(size_pt);
        let v_metrics = self.font.v_metrics(scale);
        (v_metrics.ascent - v_metrics.descent + v_metrics.line_gap) as usize
    }
}

fn blend(dst: &mut u8, src: u8, alpha: f32) {
    *dst = (*dst as f32 * (1.0 - alpha) + src as f32 * alpha) as u8;
}
