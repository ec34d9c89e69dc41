use crate::core::Color;
use crate::error::{Error, Result};
use fontdue::{Font, FontSettings};
use std::io;
use std::path::Path;

/// Load a TrueType font from disk. A missing file is its own error so the
/// binary can report which asset it was looking for.
pub fn load_font(path: &Path, size: f32) -> Result<Font> {
    let font_data = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FontNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })?;
    Font::from_bytes(
        font_data,
        FontSettings {
            scale: size,
            ..FontSettings::default()
        },
    )
    .map_err(|e| Error::Font(e.to_string()))
}

/// Greedy word wrap. `advance` gives the width of one character.
pub fn wrap_text<F>(text: &str, max_width: f32, advance: F) -> Vec<String>
where
    F: Fn(char) -> f32,
{
    let measure = |s: &str| s.chars().map(&advance).sum::<f32>();
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measure(&candidate) <= max_width || line.is_empty() {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// CPU side pixels for the controls window, 0x00RRGGBB.
pub struct WinBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    font: Font,
    font_size: f32,
}

impl WinBuffer {
    pub fn new(width: usize, height: usize, font: Font, font_size: f32) -> Self {
        WinBuffer {
            width,
            height,
            data: vec![Color::WHITE.to_u32(); width * height],
            font,
            font_size,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.data.fill(color.to_u32());
    }

    fn line_height(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.font_size)
            .map(|m| m.new_line_size)
            .unwrap_or(self.font_size * 1.2)
    }

    fn ascent(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.font_size)
            .map(|m| m.ascent)
            .unwrap_or(self.font_size)
    }

    /// Draw `text` from the top left corner, wrapped to the buffer width.
    pub fn draw_text(&mut self, text: &str, color: Color) {
        let font_size = self.font_size;
        let lines = wrap_text(text, self.width as f32, |c| {
            self.font.metrics(c, font_size).advance_width
        });
        let line_height = self.line_height();
        let mut baseline = self.ascent();

        for line in lines {
            let mut cursor_x = 0.0f32;
            for c in line.chars() {
                let (metrics, bitmap) = self.font.rasterize(c, font_size);
                let left = cursor_x as i32 + metrics.xmin;
                let top = baseline as i32 - metrics.height as i32 - metrics.ymin;

                for (i, &alpha) in bitmap.iter().enumerate() {
                    if alpha == 0 {
                        continue;
                    }
                    let px = left + (i % metrics.width) as i32;
                    let py = top + (i / metrics.width) as i32;
                    if px >= 0 && py >= 0 && (px as usize) < self.width && (py as usize) < self.height {
                        let idx = py as usize * self.width + px as usize;
                        self.data[idx] = Color::WHITE.lerp(&color, alpha as f32 / 255.0).to_u32();
                    }
                }
                cursor_x += metrics.advance_width;
            }
            baseline += line_height;
        }
    }
}
