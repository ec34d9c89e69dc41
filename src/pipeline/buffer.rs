use crate::core::Color;
use std::io::{self, stdout, Write};

pub const BLANK: char = ' ';

/// A grid of glyph cells the rasterizer draws into.
///
/// Every write is bounds checked: coordinates outside the grid are dropped,
/// which is the only clipping the pipeline relies on.
pub trait Buffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn clear(&mut self);
    fn plot(&mut self, x: i32, y: i32, glyph: char);
    fn glyph(&self, x: i32, y: i32) -> Option<char>;

    /// Plot with an interpolated color attached. Buffers that cannot show
    /// color just place the glyph.
    fn plot_shaded(&mut self, x: i32, y: i32, glyph: char, _color: Color) {
        self.plot(x, y, glyph);
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }
}

#[derive(Debug, Clone)]
pub struct TermBuffer {
    width: usize,
    height: usize,
    data: Vec<char>,
}

impl TermBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        TermBuffer {
            width,
            height,
            data: vec![BLANK; width * height],
        }
    }

    /// Reallocate for a new viewport size. The contents are blanked.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height, BLANK);
    }

    pub fn row(&self, y: usize) -> &[char] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn row_string(&self, y: usize) -> String {
        self.row(y).iter().collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() panics on 0
        self.data.chunks(self.width.max(1))
    }

    /// Number of non blank cells, mostly useful for tests and debug logging.
    pub fn filled(&self) -> usize {
        self.data.iter().filter(|&&c| c != BLANK).count()
    }

    /// Write the grid to `out` row by row.
    ///
    /// Each row is prefixed with an absolute cursor move so the frame paints
    /// over the previous one in place, and the cursor is sent home afterwards
    /// for the next frame.
    pub fn flush_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut output = String::with_capacity((self.width + 8) * self.height + 4);

        for (y, row) in self.rows().enumerate().take(self.height) {
            output.push_str(&format!("\x1B[{};{}H", y + 1, 1));
            output.extend(row.iter());
        }
        output.push_str("\x1B[H");

        out.write_all(output.as_bytes())?;
        out.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.flush_to(&mut stdout().lock())
    }
}

impl Buffer for TermBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self) {
        self.data.fill(BLANK);
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char) {
        if self.contains(x, y) {
            let index = x as usize + y as usize * self.width;
            self.data[index] = glyph;
        }
    }

    fn glyph(&self, x: i32, y: i32) -> Option<char> {
        self.contains(x, y)
            .then(|| self.data[x as usize + y as usize * self.width])
    }
}
