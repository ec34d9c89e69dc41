pub mod buffer;
pub mod clipper;
pub mod rasterizer;

pub use buffer::{Buffer, TermBuffer};
pub use rasterizer::{draw_line, draw_line_interpolated_color};
