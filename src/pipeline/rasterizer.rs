use crate::core::Color;
use crate::pipeline::buffer::Buffer;
use crate::pipeline::clipper::accept_segment;
use glam::{IVec2, Vec2};

/// Integer Bresenham walk over every octant, calling `plot` for each cell
/// from `start` to `end` inclusive.
pub fn bresenham<F>(start: IVec2, end: IVec2, mut plot: F)
where
    F: FnMut(i32, i32),
{
    let (mut x0, mut y0) = (start.x, start.y);
    let (x1, y1) = (end.x, end.y);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x0, y0);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Rasterize a screen space segment with a single glyph.
pub fn draw_line(buf: &mut dyn Buffer, start: Vec2, end: Vec2, glyph: char) {
    let Some((a, b)) = accept_segment(start, end, buf.width(), buf.height()) else {
        return;
    };
    bresenham(a, b, |x, y| buf.plot(x, y, glyph));
}

/// Rasterize a segment carrying a color at each endpoint.
///
/// Cells are the same ones [`draw_line`] produces. Each gets the endpoint
/// colors blended by how far along the major axis it sits, and the blend is
/// handed to [`Buffer::plot_shaded`]; the glyph is the same for every cell.
pub fn draw_line_interpolated_color(
    buf: &mut dyn Buffer,
    points: [Vec2; 2],
    colors: [Color; 2],
    glyph: char,
) {
    let Some((a, b)) = accept_segment(points[0], points[1], buf.width(), buf.height()) else {
        return;
    };

    let delta = (b - a).abs();
    let major = delta.x.max(delta.y);
    let mut step = 0;

    bresenham(a, b, |x, y| {
        let t = if major != 0 {
            step as f32 / major as f32
        } else {
            1.0
        };
        buf.plot_shaded(x, y, glyph, colors[0].lerp(&colors[1], t));
        step += 1;
    });
}
