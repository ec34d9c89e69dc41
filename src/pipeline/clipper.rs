use glam::{IVec2, Vec2};

/// Largest coordinate magnitude handed to the line walker. Segments reaching
/// further out are clipped so a wild projection can't turn into a
/// billion-step loop.
pub const MAX_COORD: i32 = 1 << 15;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// Cohen-Sutherland region code of `p` against a `width` x `height` grid.
pub fn outcode(p: IVec2, width: usize, height: usize) -> u8 {
    let mut code = INSIDE;
    if p.x < 0 {
        code |= LEFT;
    } else if p.x >= width as i32 {
        code |= RIGHT;
    }
    if p.y < 0 {
        code |= TOP;
    } else if p.y >= height as i32 {
        code |= BOTTOM;
    }
    code
}

/// Snap a screen space point to its cell. `None` for NaN or infinite input,
/// or when the point lies beyond the guard band.
pub fn to_cell(p: Vec2) -> Option<IVec2> {
    let limit = MAX_COORD as f32;
    if !p.is_finite() || p.x.abs() > limit || p.y.abs() > limit {
        return None;
    }
    Some(IVec2::new(p.x.round() as i32, p.y.round() as i32))
}

/// Liang-Barsky clip of `start -> end` against the guard square
/// `[-MAX_COORD, MAX_COORD]`. The clipped endpoints stay on the original
/// line, so the slope of whatever reaches the grid is unchanged.
pub fn clip_to_guard(start: Vec2, end: Vec2) -> Option<(Vec2, Vec2)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let limit = MAX_COORD as f64;
    let (x0, y0) = (start.x as f64, start.y as f64);
    let (dx, dy) = (end.x as f64 - x0, end.y as f64 - y0);

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, x0 + limit), (dx, limit - x0), (-dy, y0 + limit), (dy, limit - y0)] {
        if p == 0.0 {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        let x = (x0 + t * dx).clamp(-limit, limit);
        let y = (y0 + t * dy).clamp(-limit, limit);
        Vec2::new(x as f32, y as f32)
    };
    Some((at(t0), at(t1)))
}

/// Clip to the guard band, snap both endpoints and drop segments that cannot
/// touch the grid: both endpoints beyond the same edge. Survivors may still
/// be partially off screen, the buffer clips those cell by cell.
pub fn accept_segment(start: Vec2, end: Vec2, width: usize, height: usize) -> Option<(IVec2, IVec2)> {
    if width == 0 || height == 0 {
        return None;
    }
    let (start, end) = clip_to_guard(start, end)?;
    let (a, b) = (to_cell(start)?, to_cell(end)?);
    if outcode(a, width, height) & outcode(b, width, height) != 0 {
        return None;
    }
    Some((a, b))
}
