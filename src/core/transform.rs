use glam::{Mat3, Vec2, Vec3};

/// Anything closer to the camera than this is not projected.
pub const NEAR_PLANE: f32 = 0.01;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Focal scale for a field of view given in degrees: `1 / tan(fov / 2)`.
pub fn fov_constant_from_degrees(fov: f32) -> f32 {
    1.0 / (to_radians(fov) * 0.5).tan()
}

/// Rotate `v` about one of the world axes (right handed).
pub fn rotate_around_axis(v: Vec3, axis: Axis, angle_rad: f32) -> Vec3 {
    let rot = match axis {
        Axis::X => Mat3::from_rotation_x(angle_rad),
        Axis::Y => Mat3::from_rotation_y(angle_rad),
        Axis::Z => Mat3::from_rotation_z(angle_rad),
    };
    rot * v
}

pub fn translate(v: Vec3, offset: Vec3) -> Vec3 {
    v + offset
}

/// Perspective divide into normalized device coordinates.
///
/// Returns `None` for points on or behind the near plane (and for any
/// non-finite result), callers drop whatever primitive the point belongs to.
pub fn project_to_screen(v: Vec3, fov_const: f32) -> Option<Vec2> {
    if !(v.z >= NEAR_PLANE) {
        return None;
    }
    let projected = Vec2::new(v.x * fov_const / v.z, v.y * fov_const / v.z);
    projected.is_finite().then_some(projected)
}

/// Map NDC onto a `width` x `height` cell grid.
///
/// The origin lands in the middle of the grid and +y points up on screen.
/// Both axes share the vertical scale so geometry keeps its proportions,
/// x is stretched by [`CELL_ASPECT`] to make up for tall cells.
pub fn ndc_to_cell(ndc: Vec2, width: usize, height: usize) -> Vec2 {
    let half_w = width as f32 * 0.5;
    let half_h = height as f32 * 0.5;
    Vec2::new(
        half_w + ndc.x * half_h * CELL_ASPECT,
        half_h - ndc.y * half_h,
    )
}
