pub mod color;
pub mod transform;

pub use color::Color;
pub use transform::{
    fov_constant_from_degrees, ndc_to_cell, project_to_screen, rotate_around_axis, to_degrees,
    to_radians, translate, Axis,
};
