use glam::{Vec2, Vec3};

use super::{Scene, SceneDescriptor, SceneFlags};
use crate::core::transform::{
    fov_constant_from_degrees, ndc_to_cell, project_to_screen, rotate_around_axis, to_radians,
    translate, Axis,
};
use crate::core::Color;
use crate::pipeline::{draw_line_interpolated_color, Buffer};

pub const DESCRIPTOR: SceneDescriptor = SceneDescriptor {
    name: "star",
    flags: SceneFlags::NOP,
    create: create_scene,
};

const POINTS: usize = 5;
const OUTER_RADIUS: f32 = 1.0;
const INNER_RADIUS: f32 = 0.4;
const STEP_DEGREES: i64 = 5;
const DEPTH: f32 = 2.0;
const GLYPH: char = '*';

fn create_scene() -> Box<dyn Scene> {
    Box::new(StarScene::new())
}

/// Flat five pointed star spinning in the view plane, each edge shaded from
/// black at its outer tip to white at its inner notch.
#[derive(Debug, Clone)]
pub struct StarScene {
    angle_deg: i64,
    outline: [Vec3; 2 * POINTS],
}

impl Default for StarScene {
    fn default() -> Self {
        Self::new()
    }
}

impl StarScene {
    pub fn new() -> Self {
        let outline = std::array::from_fn(|i| {
            let radius = if i % 2 == 0 { OUTER_RADIUS } else { INNER_RADIUS };
            let theta = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / POINTS as f32;
            Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        });
        Self {
            angle_deg: 0,
            outline,
        }
    }

    pub fn angle_deg(&self) -> i64 {
        self.angle_deg
    }

    pub fn outline(&self) -> &[Vec3] {
        &self.outline
    }

    fn projected(&self) -> Vec<Option<Vec2>> {
        let angle_rad = to_radians(self.angle_deg as f32);
        let fov_const = fov_constant_from_degrees(60.0);
        self.outline
            .iter()
            .map(|&p| {
                let turned = rotate_around_axis(p, Axis::Z, angle_rad);
                project_to_screen(translate(turned, Vec3::new(0.0, 0.0, DEPTH)), fov_const)
            })
            .collect()
    }
}

impl Scene for StarScene {
    fn update(&mut self, buf: &mut dyn Buffer) {
        let (width, height) = (buf.width(), buf.height());
        let projected = self.projected();

        for i in 0..projected.len() {
            let j = (i + 1) % projected.len();
            let (Some(a), Some(b)) = (projected[i], projected[j]) else {
                continue;
            };
            // outer tips sit at even indices
            let colors = if i % 2 == 0 {
                [Color::BLACK, Color::WHITE]
            } else {
                [Color::WHITE, Color::BLACK]
            };
            draw_line_interpolated_color(
                buf,
                [ndc_to_cell(a, width, height), ndc_to_cell(b, width, height)],
                colors,
                GLYPH,
            );
        }

        self.angle_deg += STEP_DEGREES;
        if self.angle_deg >= 360 {
            self.angle_deg = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TermBuffer;

    #[test]
    fn outline_alternates_radii() {
        let star = StarScene::new();
        assert_eq!(star.outline().len(), 10);
        for (i, p) in star.outline().iter().enumerate() {
            let want = if i % 2 == 0 { OUTER_RADIUS } else { INNER_RADIUS };
            assert!((p.length() - want).abs() < 1e-4);
            assert_eq!(p.z, 0.0);
        }
        // first tip points straight up
        assert!(star.outline()[0].abs_diff_eq(Vec3::Y, 1e-4));
    }

    #[test]
    fn update_draws_star_glyphs_and_advances() {
        let mut star = StarScene::new();
        let mut buf = TermBuffer::new(80, 24);
        star.update(&mut buf);
        assert!(buf.filled() > 0);
        assert!(buf.rows().flatten().all(|&c| c == ' ' || c == GLYPH));
        assert_eq!(star.angle_deg(), 5);
    }

    #[test]
    fn angle_wraps_after_full_turn() {
        let mut star = StarScene::new();
        let mut buf = TermBuffer::new(20, 10);
        for _ in 0..72 {
            star.update(&mut buf);
        }
        assert_eq!(star.angle_deg(), 0);
    }
}
