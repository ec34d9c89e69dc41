use glam::{Vec2, Vec3};
use log::trace;

use super::{Scene, SceneDescriptor, SceneFlags};
use crate::core::transform::{
    fov_constant_from_degrees, ndc_to_cell, project_to_screen, rotate_around_axis, to_radians,
    translate, Axis,
};
use crate::pipeline::{draw_line, Buffer};

pub const DESCRIPTOR: SceneDescriptor = SceneDescriptor {
    name: "cube",
    flags: SceneFlags::NOP,
    create: create_scene,
};

pub const FOV_DEGREES: f32 = 60.0;
pub const STEP_DEGREES: i64 = 10;
pub const GLYPH: char = '.';
/// Pushes the cube away from the camera along the depth axis.
pub const OFFSET: Vec3 = Vec3::new(0.0, 0.0, 1.1);

const VERTEX_COUNT: usize = 8;

// order:
//   0 - 1
//  /.  /.
// 2 - 3 .
// . . . .
// . 4 - 5
//  /  ./
// 6 - 7
const CORNERS: [Vec3; VERTEX_COUNT] = [
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
];

#[rustfmt::skip]
pub const ADJACENCY: [[bool; VERTEX_COUNT]; VERTEX_COUNT] = {
    const O: bool = false;
    const I: bool = true;
    [
        [O, I, I, O, I, O, O, O], // 0: 1, 2, 4
        [I, O, O, I, O, I, O, O], // 1: 0, 3, 5
        [I, O, O, I, O, O, I, O], // 2: 0, 3, 6
        [O, I, I, O, O, O, O, I], // 3: 1, 2, 7
        [I, O, O, O, O, I, I, O], // 4: 0, 5, 6
        [O, I, O, O, I, O, O, I], // 5: 1, 4, 7
        [O, O, I, O, I, O, O, I], // 6: 2, 4, 7
        [O, O, O, I, O, I, I, O], // 7: 3, 5, 6
    ]
};

fn create_scene() -> Box<dyn Scene> {
    Box::new(CubeScene::new())
}

/// Result of one depth first walk over the cube's edge graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Vertices in the order they were first marked visited.
    pub order: Vec<usize>,
    /// Each undirected edge once, as (from, to) in discovery order.
    pub edges: Vec<(usize, usize)>,
}

/// A unit cube centred on the origin, spinning about the y axis.
#[derive(Debug, Clone)]
pub struct CubeScene {
    angle_deg: i64,
    vertices: [Vec3; VERTEX_COUNT],
    stack: Vec<usize>,
    visited: [bool; VERTEX_COUNT],
    traversal: Traversal,
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeScene {
    pub fn new() -> Self {
        let centre = Vec3::splat(-0.5);
        Self {
            angle_deg: 0,
            vertices: CORNERS.map(|c| translate(c, centre)),
            stack: Vec::with_capacity(2 * VERTEX_COUNT),
            visited: [false; VERTEX_COUNT],
            traversal: Traversal::default(),
        }
    }

    pub fn angle_deg(&self) -> i64 {
        self.angle_deg
    }

    pub fn vertices(&self) -> &[Vec3; VERTEX_COUNT] {
        &self.vertices
    }

    /// Walk the adjacency matrix from vertex 0 with an explicit stack.
    ///
    /// A vertex is marked when popped and only unvisited neighbours produce
    /// edges, so with a symmetric matrix no edge comes out twice.
    pub fn traverse(&mut self) -> &Traversal {
        self.stack.clear();
        self.visited = [false; VERTEX_COUNT];
        self.traversal.order.clear();
        self.traversal.edges.clear();

        self.stack.push(0);
        while let Some(current) = self.stack.pop() {
            if !self.visited[current] {
                self.visited[current] = true;
                self.traversal.order.push(current);
            }
            for next in 0..VERTEX_COUNT {
                if !ADJACENCY[current][next] || self.visited[next] {
                    continue;
                }
                self.traversal.edges.push((current, next));
                self.stack.push(next);
            }
        }
        &self.traversal
    }

    /// Rotate then push away from the camera.
    fn moved(&self, index: usize, angle_rad: f32) -> Vec3 {
        let rotated = rotate_around_axis(self.vertices[index], Axis::Y, angle_rad);
        translate(rotated, OFFSET)
    }

    /// NDC position of every vertex at `angle_deg`, `None` where the vertex
    /// sits behind the near plane.
    pub fn projected_vertices(&self, angle_deg: i64) -> [Option<Vec2>; VERTEX_COUNT] {
        let angle_rad = to_radians(-angle_deg as f32);
        let fov_const = fov_constant_from_degrees(FOV_DEGREES);
        std::array::from_fn(|i| project_to_screen(self.moved(i, angle_rad), fov_const))
    }

    fn advance(&mut self) {
        self.angle_deg += STEP_DEGREES;
        if self.angle_deg >= 360 {
            self.angle_deg = 0;
        }
    }
}

impl Scene for CubeScene {
    fn update(&mut self, buf: &mut dyn Buffer) {
        let projected = self.projected_vertices(self.angle_deg);
        let (width, height) = (buf.width(), buf.height());

        let traversal = self.traverse();
        for &(from, to) in &traversal.edges {
            let (Some(a), Some(b)) = (projected[from], projected[to]) else {
                trace!("edge {from} -> {to} skipped, behind camera");
                continue;
            };
            trace!("edge {from} -> {to}: ({:.2}, {:.2}) -> ({:.2}, {:.2})", a.x, a.y, b.x, b.y);
            draw_line(buf, ndc_to_cell(a, width, height), ndc_to_cell(b, width, height), GLYPH);
        }

        self.advance();
    }
}
