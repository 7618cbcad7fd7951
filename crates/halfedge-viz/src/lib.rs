//! Drawing helpers for the split viewer.

use halfedge_bsp::{BASE_COLOR, Plane3D, PlaneSide, TriMesh};
use macroquad::models::{Mesh, Vertex, draw_mesh};
use macroquad::prelude::*;
use nalgebra::Point3;

/// Direction the light comes from, for flat shading.
const LIGHT_DIRECTION: Vec3 = Vec3::new(0.4, 0.8, 0.45);
/// Share of the color kept on faces turned away from the light.
const AMBIENT: f32 = 0.35;
/// Triangles per `draw_mesh` call; keeps indices within `u16`.
const BATCH_TRIANGLES: usize = 20_000;
/// Lifts wireframe segments off their face to avoid z-fighting.
const EDGE_LIFT: f32 = 0.003;

/// Pushes geometry on either side of a plane away from it.
#[derive(Debug, Clone)]
pub struct Explode {
    plane: Plane3D,
    amount: f32,
}

impl Explode {
    pub fn new(plane: Plane3D) -> Self {
        Self { plane, amount: 0.0 }
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Eases the separation towards `target` over `dt` seconds.
    pub fn animate(&mut self, target: f32, dt: f32) {
        let blend = (dt * 6.0).min(1.0);
        self.amount += (target - self.amount) * blend;
    }

    pub fn side(&self, point: Vec3) -> PlaneSide {
        self.plane.classify_point(Point3::new(point.x, point.y, point.z))
    }

    /// Displacement for geometry on `side`; nothing moves on the plane.
    pub fn shift(&self, side: PlaneSide) -> Vec3 {
        let n = self.plane.normal();
        let normal = vec3(n.x, n.y, n.z) * self.amount;
        match side {
            PlaneSide::Front => normal,
            PlaneSide::Back => -normal,
            PlaneSide::OnPlane => Vec3::ZERO,
        }
    }
}

fn to_vec3(v: [f32; 3]) -> Vec3 {
    vec3(v[0], v[1], v[2])
}

fn to_color(rgb: [f32; 3], brightness: f32) -> Color {
    Color::new(rgb[0] * brightness, rgb[1] * brightness, rgb[2] * brightness, 1.0)
}

/// Draws a triangle export with per-face lambert shading.
///
/// Every triangle is moved as a whole by the side its centroid is on, so
/// front and back fragments separate cleanly.
pub fn draw_faces(faces: &TriMesh, explode: &Explode) {
    let light = LIGHT_DIRECTION.normalize();
    let mut vertices: Vec<Vertex> = Vec::with_capacity(faces.indices.len().min(BATCH_TRIANGLES * 3));

    for triangle in faces.indices.chunks_exact(3) {
        let corners = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let points = corners.map(|i| to_vec3(faces.positions[i]));
        let centroid = (points[0] + points[1] + points[2]) / 3.0;
        let shift = explode.shift(explode.side(centroid));

        for (i, point) in corners.into_iter().zip(points) {
            let normal = to_vec3(faces.normals[i]);
            let brightness = AMBIENT + (1.0 - AMBIENT) * normal.dot(light).max(0.0);
            let rgb = faces
                .colors
                .as_ref()
                .map_or(BASE_COLOR, |colors| colors[i]);
            vertices.push(Vertex::new2(point + shift, Vec2::ZERO, to_color(rgb, brightness)));
        }

        if vertices.len() >= BATCH_TRIANGLES * 3 {
            flush(&mut vertices);
        }
    }
    flush(&mut vertices);
}

fn flush(vertices: &mut Vec<Vertex>) {
    if vertices.is_empty() {
        return;
    }
    let indices = (0..vertices.len() as u16).collect();
    draw_mesh(&Mesh {
        vertices: std::mem::take(vertices),
        indices,
        texture: None,
    });
}

/// Draws a wireframe export as 3D lines.
///
/// Segments lying on the plane border fragments on both sides, so they are
/// drawn once with each half.
pub fn draw_edges(edges: &TriMesh, explode: &Explode) {
    for (k, segment) in edges.indices.chunks_exact(2).enumerate() {
        let (a, b) = (segment[0] as usize, segment[1] as usize);
        let lift = to_vec3(edges.normals[a]) * EDGE_LIFT;
        let from = to_vec3(edges.positions[a]) + lift;
        let to = to_vec3(edges.positions[b]) + lift;
        let color = edges
            .colors
            .as_ref()
            .map_or(WHITE, |colors| to_color(colors[2 * k], 1.0));

        match explode.side((from + to) / 2.0) {
            PlaneSide::OnPlane => {
                for side in [PlaneSide::Front, PlaneSide::Back] {
                    let shift = explode.shift(side);
                    draw_line_3d(from + shift, to + shift, color);
                }
            }
            side => {
                let shift = explode.shift(side);
                draw_line_3d(from + shift, to + shift, color);
            }
        }
    }
}

/// Camera circling a target, driven by the arrow keys and the wheel.
#[derive(Debug, Clone)]
pub struct Turntable {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target: Vec3,
}

impl Turntable {
    /// Radians per second while an arrow key is held.
    const TURN_RATE: f32 = 1.6;
    const PITCH_LIMIT: f32 = 1.4;

    pub fn new(distance: f32) -> Self {
        Self {
            yaw: 0.7,
            pitch: 0.45,
            distance,
            target: Vec3::ZERO,
        }
    }

    pub fn update(&mut self) {
        let turn = Self::TURN_RATE * get_frame_time();
        if is_key_down(KeyCode::Left) {
            self.yaw -= turn;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw += turn;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += turn;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= turn;
        }
        self.pitch = self.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);

        let wheel = mouse_wheel().1;
        if wheel != 0.0 {
            self.distance = (self.distance * (1.0 - 0.1 * wheel.signum())).clamp(2.0, 100.0);
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * vec3(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn camera(&self) -> Camera3D {
        Camera3D {
            position: self.eye(),
            target: self.target,
            up: Vec3::Y,
            ..Default::default()
        }
    }
}
