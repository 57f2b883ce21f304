//! Flat-sided and ring-based generators: box, pyramid, cylinder, cone.

use std::f32::consts::TAU;

use glam::Vec3;
use shared::Shape;

use super::{Face, Geometry, MIN_SEGMENTS};

/// Axis-aligned box centered on the origin.
///
/// Corner order is `(-,-,-) (+,-,-) (+,+,-) (-,+,-) (-,-,+) (+,-,+) (+,+,+) (-,+,+)`;
/// faces are front, back, bottom, top, left, right.
pub fn generate_box(size: Vec3) -> Geometry {
    let h = size * 0.5;
    let vertices = vec![
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ];
    let faces = vec![
        Face::Quad([0, 1, 2, 3]),
        Face::Quad([4, 5, 6, 7]),
        Face::Quad([0, 1, 5, 4]),
        Face::Quad([2, 3, 7, 6]),
        Face::Quad([0, 3, 7, 4]),
        Face::Quad([1, 2, 6, 5]),
    ];
    Geometry {
        kind: Shape::Cube,
        vertices,
        faces,
    }
}

/// Square pyramid standing on the XZ plane with its apex at `size.y`
pub fn generate_pyramid(size: Vec3) -> Geometry {
    let hx = size.x * 0.5;
    let hz = size.z * 0.5;
    let vertices = vec![
        Vec3::new(-hx, 0.0, -hz),
        Vec3::new(hx, 0.0, -hz),
        Vec3::new(hx, 0.0, hz),
        Vec3::new(-hx, 0.0, hz),
        Vec3::new(0.0, size.y, 0.0),
    ];
    let faces = vec![
        Face::Quad([0, 3, 2, 1]),
        Face::Tri([0, 1, 4]),
        Face::Tri([1, 2, 4]),
        Face::Tri([2, 3, 4]),
        Face::Tri([3, 0, 4]),
    ];
    Geometry {
        kind: Shape::Pyramid,
        vertices,
        faces,
    }
}

/// Ring of `segments` points in the XZ plane at height `y`
fn ring_point(radius: f32, y: f32, i: u32, segments: u32) -> Vec3 {
    let angle = i as f32 * TAU / segments as f32;
    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Capped cylinder from `y = 0` to `y = height`.
///
/// Vertex 0 is the bottom center, vertex 1 the top center, then bottom and
/// top ring vertices interleaved. Faces: `n` bottom cap triangles, `n` top
/// cap triangles, `n` side quads.
pub fn generate_cylinder(height: f32, radius: f32, segments: u32) -> Geometry {
    let n = segments.max(MIN_SEGMENTS);

    let mut vertices = Vec::with_capacity(2 + 2 * n as usize);
    vertices.push(Vec3::ZERO);
    vertices.push(Vec3::new(0.0, height, 0.0));
    for i in 0..n {
        vertices.push(ring_point(radius, 0.0, i, n));
        vertices.push(ring_point(radius, height, i, n));
    }

    let bottom = |i: u32| 2 + 2 * (i % n);
    let top = |i: u32| 3 + 2 * (i % n);

    let mut faces = Vec::with_capacity(3 * n as usize);
    faces.extend((0..n).map(|i| Face::Tri([0, bottom(i), bottom(i + 1)])));
    faces.extend((0..n).map(|i| Face::Tri([1, top(i + 1), top(i)])));
    faces.extend((0..n).map(|i| Face::Quad([bottom(i), top(i), top(i + 1), bottom(i + 1)])));

    Geometry {
        kind: Shape::Cylinder,
        vertices,
        faces,
    }
}

/// Cone with its base on the XZ plane and apex at `height`.
///
/// Vertex 0 is the base center, vertex 1 the apex, then `n` ring vertices.
pub fn generate_cone(height: f32, radius: f32, segments: u32) -> Geometry {
    let n = segments.max(MIN_SEGMENTS);

    let mut vertices = Vec::with_capacity(2 + n as usize);
    vertices.push(Vec3::ZERO);
    vertices.push(Vec3::new(0.0, height, 0.0));
    vertices.extend((0..n).map(|i| ring_point(radius, 0.0, i, n)));

    let ring = |i: u32| 2 + (i % n);

    let mut faces = Vec::with_capacity(2 * n as usize);
    faces.extend((0..n).map(|i| Face::Tri([0, ring(i), ring(i + 1)])));
    faces.extend((0..n).map(|i| Face::Tri([1, ring(i + 1), ring(i)])));

    Geometry {
        kind: Shape::Cone,
        vertices,
        faces,
    }
}
