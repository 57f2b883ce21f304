//! Latitude/longitude generators: sphere, blob, egg, droplet.

use std::f32::consts::PI;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shared::Shape;

use super::{Face, Geometry, MIN_SEGMENTS};

/// Stretch of the upper half of an egg along y
const EGG_STRETCH: f32 = 1.3;

/// UV grid of `(n+1)²` vertices, `θ = iπ/n` from the top pole, `φ = 2jπ/n`.
///
/// `point(θ, φ)` places each vertex. Poles and the seam are not welded.
fn uv_grid(kind: Shape, segments: u32, point: impl Fn(f32, f32) -> Vec3) -> Geometry {
    let n = segments.max(MIN_SEGMENTS);
    let stride = n + 1;

    let mut vertices = Vec::with_capacity((stride * stride) as usize);
    for i in 0..=n {
        let theta = i as f32 * PI / n as f32;
        for j in 0..=n {
            let phi = 2.0 * j as f32 * PI / n as f32;
            vertices.push(point(theta, phi));
        }
    }

    let mut faces = Vec::with_capacity((n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            let v1 = i * stride + j;
            let v3 = (i + 1) * stride + j + 1;
            faces.push(Face::Quad([v1, v1 + 1, v3, v3 - 1]));
        }
    }

    Geometry {
        kind,
        vertices,
        faces,
    }
}

fn sphere_point(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.cos(),
        radius * theta.sin() * phi.sin(),
    )
}

/// UV sphere centered on the origin
pub fn generate_sphere(radius: f32, segments: u32) -> Geometry {
    uv_grid(Shape::Sphere, segments, |theta, phi| {
        sphere_point(radius, theta, phi)
    })
}

/// Sphere of diameter `size` with every vertex offset by up to
/// `±jitter × size` per axis. The same seed always yields the same blob.
pub fn generate_blob(size: f32, segments: u32, jitter: f32, seed: u64) -> Geometry {
    let mut geometry = generate_sphere(size * 0.5, segments);
    geometry.kind = Shape::Blob;

    let amplitude = (jitter * size).abs();
    if amplitude == 0.0 || !amplitude.is_finite() {
        return geometry;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for v in &mut geometry.vertices {
        *v += Vec3::new(
            rng.gen_range(-amplitude..=amplitude),
            rng.gen_range(-amplitude..=amplitude),
            rng.gen_range(-amplitude..=amplitude),
        );
    }
    geometry
}

/// Sphere whose upper half is stretched along y
pub fn generate_egg(radius: f32, segments: u32) -> Geometry {
    uv_grid(Shape::Egg, segments, |theta, phi| {
        let mut p = sphere_point(radius, theta, phi);
        if p.y > 0.0 {
            p.y *= EGG_STRETCH;
        }
        p
    })
}

/// Sphere whose rings taper to a point at the top pole
pub fn generate_droplet(radius: f32, segments: u32) -> Geometry {
    uv_grid(Shape::Droplet, segments, |theta, phi| {
        let ring = radius * theta.sin() * (theta * 0.5).sin();
        Vec3::new(ring * phi.cos(), radius * theta.cos(), ring * phi.sin())
    })
}
