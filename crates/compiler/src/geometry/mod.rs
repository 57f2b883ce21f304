//! Mesh generators for GENE shapes.
//!
//! Every generator is a pure function of its [`ShapeParams`]. Faces keep the
//! arity the generator produced (triangles or quads); exporters triangulate.

mod primitives;
mod round;

use std::hash::{Hash, Hasher};

use glam::Vec3;
use shared::{Shape, Statement};
use siphasher::sip::SipHasher24;

use crate::settings::GeometrySettings;

pub use primitives::{generate_box, generate_cone, generate_cylinder, generate_pyramid};
pub use round::{generate_blob, generate_droplet, generate_egg, generate_sphere};

/// Fewest ring/latitude subdivisions a generator accepts; zero would divide by zero
pub const MIN_SEGMENTS: u32 = 1;

/// Polygon of a generated mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Tri([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Tri(idx) => idx,
            Face::Quad(idx) => idx,
        }
    }

    /// Append this face as triangles: `[a,b,c,d]` becomes `[a,b,c]` and `[a,c,d]`
    pub fn triangulate_into(&self, out: &mut Vec<u32>) {
        match *self {
            Face::Tri([a, b, c]) => out.extend_from_slice(&[a, b, c]),
            Face::Quad([a, b, c, d]) => out.extend_from_slice(&[a, b, c, a, c, d]),
        }
    }
}

/// Generated mesh: vertex positions plus indexed faces
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub kind: Shape,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn quad_count(&self) -> usize {
        self.faces.iter().filter(|f| matches!(f, Face::Quad(_))).count()
    }

    pub fn tri_count(&self) -> usize {
        self.faces.iter().filter(|f| matches!(f, Face::Tri(_))).count()
    }

    /// Flat `[x, y, z, x, y, z, ...]` position buffer
    pub fn positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Triangle index buffer
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            face.triangulate_into(&mut out);
        }
        out
    }

    /// Axis-aligned bounds `(min, max)`, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }
}

// ── Generator table ─────────────────────────────────────────

/// Inputs shared by all generators
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParams {
    /// Extent in meters
    pub size: Vec3,
    /// Explicit diameter for round cross-sections
    pub diameter: Option<f32>,
    /// Subdivisions for the shape family
    pub segments: u32,
    /// Blob offset bound as a fraction of `size.x`
    pub jitter: f32,
    pub seed: u64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        let defaults = GeometrySettings::default();
        Self {
            size: Vec3::ONE,
            diameter: None,
            segments: defaults.sphere_segments,
            jitter: defaults.blob_jitter as f32,
            seed: defaults.seed,
        }
    }
}

impl ShapeParams {
    /// Radius of a round cross-section: half the diameter, else half of `size.x`
    pub fn cross_radius(&self) -> f32 {
        self.diameter.unwrap_or(self.size.x) * 0.5
    }
}

pub type GeneratorFn = fn(&ShapeParams) -> Geometry;

fn box_from(p: &ShapeParams) -> Geometry {
    generate_box(p.size)
}

fn sphere_from(p: &ShapeParams) -> Geometry {
    generate_sphere(p.size.x * 0.5, p.segments)
}

fn cylinder_from(p: &ShapeParams) -> Geometry {
    generate_cylinder(p.size.y, p.cross_radius(), p.segments)
}

fn cone_from(p: &ShapeParams) -> Geometry {
    generate_cone(p.size.y, p.cross_radius(), p.segments)
}

fn pyramid_from(p: &ShapeParams) -> Geometry {
    generate_pyramid(p.size)
}

fn blob_from(p: &ShapeParams) -> Geometry {
    generate_blob(p.size.x, p.segments, p.jitter, p.seed)
}

fn droplet_from(p: &ShapeParams) -> Geometry {
    generate_droplet(p.size.x * 0.5, p.segments)
}

fn egg_from(p: &ShapeParams) -> Geometry {
    generate_egg(p.size.x * 0.5, p.segments)
}

const GENERATORS: &[(Shape, GeneratorFn)] = &[
    (Shape::Cube, box_from),
    (Shape::Sphere, sphere_from),
    (Shape::Cylinder, cylinder_from),
    (Shape::Cone, cone_from),
    (Shape::Pyramid, pyramid_from),
    (Shape::Blob, blob_from),
    (Shape::Droplet, droplet_from),
    (Shape::Egg, egg_from),
];

/// Generator registered for a shape, falling back to the box
pub fn generator(shape: Shape) -> GeneratorFn {
    GENERATORS
        .iter()
        .find(|(s, _)| *s == shape)
        .map(|(_, f)| *f)
        .unwrap_or(box_from)
}

/// Run the generator for `shape`
pub fn generate(shape: Shape, params: &ShapeParams) -> Geometry {
    let geometry = generator(shape)(params);
    tracing::debug!(
        "Generated {}: {} vertices, {} faces",
        shape.keyword(),
        geometry.vertex_count(),
        geometry.face_count()
    );
    geometry
}

/// Generator inputs for a statement under the given settings
pub fn params_for(statement: &Statement, settings: &GeometrySettings) -> ShapeParams {
    let segments = match statement.shape {
        Shape::Cylinder | Shape::Cone => settings.cylinder_segments,
        Shape::Blob => settings.blob_segments,
        _ => settings.sphere_segments,
    };
    ShapeParams {
        size: Vec3::new(
            statement.size[0] as f32,
            statement.size[1] as f32,
            statement.size[2] as f32,
        ),
        diameter: statement.diameter().map(|d| d as f32),
        segments,
        jitter: settings.blob_jitter as f32,
        seed: statement_seed(statement, settings.seed),
    }
}

/// Stable per-statement seed: SipHash of the statement content keyed by the base seed
pub fn statement_seed(statement: &Statement, base_seed: u64) -> u64 {
    let mut hasher = SipHasher24::new_with_keys(base_seed, 0);
    statement.object_type.hash(&mut hasher);
    statement.layer.hash(&mut hasher);
    statement.shape.keyword().hash(&mut hasher);
    for v in statement
        .position
        .iter()
        .chain(&statement.size)
        .chain(&statement.rotation)
    {
        hasher.write_u64(v.to_bits());
    }
    statement.material.name.hash(&mut hasher);
    statement.modifiers.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_gene_line;

    #[test]
    fn test_every_shape_has_generator() {
        for shape in Shape::all() {
            assert!(GENERATORS.iter().any(|(s, _)| s == shape), "{shape:?}");
        }
    }

    #[test]
    fn test_generate_tags_kind() {
        let params = ShapeParams::default();
        for shape in Shape::all() {
            let g = generate(*shape, &params);
            assert_eq!(g.kind, *shape);
            assert!(g.vertex_count() > 0);
        }
    }

    #[test]
    fn test_quad_triangulation() {
        let mut out = Vec::new();
        Face::Quad([0, 1, 2, 3]).triangulate_into(&mut out);
        assert_eq!(out, vec![0, 1, 2, 0, 2, 3]);
        Face::Tri([4, 5, 6]).triangulate_into(&mut out);
        assert_eq!(out.len(), 9);
    }

    #[test]
    fn test_triangle_indices_count() {
        let g = generate_box(Vec3::splat(2.0));
        assert_eq!(g.triangle_indices().len(), 6 * 2 * 3);
        assert_eq!(g.positions().len(), 8 * 3);
    }

    #[test]
    fn test_bounds() {
        let g = generate_box(Vec3::new(2.0, 4.0, 6.0));
        let (lo, hi) = g.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(hi, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_params_for_cylinder_uses_diameter() {
        let s = parse_gene_line("HUMAN_BODY > skeletal > humerus cylinder 35cm diameter 2cm")
            .unwrap();
        let p = params_for(&s, &GeometrySettings::default());
        assert_eq!(p.segments, 32);
        assert!((p.cross_radius() - 0.01).abs() < 1e-6);
        assert!((p.size.y - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_params_for_blob_uses_blob_segments() {
        let s = parse_gene_line("X > y > blob").unwrap();
        let p = params_for(&s, &GeometrySettings::default());
        assert_eq!(p.segments, 16);
    }

    #[test]
    fn test_statement_seed_is_stable() {
        let a = parse_gene_line("X > y > blob 10cm soft").unwrap();
        let b = parse_gene_line("X > y > blob 10cm soft").unwrap();
        let c = parse_gene_line("X > y > blob 12cm soft").unwrap();
        assert_eq!(statement_seed(&a, 7), statement_seed(&b, 7));
        assert_ne!(statement_seed(&a, 7), statement_seed(&c, 7));
        assert_ne!(statement_seed(&a, 7), statement_seed(&a, 8));
    }
}
