//! Geometry validation utilities.
//!
//! `GeometryValidator` checks generated meshes for structural integrity:
//! in-range indices, degenerate faces, finite coordinates, bounding box size.

use glam::Vec3;
use shared::scene::GeometryResource;

use crate::geometry::Geometry;

/// Validator for generated `Geometry`.
pub struct GeometryValidator<'a> {
    geometry: &'a Geometry,
}

impl<'a> GeometryValidator<'a> {
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// Check that all face indices are within the vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.geometry.vertex_count() as u32;
        self.geometry
            .faces
            .iter()
            .all(|f| f.indices().iter().all(|&i| i < max_idx))
    }

    /// Check that no face repeats a vertex index.
    pub fn are_faces_distinct(&self) -> bool {
        self.geometry.faces.iter().all(|f| {
            let idx = f.indices();
            idx.iter()
                .enumerate()
                .all(|(n, i)| !idx[n + 1..].contains(i))
        })
    }

    pub fn are_coordinates_finite(&self) -> bool {
        self.geometry.vertices.iter().all(|v| v.is_finite())
    }

    /// Size of the bounding box, zero for an empty mesh.
    pub fn dimensions(&self) -> Vec3 {
        self.geometry
            .bounds()
            .map(|(lo, hi)| hi - lo)
            .unwrap_or(Vec3::ZERO)
    }

    /// Check that the bounding box size is approximately `expected`.
    pub fn assert_dimensions_approx(&self, expected: Vec3, tolerance: f32) -> bool {
        (self.dimensions() - expected).abs().max_element() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the geometry is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.geometry.vertices.is_empty() {
            errors.push("Geometry has no vertices".to_string());
        }

        if !self.are_indices_in_range() {
            let max_idx = self.geometry.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .geometry
                .faces
                .iter()
                .flat_map(|f| f.indices().iter().copied())
                .filter(|&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_faces_distinct() {
            errors.push("Some faces repeat a vertex index".to_string());
        }

        if !self.are_coordinates_finite() {
            errors.push("Some vertex coordinates are not finite".to_string());
        }

        errors
    }
}

/// Structural checks on an exported geometry resource.
/// An empty list means the resource is valid.
pub fn validate_resource(resource: &GeometryResource) -> Vec<String> {
    let mut errors = Vec::new();
    let positions = &resource.data.attributes.position.array;
    let indices = &resource.data.index.array;

    if positions.len() % 3 != 0 {
        errors.push(format!(
            "Position buffer length {} is not a multiple of 3",
            positions.len()
        ));
    }
    if indices.len() % 3 != 0 {
        errors.push(format!(
            "Index buffer length {} is not a multiple of 3",
            indices.len()
        ));
    }
    let max_idx = resource.vertex_count() as u32;
    if indices.iter().any(|&i| i >= max_idx) {
        errors.push(format!("Indices out of range (vertex_count={})", max_idx));
    }
    if positions.iter().any(|p| !p.is_finite()) {
        errors.push("Some positions are not finite".to_string());
    }

    errors
}
