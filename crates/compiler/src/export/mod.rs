//! Scene exporters: the renderer document, the compact VLS string and GLB.

pub mod glb;
pub mod vls;

use rayon::prelude::*;
use shared::scene::{
    BufferAttribute, BufferAttributes, BufferGeometryData, GeometryResource, IndexBuffer,
    LayerGroup, LayerUserData, MaterialResource, MeshNode, RootNode, SceneDocument, SceneMetadata,
    FORMAT_VERSION, GENERATOR_NAME,
};
use shared::{Material, ParsedObject, Statement, Transform};
use uuid::Uuid;

use crate::geometry::{self, Geometry};
use crate::settings::CompilerSettings;
use crate::vocabulary;

pub use glb::build_glb;
pub use vls::export_vls;

pub const DOCUMENT_KIND: &str = "Object";
pub const GROUP_KIND: &str = "Group";
pub const MESH_KIND: &str = "Mesh";
pub const GEOMETRY_KIND: &str = "BufferGeometry";
pub const MATERIAL_KIND: &str = "MeshStandardMaterial";

/// Highest vertex count that still fits 16-bit indices
const U16_INDEX_LIMIT: usize = u16::MAX as usize + 1;

/// Deterministic resource id for the `ordinal`-th resource of a kind in the
/// `block`-th object of a source
pub fn resource_uuid(object_type: &str, block: usize, kind: &str, ordinal: usize) -> String {
    let name = format!("gene/{block}/{object_type}/{kind}/{ordinal}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

/// Typed-array name for an index buffer over `vertex_count` vertices
pub fn index_array_kind(vertex_count: usize) -> &'static str {
    if vertex_count <= U16_INDEX_LIMIT {
        "Uint16Array"
    } else {
        "Uint32Array"
    }
}

fn geometry_resource(uuid: String, geometry: &Geometry) -> GeometryResource {
    GeometryResource {
        uuid,
        kind: GEOMETRY_KIND.to_string(),
        name: geometry.kind.keyword().to_string(),
        data: BufferGeometryData {
            attributes: BufferAttributes {
                position: BufferAttribute {
                    item_size: 3,
                    kind: "Float32Array".to_string(),
                    array: geometry.positions(),
                    normalized: false,
                },
            },
            index: IndexBuffer {
                kind: index_array_kind(geometry.vertex_count()).to_string(),
                array: geometry.triangle_indices(),
            },
        },
    }
}

fn material_resource(uuid: String, material: &Material) -> MaterialResource {
    MaterialResource {
        uuid,
        kind: MATERIAL_KIND.to_string(),
        name: material.name.clone(),
        color: material.color.clone(),
        roughness: material.roughness,
        metalness: material.metalness,
        transparent: material.is_transparent(),
        opacity: material.opacity(),
    }
}

fn layer_user_data(name: &str, toggleable: bool) -> LayerUserData {
    let known = vocabulary::layer_type(name);
    LayerUserData {
        layer: name.to_string(),
        toggleable,
        depth: known.map(|l| l.depth),
        purpose: known.and_then(|l| l.purpose).map(str::to_string),
        color: known.and_then(|l| l.color).map(str::to_string),
        opacity: known.and_then(|l| l.opacity),
    }
}

/// Generate one geometry per statement, in source order
fn generate_all(statements: &[&Statement], settings: &CompilerSettings) -> Vec<Geometry> {
    let run = |s: &&Statement| {
        geometry::generate(s.shape, &geometry::params_for(s, &settings.geometry))
    };
    if settings.export.parallel {
        statements.par_iter().map(run).collect()
    } else {
        statements.iter().map(run).collect()
    }
}

/// Build the scene document for a source holding a single object.
pub fn export_scene(object: &ParsedObject, settings: &CompilerSettings) -> SceneDocument {
    export_block_scene(object, 0, settings)
}

/// Build the scene document for the `block`-th object of a source.
///
/// Layers become groups in discovery order; each statement becomes a mesh
/// with its own geometry and material resource.
pub fn export_block_scene(
    object: &ParsedObject,
    block: usize,
    settings: &CompilerSettings,
) -> SceneDocument {
    let statements: Vec<&Statement> = object.statements().collect();
    let mut generated = generate_all(&statements, settings).into_iter();

    let mut geometries = Vec::with_capacity(statements.len());
    let mut materials = Vec::with_capacity(statements.len());
    let mut groups = Vec::with_capacity(object.layers.len());
    let mut ordinal = 0;

    for (layer, layer_statements) in &object.layers {
        let mut children = Vec::with_capacity(layer_statements.len());
        for (statement, geometry) in layer_statements.iter().zip(generated.by_ref()) {
            let geometry_id = resource_uuid(&object.object_type, block, "geometry", ordinal);
            let material_id = resource_uuid(&object.object_type, block, "material", ordinal);
            ordinal += 1;

            geometries.push(geometry_resource(geometry_id.clone(), &geometry));
            materials.push(material_resource(material_id.clone(), &statement.material));
            children.push(MeshNode {
                kind: MESH_KIND.to_string(),
                name: statement.label().to_string(),
                geometry: geometry_id,
                material: material_id,
                transform: Transform::at(statement.position, statement.rotation),
            });
        }

        groups.push(LayerGroup {
            kind: GROUP_KIND.to_string(),
            name: layer.clone(),
            user_data: layer_user_data(layer, object.is_layered_composite),
            children,
        });
    }

    tracing::debug!(
        "Exported {}: {} geometries, {} layer groups",
        object.object_type,
        geometries.len(),
        groups.len()
    );

    SceneDocument {
        metadata: SceneMetadata {
            version: FORMAT_VERSION,
            kind: DOCUMENT_KIND.to_string(),
            generator: GENERATOR_NAME.to_string(),
            object_type: object.object_type.clone(),
            anatomical: object.is_layered_composite,
            layer_count: object.layer_count,
            statement_count: statements.len(),
            precision: object.precision,
        },
        geometries,
        materials,
        object: RootNode {
            kind: GROUP_KIND.to_string(),
            name: object.object_type.clone(),
            children: groups,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse_object;
    use crate::fixtures;
    use std::collections::HashSet;

    fn arm() -> ParsedObject {
        parse_object(fixtures::ARM_SOURCE).unwrap().object
    }

    #[test]
    fn test_metadata_header() {
        let doc = export_scene(&arm(), &CompilerSettings::default());
        assert_eq!(doc.metadata.version, FORMAT_VERSION);
        assert_eq!(doc.metadata.kind, "Object");
        assert_eq!(doc.metadata.object_type, "HUMAN_BODY");
        assert!(doc.metadata.anatomical);
        assert_eq!(doc.metadata.layer_count, 5);
        assert_eq!(doc.metadata.statement_count, 8);
    }

    #[test]
    fn test_one_resource_pair_per_statement() {
        let doc = export_scene(&arm(), &CompilerSettings::default());
        assert_eq!(doc.geometries.len(), 8);
        assert_eq!(doc.materials.len(), 8);
        assert_eq!(doc.meshes().count(), 8);
        let ids: HashSet<_> = doc
            .geometries
            .iter()
            .map(|g| g.uuid.as_str())
            .chain(doc.materials.iter().map(|m| m.uuid.as_str()))
            .collect();
        assert_eq!(ids.len(), 16);
        for mesh in doc.meshes() {
            assert!(doc.geometry(&mesh.geometry).is_some());
            assert!(doc.material(&mesh.material).is_some());
        }
    }

    #[test]
    fn test_layer_groups_follow_discovery_order() {
        let doc = export_scene(&arm(), &CompilerSettings::default());
        let names: Vec<_> = doc.layer_groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["skeletal", "muscular", "vascular", "dermis", "epidermis"]
        );
        assert!(doc.layer_groups().iter().all(LayerGroup::toggleable));
        let skeletal = doc.layer("skeletal").unwrap();
        assert_eq!(skeletal.user_data.depth, Some(0));
        assert_eq!(skeletal.user_data.color.as_deref(), Some("#FFFEF0"));
        assert_eq!(skeletal.children.len(), 3);
    }

    #[test]
    fn test_plain_object_layers_not_toggleable() {
        let chair = parse_object(fixtures::CHAIR_SOURCE).unwrap().object;
        let doc = export_scene(&chair, &CompilerSettings::default());
        assert!(!doc.metadata.anatomical);
        assert!(doc.layer_groups().iter().all(|g| !g.toggleable()));
        let padding = doc.layer("padding").unwrap();
        assert_eq!(padding.user_data.purpose.as_deref(), Some("comfort"));
        assert!(doc.layer("seat").unwrap().user_data.depth.is_none());
    }

    #[test]
    fn test_mesh_transform_from_statement() {
        let chair = parse_object(fixtures::CHAIR_SOURCE).unwrap().object;
        let doc = export_scene(&chair, &CompilerSettings::default());
        let seat = &doc.layer("seat").unwrap().children[0];
        assert_eq!(seat.name, "surface");
        assert!((seat.transform.position[0] - 0.5).abs() < 1e-9);
        assert_eq!(seat.transform.scale, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_index_buffer_is_triangulated() {
        let doc = export_scene(&arm(), &CompilerSettings::default());
        for g in &doc.geometries {
            assert_eq!(g.data.index.array.len() % 3, 0);
            let max = g.vertex_count() as u32;
            assert!(g.data.index.array.iter().all(|&i| i < max));
            assert_eq!(g.data.index.kind, "Uint16Array");
        }
    }

    #[test]
    fn test_index_array_kind() {
        assert_eq!(index_array_kind(8), "Uint16Array");
        assert_eq!(index_array_kind(65_536), "Uint16Array");
        assert_eq!(index_array_kind(65_537), "Uint32Array");
    }

    #[test]
    fn test_transparent_material() {
        let obj = parse_object("LAMP > shade > cone glass").unwrap().object;
        let doc = export_scene(&obj, &CompilerSettings::default());
        let m = &doc.materials[0];
        assert!(m.transparent);
        assert!((m.opacity - 0.1).abs() < 1e-6);
        assert_eq!(doc.geometries[0].name, "cone");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut settings = CompilerSettings::default();
        let parallel = export_scene(&arm(), &settings);
        settings.export.parallel = false;
        let sequential = export_scene(&arm(), &settings);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_same_type_blocks_get_distinct_ids() {
        let settings = CompilerSettings::default();
        let chair = parse_object("CHAIR > seat > cube").unwrap().object;
        let first = export_block_scene(&chair, 0, &settings);
        let second = export_block_scene(&chair, 1, &settings);
        assert_eq!(first, export_scene(&chair, &settings));
        assert_ne!(first.geometries[0].uuid, second.geometries[0].uuid);
        assert_ne!(first.materials[0].uuid, second.materials[0].uuid);
        let mesh = second.meshes().next().unwrap();
        assert_eq!(mesh.geometry, second.geometries[0].uuid);
    }

    #[test]
    fn test_export_is_deterministic() {
        let settings = CompilerSettings::default();
        assert_eq!(export_scene(&arm(), &settings), export_scene(&arm(), &settings));
    }

    #[test]
    fn test_base_seed_changes_blobs() {
        let mut settings = CompilerSettings::default();
        let a = export_scene(&arm(), &settings);
        settings.geometry.seed = 99;
        let b = export_scene(&arm(), &settings);
        let blob = |doc: &SceneDocument| {
            doc.geometries
                .iter()
                .find(|g| g.name == "blob")
                .map(|g| g.data.attributes.position.array.clone())
        };
        assert!(blob(&a).is_some());
        assert_ne!(blob(&a), blob(&b));
    }
}
