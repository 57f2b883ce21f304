//! Scene document: the hierarchical output handed to a renderer.
//!
//! The layout follows the three.js JSON object format (version 4.5):
//! `geometries` and `materials` are flat resource lists keyed by uuid,
//! `object` is a node tree (root group -> layer groups -> meshes).

use serde::{Deserialize, Serialize};

use crate::{Precision, Transform};

pub const FORMAT_VERSION: f32 = 4.5;
pub const GENERATOR_NAME: &str = "GENE Compiler";

/// Document header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    pub version: f32,
    #[serde(rename = "type")]
    pub kind: String,
    pub generator: String,
    pub object_type: String,
    pub anatomical: bool,
    pub layer_count: usize,
    pub statement_count: usize,
    pub precision: Precision,
}

/// Flat vertex attribute buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferAttribute {
    pub item_size: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub array: Vec<f32>,
    #[serde(default)]
    pub normalized: bool,
}

/// Triangle index buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexBuffer {
    #[serde(rename = "type")]
    pub kind: String,
    pub array: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferAttributes {
    pub position: BufferAttribute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferGeometryData {
    pub attributes: BufferAttributes,
    pub index: IndexBuffer,
}

/// Geometry resource (one per statement)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryResource {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Shape keyword the geometry was generated from
    pub name: String,
    pub data: BufferGeometryData,
}

impl GeometryResource {
    pub fn vertex_count(&self) -> usize {
        self.data.attributes.position.array.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.data.index.array.len() / 3
    }
}

/// Material resource (one per statement, even when value-identical)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialResource {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub color: String,
    pub roughness: f32,
    pub metalness: f32,
    pub transparent: bool,
    pub opacity: f32,
}

/// Mesh node referencing one geometry and one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub geometry: String,
    pub material: String,
    #[serde(flatten)]
    pub transform: Transform,
}

/// Layer annotations carried in `userData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerUserData {
    pub layer: String,
    pub toggleable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

/// Named group of meshes belonging to one layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerGroup {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub user_data: LayerUserData,
    pub children: Vec<MeshNode>,
}

impl LayerGroup {
    pub fn toggleable(&self) -> bool {
        self.user_data.toggleable
    }
}

/// Root group holding every layer of the object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub children: Vec<LayerGroup>,
}

/// Complete scene for one parsed object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub metadata: SceneMetadata,
    pub geometries: Vec<GeometryResource>,
    pub materials: Vec<MaterialResource>,
    pub object: RootNode,
}

impl SceneDocument {
    /// Layer groups in discovery order
    pub fn layer_groups(&self) -> &[LayerGroup] {
        &self.object.children
    }

    /// Find a layer group by name
    pub fn layer(&self, name: &str) -> Option<&LayerGroup> {
        self.object.children.iter().find(|g| g.name == name)
    }

    /// All mesh nodes in layer order
    pub fn meshes(&self) -> impl Iterator<Item = &MeshNode> {
        self.object.children.iter().flat_map(|g| g.children.iter())
    }

    pub fn geometry(&self, uuid: &str) -> Option<&GeometryResource> {
        self.geometries.iter().find(|g| g.uuid == uuid)
    }

    pub fn material(&self, uuid: &str) -> Option<&MaterialResource> {
        self.materials.iter().find(|m| m.uuid == uuid)
    }
}
