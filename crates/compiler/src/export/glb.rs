//! Binary glTF 2.0 export of a scene document.

use std::collections::HashMap;

use glam::{EulerRot, Quat};
use shared::scene::{SceneDocument, GENERATOR_NAME};

use crate::error::GeneResult;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// glTF component types
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Color used when a material carries no parsable hex color
const FALLBACK_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Parse `#RRGGBB` into linear 0..1 components
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Build a complete GLB (binary glTF) file from a scene document.
///
/// Node tree: root -> one node per layer (extras carry `toggleable`) -> one
/// node per mesh. An empty document yields an empty vector.
pub fn build_glb(doc: &SceneDocument) -> GeneResult<Vec<u8>> {
    if doc.geometries.is_empty() {
        return Ok(Vec::new());
    }

    // ── Phase 1: Build binary buffer ─────────────────────────
    let mut bin_data: Vec<u8> = Vec::new();
    let mut buffer_views = Vec::new();
    let mut accessors = Vec::new();
    // geometry uuid -> (position accessor, index accessor)
    let mut geometry_accessors: HashMap<&str, (usize, usize)> = HashMap::new();

    for geometry in &doc.geometries {
        let positions = &geometry.data.attributes.position.array;
        let indices = &geometry.data.index.array;
        let vertex_count = geometry.vertex_count();
        if vertex_count == 0 || indices.is_empty() {
            continue;
        }

        let mut pos_min = [f32::MAX; 3];
        let mut pos_max = [f32::MIN; 3];
        for p in positions.chunks_exact(3) {
            for axis in 0..3 {
                pos_min[axis] = pos_min[axis].min(p[axis]);
                pos_max[axis] = pos_max[axis].max(p[axis]);
            }
        }

        // Positions
        let pos_offset = bin_data.len();
        bin_data.extend_from_slice(&floats_to_bytes(positions));
        let pos_length = bin_data.len() - pos_offset;

        // Indices
        let idx_offset = bin_data.len();
        bin_data.extend_from_slice(&u32s_to_bytes(indices));
        let idx_length = bin_data.len() - idx_offset;

        // Pad to 4-byte alignment
        while bin_data.len() % 4 != 0 {
            bin_data.push(0);
        }

        let bv_base = buffer_views.len();
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": pos_offset,
            "byteLength": pos_length,
            "target": ARRAY_BUFFER
        }));
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": idx_offset,
            "byteLength": idx_length,
            "target": ELEMENT_ARRAY_BUFFER
        }));

        let acc_base = accessors.len();
        accessors.push(serde_json::json!({
            "bufferView": bv_base,
            "byteOffset": 0,
            "componentType": FLOAT,
            "count": vertex_count,
            "type": "VEC3",
            "min": pos_min,
            "max": pos_max
        }));
        accessors.push(serde_json::json!({
            "bufferView": bv_base + 1,
            "byteOffset": 0,
            "componentType": UNSIGNED_INT,
            "count": indices.len(),
            "type": "SCALAR"
        }));

        geometry_accessors.insert(geometry.uuid.as_str(), (acc_base, acc_base + 1));
    }

    if geometry_accessors.is_empty() {
        return Ok(Vec::new());
    }

    // ── Phase 2: Build glTF JSON ─────────────────────────────
    let material_index: HashMap<&str, usize> = doc
        .materials
        .iter()
        .enumerate()
        .map(|(i, m)| (m.uuid.as_str(), i))
        .collect();

    let materials: Vec<_> = doc
        .materials
        .iter()
        .map(|m| {
            let [r, g, b] = parse_hex_color(&m.color).unwrap_or(FALLBACK_COLOR);
            let alpha_mode = if m.transparent { "BLEND" } else { "OPAQUE" };
            serde_json::json!({
                "name": m.name,
                "pbrMetallicRoughness": {
                    "baseColorFactor": [r, g, b, m.opacity],
                    "metallicFactor": m.metalness,
                    "roughnessFactor": m.roughness
                },
                "alphaMode": alpha_mode
            })
        })
        .collect();

    // Node 0 is the root; layer and mesh nodes follow
    let mut nodes = vec![serde_json::Value::Null];
    let mut gltf_meshes = Vec::new();
    let mut layer_nodes = Vec::new();

    for group in doc.layer_groups() {
        let mut children = Vec::new();
        for mesh in &group.children {
            let Some(&(pos_acc, idx_acc)) = geometry_accessors.get(mesh.geometry.as_str()) else {
                tracing::warn!("Mesh {} references unknown geometry {}", mesh.name, mesh.geometry);
                continue;
            };

            let mut primitive = serde_json::json!({
                "attributes": { "POSITION": pos_acc },
                "indices": idx_acc
            });
            if let Some(&mat) = material_index.get(mesh.material.as_str()) {
                primitive["material"] = serde_json::json!(mat);
            }
            gltf_meshes.push(serde_json::json!({
                "name": mesh.name,
                "primitives": [primitive]
            }));

            let [x, y, z] = mesh.transform.position.map(|v| v as f32);
            let [rx, ry, rz] = mesh.transform.rotation.map(|v| v as f32);
            let rotation = Quat::from_euler(EulerRot::XYZ, rx, ry, rz);

            children.push(nodes.len());
            nodes.push(serde_json::json!({
                "name": mesh.name,
                "mesh": gltf_meshes.len() - 1,
                "translation": [x, y, z],
                "rotation": rotation.to_array()
            }));
        }

        layer_nodes.push(nodes.len());
        nodes.push(serde_json::json!({
            "name": group.name,
            "children": children,
            "extras": {
                "layer": group.user_data.layer,
                "toggleable": group.toggleable()
            }
        }));
    }

    nodes[0] = serde_json::json!({
        "name": doc.object.name,
        "children": layer_nodes,
        "extras": {
            "objectType": doc.metadata.object_type,
            "anatomical": doc.metadata.anatomical
        }
    });

    let gltf_json = serde_json::json!({
        "asset": {
            "version": "2.0",
            "generator": GENERATOR_NAME
        },
        "scene": 0,
        "scenes": [{
            "name": doc.object.name,
            "nodes": [0]
        }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{
            "byteLength": bin_data.len()
        }],
        "materials": materials
    });

    let mut json_bytes = serde_json::to_vec(&gltf_json)?;

    // JSON chunk is padded with spaces, BIN with zeros
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    // ── Phase 3: Assemble GLB ────────────────────────────────
    let json_chunk_length = json_bytes.len() as u32;
    let bin_chunk_length = bin_data.len() as u32;

    let total_length: u32 = 12 // header
        + 8 + json_chunk_length  // JSON chunk header + data
        + 8 + bin_chunk_length; // BIN chunk header + data

    let mut glb = Vec::with_capacity(total_length as usize);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total_length.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&json_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    // BIN chunk
    glb.extend_from_slice(&bin_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
    glb.extend_from_slice(&bin_data);

    tracing::debug!(
        "Built GLB for {}: {} meshes, {} bytes",
        doc.object.name,
        gltf_meshes.len(),
        glb.len()
    );

    Ok(glb)
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    data.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse_object;
    use crate::export::export_scene;
    use crate::fixtures;
    use crate::settings::CompilerSettings;

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    /// Split a GLB into its parsed JSON chunk and the BIN chunk length
    fn unpack(glb: &[u8]) -> (serde_json::Value, usize) {
        let json_len = read_u32(glb, 12) as usize;
        let json: serde_json::Value = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();
        let bin_len = read_u32(glb, 20 + json_len) as usize;
        (json, bin_len)
    }

    fn chair_glb() -> Vec<u8> {
        let obj = parse_object(fixtures::CHAIR_SOURCE).unwrap().object;
        build_glb(&export_scene(&obj, &CompilerSettings::default())).unwrap()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("000000"), Some([0.0, 0.0, 0.0]));
        let c = parse_hex_color("#8B4513").unwrap();
        assert!((c[0] - 139.0 / 255.0).abs() < 1e-6);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_glb_header() {
        let glb = chair_glb();
        assert_eq!(read_u32(&glb, 0), GLB_MAGIC);
        assert_eq!(read_u32(&glb, 4), GLB_VERSION);
        assert_eq!(read_u32(&glb, 8) as usize, glb.len());
        assert_eq!(read_u32(&glb, 16), CHUNK_TYPE_JSON);
        assert_eq!(glb.len() % 4, 0);
    }

    #[test]
    fn test_glb_node_hierarchy() {
        let (json, bin_len) = unpack(&chair_glb());
        assert!(bin_len > 0);
        assert_eq!(json["buffers"][0]["byteLength"].as_u64().unwrap() as usize, bin_len);

        let nodes = json["nodes"].as_array().unwrap();
        let root = &nodes[0];
        assert_eq!(root["name"], "CHAIR");
        let layers = root["children"].as_array().unwrap();
        assert_eq!(layers.len(), 3);

        let seat = &nodes[layers[0].as_u64().unwrap() as usize];
        assert_eq!(seat["name"], "seat");
        assert_eq!(seat["extras"]["toggleable"], false);
        let mesh_node = &nodes[seat["children"][0].as_u64().unwrap() as usize];
        assert!((mesh_node["translation"][0].as_f64().unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(mesh_node["rotation"][3].as_f64().unwrap(), 1.0);
    }

    #[test]
    fn test_glb_meshes_and_materials() {
        let (json, _) = unpack(&chair_glb());
        let meshes = json["meshes"].as_array().unwrap();
        let materials = json["materials"].as_array().unwrap();
        assert_eq!(meshes.len(), materials.len());
        assert_eq!(json["accessors"].as_array().unwrap().len(), 2 * meshes.len());
        assert_eq!(materials[0]["alphaMode"], "OPAQUE");
    }

    #[test]
    fn test_glb_transparent_material_blends() {
        let obj = parse_object("LAMP > shade > sphere glass").unwrap().object;
        let glb = build_glb(&export_scene(&obj, &CompilerSettings::default())).unwrap();
        let (json, _) = unpack(&glb);
        let material = &json["materials"][0];
        assert_eq!(material["alphaMode"], "BLEND");
        let alpha = material["pbrMetallicRoughness"]["baseColorFactor"][3].as_f64().unwrap();
        assert!((alpha - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_glb_anatomical_layers_toggleable() {
        let obj = parse_object(fixtures::ARM_SOURCE).unwrap().object;
        let glb = build_glb(&export_scene(&obj, &CompilerSettings::default())).unwrap();
        let (json, _) = unpack(&glb);
        let nodes = json["nodes"].as_array().unwrap();
        for layer in nodes[0]["children"].as_array().unwrap() {
            let node = &nodes[layer.as_u64().unwrap() as usize];
            assert_eq!(node["extras"]["toggleable"], true);
        }
    }

    #[test]
    fn test_empty_document_gives_empty_glb() {
        let obj = shared::ParsedObject::new("EMPTY", false);
        let doc = export_scene(&obj, &CompilerSettings::default());
        assert!(build_glb(&doc).unwrap().is_empty());
    }
}
