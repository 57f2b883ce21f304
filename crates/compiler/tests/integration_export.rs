//! Integration tests for the exporters and output rendering.

use gene_lib::export::{build_glb, export_vls};
use gene_lib::fixtures::*;
use gene_lib::output::{emit, render_json};
use gene_lib::cli::OutputFormat;
use gene_lib::{compile_source, parse_object, CompilerSettings};
use shared::scene::SceneDocument;

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("genec-it-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_json_document_roundtrip() {
    let c = compile_source(ARM_SOURCE, &CompilerSettings::default());
    let json = render_json(&c, true).unwrap();
    let doc: SceneDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, c.objects[0].scene);
}

#[test]
fn test_json_uses_renderer_field_names() {
    let c = compile_source(CHAIR_SOURCE, &CompilerSettings::default());
    let json: serde_json::Value = serde_json::from_str(&render_json(&c, false).unwrap()).unwrap();
    assert_eq!(json["metadata"]["version"], 4.5);
    assert_eq!(json["metadata"]["generator"], "GENE Compiler");
    assert_eq!(json["geometries"][0]["type"], "BufferGeometry");
    assert_eq!(json["geometries"][0]["data"]["attributes"]["position"]["itemSize"], 3);
    assert_eq!(json["materials"][0]["type"], "MeshStandardMaterial");
    assert_eq!(json["object"]["children"][0]["userData"]["layer"], "seat");
}

#[test]
fn test_repeated_object_type_gets_unique_ids() {
    let c = compile_source(MIXED_SOURCE, &CompilerSettings::default());
    let types: Vec<_> = c.objects.iter().map(|o| o.parsed.object_type.as_str()).collect();
    assert_eq!(types, vec!["CHAIR", "LAMP", "CHAIR"]);

    let mut ids = std::collections::HashSet::new();
    for obj in &c.objects {
        let geometry_ids = obj.scene.geometries.iter().map(|g| &g.uuid);
        let material_ids = obj.scene.materials.iter().map(|m| &m.uuid);
        for uuid in geometry_ids.chain(material_ids) {
            assert!(ids.insert(uuid.clone()), "duplicate id {uuid}");
        }
    }
}

#[test]
fn test_vls_for_arm() {
    let obj = parse_object(ARM_SOURCE).unwrap().object;
    let vls = export_vls(&obj);
    assert!(vls.starts_with("HUMAN_BODY:/skeletal:A0B-3C0.A0B-2C0.A0B-2C0./muscular:"));
    assert_eq!(vls.matches('.').count(), 8);
    assert_eq!(vls.matches('/').count(), 5);
}

#[test]
fn test_glb_per_object_files() {
    let dir = temp_dir("glb");
    let out = dir.join("scene.glb");
    let c = compile_source(MIXED_SOURCE, &CompilerSettings::default());
    emit(&c, OutputFormat::Glb, Some(out.as_path()), true).unwrap();

    for n in 1..=3 {
        let path = dir.join(format!("scene-{n}.glb"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
    }
    assert!(!out.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_glb_single_object_uses_out_path() {
    let dir = temp_dir("glb-single");
    let out = dir.join("arm.glb");
    let c = compile_source(ARM_SOURCE, &CompilerSettings::default());
    emit(&c, OutputFormat::Glb, Some(out.as_path()), true).unwrap();
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(bytes, build_glb(&c.objects[0].scene).unwrap());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_json_written_to_file() {
    let dir = temp_dir("json");
    let out = dir.join("chair.json");
    let c = compile_source(CHAIR_SOURCE, &CompilerSettings::default());
    emit(&c, OutputFormat::Json, Some(out.as_path()), false).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    let doc: SceneDocument = serde_json::from_str(text.trim_end()).unwrap();
    assert_eq!(doc.metadata.object_type, "CHAIR");
    let _ = std::fs::remove_dir_all(&dir);
}
