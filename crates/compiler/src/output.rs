//! Rendering a compilation into the bytes `genec` writes.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use shared::scene::SceneDocument;

use crate::cli::OutputFormat;
use crate::error::{GeneError, GeneResult};
use crate::export::build_glb;
use crate::pipeline::Compilation;

/// Scene JSON: one document for a single object, an array otherwise
pub fn render_json(compilation: &Compilation, pretty: bool) -> GeneResult<String> {
    let docs: Vec<&SceneDocument> = compilation.objects.iter().map(|o| &o.scene).collect();
    let json = match (docs.as_slice(), pretty) {
        ([single], true) => serde_json::to_string_pretty(single)?,
        ([single], false) => serde_json::to_string(single)?,
        (_, true) => serde_json::to_string_pretty(&docs)?,
        (_, false) => serde_json::to_string(&docs)?,
    };
    Ok(json)
}

/// One VLS line per object
pub fn render_vls(compilation: &Compilation) -> String {
    compilation
        .objects
        .iter()
        .map(|o| o.vls.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable overview of every object and dropped line
pub fn render_summary(compilation: &Compilation) -> String {
    let mut out = String::new();
    for object in &compilation.objects {
        let parsed = &object.parsed;
        let _ = writeln!(
            out,
            "{} ({}, {:?} precision): {} layer(s), {} statement(s)",
            parsed.object_type,
            if parsed.is_layered_composite { "layered composite" } else { "object" },
            parsed.precision,
            parsed.layer_count,
            parsed.statement_count()
        );
        for group in object.scene.layer_groups() {
            let vertices: usize = group
                .children
                .iter()
                .filter_map(|m| object.scene.geometry(&m.geometry))
                .map(|g| g.vertex_count())
                .sum();
            let _ = writeln!(
                out,
                "  {:<16} {:>3} mesh(es) {:>7} vertices{}",
                group.name,
                group.children.len(),
                vertices,
                if group.toggleable() { "  [toggleable]" } else { "" }
            );
        }
    }
    if !compilation.diagnostics.is_empty() {
        let _ = writeln!(out, "{} line(s) dropped:", compilation.diagnostics.len());
        for d in &compilation.diagnostics {
            let _ = writeln!(out, "  {d}");
        }
    }
    out
}

/// GLB file path for object `index` of `count`: `<stem>-<n>.glb` when several
pub fn glb_output_path(out: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return out.to_path_buf();
    }
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());
    out.with_file_name(format!("{stem}-{}.glb", index + 1))
}

/// Write `bytes` to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> GeneResult<()> {
    match path {
        Some(path) => std::fs::write(path, bytes).map_err(|e| GeneError::io(path, e)),
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| GeneError::io("<stdout>", e))
        }
    }
}

/// Render and write a compilation in the requested format
pub fn emit(
    compilation: &Compilation,
    format: OutputFormat,
    out: Option<&Path>,
    pretty: bool,
) -> GeneResult<()> {
    match format {
        OutputFormat::Json => {
            let mut json = render_json(compilation, pretty)?;
            json.push('\n');
            write_output(out, json.as_bytes())
        }
        OutputFormat::Vls => {
            let mut vls = render_vls(compilation);
            vls.push('\n');
            write_output(out, vls.as_bytes())
        }
        OutputFormat::Summary => write_output(out, render_summary(compilation).as_bytes()),
        OutputFormat::Glb => {
            let out = out.ok_or(GeneError::GlbRequiresOutput)?;
            let count = compilation.objects.len();
            for (index, object) in compilation.objects.iter().enumerate() {
                let path = glb_output_path(out, index, count);
                let glb = build_glb(&object.scene)?;
                write_output(Some(&path), &glb)?;
                tracing::info!("Wrote {} ({} bytes)", path.display(), glb.len());
            }
            Ok(())
        }
    }
}
