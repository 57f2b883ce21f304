//! End-to-end compilation: source text -> parsed objects -> scene documents.

use shared::scene::SceneDocument;
use shared::ParsedObject;

use crate::aggregate::{aggregate_lines, split_blocks};
use crate::export::{export_block_scene, export_vls};
use crate::parser::Diagnostic;
use crate::settings::CompilerSettings;

/// One object taken through every stage
#[derive(Debug, Clone)]
pub struct CompiledObject {
    pub parsed: ParsedObject,
    pub scene: SceneDocument,
    pub vls: String,
}

/// Everything produced from one source text
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub objects: Vec<CompiledObject>,
    /// Dropped lines across all objects, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn statement_count(&self) -> usize {
        self.objects.iter().map(|o| o.parsed.statement_count()).sum()
    }
}

/// Compile every object in `source`
pub fn compile_source(source: &str, settings: &CompilerSettings) -> Compilation {
    let mut compilation = Compilation::default();

    for block in split_blocks(source) {
        let Some(aggregation) = aggregate_lines(&block.lines) else {
            continue;
        };
        compilation.diagnostics.extend(aggregation.diagnostics);

        let parsed = aggregation.object;
        let scene = export_block_scene(&parsed, compilation.objects.len(), settings);
        let vls = export_vls(&parsed);

        tracing::info!(
            "Compiled {}: {} layer(s), {} statement(s), {} geometries{}",
            parsed.object_type,
            parsed.layer_count,
            parsed.statement_count(),
            scene.geometries.len(),
            if parsed.is_layered_composite { " [anatomical]" } else { "" }
        );

        compilation.objects.push(CompiledObject { parsed, scene, vls });
    }

    compilation
}
