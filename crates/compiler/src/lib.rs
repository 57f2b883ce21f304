// Library crate: the GENE compiler stages, exposed for the `genec` binary and integration tests.

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod geometry;
pub mod measurement;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod settings;
pub mod validation;
pub mod vocabulary;

pub use aggregate::{parse_object, Aggregation};
pub use error::{GeneError, GeneResult};
pub use parser::{parse_gene_line, Diagnostic};
pub use pipeline::{compile_source, Compilation, CompiledObject};
pub use settings::CompilerSettings;
