//! Command-line arguments of `genec`.

use std::path::PathBuf;

use crate::error::{GeneError, GeneResult};
use crate::settings::CompilerSettings;

pub const USAGE: &str = "\
Usage: genec [OPTIONS] <INPUT|->

Compile GENE object descriptions into 3D scene documents.

Options:
  --format <json|vls|glb|summary>  Output format (default: json)
  --out <PATH>                     Write output to PATH instead of stdout
  --seed <N>                       Base seed for organic shapes
  --settings <PATH>                Load settings from PATH
  --sequential                     Generate geometry on one thread
  --compact                        Compact JSON output
  --help                           Show this message

Logging is controlled by RUST_LOG (default: genec=info,gene_lib=info).";

/// What `genec` should emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Scene document(s) as JSON
    #[default]
    Json,
    /// Compact VLS line per object
    Vls,
    /// Binary glTF per object
    Glb,
    /// Human-readable overview
    Summary,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "vls" => Some(OutputFormat::Vls),
            "glb" => Some(OutputFormat::Glb),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Where source text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub input: Option<Input>,
    pub format: OutputFormat,
    pub out: Option<PathBuf>,
    pub seed: Option<u64>,
    pub settings: Option<PathBuf>,
    pub sequential: bool,
    pub compact: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    pub fn parse<I, S>(args: I) -> GeneResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut parsed = CliArgs::default();
        let mut i = 0;

        while i < args.len() {
            let arg = args[i].as_str();
            let mut value = |flag: &str| -> GeneResult<String> {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| GeneError::MissingValue(flag.to_string()))
            };

            match arg {
                "--help" | "-h" => parsed.help = true,
                "--sequential" => parsed.sequential = true,
                "--compact" => parsed.compact = true,
                "--format" => {
                    let name = value(arg)?;
                    parsed.format = OutputFormat::from_name(&name).ok_or_else(|| {
                        GeneError::InvalidValue {
                            flag: arg.to_string(),
                            value: name.clone(),
                        }
                    })?;
                }
                "--out" => parsed.out = Some(PathBuf::from(value(arg)?)),
                "--settings" => parsed.settings = Some(PathBuf::from(value(arg)?)),
                "--seed" => {
                    let raw = value(arg)?;
                    let seed = raw.parse::<u64>().map_err(|_| GeneError::InvalidValue {
                        flag: arg.to_string(),
                        value: raw.clone(),
                    })?;
                    parsed.seed = Some(seed);
                }
                "-" if parsed.input.is_none() => parsed.input = Some(Input::Stdin),
                _ if arg.starts_with("--") => {
                    return Err(GeneError::UnknownArgument(arg.to_string()));
                }
                _ if parsed.input.is_none() => {
                    parsed.input = Some(Input::File(PathBuf::from(arg)));
                }
                _ => return Err(GeneError::UnknownArgument(arg.to_string())),
            }
            i += 1;
        }

        if !parsed.help {
            if parsed.input.is_none() {
                return Err(GeneError::MissingInput);
            }
            if parsed.format == OutputFormat::Glb && parsed.out.is_none() {
                return Err(GeneError::GlbRequiresOutput);
            }
        }

        Ok(parsed)
    }

    /// Apply command-line overrides on top of loaded settings
    pub fn apply_to(&self, settings: &mut CompilerSettings) {
        if let Some(seed) = self.seed {
            settings.geometry.seed = seed;
        }
        if self.sequential {
            settings.export.parallel = false;
        }
        if self.compact {
            settings.export.pretty = false;
        }
    }
}
