//! GENE statement parser.
//!
//! One line has the form `OBJECT_TYPE > layer > commands...`, for example
//! `CHAIR > seat > surface forward 50cm cushion soft`. The command sequence
//! has no error state: every token lands in some field of the statement.

use std::collections::BTreeMap;

use shared::{MetaValue, Shape, Statement};
use thiserror::Error;

use crate::measurement::{is_measurement, parse_measurement};
use crate::vocabulary::{self, Direction, LAYER_SEPARATOR};

/// Why a line produced no statement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    #[error("expected 'OBJECT > layer > commands', found {found} segment(s)")]
    MissingSegments { found: usize },
}

/// Non-fatal report about a dropped source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the source text
    pub line: usize,
    pub text: String,
    pub issue: LineIssue,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.issue, self.text)
    }
}

/// Parse one line, reporting why it was dropped if it has too few segments
pub fn parse_statement(line: &str) -> Result<Statement, LineIssue> {
    let parts: Vec<&str> = line.split(LAYER_SEPARATOR).map(str::trim).collect();
    let [object_type, layer, commands, extra @ ..] = parts.as_slice() else {
        return Err(LineIssue::MissingSegments { found: parts.len() });
    };
    // Only the third segment carries commands
    if !extra.is_empty() {
        tracing::debug!("Ignoring {} trailing segment(s) in {:?}", extra.len(), line);
    }

    let mut statement = Statement {
        object_type: object_type.to_uppercase(),
        layer: layer.to_lowercase(),
        shape: Shape::default(),
        position: [0.0, 0.0, 0.0],
        size: [1.0, 1.0, 1.0],
        rotation: [0.0, 0.0, 0.0],
        material: vocabulary::default_material(),
        modifiers: Vec::new(),
        metadata: BTreeMap::new(),
    };

    let tokens: Vec<&str> = commands.split_whitespace().collect();
    let mut i = 0;
    while i < tokens.len() {
        i += apply_token(&mut statement, &tokens[i..]);
    }

    tracing::trace!(
        object = %statement.object_type,
        layer = %statement.layer,
        shape = statement.shape.keyword(),
        "parsed statement"
    );
    Ok(statement)
}

/// Parse one line; lines with fewer than three segments yield `None`
pub fn parse_gene_line(line: &str) -> Option<Statement> {
    parse_statement(line).ok()
}

/// Apply the first matching rule to `tokens[0]`, returning how many tokens it consumed.
///
/// Rule order is fixed: shape, direction, material, measurement, named
/// metadata key, modifier.
fn apply_token(statement: &mut Statement, tokens: &[&str]) -> usize {
    let cmd = tokens[0].to_lowercase();
    let next = tokens.get(1).copied();

    if let Some(shape) = Shape::from_keyword(&cmd) {
        statement.shape = shape;
        return 1;
    }

    if let Some(direction) = vocabulary::direction(&cmd) {
        return match direction {
            Direction::Vector(axis) => match next.filter(|t| is_measurement(t)) {
                Some(distance) => {
                    let meters = parse_measurement(distance);
                    statement.position = axis.map(|c| c * meters);
                    2
                }
                None => {
                    statement.position = axis;
                    1
                }
            },
            Direction::Motion(tag) => {
                statement.modifiers.push(tag.to_string());
                1
            }
        };
    }

    if let Some(material) = vocabulary::material(&cmd) {
        statement.material = material;
        return 1;
    }

    if is_measurement(&cmd) {
        let size = parse_measurement(&cmd);
        statement.size = [size, size, size];
        return 1;
    }

    if let Some(arg) = next {
        let entry = match cmd.as_str() {
            "diameter" => Some(("diameter", MetaValue::Length(parse_measurement(arg)))),
            "repeat" => Some((
                "repeat",
                arg.parse::<u32>()
                    .map(MetaValue::Count)
                    .unwrap_or_else(|_| MetaValue::Text(arg.to_string())),
            )),
            "attach" => Some(("attach_to", MetaValue::Reference(arg.to_string()))),
            _ => None,
        };
        if let Some((key, value)) = entry {
            statement.metadata.insert(key.to_string(), value);
            return 2;
        }
    }

    statement.modifiers.push(cmd);
    1
}
