//! Block aggregation: turns the lines of one object into a [`ParsedObject`].

use shared::{ParsedObject, Statement};

use crate::parser::{parse_statement, Diagnostic};
use crate::vocabulary::{self, ANATOMICAL_OBJECT_MARKERS, LAYER_SEPARATOR};

/// A statement-bearing source line (not blank, not a comment)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Trimmed line text
    pub text: &'a str,
}

/// Contiguous lines describing one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock<'a> {
    /// Upper-cased leading object type shared by the lines
    pub object_type: String,
    pub lines: Vec<SourceLine<'a>>,
}

/// Result of aggregating one block
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub object: ParsedObject,
    /// Lines that produced no statement
    pub diagnostics: Vec<Diagnostic>,
}

/// Decide whether an object is a layered (anatomical) composite.
///
/// True when the object type contains a marker such as `HUMAN_BODY`, or
/// when any layer name contains one of the anatomical layer keywords
/// (substring match, so `epidermis` also matches `dermis`).
pub fn is_layered_composite<'a>(
    object_type: &str,
    layer_names: impl IntoIterator<Item = &'a str>,
) -> bool {
    let object_type = object_type.to_uppercase();
    if ANATOMICAL_OBJECT_MARKERS
        .iter()
        .any(|marker| object_type.contains(marker))
    {
        return true;
    }
    layer_names.into_iter().any(|layer| {
        let layer = layer.to_lowercase();
        vocabulary::anatomical_keywords().any(|keyword| layer.contains(keyword))
    })
}

/// Non-blank, non-comment lines of a source text, trimmed and numbered
pub fn statement_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| SourceLine {
            number: i + 1,
            text: line.trim(),
        })
        .filter(|line| !line.text.is_empty() && !line.text.starts_with('#'))
}

/// Leading object type of a line, if it has a separator at all
fn leading_object_type(text: &str) -> Option<String> {
    let (head, _) = text.split_once(LAYER_SEPARATOR)?;
    Some(head.trim().to_uppercase())
}

/// Split a source holding several objects into contiguous blocks.
///
/// A new block starts whenever the leading object type changes. Lines with
/// no separator stay in the current block so they are reported when it is
/// aggregated.
pub fn split_blocks(source: &str) -> Vec<SourceBlock<'_>> {
    let mut blocks: Vec<SourceBlock<'_>> = Vec::new();

    for line in statement_lines(source) {
        let key = leading_object_type(line.text);
        match (blocks.last_mut(), key) {
            (Some(current), Some(key)) if current.object_type == key => {
                current.lines.push(line);
            }
            (Some(current), Some(key)) if current.object_type.is_empty() => {
                current.object_type = key;
                current.lines.push(line);
            }
            (Some(current), None) => current.lines.push(line),
            (_, key) => blocks.push(SourceBlock {
                object_type: key.unwrap_or_default(),
                lines: vec![line],
            }),
        }
    }

    blocks
}

/// Aggregate the lines of one object. Returns `None` when there are no lines.
pub fn aggregate_lines(lines: &[SourceLine<'_>]) -> Option<Aggregation> {
    let first = lines.first()?;

    let mut statements: Vec<Statement> = Vec::with_capacity(lines.len());
    let mut diagnostics = Vec::new();
    for line in lines {
        match parse_statement(line.text) {
            Ok(statement) => statements.push(statement),
            Err(issue) => {
                tracing::warn!("Dropped line {}: {issue}", line.number);
                diagnostics.push(Diagnostic {
                    line: line.number,
                    text: line.text.to_string(),
                    issue,
                });
            }
        }
    }

    let object_type = statements
        .first()
        .map(|s| s.object_type.clone())
        .or_else(|| leading_object_type(first.text))
        .unwrap_or_else(|| first.text.to_uppercase());

    let composite =
        is_layered_composite(&object_type, statements.iter().map(|s| s.layer.as_str()));

    let mut object = ParsedObject::new(object_type, composite);
    for statement in statements {
        object.push(statement);
    }

    tracing::debug!(
        "Aggregated {}: {} statement(s) in {} layer(s), composite={}",
        object.object_type,
        object.statement_count(),
        object.layer_count,
        object.is_layered_composite
    );

    Some(Aggregation {
        object,
        diagnostics,
    })
}

/// Parse a whole source text as a single object
pub fn parse_object(source: &str) -> Option<Aggregation> {
    let lines: Vec<SourceLine<'_>> = statement_lines(source).collect();
    aggregate_lines(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_arm_object() {
        let agg = parse_object(fixtures::ARM_SOURCE).unwrap();
        let obj = &agg.object;
        assert_eq!(obj.object_type, "HUMAN_BODY");
        assert!(obj.is_layered_composite);
        assert_eq!(obj.layer_count, 5);
        assert_eq!(obj.layer_count, obj.layers.len());
        assert_eq!(obj.statement_count(), 8);
        let names: Vec<_> = obj.layers.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["skeletal", "muscular", "vascular", "dermis", "epidermis"]
        );
        assert!(agg.diagnostics.is_empty());
    }

    #[test]
    fn test_layer_statements_keep_source_order() {
        let agg = parse_object(fixtures::ARM_SOURCE).unwrap();
        let skeletal: Vec<_> = agg.object.layers["skeletal"]
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        assert_eq!(skeletal, vec!["humerus", "radius", "ulna"]);
    }

    #[test]
    fn test_chair_is_not_composite() {
        let agg = parse_object(fixtures::CHAIR_SOURCE).unwrap();
        assert_eq!(agg.object.object_type, "CHAIR");
        assert!(!agg.object.is_layered_composite);
        assert_eq!(agg.object.layer_count, 3);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let source = "\n# a comment\n   \nLAMP > base > cylinder\n  # indented comment\n";
        let agg = parse_object(source).unwrap();
        assert_eq!(agg.object.statement_count(), 1);
        assert!(agg.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_source_gives_none() {
        assert!(parse_object("").is_none());
        assert!(parse_object("# only a comment\n\n").is_none());
    }

    #[test]
    fn test_dropped_lines_reported() {
        let source = "LAMP > base > cylinder\nLAMP > shade\nnonsense\nLAMP > shade > cone";
        let agg = parse_object(source).unwrap();
        assert_eq!(agg.object.statement_count(), 2);
        let lines: Vec<_> = agg.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_object_type_from_first_line_when_nothing_parses() {
        let agg = parse_object("ROBOT > arm").unwrap();
        assert_eq!(agg.object.object_type, "ROBOT");
        assert_eq!(agg.object.layer_count, 0);
        assert_eq!(agg.diagnostics.len(), 1);
    }

    #[test]
    fn test_classifier() {
        assert!(is_layered_composite("HUMAN_BODY", []));
        assert!(is_layered_composite("human_body_arm", []));
        assert!(is_layered_composite("DOG", ["skeletal"]));
        assert!(is_layered_composite("DOG", ["outer_epidermis"]));
        assert!(!is_layered_composite("CHAIR", ["seat", "legs", "padding"]));
        assert!(!is_layered_composite("CHAIR", []));
    }

    #[test]
    fn test_split_blocks() {
        let blocks = split_blocks(fixtures::MIXED_SOURCE);
        let types: Vec<_> = blocks.iter().map(|b| b.object_type.as_str()).collect();
        assert_eq!(types, vec!["CHAIR", "LAMP", "CHAIR"]);
        assert_eq!(blocks[0].lines.len(), 2);
        assert_eq!(blocks[1].lines.len(), 3);
    }

    #[test]
    fn test_split_blocks_keeps_separatorless_lines() {
        let blocks = split_blocks("stray words\nLAMP > base > cube\nmore words");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].object_type, "LAMP");
        assert_eq!(blocks[0].lines.len(), 3);
    }
}
