use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod scene;

/// Primitive shape named by a GENE statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Cube,
    Sphere,
    Cylinder,
    Cone,
    Pyramid,
    Blob,
    Droplet,
    Egg,
}

impl Shape {
    /// Resolve a (lower-case) command token to a shape keyword
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "cube" | "box" => Some(Shape::Cube),
            "sphere" => Some(Shape::Sphere),
            "cylinder" => Some(Shape::Cylinder),
            "cone" => Some(Shape::Cone),
            "pyramid" => Some(Shape::Pyramid),
            "blob" => Some(Shape::Blob),
            "droplet" => Some(Shape::Droplet),
            "egg" => Some(Shape::Egg),
            _ => None,
        }
    }

    /// Canonical keyword for this shape
    pub fn keyword(&self) -> &'static str {
        match self {
            Shape::Cube => "cube",
            Shape::Sphere => "sphere",
            Shape::Cylinder => "cylinder",
            Shape::Cone => "cone",
            Shape::Pyramid => "pyramid",
            Shape::Blob => "blob",
            Shape::Droplet => "droplet",
            Shape::Egg => "egg",
        }
    }

    /// All shapes
    pub fn all() -> &'static [Shape] {
        &[
            Shape::Cube,
            Shape::Sphere,
            Shape::Cylinder,
            Shape::Cone,
            Shape::Pyramid,
            Shape::Blob,
            Shape::Droplet,
            Shape::Egg,
        ]
    }
}

/// Surface material looked up by name from the vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Base color as `#RRGGBB`
    pub color: String,
    pub roughness: f32,
    pub metalness: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsurface: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardness: Option<f32>,
    /// Remaining named scalars (flexibility, tensile, refraction, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: BTreeMap<String, f32>,
}

impl Material {
    /// Opacity implied by transmission (1.0 for opaque materials)
    pub fn opacity(&self) -> f32 {
        1.0 - self.transmission.unwrap_or(0.0)
    }

    pub fn is_transparent(&self) -> bool {
        self.transmission.unwrap_or(0.0) > 0.0
    }
}

/// Value stored under a named metadata key of a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetaValue {
    /// Length in meters (`diameter`)
    Length(f64),
    /// Repetition count (`repeat`)
    Count(u32),
    /// Name of another part (`attach`)
    Reference(String),
    /// Argument kept verbatim when it could not be typed
    Text(String),
}

impl MetaValue {
    pub fn as_length(&self) -> Option<f64> {
        match self {
            MetaValue::Length(v) => Some(*v),
            _ => None,
        }
    }
}

/// One parsed GENE line: a primitive placed inside a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub object_type: String,
    pub layer: String,
    pub shape: Shape,
    /// Offset in meters
    pub position: [f64; 3],
    /// Extent in meters
    pub size: [f64; 3],
    pub rotation: [f64; 3],
    pub material: Material,
    /// Unrecognized tokens and motion tags, in source order
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetaValue>,
}

impl Statement {
    /// Diameter from metadata, if one was given
    pub fn diameter(&self) -> Option<f64> {
        self.metadata.get("diameter").and_then(MetaValue::as_length)
    }

    /// Human-friendly label: the first modifier, or the shape keyword
    pub fn label(&self) -> &str {
        self.modifiers
            .first()
            .map(String::as_str)
            .unwrap_or_else(|| self.shape.keyword())
    }
}

/// Level of detail an object asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    Standard,
    Medical,
}

/// All statements of one object, partitioned by layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedObject {
    #[serde(rename = "type")]
    pub object_type: String,
    /// Anatomical (or otherwise layered) composite whose layers can be toggled
    pub is_layered_composite: bool,
    /// Layer name -> statements, in discovery order
    pub layers: IndexMap<String, Vec<Statement>>,
    pub layer_count: usize,
    #[serde(default)]
    pub precision: Precision,
}

impl ParsedObject {
    pub fn new(object_type: impl Into<String>, is_layered_composite: bool) -> Self {
        Self {
            object_type: object_type.into(),
            is_layered_composite,
            layers: IndexMap::new(),
            layer_count: 0,
            precision: if is_layered_composite {
                Precision::Medical
            } else {
                Precision::Standard
            },
        }
    }

    /// Append a statement to its layer, keeping `layer_count` in sync
    pub fn push(&mut self, statement: Statement) {
        self.layers
            .entry(statement.layer.clone())
            .or_default()
            .push(statement);
        self.layer_count = self.layers.len();
    }

    /// Total number of statements across all layers
    pub fn statement_count(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// All statements, layer by layer, in source order within each layer
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.layers.values().flatten()
    }
}

/// Placement of a node in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Identity-scale transform at the given position and rotation
    pub fn at(position: [f64; 3], rotation: [f64; 3]) -> Self {
        Self {
            position,
            rotation,
            ..Self::new()
        }
    }
}
