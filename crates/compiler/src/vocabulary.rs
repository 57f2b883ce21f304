//! Static vocabulary of the GENE language: directions, materials, layer types.
//!
//! Everything here is `const` data, read concurrently without locking.

use std::collections::BTreeMap;

use shared::Material;

/// Separator between object type, layer and command sequence
pub const LAYER_SEPARATOR: char = '>';

/// Material used when a statement names none
pub const DEFAULT_MATERIAL: &str = WOOD.name;

/// Object types that are always anatomical composites
pub const ANATOMICAL_OBJECT_MARKERS: &[&str] = &["HUMAN_BODY"];

// ── Directions ──────────────────────────────────────────────

/// Meaning of a direction keyword
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// Offset along a (not necessarily unit-length) axis combination
    Vector([f64; 3]),
    /// Rotational or relational motion, recorded as a modifier tag
    Motion(&'static str),
}

const DIRECTIONS: &[(&str, Direction)] = &[
    // Cardinal
    ("forward", Direction::Vector([1.0, 0.0, 0.0])),
    ("backward", Direction::Vector([-1.0, 0.0, 0.0])),
    ("upward", Direction::Vector([0.0, 1.0, 0.0])),
    ("downward", Direction::Vector([0.0, -1.0, 0.0])),
    ("leftward", Direction::Vector([0.0, 0.0, 1.0])),
    ("rightward", Direction::Vector([0.0, 0.0, -1.0])),
    // Diagonal
    ("upleft", Direction::Vector([0.0, 1.0, 1.0])),
    ("upright", Direction::Vector([0.0, 1.0, -1.0])),
    ("downleft", Direction::Vector([0.0, -1.0, 1.0])),
    ("downright", Direction::Vector([0.0, -1.0, -1.0])),
    ("forwardleft", Direction::Vector([1.0, 0.0, 1.0])),
    ("forwardright", Direction::Vector([1.0, 0.0, -1.0])),
    ("backwardleft", Direction::Vector([-1.0, 0.0, 1.0])),
    ("backwardright", Direction::Vector([-1.0, 0.0, -1.0])),
    // Rotational
    ("clockwise", Direction::Motion("rotate_cw")),
    ("counterclockwise", Direction::Motion("rotate_ccw")),
    ("spiral", Direction::Motion("spiral_path")),
    ("twist", Direction::Motion("twist_transform")),
    ("curve", Direction::Motion("curve_path")),
    ("arc", Direction::Motion("arc_path")),
    // Relational
    ("toward", Direction::Motion("toward_target")),
    ("away", Direction::Motion("away_target")),
    ("around", Direction::Motion("around_target")),
    ("through", Direction::Motion("through_target")),
];

/// Look up a direction keyword
pub fn direction(token: &str) -> Option<Direction> {
    DIRECTIONS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, dir)| *dir)
}

// ── Materials ───────────────────────────────────────────────

/// Compile-time material entry
#[derive(Debug, Clone, Copy)]
pub struct MaterialDef {
    pub name: &'static str,
    pub color: &'static str,
    pub roughness: f32,
    pub metalness: f32,
    pub transmission: Option<f32>,
    pub subsurface: Option<f32>,
    pub hardness: Option<f32>,
    pub traits: &'static [(&'static str, f32)],
}

impl MaterialDef {
    const fn basic(
        name: &'static str,
        color: &'static str,
        roughness: f32,
        metalness: f32,
    ) -> Self {
        Self {
            name,
            color,
            roughness,
            metalness,
            transmission: None,
            subsurface: None,
            hardness: None,
            traits: &[],
        }
    }

    const fn with_transmission(mut self, value: f32) -> Self {
        self.transmission = Some(value);
        self
    }

    const fn with_subsurface(mut self, value: f32) -> Self {
        self.subsurface = Some(value);
        self
    }

    const fn with_hardness(mut self, value: f32) -> Self {
        self.hardness = Some(value);
        self
    }

    const fn with_traits(mut self, traits: &'static [(&'static str, f32)]) -> Self {
        self.traits = traits;
        self
    }

    /// Owned material value for a statement
    pub fn to_material(&self) -> Material {
        Material {
            name: self.name.to_string(),
            color: self.color.to_string(),
            roughness: self.roughness,
            metalness: self.metalness,
            transmission: self.transmission,
            subsurface: self.subsurface,
            hardness: self.hardness,
            traits: self
                .traits
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

/// Material every statement starts with
const WOOD: MaterialDef = MaterialDef::basic("wood", "#8B4513", 0.8, 0.0);

pub const MATERIALS: &[MaterialDef] = &[
    // Organic
    MaterialDef::basic("skin", "#F5CBA7", 0.6, 0.0).with_subsurface(0.3),
    MaterialDef::basic("flesh", "#C04040", 0.8, 0.0).with_subsurface(0.5),
    MaterialDef::basic("bone", "#FFFEF0", 0.4, 0.0).with_hardness(0.9),
    MaterialDef::basic("cartilage", "#E0E0E0", 0.5, 0.0).with_traits(&[("flexibility", 0.7)]),
    MaterialDef::basic("fat", "#FFF8DC", 0.9, 0.0).with_traits(&[("softness", 0.9)]),
    MaterialDef::basic("tendon", "#F0F0F0", 0.6, 0.0).with_traits(&[("tensile", 0.8)]),
    MaterialDef::basic("ligament", "#F5F5DC", 0.6, 0.0).with_traits(&[("tensile", 0.8)]),
    // Manufactured
    WOOD,
    MaterialDef::basic("metal", "#C0C0C0", 0.2, 1.0),
    MaterialDef::basic("glass", "#FFFFFF", 0.0, 0.0).with_transmission(0.9),
    MaterialDef::basic("plastic", "#FFFFFF", 0.5, 0.0),
    MaterialDef::basic("fabric", "#808080", 1.0, 0.0),
    MaterialDef::basic("leather", "#654321", 0.7, 0.0),
    MaterialDef::basic("concrete", "#A0A0A0", 0.9, 0.0),
    MaterialDef::basic("ceramic", "#FFFFFF", 0.3, 0.0),
    // Natural
    MaterialDef::basic("stone", "#808080", 0.9, 0.0),
    MaterialDef::basic("clay", "#B87333", 1.0, 0.0),
    MaterialDef::basic("sand", "#C2B280", 1.0, 0.0),
    MaterialDef::basic("water", "#0080FF", 0.0, 0.0).with_transmission(0.8),
    MaterialDef::basic("ice", "#E0FFFF", 0.1, 0.0).with_traits(&[("transparency", 0.7)]),
    MaterialDef::basic("crystal", "#FFFFFF", 0.0, 0.3).with_traits(&[("refraction", 1.5)]),
];

/// Look up a material keyword
pub fn material(token: &str) -> Option<Material> {
    MATERIALS
        .iter()
        .find(|def| def.name == token)
        .map(MaterialDef::to_material)
}

/// The material every statement starts with
pub fn default_material() -> Material {
    WOOD.to_material()
}

// ── Layer types ─────────────────────────────────────────────

/// Family a known layer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFamily {
    Anatomical,
    Structural,
}

/// Metadata of a known layer name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerType {
    pub name: &'static str,
    pub family: LayerFamily,
    /// Stacking depth, 0 = innermost
    pub depth: u32,
    pub color: Option<&'static str>,
    pub opacity: Option<f32>,
    pub purpose: Option<&'static str>,
}

const fn anatomical(
    name: &'static str,
    depth: u32,
    color: &'static str,
    opacity: f32,
) -> LayerType {
    LayerType {
        name,
        family: LayerFamily::Anatomical,
        depth,
        color: Some(color),
        opacity: Some(opacity),
        purpose: None,
    }
}

const fn structural(name: &'static str, depth: u32, purpose: &'static str) -> LayerType {
    LayerType {
        name,
        family: LayerFamily::Structural,
        depth,
        color: None,
        opacity: None,
        purpose: Some(purpose),
    }
}

pub const LAYER_TYPES: &[LayerType] = &[
    anatomical("skeletal", 0, "#FFFEF0", 1.0),
    anatomical("muscular", 1, "#C04040", 0.8),
    anatomical("vascular", 2, "#FF0000", 0.6),
    anatomical("nervous", 3, "#FFFF00", 0.5),
    anatomical("lymphatic", 4, "#90EE90", 0.4),
    anatomical("organ", 5, "#8B4513", 0.7),
    anatomical("fascia", 6, "#F0F0F0", 0.3),
    anatomical("dermis", 7, "#FFD7A0", 0.8),
    anatomical("epidermis", 8, "#F5CBA7", 1.0),
    anatomical("subcutaneous", 9, "#FFF8DC", 0.5),
    structural("core", 0, "structural"),
    structural("structure", 1, "support"),
    structural("padding", 2, "comfort"),
    structural("covering", 3, "protection"),
    structural("surface", 4, "interface"),
    structural("coating", 5, "finish"),
];

/// Look up a layer name
pub fn layer_type(name: &str) -> Option<&'static LayerType> {
    LAYER_TYPES.iter().find(|l| l.name == name)
}

/// Keywords that mark a layer name as anatomical
pub fn anatomical_keywords() -> impl Iterator<Item = &'static str> {
    LAYER_TYPES
        .iter()
        .filter(|l| l.family == LayerFamily::Anatomical)
        .map(|l| l.name)
}
