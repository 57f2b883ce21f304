//! VLS: compact, lossy single-line rendition of a parsed object.
//!
//! `TYPE:/layer:A{x}B{y}C{z}.A...` where each coordinate is the position in
//! decimeters truncated toward zero. There is no decoder.

use std::fmt::Write;

use shared::ParsedObject;

/// Position component in truncated decimeters
fn quantize(meters: f64) -> i64 {
    (meters * 10.0).trunc() as i64
}

pub fn export_vls(object: &ParsedObject) -> String {
    let mut out = format!("{}:", object.object_type);
    for (layer, statements) in &object.layers {
        let _ = write!(out, "/{layer}:");
        for s in statements {
            let [x, y, z] = s.position.map(quantize);
            let _ = write!(out, "A{x}B{y}C{z}.");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse_object;

    #[test]
    fn test_vls_layout() {
        let source = "CHAIR > seat > surface forward 50cm\n\
                      CHAIR > legs > cylinder downward 45cm\n\
                      CHAIR > legs > cylinder downleft 40cm";
        let obj = parse_object(source).unwrap().object;
        assert_eq!(
            export_vls(&obj),
            "CHAIR:/seat:A5B0C0./legs:A0B-4C0.A0B-4C4."
        );
    }

    #[test]
    fn test_vls_truncates_toward_zero() {
        assert_eq!(quantize(0.35), 3);
        assert_eq!(quantize(-0.35), -3);
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(2.0), 20);
    }

    #[test]
    fn test_vls_empty_object() {
        let obj = ParsedObject::new("ROBOT", false);
        assert_eq!(export_vls(&obj), "ROBOT:");
    }
}
