//! Sample GENE sources used by tests and the demo inputs.

/// Layered anatomical arm: 5 layers, 8 statements
pub const ARM_SOURCE: &str = "\
# Skeletal arm with soft tissue
HUMAN_BODY > skeletal > humerus cylinder downward 35cm diameter 2cm bone smooth
HUMAN_BODY > skeletal > radius cylinder downward 25cm diameter 1.5cm bone attach humerus
HUMAN_BODY > skeletal > ulna cylinder downward 26cm diameter 1.4cm bone attach humerus

HUMAN_BODY > muscular > biceps blob forward 3cm 8cm flesh soft
HUMAN_BODY > muscular > triceps blob backward 3cm 9cm flesh soft
HUMAN_BODY > vascular > brachial_artery cylinder forward 1cm diameter 4mm flesh
HUMAN_BODY > dermis > wrap cylinder 36cm diameter 9cm skin
HUMAN_BODY > epidermis > wrap cylinder 36cm diameter 9.2cm skin smooth
";

/// Plain chair: 3 layers (seat, legs, padding)
pub const CHAIR_SOURCE: &str = "\
CHAIR > seat > surface forward 50cm cushion soft
CHAIR > legs > cylinder downward 45cm diameter 3cm wood repeat 4
CHAIR > legs > cylinder downleft 40cm diameter 3cm wood
CHAIR > padding > cube 40cm fabric soft
";

/// Several objects in one source, with one malformed line
pub const MIXED_SOURCE: &str = "\
CHAIR > seat > cube 45cm wood
CHAIR > back > cube upward 40cm wood

LAMP > base > cylinder 20cm metal
LAMP > shade
LAMP > shade > cone upward 30cm glass
CHAIR > legs > cylinder downward 45cm
";

/// One line per shape keyword
pub const SHAPES_SOURCE: &str = "\
SAMPLER > row > cube 10cm
SAMPLER > row > box forward 20cm
SAMPLER > row > sphere forward 40cm
SAMPLER > row > cylinder forward 60cm
SAMPLER > row > cone forward 80cm
SAMPLER > row > pyramid forward 1m
SAMPLER > row > blob forward 120cm
SAMPLER > row > droplet forward 140cm
SAMPLER > row > egg forward 160cm
";
