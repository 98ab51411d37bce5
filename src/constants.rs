use crate::facelet::{Color, Face};

/// Edge length of the cube when nothing else is configured.
pub const DEFAULT_DIMENSION: usize = 3;
pub const MIN_DIMENSION: usize = 2;
pub const MAX_DIMENSION: usize = 64;

/// The only dimension the layer-by-layer solver understands.
pub const SOLVER_DIMENSION: usize = 3;

/// Attempts a stage may spend before it gives up and hands over to the next stage.
pub const RETRY_BUDGET: usize = 10;

/// Attempts for the final alignment of the last layer.
pub const TOP_ALIGN_BUDGET: usize = 3;

/// Algorithm blocks chained by one last-layer search.
pub const LAST_LAYER_DEPTH: usize = 3;

/// Facelet string order: U, R, F, D, L, B.
pub const ALL_FACES: [Face; 6] = [
    Face::Top,
    Face::Right,
    Face::Front,
    Face::Bottom,
    Face::Left,
    Face::Back,
];

/// The four faces around the last layer, in the order a clockwise top turn carries stickers.
pub const SIDE_FACES: [Face; 4] = [Face::Front, Face::Left, Face::Back, Face::Right];

pub const ALL_COLORS: [Color; 6] = [
    Color::Yellow,
    Color::Orange,
    Color::Green,
    Color::White,
    Color::Red,
    Color::Blue,
];
