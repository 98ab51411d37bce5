use thiserror::Error;

/// Errors surfaced by the cube model, the move engine and the solver.
///
/// Structural problems (bad notation, out of range layers, malformed facelet strings) are reported
/// here. A stage that fails to converge is not an error, see [crate::solver::StageOutcome].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid scramble or move notation `{0}`")]
    InvalidScramble(String),
    #[error("layer {layer} does not exist on a {dimension}x{dimension} cube")]
    InvalidLayer { layer: usize, dimension: usize },
    #[error("unsupported cube dimension {0}")]
    InvalidDimension(usize),
    #[error("move tables for a {expected}x{expected} cube used on a {found}x{found} cube")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid facelet string")]
    InvalidFaceletString,
    #[error("invalid facelet value `{0}`")]
    InvalidFaceletValue(char),
    #[error("the layer-by-layer solver handles 3x3 cubes only, got {0}x{0}")]
    UnsupportedDimension(usize),
    #[error("solver stages must run strictly forward")]
    StageOrder,
}
