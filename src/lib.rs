//! A crate for modelling N×N twisty cubes and solving the 3x3 cube with the layer-by-layer method.
//!
//! The cube is a pure sticker-level state ([facelet::CubeState]) turned by a permutation engine
//! ([moves]). The [solver] runs the cross, corners, F2L, orientation, permutation and alignment
//! stages over a simulated working copy and returns the moves it committed.

#[macro_use]
extern crate lazy_static;

/// Module containing functions for parsing, printing and generating scrambles.
pub mod scramble;

pub mod error;

/// Module containing cube constants and stage budgets.
pub mod constants;
pub mod config;
pub mod cubie;
pub mod facelet;
pub mod last_layer;
pub mod moves;
pub mod simulate;
pub mod solver;
pub mod stages;
