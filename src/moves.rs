use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cubie::{cubie_of, facelet_at, facelet_position, rotate_ccw};
use crate::error::Error;
use crate::facelet::{check_dimension, CubeState, Face, Facelet};

/// A turnable slab: a face and how deep below it the slab lies.
///
/// Layer 0 is the outer face itself. Valid layers are `0..N / 2`: deeper slabs are reached from
/// the opposite face, and the middle slice of an odd cube, which would carry centers along, is not
/// a move.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub face: Face,
    pub layer: usize,
}

impl Move {
    pub const fn face(face: Face) -> Self {
        Self { face, layer: 0 }
    }
}

/// A quarter turn of a [Move], clockwise as seen looking at the face, or its inverse.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Turn {
    pub mv: Move,
    pub inverted: bool,
}

/// Ordered turns, applied left to right.
pub type MoveSequence = Vec<Turn>;

impl Turn {
    pub const fn new(face: Face, inverted: bool) -> Self {
        Self {
            mv: Move::face(face),
            inverted,
        }
    }

    pub const fn layered(face: Face, layer: usize, inverted: bool) -> Self {
        Self {
            mv: Move { face, layer },
            inverted,
        }
    }

    pub fn inverse(self) -> Self {
        Self {
            mv: self.mv,
            inverted: !self.inverted,
        }
    }

    /// The same turn with its face relabelled as if `front` were the Front face.
    pub fn relative_to(self, front: Face) -> Self {
        let face = match self.mv.face {
            Face::Front => front,
            Face::Right => front.right_of(),
            Face::Back => front.opposite(),
            Face::Left => front.left_of(),
            other => other,
        };
        Self {
            mv: Move { face, ..self.mv },
            ..self
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mv.layer > 0 {
            write!(f, "{}", self.mv.layer + 1)?;
        }
        write!(f, "{}", self.mv.face.letter())?;
        if self.inverted {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for Turn {
    type Err = Error;

    /// Parse one quarter turn: an optional 1-based layer number, a face letter and an optional `'`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidScramble(s.to_string());
        let body = s.trim();
        let (body, inverted) = match body.strip_suffix('\'') {
            Some(rest) => (rest, true),
            None => (body, false),
        };
        let mut chars = body.chars();
        let letter = chars.next_back().ok_or_else(invalid)?;
        let face = Face::from_letter(letter).ok_or_else(invalid)?;
        let prefix = chars.as_str();
        let layer = if prefix.is_empty() {
            0
        } else {
            let depth: usize = prefix.parse().map_err(|_| invalid())?;
            if depth == 0 {
                return Err(invalid());
            }
            depth - 1
        };
        Ok(Turn::layered(face, layer, inverted))
    }
}

/// Reverse the order and flip every turn.
pub fn invert_sequence(seq: &[Turn]) -> MoveSequence {
    seq.iter().rev().map(|t| t.inverse()).collect()
}

/// Relabel a sequence written for Front so it runs with `front` held in front.
pub fn relative_to(seq: &[Turn], front: Face) -> MoveSequence {
    seq.iter().map(|t| t.relative_to(front)).collect()
}

/// Merge neighbouring turns of the same slab modulo a full revolution.
///
/// The result describes the same permutation; a half turn is kept as two clockwise turns.
pub fn simplify(seq: &[Turn]) -> MoveSequence {
    let mut groups: Vec<(Move, u8)> = Vec::new();
    for t in seq {
        let quarter = if t.inverted { 3 } else { 1 };
        match groups.last_mut() {
            Some((mv, n)) if *mv == t.mv => {
                *n = (*n + quarter) % 4;
                if *n == 0 {
                    groups.pop();
                }
            }
            _ => groups.push((t.mv, quarter)),
        }
    }
    groups
        .into_iter()
        .flat_map(|(mv, n)| match n {
            1 => vec![Turn { mv, inverted: false }],
            2 => vec![Turn { mv, inverted: false }; 2],
            _ => vec![Turn { mv, inverted: true }],
        })
        .collect()
}

/// Destination of every sticker index under one turn.
///
/// Stickers whose cubie lies in the turning slab rotate a quarter turn about the face normal,
/// all others stay put.
pub fn turn_permutation(dimension: usize, turn: Turn) -> Result<Vec<usize>, Error> {
    check_dimension(dimension)?;
    if turn.mv.layer >= layer_count(dimension) {
        return Err(Error::InvalidLayer {
            layer: turn.mv.layer,
            dimension,
        });
    }
    let (axis, sign) = turn.mv.face.normal();
    let slab = sign * (dimension as i32 - 1 - 2 * turn.mv.layer as i32);
    // clockwise about the outward normal is counter-clockwise about the opposite axis end
    let quarters = match (sign > 0, turn.inverted) {
        (true, false) | (false, true) => 3,
        _ => 1,
    };

    let area = dimension * dimension;
    let mut dest: Vec<usize> = (0..6 * area).collect();
    for face in ALL_FACES {
        for row in 0..dimension {
            for col in 0..dimension {
                let from = Facelet::new(face, row, col);
                let p = facelet_position(dimension, from);
                if cubie_of(dimension, p)[axis] != slab {
                    continue;
                }
                let q = (0..quarters).fold(p, |q, _| rotate_ccw(q, axis));
                // A quarter turn about a coordinate axis keeps a surface point on the surface and
                // `dimension` was checked above, so the lookup cannot miss.
                let to = facelet_at(dimension, q).ok_or(Error::InvalidDimension(dimension))?;
                dest[sticker_index(dimension, from)] = sticker_index(dimension, to);
            }
        }
    }
    Ok(dest)
}

/// Number of valid layers below each face.
pub fn layer_count(dimension: usize) -> usize {
    dimension / 2
}

fn sticker_index(dimension: usize, f: Facelet) -> usize {
    (f.face.index() * dimension + f.row) * dimension + f.col
}

/// Apply one turn to a copy of `state`: the pure form of the move contract.
pub fn apply_move(state: &CubeState, mv: Move, inverted: bool) -> Result<CubeState, Error> {
    let mut next = state.clone();
    next.turn(Turn { mv, inverted })?;
    Ok(next)
}

fn permute(state: &mut CubeState, dest: &[usize]) {
    let old = state.stickers();
    let mut next = old.to_vec();
    for (from, &to) in dest.iter().enumerate() {
        next[to] = old[from];
    }
    state.replace_stickers(next);
}

impl CubeState {
    /// Turn the cube in place. All affected stickers are updated together.
    pub fn turn(&mut self, turn: Turn) -> Result<(), Error> {
        let dest = turn_permutation(self.dimension(), turn)?;
        permute(self, &dest);
        Ok(())
    }

    pub fn apply_moves(&mut self, seq: &[Turn]) -> Result<(), Error> {
        for t in seq {
            self.turn(*t)?;
        }
        Ok(())
    }
}

/// Precomputed turn permutations for one dimension.
///
/// Index layout: `(face * layer_count + layer) * 2 + inverted`.
#[derive(Debug, Clone)]
pub struct MoveTables {
    dimension: usize,
    perms: Vec<Vec<usize>>,
}

impl MoveTables {
    pub fn new(dimension: usize) -> Result<Self, Error> {
        check_dimension(dimension)?;
        let mut perms = Vec::with_capacity(6 * layer_count(dimension) * 2);
        for face in ALL_FACES {
            for layer in 0..layer_count(dimension) {
                for inverted in [false, true] {
                    perms.push(turn_permutation(
                        dimension,
                        Turn::layered(face, layer, inverted),
                    )?);
                }
            }
        }
        Ok(Self { dimension, perms })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn permutation(&self, turn: Turn) -> Result<&[usize], Error> {
        let layers = layer_count(self.dimension);
        if turn.mv.layer >= layers {
            return Err(Error::InvalidLayer {
                layer: turn.mv.layer,
                dimension: self.dimension,
            });
        }
        let i = (turn.mv.face.index() * layers + turn.mv.layer) * 2 + turn.inverted as usize;
        Ok(&self.perms[i])
    }

    pub fn apply(&self, state: &mut CubeState, turn: Turn) -> Result<(), Error> {
        if state.dimension() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                found: state.dimension(),
            });
        }
        let dest = self.permutation(turn)?;
        permute(state, dest);
        Ok(())
    }

    pub fn apply_sequence(&self, state: &mut CubeState, seq: &[Turn]) -> Result<(), Error> {
        for t in seq {
            self.apply(state, *t)?;
        }
        Ok(())
    }
}
