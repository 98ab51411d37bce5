//! Stage solvers of the layer-by-layer method and the first-two-layers piece stages.
//!
//! A stage owns a `solved` predicate and proposes move chunks that advance it. The first three
//! stages place one piece per chunk by trying short algorithms from every side of the cube and
//! keeping the first one whose simulated result is acceptable.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::cubie::{corresponding_edge_piece, find_piece, EdgeSlot, Piece};
use crate::error::Error;
use crate::facelet::{CubeState, Face};
use crate::moves::{relative_to, MoveSequence};
use crate::scramble::{scramble_from_str, scramble_to_str};
use crate::simulate::Simulator;

/// The solver's states, in the only order they may run.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Stage {
    Cross,
    Corners,
    F2L,
    Orientation,
    Permutation,
    TopAlign,
    Done,
}

impl Stage {
    pub fn next(self) -> Self {
        match self {
            Stage::Cross => Stage::Corners,
            Stage::Corners => Stage::F2L,
            Stage::F2L => Stage::Orientation,
            Stage::Orientation => Stage::Permutation,
            Stage::Permutation => Stage::TopAlign,
            Stage::TopAlign | Stage::Done => Stage::Done,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Stages read 3x3 piece slots, any other cube is refused.
pub(crate) fn check_solver_dimension(state: &CubeState) -> Result<(), Error> {
    if state.dimension() == SOLVER_DIMENSION {
        Ok(())
    } else {
        Err(Error::UnsupportedDimension(state.dimension()))
    }
}

/// One stage of the pipeline.
///
/// `next_chunk` must not mutate anything; it returns the moves to commit, or an empty sequence
/// when it sees no way forward.
pub trait StageSolver: Send + Sync {
    fn stage(&self) -> Stage;

    fn solved(&self, state: &CubeState) -> bool;

    fn next_chunk(&self, sim: &Simulator, state: &CubeState) -> Result<MoveSequence, Error>;

    /// Chunks the solver may request before moving on.
    fn budget(&self) -> usize {
        RETRY_BUDGET
    }
}

/// Order in which piece stages fill their slots and try side faces as the front.
const SLOT_ORDER: [Face; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];

/// Top layer turns tried in front of an algorithm.
pub(crate) const SETUPS: [&str; 4] = ["", "U", "U'", "U2"];

fn collect_pieces<F>(faces: F) -> Vec<Piece>
where
    F: Fn(Face) -> Vec<Face>,
{
    SLOT_ORDER
        .iter()
        .filter_map(|&side| find_piece(&faces(side)))
        .collect()
}

lazy_static! {
    static ref CROSS_PIECES: Vec<Piece> = collect_pieces(|s| vec![Face::Bottom, s]);
    static ref CORNER_PIECES: Vec<Piece> = collect_pieces(|s| vec![Face::Bottom, s, s.right_of()]);
    static ref MIDDLE_PIECES: Vec<Piece> = collect_pieces(|s| vec![s, s.right_of()]);
}

/// Bottom cross: every bottom edge sticker shows the bottom color and its mate shows the center
/// color of the side it sits on.
///
/// Like every piece predicate this only answers for the 3x3 cube and is false for other sizes.
pub fn cross_solved(state: &CubeState) -> bool {
    if state.dimension() != SOLVER_DIMENSION {
        return false;
    }
    let bottom = state.center(Face::Bottom);
    EdgeSlot::ALL.iter().all(|slot| {
        let Some((i, j)) = slot.position(state.dimension()) else {
            return false;
        };
        state.get(Face::Bottom, i, j) == bottom
            && corresponding_edge_piece(state, i, j, Face::Bottom)
                .map_or(false, |mate| mate.color == state.center(mate.side))
    })
}

/// Cross plus the four bottom corners.
pub fn corners_solved(state: &CubeState) -> bool {
    cross_solved(state) && CORNER_PIECES.iter().all(|p| p.is_home(state))
}

/// The first two layers: bottom layer and middle edges.
pub fn f2l_solved(state: &CubeState) -> bool {
    corners_solved(state) && MIDDLE_PIECES.iter().all(|p| p.is_home(state))
}

/// Every combination of setup, side face and algorithm, side face outermost.
pub(crate) fn oriented_candidates(
    algs: &[&str],
    setups: &[&str],
) -> Result<Vec<MoveSequence>, Error> {
    let mut out = Vec::new();
    for front in SLOT_ORDER {
        for setup in setups {
            for alg in algs {
                let mut seq = scramble_from_str(setup)?;
                seq.extend(relative_to(&scramble_from_str(alg)?, front));
                out.push(seq);
            }
        }
    }
    Ok(out)
}

/// A stage that homes a fixed list of pieces one at a time.
pub struct PieceStage {
    stage: Stage,
    solved: fn(&CubeState) -> bool,
    pieces: &'static [Piece],
    kept: Vec<Piece>,
    insertions: Vec<MoveSequence>,
    extractions: Vec<MoveSequence>,
}

impl PieceStage {
    /// Bottom edges.
    pub fn cross() -> Result<Self, Error> {
        Ok(Self {
            stage: Stage::Cross,
            solved: cross_solved,
            pieces: &CROSS_PIECES,
            kept: Vec::new(),
            insertions: oriented_candidates(&["F2", "U' R' F R", "U L F' L'"], &SETUPS)?,
            extractions: oriented_candidates(&["F2", "F U F'", "F' U F", "F U' F'", "F' U' F"], &[""])?,
        })
    }

    /// Bottom corners, inserted from the top layer by repeating `R U R' U'`.
    pub fn corners() -> Result<Self, Error> {
        let triggers: Vec<String> = (1..=5).map(|k| vec!["R U R' U'"; k].join(" ")).collect();
        let triggers: Vec<&str> = triggers.iter().map(String::as_str).collect();
        Ok(Self {
            stage: Stage::Corners,
            solved: corners_solved,
            pieces: &CORNER_PIECES,
            kept: CROSS_PIECES.clone(),
            insertions: oriented_candidates(&triggers, &SETUPS)?,
            extractions: oriented_candidates(&["R U R'"], &[""])?,
        })
    }

    /// Middle layer edges.
    pub fn f2l() -> Result<Self, Error> {
        const INSERT: [&str; 2] = ["U R U' R' U' F' U F", "U' L' U L U F U' F'"];
        Ok(Self {
            stage: Stage::F2L,
            solved: f2l_solved,
            pieces: &MIDDLE_PIECES,
            kept: CROSS_PIECES.iter().chain(CORNER_PIECES.iter()).copied().collect(),
            insertions: oriented_candidates(&INSERT, &SETUPS)?,
            extractions: oriented_candidates(&INSERT, &[""])?,
        })
    }

    pub fn pieces(&self) -> &[Piece] {
        self.pieces
    }
}

impl StageSolver for PieceStage {
    fn stage(&self) -> Stage {
        self.stage
    }

    fn solved(&self, state: &CubeState) -> bool {
        (self.solved)(state)
    }

    fn next_chunk(&self, sim: &Simulator, state: &CubeState) -> Result<MoveSequence, Error> {
        check_solver_dimension(state)?;
        let Some(target) = self.pieces.iter().find(|p| !p.is_home(state)) else {
            return Ok(Vec::new());
        };
        let keep: Vec<&Piece> = self
            .kept
            .iter()
            .chain(self.pieces.iter().filter(|p| p.is_home(state)))
            .collect();
        let goal = |s: &CubeState| target.is_home(s) && keep.iter().all(|p| p.is_home(s));

        if let Some(chunk) = sim.first_match(state, &self.insertions, &goal)? {
            debug!("{}: insert {}", self.stage, scramble_to_str(&chunk));
            return Ok(chunk);
        }
        // the piece is stuck in a slot, knock it out to the top layer first
        for extraction in &self.extractions {
            let out = sim.simulate(state, extraction)?;
            if let Some(insertion) = sim.first_match(&out, &self.insertions, &goal)? {
                let mut chunk = extraction.clone();
                chunk.extend(insertion);
                debug!("{}: extract and insert {}", self.stage, scramble_to_str(&chunk));
                return Ok(chunk);
            }
        }
        debug!("{}: no candidate homes {:?}", self.stage, target);
        Ok(Vec::new())
    }
}
