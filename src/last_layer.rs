//! Last layer stages: orientation, permutation and the final top alignment.
//!
//! Orientation and permutation each run two searches in a row, chaining up to
//! [LAST_LAYER_DEPTH] setup plus algorithm blocks from a small catalogue. Every accepted result
//! keeps the first two layers intact.

use log::debug;

use crate::constants::*;
use crate::cubie::{find_piece, EdgeSlot, Piece};
use crate::error::Error;
use crate::facelet::{CubeState, Face};
use crate::moves::{invert_sequence, MoveSequence};
use crate::scramble::{scramble_from_str, scramble_to_str};
use crate::simulate::Simulator;
use crate::stages::{check_solver_dimension, f2l_solved, Stage, StageSolver, SETUPS};

lazy_static! {
    static ref TOP_EDGES: Vec<Piece> = SIDE_FACES
        .iter()
        .filter_map(|&s| find_piece(&[Face::Top, s]))
        .collect();
    static ref TOP_CORNERS: Vec<Piece> = SIDE_FACES
        .iter()
        .filter_map(|&s| find_piece(&[Face::Top, s, s.right_of()]))
        .collect();
}

/// First two layers solved and the four top edges show the top color.
pub fn top_cross_solved(state: &CubeState) -> bool {
    let top = state.center(Face::Top);
    f2l_solved(state)
        && EdgeSlot::ALL.iter().all(|slot| {
            slot.position(state.dimension())
                .map_or(false, |(i, j)| state.get(Face::Top, i, j) == top)
        })
}

/// First two layers solved and the top face uniform.
pub fn oll_solved(state: &CubeState) -> bool {
    f2l_solved(state) && state.is_face_solved(Face::Top)
}

/// How many slots along [SIDE_FACES] each piece sits from its home, or `None` if some slot
/// holds a piece that does not belong to the set.
fn offsets(state: &CubeState, slots: &[Piece]) -> Option<Vec<usize>> {
    let homes: Vec<_> = slots.iter().map(|p| p.home_colors(state)).collect();
    slots
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let colors = p.colors(state);
            homes
                .iter()
                .position(|h| *h == colors)
                .map(|j| (j + slots.len() - i) % slots.len())
        })
        .collect()
}

fn all_equal(values: &[usize]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Orientation solved and every top corner a common top turn away from home.
pub fn top_corners_permuted(state: &CubeState) -> bool {
    oll_solved(state) && offsets(state, &TOP_CORNERS).map_or(false, |o| all_equal(&o))
}

/// Orientation solved and the whole top layer a single top turn away from solved.
pub fn pll_solved(state: &CubeState) -> bool {
    if !oll_solved(state) {
        return false;
    }
    match (offsets(state, &TOP_CORNERS), offsets(state, &TOP_EDGES)) {
        (Some(mut all), Some(edges)) => {
            all.extend(edges);
            all_equal(&all)
        }
        _ => false,
    }
}

/// Setups times every algorithm and its inverse.
fn catalogue(algs: &[&str]) -> Result<Vec<MoveSequence>, Error> {
    let mut out = Vec::new();
    for setup in SETUPS {
        for alg in algs {
            let alg = scramble_from_str(alg)?;
            for body in [alg.clone(), invert_sequence(&alg)] {
                let mut seq = scramble_from_str(setup)?;
                seq.extend(body);
                out.push(seq);
            }
        }
    }
    Ok(out)
}

struct Step {
    goal: fn(&CubeState) -> bool,
    catalogue: Vec<MoveSequence>,
}

/// A last layer stage made of consecutive searches.
pub struct LastLayerStage {
    stage: Stage,
    steps: Vec<Step>,
}

impl LastLayerStage {
    pub fn orientation() -> Result<Self, Error> {
        Ok(Self {
            stage: Stage::Orientation,
            steps: vec![
                Step {
                    goal: top_cross_solved,
                    catalogue: catalogue(&["F R U R' U' F'"])?,
                },
                Step {
                    goal: oll_solved,
                    catalogue: catalogue(&["R U R' U R U2 R'"])?,
                },
            ],
        })
    }

    pub fn permutation() -> Result<Self, Error> {
        Ok(Self {
            stage: Stage::Permutation,
            steps: vec![
                Step {
                    goal: top_corners_permuted,
                    catalogue: catalogue(&[
                        "R U R' U' R' F R2 U' R' U' R U R' F'",
                        "F R U' R' U' R U R' F' R U R' U' R' F R F'",
                        "R' F R' B2 R F' R' B2 R2",
                    ])?,
                },
                Step {
                    goal: pll_solved,
                    catalogue: catalogue(&["R U' R U R U R U' R' U' R2"])?,
                },
            ],
        })
    }
}

impl StageSolver for LastLayerStage {
    fn stage(&self) -> Stage {
        self.stage
    }

    fn solved(&self, state: &CubeState) -> bool {
        self.steps.last().map_or(true, |step| (step.goal)(state))
    }

    fn next_chunk(&self, sim: &Simulator, state: &CubeState) -> Result<MoveSequence, Error> {
        check_solver_dimension(state)?;
        let mut chunk = Vec::new();
        let mut state = state.clone();
        for step in &self.steps {
            if (step.goal)(&state) {
                continue;
            }
            match sim.search(&state, &step.catalogue, LAST_LAYER_DEPTH, step.goal)? {
                Some(found) => {
                    state = sim.simulate(&state, &found)?;
                    chunk.extend(found);
                }
                None => {
                    debug!("{}: case not covered", self.stage);
                    break;
                }
            }
        }
        debug!("{}: {}", self.stage, scramble_to_str(&chunk));
        Ok(chunk)
    }
}

/// Turns the top layer into place once everything else is solved.
pub struct TopAlignStage {
    candidates: Vec<MoveSequence>,
}

impl TopAlignStage {
    pub fn new() -> Result<Self, Error> {
        let candidates: Vec<MoveSequence> = ["U", "U2", "U'"]
            .iter()
            .map(|s| scramble_from_str(s))
            .collect::<Result<_, Error>>()?;
        Ok(Self { candidates })
    }
}

impl StageSolver for TopAlignStage {
    fn stage(&self) -> Stage {
        Stage::TopAlign
    }

    fn solved(&self, state: &CubeState) -> bool {
        state.is_solved()
    }

    fn next_chunk(&self, sim: &Simulator, state: &CubeState) -> Result<MoveSequence, Error> {
        check_solver_dimension(state)?;
        Ok(sim
            .first_match(state, &self.candidates, |s| s.is_solved())?
            .unwrap_or_default())
    }

    fn budget(&self) -> usize {
        TOP_ALIGN_BUDGET
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scrambled(s: &str) -> CubeState {
        let mut cc = CubeState::solved(3).unwrap();
        cc.apply_moves(&scramble_from_str(s).unwrap()).unwrap();
        cc
    }

    fn finish(stage: &dyn StageSolver, state: &CubeState) -> CubeState {
        let sim = Simulator::new(3).unwrap();
        let chunk = stage.next_chunk(&sim, state).unwrap();
        assert!(!chunk.is_empty());
        sim.simulate(state, &chunk).unwrap()
    }

    #[test]
    fn test_predicates_on_solved_cube() {
        let cc = CubeState::solved(3).unwrap();
        assert!(top_cross_solved(&cc));
        assert!(oll_solved(&cc));
        assert!(top_corners_permuted(&cc));
        assert!(pll_solved(&cc));
        assert_eq!(offsets(&cc, &TOP_EDGES), Some(vec![0; 4]));
    }

    #[test]
    fn test_top_turn_shifts_every_piece() {
        let cc = scrambled("U");
        assert!(pll_solved(&cc));
        assert!(!cc.is_solved());
        let edges = offsets(&cc, &TOP_EDGES).unwrap();
        assert!(all_equal(&edges));
        assert_ne!(edges[0], 0);
        assert_eq!(offsets(&cc, &TOP_CORNERS), Some(edges));
    }

    #[test]
    fn test_orientation_after_sune() {
        let stage = LastLayerStage::orientation().unwrap();
        let cc = scrambled("R U R' U R U2 R'");
        assert!(f2l_solved(&cc));
        assert!(!stage.solved(&cc));
        assert!(oll_solved(&finish(&stage, &cc)));
    }

    #[test]
    fn test_orientation_from_no_edges() {
        let stage = LastLayerStage::orientation().unwrap();
        let cc = scrambled("F R U R' U' F' U F R U R' U' F'");
        assert!(!top_cross_solved(&cc));
        assert!(stage.solved(&finish(&stage, &cc)));
    }

    #[test]
    fn test_permutation_after_t_perm() {
        let stage = LastLayerStage::permutation().unwrap();
        let cc = scrambled("R U R' U' R' F R2 U' R' U' R U R' F'");
        assert!(oll_solved(&cc));
        assert!(!pll_solved(&cc));
        assert!(pll_solved(&finish(&stage, &cc)));
    }

    #[test]
    fn test_permutation_after_u_perm() {
        let stage = LastLayerStage::permutation().unwrap();
        let cc = scrambled("R U' R U R U R U' R' U' R2");
        assert!(top_corners_permuted(&cc));
        assert!(!pll_solved(&cc));
        assert!(pll_solved(&finish(&stage, &cc)));
    }

    #[test]
    fn test_top_align() {
        let stage = TopAlignStage::new().unwrap();
        let sim = Simulator::new(3).unwrap();
        let cc = scrambled("U");
        assert_eq!(
            stage.next_chunk(&sim, &cc).unwrap(),
            scramble_from_str("U'").unwrap()
        );
        let cc = scrambled("U2");
        assert!(stage.solved(&finish(&stage, &cc)));
        // nothing a top turn can fix
        let cc = scrambled("R");
        assert!(stage.next_chunk(&sim, &cc).unwrap().is_empty());
        assert_eq!(stage.budget(), TOP_ALIGN_BUDGET);
    }

    #[test]
    fn test_last_layer_refuses_other_sizes() {
        let sim = Simulator::new(3).unwrap();
        let stages: Vec<Box<dyn StageSolver>> = vec![
            Box::new(LastLayerStage::orientation().unwrap()),
            Box::new(LastLayerStage::permutation().unwrap()),
            Box::new(TopAlignStage::new().unwrap()),
        ];
        for dimension in [2, 5] {
            let cc = CubeState::solved(dimension).unwrap();
            assert!(!top_cross_solved(&cc));
            assert!(!oll_solved(&cc));
            assert!(!top_corners_permuted(&cc));
            assert!(!pll_solved(&cc));
            for stage in &stages {
                assert_eq!(
                    stage.next_chunk(&sim, &cc),
                    Err(Error::UnsupportedDimension(dimension))
                );
            }
        }
    }

    #[test]
    fn test_unfinished_layers_block_last_layer() {
        let stage = LastLayerStage::orientation().unwrap();
        let sim = Simulator::new(3).unwrap();
        let cc = scrambled("R");
        assert!(!stage.solved(&cc));
        assert!(stage.next_chunk(&sim, &cc).unwrap().is_empty());
    }
}
