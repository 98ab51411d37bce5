use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::*;
use crate::error::Error;
use crate::facelet::CubeState;
use crate::last_layer::{LastLayerStage, TopAlignStage};
use crate::moves::MoveSequence;
use crate::scramble::scramble_to_str;
use crate::simulate::Simulator;
use crate::stages::{PieceStage, Stage, StageSolver};

/// How a stage ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum StageOutcome {
    /// The stage predicate holds.
    Solved,
    /// The budget ran out or the stage had nothing left to propose.
    Exhausted,
}

/// What one stage did during a solve.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    /// Chunks requested from the stage.
    pub attempts: usize,
    /// Turns the stage added to the solution.
    pub moves: usize,
}

/// Solution result:
/// * solution: every committed turn, in order.
/// * stages: one report per stage that ran.
/// * solved: whether the solution really solves the cube. A best effort solution may not.
/// * solve_time: time spent in the stage pipeline.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SolveResult {
    pub solution: MoveSequence,
    pub stages: Vec<StageReport>,
    pub solved: bool,
    pub solve_time: Duration,
}

impl SolveResult {
    /// Report of one stage, if it ran.
    pub fn report(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }
}

/// Drives the stages in order over a working copy of the cube.
pub struct Solver {
    sim: Simulator,
    stages: Vec<Box<dyn StageSolver>>,
}

impl Solver {
    /// The layer-by-layer pipeline: cross, corners, F2L, orientation, permutation, alignment.
    pub fn new() -> Result<Self, Error> {
        Self::with_stages(vec![
            Box::new(PieceStage::cross()?),
            Box::new(PieceStage::corners()?),
            Box::new(PieceStage::f2l()?),
            Box::new(LastLayerStage::orientation()?),
            Box::new(LastLayerStage::permutation()?),
            Box::new(TopAlignStage::new()?),
        ])
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        if config.dimensions() != SOLVER_DIMENSION {
            return Err(Error::UnsupportedDimension(config.dimensions()));
        }
        Self::new()
    }

    /// A pipeline of custom stages. Stages must be listed strictly forward and never as `Done`.
    pub fn with_stages(stages: Vec<Box<dyn StageSolver>>) -> Result<Self, Error> {
        let forward = stages.windows(2).all(|w| w[0].stage() < w[1].stage());
        if !forward || stages.iter().any(|s| s.stage() == Stage::Done) {
            return Err(Error::StageOrder);
        }
        Ok(Self {
            sim: Simulator::new(SOLVER_DIMENSION)?,
            stages,
        })
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.stages.iter().map(|s| s.stage()).collect()
    }

    /// Run every stage once, in order, and return the accumulated moves.
    ///
    /// The result is returned even if some stage gives up; check [SolveResult::solved].
    pub fn solve(&self, state: &CubeState) -> Result<SolveResult, Error> {
        if state.dimension() != self.sim.dimension() {
            return Err(Error::UnsupportedDimension(state.dimension()));
        }
        let start_time = Instant::now();
        let mut working = state.clone();
        let mut solution = Vec::new();
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let (report, next, moves) = self.run_stage(stage.as_ref(), working)?;
            if report.outcome == StageOutcome::Exhausted {
                warn!(
                    "{} exhausted after {} attempts",
                    report.stage, report.attempts
                );
            }
            working = next;
            solution.extend(moves);
            reports.push(report);
        }

        let solved = working.is_solved();
        let solve_time = start_time.elapsed();
        info!(
            "{} moves, solved: {}, {:?}",
            solution.len(),
            solved,
            solve_time
        );
        Ok(SolveResult {
            solution,
            stages: reports,
            solved,
            solve_time,
        })
    }

    /// Feed one stage its own chunks until it is solved, gives up or spends its budget.
    fn run_stage(
        &self,
        stage: &dyn StageSolver,
        mut working: CubeState,
    ) -> Result<(StageReport, CubeState, MoveSequence), Error> {
        let mut moves = Vec::new();
        let mut attempts = 0;
        let outcome = loop {
            if stage.solved(&working) {
                break StageOutcome::Solved;
            }
            if attempts == stage.budget() {
                break StageOutcome::Exhausted;
            }
            let chunk = stage.next_chunk(&self.sim, &working)?;
            attempts += 1;
            if chunk.is_empty() {
                break StageOutcome::Exhausted;
            }
            debug!("{} chunk {}: {}", stage.stage(), attempts, scramble_to_str(&chunk));
            working = self.sim.simulate(&working, &chunk)?;
            moves.extend(chunk);
        };
        let report = StageReport {
            stage: stage.stage(),
            outcome,
            attempts,
            moves: moves.len(),
        };
        Ok((report, working, moves))
    }
}

/// Solve a 3x3 cube with a shared, lazily built [Solver].
///
/// # Examples
/// ```rust
/// use lbl_cube::facelet::CubeState;
/// use lbl_cube::scramble::scramble_from_str;
/// use lbl_cube::solver::solve;
///
/// let mut cc = CubeState::solved(3).unwrap();
/// cc.apply_moves(&scramble_from_str("R U R' U' F2 D L'").unwrap()).unwrap();
/// let result = solve(&cc).unwrap();
/// cc.apply_moves(&result.solution).unwrap();
/// assert!(cc.is_solved());
/// ```
pub fn solve(state: &CubeState) -> Result<SolveResult, Error> {
    lazy_static! {
        static ref SOLVER: Result<Solver, Error> = Solver::new();
    }
    SOLVER.as_ref().map_err(|e| e.clone())?.solve(state)
}
