use crate::error::Error;
use crate::facelet::CubeState;
use crate::moves::{MoveSequence, MoveTables, Turn};

/// Applies candidate sequences to copies of a state, leaving the original untouched.
#[derive(Debug, Clone)]
pub struct Simulator {
    tables: MoveTables,
}

impl Simulator {
    pub fn new(dimension: usize) -> Result<Self, Error> {
        Ok(Self {
            tables: MoveTables::new(dimension)?,
        })
    }

    pub fn dimension(&self) -> usize {
        self.tables.dimension()
    }

    /// State reached by applying `seq` to a copy of `state`.
    pub fn simulate(&self, state: &CubeState, seq: &[Turn]) -> Result<CubeState, Error> {
        let mut copy = state.clone();
        self.tables.apply_sequence(&mut copy, seq)?;
        Ok(copy)
    }

    /// First candidate whose simulated result satisfies `goal`, in catalogue order.
    pub fn first_match<G>(
        &self,
        state: &CubeState,
        candidates: &[MoveSequence],
        goal: G,
    ) -> Result<Option<MoveSequence>, Error>
    where
        G: Fn(&CubeState) -> bool,
    {
        for candidate in candidates {
            if goal(&self.simulate(state, candidate)?) {
                return Ok(Some(candidate.clone()));
            }
        }
        Ok(None)
    }

    /// Iterative deepening over chains of up to `max_depth` catalogue entries.
    ///
    /// Returns the shortest chain (in entries, not turns) that reaches `goal`, searching
    /// earlier catalogue entries first at each depth.
    pub fn search<G>(
        &self,
        state: &CubeState,
        catalogue: &[MoveSequence],
        max_depth: usize,
        goal: G,
    ) -> Result<Option<MoveSequence>, Error>
    where
        G: Fn(&CubeState) -> bool,
    {
        for depth in 1..=max_depth {
            let mut chain = Vec::new();
            if self.descend(state, catalogue, depth, &goal, &mut chain)? {
                return Ok(Some(chain));
            }
        }
        Ok(None)
    }

    fn descend<G>(
        &self,
        state: &CubeState,
        catalogue: &[MoveSequence],
        depth: usize,
        goal: &G,
        chain: &mut MoveSequence,
    ) -> Result<bool, Error>
    where
        G: Fn(&CubeState) -> bool,
    {
        for entry in catalogue {
            let next = self.simulate(state, entry)?;
            let mark = chain.len();
            chain.extend_from_slice(entry);
            let found = if depth == 1 {
                goal(&next)
            } else {
                self.descend(&next, catalogue, depth - 1, goal, chain)?
            };
            if found {
                return Ok(true);
            }
            chain.truncate(mark);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facelet::Face;
    use crate::scramble::scramble_from_str;

    #[test]
    fn test_simulate_leaves_original() {
        let sim = Simulator::new(3).unwrap();
        let cc = CubeState::solved(3).unwrap();
        let seq = scramble_from_str("R U R' U'").unwrap();
        let after = sim.simulate(&cc, &seq).unwrap();
        assert!(cc.is_solved());
        assert!(!after.is_solved());
        let mut live = cc.clone();
        live.apply_moves(&seq).unwrap();
        assert_eq!(after, live);
    }

    #[test]
    fn test_first_match() {
        let sim = Simulator::new(3).unwrap();
        let mut cc = CubeState::solved(3).unwrap();
        cc.turn(Turn::new(Face::Right, false)).unwrap();
        let candidates = vec![
            scramble_from_str("R").unwrap(),
            scramble_from_str("R'").unwrap(),
        ];
        let found = sim.first_match(&cc, &candidates, |s| s.is_solved()).unwrap();
        assert_eq!(found, Some(scramble_from_str("R'").unwrap()));
        let none = sim.first_match(&cc, &candidates[..1], |s| s.is_solved()).unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_search_chains_entries() {
        let sim = Simulator::new(3).unwrap();
        let mut cc = CubeState::solved(3).unwrap();
        cc.apply_moves(&scramble_from_str("U R").unwrap()).unwrap();
        let catalogue = vec![
            scramble_from_str("R'").unwrap(),
            scramble_from_str("U'").unwrap(),
        ];
        let found = sim.search(&cc, &catalogue, 1, |s| s.is_solved()).unwrap();
        assert_eq!(found, None);
        let found = sim.search(&cc, &catalogue, 3, |s| s.is_solved()).unwrap();
        assert_eq!(found, Some(scramble_from_str("R' U'").unwrap()));
    }

    #[test]
    fn test_simulate_rejects_foreign_dimension() {
        let sim = Simulator::new(3).unwrap();
        let cc = CubeState::solved(5).unwrap();
        assert!(sim.simulate(&cc, &[Turn::new(Face::Top, false)]).is_err());
    }
}
