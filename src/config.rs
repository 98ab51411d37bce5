use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::facelet::CubeState;

/// Read-only settings handed to the core: the edge length and the starting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawConfig")]
pub struct Config {
    dimensions: usize,
    initial_state: CubeState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    dimensions: usize,
    initial_state: Option<CubeState>,
}

impl Config {
    /// A configuration starting from the solved cube.
    pub fn new(dimensions: usize) -> Result<Self, Error> {
        Ok(Self {
            dimensions,
            initial_state: CubeState::solved(dimensions)?,
        })
    }

    pub fn with_initial_state(self, initial_state: CubeState) -> Result<Self, Error> {
        if initial_state.dimension() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                found: initial_state.dimension(),
            });
        }
        Ok(Self {
            initial_state,
            ..self
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn initial_state(&self) -> &CubeState {
        &self.initial_state
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = Error;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let config = Config::new(raw.dimensions)?;
        match raw.initial_state {
            Some(state) => config.with_initial_state(state),
            None => Ok(config),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::*;
    use crate::scramble::scramble_from_str;

    #[test]
    fn test_new_config() {
        let config = Config::new(3).unwrap();
        assert_eq!(config.dimensions(), 3);
        assert!(config.initial_state().is_solved());
        assert_eq!(Config::new(1), Err(Error::InvalidDimension(1)));
    }

    #[test]
    fn test_initial_state_must_match() {
        let four = CubeState::solved(4).unwrap();
        assert_eq!(
            Config::new(3).unwrap().with_initial_state(four),
            Err(Error::DimensionMismatch { expected: 3, found: 4 })
        );
        let mut cc = CubeState::solved(3).unwrap();
        cc.apply_moves(&scramble_from_str("R U").unwrap()).unwrap();
        let config = Config::new(3).unwrap().with_initial_state(cc.clone()).unwrap();
        assert_eq!(config.initial_state(), &cc);
    }

    #[test]
    fn test_config_serde() {
        let config = Config::new(2).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, format!("{{\"dimensions\":2,\"initialState\":\"{}\"}}", config.initial_state()));
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let bare: Config = serde_json::from_str("{\"dimensions\":3}").unwrap();
        assert!(bare.initial_state().is_solved());
        let solved3 = CubeState::solved(3).unwrap().to_string();
        let mismatch = format!("{{\"dimensions\":4,\"initialState\":\"{}\"}}", solved3);
        assert!(serde_json::from_str::<Config>(&mismatch).is_err());
        assert!(serde_json::from_str::<Config>("{\"dimensions\":0}").is_err());
    }
}
