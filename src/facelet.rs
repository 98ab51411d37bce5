use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;

/// The six faces of the cube.
///
/// The discriminants give the facelet string order U, R, F, D, L, B.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub enum Face {
    Top,
    Right,
    Front,
    Bottom,
    Left,
    Back,
}

impl Face {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter used by move notation.
    pub fn letter(self) -> char {
        match self {
            Face::Top => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Bottom => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::Top),
            'R' => Some(Face::Right),
            'F' => Some(Face::Front),
            'D' => Some(Face::Bottom),
            'L' => Some(Face::Left),
            'B' => Some(Face::Back),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    /// The side face to the right of `self` when `self` is held in front, top up.
    ///
    /// Top and Bottom map to themselves, which makes this the face relabelling of a whole cube
    /// rotation about the vertical axis.
    pub fn right_of(self) -> Self {
        match self {
            Face::Front => Face::Right,
            Face::Right => Face::Back,
            Face::Back => Face::Left,
            Face::Left => Face::Front,
            other => other,
        }
    }

    pub fn left_of(self) -> Self {
        match self {
            Face::Front => Face::Left,
            Face::Left => Face::Back,
            Face::Back => Face::Right,
            Face::Right => Face::Front,
            other => other,
        }
    }

    /// Color of this face on a freshly built cube.
    pub fn home_color(self) -> Color {
        ALL_COLORS[self.index()]
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Sticker colors. One canonical color per face, see [Face::home_color].
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Red,
    Orange,
}

impl Color {
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Red => 'R',
            Color::Orange => 'O',
        }
    }
}

impl TryFrom<char> for Color {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'W' => Ok(Color::White),
            'Y' => Ok(Color::Yellow),
            'G' => Ok(Color::Green),
            'B' => Ok(Color::Blue),
            'R' => Ok(Color::Red),
            'O' => Ok(Color::Orange),
            _ => Err(Error::InvalidFaceletValue(c)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One sticker position: a face and a (row, column) cell of its grid.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Facelet {
    pub face: Face,
    pub row: usize,
    pub col: usize,
}

impl Facelet {
    pub const fn new(face: Face, row: usize, col: usize) -> Self {
        Self { face, row, col }
    }
}

/// Represent a cube on the facelet level.
///
/// Six N×N grids stored row-major, faces in U, R, F, D, L, B order. Every grid is read with its
/// face viewed from outside: side faces with Top above them, Top with Front below it and Bottom
/// with Front above it.
///
/// Moves only relocate stickers, so the color multiset of a state built by [CubeState::solved]
/// never changes. On odd cubes the centers never move either and define each face's color.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CubeState {
    dimension: usize,
    f: Vec<Color>,
}

impl CubeState {
    /// A solved cube of the given edge length.
    pub fn solved(dimension: usize) -> Result<Self, Error> {
        check_dimension(dimension)?;
        let area = dimension * dimension;
        let f = ALL_FACES
            .iter()
            .flat_map(|face| std::iter::repeat(face.home_color()).take(area))
            .collect();
        Ok(Self { dimension, f })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Sticker color at (row, col) of `face`.
    ///
    /// # Panics
    /// If `row` or `col` is not below the dimension.
    pub fn get(&self, face: Face, row: usize, col: usize) -> Color {
        assert!(row < self.dimension && col < self.dimension);
        self.f[self.index(face, row, col)]
    }

    pub fn sticker(&self, facelet: Facelet) -> Color {
        self.get(facelet.face, facelet.row, facelet.col)
    }

    /// Row-major grid of one face.
    pub fn face(&self, face: Face) -> &[Color] {
        let area = self.dimension * self.dimension;
        &self.f[face.index() * area..(face.index() + 1) * area]
    }

    /// Color at the middle of a face. On even cubes this is one of the four central stickers.
    pub fn center(&self, face: Face) -> Color {
        let mid = self.dimension / 2;
        self.get(face, mid, mid)
    }

    pub fn is_face_solved(&self, face: Face) -> bool {
        let center = self.center(face);
        self.face(face).iter().all(|&c| c == center)
    }

    /// Every face uniform.
    pub fn is_solved(&self) -> bool {
        ALL_FACES.iter().all(|&face| self.is_face_solved(face))
    }

    /// Number of stickers of each color, indexed like [ALL_COLORS].
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for c in &self.f {
            if let Some(i) = ALL_COLORS.iter().position(|a| a == c) {
                counts[i] += 1;
            }
        }
        counts
    }

    pub(crate) fn index(&self, face: Face, row: usize, col: usize) -> usize {
        (face.index() * self.dimension + row) * self.dimension + col
    }

    pub(crate) fn stickers(&self) -> &[Color] {
        &self.f
    }

    /// Swap in a fully permuted sticker buffer.
    pub(crate) fn replace_stickers(&mut self, f: Vec<Color>) {
        debug_assert_eq!(f.len(), self.f.len());
        self.f = f;
    }
}

pub(crate) fn check_dimension(dimension: usize) -> Result<(), Error> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(Error::InvalidDimension(dimension))
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.f.iter().map(|c| c.letter()).collect();
        write!(f, "{}", s)
    }
}

impl TryFrom<&str> for CubeState {
    type Error = Error;

    /// Build a cube from a facelet string, inferring the dimension from its length.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let len = s.chars().count();
        if len == 0 || len % 6 != 0 {
            return Err(Error::InvalidFaceletString);
        }
        let area = len / 6;
        let dimension = (1..=MAX_DIMENSION)
            .find(|n| n * n == area)
            .ok_or(Error::InvalidFaceletString)?;
        check_dimension(dimension)?;

        let f = s
            .chars()
            .map(Color::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let state = Self { dimension, f };

        if state.color_counts().iter().any(|&n| n != area) {
            return Err(Error::InvalidFaceletString);
        }
        if dimension % 2 == 1 {
            let mut centers: Vec<Color> = ALL_FACES.iter().map(|&face| state.center(face)).collect();
            centers.sort();
            centers.dedup();
            if centers.len() != 6 {
                return Err(Error::InvalidFaceletString);
            }
        }
        Ok(state)
    }
}

impl TryFrom<String> for CubeState {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CubeState::try_from(s.as_str())
    }
}

impl From<CubeState> for String {
    fn from(state: CubeState) -> Self {
        state.to_string()
    }
}

#[cfg(test)]
mod test {
    use crate::facelet::*;

    const SOLVED_3: &str = "YYYYYYYYYOOOOOOOOOGGGGGGGGGWWWWWWWWWRRRRRRRRRBBBBBBBBB";

    #[test]
    fn test_solved_state() {
        let cc = CubeState::solved(3).unwrap();
        assert!(cc.is_solved());
        assert_eq!(cc.to_string(), SOLVED_3);
        assert_eq!(cc.center(Face::Bottom), Color::White);
        assert_eq!(cc.color_counts(), [9; 6]);
    }

    #[test]
    fn test_invalid_dimension() {
        assert_eq!(CubeState::solved(1), Err(Error::InvalidDimension(1)));
        assert_eq!(CubeState::solved(0), Err(Error::InvalidDimension(0)));
        assert!(CubeState::solved(4).unwrap().is_solved());
    }

    #[test]
    fn test_facelet_string_round_trip() {
        let cc = CubeState::try_from(SOLVED_3).unwrap();
        assert_eq!(cc, CubeState::solved(3).unwrap());
        let four = CubeState::solved(4).unwrap();
        assert_eq!(CubeState::try_from(four.to_string().as_str()).unwrap(), four);
    }

    #[test]
    fn test_facelet_string_errors() {
        assert_eq!(
            CubeState::try_from("YYY"),
            Err(Error::InvalidFaceletString)
        );
        let bad_letter = SOLVED_3.replacen('Y', "X", 1);
        assert_eq!(
            CubeState::try_from(bad_letter.as_str()),
            Err(Error::InvalidFaceletValue('X'))
        );
        // one yellow too many, one orange too few
        let bad_count = SOLVED_3.replacen('O', "Y", 1);
        assert_eq!(
            CubeState::try_from(bad_count.as_str()),
            Err(Error::InvalidFaceletString)
        );
    }

    #[test]
    fn test_face_relations() {
        for face in ALL_FACES {
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.right_of().left_of(), face);
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
        assert_eq!(Face::Front.right_of(), Face::Right);
        assert_eq!(Face::Top.right_of(), Face::Top);
    }

    #[test]
    fn test_serde_as_facelet_string() {
        let cc = CubeState::solved(3).unwrap();
        let json = serde_json::to_string(&cc).unwrap();
        assert_eq!(json, format!("\"{}\"", SOLVED_3));
        let back: CubeState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cc);
        assert!(serde_json::from_str::<CubeState>("\"YYY\"").is_err());
    }
}
