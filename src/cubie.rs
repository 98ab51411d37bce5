//! Cube geometry on the cubie level.
//!
//! Stickers are placed on a lattice whose coordinates are doubled so that every coordinate is an
//! integer: on an N×N cube a cubie sits at odd or even offsets in `-(N-1)..=(N-1)` (step 2) and
//! a sticker lies on the surface plane `±N` of its face. Which stickers share a cubie, and where a
//! turn carries a sticker, both follow from these positions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::facelet::{Color, CubeState, Face, Facelet};

pub(crate) type Point = [i32; 3];

impl Face {
    /// Axis (0 = x to the right, 1 = y up, 2 = z toward the viewer) and sign of the outward normal.
    pub(crate) fn normal(self) -> (usize, i32) {
        match self {
            Face::Right => (0, 1),
            Face::Left => (0, -1),
            Face::Top => (1, 1),
            Face::Bottom => (1, -1),
            Face::Front => (2, 1),
            Face::Back => (2, -1),
        }
    }
}

/// Surface position of a sticker.
pub(crate) fn facelet_position(dimension: usize, facelet: Facelet) -> Point {
    let n = dimension as i32;
    let m = n - 1;
    let r = facelet.row as i32;
    let c = facelet.col as i32;
    match facelet.face {
        Face::Front => [-m + 2 * c, m - 2 * r, n],
        Face::Back => [m - 2 * c, m - 2 * r, -n],
        Face::Right => [n, m - 2 * r, m - 2 * c],
        Face::Left => [-n, m - 2 * r, -m + 2 * c],
        Face::Top => [-m + 2 * c, n, -m + 2 * r],
        Face::Bottom => [-m + 2 * c, -n, m - 2 * r],
    }
}

/// Inverse of [facelet_position]. `None` if the point is not a sticker position.
pub(crate) fn facelet_at(dimension: usize, p: Point) -> Option<Facelet> {
    let n = dimension as i32;
    let m = n - 1;
    let face = match p {
        [x, _, _] if x == n => Face::Right,
        [x, _, _] if x == -n => Face::Left,
        [_, y, _] if y == n => Face::Top,
        [_, y, _] if y == -n => Face::Bottom,
        [_, _, z] if z == n => Face::Front,
        [_, _, z] if z == -n => Face::Back,
        _ => return None,
    };
    let [x, y, z] = p;
    let (r2, c2) = match face {
        Face::Front => (m - y, x + m),
        Face::Back => (m - y, m - x),
        Face::Right => (m - y, m - z),
        Face::Left => (m - y, z + m),
        Face::Top => (z + m, x + m),
        Face::Bottom => (m - z, x + m),
    };
    if r2 < 0 || c2 < 0 || r2 % 2 != 0 || c2 % 2 != 0 || r2 / 2 >= n || c2 / 2 >= n {
        return None;
    }
    Some(Facelet::new(face, (r2 / 2) as usize, (c2 / 2) as usize))
}

/// Center of the cubie carrying a sticker.
pub(crate) fn cubie_of(dimension: usize, p: Point) -> Point {
    let m = dimension as i32 - 1;
    p.map(|v| v.clamp(-m, m))
}

/// Rotate a point a quarter turn about an axis, counter-clockwise when seen from the positive end.
pub(crate) fn rotate_ccw(p: Point, axis: usize) -> Point {
    let [x, y, z] = p;
    match axis {
        0 => [x, -z, y],
        1 => [z, y, -x],
        _ => [-y, x, z],
    }
}

/// True iff (i, j) is one of the four grid corners.
pub fn is_corner(dimension: usize, i: usize, j: usize) -> bool {
    let last = dimension.saturating_sub(1);
    (i == 0 || i == last) && (j == 0 || j == last)
}

/// Middle-of-border positions. They exist on odd cubes only.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum EdgeSlot {
    Top,
    Left,
    Right,
    Bottom,
}

impl EdgeSlot {
    pub const ALL: [EdgeSlot; 4] = [EdgeSlot::Top, EdgeSlot::Left, EdgeSlot::Right, EdgeSlot::Bottom];

    pub fn position(self, dimension: usize) -> Option<(usize, usize)> {
        if dimension % 2 == 0 {
            return None;
        }
        let mid = dimension / 2;
        let last = dimension - 1;
        Some(match self {
            EdgeSlot::Top => (0, mid),
            EdgeSlot::Left => (mid, 0),
            EdgeSlot::Right => (mid, last),
            EdgeSlot::Bottom => (last, mid),
        })
    }

    pub fn from_position(dimension: usize, i: usize, j: usize) -> Option<Self> {
        EdgeSlot::ALL
            .into_iter()
            .find(|slot| slot.position(dimension) == Some((i, j)))
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum CornerSlot {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerSlot {
    pub const ALL: [CornerSlot; 4] = [
        CornerSlot::TopLeft,
        CornerSlot::TopRight,
        CornerSlot::BottomLeft,
        CornerSlot::BottomRight,
    ];

    pub fn position(self, dimension: usize) -> (usize, usize) {
        let last = dimension.saturating_sub(1);
        match self {
            CornerSlot::TopLeft => (0, 0),
            CornerSlot::TopRight => (0, last),
            CornerSlot::BottomLeft => (last, 0),
            CornerSlot::BottomRight => (last, last),
        }
    }

    pub fn from_position(dimension: usize, i: usize, j: usize) -> Option<Self> {
        CornerSlot::ALL
            .into_iter()
            .find(|slot| slot.position(dimension) == (i, j))
    }
}

/// The other stickers of the cubie that carries `facelet`, ordered by axis.
pub(crate) fn cubie_mates(dimension: usize, facelet: Facelet) -> Vec<Facelet> {
    let n = dimension as i32;
    let m = n - 1;
    let (axis, _) = facelet.face.normal();
    let cubie = cubie_of(dimension, facelet_position(dimension, facelet));
    (0..3)
        .filter(|&b| b != axis && cubie[b].abs() == m)
        .filter_map(|b| {
            let mut p = cubie;
            p[b] = n * cubie[b].signum();
            facelet_at(dimension, p)
        })
        .collect()
}

/// Class tables are shape-only, so the smallest odd cube describes every odd cube.
const TABLE_DIMENSION: usize = 3;

fn build_edge_table() -> HashMap<(Face, EdgeSlot), (Face, EdgeSlot)> {
    let mut table = HashMap::new();
    for face in ALL_FACES {
        for slot in EdgeSlot::ALL {
            let Some((i, j)) = slot.position(TABLE_DIMENSION) else {
                continue;
            };
            let mates = cubie_mates(TABLE_DIMENSION, Facelet::new(face, i, j));
            if let [mate] = mates.as_slice() {
                if let Some(mate_slot) = EdgeSlot::from_position(TABLE_DIMENSION, mate.row, mate.col) {
                    table.insert((face, slot), (mate.face, mate_slot));
                }
            }
        }
    }
    table
}

fn build_corner_table() -> HashMap<(Face, CornerSlot), [(Face, CornerSlot); 2]> {
    let mut table = HashMap::new();
    for face in ALL_FACES {
        for slot in CornerSlot::ALL {
            let (i, j) = slot.position(TABLE_DIMENSION);
            let mates: Vec<(Face, CornerSlot)> = cubie_mates(TABLE_DIMENSION, Facelet::new(face, i, j))
                .into_iter()
                .filter_map(|mate| {
                    CornerSlot::from_position(TABLE_DIMENSION, mate.row, mate.col)
                        .map(|mate_slot| (mate.face, mate_slot))
                })
                .collect();
            if let [a, b] = mates.as_slice() {
                table.insert((face, slot), [*a, *b]);
            }
        }
    }
    table
}

lazy_static! {
    static ref EDGE_TABLE: HashMap<(Face, EdgeSlot), (Face, EdgeSlot)> = build_edge_table();
    static ref CORNER_TABLE: HashMap<(Face, CornerSlot), [(Face, CornerSlot); 2]> = build_corner_table();
    static ref EDGES: Vec<Piece> = collect_edges();
    static ref CORNERS: Vec<Piece> = collect_corners();
}

/// Face and slot of the sticker glued to the same edge cubie as (`face`, `slot`).
pub fn edge_mate(face: Face, slot: EdgeSlot) -> Option<(Face, EdgeSlot)> {
    EDGE_TABLE.get(&(face, slot)).copied()
}

/// Faces and slots of the two stickers glued to the same corner cubie as (`face`, `slot`).
pub fn corner_mates(face: Face, slot: CornerSlot) -> Option<[(Face, CornerSlot); 2]> {
    CORNER_TABLE.get(&(face, slot)).copied()
}

/// A sticker found through the correspondence tables.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct CorrespondingPiece {
    pub color: Color,
    pub side: Face,
    pub row: usize,
    pub col: usize,
}

impl CorrespondingPiece {
    fn read(cube: &CubeState, side: Face, (row, col): (usize, usize)) -> Self {
        Self {
            color: cube.get(side, row, col),
            side,
            row,
            col,
        }
    }
}

/// The other sticker of the edge cubie at (i, j) on `side`.
///
/// `None` when (i, j) is not a middle-of-border position of this cube, which callers rule out by
/// classifying positions first.
pub fn corresponding_edge_piece(
    cube: &CubeState,
    i: usize,
    j: usize,
    side: Face,
) -> Option<CorrespondingPiece> {
    let dimension = cube.dimension();
    let slot = EdgeSlot::from_position(dimension, i, j)?;
    let (mate_face, mate_slot) = edge_mate(side, slot)?;
    let position = mate_slot.position(dimension)?;
    Some(CorrespondingPiece::read(cube, mate_face, position))
}

/// The other two stickers of the corner cubie at (i, j) on `side`.
pub fn corresponding_corner_pieces(
    cube: &CubeState,
    i: usize,
    j: usize,
    side: Face,
) -> Option<[CorrespondingPiece; 2]> {
    let dimension = cube.dimension();
    if !is_corner(dimension, i, j) {
        return None;
    }
    let slot = CornerSlot::from_position(dimension, i, j)?;
    let [a, b] = corner_mates(side, slot)?;
    Some([
        CorrespondingPiece::read(cube, a.0, a.1.position(dimension)),
        CorrespondingPiece::read(cube, b.0, b.1.position(dimension)),
    ])
}

/// A physical edge or corner cubie slot of the 3x3 cube, named by its stickers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Piece {
    Edge([Facelet; 2]),
    Corner([Facelet; 3]),
}

impl Piece {
    pub fn facelets(&self) -> &[Facelet] {
        match self {
            Piece::Edge(f) => f,
            Piece::Corner(f) => f,
        }
    }

    pub fn has_faces(&self, faces: &[Face]) -> bool {
        let facelets = self.facelets();
        facelets.len() == faces.len() && faces.iter().all(|face| facelets.iter().any(|f| f.face == *face))
    }

    /// Every sticker of the slot shows its face's center color. Always false off the 3x3 cube.
    pub fn is_home(&self, cube: &CubeState) -> bool {
        cube.dimension() == TABLE_DIMENSION
            && self
                .facelets()
                .iter()
                .all(|f| cube.sticker(*f) == cube.center(f.face))
    }

    /// Colors currently in the slot, sorted, which identifies the cubie sitting there.
    pub fn colors(&self, cube: &CubeState) -> Vec<Color> {
        let mut colors: Vec<Color> = self.facelets().iter().map(|f| cube.sticker(*f)).collect();
        colors.sort();
        colors
    }

    /// Colors of the cubie that belongs in this slot, sorted.
    pub fn home_colors(&self, cube: &CubeState) -> Vec<Color> {
        let mut colors: Vec<Color> = self.facelets().iter().map(|f| cube.center(f.face)).collect();
        colors.sort();
        colors
    }
}

fn collect_edges() -> Vec<Piece> {
    let mut pieces = Vec::new();
    for ((face, slot), (mate_face, mate_slot)) in EDGE_TABLE.iter() {
        if face > mate_face {
            continue;
        }
        if let (Some((i, j)), Some((k, l))) = (slot.position(TABLE_DIMENSION), mate_slot.position(TABLE_DIMENSION)) {
            pieces.push(Piece::Edge([
                Facelet::new(*face, i, j),
                Facelet::new(*mate_face, k, l),
            ]));
        }
    }
    pieces.sort_by_key(|p| piece_key(p));
    pieces
}

fn collect_corners() -> Vec<Piece> {
    let mut pieces = Vec::new();
    for ((face, slot), [a, b]) in CORNER_TABLE.iter() {
        if face > &a.0 || face > &b.0 {
            continue;
        }
        let (i, j) = slot.position(TABLE_DIMENSION);
        let (ai, aj) = a.1.position(TABLE_DIMENSION);
        let (bi, bj) = b.1.position(TABLE_DIMENSION);
        pieces.push(Piece::Corner([
            Facelet::new(*face, i, j),
            Facelet::new(a.0, ai, aj),
            Facelet::new(b.0, bi, bj),
        ]));
    }
    pieces.sort_by_key(|p| piece_key(p));
    pieces
}

fn piece_key(piece: &Piece) -> Vec<(usize, usize, usize)> {
    piece
        .facelets()
        .iter()
        .map(|f| (f.face.index(), f.row, f.col))
        .collect()
}

/// The twelve edge slots of the 3x3 cube.
pub fn edges() -> &'static [Piece] {
    &EDGES
}

/// The eight corner slots of the 3x3 cube.
pub fn corners() -> &'static [Piece] {
    &CORNERS
}

/// The 3x3 slot whose stickers lie on exactly `faces`.
pub fn find_piece(faces: &[Face]) -> Option<Piece> {
    EDGES
        .iter()
        .chain(CORNERS.iter())
        .find(|piece| piece.has_faces(faces))
        .copied()
}

#[cfg(test)]
mod test {
    use crate::cubie::*;

    #[test]
    fn test_position_round_trip() {
        for dimension in [2, 3, 4, 5] {
            for face in ALL_FACES {
                for row in 0..dimension {
                    for col in 0..dimension {
                        let f = Facelet::new(face, row, col);
                        assert_eq!(facelet_at(dimension, facelet_position(dimension, f)), Some(f));
                    }
                }
            }
        }
    }

    #[test]
    fn test_is_corner() {
        assert!(is_corner(3, 0, 0));
        assert!(is_corner(3, 0, 2));
        assert!(is_corner(3, 2, 0));
        assert!(is_corner(3, 2, 2));
        assert!(!is_corner(3, 1, 2));
        assert!(!is_corner(3, 1, 1));
        assert!(is_corner(5, 4, 0));
        assert!(!is_corner(5, 2, 0));
    }

    #[test]
    fn test_edge_table_complete_and_symmetric() {
        for face in ALL_FACES {
            for slot in EdgeSlot::ALL {
                let (mate_face, mate_slot) = edge_mate(face, slot).unwrap();
                assert_ne!(mate_face, face);
                assert_ne!(mate_face, face.opposite());
                assert_eq!(edge_mate(mate_face, mate_slot), Some((face, slot)));
            }
        }
    }

    #[test]
    fn test_corner_table_complete_and_symmetric() {
        for face in ALL_FACES {
            for slot in CornerSlot::ALL {
                let [a, b] = corner_mates(face, slot).unwrap();
                assert_ne!(a.0, b.0);
                let from_a = corner_mates(a.0, a.1).unwrap();
                assert!(from_a.contains(&(face, slot)));
                assert!(from_a.contains(&b));
            }
        }
    }

    #[test]
    fn test_corresponding_edge_piece_on_solved_cube() {
        let cc = CubeState::solved(3).unwrap();
        // Bottom row of Front touches Bottom.
        let mate = corresponding_edge_piece(&cc, 2, 1, Face::Front).unwrap();
        assert_eq!(mate.side, Face::Bottom);
        assert_eq!(mate.color, Color::White);
        assert_eq!((mate.row, mate.col), (0, 1));
        // Top row of Front touches the bottom row of Top.
        let mate = corresponding_edge_piece(&cc, 0, 1, Face::Front).unwrap();
        assert_eq!((mate.side, mate.row, mate.col), (Face::Top, 2, 1));
        // Right column of Front touches the left column of Right.
        let mate = corresponding_edge_piece(&cc, 1, 2, Face::Front).unwrap();
        assert_eq!((mate.side, mate.row, mate.col), (Face::Right, 1, 0));
        assert_eq!(mate.color, Color::Orange);
    }

    #[test]
    fn test_corresponding_edge_piece_larger_cube() {
        let cc = CubeState::solved(5).unwrap();
        let mate = corresponding_edge_piece(&cc, 4, 2, Face::Front).unwrap();
        assert_eq!((mate.side, mate.row, mate.col), (Face::Bottom, 0, 2));
    }

    #[test]
    fn test_corresponding_lookup_miss() {
        let cc = CubeState::solved(3).unwrap();
        assert_eq!(corresponding_edge_piece(&cc, 0, 0, Face::Front), None);
        assert_eq!(corresponding_edge_piece(&cc, 1, 1, Face::Front), None);
        assert_eq!(corresponding_corner_pieces(&cc, 0, 1, Face::Front), None);
        let even = CubeState::solved(4).unwrap();
        assert_eq!(corresponding_edge_piece(&even, 0, 2, Face::Front), None);
    }

    #[test]
    fn test_corresponding_corner_pieces() {
        let cc = CubeState::solved(3).unwrap();
        let mates = corresponding_corner_pieces(&cc, 2, 2, Face::Front).unwrap();
        let mut sides: Vec<Face> = mates.iter().map(|m| m.side).collect();
        sides.sort();
        assert_eq!(sides, vec![Face::Right, Face::Bottom]);
    }

    #[test]
    fn test_piece_catalogue() {
        assert_eq!(edges().len(), 12);
        assert_eq!(corners().len(), 8);
        let cc = CubeState::solved(3).unwrap();
        assert!(edges().iter().chain(corners()).all(|p| p.is_home(&cc)));
        let dfr = find_piece(&[Face::Bottom, Face::Front, Face::Right]).unwrap();
        assert!(matches!(dfr, Piece::Corner(_)));
        assert_eq!(dfr.colors(&cc), vec![Color::White, Color::Green, Color::Orange]);
        assert_eq!(find_piece(&[Face::Top, Face::Bottom]), None);
    }

    #[test]
    fn test_pieces_never_home_off_3x3() {
        for dimension in [2, 4, 5] {
            let cc = CubeState::solved(dimension).unwrap();
            assert!(edges().iter().chain(corners()).all(|p| !p.is_home(&cc)));
        }
    }
}
