// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-kind destination generation. Every piece kind has two generators:
//! one for quiet moves (destination empty) and one for captures
//! (destination holds a piece of the other color). The two lists for a
//! piece are always disjoint.
//!
//! Nothing here knows about king safety. `legality::moves_for` is the
//! entry point for callers that want the filtered king lists.
use arrayvec::ArrayVec;
use std::convert::TryFrom;
use std::fmt;

use crate::attacks;
use crate::legality;
use crate::position::Position;
use crate::types::{Color, Direction, Piece, PieceKind, Square};
use crate::types::{DIAGONALS, ORTHOGONALS};

/// A list of destination squares. A queen in the middle of an empty board
/// reaches 27 squares, the most any single piece can.
pub type SquareVec = ArrayVec<[Square; 32]>;

/// A piece relocation from one square to another. Whether it captures is
/// a property of the position it is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Parses the coordinate form used by the console, e.g. `e2e4`.
impl TryFrom<&str> for Move {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() != 4 || !value.is_ascii() {
            return Err(());
        }

        let from = Square::try_from(&value[0..2])?;
        let to = Square::try_from(&value[2..4])?;
        Ok(Move::new(from, to))
    }
}

/// Destinations available to a single piece, split by whether they capture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSet {
    pub quiet: SquareVec,
    pub captures: SquareVec,
}

impl MoveSet {
    pub fn contains(&self, square: Square) -> bool {
        self.quiet.contains(&square) || self.captures.contains(&square)
    }

    pub fn is_empty(&self) -> bool {
        self.quiet.is_empty() && self.captures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quiet.len() + self.captures.len()
    }

    /// All destinations, quiet moves first.
    pub fn destinations<'a>(&'a self) -> impl Iterator<Item = Square> + 'a {
        self.quiet.iter().chain(self.captures.iter()).copied()
    }
}

//
// Pawns
//

/// Forward pushes for a pawn. The double step is only offered from the
/// pawn's starting rank and only when both squares ahead are empty. A pawn
/// standing on its last rank has no forward moves.
pub fn pawn_moves(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let mut moves = SquareVec::new();
    let forward = color.forward();
    let start_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    let single = match sq.offset(0, forward) {
        Some(single) => single,
        None => return moves,
    };

    if pos.is_occupied(single) {
        return moves;
    }

    moves.push(single);
    if sq.coords().1 == start_rank {
        if let Some(double) = sq.offset(0, 2 * forward) {
            if !pos.is_occupied(double) {
                moves.push(double);
            }
        }
    }

    moves
}

/// Forward diagonals of a pawn that currently hold an enemy piece.
pub fn pawn_captures(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let targets = attacks::pawn_attacks(sq, color) & pos.pieces(color.opposite());
    targets.iter().collect()
}

//
// Knights
//

pub fn knight_moves(pos: &Position, sq: Square) -> SquareVec {
    let targets = attacks::knight_attacks(sq) & !pos.occupancy();
    targets.iter().collect()
}

pub fn knight_captures(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let targets = attacks::knight_attacks(sq) & pos.pieces(color.opposite());
    targets.iter().collect()
}

//
// Sliders
//

fn slide_moves(pos: &Position, sq: Square, dirs: &[Direction], moves: &mut SquareVec) {
    let occupancy = pos.occupancy();
    for &dir in dirs {
        let mut cursor = sq.towards(dir);
        while let Some(to) = cursor {
            if occupancy.test(to) {
                break;
            }

            moves.push(to);
            cursor = to.towards(dir);
        }
    }
}

fn slide_captures(
    pos: &Position,
    sq: Square,
    color: Color,
    dirs: &[Direction],
    moves: &mut SquareVec,
) {
    let occupancy = pos.occupancy();
    let enemies = pos.pieces(color.opposite());
    for &dir in dirs {
        let mut cursor = sq.towards(dir);
        while let Some(to) = cursor {
            // The first occupied square ends the ray either way; it only
            // becomes a capture if it holds an enemy.
            if occupancy.test(to) {
                if enemies.test(to) {
                    moves.push(to);
                }
                break;
            }

            cursor = to.towards(dir);
        }
    }
}

pub fn bishop_moves(pos: &Position, sq: Square) -> SquareVec {
    let mut moves = SquareVec::new();
    slide_moves(pos, sq, &DIAGONALS, &mut moves);
    moves
}

pub fn bishop_captures(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let mut moves = SquareVec::new();
    slide_captures(pos, sq, color, &DIAGONALS, &mut moves);
    moves
}

pub fn rook_moves(pos: &Position, sq: Square) -> SquareVec {
    let mut moves = SquareVec::new();
    slide_moves(pos, sq, &ORTHOGONALS, &mut moves);
    moves
}

pub fn rook_captures(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let mut moves = SquareVec::new();
    slide_captures(pos, sq, color, &ORTHOGONALS, &mut moves);
    moves
}

/// Rook rays followed by bishop rays.
pub fn queen_moves(pos: &Position, sq: Square) -> SquareVec {
    let mut moves = SquareVec::new();
    slide_moves(pos, sq, &ORTHOGONALS, &mut moves);
    slide_moves(pos, sq, &DIAGONALS, &mut moves);
    moves
}

pub fn queen_captures(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let mut moves = SquareVec::new();
    slide_captures(pos, sq, color, &ORTHOGONALS, &mut moves);
    slide_captures(pos, sq, color, &DIAGONALS, &mut moves);
    moves
}

//
// Kings
//

/// Unfiltered king steps onto empty squares. See `legality` for the
/// version that drops attacked squares.
pub fn king_moves(pos: &Position, sq: Square) -> SquareVec {
    let targets = attacks::king_attacks(sq) & !pos.occupancy();
    targets.iter().collect()
}

pub fn king_captures(pos: &Position, sq: Square, color: Color) -> SquareVec {
    let targets = attacks::king_attacks(sq) & pos.pieces(color.opposite());
    targets.iter().collect()
}

//
// Dispatch
//

/// Quiet destinations for `piece` standing on `sq`. The piece is taken as
/// given rather than read from the board, which lets the attack oracle ask
/// about hypothetical pieces.
pub fn quiet_moves(pos: &Position, sq: Square, piece: Piece) -> SquareVec {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(pos, sq, piece.color),
        PieceKind::Knight => knight_moves(pos, sq),
        PieceKind::Bishop => bishop_moves(pos, sq),
        PieceKind::Rook => rook_moves(pos, sq),
        PieceKind::Queen => queen_moves(pos, sq),
        PieceKind::King => king_moves(pos, sq),
    }
}

/// Capture destinations for `piece` standing on `sq`: squares its capture
/// pattern reaches that hold a piece of the other color.
pub fn capture_moves(pos: &Position, sq: Square, piece: Piece) -> SquareVec {
    match piece.kind {
        PieceKind::Pawn => pawn_captures(pos, sq, piece.color),
        PieceKind::Knight => knight_captures(pos, sq, piece.color),
        PieceKind::Bishop => bishop_captures(pos, sq, piece.color),
        PieceKind::Rook => rook_captures(pos, sq, piece.color),
        PieceKind::Queen => queen_captures(pos, sq, piece.color),
        PieceKind::King => king_captures(pos, sq, piece.color),
    }
}

/// Both lists for a piece, with no king-safety filtering applied.
pub fn pseudo_moves(pos: &Position, sq: Square, piece: Piece) -> MoveSet {
    MoveSet {
        quiet: quiet_moves(pos, sq, piece),
        captures: capture_moves(pos, sq, piece),
    }
}

/// Appends every move available to the side to move, with king moves
/// filtered for safety.
pub fn generate_moves(pos: &Position, moves: &mut Vec<Move>) {
    let color = pos.side_to_move();
    for (from, piece) in pos.iter_color(color) {
        let set = legality::moves_for(pos, from, piece);
        moves.extend(set.destinations().map(|to| Move::new(from, to)));
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use crate::bitboard::Bitboard;
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn to_bitboard(squares: &[Square]) -> Bitboard {
        let mut board = Bitboard::none();
        for &sq in squares {
            board.set(sq);
        }

        board
    }

    fn sorted(squares: &[Square]) -> Vec<Square> {
        let mut v = squares.to_vec();
        v.sort_by_key(|&sq| sq as u8);
        v
    }

    fn squares(names: &[&str]) -> Vec<Square> {
        let v: Vec<_> = names
            .iter()
            .map(|&name| Square::try_from(name).unwrap())
            .collect();
        sorted(&v)
    }

    mod pawns {
        use super::*;

        #[test]
        fn opening_double_step() {
            let pos = Position::from_start_position();
            let moves = pawn_moves(&pos, Square::E2, Color::White);
            assert_eq!(squares(&["e3", "e4"]), sorted(&moves));
            assert!(pawn_captures(&pos, Square::E2, Color::White).is_empty());

            let moves = pawn_moves(&pos, Square::D7, Color::Black);
            assert_eq!(squares(&["d6", "d5"]), sorted(&moves));
        }

        #[test]
        fn double_step_needs_both_squares() {
            let pos = Position::from_fen("8/8/8/8/4n3/8/4P3/8 w").unwrap();
            assert_eq!(
                squares(&["e3"]),
                sorted(&pawn_moves(&pos, Square::E2, Color::White))
            );

            let pos = Position::from_fen("8/8/8/8/8/4n3/4P3/8 w").unwrap();
            assert!(pawn_moves(&pos, Square::E2, Color::White).is_empty());
        }

        #[test]
        fn no_double_step_off_start_rank() {
            let pos = Position::from_fen("8/8/8/8/8/4P3/8/8 w").unwrap();
            assert_eq!(
                squares(&["e4"]),
                sorted(&pawn_moves(&pos, Square::E3, Color::White))
            );
        }

        #[test]
        fn blocked_pawn_never_captures_forward() {
            let pos = Position::from_fen("8/8/8/8/4p3/4P3/8/8 w").unwrap();
            assert!(pawn_moves(&pos, Square::E3, Color::White).is_empty());
            assert!(pawn_captures(&pos, Square::E3, Color::White).is_empty());
        }

        #[test]
        fn diagonal_captures_only_enemies() {
            let pos = Position::from_fen("8/8/8/3p1N2/4P3/8/8/8 w").unwrap();
            assert_eq!(
                squares(&["d5"]),
                sorted(&pawn_captures(&pos, Square::E4, Color::White))
            );
        }

        #[test]
        fn black_captures_downward() {
            let pos = Position::from_fen("8/8/8/3p4/2P1P3/8/8/8 b").unwrap();
            assert_eq!(
                squares(&["c4", "e4"]),
                sorted(&pawn_captures(&pos, Square::D5, Color::Black))
            );
        }

        #[test]
        fn last_rank_pawn_is_stuck() {
            let pos = Position::from_fen("4P3/8/8/8/8/8/8/4p3 w").unwrap();
            assert!(pawn_moves(&pos, Square::E8, Color::White).is_empty());
            assert!(pawn_moves(&pos, Square::E1, Color::Black).is_empty());
        }
    }

    mod knights {
        use super::*;

        #[test]
        fn corner_knight() {
            let pos = Position::from_fen("8/8/8/8/8/1p6/8/N7 w").unwrap();
            assert_eq!(squares(&["c2"]), sorted(&knight_moves(&pos, Square::A1)));
            assert_eq!(
                squares(&["b3"]),
                sorted(&knight_captures(&pos, Square::A1, Color::White))
            );
        }

        #[test]
        fn jumps_over_blockers() {
            let pos = Position::from_start_position();
            assert_eq!(
                squares(&["a3", "c3"]),
                sorted(&knight_moves(&pos, Square::B1))
            );
        }

        #[test]
        fn own_pieces_are_neither() {
            let pos = Position::from_fen("8/8/8/8/8/2P5/8/1N6 w").unwrap();
            let set = pseudo_moves(&pos, Square::B1, Piece::new(PieceKind::Knight, Color::White));
            assert!(!set.contains(Square::C3));
            assert_eq!(squares(&["a3", "d2"]), sorted(&set.quiet));
        }
    }

    mod sliders {
        use super::*;

        #[test]
        fn rook_blocked_by_own_pawn() {
            let pos = Position::from_start_position();
            assert!(rook_moves(&pos, Square::A1).is_empty());
            assert!(rook_captures(&pos, Square::A1, Color::White).is_empty());
        }

        #[test]
        fn rook_ray_stops_at_enemy() {
            let pos = Position::from_fen("8/8/8/R2p4/8/8/8/8 w").unwrap();
            let quiet = rook_moves(&pos, Square::A5);
            assert!(quiet.contains(&Square::B5));
            assert!(quiet.contains(&Square::C5));
            assert!(!quiet.contains(&Square::D5));
            assert!(!quiet.contains(&Square::E5));
            assert_eq!(
                squares(&["d5"]),
                sorted(&rook_captures(&pos, Square::A5, Color::White))
            );
            assert_eq!(3 + 4 + 2, quiet.len());
        }

        #[test]
        fn bishop_open_board() {
            let pos = Position::from_fen("8/8/8/8/3B4/8/8/8 w").unwrap();
            assert_eq!(13, bishop_moves(&pos, Square::D4).len());
        }

        #[test]
        fn bishop_ray_ends_at_own_piece() {
            let pos = Position::from_fen("8/8/5P2/8/3B4/8/1p6/8 w").unwrap();
            let quiet = bishop_moves(&pos, Square::D4);
            assert!(quiet.contains(&Square::E5));
            assert!(!quiet.contains(&Square::F6));
            assert!(!quiet.contains(&Square::G7));
            assert!(quiet.contains(&Square::C3));
            assert!(!quiet.contains(&Square::B2));
            assert_eq!(
                squares(&["b2"]),
                sorted(&bishop_captures(&pos, Square::D4, Color::White))
            );
        }

        #[test]
        fn queen_is_rook_plus_bishop() {
            let pos = Position::from_fen("8/1p6/8/8/3Q4/8/5P2/3n4 w").unwrap();
            let mut union: Vec<Square> = rook_moves(&pos, Square::D4).to_vec();
            union.extend(bishop_moves(&pos, Square::D4).iter());
            assert_eq!(sorted(&union), sorted(&queen_moves(&pos, Square::D4)));

            let mut captures: Vec<Square> = rook_captures(&pos, Square::D4, Color::White).to_vec();
            captures.extend(bishop_captures(&pos, Square::D4, Color::White).iter());
            assert_eq!(squares(&["d1"]), sorted(&captures));
            assert_eq!(
                sorted(&captures),
                sorted(&queen_captures(&pos, Square::D4, Color::White))
            );
        }

        #[test]
        fn open_queen_reaches_27() {
            let pos = Position::from_fen("8/8/8/8/3Q4/8/8/8 w").unwrap();
            assert_eq!(27, queen_moves(&pos, Square::D4).len());
        }
    }

    mod kings {
        use super::*;

        #[test]
        fn raw_king_steps() {
            let pos = Position::from_fen("8/8/8/8/8/8/3p4/4K3 w").unwrap();
            assert_eq!(
                squares(&["d1", "e2", "f1", "f2"]),
                sorted(&king_moves(&pos, Square::E1))
            );
            assert_eq!(
                squares(&["d2"]),
                sorted(&king_captures(&pos, Square::E1, Color::White))
            );
        }
    }

    #[test]
    fn quiet_and_capture_lists_are_disjoint() {
        let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w")
            .unwrap();
        for (sq, piece) in pos.iter() {
            let set = pseudo_moves(&pos, sq, piece);
            let quiet = to_bitboard(&set.quiet);
            let captures = to_bitboard(&set.captures);
            assert!((quiet & captures).empty(), "{} on {}", piece, sq);
            assert!((quiet & pos.occupancy()).empty());
            assert!((captures & !pos.pieces(piece.color.opposite())).empty());
        }
    }

    #[test]
    fn move_text() {
        let mov = Move::try_from("e2e4").unwrap();
        assert_eq!(Move::new(Square::E2, Square::E4), mov);
        assert_eq!("e2e4", mov.to_string());
        assert!(Move::try_from("e2e").is_err());
        assert!(Move::try_from("e2e9").is_err());
    }

    #[test]
    fn start_position_move_count() {
        let pos = Position::from_start_position();
        let mut moves = Vec::new();
        generate_moves(&pos, &mut moves);
        assert_eq!(20, moves.len());
    }
}
