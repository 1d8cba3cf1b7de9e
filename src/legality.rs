// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! King-safety filtering. This is the only legality check the engine makes:
//! a king may not step onto, or capture on, a square the other side attacks.
//! Other pieces are never checked for pins, and nothing here asks whether a
//! king is currently in check.
use crate::movegen::{self, MoveSet};
use crate::position::Position;
use crate::threats;
use crate::types::{Color, Piece, PieceKind, Square};

/// The king's raw steps and captures with every square attacked by the
/// other side removed.
pub fn legal_king_moves(pos: &Position, sq: Square, king: Piece) -> MoveSet {
    debug_assert_eq!(PieceKind::King, king.kind);
    let enemy = king.color.opposite();
    let mut set = movegen::pseudo_moves(pos, sq, king);
    set.quiet.retain(|&mut to| {
        let attacked = threats::is_attacked(pos, to, enemy);
        trace!("king {} -> {}: attacked = {}", sq, to, attacked);
        !attacked
    });
    set.captures.retain(|&mut to| {
        let attacked = threats::is_attacked(pos, to, enemy);
        trace!("king {} x {}: attacked = {}", sq, to, attacked);
        !attacked
    });
    set
}

/// Destinations for `piece` standing on `sq`. Kings go through the safety
/// filter; every other kind gets its raw lists.
pub fn moves_for(pos: &Position, sq: Square, piece: Piece) -> MoveSet {
    match piece.kind {
        PieceKind::King => legal_king_moves(pos, sq, piece),
        _ => movegen::pseudo_moves(pos, sq, piece),
    }
}

/// Whether `color` has a king and none of its kings can move or capture.
///
/// This does not look at whether the king is attacked where it stands, so
/// a stalemated king also reports as mated.
pub fn is_mate(pos: &Position, color: Color) -> bool {
    let kings = pos.kings(color);
    if kings.empty() {
        return false;
    }

    let king = Piece::new(PieceKind::King, color);
    kings
        .iter()
        .all(|sq| legal_king_moves(pos, sq, king).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn white_king() -> Piece {
        Piece::new(PieceKind::King, Color::White)
    }

    #[test]
    fn king_avoids_rook_file() {
        let pos = Position::from_fen("8/8/8/8/4r3/8/8/4K3 w").unwrap();
        let set = legal_king_moves(&pos, Square::E1, white_king());
        assert!(!set.contains(Square::E2));
        assert!(set.contains(Square::D1));
        assert!(set.contains(Square::F1));
        assert!(set.contains(Square::D2));
        assert!(set.contains(Square::F2));
        assert!(set.captures.is_empty());
    }

    #[test]
    fn king_cannot_take_defended_piece() {
        // The knight on d2 is covered by the bishop on a5.
        let pos = Position::from_fen("8/8/8/b7/8/8/3n4/4K3 w").unwrap();
        let set = legal_king_moves(&pos, Square::E1, white_king());
        assert!(!set.captures.contains(&Square::D2));
    }

    #[test]
    fn king_takes_loose_piece() {
        let pos = Position::from_fen("8/8/8/8/8/8/3n4/4K3 w").unwrap();
        let set = legal_king_moves(&pos, Square::E1, white_king());
        assert_eq!(&[Square::D2], set.captures.as_slice());
        // The knight on d2 covers f1 and f3, but only f1 is adjacent.
        assert!(!set.quiet.contains(&Square::F1));
    }

    #[test]
    fn king_cannot_take_piece_behind_pawn() {
        let pos = Position::from_fen("8/2K5/3b4/4p3/8/8/8/8 w").unwrap();
        let set = legal_king_moves(&pos, Square::C7, white_king());
        assert!(set.captures.is_empty());
        assert!(!set.contains(Square::D6));
    }

    #[test]
    fn other_pieces_are_not_filtered() {
        // The bishop is pinned against its king, but pins are not tracked.
        let pos = Position::from_fen("4r3/8/8/8/8/8/4B3/4K3 w").unwrap();
        let bishop = Piece::new(PieceKind::Bishop, Color::White);
        let set = moves_for(&pos, Square::E2, bishop);
        assert!(set.contains(Square::D3));
        assert_eq!(movegen::pseudo_moves(&pos, Square::E2, bishop), set);
    }

    #[test]
    fn enemy_king_is_not_an_attacker() {
        let pos = Position::from_fen("8/8/8/8/8/4k3/8/4K3 w").unwrap();
        let set = legal_king_moves(&pos, Square::E1, white_king());
        assert!(set.contains(Square::E2));
        assert_eq!(5, set.len());
    }

    #[test]
    fn cornered_king_is_mate() {
        // The queen on b2 is covered by the rook on b8.
        let pos = Position::from_fen("1r6/8/8/8/8/8/1q6/K7 w").unwrap();
        assert!(is_mate(&pos, Color::White));
        assert!(!is_mate(&pos, Color::Black));
    }

    #[test]
    fn stalemate_reads_as_mate() {
        // The white king is not attacked on a1, yet has nowhere to go.
        let pos = Position::from_fen("8/8/8/8/8/1q6/8/K7 w").unwrap();
        assert!(!threats::is_attacked(&pos, Square::A1, Color::Black));
        assert!(is_mate(&pos, Color::White));
    }

    #[test]
    fn boxed_in_king_reads_as_mate() {
        // Both kings start surrounded by their own pieces.
        let pos = Position::from_start_position();
        assert!(is_mate(&pos, Color::White));
        assert!(is_mate(&pos, Color::Black));

        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR b").unwrap();
        assert!(!is_mate(&pos, Color::White));
    }

    #[test]
    fn no_king_no_mate() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/R7 w").unwrap();
        assert!(!is_mate(&pos, Color::White));
    }
}
