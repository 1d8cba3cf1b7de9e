// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack detection, used only to decide where a king may step.
//!
//! A square counts as attacked by a color if any non-king piece of that
//! color could move there quietly, could capture there, or (for pawns)
//! covers it diagonally. The capture test is also run with the attacker's
//! color flipped, so a piece that would "capture" one of its own side is
//! treated as defending that square; this is what stops a king from taking
//! a protected piece. Pawns get the flipped test too, and since a flipped
//! pawn captures in the other direction, a pawn also defends its own
//! pieces on the diagonals behind it.
//!
//! Kings never count as attackers. Asking whether the enemy king attacks a
//! square would mean asking for that king's legal moves, which consult this
//! module again for the other side, and so on without end. Two kings may
//! therefore end up adjacent; that gap is deliberate and must not be closed
//! by routing king moves back through `legality`.
//!
//! The attack is judged on the board as it stands: the king whose moves are
//! being filtered still blocks rays running through its own square.
use crate::attacks;
use crate::bitboard::Bitboard;
use crate::movegen;
use crate::position::Position;
use crate::types::{Color, Piece, PieceKind, Square};

/// The squares of every `by`-colored piece that attacks `target`.
pub fn squares_attacking(pos: &Position, target: Square, by: Color) -> Bitboard {
    let mut attackers = Bitboard::none();
    for (sq, piece) in pos.iter_color(by) {
        if threatens(pos, sq, piece, target) {
            attackers.set(sq);
        }
    }

    attackers
}

/// Whether any non-king piece of color `by` attacks `target`.
pub fn is_attacked(pos: &Position, target: Square, by: Color) -> bool {
    pos.iter_color(by)
        .any(|(sq, piece)| threatens(pos, sq, piece, target))
}

fn threatens(pos: &Position, from: Square, piece: Piece, target: Square) -> bool {
    match piece.kind {
        PieceKind::King => false,
        // Pawn diagonals cover the square whether or not anything is there.
        // The flipped-color pawn captures backwards, so a pawn also covers
        // its own pieces standing behind it on a diagonal.
        PieceKind::Pawn => {
            if attacks::pawn_attacks(from, piece.color).test(target) {
                return true;
            }

            let defender = piece.with_opposite_color();
            movegen::capture_moves(pos, from, defender).contains(&target)
        }
        _ => {
            if movegen::quiet_moves(pos, from, piece).contains(&target) {
                return true;
            }

            if movegen::capture_moves(pos, from, piece).contains(&target) {
                return true;
            }

            let defender = piece.with_opposite_color();
            movegen::capture_moves(pos, from, defender).contains(&target)
        }
    }
}
