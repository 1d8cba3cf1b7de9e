// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed reach of the fixed-offset pieces. Knights, kings and pawn
//! diagonals never depend on what else is on the board, so their target
//! squares are computed once per square and looked up afterwards. These
//! tables say nothing about occupancy; the generators intersect them with
//! the position's bitboards.
use crate::bitboard::Bitboard;
use crate::types::{Color, Square, TableIndex, COLORS, SQUARES};

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
];

fn offsets_from(sq: Square, offsets: &[(i32, i32)]) -> Bitboard {
    let mut board = Bitboard::none();
    for &(file_delta, rank_delta) in offsets {
        if let Some(target) = sq.offset(file_delta, rank_delta) {
            board.set(target);
        }
    }

    board
}

struct OffsetTable {
    table: [Bitboard; 64],
}

impl OffsetTable {
    pub fn new(offsets: &[(i32, i32)]) -> OffsetTable {
        let mut ot = OffsetTable {
            table: [Bitboard::none(); 64],
        };

        for &sq in SQUARES.iter() {
            ot.table[sq.as_index()] = offsets_from(sq, offsets);
        }

        ot
    }

    pub fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::none(); 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in COLORS.iter() {
                // A pawn on its last rank has nowhere forward to go, so both
                // diagonals fall off the board and the entry stays empty.
                let forward = color.forward();
                pt.table[sq.as_index()][color.as_index()] =
                    offsets_from(sq, &[(-1, forward), (1, forward)]);
            }
        }

        pt
    }

    pub fn attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.table[sq.as_index()][color.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: OffsetTable = OffsetTable::new(&KING_OFFSETS);
    static ref KNIGHT_TABLE: OffsetTable = OffsetTable::new(&KNIGHT_OFFSETS);
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
}

/// The two forward diagonals of a pawn of the given color, whether or not
/// anything stands on them.
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}
