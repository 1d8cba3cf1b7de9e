// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::movegen;
use crate::position::Position;

/// Counts the leaves of the move tree `depth` plies deep, playing by game
/// mode rules. Only kings are filtered for safety, so the counts differ
/// from full chess once checks and pins come into play.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = Vec::new();
    movegen::generate_moves(pos, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut new_pos = pos.clone();
            new_pos.apply_move(mov);
            new_pos.switch_turn();
            perft(&new_pos, depth - 1)
        })
        .sum()
}
