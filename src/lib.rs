// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules core for a drag-and-drop chessboard. Given a `Position`, the crate
//! answers which squares a piece may move to, which enemy pieces it may
//! capture, and whether a square is attacked. Kings are the only pieces whose
//! destinations are filtered for safety; see `threats` for the limits of that
//! filter.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod bitboard;
pub mod console;
mod game;
pub mod legality;
pub mod movegen;
mod perft;
mod position;
mod setup;
pub mod threats;
mod types;

pub use bitboard::{Bitboard, BitboardIterator};
pub use game::{Game, GameMode, MoveError};
pub use movegen::{Move, MoveSet, SquareVec};
pub use perft::perft;
pub use position::{FenParseError, Position};
pub use setup::{PlacedPiece, Setup, SetupError};
pub use types::{Color, Direction, File, Piece, PieceKind, Rank, Square};
pub use types::{COLORS, FILES, PIECE_KINDS, RANKS, SQUARES};
