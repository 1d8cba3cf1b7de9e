// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board setups stored as JSON, for arranging arbitrary positions outside
//! of FEN:
//!
//! ```json
//! {
//!   "side_to_move": "White",
//!   "pieces": [
//!     { "square": "E1", "kind": "King", "color": "White" },
//!     { "square": "E4", "kind": "Rook", "color": "Black" }
//!   ]
//! }
//! ```
use std::error::Error;
use std::fmt;
use std::io::Read;

use crate::position::Position;
use crate::types::{Color, Piece, PieceKind, Square};

#[derive(Debug)]
pub enum SetupError {
    Json(serde_json::Error),
    /// Two entries name the same square.
    DuplicateSquare(Square),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetupError::Json(err) => write!(f, "malformed setup: {}", err),
            SetupError::DuplicateSquare(sq) => write!(f, "more than one piece on {}", sq),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SetupError::Json(err) => Some(err),
            SetupError::DuplicateSquare(_) => None,
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> SetupError {
        SetupError::Json(err)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlacedPiece {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Setup {
    #[serde(default = "default_side")]
    pub side_to_move: Color,
    pub pieces: Vec<PlacedPiece>,
}

fn default_side() -> Color {
    Color::White
}

impl Setup {
    pub fn from_reader<R: Read>(reader: R) -> Result<Setup, SetupError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<Setup, SetupError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the position, refusing setups that stack pieces.
    pub fn into_position(self) -> Result<Position, SetupError> {
        let mut pos = Position::new();
        for placed in self.pieces {
            let piece = Piece::new(placed.kind, placed.color);
            if pos.place(placed.square, piece).is_some() {
                return Err(SetupError::DuplicateSquare(placed.square));
            }
        }

        pos.set_side_to_move(self.side_to_move);
        Ok(pos)
    }
}

impl From<&Position> for Setup {
    fn from(pos: &Position) -> Setup {
        let pieces = pos
            .iter()
            .map(|(square, piece)| PlacedPiece {
                square,
                kind: piece.kind,
                color: piece.color,
            })
            .collect();

        Setup {
            side_to_move: pos.side_to_move(),
            pieces,
        }
    }
}
