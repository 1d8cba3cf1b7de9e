// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::bitboard::Bitboard;
use crate::movegen::Move;
use crate::types::TableIndex;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{COLORS, FILES, PIECE_KINDS, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => f.write_str("unexpected end of input"),
            FenParseError::InvalidDigit => f.write_str("empty-square count must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => f.write_str("rank does not sum to eight files"),
            FenParseError::UnknownPiece => f.write_str("unknown piece character"),
            FenParseError::InvalidSideToMove => f.write_str("side to move must be 'w' or 'b'"),
        }
    }
}

impl Error for FenParseError {}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The authoritative board state: which piece stands on which square, and
/// whose turn it is. At most one piece ever occupies a square; every
/// mutation below maintains that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    boards_by_piece: [Bitboard; 12],
    boards_by_color: [Bitboard; 2],
    side_to_move: Color,
}

//
// Board state getters
//

impl Position {
    /// An empty board with White to move.
    pub const fn new() -> Position {
        Position {
            boards_by_piece: [Bitboard::none(); 12],
            boards_by_color: [Bitboard::none(); 2],
            side_to_move: Color::White,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.boards_by_color[color.as_index()]
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.boards_by_piece[board_index(color, kind)]
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    /// Every occupied square, regardless of color.
    pub fn occupancy(&self) -> Bitboard {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupancy().test(square)
    }

    /// The piece standing on `square`, or `None` if the square is empty.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let color = if self.pieces(Color::White).test(square) {
            Color::White
        } else if self.pieces(Color::Black).test(square) {
            Color::Black
        } else {
            return None;
        };

        PIECE_KINDS
            .iter()
            .find(|&&kind| self.pieces_of_kind(color, kind).test(square))
            .map(|&kind| Piece::new(kind, color))
    }

    /// Iterates every piece on the board along with its square, White's
    /// pieces first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        COLORS
            .iter()
            .flat_map(move |&color| self.iter_color(color))
    }

    /// Iterates the pieces of one color along with their squares.
    pub fn iter_color(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        PIECE_KINDS.iter().flat_map(move |&kind| {
            self.pieces_of_kind(color, kind)
                .iter()
                .map(move |sq| (sq, Piece::new(kind, color)))
        })
    }

    pub fn piece_count(&self) -> u32 {
        self.occupancy().count()
    }
}

//
// Board manipulation
//

impl Position {
    /// Puts `piece` on `square`, overwriting whatever stood there. Returns
    /// the overwritten piece. This does not lift the piece from any other
    /// square; callers relocating a piece use `apply_move`.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let previous = self.remove(square);
        self.boards_by_color[piece.color.as_index()].set(square);
        self.boards_by_piece[board_index(piece.color, piece.kind)].set(square);
        previous
    }

    /// Deletes the occupant of `square`, if any, and returns it.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let existing = self.piece_at(square)?;
        self.boards_by_color[existing.color.as_index()].unset(square);
        self.boards_by_piece[board_index(existing.color, existing.kind)].unset(square);
        Some(existing)
    }

    /// Relocates the piece on `mov.from` to `mov.to` as a single step,
    /// removing whatever stood on the destination. Returns the captured
    /// piece. The move is not checked against the rules; an empty source
    /// square leaves the board untouched.
    pub fn apply_move(&mut self, mov: Move) -> Option<Piece> {
        if mov.from == mov.to {
            return None;
        }

        let moving = self.remove(mov.from)?;
        self.place(mov.to, moving)
    }

    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Restores the standard 32-piece opening layout with White to move.
    pub fn reset(&mut self) {
        *self = Position::from_start_position();
    }
}

//
// Construction from and conversion to text
//

impl Position {
    pub fn from_start_position() -> Position {
        let mut pos = Position::new();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            pos.place(Square::of(Rank::One, file), Piece::new(kind, Color::White));
            pos.place(Square::of(Rank::Two, file), Piece::new(PieceKind::Pawn, Color::White));
            pos.place(Square::of(Rank::Seven, file), Piece::new(PieceKind::Pawn, Color::Black));
            pos.place(Square::of(Rank::Eight, file), Piece::new(kind, Color::Black));
        }

        pos
    }

    /// Constructs a position from the first two fields of a FEN record:
    /// piece placement and side to move. Castling rights, en-passant
    /// square and clocks have no meaning here, so anything after the side
    /// to move is ignored.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
            iter.peek().copied().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_side_to_move(iter: &mut Stream<'_>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            iter.next();
            match iter.peek() {
                None | Some(' ') => Ok(side),
                Some(_) => Err(FenParseError::InvalidSideToMove),
            }
        }

        let mut pos = Position::new();
        let iter = &mut fen.as_ref().trim().chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = 0;
            while file < 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value < 1 || value > 8 {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += value as usize;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                let file_value = File::from_index(file).ok_or(FenParseError::FileDoesNotSumToEight)?;
                pos.place(Square::of(rank, file_value), piece);
                iter.next();
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        pos.side_to_move = eat_side_to_move(iter)?;
        Ok(pos)
    }

    /// Renders the placement and side-to-move fields of a FEN record.
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                let square = Square::of(rank, file);
                if let Some(piece) = self.piece_at(square) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.side_to_move() {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

/// A fresh position is the standard opening layout.
impl Default for Position {
    fn default() -> Self {
        Position::from_start_position()
    }
}

fn board_index(color: Color, kind: PieceKind) -> usize {
    let offset = match color {
        Color::White => 0,
        Color::Black => 6,
    };
    offset + kind.as_index()
}
