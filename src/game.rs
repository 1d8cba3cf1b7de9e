// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The owned "current game": a position plus the rules mode it is played
//! under.
use std::error::Error;
use std::fmt;

use crate::legality;
use crate::movegen::{self, Move, MoveSet};
use crate::position::Position;
use crate::types::{Color, Piece, Square};

/// How strictly moves are checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Any piece may go to any empty or enemy-occupied square. Turns are
    /// not enforced and kings are not protected.
    Free,
    /// Only the side to move may move, king moves are filtered for safety
    /// and the turn passes after every move.
    Game,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameMode::Free => f.write_str("free"),
            GameMode::Game => f.write_str("game"),
        }
    }
}

/// Reasons `Game::try_move` refuses a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    NoPieceAt(Square),
    NotYourTurn,
    OwnPieceAt(Square),
    IllegalDestination(Square),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::NoPieceAt(sq) => write!(f, "no piece on {}", sq),
            MoveError::NotYourTurn => f.write_str("that piece belongs to the side not on move"),
            MoveError::OwnPieceAt(sq) => write!(f, "{} holds a piece of the same color", sq),
            MoveError::IllegalDestination(sq) => write!(f, "the piece cannot reach {}", sq),
        }
    }
}

impl Error for MoveError {}

pub struct Game {
    position: Position,
    mode: GameMode,
}

impl Game {
    /// A game in the standard starting position.
    pub fn new(mode: GameMode) -> Game {
        Game::from_position(Position::from_start_position(), mode)
    }

    pub fn from_position(position: Position, mode: GameMode) -> Game {
        Game { position, mode }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Direct access to the board, for arranging pieces by hand.
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    /// Destinations for the piece on `sq`, or `None` if the square is
    /// empty. In free mode kings are not filtered.
    pub fn moves_for(&self, sq: Square) -> Option<MoveSet> {
        let piece = self.position.piece_at(sq)?;
        let set = match self.mode {
            GameMode::Game => legality::moves_for(&self.position, sq, piece),
            GameMode::Free => movegen::pseudo_moves(&self.position, sq, piece),
        };

        Some(set)
    }

    /// Relocates a piece without checking the move, then passes the turn
    /// if in game mode. Callers are expected to have picked the
    /// destination from `moves_for`. Returns the captured piece.
    pub fn apply_move(&mut self, mov: Move) -> Option<Piece> {
        let captured = self.position.apply_move(mov);
        debug!("applied {} (captured {:?})", mov, captured);
        if self.mode == GameMode::Game {
            self.position.switch_turn();
        }

        captured
    }

    /// Checks `mov` against the current mode and makes it if allowed.
    pub fn try_move(&mut self, mov: Move) -> Result<Option<Piece>, MoveError> {
        let piece = self
            .position
            .piece_at(mov.from)
            .ok_or(MoveError::NoPieceAt(mov.from))?;

        let target = self.position.piece_at(mov.to);
        if let Some(occupant) = target {
            if occupant.color == piece.color {
                return Err(MoveError::OwnPieceAt(mov.to));
            }
        }

        if self.mode == GameMode::Game {
            if piece.color != self.position.side_to_move() {
                return Err(MoveError::NotYourTurn);
            }

            let set = legality::moves_for(&self.position, mov.from, piece);
            let allowed = match target {
                Some(_) => set.captures.contains(&mov.to),
                None => set.quiet.contains(&mov.to),
            };

            if !allowed {
                return Err(MoveError::IllegalDestination(mov.to));
            }
        } else if mov.from == mov.to {
            return Err(MoveError::IllegalDestination(mov.to));
        }

        Ok(self.apply_move(mov))
    }

    /// Back to the starting position with White to move. The mode is kept.
    pub fn reset(&mut self) {
        debug!("reset");
        self.position.reset();
    }

    /// Whether `color` has a king with nowhere to go. Stalemate counts.
    pub fn is_mate(&self, color: Color) -> bool {
        legality::is_mate(&self.position, color)
    }

    /// The winner if the side to move is mated.
    pub fn winner(&self) -> Option<Color> {
        let loser = self.position.side_to_move();
        if self.is_mate(loser) {
            debug!("{} is mated", loser);
            Some(loser.opposite())
        } else {
            None
        }
    }

    /// The line printed after a move that leaves the side to move mated.
    pub fn mate_announcement(&self) -> Option<String> {
        self.winner()
            .map(|winner| format!("Mate! {} wins", winner))
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new(GameMode::Game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn mv(from: Square, to: Square) -> Move {
        Move::new(from, to)
    }

    #[test]
    fn game_mode_passes_turn() {
        let mut game = Game::new(GameMode::Game);
        assert_eq!(Ok(None), game.try_move(mv(Square::E2, Square::E4)));
        assert_eq!(Color::Black, game.position().side_to_move());
        assert_eq!(
            Some(Piece::new(PieceKind::Pawn, Color::White)),
            game.position().piece_at(Square::E4)
        );
        assert!(game.position().piece_at(Square::E2).is_none());
    }

    #[test]
    fn game_mode_enforces_turn() {
        let mut game = Game::new(GameMode::Game);
        assert_eq!(
            Err(MoveError::NotYourTurn),
            game.try_move(mv(Square::E7, Square::E5))
        );
        assert_eq!(Position::from_start_position(), *game.position());
    }

    #[test]
    fn game_mode_rejects_unreachable() {
        let mut game = Game::new(GameMode::Game);
        assert_eq!(
            Err(MoveError::IllegalDestination(Square::E5)),
            game.try_move(mv(Square::E2, Square::E5))
        );
        assert_eq!(
            Err(MoveError::OwnPieceAt(Square::B2)),
            game.try_move(mv(Square::A1, Square::B2))
        );
        assert_eq!(
            Err(MoveError::NoPieceAt(Square::E4)),
            game.try_move(mv(Square::E4, Square::E5))
        );
    }

    #[test]
    fn game_mode_king_cannot_step_into_attack() {
        let pos = Position::from_fen("8/8/8/8/4r3/8/8/4K3 w").unwrap();
        let mut game = Game::from_position(pos, GameMode::Game);
        assert_eq!(
            Err(MoveError::IllegalDestination(Square::E2)),
            game.try_move(mv(Square::E1, Square::E2))
        );
        assert_eq!(Ok(None), game.try_move(mv(Square::E1, Square::D2)));
    }

    #[test]
    fn capture_returns_taken_piece() {
        let pos = Position::from_fen("8/8/8/3p4/4P3/8/8/8 w").unwrap();
        let mut game = Game::from_position(pos, GameMode::Game);
        assert_eq!(
            Ok(Some(Piece::new(PieceKind::Pawn, Color::Black))),
            game.try_move(mv(Square::E4, Square::D5))
        );
        assert_eq!(1, game.position().piece_count());
    }

    #[test]
    fn free_mode_goes_anywhere() {
        let mut game = Game::new(GameMode::Free);
        assert_eq!(Ok(None), game.try_move(mv(Square::E7, Square::E3)));
        assert_eq!(Color::White, game.position().side_to_move());
        assert_eq!(
            Ok(Some(Piece::new(PieceKind::Pawn, Color::Black))),
            game.try_move(mv(Square::D1, Square::E3))
        );
        assert_eq!(
            Err(MoveError::OwnPieceAt(Square::E2)),
            game.try_move(mv(Square::E1, Square::E2))
        );
    }

    #[test]
    fn free_mode_does_not_filter_kings() {
        let pos = Position::from_fen("8/8/8/8/4r3/8/8/4K3 w").unwrap();
        let mut game = Game::from_position(pos, GameMode::Free);
        assert!(game.moves_for(Square::E1).unwrap().contains(Square::E2));

        game.set_mode(GameMode::Game);
        assert!(!game.moves_for(Square::E1).unwrap().contains(Square::E2));
        assert!(game.moves_for(Square::E3).is_none());
    }

    #[test]
    fn apply_move_is_unchecked() {
        let mut game = Game::new(GameMode::Game);
        game.apply_move(mv(Square::A1, Square::A5));
        assert_eq!(
            Some(Piece::new(PieceKind::Rook, Color::White)),
            game.position().piece_at(Square::A5)
        );
        assert_eq!(Color::Black, game.position().side_to_move());
    }

    #[test]
    fn reset_keeps_mode() {
        let mut game = Game::new(GameMode::Free);
        game.apply_move(mv(Square::E2, Square::E4));
        game.reset();
        assert_eq!(Position::from_start_position(), *game.position());
        assert_eq!(GameMode::Free, game.mode());
    }

    #[test]
    fn mate_announcement() {
        let pos = Position::from_fen("1r6/8/8/8/8/8/1q6/K7 w").unwrap();
        let game = Game::from_position(pos, GameMode::Game);
        assert_eq!(Some(Color::Black), game.winner());
        assert_eq!(
            Some("Mate! Black wins".to_string()),
            game.mate_announcement()
        );

        let pos = Position::from_fen("8/8/8/8/8/8/8/K7 w").unwrap();
        let game = Game::from_position(pos, GameMode::Game);
        assert!(game.winner().is_none());
        assert!(game.mate_announcement().is_none());
    }
}
