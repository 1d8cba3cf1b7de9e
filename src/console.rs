// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented front end standing in for a board UI. Each line is one
//! command:
//!
//! ```text
//! board                  print the board
//! fen                    print the position as FEN
//! moves e2               list destinations for the piece on e2
//! attacked e4 black      whether Black attacks e4, and from where
//! e2e4 | move e2e4       make a move
//! reset                  back to the starting position
//! mode free|game         change the rules mode
//! switch                 pass the turn
//! quit
//! ```
use std::convert::TryFrom;
use std::io::{self, BufRead, Write};

use crate::game::{Game, GameMode};
use crate::movegen::Move;
use crate::threats;
use crate::types::{Color, Square};

pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Session {
        Session { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"quit", []) => break,
                (&"board", []) => self.handle_board(&mut writer)?,
                (&"fen", []) => writeln!(&mut writer, "{}", self.game.position().as_fen())?,
                (&"moves", [square]) => self.handle_moves(&mut writer, square)?,
                (&"attacked", [square, color]) => {
                    self.handle_attacked(&mut writer, square, color)?
                }
                (&"move", [mov]) => self.handle_move(&mut writer, mov)?,
                (&"reset", []) => self.game.reset(),
                (&"mode", ["free"]) => self.game.set_mode(GameMode::Free),
                (&"mode", ["game"]) => self.game.set_mode(GameMode::Game),
                (&"switch", []) => self.game.position_mut().switch_turn(),
                (mov, []) if Move::try_from(*mov).is_ok() => self.handle_move(&mut writer, mov)?,
                _ => writeln!(&mut writer, "unrecognized command")?,
            }
        }

        Ok(())
    }

    fn handle_board<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let pos = self.game.position();
        write!(w, "{}", pos)?;
        writeln!(w, "{} to move ({} mode)", pos.side_to_move(), self.game.mode())
    }

    fn handle_moves<W: Write>(&self, w: &mut W, square: &str) -> io::Result<()> {
        let sq = match Square::try_from(square) {
            Ok(sq) => sq,
            Err(_) => return writeln!(w, "invalid square: {}", square),
        };

        let set = match self.game.moves_for(sq) {
            Some(set) => set,
            None => return writeln!(w, "no piece on {}", sq),
        };

        write!(w, "quiet:")?;
        for to in &set.quiet {
            write!(w, " {}", to)?;
        }
        writeln!(w)?;
        write!(w, "captures:")?;
        for to in &set.captures {
            write!(w, " {}", to)?;
        }
        writeln!(w)
    }

    fn handle_attacked<W: Write>(&self, w: &mut W, square: &str, color: &str) -> io::Result<()> {
        let sq = match Square::try_from(square) {
            Ok(sq) => sq,
            Err(_) => return writeln!(w, "invalid square: {}", square),
        };

        let by = match Color::try_from(color) {
            Ok(color) => color,
            Err(_) => return writeln!(w, "invalid color: {}", color),
        };

        let attackers = threats::squares_attacking(self.game.position(), sq, by);
        if attackers.empty() {
            return writeln!(w, "{} is not attacked by {}", sq, by);
        }

        write!(w, "{} is attacked by {} from", sq, by)?;
        for from in attackers {
            write!(w, " {}", from)?;
        }
        writeln!(w)
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, text: &str) -> io::Result<()> {
        let mov = match Move::try_from(text) {
            Ok(mov) => mov,
            Err(_) => return writeln!(w, "invalid move: {}", text),
        };

        match self.game.try_move(mov) {
            Ok(Some(captured)) => writeln!(w, "{} captures {}", mov, captured)?,
            Ok(None) => writeln!(w, "{}", mov)?,
            Err(err) => return writeln!(w, "illegal move {}: {}", mov, err),
        }

        if let Some(announcement) = self.game.mate_announcement() {
            writeln!(w, "{}", announcement)?;
        }

        Ok(())
    }
}
