// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::convert::TryFrom;
use std::fs::File;
use std::io;
use std::process;
use std::time::Instant;

use chessrules::console::Session;
use chessrules::threats;
use chessrules::{perft, Color, Game, GameMode, Position, Setup, Square};
use clap::{App, Arg, ArgMatches, SubCommand};

fn position_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("fen")
            .help("FEN string for a board position")
            .value_name("FEN")
            .long("fen")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("setup")
            .help("JSON file describing a board setup")
            .value_name("FILE")
            .long("setup")
            .takes_value(true)
            .conflicts_with("fen"),
    )
}

fn free_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("free")
        .help("Free mode: no turns and no king safety")
        .long("free")
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count move-tree leaves from a position")
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string for a board position")
                        .value_name("FEN")
                        .long("fen")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("d")
                        .long("depth")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(position_args(
            SubCommand::with_name("moves")
                .about("List destinations for the piece on a square")
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Square holding the piece, e.g. e2")
                        .required(true)
                        .index(1),
                )
                .arg(free_arg()),
        ))
        .subcommand(position_args(
            SubCommand::with_name("attacked")
                .about("Whether a color attacks a square")
                .arg(
                    Arg::with_name("SQUARE")
                        .help("Square to test, e.g. e1")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("COLOR")
                        .help("Attacking color, white or black")
                        .required(true)
                        .index(2),
                ),
        ))
        .subcommand(position_args(
            SubCommand::with_name("play")
                .about("Play moves from standard input (the default)")
                .arg(free_arg()),
        ))
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("attacked", Some(matches)) => run_attacked(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => run_play(&ArgMatches::default()),
    }
}

fn load_position(matches: &ArgMatches) -> Position {
    if let Some(fen) = matches.value_of("fen") {
        return match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                println!("invalid fen: {}", err);
                process::exit(1);
            }
        };
    }

    if let Some(path) = matches.value_of("setup") {
        let setup = File::open(path)
            .map_err(|err| err.to_string())
            .and_then(|file| Setup::from_reader(file).map_err(|err| err.to_string()))
            .and_then(|setup| setup.into_position().map_err(|err| err.to_string()));
        return match setup {
            Ok(pos) => pos,
            Err(err) => {
                println!("invalid setup {}: {}", path, err);
                process::exit(1);
            }
        };
    }

    Position::from_start_position()
}

fn mode(matches: &ArgMatches) -> GameMode {
    if matches.is_present("free") {
        GameMode::Free
    } else {
        GameMode::Game
    }
}

fn parse_square(text: &str) -> Square {
    match Square::try_from(text) {
        Ok(sq) => sq,
        Err(_) => {
            println!("invalid square: {}", text);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = load_position(matches);

    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let sq = parse_square(matches.value_of("SQUARE").unwrap_or_default());
    let game = Game::from_position(load_position(matches), mode(matches));
    let set = match game.moves_for(sq) {
        Some(set) => set,
        None => {
            println!("no piece on {}", sq);
            process::exit(1);
        }
    };

    let join = |squares: &[Square]| {
        squares
            .iter()
            .map(|sq| sq.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    println!("quiet:    {}", join(&set.quiet));
    println!("captures: {}", join(&set.captures));
    process::exit(0);
}

fn run_attacked(matches: &ArgMatches) -> ! {
    let sq = parse_square(matches.value_of("SQUARE").unwrap_or_default());
    let color_text = matches.value_of("COLOR").unwrap_or_default();
    let by = match Color::try_from(color_text) {
        Ok(color) => color,
        Err(_) => {
            println!("invalid color: {}", color_text);
            process::exit(1);
        }
    };

    let pos = load_position(matches);
    let attackers = threats::squares_attacking(&pos, sq, by);
    if attackers.empty() {
        println!("{} is not attacked by {}", sq, by);
    } else {
        let from: Vec<_> = attackers.iter().map(|sq| sq.to_string()).collect();
        println!("{} is attacked by {} from {}", sq, by, from.join(" "));
    }

    process::exit(0);
}

fn run_play(matches: &ArgMatches) -> ! {
    let game = Game::from_position(load_position(matches), mode(matches));
    let mut session = Session::new(game);
    let stdin = io::stdin();
    let stdout = io::stdout();
    match session.run(stdin.lock(), stdout.lock()) {
        Ok(()) => process::exit(0),
        Err(err) => {
            eprintln!("i/o error: {}", err);
            process::exit(1);
        }
    }
}
