use anyhow::Context;
use clap::{Parser, ValueEnum};
use gongbing_core::*;
use std::io::{self, BufRead, Write};

use command::Command;

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SafeZoneArg {
    /// Only the first revealed cell is guaranteed safe
    Cell,
    /// The first revealed cell and its neighbors are guaranteed safe
    Neighborhood,
}

impl From<SafeZoneArg> for SafeZone {
    fn from(arg: SafeZoneArg) -> Self {
        match arg {
            SafeZoneArg::Cell => SafeZone::Cell,
            SafeZoneArg::Neighborhood => SafeZone::Neighborhood,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = GameConfig::DEFAULT.size.0)]
    width: Coord,

    /// Board height in cells
    #[arg(long, default_value_t = GameConfig::DEFAULT.size.1)]
    height: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = GameConfig::DEFAULT.mines)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How much of the board around the first reveal stays free of mines
    #[arg(long, value_enum, default_value_t = SafeZoneArg::Cell)]
    safe_zone: SafeZoneArg,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let config = GameConfig::new((args.width, args.height), args.mines)
        .context("Invalid board configuration")?;
    let safe_zone = args.safe_zone.into();
    let generator = match args.seed {
        Some(seed) => RandomMineGenerator::new(seed, safe_zone),
        None => RandomMineGenerator::from_entropy(safe_zone),
    };
    let mut engine = Engine::with_generator(config, generator)?;

    let mut stdout = io::stdout().lock();
    draw(&mut stdout, &engine)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read command")?;
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(stdout, "{}", command::USAGE)?,
            Ok(command) => {
                if apply(&mut engine, command) {
                    draw(&mut stdout, &engine)?;
                }
            }
            Err(err) => writeln!(stdout, "{err}\n{}", command::USAGE)?,
        }
    }

    Ok(())
}

/// Runs one move against the engine, returns whether the board needs redrawing.
fn apply<G: MineGenerator, C: Clock>(engine: &mut Engine<G, C>, command: Command) -> bool {
    match command {
        Command::Reveal(coords) => {
            let outcome = engine.reveal(coords);
            log::info!("reveal {:?}: {:?}", coords, outcome);
            outcome.has_update()
        }
        Command::Flag(coords) => engine.toggle_flag(coords).has_update(),
        Command::NewGame => {
            engine.restart();
            true
        }
        Command::Help | Command::Quit => false,
    }
}

fn draw<G: MineGenerator, C: Clock>(out: &mut impl Write, engine: &Engine<G, C>) -> io::Result<()> {
    write!(out, "{}", render::board(engine))?;
    writeln!(out, "{}", render::status(engine))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_reference_board() {
        let args = Args::try_parse_from(["gongbing"]).unwrap();
        assert_eq!((args.width, args.height, args.mines), (16, 16, 40));
        assert_eq!(args.safe_zone, SafeZoneArg::Cell);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn args_accept_custom_board() {
        let args = Args::try_parse_from([
            "gongbing",
            "--width",
            "9",
            "--height",
            "9",
            "-m",
            "10",
            "--seed",
            "5",
            "--safe-zone",
            "neighborhood",
        ])
        .unwrap();
        assert_eq!((args.width, args.height, args.mines), (9, 9, 10));
        assert_eq!(args.seed, Some(5));
        assert_eq!(SafeZone::from(args.safe_zone), SafeZone::Neighborhood);
    }

    #[test]
    fn apply_reports_redraws() {
        let layout = MineLayout::from_mine_coords((5, 1), &[(2, 0)]).unwrap();
        let mut engine = Engine::with_layout(layout).unwrap();

        assert!(apply(&mut engine, Command::Reveal((0, 0))));
        assert!(!apply(&mut engine, Command::Reveal((0, 0))));
        assert!(apply(&mut engine, Command::Flag((2, 0))));
        assert!(!apply(&mut engine, Command::Help));
        assert!(apply(&mut engine, Command::NewGame));
        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert_eq!(engine.flags_remaining(), 1);
    }

    #[test]
    fn draw_prints_board_and_status() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap();
        let engine = Engine::with_layout(layout).unwrap();
        let mut out = Vec::new();

        draw(&mut out, &engine).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("##\n##\nMines: 1"));
    }
}
