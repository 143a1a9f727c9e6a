use gongbing_core::{Coord, Coord2};
use std::str::FromStr;
use thiserror::Error;

pub const USAGE: &str = "\
Commands:
  r X Y   reveal the cell at column X, row Y
  f X Y   flag or unflag the cell at column X, row Y
  n       start a new game
  h       show this help
  q       quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("Expected `{0} X Y`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Unexpected input `{0}`")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words, "r")?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words, "f")?),
            "n" | "new" => Command::NewGame,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<Coord2, ParseCommandError> {
    let (Some(x), Some(y)) = (words.next(), words.next()) else {
        return Err(ParseCommandError::MissingCoords(name));
    };
    Ok((parse_coord(x)?, parse_coord(y)?))
}

fn parse_coord(word: &str) -> Result<Coord, ParseCommandError> {
    word.parse()
        .map_err(|_| ParseCommandError::InvalidCoord(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  FLAG 0 15 ".parse::<Command>(), Ok(Command::Flag((0, 15))));
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "r 3".parse::<Command>(),
            Err(ParseCommandError::MissingCoords("r"))
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(ParseCommandError::InvalidCoord("-1".to_string()))
        );
        assert_eq!(
            "r 300 2".parse::<Command>(),
            Err(ParseCommandError::InvalidCoord("300".to_string()))
        );
        assert_eq!(
            "n now".parse::<Command>(),
            Err(ParseCommandError::Trailing("now".to_string()))
        );
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".to_string()))
        );
    }
}
