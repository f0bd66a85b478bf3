use crate::tictactoe::Move;

/// A line of user input during the game.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// Cell number to put the marker in.
    Play(Move),
    /// Print the board again.
    Board,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            ["d" | "board"] => Self::Board,
            ["help" | "?"] => Self::Help,
            ["q" | "quit" | "exit"] => Self::Quit,
            [cell] => match Move::try_from(*cell) {
                Ok(next_move) => Self::Play(next_move),
                Err(_) => Self::Unknown(input.trim().to_string()),
            },
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_move() {
        assert_eq!(Command::parse("1\n"), Command::Play(Move::new(0).unwrap()));
        assert_eq!(Command::parse("  9 "), Command::Play(Move::new(8).unwrap()));
    }

    #[test]
    fn parse_out_of_range() {
        assert_eq!(Command::parse("0"), Command::Unknown("0".to_string()));
        assert_eq!(Command::parse("10"), Command::Unknown("10".to_string()));
    }

    #[test]
    fn parse_keywords() {
        assert_eq!(Command::parse("d"), Command::Board);
        assert_eq!(Command::parse("board"), Command::Board);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("q\n"), Command::Quit);
    }

    #[test]
    fn parse_garbage() {
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
        assert_eq!(Command::parse("1 2"), Command::Unknown("1 2".to_string()));
        assert_eq!(Command::parse("center"), Command::Unknown("center".to_string()));
    }
}
