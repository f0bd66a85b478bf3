//! Interface between the search and the rules of a game. The search only ever
//! talks to the game through [`Environment`], which makes it possible to run
//! the same engine on any finite, two-player, zero-sum game with perfect
//! information.

use std::fmt;
use std::ops::Not;

use anyhow::bail;

/// The two sides of a game. [`Player::One`] has the advantage of the first
/// turn.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(marker: &str) -> anyhow::Result<Self> {
        match marker {
            "x" | "X" => Ok(Self::One),
            "o" | "O" => Ok(Self::Two),
            _ => bail!("player should be 'X' or 'O', got '{marker}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::One => 'X',
                Self::Two => 'O',
            }
        )
    }
}

/// Mutable game position that can be searched in place.
///
/// Every [`Environment::apply`] performed by the search is matched by an
/// [`Environment::undo`] of the same action in reverse (LIFO) order before the
/// search returns. Undoing does not restore the player to move: callers save
/// it with [`Environment::player_to_move`] and put it back with
/// [`Environment::set_player_to_move`].
///
/// Applying an action that is not currently legal is a programming error and
/// the behavior is unspecified.
pub trait Environment {
    /// Identifier of a single move.
    type Action: Copy + PartialEq + fmt::Debug;
    /// Collection returned by [`Environment::actions`].
    type Actions: AsRef<[Self::Action]>;

    /// Returns all legal actions in a stable, deterministic order.
    fn actions(&self) -> Self::Actions;
    /// Plays `action` for the player to move and passes the turn.
    fn apply(&mut self, action: Self::Action);
    /// Takes back `action`. The turn is left as is.
    fn undo(&mut self, action: Self::Action);
    /// Returns `true` if there are no legal actions left or someone has won.
    fn is_terminal(&self) -> bool;
    /// Returns the winner, if any. `None` means either a draw or a game that
    /// is still in progress, [`Environment::is_terminal`] tells them apart.
    fn winner(&self) -> Option<Player>;
    #[allow(missing_docs)]
    fn player_to_move(&self) -> Player;
    #[allow(missing_docs)]
    fn set_player_to_move(&mut self, player: Player);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn opponent() {
        assert_eq!(!Player::One, Player::Two);
        assert_eq!(!Player::Two, Player::One);
        assert_eq!(!!Player::One, Player::One);
    }

    #[test]
    fn parse_player() {
        assert_eq!(Player::try_from("X").unwrap(), Player::One);
        assert_eq!(Player::try_from("o").unwrap(), Player::Two);
        assert!(Player::try_from("-").is_err());
        assert!(Player::try_from("").is_err());
    }

    #[test]
    fn display_player() {
        assert_eq!(Player::One.to_string(), "X");
        assert_eq!(Player::Two.to_string(), "O");
    }
}
