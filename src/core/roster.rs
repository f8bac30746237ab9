//! Player lookup over the host's chat room roster.

use rand::Rng;

use crate::schema::player::{MemberNumber, Player};

/// Key for resolving a player: an exact member number or a name string.
/// A numeric-looking string is still a name and never matches a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerKey {
    Number(MemberNumber),
    Name(String),
}

impl From<MemberNumber> for PlayerKey {
    fn from(number: MemberNumber) -> Self {
        PlayerKey::Number(number)
    }
}

impl From<u32> for PlayerKey {
    fn from(number: u32) -> Self {
        PlayerKey::Number(MemberNumber(number))
    }
}

impl From<&str> for PlayerKey {
    fn from(name: &str) -> Self {
        PlayerKey::Name(name.to_string())
    }
}

impl From<String> for PlayerKey {
    fn from(name: String) -> Self {
        PlayerKey::Name(name)
    }
}

/// Borrowed view over the host's live roster, in the host's order.
pub struct Roster<'a> {
    pub players: &'a [Player],
}

impl<'a> Roster<'a> {
    pub fn new(players: &'a [Player]) -> Roster<'a> {
        Roster { players }
    }

    /// Resolve a player by member number, name, or nickname.
    ///
    /// Walks the roster in order. Number keys match on member number only;
    /// name keys are compared case-insensitively against the account name,
    /// then the nickname (a missing nickname never matches). The literal
    /// `"random"` — only when nothing matched — picks a uniformly random
    /// member. No match is non-fatal: logged, `None` returned.
    pub fn resolve<R: Rng>(&self, key: &PlayerKey, rng: &mut R) -> Option<&'a Player> {
        match key {
            PlayerKey::Number(number) => {
                for player in self.players {
                    if player.member_number == *number {
                        return Some(player);
                    }
                }
            }
            PlayerKey::Name(name) => {
                let name = name.to_lowercase();
                for player in self.players {
                    if player.name.to_lowercase() == name {
                        return Some(player);
                    }
                    if let Some(nickname) = &player.nickname {
                        if nickname.to_lowercase() == name {
                            return Some(player);
                        }
                    }
                }
                if name == "random" {
                    return self.random(rng);
                }
            }
        }
        log::warn!("player not found: {:?}", key);
        None
    }

    /// Uniformly random roster member; `None` on an empty roster.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&'a Player> {
        if self.players.is_empty() {
            return None;
        }
        Some(&self.players[rng.gen_range(0..self.players.len())])
    }
}
