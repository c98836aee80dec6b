use crate::error::Error;

use std::{fmt, str::FromStr};

pub const MAX_RANK: u8 = 13;
pub const MAX_SUIT: u8 = 4;
pub const MAX_CARD: u8 = MAX_SUIT * MAX_RANK;

const RANKS: [&str; MAX_RANK as usize] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; MAX_SUIT as usize] =
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playing card packed into a single byte: `suit * 13 + (rank - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    /// Creates a card from a rank in `1..=13` and a suit.
    ///
    /// Returns `None` when the rank is out of range.
    pub fn new(rank: u8, suit: Suit) -> Option<Self> {
        if (1..=MAX_RANK).contains(&rank) {
            Some(Self(suit as u8 * MAX_RANK + rank - 1))
        } else {
            None
        }
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn rank(&self) -> u8 {
        self.0 % MAX_RANK + 1
    }

    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.0 / MAX_RANK) as usize]
    }

    pub fn is_red(&self) -> bool {
        self.suit().is_red()
    }

    pub fn is_ace(&self) -> bool {
        self.rank() == 1
    }

    pub fn is_king(&self) -> bool {
        self.rank() == MAX_RANK
    }

    pub fn rank_name(&self) -> &'static str {
        RANKS[(self.rank() - 1) as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank_name(), self.suit())
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parses the `"<Rank> of <Suit>"` identifier, e.g. `"10 of Hearts"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCardFormat(s.to_string());
        let (rank, suit) = s.trim().split_once(" of ").ok_or_else(invalid)?;
        let rank = RANKS
            .iter()
            .position(|&r| r == rank.trim())
            .ok_or_else(invalid)?;
        let suit = Suit::ALL
            .into_iter()
            .find(|candidate| candidate.name() == suit.trim())
            .ok_or_else(invalid)?;
        Card::new(rank as u8 + 1, suit).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card() {
        let card: Card = "10 of Hearts".parse().unwrap();
        assert_eq!(card.rank(), 10);
        assert_eq!(card.suit(), Suit::Hearts);
        assert!(card.is_red());

        let card: Card = "A of Spades".parse().unwrap();
        assert!(card.is_ace());
        assert!(!card.is_red());
        assert_eq!(card.to_string(), "A of Spades");

        let card: Card = "K of Clubs".parse().unwrap();
        assert!(card.is_king());
        assert_eq!(card.suit(), Suit::Clubs);
    }

    #[test]
    fn test_parse_invalid_card() {
        for input in ["", "1 of Hearts", "T of Spades", "Q of Stars", "Q Hearts", "11 of Clubs"] {
            assert_eq!(
                input.parse::<Card>(),
                Err(Error::InvalidCardFormat(input.to_string())),
                "{input}"
            );
        }
    }

    #[test]
    fn test_card_ids() {
        let mut ids = Vec::new();
        for suit in Suit::ALL {
            for rank in 1..=MAX_RANK {
                let card = Card::new(rank, suit).unwrap();
                assert_eq!((card.rank(), card.suit()), (rank, suit));
                assert_eq!(card.to_string().parse::<Card>(), Ok(card));
                ids.push(card.id());
            }
        }
        assert_eq!(ids, (0..MAX_CARD).collect::<Vec<_>>());
        assert_eq!(Card::new(0, Suit::Hearts), None);
        assert_eq!(Card::new(14, Suit::Hearts), None);
    }
}
