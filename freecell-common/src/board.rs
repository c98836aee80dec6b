use crate::{
    card::{Card, MAX_CARD, MAX_RANK, Suit},
    error::Error,
    moves::Move,
};

use anyhow::{Context, Result};
use smallvec::SmallVec;

pub const TOTAL_TABLEAUS: usize = 8;
pub const TOTAL_FREECELLS: usize = 4;
pub const TOTAL_FOUNDATIONS: usize = 4;

// Longest reachable column: 7 dealt cards plus a King-to-Ace run on top.
const COLUMN_SIZE: usize = 19;
const EMPTY_CELL: &str = "-";

const PRESET: &str = "\
Tableau1: 5 of Diamonds, Q of Hearts, 7 of Spades, 7 of Clubs, 2 of Clubs, 5 of Hearts, 10 of Spades
Tableau2: 4 of Spades, A of Hearts, 4 of Hearts, 8 of Diamonds, 8 of Clubs, 8 of Spades, 10 of Hearts
Tableau3: 6 of Diamonds, 5 of Clubs, 10 of Clubs, 7 of Hearts, 6 of Clubs, 4 of Clubs, K of Diamonds
Tableau4: 9 of Diamonds, 2 of Hearts, Q of Spades, 3 of Hearts, Q of Diamonds, 7 of Diamonds, Q of Clubs
Tableau5: A of Clubs, J of Spades, 8 of Hearts, 4 of Diamonds, J of Clubs, K of Hearts
Tableau6: K of Clubs, A of Diamonds, 9 of Clubs, J of Diamonds, J of Hearts, K of Spades
Tableau7: 3 of Diamonds, 3 of Spades, A of Spades, 3 of Clubs, 9 of Spades, 2 of Spades
Tableau8: 5 of Spades, 6 of Spades, 9 of Hearts, 10 of Diamonds, 2 of Diamonds, 6 of Hearts
";

pub type Column = SmallVec<[Card; COLUMN_SIZE]>;

/// Returns true if `card` may be placed on top of `column`.
///
/// Any card goes onto an empty column; otherwise the top card must be one
/// rank higher and of the opposite color.
pub fn can_place(card: Card, column: &[Card]) -> bool {
    match column.last() {
        None => true,
        Some(top) => top.rank() == card.rank() + 1 && top.is_red() != card.is_red(),
    }
}

/// A FreeCell position: tableau columns, free cells and foundations.
///
/// Foundations are indexed by suit and only store their top card, since a
/// foundation is always the run from the Ace up to that card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    pub tableaus: [Column; TOTAL_TABLEAUS],
    pub freecells: [Option<Card>; TOTAL_FREECELLS],
    pub foundations: [Option<Card>; TOTAL_FOUNDATIONS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic Microsoft FreeCell deal for the given game number.
    pub fn new_from_seed(seed: u32) -> Self {
        const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

        let mut current_seed = seed;
        let mut rnd = || {
            current_seed = current_seed.wrapping_mul(214013).wrapping_add(2531011);
            (current_seed >> 16) & 0x7fff
        };
        let mut deck: Vec<Card> = (1..=MAX_RANK)
            .flat_map(|rank| SUITS.into_iter().filter_map(move |suit| Card::new(rank, suit)))
            .collect();

        let mut board = Board::new();
        let mut i = 0;
        while !deck.is_empty() {
            let j = rnd() as usize % deck.len();
            board.tableaus[i % TOTAL_TABLEAUS].push(deck.swap_remove(j));
            i += 1;
        }

        board
    }

    /// The fixed deal bundled with the solver.
    pub fn preset() -> Result<Self> {
        let board = Self::parse(PRESET).context("Invalid preset deal")?;
        board.validate().context("Invalid preset deal")?;
        Ok(board)
    }

    /// Builds a board from card identifiers such as `"10 of Hearts"`.
    ///
    /// Foundation `i` belongs to the suit at index `i` (Hearts, Diamonds,
    /// Clubs, Spades) and must list that suit from the Ace upward.
    pub fn from_layout<S: AsRef<str>>(
        tableaus: &[Vec<S>],
        freecells: &[Option<S>],
        foundations: &[Vec<S>],
    ) -> Result<Self, Error> {
        if tableaus.len() > TOTAL_TABLEAUS {
            return Err(Error::TooManyColumns(tableaus.len()));
        }
        if freecells.len() > TOTAL_FREECELLS {
            return Err(Error::TooManyFreeCells(freecells.len()));
        }
        if foundations.len() > TOTAL_FOUNDATIONS {
            return Err(Error::TooManyFoundations(foundations.len()));
        }

        let mut board = Board::new();
        for (column, cards) in board.tableaus.iter_mut().zip(tableaus) {
            for card in cards {
                column.push(card.as_ref().parse()?);
            }
        }
        for (cell, card) in board.freecells.iter_mut().zip(freecells) {
            *cell = card.as_ref().map(|c| c.as_ref().parse()).transpose()?;
        }
        for (index, cards) in foundations.iter().enumerate() {
            let cards = cards
                .iter()
                .map(|c| c.as_ref().parse())
                .collect::<Result<Vec<Card>, Error>>()?;
            board.foundations[index] = Self::check_foundation(index, &cards)?;
        }
        Ok(board)
    }

    fn check_foundation(index: usize, cards: &[Card]) -> Result<Option<Card>, Error> {
        let suit = Suit::ALL[index];
        for (rank, &card) in (1..).zip(cards) {
            if Card::new(rank, suit) != Some(card) {
                return Err(Error::InvalidFoundation { index, card });
            }
        }
        Ok(cards.last().copied())
    }

    pub fn tableau_top(&self, idx: usize) -> Option<Card> {
        self.tableaus.get(idx).and_then(|column| column.last().copied())
    }

    pub fn freecell(&self, idx: usize) -> Option<Card> {
        self.freecells.get(idx).copied().flatten()
    }

    pub fn first_empty_freecell(&self) -> Option<usize> {
        self.freecells.iter().position(Option::is_none)
    }

    /// Number of cards on the foundation at `idx`.
    pub fn foundation_len(&self, idx: usize) -> u8 {
        self.foundations[idx].map(|card| card.rank()).unwrap_or(0)
    }

    /// The cards of a foundation, Ace first.
    pub fn foundation_cards(&self, idx: usize) -> Vec<Card> {
        let suit = Suit::ALL[idx];
        (1..=self.foundation_len(idx))
            .filter_map(|rank| Card::new(rank, suit))
            .collect()
    }

    pub fn foundation_score(&self) -> u8 {
        (0..TOTAL_FOUNDATIONS).map(|i| self.foundation_len(i)).sum()
    }

    pub fn can_place_in_foundation(&self, card: Card) -> bool {
        self.foundation_len(card.suit().index()) + 1 == card.rank()
    }

    pub fn is_solved(&self) -> bool {
        (0..TOTAL_FOUNDATIONS).all(|i| self.foundation_len(i) == MAX_RANK)
    }

    /// Checks that each of the 52 cards appears exactly once.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = [false; MAX_CARD as usize];
        let mut count = 0;

        let foundation_cards = (0..TOTAL_FOUNDATIONS).flat_map(|i| self.foundation_cards(i));
        let cards = self
            .tableaus
            .iter()
            .flat_map(|column| column.iter().copied())
            .chain(self.freecells.iter().flatten().copied())
            .chain(foundation_cards);
        for card in cards {
            let id = card.id() as usize;
            if seen[id] {
                return Err(Error::DuplicateCard(card));
            }
            seen[id] = true;
            count += 1;
        }

        match MAX_CARD as usize - count {
            0 => Ok(()),
            missing => Err(Error::MissingCards(missing)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn is_legal(&self, mov: Move) -> bool {
        match mov {
            Move::TableauToFree(from, to, card) => {
                self.tableau_top(from) == Some(card)
                    && self.freecells.get(to).is_some_and(Option::is_none)
            }
            Move::FreeToTableau(from, to, card) => {
                self.freecell(from) == Some(card)
                    && self
                        .tableaus
                        .get(to)
                        .is_some_and(|column| can_place(card, column))
            }
            Move::TableauToTableau(from, to, card) => {
                from != to
                    && self.tableau_top(from) == Some(card)
                    && self
                        .tableaus
                        .get(to)
                        .is_some_and(|column| can_place(card, column))
            }
            Move::TableauToFoundation(from, card) => {
                self.tableau_top(from) == Some(card) && self.can_place_in_foundation(card)
            }
            Move::FreeToFoundation(from, card) => {
                self.freecell(from) == Some(card) && self.can_place_in_foundation(card)
            }
        }
    }

    /// Applies `mov` after checking it against the current position.
    pub fn apply(&mut self, mov: Move) -> Result<(), Error> {
        if !self.is_legal(mov) {
            return Err(Error::IllegalMove(mov));
        }
        self.apply_unchecked(mov);
        Ok(())
    }

    /// Applies a move already known to be legal.
    ///
    /// Panics if an index is out of range.
    pub fn apply_unchecked(&mut self, mov: Move) {
        match mov {
            Move::TableauToFree(from, to, _) => {
                self.freecells[to] = self.tableaus[from].pop();
            }
            Move::FreeToTableau(from, to, _) => {
                if let Some(card) = self.freecells[from].take() {
                    self.tableaus[to].push(card);
                }
            }
            Move::TableauToTableau(from, to, _) => {
                if let Some(card) = self.tableaus[from].pop() {
                    self.tableaus[to].push(card);
                }
            }
            Move::TableauToFoundation(from, _) => {
                if let Some(card) = self.tableaus[from].pop() {
                    self.foundations[card.suit().index()] = Some(card);
                }
            }
            Move::FreeToFoundation(from, _) => {
                if let Some(card) = self.freecells[from].take() {
                    self.foundations[card.suit().index()] = Some(card);
                }
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut board: Self = Default::default();

        for line in content
            .split('\n')
            .map(|v| v.trim())
            .filter(|l| !l.is_empty())
        {
            let line_context = || format!("Failed to parse at '{line}'");
            if let Some(rest) = line.strip_prefix("FreeCells:") {
                let cells = rest.split(',').map(|v| v.trim()).collect::<Vec<_>>();
                if cells.len() > TOTAL_FREECELLS {
                    return Err(Error::TooManyFreeCells(cells.len())).with_context(line_context);
                }
                for (cell, value) in board.freecells.iter_mut().zip(cells) {
                    *cell = match value {
                        "" | EMPTY_CELL => None,
                        value => Some(value.parse::<Card>().with_context(line_context)?),
                    };
                }
            } else if let Some(rest) = line.strip_prefix("Foundation") {
                let (idx, cards) = Self::parse_indexed(rest, TOTAL_FOUNDATIONS)
                    .context("Invalid foundation index")
                    .with_context(line_context)?;
                let cards = Self::parse_cards(cards).with_context(line_context)?;
                board.foundations[idx] =
                    Self::check_foundation(idx, &cards).with_context(line_context)?;
            } else if let Some(rest) = line.strip_prefix("Tableau") {
                let (idx, cards) = Self::parse_indexed(rest, TOTAL_TABLEAUS)
                    .context("Invalid tableau index")
                    .with_context(line_context)?;
                let cards = Self::parse_cards(cards).with_context(line_context)?;
                board.tableaus[idx].extend(cards);
            }
        }

        Ok(board)
    }

    // Splits `"<n>: <rest>"` into a zero-based index below `total` and the rest.
    fn parse_indexed(s: &str, total: usize) -> Result<(usize, &str)> {
        let (idx, rest) = s.split_once(':').context("Missing ':'")?;
        let idx = idx.trim().parse::<usize>()?;
        anyhow::ensure!((1..=total).contains(&idx), "Index {idx} out of range 1..={total}");
        Ok((idx - 1, rest))
    }

    fn parse_cards(s: &str) -> Result<Vec<Card>, Error> {
        s.split(',')
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();

        // Free cells
        if self.freecells.iter().any(Option::is_some) {
            let cells = self
                .freecells
                .iter()
                .map(|cell| match cell {
                    Some(card) => card.to_string(),
                    None => EMPTY_CELL.to_string(),
                })
                .collect::<Vec<_>>();
            output.push_str(&format!("FreeCells: {}\n", cells.join(", ")));
        }

        // Foundations
        for i in 0..TOTAL_FOUNDATIONS {
            let cards = self.foundation_cards(i);
            if !cards.is_empty() {
                output.push_str(&format!("Foundation{}: {}\n", i + 1, join_cards(&cards)));
            }
        }

        // Tableaus
        for (i, column) in self.tableaus.iter().enumerate() {
            if !column.is_empty() {
                output.push_str(&format!("Tableau{}: {}\n", i + 1, join_cards(column)));
            }
        }

        output.truncate(output.trim_end().len());
        output
    }
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
