use crate::card::Card;

use std::fmt;

/// A single-card move. Indices are zero-based.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    TableauToFree(usize, usize, Card),    // (tableau_index, freecell_index, card)
    FreeToTableau(usize, usize, Card),    // (freecell_index, tableau_index, card)
    TableauToTableau(usize, usize, Card), // (from_index, to_index, card)
    TableauToFoundation(usize, Card),     // (tableau_index, card)
    FreeToFoundation(usize, Card),        // (freecell_index, card)
}

impl Move {
    pub fn card(&self) -> Card {
        match *self {
            Move::TableauToFree(_, _, card)
            | Move::FreeToTableau(_, _, card)
            | Move::TableauToTableau(_, _, card)
            | Move::TableauToFoundation(_, card)
            | Move::FreeToFoundation(_, card) => card,
        }
    }

    pub fn from(&self) -> usize {
        match *self {
            Move::TableauToFree(from, ..)
            | Move::FreeToTableau(from, ..)
            | Move::TableauToTableau(from, ..)
            | Move::TableauToFoundation(from, _)
            | Move::FreeToFoundation(from, _) => from,
        }
    }

    /// Destination index; foundation moves go to the pile of the card's suit.
    pub fn to(&self) -> usize {
        match *self {
            Move::TableauToFree(_, to, _)
            | Move::FreeToTableau(_, to, _)
            | Move::TableauToTableau(_, to, _) => to,
            Move::TableauToFoundation(_, card) | Move::FreeToFoundation(_, card) => {
                card.suit().index()
            }
        }
    }

    pub fn is_to_foundation(&self) -> bool {
        matches!(
            self,
            Move::TableauToFoundation(..) | Move::FreeToFoundation(..)
        )
    }

    /// Short `source:destination` code, e.g. `T1:C2` or `C1:F3`.
    pub fn code(&self) -> String {
        let from = self.from() + 1;
        let to = self.to() + 1;
        match self {
            Move::TableauToFree(..) => format!("T{from}:C{to}"),
            Move::FreeToTableau(..) => format!("C{from}:T{to}"),
            Move::TableauToTableau(..) => format!("T{from}:T{to}"),
            Move::TableauToFoundation(..) => format!("T{from}:F{to}"),
            Move::FreeToFoundation(..) => format!("C{from}:F{to}"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = self.card();
        let from = self.from() + 1;
        let to = self.to() + 1;
        match self {
            Move::TableauToFree(..) => {
                write!(f, "Move {card} from Tableau{from} to FreeCell{to}")
            }
            Move::FreeToTableau(..) => {
                write!(f, "Move {card} from FreeCell{from} to Tableau{to}")
            }
            Move::TableauToTableau(..) => {
                write!(f, "Move {card} from Tableau{from} to Tableau{to}")
            }
            Move::TableauToFoundation(..) => {
                write!(f, "Move {card} from Tableau{from} to Foundation{to}")
            }
            Move::FreeToFoundation(..) => {
                write!(f, "Move {card} from FreeCell{from} to Foundation{to}")
            }
        }
    }
}

pub fn format_moves(moves: &[Move]) -> String {
    let list: Vec<String> = moves.iter().map(Move::code).collect();

    let mut output = String::new();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;
    for chunk in list.chunks(10) {
        for cmd in chunk {
            output.push_str(&format!("{cmd:<width$}", width = max_width));
        }
        output.push('\n');
    }

    output
}

/// Renders the numbered, human-readable step list.
pub fn format_steps(moves: &[Move]) -> String {
    moves
        .iter()
        .enumerate()
        .map(|(i, mov)| format!("Step {}: {mov}\n", i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_moves() {
        let moves = [
            Move::TableauToFree(0, 0, card("7 of Spades")),
            Move::FreeToTableau(0, 2, card("7 of Spades")),
            Move::TableauToTableau(1, 4, card("9 of Hearts")),
            Move::TableauToFoundation(3, card("A of Clubs")),
            Move::FreeToFoundation(1, card("A of Diamonds")),
        ];
        assert_eq!(format_moves(&moves), "T1:C1 C1:T3 T2:T5 T4:F3 C2:F2 \n");
        assert_eq!(format_moves(&[]), "");
    }

    #[test]
    fn test_format_steps() {
        let moves = [
            Move::TableauToFree(6, 1, card("2 of Spades")),
            Move::TableauToFoundation(4, card("A of Clubs")),
        ];
        assert_eq!(
            format_steps(&moves),
            "Step 1: Move 2 of Spades from Tableau7 to FreeCell2\n\
             Step 2: Move A of Clubs from Tableau5 to Foundation3\n"
        );
    }

    #[test]
    fn test_move_accessors() {
        let mov = Move::FreeToFoundation(3, card("5 of Hearts"));
        assert_eq!(mov.from(), 3);
        assert_eq!(mov.to(), 0);
        assert!(mov.is_to_foundation());
        assert_eq!(mov.card(), card("5 of Hearts"));

        let mov = Move::TableauToTableau(2, 7, card("Q of Diamonds"));
        assert_eq!((mov.from(), mov.to()), (2, 7));
        assert!(!mov.is_to_foundation());
    }
}
