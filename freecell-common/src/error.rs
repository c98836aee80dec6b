use crate::{card::Card, moves::Move};

use thiserror::Error;

/// Caller-contract violations detected while building or replaying a layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid card format: '{0}'")]
    InvalidCardFormat(String),
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("Layout is missing {0} card(s)")]
    MissingCards(usize),
    #[error("Foundation{} is not built from the Ace of its suit, found {card}", .index + 1)]
    InvalidFoundation { index: usize, card: Card },
    #[error("Expected at most 8 tableau columns, got {0}")]
    TooManyColumns(usize),
    #[error("Expected at most 4 free cells, got {0}")]
    TooManyFreeCells(usize),
    #[error("Expected at most 4 foundations, got {0}")]
    TooManyFoundations(usize),
    #[error("Illegal move: {0}")]
    IllegalMove(Move),
}
