//! This crate provides a depth-first search solver for FreeCell Solitaire.
//!
//! The search tries single-card moves in a fixed priority order, remembers
//! every visited position and backtracks out of dead ends.
mod movegen;
mod solver;
mod state;

use crate::state::*;

pub use crate::movegen::compute_possible_moves;
pub use crate::solver::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_STATES, SolveLimits, SolveResult, Solver, solve,
};
use freecell_common::board::{
    Board, TOTAL_FOUNDATIONS, TOTAL_FREECELLS, TOTAL_TABLEAUS, can_place,
};
use freecell_common::card::{Card, MAX_CARD};
use freecell_common::moves::Move;

use smallvec::SmallVec;

pub type PossibleMoves = SmallVec<[Move; 64]>;
