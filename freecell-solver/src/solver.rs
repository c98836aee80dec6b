use super::*;

use ahash::AHashSet;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub const DEFAULT_MAX_DEPTH: usize = 100;
pub const DEFAULT_MAX_STATES: usize = 10_000_000;

pub fn solve(board: Board, limits: SolveLimits) -> Result<SolveResult> {
    board.validate().context("Invalid initial board state.")?;
    let mut solver = Solver::new(board);
    solver.set_limits(limits);
    Ok(solver.solve())
}

/// Bounds of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveLimits {
    /// Positions deeper than this many moves are not expanded.
    pub max_depth: usize,
    /// The search gives up once this many distinct positions were visited.
    pub max_states: usize,
}

impl Default for SolveLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The winning line, or `None` if no solution was found within the limits.
    pub moves: Option<Vec<Move>>,
    pub states: usize,
    pub elapsed: Duration,
    pub exhausted_budget: bool,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        self.moves.is_some()
    }
}

// A position being explored, with the candidates not tried yet.
struct Frame {
    board: Board,
    possible_moves: PossibleMoves,
    next: usize,
}

enum Visit {
    Solved,
    Exhausted,
    Expanded(Frame),
}

/// Depth-first FreeCell solver.
///
/// The visited positions and the current line of moves belong to one
/// `solve` call and are cleared when the next one starts.
#[derive(Debug, Clone)]
pub struct Solver {
    initial_board: Board,
    limits: SolveLimits,
    visited: AHashSet<StateKey>,
    moves: Vec<Move>,
    exhausted_budget: bool,
}

impl Solver {
    pub fn new(board: Board) -> Self {
        Self {
            initial_board: board,
            limits: SolveLimits::default(),
            visited: AHashSet::new(),
            moves: Vec::new(),
            exhausted_budget: false,
        }
    }

    pub fn set_limits(&mut self, limits: SolveLimits) {
        self.limits = limits;
    }

    pub fn solve(&mut self) -> SolveResult {
        self.visited.clear();
        self.moves.clear();
        self.exhausted_budget = false;

        debug!(
            max_depth = self.limits.max_depth,
            max_states = self.limits.max_states,
            "Solving the game"
        );
        let timer = Instant::now();
        let solved = self.search();
        let result = SolveResult {
            moves: solved.then(|| std::mem::take(&mut self.moves)),
            states: self.visited.len(),
            elapsed: timer.elapsed(),
            exhausted_budget: self.exhausted_budget,
        };
        match &result.moves {
            Some(moves) => debug!(
                moves = moves.len(),
                states = result.states,
                "Solution found"
            ),
            None => debug!(
                states = result.states,
                exhausted_budget = result.exhausted_budget,
                "No solution found"
            ),
        }
        result
    }

    fn search(&mut self) -> bool {
        let mut stack: Vec<Frame> = Vec::new();
        match self.visit(self.initial_board.clone(), 0) {
            Visit::Solved => return true,
            Visit::Exhausted => return false,
            Visit::Expanded(frame) => stack.push(frame),
        }

        // `self.moves` always holds the line leading to the top frame.
        while let Some(frame) = stack.last_mut() {
            let Some(&mov) = frame.possible_moves.get(frame.next) else {
                stack.pop();
                if let Some(mov) = self.moves.pop() {
                    trace!("Backtracking from move: {mov}");
                }
                continue;
            };
            frame.next += 1;

            let mut board = frame.board.clone();
            board.apply_unchecked(mov);
            self.moves.push(mov);
            let depth = stack.len();
            trace!(depth, "Trying move: {mov}");

            match self.visit(board, depth) {
                Visit::Solved => return true,
                Visit::Expanded(frame) => stack.push(frame),
                Visit::Exhausted => {
                    if self.exhausted_budget {
                        return false;
                    }
                    self.moves.pop();
                    trace!("Backtracking from move: {mov}");
                }
            }
        }

        false
    }

    fn visit(&mut self, board: Board, depth: usize) -> Visit {
        if board.is_solved() {
            return Visit::Solved;
        }

        if depth > self.limits.max_depth {
            trace!(depth, "Depth limit reached");
            return Visit::Exhausted;
        }

        let key = get_state(&board);
        if self.visited.contains(&key) {
            trace!("State already visited");
            return Visit::Exhausted;
        }
        if self.visited.len() >= self.limits.max_states {
            debug!(states = self.visited.len(), "Reached max states");
            self.exhausted_budget = true;
            return Visit::Exhausted;
        }
        self.visited.insert(key);

        let mut possible_moves = PossibleMoves::new();
        compute_possible_moves(&board, &mut possible_moves);
        Visit::Expanded(Frame {
            board,
            possible_moves,
            next: 0,
        })
    }
}
