mod utils;

use crate::utils::*;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use freecell_common::{
    board::Board,
    moves::{format_moves, format_steps},
};
use freecell_solver::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_STATES, SolveLimits};

use std::{
    io::{IsTerminal, Read, stdin},
    path::PathBuf,
    process::ExitCode,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Microsoft FreeCell game number (e.g. 11982)
    #[arg(short, long, value_name = "NUM")]
    deal: Option<u32>,
    /// Solve the bundled preset deal
    #[arg(long, conflicts_with = "deal")]
    preset: bool,
    /// Max number of moves to search ahead
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_name = "NUM")]
    max_depth: usize,
    /// Max distinct states to explore
    #[arg(short = 's', long, default_value_t = DEFAULT_MAX_STATES, value_name = "NUM")]
    max_states: usize,
    /// Preview initial game state without solving
    #[arg(short, long)]
    preview: bool,
    /// Log search progress to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Path to a game state file to solve
    file: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let Cli {
        deal,
        preset,
        max_depth,
        max_states,
        preview,
        verbose,
        file,
    } = Cli::parse();

    configure_logging(verbose)?;

    let board = if let Some(file) = file {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
        Board::parse(&content).context("Failed to parse board")?
    } else if let Some(seed) = deal {
        Board::new_from_seed(seed)
    } else if preset {
        Board::preset()?
    } else if !stdin().is_terminal() {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        Board::parse(&content).context("Failed to parse board")?
    } else {
        bail!("No game state `file`, `--deal` or `--preset` provided.");
    };
    if preview {
        println!("{}", board.pretty_print());
        return Ok(ExitCode::SUCCESS);
    }

    let limits = SolveLimits {
        max_depth,
        max_states,
    };
    let Some(moves) = do_solve(board, limits, verbose == 0)? else {
        return Ok(ExitCode::from(NO_SOLUTION_EXIT_CODE));
    };
    println!("{}", format_moves(&moves));
    print!("{}", format_steps(&moves));

    Ok(ExitCode::SUCCESS)
}
