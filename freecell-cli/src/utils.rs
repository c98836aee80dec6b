use anyhow::{Context, Result};
use freecell_common::{board::Board, moves::Move};
use freecell_solver::{SolveLimits, SolveResult, solve};

use std::{
    io::{IsTerminal, Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

pub fn configure_logging(verbosity: u8) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    let mut directives = match verbosity {
        0 => "freecell_solver=warn",
        1 => "freecell_solver=debug",
        _ => "freecell_solver=trace",
    }
    .to_string();
    if let Ok(overrides) = std::env::var("RUST_LOG") {
        // full override for debugging
        directives = overrides;
    }
    let env_filter = tracing_subscriber::filter::EnvFilter::new(directives);
    let registry = tracing_subscriber::Registry::default().with(env_filter);
    let mut fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time();
    if verbosity < 3 {
        fmt_layer = fmt_layer.with_target(false);
    }
    let sub = registry.with(fmt_layer);
    tracing::subscriber::set_global_default(sub).context("Failed to set default logger")
}

/// Exit status when the search ends without a solution.
pub const NO_SOLUTION_EXIT_CODE: u8 = 2;

pub fn do_solve(board: Board, limits: SolveLimits, spinner: bool) -> Result<Option<Vec<Move>>> {
    let board_str = board.pretty_print();
    println!("{board_str}\n");
    let task = move || solve(board, limits);
    let result = if spinner {
        with_spinner("Solving the game...", task)?
    } else {
        task()?
    };
    let Some(moves) = &result.moves else {
        eprintln!("{}", unsolved_message(&result, limits));
        return Ok(None);
    };
    println!(
        "✓ Solved in {} Moves — Time: {}, States: {}\n",
        moves.len(),
        format_elapsed(result.elapsed),
        result.states
    );
    Ok(result.moves)
}

fn unsolved_message(result: &SolveResult, limits: SolveLimits) -> String {
    let elapsed_str = format_elapsed(result.elapsed);
    if result.exhausted_budget {
        format!(
            "Unable to solve the game; reached max states {}. Time: {elapsed_str}",
            limits.max_states
        )
    } else {
        format!(
            "No solution found within {} moves. Time: {elapsed_str}, States: {}",
            limits.max_depth, result.states
        )
    }
}

const SPINNER_CHARS: [char; 4] = ['|', '/', '-', '\\'];

// Stops the spinner even if the task panics.
struct StopOnDrop<'a>(&'a AtomicBool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if !stderr().is_terminal() {
        return f();
    }
    spin(stderr(), message, f)
}

fn spin<T, W: Write + Send, F: FnOnce() -> T>(mut handle: W, message: &str, f: F) -> T {
    let spinning = AtomicBool::new(true);
    std::thread::scope(|scope| {
        scope.spawn(|| {
            let _ = write!(handle, "\x1b[?25l"); // hide cursor
            for spinner_char in SPINNER_CHARS.iter().cycle() {
                if !spinning.load(Ordering::Relaxed) {
                    break;
                }
                let _ = write!(handle, "\r{spinner_char} {message}");
                let _ = handle.flush();
                std::thread::sleep(Duration::from_millis(100));
            }
            let _ = write!(handle, "\r\x1b[2K\r\x1b[?25h"); // clear line and show cursor
            let _ = handle.flush();
        });

        let _stop = StopOnDrop(&spinning);
        f()
    })
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 90 {
        let ms = elapsed.subsec_millis();
        format!("{secs}.{ms:03}s")
    } else {
        let minutes = secs / 60;
        let secs = secs % 60;
        format!("{minutes}m {secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(1_234)), "1.234s");
        assert_eq!(format_elapsed(Duration::from_secs(89)), "89.000s");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_with_spinner_returns_result() {
        assert_eq!(with_spinner("Working...", || 42), 42);
        assert_eq!(spin(std::io::sink(), "Working...", || 42), 42);
    }

    #[test]
    fn test_spinner_stops_when_task_panics() {
        let result = std::panic::catch_unwind(|| {
            spin(std::io::sink(), "Working...", || -> u32 { panic!("task failed") })
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_unsolved_message() {
        let limits = SolveLimits {
            max_depth: 7,
            max_states: 3,
        };
        let mut result = SolveResult {
            moves: None,
            states: 3,
            elapsed: Duration::from_millis(5),
            exhausted_budget: true,
        };
        assert_eq!(
            unsolved_message(&result, limits),
            "Unable to solve the game; reached max states 3. Time: 0.005s"
        );
        result.exhausted_budget = false;
        assert_eq!(
            unsolved_message(&result, limits),
            "No solution found within 7 moves. Time: 0.005s, States: 3"
        );
    }
}
