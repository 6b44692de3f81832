//! # dlx_solver
//!
//! `dlx_solver` is a command-line Sudoku solver built on Knuth's Algorithm X
//! with dancing links. A puzzle is reduced to an exact-cover instance (324
//! constraint columns, 729 candidate rows), the clues are preselected into
//! the partial solution, and a depth-first search with the
//! minimum-remaining-values heuristic finds the first full cover.
//!
//! ## Usage
//!
//! ### General Syntax
//!
//! ```sh
//! dlx_solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided as the *only* argument (without a subcommand),
//!     it's treated as a puzzle file to solve. If it names a directory,
//!     every `.sudoku` file underneath it is solved in turn.
//!
//!     ```sh
//!     dlx_solver <path_to_puzzle_file>
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`sudoku`**: Solve a Sudoku puzzle file.
//!     ```sh
//!     dlx_solver sudoku --path <path_to_puzzle_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve a puzzle provided as plain text.
//!     ```sh
//!     dlx_solver text --input "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
//!     ```
//!
//! 3.  **`completions`**: Generate shell completion scripts.
//!     ```sh
//!     dlx_solver completions bash
//!     ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `-v, --verify`: Verify the solved grid against the Sudoku rules
//!     (default: `true`).
//! -   `-s, --stats`: Print problem and search statistics (default: `true`).
//! -   `-p, --print-solution`: Print the chosen candidate-row identifiers
//!     (default: `false`).
//! -   `--column-selection <HEURISTIC>`: `min-count` or `first-active`
//!     (default: `min-count`).

use crate::command_line::cli::{Cli, Commands, solve_dir, solve_sudoku, solve_text};
use clap::{CommandFactory, Parser};

mod command_line;
mod dlx;
mod sudoku;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand: a directory is solved in bulk, anything else is treated
    // as a single puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            let result = if path.is_dir() {
                solve_dir(&path, &cli.common)
            } else {
                solve_sudoku(&path, &cli.common)
            };

            if let Err(e) = result {
                eprintln!("{e}");
                std::process::exit(1);
            }
            return;
        }
    }

    match cli.command {
        Some(Commands::Sudoku { path, common }) => {
            if let Err(e) = solve_sudoku(&path, &common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }

        Some(Commands::Text { input, common }) => {
            if let Err(e) = solve_text(&input, &common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            // This case is reached if no subcommand was provided and
            // `cli.path` was also None.
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}
