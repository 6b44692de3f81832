#![allow(clippy::cast_precision_loss)]

use crate::dlx::column_selection::{ColumnSelection, FirstActive, MinCount};
use crate::dlx::solver::{SearchStats, Solver};
use crate::sudoku::solver::{
    CANDIDATE_ROWS, COLUMNS, Grid, Sudoku, parse_grid, parse_sudoku_file, verify,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "dlx_solver", version, about = "A dancing-links Sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as a puzzle file to solve, or a directory of `.sudoku`
    /// files to solve in bulk.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `sudoku`, `text`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a Sudoku puzzle file.
    Sudoku {
        /// Path to the puzzle file. The format is defined by
        /// `sudoku::solver::parse_grid`: 81 cells, `0` or `.` for empties.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// The grid as a string of 81 cells (e.g. "53..7....6..195...").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Which column-selection heuristic drives the search.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ColumnSelectionType {
    /// Minimum-remaining-values: branch on the most constrained column.
    #[default]
    MinCount,
    /// Take the first uncovered column; the benchmark baseline.
    FirstActive,
}

impl fmt::Display for ColumnSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinCount => write!(f, "min-count"),
            Self::FirstActive => write!(f, "first-active"),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the
    /// solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification of the found solution against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the chosen candidate-row identifiers alongside the
    /// solved grid.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Specifies the column-selection heuristic to use.
    #[arg(long, default_value_t = ColumnSelectionType::MinCount)]
    column_selection: ColumnSelectionType,
}

/// Runs the exact-cover pipeline for one puzzle with the heuristic `C`:
/// build the matrix, preselect the clues, search.
fn run<C: ColumnSelection>(sudoku: &Sudoku) -> (Option<Vec<usize>>, SearchStats) {
    let mut solver: Solver<C> = Solver::new(Sudoku::to_matrix());
    let solution = if sudoku.apply_clues(&mut solver) {
        solver.solve()
    } else {
        None
    };
    (solution, solver.stats())
}

/// Solves a parsed puzzle using the configured heuristic.
///
/// # Returns
/// A tuple containing:
/// * `Option<Vec<usize>>`: The chosen candidate rows if a solution exists.
/// * `Duration`: The time taken to build the matrix and search.
/// * `SearchStats`: Statistics collected during the search.
pub(crate) fn solve(
    sudoku: &Sudoku,
    label: Option<&PathBuf>,
    common: &CommonOptions,
) -> (Option<Vec<usize>>, Duration, SearchStats) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("Columns: {COLUMNS}");
        println!("Candidate rows: {CANDIDATE_ROWS}");
        println!("Clues: {}", sudoku.grid.clue_count());
        println!("Heuristic: {}", common.column_selection);
    }

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let (solution, search_stats) = match common.column_selection {
        ColumnSelectionType::MinCount => run::<MinCount>(sudoku),
        ColumnSelectionType::FirstActive => run::<FirstActive>(sudoku),
    };
    let elapsed = time.elapsed();

    if common.debug {
        println!("Solution rows: {solution:?}");
        println!("Time: {elapsed:?}");
    }

    (solution, elapsed, search_stats)
}

/// Solves a parsed puzzle and reports results including stats and
/// verification.
pub(crate) fn solve_and_report(
    sudoku: &Sudoku,
    common: &CommonOptions,
    label: Option<&PathBuf>,
    parse_time: Duration,
) {
    let (solution, elapsed, search_stats) = solve(sudoku, label, common);

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    let solved = solution
        .as_deref()
        .map(|rows| sudoku.decode(rows));

    if common.verify {
        verify_solution(solved.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            sudoku,
            &search_stats,
            allocated_mib,
            resident_mib,
            common.print_solution,
            solution.as_deref(),
        );
    }

    if let Some(grid) = solved {
        println!("Solution:\n{grid}");
    } else {
        println!("No solution found");
    }
}

/// Verifies a decoded solution grid against the Sudoku rules.
///
/// Prints whether the verification was successful. If verification fails,
/// it panics. If `solved` is `None` (no cover exists), it prints
/// "UNSOLVABLE".
pub(crate) fn verify_solution(solved: Option<&Grid>) {
    if let Some(grid) = solved {
        let ok = verify(grid);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Solves a directory of `.sudoku` puzzle files.
///
/// This function iterates over all `.sudoku` files under the directory,
/// parses each file, solves it, and reports the results.
///
/// # Errors
/// If a file cannot be read or parsed.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_sudoku(&file_path, common)?;
    }

    Ok(())
}

/// Helper function to print a single statistic line in a formatted table
/// row.
pub(crate) fn stat_line(label: &str, value: impl fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::too_many_arguments)]
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    sudoku: &Sudoku,
    s: &SearchStats,
    allocated: f64,
    resident: f64,
    print_solution: bool,
    solution: Option<&[usize]>,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Columns", COLUMNS);
    stat_line("Candidate rows", CANDIDATE_ROWS);
    stat_line("Clues", sudoku.grid.clue_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Max depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if let Some(rows) = solution {
        if print_solution {
            println!("Chosen rows: {rows:?}");
        }
    }

    if solution.is_some() {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

/// Solve a sudoku file.
///
/// # Errors
///
/// If the puzzle file doesn't exist or does not parse.
pub(crate) fn solve_sudoku(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    match parse_sudoku_file(path) {
        Ok(sudoku) => {
            println!("Parsed Sudoku:\n{sudoku}");
            let parse_time = time.elapsed();
            solve_and_report(&sudoku, common, Some(path), parse_time);
            Ok(())
        }
        Err(e) => Err(format!("Error parsing Sudoku file: {e}")),
    }
}

/// Solve a puzzle given as literal text input.
///
/// # Errors
///
/// If the input does not parse as a grid.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    match parse_grid(input) {
        Ok(grid) => {
            let sudoku = Sudoku::new(grid);
            println!("Parsed Sudoku:\n{sudoku}");
            let parse_time = time.elapsed();
            solve_and_report(&sudoku, common, None, parse_time);
            Ok(())
        }
        Err(e) => Err(format!("Error parsing grid: {e}")),
    }
}
