use clap::{ArgAction, Parser, Subcommand};
use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, SetBackgroundColor, Stylize},
};
use lbl_cube::{
    config::Config,
    constants::DEFAULT_DIMENSION,
    error::Error,
    facelet::{Color, CubeState, Face},
    moves::simplify,
    scramble::{gen_scramble, gen_scramble_with, scramble_from_str, scramble_to_str},
    solver::{SolveResult, Solver, StageOutcome},
};
use log::{debug, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use spinners::Spinner;
use std::{
    io::{self, stdout, Write},
    time::Instant,
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Cube(#[from] Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves a 3x3 cube layer by layer")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        /// Print what every stage did
        #[arg(short, long)]
        details: bool,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 25)]
        number: usize,

        #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
        dimension: usize,

        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        preview: bool,
    },
}

fn solve(
    scramble: &Option<String>,
    facelet: &Option<String>,
    details: bool,
    preview: bool,
) -> Result<(), CliError> {
    let state = if let Some(scramble) = scramble {
        let mut state = CubeState::solved(DEFAULT_DIMENSION)?;
        state.apply_moves(&scramble_from_str(scramble)?)?;
        state
    } else if let Some(facelet) = facelet {
        CubeState::try_from(facelet.as_str())?
    } else {
        return Ok(());
    };
    let config = Config::new(state.dimension())?.with_initial_state(state)?;
    if preview {
        print_net(config.initial_state())?;
    }
    solve_state(&config, details)
}

fn solve_state(config: &Config, details: bool) -> Result<(), CliError> {
    let start = Instant::now();
    let solver = Solver::from_config(config)?;
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = solver.solve(config.initial_state())?;
    let end = Instant::now();

    spinner.stop_with_newline();

    let solution = simplify(&result.solution);
    debug!("raw solution: {} turns", result.solution.len());
    println!("Solution: {}", scramble_to_str(&solution));
    println!("Move count: {}", solution.len());
    println!("Solve time: {:?}", result.solve_time);
    println!("Total time: {:?}", end - start);
    if details {
        print_details(&result);
    }
    if !result.solved {
        let styled = "Warning:".with(TermColor::Yellow).attribute(Attribute::Bold);
        println!("{styled} the solver gave up before the cube was solved");
    }

    Ok(())
}

fn print_details(result: &SolveResult) {
    for report in &result.stages {
        let outcome = match report.outcome {
            StageOutcome::Solved => "solved".with(TermColor::Green),
            StageOutcome::Exhausted => "exhausted".with(TermColor::Red),
        };
        println!(
            "{:<12} {:<10} attempts: {:>2}  moves: {:>3}",
            report.stage.to_string(),
            outcome,
            report.attempts,
            report.moves
        );
    }
}

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::Yellow => TermColor::DarkYellow,
        Color::Orange => TermColor::Magenta,
        Color::Green => TermColor::Green,
        Color::White => TermColor::White,
        Color::Red => TermColor::Red,
        Color::Blue => TermColor::Blue,
    }
}

fn queue_face_row<W: Write>(
    out: &mut W,
    state: &CubeState,
    face: Face,
    row: usize,
) -> io::Result<()> {
    for col in 0..state.dimension() {
        queue!(
            out,
            SetBackgroundColor(color_to_termcolor(state.get(face, row, col))),
            Print("  ")
        )?;
    }
    queue!(out, SetBackgroundColor(TermColor::Reset))
}

/// Unfolded net: Top above, Left Front Right Back across, Bottom below.
fn write_net<W: Write>(out: &mut W, state: &CubeState) -> io::Result<()> {
    let n = state.dimension();
    let indent = " ".repeat(2 * n);
    queue!(out, Print("\n"))?;
    for row in 0..n {
        queue!(out, Print(&indent))?;
        queue_face_row(out, state, Face::Top, row)?;
        queue!(out, Print("\n"))?;
    }
    for row in 0..n {
        for face in [Face::Left, Face::Front, Face::Right, Face::Back] {
            queue_face_row(out, state, face, row)?;
        }
        queue!(out, Print("\n"))?;
    }
    for row in 0..n {
        queue!(out, Print(&indent))?;
        queue_face_row(out, state, Face::Bottom, row)?;
        queue!(out, Print("\n"))?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}

fn print_net(state: &CubeState) -> io::Result<()> {
    write_net(&mut stdout(), state)
}

fn scramble(
    number: usize,
    dimension: usize,
    seed: Option<u64>,
    preview: bool,
) -> Result<(), CliError> {
    let ss = match seed {
        Some(seed) => gen_scramble_with(&mut StdRng::seed_from_u64(seed), dimension, number)?,
        None => gen_scramble(dimension, number)?,
    };
    println!("Scramble: {}", scramble_to_str(&ss));
    if preview {
        let mut cc = CubeState::solved(dimension)?;
        cc.apply_moves(&ss)?;
        print_net(&cc)?;
    }
    Ok(())
}

fn main() {
    let program = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match program.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            details,
            preview,
        }) => solve(scramble, facelet, *details, *preview),
        Some(Commands::Scramble {
            number,
            dimension,
            seed,
            preview,
        }) => scramble(*number, *dimension, *seed, *preview),
        _ => Ok(()),
    };

    if let Err(error) = result {
        let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
        println!("{styled} {error}");
    }
}
