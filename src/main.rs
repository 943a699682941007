use std::fs;

use clap::{Parser, Subcommand};
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_mine_sim::prelude::*;

#[derive(Clone, Debug, Parser)]
#[command(name = "mine-sim", about = "Deterministic mine-wrapping simulator and solution verifier")]
struct Options {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Replay a solution against a task and report success or the failing step.
    Verify {
        #[arg(long)]
        task: String,
        #[arg(long)]
        solution: String,
    },
    /// Print the debug grid for a task, optionally after replaying a solution.
    Render {
        #[arg(long)]
        task: String,
        #[arg(long)]
        solution: Option<String>,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let options = Options::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            _ => AdaptiveFormat::Default,
        })
        .start()?;

    match options.command {
        Command::Verify { task, solution } => run_verify(&task, &solution),
        Command::Render { task, solution } => run_render(&task, solution.as_deref()),
    }
}

fn run_verify(task_path: &str, solution_path: &str) -> Result<()> {
    let desc: Descriptor = fs::read_to_string(task_path)
        .with_context(|| format!("reading task file {task_path}"))?
        .trim()
        .parse()
        .with_context(|| format!("parsing task file {task_path}"))?;
    let solution: Solution = fs::read_to_string(solution_path)
        .with_context(|| format!("reading solution file {solution_path}"))?
        .trim()
        .parse()
        .with_context(|| format!("parsing solution file {solution_path}"))?;

    let mut map = Map::new(&desc);
    log::info!("loaded task {task_path} ({}x{}, {} cells to wrap)", map.width(), map.height(), map.remaining());

    match verify(&mut map, &solution) {
        VerifyOutcome::Success { rounds } => {
            println!("SUCCESS in {rounds} steps");
            Ok(())
        }
        VerifyOutcome::Failure { failure, remaining } => {
            println!("FAILURE at round {}: {failure}, {remaining} cells remaining", failure.round());
            std::process::exit(1);
        }
    }
}

fn run_render(task_path: &str, solution_path: Option<&str>) -> Result<()> {
    let desc: Descriptor = fs::read_to_string(task_path)
        .with_context(|| format!("reading task file {task_path}"))?
        .trim()
        .parse()
        .with_context(|| format!("parsing task file {task_path}"))?;
    let mut map = Map::new(&desc);

    if let Some(solution_path) = solution_path {
        let solution: Solution = fs::read_to_string(solution_path)
            .with_context(|| format!("reading solution file {solution_path}"))?
            .trim()
            .parse()
            .with_context(|| format!("parsing solution file {solution_path}"))?;
        let outcome = verify(&mut map, &solution);
        log::info!("replayed solution: {outcome:?}");
    }

    println!("{map}");
    Ok(())
}
