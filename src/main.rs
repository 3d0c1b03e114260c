//! CLI entry point for the polyomino packing solver

use clap::Parser;
use polypack::io::cli::{Cli, PuzzleRunner};

// The solvable count is the program's answer
#[allow(clippy::print_stdout)]
fn main() -> polypack::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let summary = PuzzleRunner::new(cli).run()?;
    println!("{}", summary.solvable_count());
    Ok(())
}
