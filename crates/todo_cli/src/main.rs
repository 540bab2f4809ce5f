//! Terminal front end for the task list.
//!
//! # Responsibility
//! - Parse arguments, start logging and open storage.
//! - Feed typed commands to the core controller and print its render output.

mod cli;
mod shell;
mod text_renderer;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::run(args)
}
