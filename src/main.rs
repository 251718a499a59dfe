//! `rbtree` - an interactive shell over an arena-backed red-black tree.
//!
//! Usage:
//!   rbtree [--input <PATH>] [--log-level <LEVEL>] [--quiet]

mod cli;
mod input;
mod shell;

use std::io::{self, Write};

use anyhow::Context;
use arena_rbtree::RbTree;
use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::cli::Cli;
use crate::shell::Shell;

fn initialize_logging(cli: &Cli) -> anyhow::Result<()> {
    TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to install the logger")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;

    let mut tree = RbTree::new();
    let mut stdout = io::stdout().lock();

    if let Some(path) = &cli.input {
        if let Err(error) = input::seed_from_file(&mut tree, path) {
            log::warn!("cannot read {}: {error}", path.display());
            writeln!(stdout, "Cannot read {}, continuing without file input", path.display())?;
        }
    }

    let mut shell = Shell::new(tree, io::stdin().lock(), stdout).with_prompt(!cli.quiet);
    shell.run().context("shell I/O failed")?;

    let tree = shell.into_tree();
    log::info!("session ended with {} keys, height {}", tree.len(), tree.height());
    Ok(())
}
