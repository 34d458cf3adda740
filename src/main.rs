//! CLI entry point for rule resolution and slot discretization

use clap::Parser;
use slotwise::io::cli::{Cli, CommandRunner};

fn main() -> slotwise::Result<()> {
    let cli = Cli::parse();
    let runner = CommandRunner::new(cli);
    runner.run().map(|_| ())
}
