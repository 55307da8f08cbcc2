//! `applyconfig` command-line entry point.
use anyhow::Result;
use clap::Parser;

use applyconfig::cli::{Cli, Command};
use applyconfig::commands;
use applyconfig::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.command {
        Command::Apply(opts) => {
            logging::init_subscriber(args.verbose, "apply");
            let log = Logger::new("apply");
            commands::apply::run(&opts, &log)
        }
        Command::Completions(opts) => {
            commands::completions::run(opts.shell);
            Ok(())
        }
        Command::Version => Ok(commands::version::run()?),
    }
}
