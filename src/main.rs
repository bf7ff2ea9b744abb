//! `transpilex` binary: parses arguments, installs logging and runs a
//! conversion, mapping failures to process exit codes.
use std::process::ExitCode;

use clap::Parser;

use transpilex::error::exit_code_for;
use transpilex::{cli, commands, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    let result = if args.list_targets {
        commands::list_targets(&log);
        Ok(())
    } else {
        commands::convert::run(&args, &log)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            ExitCode::from(exit_code_for(&err))
        }
    }
}
