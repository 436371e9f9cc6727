//! kintone-gen - regenerate the kintone PHP client
//!
//! Finds the newest vendored OpenAPI spec under `rest-api-spec/kintone/`,
//! runs openapi-generator on it and leaves the client sources in `src/`.

use clap::Parser;
use console::style;
use kintone_gen_core::Orchestrator;
use std::process::ExitCode;

mod args;
mod logging;
mod progress;

use args::Args;
use progress::ConsoleProgress;

fn main() -> ExitCode {
    logging::init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version also arrive here; they are not failures
            let printed = err.print();
            if printed.is_ok() && !err.use_stderr() {
                return ExitCode::SUCCESS;
            }
            return ExitCode::FAILURE;
        }
    };
    let paths = args.paths();
    tracing::debug!(?paths, "Resolved generator paths.");

    let mut orchestrator = Orchestrator::new(paths, ConsoleProgress);
    match orchestrator.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", style("❌ Error:").for_stderr().red().bold());
            ExitCode::FAILURE
        }
    }
}
