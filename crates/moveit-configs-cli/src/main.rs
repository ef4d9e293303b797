//! `moveit-configs` entry point.
//!
//! Parses CLI arguments, sets up logging, wires the infra adapters and
//! dispatches to the command handlers.

mod cli;
mod state;
#[cfg(test)]
mod test_support;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(err) = moveit_configs_observe::tracing_setup::init_tracing(cli.verbose, cli.quiet) {
        eprintln!("Warning: could not initialize logging: {err}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "moveit-configs", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli);

    match &cli.command {
        Commands::Dump {
            target,
            no_base_params,
            params,
        } => {
            cli::dump::dump(&state, target, params, !no_base_params, cli.json)?;
        }

        Commands::Inspect { target } => {
            cli::inspect::inspect(&state, target, cli.json)?;
        }

        Commands::Pipelines { target } => {
            cli::inspect::pipelines(&state, target, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
