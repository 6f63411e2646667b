mod app;
mod cli;
mod config;
mod http;
mod interrupt;
#[cfg(test)]
mod test_server;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, warn};

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("YT_LOG", "warn"))
        .format_timestamp(None)
        .init();
}

fn run(cli: cli::Cli) -> Result<()> {
    let config = config::Config::from_cli(&cli).context("failed to build configuration")?;
    debug!("using {config:?}");
    app::run(cli, &config)
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging();
    if let Err(err) = interrupt::install_quit_handler() {
        warn!("Ctrl-C will not quit cleanly: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("run failed: {err:#}");
            let (message, code) = app::failure_report(&err);
            println!("{message}");
            ExitCode::from(code)
        }
    }
}
