mod extract;
mod launch;
mod media;
mod prompt;
mod resolver;
mod session;


use anyhow::{Context, Result};
use log::debug;

use crate::cli::Cli;
use crate::config::Config;

use self::launch::{Downloader, LaunchError, MpvPlayer, PlayerOptions, require_binaries};
use self::media::SearchQuery;
use self::prompt::{LineInput, OnEmpty, Terminal, obtain_query, query_prompt};
use self::resolver::{PageResolver, Resolve, ResolveError};
use self::session::Session;

pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let options = PlayerOptions {
        audio_only: !cli.video_mode,
    };
    let resolver = PageResolver::from_config(config).context("invalid id marker pattern")?;
    let mut terminal = Terminal;

    if cli.url_mode {
        return run_url(&cli, options, &resolver, &mut terminal);
    }
    if cli.download_mode {
        return run_download(&cli, config, options, &resolver, &mut terminal);
    }
    run_play(&cli, config, options, &resolver, &mut terminal)
}

fn run_url<R: Resolve, I: LineInput>(
    cli: &Cli,
    options: PlayerOptions,
    resolver: &R,
    input: &mut I,
) -> Result<()> {
    let Some(query) = startup_query(cli, options, input)? else {
        return Ok(());
    };
    let url = resolver.resolve(&query, cli.rank)?;
    println!("{url}");
    Ok(())
}

fn run_download<R: Resolve, I: LineInput>(
    cli: &Cli,
    config: &Config,
    options: PlayerOptions,
    resolver: &R,
    input: &mut I,
) -> Result<()> {
    let downloader = Downloader::from_config(config);
    require_binaries(&downloader.required_binaries())?;

    let Some(query) = startup_query(cli, options, input)? else {
        return Ok(());
    };
    let url = resolver.resolve(&query, cli.rank)?;
    debug!(
        "downloading {url} to {}",
        downloader.output_template().display()
    );
    downloader.download(&url, options)
}

fn run_play<R: Resolve, I: LineInput>(
    cli: &Cli,
    config: &Config,
    options: PlayerOptions,
    resolver: &R,
    input: &mut I,
) -> Result<()> {
    require_binaries(&[config.media_player.as_str()])?;

    if let Some(query) = startup_query(cli, options, input)? {
        let mut player = MpvPlayer::from_config(config);
        Session::new(resolver, &mut player, input).run(query, options, cli.rank)?;
    }
    println!("\nQuitting...");
    Ok(())
}

/// Query words from the command line, or asked for until something is typed.
fn startup_query<I: LineInput + ?Sized>(
    cli: &Cli,
    options: PlayerOptions,
    input: &mut I,
) -> Result<Option<SearchQuery>> {
    if let Some(query) = SearchQuery::from_words(&cli.query) {
        return Ok(Some(query));
    }
    obtain_query(input, query_prompt(options.audio_only), OnEmpty::Retry)
        .context("failed to read search query")
}

/// User-facing message and process exit code for a failed run.
pub fn failure_report(err: &anyhow::Error) -> (String, u8) {
    if let Some(resolve_err) = err.downcast_ref::<ResolveError>() {
        return match resolve_err {
            ResolveError::NoResults { .. } => ("No results found.".to_string(), 0),
            ResolveError::Network { .. } => ("No internet connection.".to_string(), 1),
        };
    }
    if let Some(launch_err) = err.downcast_ref::<LaunchError>() {
        return (launch_err.to_string(), 1);
    }
    (format!("Error: {err:#}"), 1)
}
