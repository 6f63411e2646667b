use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::Cli;

pub const HOST: &str = "www.youtube.com";
pub const MARKER_KEY: &str = "videoId";
pub const MEDIA_PLAYER: &str = "mpv";
pub const DOWNLOADER: &str = "youtube-dl";
pub const CONVERTER: &str = "ffmpeg";

/// Settings fixed for the lifetime of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub search_endpoint: String,
    pub watch_base: String,
    pub marker_key: String,
    pub media_player: String,
    pub downloader: String,
    pub converter: String,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let download_dir = match &cli.download_dir {
            Some(dir) => dir.clone(),
            None => default_download_dir()?,
        };
        Ok(Self::for_host(&format!("https://{HOST}"), download_dir))
    }

    pub fn for_host(base_url: &str, download_dir: PathBuf) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            search_endpoint: format!("{base}/results"),
            watch_base: format!("{base}/watch"),
            marker_key: MARKER_KEY.to_string(),
            media_player: MEDIA_PLAYER.to_string(),
            downloader: DOWNLOADER.to_string(),
            converter: CONVERTER.to_string(),
            download_dir,
        }
    }
}

pub fn default_download_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("unable to resolve home directory")?;
    Ok(home.join("Videos"))
}
