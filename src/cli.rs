use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "yt",
    version,
    about = "Play YouTube media without API",
    after_help = "List of mpv hotkeys: https://defkey.com/mpv-media-player-shortcuts"
)]
pub struct Cli {
    /// Media to play
    #[arg(value_name = "SEARCH_STRING")]
    pub query: Vec<String>,

    /// Display URL instead of playing
    #[arg(short = 'u', long = "url")]
    pub url_mode: bool,

    /// Play video instead of music
    #[arg(short = 'v', long = "video")]
    pub video_mode: bool,

    /// Download media instead of playing
    #[arg(short = 'd', long = "download")]
    pub download_mode: bool,

    /// Nth result to play or download
    #[arg(
        short = 'n',
        long = "num",
        value_name = "NUM",
        env = "YT_NUM",
        default_value = "1"
    )]
    pub rank: NonZeroUsize,

    /// Folder to save downloaded media
    #[arg(short = 'o', long = "output", value_name = "DIR", env = "YT_DLOAD_DIR")]
    pub download_dir: Option<PathBuf>,
}
