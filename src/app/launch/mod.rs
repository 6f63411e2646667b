mod process;

use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};

use anyhow::{Context, Result};
use log::debug;
use thiserror::Error;

use self::process::run_attached;
use super::media::ResolvedUrl;
use crate::config::Config;

pub(crate) const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LaunchError {
    #[error("Dependency {name} not found.\nPlease install it.")]
    MissingDependency { name: String },
}

/// Fails on the first binary that is not on PATH.
pub(crate) fn require_binaries<S: AsRef<str>>(names: &[S]) -> Result<(), LaunchError> {
    for name in names {
        let name = name.as_ref();
        if which::which(name).is_err() {
            return Err(LaunchError::MissingDependency {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlayerOptions {
    pub(crate) audio_only: bool,
}

impl PlayerOptions {
    pub(crate) fn player_args(&self) -> Vec<&'static str> {
        if self.audio_only {
            vec!["--ytdl-format=bestaudio", "--no-video"]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn transcode_args(&self) -> Vec<&'static str> {
        if self.audio_only {
            vec!["-f", "bestaudio", "-x", "--audio-format", "mp3"]
        } else {
            Vec::new()
        }
    }
}

pub(crate) trait Player {
    /// Blocks until playback ends. The player's exit status is not an error.
    fn play(&mut self, url: &ResolvedUrl, options: PlayerOptions) -> Result<()>;
}

#[derive(Debug, Clone)]
pub(crate) struct MpvPlayer {
    program: String,
}

impl MpvPlayer {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            program: config.media_player.clone(),
        }
    }

    fn command(&self, url: &ResolvedUrl, options: PlayerOptions) -> ProcessCommand {
        let mut cmd = ProcessCommand::new(&self.program);
        cmd.args(options.player_args())
            .arg(url.as_str())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl Player for MpvPlayer {
    fn play(&mut self, url: &ResolvedUrl, options: PlayerOptions) -> Result<()> {
        let cmd = self.command(url, options);
        let status = run_attached(cmd)?;
        debug!("{} exited with {status}", self.program);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Downloader {
    program: String,
    converter: String,
    output_dir: PathBuf,
}

impl Downloader {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            program: config.downloader.clone(),
            converter: config.converter.clone(),
            output_dir: config.download_dir.clone(),
        }
    }

    pub(crate) fn required_binaries(&self) -> [&str; 2] {
        [self.program.as_str(), self.converter.as_str()]
    }

    pub(crate) fn output_template(&self) -> PathBuf {
        output_template_in(&self.output_dir)
    }

    fn command(&self, url: &ResolvedUrl, options: PlayerOptions) -> ProcessCommand {
        let mut cmd = ProcessCommand::new(&self.program);
        cmd.arg("-o")
            .arg(self.output_template())
            .args(options.transcode_args())
            .arg(url.as_str())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    pub(crate) fn download(&self, url: &ResolvedUrl, options: PlayerOptions) -> Result<()> {
        let cmd = self.command(url, options);
        let status = run_attached(cmd)
            .with_context(|| format!("download of {url} did not start"))?;
        debug!("{} exited with {status}", self.program);
        Ok(())
    }
}

fn output_template_in(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_TEMPLATE)
}
