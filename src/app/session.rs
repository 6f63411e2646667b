use anyhow::{Context, Result};
use log::debug;

use super::launch::{Player, PlayerOptions};
use super::media::{Rank, ResolvedUrl, SearchQuery};
use super::prompt::{LineInput, OnEmpty, is_affirmative, obtain_query};
use super::resolver::Resolve;

pub(crate) const PLAY_AGAIN_PROMPT: &str = "Play again? (y/n): ";
pub(crate) const PLAY_NEXT_PROMPT: &str = "Play next (q/Enter to quit): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionState {
    pub(crate) query: SearchQuery,
    pub(crate) options: PlayerOptions,
    pub(crate) rank: Rank,
    /// Last played URL, kept only across a "play again" answer.
    pub(crate) cached_url: Option<ResolvedUrl>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SessionSummary {
    pub(crate) plays: usize,
    pub(crate) resolves: usize,
}

#[derive(Debug)]
enum Step {
    Resolving,
    Playing(ResolvedUrl),
    PromptRepeat(ResolvedUrl),
    PromptNext,
    Quit,
}

pub(crate) struct Session<'a, R, P, I>
where
    R: Resolve + ?Sized,
    P: Player + ?Sized,
    I: LineInput + ?Sized,
{
    resolver: &'a R,
    player: &'a mut P,
    input: &'a mut I,
}

impl<'a, R, P, I> Session<'a, R, P, I>
where
    R: Resolve + ?Sized,
    P: Player + ?Sized,
    I: LineInput + ?Sized,
{
    pub(crate) fn new(resolver: &'a R, player: &'a mut P, input: &'a mut I) -> Self {
        Self {
            resolver,
            player,
            input,
        }
    }

    /// Plays `query`, then keeps asking to replay or search again until the
    /// user quits. Resolver failures end the session with that error.
    pub(crate) fn run(
        &mut self,
        query: SearchQuery,
        options: PlayerOptions,
        rank: Rank,
    ) -> Result<SessionSummary> {
        let mut state = SessionState {
            query,
            options,
            rank,
            cached_url: None,
        };
        let mut summary = SessionSummary::default();
        let mut step = if state.query.is_quit() {
            Step::Quit
        } else {
            Step::Resolving
        };

        loop {
            step = match step {
                Step::Resolving => match state.cached_url.take() {
                    Some(url) => {
                        debug!("replaying {url} without a new search");
                        Step::Playing(url)
                    }
                    None => {
                        summary.resolves += 1;
                        let url = self.resolver.resolve(&state.query, state.rank)?;
                        Step::Playing(url)
                    }
                },
                Step::Playing(url) => {
                    self.player.play(&url, state.options)?;
                    summary.plays += 1;
                    Step::PromptRepeat(url)
                }
                Step::PromptRepeat(url) => {
                    let answer = self
                        .input
                        .read_line(PLAY_AGAIN_PROMPT)
                        .context("failed to read answer")?;
                    if answer.as_deref().is_some_and(is_affirmative) {
                        state.cached_url = Some(url);
                        Step::Resolving
                    } else {
                        Step::PromptNext
                    }
                }
                Step::PromptNext => {
                    match obtain_query(&mut *self.input, PLAY_NEXT_PROMPT, OnEmpty::Quit)
                        .context("failed to read next query")?
                    {
                        Some(next) => {
                            state.query = next;
                            Step::Resolving
                        }
                        None => Step::Quit,
                    }
                }
                Step::Quit => {
                    debug!(
                        "session over after {} plays and {} searches",
                        summary.plays, summary.resolves
                    );
                    return Ok(summary);
                }
            };
        }
    }
}
