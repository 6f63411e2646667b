use std::io::{self, BufRead, Write};

use super::media::SearchQuery;

/// Source of interactive answers.
pub(crate) trait LineInput {
    /// Shows `prompt` and blocks for one line; `None` once input is closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

#[derive(Debug, Default)]
pub(crate) struct Terminal;

impl LineInput for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnEmpty {
    /// Keep asking until something is typed.
    Retry,
    /// An empty line ends the conversation.
    Quit,
}

/// Asks for a search string. `None` means the user wants to quit.
pub(crate) fn obtain_query<I: LineInput + ?Sized>(
    input: &mut I,
    prompt: &str,
    on_empty: OnEmpty,
) -> io::Result<Option<SearchQuery>> {
    loop {
        let Some(line) = input.read_line(prompt)? else {
            return Ok(None);
        };
        match SearchQuery::normalize(&line) {
            Some(query) if query.is_quit() => return Ok(None),
            Some(query) => return Ok(Some(query)),
            None if on_empty == OnEmpty::Quit => return Ok(None),
            None => continue,
        }
    }
}

pub(crate) fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

pub(crate) fn query_prompt(audio_only: bool) -> &'static str {
    if audio_only { "❮🎵❯ " } else { "❮🎬❯ " }
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedInput;
    use super::*;

    #[test]
    fn retry_skips_blank_lines() {
        let mut input = ScriptedInput::new(&["", "   ", "  lofi   beats "]);

        let query = obtain_query(&mut input, "> ", OnEmpty::Retry).expect("io");

        assert_eq!(query.map(|q| q.as_str().to_string()), Some("lofi beats".into()));
        assert_eq!(input.prompts.len(), 3);
    }

    #[test]
    fn quit_policy_stops_on_blank_line() {
        let mut input = ScriptedInput::new(&["", "never read"]);

        let query = obtain_query(&mut input, "> ", OnEmpty::Quit).expect("io");

        assert_eq!(query, None);
        assert_eq!(input.prompts.len(), 1);
    }

    #[test]
    fn quit_token_ends_under_either_policy() {
        for policy in [OnEmpty::Retry, OnEmpty::Quit] {
            let mut input = ScriptedInput::new(&[" q "]);
            assert_eq!(obtain_query(&mut input, "> ", policy).expect("io"), None);
        }
    }

    #[test]
    fn closed_input_ends_retry_loop() {
        let mut input = ScriptedInput::new(&["", ""]);

        let query = obtain_query(&mut input, "> ", OnEmpty::Retry).expect("io");

        assert_eq!(query, None);
        assert_eq!(input.prompts.len(), 3);
    }

    #[test]
    fn only_y_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" Y "));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
    }

    #[test]
    fn affirmative_answer_ignores_surrounding_whitespace() {
        assert!(is_affirmative("  y  \n"));
        assert!(is_affirmative("\ty"));
        assert!(!is_affirmative(" y y "));
    }

    #[test]
    fn prompt_glyph_follows_mode() {
        assert_eq!(query_prompt(true), "❮🎵❯ ");
        assert_eq!(query_prompt(false), "❮🎬❯ ");
    }
}
