use std::fmt;
use std::num::NonZeroUsize;

pub(crate) const MEDIA_ID_LEN: usize = 11;
pub(crate) const QUIT_TOKEN: &str = "q";

/// 1-based position in the de-duplicated result list.
pub(crate) type Rank = NonZeroUsize;

/// Trimmed, whitespace-collapsed, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchQuery(String);

impl SearchQuery {
    pub(crate) fn normalize(raw: &str) -> Option<Self> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(Self(collapsed))
        }
    }

    pub(crate) fn from_words<S: AsRef<str>>(words: &[S]) -> Option<Self> {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::normalize(&joined)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_quit(&self) -> bool {
        self.0 == QUIT_TOKEN
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn is_media_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MediaId(String);

impl MediaId {
    pub(crate) fn parse(token: &str) -> Option<Self> {
        let valid = token.len() == MEDIA_ID_LEN && token.chars().all(is_media_id_char);
        valid.then(|| Self(token.to_string()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical watch URL; only [`WatchUrl::for_id`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedUrl(String);

impl ResolvedUrl {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WatchUrl {
    base: String,
}

impl WatchUrl {
    pub(crate) fn new(watch_base: &str) -> Self {
        Self {
            base: watch_base.to_string(),
        }
    }

    pub(crate) fn for_id(&self, id: &MediaId) -> ResolvedUrl {
        ResolvedUrl(format!("{}?v={}", self.base, id.as_str()))
    }
}
