use std::collections::HashSet;
use std::hash::Hash;

use regex::Regex;

use super::media::{MEDIA_ID_LEN, MediaId};

/// Quoted `"<key>":"<id>"` pair the results page embeds in its data blob.
///
/// The host owns this format and changes it without notice; when it does,
/// extraction silently yields nothing.
#[derive(Debug, Clone)]
pub(crate) struct MarkerPattern {
    regex: Regex,
}

impl MarkerPattern {
    pub(crate) fn new(key: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r#""{}":"([A-Za-z0-9_-]{{{MEDIA_ID_LEN}}})""#,
            regex::escape(key)
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    pub(crate) fn media_ids<'a>(&'a self, body: &'a str) -> impl Iterator<Item = MediaId> + 'a {
        self.regex
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .filter_map(|token| MediaId::parse(token.as_str()))
    }
}

/// Drops repeats, keeping each item at the position it first appeared.
pub(crate) fn unique_in_order<T, I>(items: I) -> impl Iterator<Item = T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(move |item| seen.insert(item.clone()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ResultList {
    ids: Vec<MediaId>,
}

impl ResultList {
    pub(crate) fn from_page(pattern: &MarkerPattern, body: &str) -> Self {
        Self {
            ids: unique_in_order(pattern.media_ids(body)).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 1-based lookup.
    pub(crate) fn nth(&self, rank: usize) -> Option<&MediaId> {
        rank.checked_sub(1).and_then(|idx| self.ids.get(idx))
    }

    #[cfg(test)]
    pub(crate) fn ids(&self) -> &[MediaId] {
        &self.ids
    }
}
