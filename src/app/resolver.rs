use log::debug;
use thiserror::Error;

use super::extract::{MarkerPattern, ResultList};
use super::media::{Rank, ResolvedUrl, SearchQuery, WatchUrl};
use crate::config::Config;
use crate::http::get_text;

pub(crate) const SEARCH_PARAM: &str = "search_query";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ResolveError {
    #[error("no internet connection ({detail})")]
    Network { detail: String },
    #[error("no results found (wanted result {rank}, page had {found})")]
    NoResults { found: usize, rank: usize },
}

/// Turns a query and rank into a watch URL.
pub(crate) trait Resolve {
    fn resolve(&self, query: &SearchQuery, rank: Rank) -> Result<ResolvedUrl, ResolveError>;
}

/// Scrapes the first results page; one request per call, nothing cached.
#[derive(Debug, Clone)]
pub(crate) struct PageResolver {
    search_endpoint: String,
    watch_url: WatchUrl,
    pattern: MarkerPattern,
}

impl PageResolver {
    pub(crate) fn from_config(config: &Config) -> Result<Self, regex::Error> {
        Ok(Self {
            search_endpoint: config.search_endpoint.clone(),
            watch_url: WatchUrl::new(&config.watch_base),
            pattern: MarkerPattern::new(&config.marker_key)?,
        })
    }

    pub(crate) fn fetch_results(&self, query: &SearchQuery) -> Result<ResultList, ResolveError> {
        debug!("searching {} for {query:?}", self.search_endpoint);
        let body = get_text(&self.search_endpoint, &[(SEARCH_PARAM, query.as_str())])
            .map_err(|detail| ResolveError::Network { detail })?;

        let results = ResultList::from_page(&self.pattern, &body);
        if results.is_empty() && !body.is_empty() {
            debug!("results page carried no id markers; the page format may have changed");
        }
        debug!(
            "results page was {} bytes, {} unique ids",
            body.len(),
            results.len()
        );
        Ok(results)
    }
}

impl Resolve for PageResolver {
    fn resolve(&self, query: &SearchQuery, rank: Rank) -> Result<ResolvedUrl, ResolveError> {
        let results = self.fetch_results(query)?;
        let id = results
            .nth(rank.get())
            .ok_or(ResolveError::NoResults {
                found: results.len(),
                rank: rank.get(),
            })?;
        Ok(self.watch_url.for_id(id))
    }
}
