//! SearXNG-backed web search exposed as a single `web_search` tool.
//!
//! Each call issues one GET with no retries and no re-ranking. Results are rendered into a
//! plain-text block that tool-calling clients can paste straight into a model context.

pub mod tool;

pub use tool::*;

// std
use std::{env, time::Duration as StdDuration};
// self
use crate::{_prelude::*, error::SearchError};

/// Environment variable overriding the search endpoint.
pub const SEARXNG_URL_ENV: &str = "SEARXNG_URL";
/// Endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8888/search";
/// Per-request timeout applied by the HTTP backend.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(15);

/// Boxed future returned by [`SearchBackend::search`].
pub type SearchFuture<'a> =
	Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + 'a + Send>>;

/// Anything that can answer a SearXNG-style JSON query.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	/// Runs `query` and returns the decoded response.
	fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a>;
}

/// Connection settings for the SearXNG endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
	/// Full URL of the `/search` endpoint.
	pub endpoint: Url,
	/// Per-request timeout.
	pub timeout: StdDuration,
}
impl SearchConfig {
	/// Uses `endpoint` with the default timeout.
	pub fn new(endpoint: Url) -> Self {
		Self { endpoint, timeout: DEFAULT_TIMEOUT }
	}

	/// Reads `SEARXNG_URL`, falling back to [`DEFAULT_ENDPOINT`].
	pub fn from_env() -> Result<Self> {
		Self::resolve(env::var(SEARXNG_URL_ENV).ok())
	}

	fn resolve(raw: Option<String>) -> Result<Self> {
		let raw = raw.filter(|v| !v.trim().is_empty());
		let raw = raw.as_deref().unwrap_or(DEFAULT_ENDPOINT).trim();
		let endpoint = Url::parse(raw).map_err(SearchError::from)?;

		Ok(Self::new(endpoint))
	}

	/// Overrides the per-request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}
}

/// Decoded SearXNG JSON response; only `results` matters here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	/// Ranked results as returned by the engine.
	#[serde(default)]
	pub results: Vec<SearchResult>,
}

/// One SearXNG hit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	/// Page title.
	#[serde(default)]
	pub title: Option<String>,
	/// Page URL.
	#[serde(default)]
	pub url: Option<String>,
	/// Snippet text.
	#[serde(default)]
	pub content: Option<String>,
}

/// Renders up to `count` results as the plain-text block returned by the tool.
pub fn format_results(query: &str, results: &[SearchResult], count: usize) -> String {
	const SNIPPET_CHARS: usize = 200;

	let mut lines = vec![format!("Results for: {query}\n")];

	for (idx, item) in results.iter().take(count).enumerate() {
		lines.push(format!("{}. {}", idx + 1, item.title.as_deref().unwrap_or("No title")));
		lines.push(format!("   {}", item.url.as_deref().unwrap_or_default()));

		if let Some(snippet) = item.content.as_deref().filter(|s| !s.is_empty()) {
			lines.push(format!("   {}", snippet.chars().take(SNIPPET_CHARS).collect::<String>()));
		}

		lines.push(String::new());
	}

	lines.join("\n")
}
