//! The `web_search` tool: definition, argument parsing, and text rendering.

// crates.io
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	search::{SearchBackend, format_results},
};
#[cfg(feature = "reqwest")]
use crate::{error::SearchError, http::SearxngHttpClient, search::SearchConfig};

/// Name under which the tool is advertised.
pub const WEB_SEARCH_TOOL: &str = "web_search";

const DESCRIPTION: &str = "Search the web using SearXNG. Returns titles, URLs, and snippets.";
const DEFAULT_COUNT: i64 = 5;
const MAX_COUNT: i64 = 10;

/// Tool metadata advertised to tool-calling clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
	/// Tool name.
	pub name: String,
	/// Human-readable description.
	pub description: String,
	/// JSON Schema for the arguments object.
	#[serde(rename = "inputSchema")]
	pub input_schema: Value,
}

/// A single text block returned by a tool call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextContent {
	/// Rendered text.
	pub text: String,
}
impl TextContent {
	/// Wraps `text`.
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into() }
	}
}

/// Web search tool over any [`SearchBackend`].
#[derive(Clone)]
pub struct WebSearchTool {
	backend: Arc<dyn SearchBackend>,
}
impl WebSearchTool {
	/// Wraps `backend`.
	pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
		Self { backend }
	}

	/// Builds the tool over a reqwest-backed SearXNG client.
	#[cfg(feature = "reqwest")]
	pub fn searxng(config: &SearchConfig) -> Result<Self, SearchError> {
		Ok(Self::new(Arc::new(SearxngHttpClient::new(config)?)))
	}

	/// Tool metadata, including the argument schema.
	pub fn definition() -> ToolDefinition {
		ToolDefinition {
			name: WEB_SEARCH_TOOL.into(),
			description: DESCRIPTION.into(),
			input_schema: json!({
				"type": "object",
				"properties": {
					"query": {
						"type": "string",
						"description": "Search query"
					},
					"count": {
						"type": "integer",
						"description": "Number of results (1-10)",
						"minimum": 1,
						"maximum": MAX_COUNT,
						"default": DEFAULT_COUNT
					}
				},
				"required": ["query"]
			}),
		}
	}

	/// Every tool this adapter serves.
	pub fn list_tools(&self) -> Vec<ToolDefinition> {
		vec![Self::definition()]
	}

	/// Runs the named tool. Failures are rendered as text rather than returned.
	pub async fn call(&self, name: &str, arguments: &Value) -> Vec<TextContent> {
		if name != WEB_SEARCH_TOOL {
			return vec![TextContent::new(format!("Unknown tool: {name}"))];
		}

		let query = arguments.get("query").and_then(Value::as_str).unwrap_or_default();
		let count = parse_count(arguments.get("count"));

		if query.is_empty() {
			return vec![TextContent::new("Error: query is required")];
		}

		let span = OperationSpan::new(OperationKind::WebSearch, "call");
		let text = span.instrument(self.search(query, count)).await;

		vec![TextContent::new(text)]
	}

	async fn search(&self, query: &str, count: usize) -> String {
		obs::record_outcome(OperationKind::WebSearch, OperationOutcome::Attempt);

		let result = self.backend.search(query).await;

		obs::record_result(OperationKind::WebSearch, &result);

		match result {
			Ok(response) if response.results.is_empty() => format!("No results for: {query}"),
			Ok(response) => format_results(query, &response.results, count),
			Err(e) => {
				obs::trace_debug!(error = %e, "web search failed");

				if e.is_http() { format!("HTTP error: {e}") } else { format!("Error: {e}") }
			},
		}
	}
}
impl Debug for WebSearchTool {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("WebSearchTool").finish_non_exhaustive()
	}
}

fn parse_count(raw: Option<&Value>) -> usize {
	let count = match raw {
		Some(Value::Number(n)) =>
			n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)).unwrap_or(DEFAULT_COUNT),
		Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(DEFAULT_COUNT),
		_ => DEFAULT_COUNT,
	};

	count.clamp(1, MAX_COUNT) as usize
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::{
		error::SearchError,
		search::{SearchFuture, SearchResponse, SearchResult},
	};

	enum Reply {
		Hits(usize),
		Status(u16),
		Garbage,
	}

	struct FakeBackend {
		reply: Reply,
		queries: AtomicUsize,
	}
	impl FakeBackend {
		fn tool(reply: Reply) -> (WebSearchTool, Arc<Self>) {
			let backend = Arc::new(Self { reply, queries: AtomicUsize::new(0) });

			(WebSearchTool::new(backend.clone()), backend)
		}
	}
	impl SearchBackend for FakeBackend {
		fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
			Box::pin(async move {
				self.queries.fetch_add(1, Ordering::SeqCst);

				match self.reply {
					Reply::Hits(n) => Ok(SearchResponse {
						results: (1..=n)
							.map(|i| SearchResult {
								title: Some(format!("{query} #{i}")),
								url: Some(format!("https://example.com/{i}")),
								content: Some("snippet".into()),
							})
							.collect(),
					}),
					Reply::Status(status) => Err(SearchError::Status { status }),
					Reply::Garbage => {
						let mut de = serde_json::Deserializer::from_str("{\"results\":7}");
						let decoded: Result<SearchResponse, _> =
							serde_path_to_error::deserialize(&mut de);

						Err(SearchError::Decode {
							source: decoded.expect_err("Fixture payload must not decode."),
						})
					},
				}
			})
		}
	}

	fn only_text(content: Vec<TextContent>) -> String {
		assert_eq!(content.len(), 1, "Tool calls return exactly one text block.");

		content.into_iter().next().map(|c| c.text).unwrap_or_default()
	}

	#[test]
	fn definition_describes_arguments() {
		let definition = WebSearchTool::definition();
		let value = serde_json::to_value(&definition).expect("Definition should serialize.");

		assert_eq!(value["name"], "web_search");
		assert_eq!(value["inputSchema"]["required"], json!(["query"]));
		assert_eq!(value["inputSchema"]["properties"]["count"]["default"], 5);
		assert_eq!(value["inputSchema"]["properties"]["count"]["maximum"], 10);
	}

	#[test]
	fn text_content_is_tagged() {
		let value = serde_json::to_value(TextContent::new("hi")).expect("Content should encode.");

		assert_eq!(value, json!({ "type": "text", "text": "hi" }));
	}

	#[test]
	fn count_parsing_clamps_and_defaults() {
		assert_eq!(parse_count(None), 5);
		assert_eq!(parse_count(Some(&json!(null))), 5);
		assert_eq!(parse_count(Some(&json!("lots"))), 5);
		assert_eq!(parse_count(Some(&json!("3"))), 3);
		assert_eq!(parse_count(Some(&json!(0))), 1);
		assert_eq!(parse_count(Some(&json!(-4))), 1);
		assert_eq!(parse_count(Some(&json!(99))), 10);
		assert_eq!(parse_count(Some(&json!(2.9))), 2);
	}

	#[tokio::test]
	async fn unknown_tool_is_reported() {
		let (tool, backend) = FakeBackend::tool(Reply::Hits(1));
		let text = only_text(tool.call("fetch", &json!({ "query": "x" })).await);

		assert_eq!(text, "Unknown tool: fetch");
		assert_eq!(backend.queries.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn missing_query_is_rejected_without_searching() {
		let (tool, backend) = FakeBackend::tool(Reply::Hits(1));

		for arguments in [json!({}), json!({ "query": "" }), json!({ "query": 5 })] {
			let text = only_text(tool.call(WEB_SEARCH_TOOL, &arguments).await);

			assert_eq!(text, "Error: query is required");
		}

		assert_eq!(backend.queries.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn results_are_limited_to_count() {
		let (tool, _) = FakeBackend::tool(Reply::Hits(8));
		let arguments = json!({ "query": "rust", "count": 3 });
		let text = only_text(tool.call(WEB_SEARCH_TOOL, &arguments).await);

		assert!(text.starts_with("Results for: rust\n\n1. rust #1\n   https://example.com/1\n"));
		assert!(text.contains("3. rust #3"));
		assert!(!text.contains("4. rust #4"));
	}

	#[tokio::test]
	async fn empty_results_are_reported() {
		let (tool, _) = FakeBackend::tool(Reply::Hits(0));
		let text = only_text(tool.call(WEB_SEARCH_TOOL, &json!({ "query": "nothing" })).await);

		assert_eq!(text, "No results for: nothing");
	}

	#[tokio::test]
	async fn failures_are_rendered_by_layer() {
		let (tool, _) = FakeBackend::tool(Reply::Status(502));
		let text = only_text(tool.call(WEB_SEARCH_TOOL, &json!({ "query": "down" })).await);

		assert_eq!(text, "HTTP error: Search endpoint returned status 502.");

		let (tool, _) = FakeBackend::tool(Reply::Garbage);
		let text = only_text(tool.call(WEB_SEARCH_TOOL, &json!({ "query": "junk" })).await);

		assert!(text.starts_with("Error: Search endpoint returned malformed JSON:"), "{text}");
	}
}
