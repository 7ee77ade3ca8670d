//! Serves a canned SearXNG response from a mock server and calls the `web_search` tool against it.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use tokenkeeper::{
	http::SearxngHttpClient,
	reqwest::Client,
	search::{WEB_SEARCH_TOOL, WebSearchTool},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let search_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/search").query_param("format", "json");
			then.status(200).json_body(json!({
				"results": [
					{
						"title": "The Rust Programming Language",
						"url": "https://doc.rust-lang.org/book/",
						"content": "An introductory book about Rust."
					},
					{
						"title": "Rust by Example",
						"url": "https://doc.rust-lang.org/rust-by-example/",
						"content": "A collection of runnable examples."
					}
				]
			}));
		})
		.await;
	// The mock server presents a self-signed certificate.
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()?;
	let endpoint = Url::parse(&server.url("/search"))?;
	let tool = WebSearchTool::new(Arc::new(SearxngHttpClient::with_client(client, endpoint)));

	println!("{}", serde_json::to_string_pretty(&tool.list_tools())?);

	for content in tool.call(WEB_SEARCH_TOOL, &json!({ "query": "rust book", "count": 2 })).await {
		println!("{}", content.text);
	}

	search_mock.assert_async().await;

	Ok(())
}
