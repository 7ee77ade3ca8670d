//! reqwest-backed [`SearchBackend`] for SearXNG's JSON API.

// self
use crate::{
	_prelude::*,
	error::SearchError,
	search::{SearchBackend, SearchConfig, SearchFuture, SearchResponse},
};

/// Issues one `GET <endpoint>?q=<query>&format=json` per search.
///
/// Redirects follow reqwest's defaults. The per-request timeout comes from [`SearchConfig`] when
/// the client is built with [`new`](Self::new); [`with_client`](Self::with_client) trusts the
/// supplied client's own settings.
#[derive(Clone, Debug)]
pub struct SearxngHttpClient {
	client: ReqwestClient,
	endpoint: Url,
}
impl SearxngHttpClient {
	/// Builds a client honoring the configured timeout.
	pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.build()
			.map_err(SearchError::http_client_build)?;

		Ok(Self::with_client(client, config.endpoint.clone()))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient, endpoint: Url) -> Self {
		Self { client, endpoint }
	}

	/// Endpoint queried by this client.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	fn request_url(&self, query: &str) -> Url {
		let mut url = self.endpoint.clone();

		url.query_pairs_mut().append_pair("q", query).append_pair("format", "json");

		url
	}

	async fn fetch(&self, query: &str) -> Result<SearchResponse, SearchError> {
		let response = self.client.get(self.request_url(query)).send().await?.error_for_status()?;
		let bytes = response.bytes().await?;
		let mut de = serde_json::Deserializer::from_slice(&bytes);
		let decoded: SearchResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| SearchError::Decode { source })?;

		Ok(decoded)
	}
}
impl SearchBackend for SearxngHttpClient {
	fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
		Box::pin(self.fetch(query))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::_preludet::test_searxng_client;

	fn client(endpoint: &str) -> SearxngHttpClient {
		let endpoint = Url::parse(endpoint).expect("Fixture endpoint should parse.");
		let config = SearchConfig::new(endpoint);

		SearxngHttpClient::new(&config).expect("Client should build.")
	}

	#[test]
	fn request_url_appends_query_and_format() {
		let client = client("http://127.0.0.1:8888/search");
		let url = client.request_url("rust & tokio");

		assert_eq!(url.as_str(), "http://127.0.0.1:8888/search?q=rust+%26+tokio&format=json");
		assert_eq!(client.endpoint().query(), None);
	}

	#[test]
	fn request_url_keeps_existing_parameters() {
		let url = client("http://searx.local/search?language=en").request_url("q");

		assert_eq!(url.as_str(), "http://searx.local/search?language=en&q=q&format=json");
	}

	#[tokio::test]
	async fn unreachable_endpoint_is_a_transport_error() {
		let error = client("http://127.0.0.1:9/search")
			.search("anything")
			.await
			.expect_err("Closed port must fail.");

		assert!(matches!(error, SearchError::Transport { .. }), "{error:?}");
		assert!(error.is_http());
	}

	#[tokio::test]
	async fn decodes_results_from_mock_instance() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET)
					.path("/search")
					.query_param("q", "ferris")
					.query_param("format", "json");
				then.status(200)
					.body(r#"{"results":[{"title":"Ferris","url":"https://rustacean.net"}]}"#);
			})
			.await;
		let endpoint = Url::parse(&server.url("/search")).expect("Mock endpoint should parse.");
		let response = test_searxng_client(endpoint)
			.search("ferris")
			.await
			.expect("Mock response should decode.");

		mock.assert_async().await;

		assert_eq!(response.results.len(), 1);
		assert_eq!(response.results[0].title.as_deref(), Some("Ferris"));
		assert_eq!(response.results[0].content, None);
	}

	#[tokio::test]
	async fn maps_status_and_decode_failures() {
		let server = MockServer::start_async().await;
		let unavailable = server
			.mock_async(|when, then| {
				when.method(GET).path("/down");
				then.status(503);
			})
			.await;
		let garbage = server
			.mock_async(|when, then| {
				when.method(GET).path("/html");
				then.status(200).body("<html>captcha</html>");
			})
			.await;
		let url = |path: &str| Url::parse(&server.url(path)).expect("Mock endpoint should parse.");
		let status = test_searxng_client(url("/down"))
			.search("x")
			.await
			.expect_err("503 must be reported.");
		let decode = test_searxng_client(url("/html"))
			.search("x")
			.await
			.expect_err("HTML must not decode.");

		unavailable.assert_async().await;
		garbage.assert_async().await;

		assert!(matches!(status, SearchError::Status { status: 503 }), "{status:?}");
		assert!(matches!(decode, SearchError::Decode { .. }), "{decode:?}");
		assert!(!decode.is_http());
	}
}
