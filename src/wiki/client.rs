// src/wiki/client.rs
// =============================================================================
// This module fetches Wikipedia articles through the MediaWiki API.
//
// One request per page:
//   GET https://en.wikipedia.org/w/api.php
//       ?action=parse&page=<title>&prop=text|links|properties
//       &redirects=1&format=json&formatversion=2
//
// From the response we take:
// - text: rendered article HTML (turned into plain text by html.rs)
// - links: titles of linked pages (we keep only real articles, namespace 0)
// - properties: tells us whether the page is a disambiguation page
//
// How failures map to FetchError:
// - API error "missingtitle"/"invalidtitle"  -> NotFound
// - disambiguation page                      -> Ambiguous
// - timeout, connection error, HTTP 4xx/5xx  -> NetworkFailure
// - JSON we can't decode, other API errors   -> ParseFailure
//
// Rust concepts:
// - async/await: The request is a network call
// - serde: Deserializing the JSON response into structs
// - Option<T>: The API sends either "parse" or "error", never both
// =============================================================================

use super::html::extract_article_text;
use super::{FetchError, Page, PageSource};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// English Wikipedia's API endpoint
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const USER_AGENT: &str = concat!(
    "wiki-word-counter/",
    env!("CARGO_PKG_VERSION"),
    " (word frequency crawler)"
);

// Main namespace = encyclopedia articles (not Talk:, File:, Category:, ...)
const ARTICLE_NAMESPACE: i64 = 0;

// Top-level shape of an action=parse response
#[derive(Debug, Deserialize)]
struct ApiResponse {
    parse: Option<ParsedPage>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    #[serde(default)]
    text: String,
    #[serde(default)]
    links: Vec<ApiLink>,
    // An object in formatversion=2, an array of {name, *} in version 1
    #[serde(default)]
    properties: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiLink {
    ns: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

// PageSource backed by a MediaWiki installation
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: Client,
    api_url: Url,
}

impl WikipediaClient {
    /// Creates a client for English Wikipedia
    ///
    /// `timeout` applies to every request (connect + read).
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL, timeout)
    }

    /// Creates a client for any MediaWiki `api.php` endpoint
    pub fn with_api_url(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", api_url, e))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { http, api_url })
    }

    // Builds the request URL for one page
    fn request_url(&self, page_id: &str) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "parse")
            .append_pair("page", page_id)
            .append_pair("prop", "text|links|properties")
            .append_pair("redirects", "1")
            .append_pair("format", "json")
            .append_pair("formatversion", "2");
        url
    }
}

#[async_trait]
impl PageSource for WikipediaClient {
    async fn fetch(&self, page_id: &str) -> Result<Page, FetchError> {
        let response = self
            .http
            .get(self.request_url(page_id))
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::NetworkFailure(format!("HTTP {}", status.as_u16())));
        }

        let body = response.text().await.map_err(categorize_error)?;

        parse_response(page_id, &body)
    }
}

// Turns the raw JSON body into a Page (or the matching FetchError)
fn parse_response(page_id: &str, body: &str) -> Result<Page, FetchError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::ParseFailure(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(match error.code.as_str() {
            "missingtitle" | "invalidtitle" => FetchError::NotFound(page_id.to_string()),
            _ => FetchError::ParseFailure(format!("{}: {}", error.code, error.info)),
        });
    }

    let parsed = response
        .parse
        .ok_or_else(|| FetchError::ParseFailure("response has no 'parse' section".to_string()))?;

    if is_disambiguation(&parsed.properties) {
        return Err(FetchError::Ambiguous(page_id.to_string()));
    }

    // Keep article links only, first occurrence wins
    let mut seen = HashSet::new();
    let links = parsed
        .links
        .into_iter()
        .filter(|link| link.ns == ARTICLE_NAMESPACE)
        .map(|link| link.title)
        .filter(|title| seen.insert(title.clone()))
        .collect();

    Ok(Page {
        content: extract_article_text(&parsed.text),
        links,
    })
}

// Checks the page properties for the "disambiguation" flag
fn is_disambiguation(properties: &serde_json::Value) -> bool {
    match properties {
        serde_json::Value::Object(map) => map.contains_key("disambiguation"),
        serde_json::Value::Array(items) => items
            .iter()
            .any(|item| item.get("name").and_then(|n| n.as_str()) == Some("disambiguation")),
        _ => false,
    }
}

// Maps reqwest errors onto our FetchError
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::NetworkFailure("request timed out".to_string())
    } else if error.is_connect() {
        FetchError::NetworkFailure(format!("connection failed: {}", error))
    } else if error.is_decode() {
        FetchError::ParseFailure(error.to_string())
    } else {
        FetchError::NetworkFailure(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why formatversion=2?
//    - Version 1 wraps strings in odd {"*": "..."} objects
//    - Version 2 gives plain strings and booleans, which map cleanly to serde
//
// 2. What does #[serde(default)] do?
//    - If the field is missing in the JSON, use Default::default() instead
//    - A page with no links simply has no "links" key
//
// 3. Why .map_err(categorize_error)?
//    - send().await returns Result<Response, reqwest::Error>
//    - map_err converts the error type so ? can return a FetchError
//    - Passing the function name works like |e| categorize_error(e)
//
// 4. Why HashSet::insert inside filter?
//    - insert() returns false if the value was already there
//    - So the filter keeps each title only the first time we see it
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const PAGE_JSON: &str = r#"{
        "parse": {
            "title": "Cat",
            "pageid": 6678,
            "text": "<div class=\"mw-parser-output\"><p>The cat is a small animal.</p></div>",
            "links": [
                {"ns": 0, "title": "Mammal", "exists": true},
                {"ns": 14, "title": "Category:Cats", "exists": true},
                {"ns": 0, "title": "Dog", "exists": true},
                {"ns": 0, "title": "Mammal", "exists": true}
            ],
            "properties": {"wikibase_item": "Q146"}
        }
    }"#;

    fn client_for(server: &Server) -> WikipediaClient {
        let api_url = format!("{}/w/api.php", server.url());
        WikipediaClient::with_api_url(&api_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_request_url_has_parse_params() {
        let client = WikipediaClient::new(Duration::from_secs(1)).unwrap();
        let url = client.request_url("New York City");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("action".to_string(), "parse".to_string())));
        assert!(pairs.contains(&("page".to_string(), "New York City".to_string())));
        assert!(pairs.contains(&("redirects".to_string(), "1".to_string())));
        assert_eq!(url.host_str(), Some("en.wikipedia.org"));
    }

    #[test]
    fn test_parse_page() {
        let page = parse_response("Cat", PAGE_JSON).unwrap();
        assert_eq!(page.content, "The cat is a small animal.");
        assert_eq!(page.links, vec!["Mammal", "Dog"]);
    }

    #[test]
    fn test_missing_title_is_not_found() {
        let body = r#"{"error": {"code": "missingtitle", "info": "The page you specified doesn't exist."}}"#;
        assert_eq!(
            parse_response("Nope", body),
            Err(FetchError::NotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_invalid_title_is_not_found() {
        let body = r#"{"error": {"code": "invalidtitle", "info": "Bad title \"[[\"."}}"#;
        assert_eq!(
            parse_response("[[", body),
            Err(FetchError::NotFound("[[".to_string()))
        );
    }

    #[test]
    fn test_other_api_error_is_parse_failure() {
        let body = r#"{"error": {"code": "badvalue", "info": "Unrecognized value"}}"#;
        assert!(matches!(
            parse_response("X", body),
            Err(FetchError::ParseFailure(_))
        ));
    }

    #[test]
    fn test_disambiguation_is_ambiguous() {
        let body = r#"{"parse": {"text": "<p>Mercury may refer to:</p>", "links": [], "properties": {"disambiguation": ""}}}"#;
        assert_eq!(
            parse_response("Mercury", body),
            Err(FetchError::Ambiguous("Mercury".to_string()))
        );
    }

    #[test]
    fn test_disambiguation_in_version_one_format() {
        let properties = serde_json::json!([{"name": "disambiguation", "*": ""}]);
        assert!(is_disambiguation(&properties));
        assert!(!is_disambiguation(&serde_json::json!([])));
    }

    #[test]
    fn test_garbage_body_is_parse_failure() {
        assert!(matches!(
            parse_response("X", "<html>not json</html>"),
            Err(FetchError::ParseFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_from_mock_server() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "parse".into()),
                Matcher::UrlEncoded("page".into(), "Cat".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAGE_JSON)
            .create_async()
            .await;

        let client = client_for(&server);
        let page = client.fetch("Cat").await.unwrap();

        assert_eq!(page.links, vec!["Mammal", "Dog"]);
        assert!(page.content.contains("small animal"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_network_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.fetch("Cat").await,
            Err(FetchError::NetworkFailure("HTTP 503".to_string()))
        );
    }
}
