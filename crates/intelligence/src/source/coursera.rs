//! Search the Coursera course catalogue.

use super::{ContentSource, SourceError};
use crate::types::CandidateItem;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Default catalogue API host.
pub const COURSERA_API_BASE: &str = "https://api.coursera.org";
const COURSE_URL_BASE: &str = "https://www.coursera.org/learn";
const SEARCH_PATH: &str = "/api/courses.v1";
const SEARCH_FIELDS: &str = "name,slug,description";
const USER_AGENT: &str = concat!("upskill-intelligence/", env!("CARGO_PKG_VERSION"));

/// Get the catalogue API base URL, allowing override for testing.
fn coursera_api_base() -> String {
    std::env::var("UPSKILL_COURSERA_BASE_URL")
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| COURSERA_API_BASE.to_string())
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    elements: Vec<Value>,
}

/// Course catalogue client.
#[derive(Debug, Clone)]
pub struct CourseraClient {
    client: reqwest::Client,
    base_url: String,
}

impl CourseraClient {
    /// Client for the configured base URL (`UPSKILL_COURSERA_BASE_URL`).
    pub fn from_env(timeout: Duration) -> Result<Self, SourceError> {
        Self::with_base_url(coursera_api_base(), timeout)
    }

    /// Client for an explicit base URL.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ContentSource for CourseraClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, SourceError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(format!("{}{}", self.base_url, SEARCH_PATH))
            .query(&[
                ("q", "search"),
                ("query", query.trim()),
                ("limit", limit.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let search: SearchResponse = response.json().await?;
        let items = decode_elements(search.elements);
        tracing::debug!(
            target: "upskill::source",
            query,
            returned = items.len(),
            "course search completed"
        );
        Ok(items)
    }
}

/// Decode raw catalogue elements, dropping those without a name.
fn decode_elements(elements: Vec<Value>) -> Vec<CandidateItem> {
    let total = elements.len();
    let items: Vec<CandidateItem> = elements
        .into_iter()
        .filter_map(CandidateItem::from_value)
        .collect();
    if items.len() < total {
        tracing::debug!(
            target: "upskill::source",
            dropped = total - items.len(),
            "skipped catalogue elements without a name"
        );
    }
    items
}

/// Public course page for an item, when it carries a slug.
pub fn course_url(item: &CandidateItem) -> Option<String> {
    item.slug()
        .filter(|slug| !slug.is_empty())
        .map(|slug| format!("{COURSE_URL_BASE}/{slug}"))
}


/// Integration tests using wiremock for HTTP mocking.
#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CourseraClient {
        CourseraClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses.v1"))
            .and(query_param("q", "search"))
            .and(query_param("query", "data visualization"))
            .and(query_param("limit", "5"))
            .and(query_param("fields", "name,slug,description"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "elements": [
                    {
                        "id": "abc",
                        "courseType": "v2.ondemand",
                        "name": "Data Visualization with Python",
                        "slug": "python-for-data-visualization",
                        "description": "Intro to charts"
                    },
                    {
                        "id": "def",
                        "name": "Information Visualization"
                    }
                ],
                "paging": {"total": 2}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client(&server)
            .search("data visualization", 5)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Data Visualization with Python");
        assert_eq!(items[0].description.as_deref(), Some("Intro to charts"));
        assert_eq!(items[0].slug(), Some("python-for-data-visualization"));
        assert_eq!(items[0].field_str("courseType"), Some("v2.ondemand"));
        assert!(items[1].description.is_none());
    }

    #[tokio::test]
    async fn test_search_without_elements_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses.v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let items = client(&server).search("welding", 5).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses.v1"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client(&server).search("sql", 5).await.unwrap_err();
        match err {
            SourceError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_invalid_json_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses.v1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client(&server).search("sql", 5).await;
        assert!(matches!(result, Err(SourceError::Http(_))));
    }

    #[tokio::test]
    async fn test_search_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/courses.v1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"elements": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let slow = CourseraClient::with_base_url(server.uri(), Duration::from_millis(50)).unwrap();
        let result = slow.search("sql", 5).await;
        assert!(matches!(
            result,
            Err(SourceError::Http(ref e)) if e.is_timeout()
        ));
    }
}
