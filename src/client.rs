// Star client - the single network operation this tool performs
//
// Issues POST /texts/{id}/star against the texts site with the anti-forgery
// token attached as X-CSRF-TOKEN. Only the response status is inspected; the
// body is never read. There is no retry and no caching: one click, one call.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Serialize;

/// Header carrying the anti-forgery token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Outcome of a star request that reached the server (or failed to).
///
/// Transport-level failures (connection refused, timeout) surface as `Err`
/// from [`StarClient::star`]; this enum covers everything that produced an
/// HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StarOutcome {
    /// Any 2xx status: the text is starred and the icon may transition.
    Starred,
    /// Non-2xx status: the icon must stay in its prior state.
    Rejected {
        #[serde(serialize_with = "serialize_status")]
        status: StatusCode,
    },
}

fn serialize_status<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl StarOutcome {
    pub fn is_starred(&self) -> bool {
        matches!(self, StarOutcome::Starred)
    }
}

/// HTTP client for the star endpoint.
///
/// Holds the base URL and CSRF token once at construction, so the request
/// path carries no ambient lookups (the token stands in for the page's
/// `csrf-token` meta element, which this tool has no access to).
#[derive(Debug, Clone)]
pub struct StarClient {
    client: reqwest::Client,
    base_url: String,
    csrf_token: String,
}

impl StarClient {
    /// Build a client for the given site.
    ///
    /// Uses a request timeout and HTTP/1.1 only; the texts site sits behind
    /// the same kind of plain reverse proxies that reset HTTP/2 connections.
    pub fn new(base_url: impl Into<String>, csrf_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .http1_only()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: csrf_token.into(),
        })
    }

    /// Star a text: exactly one POST to `/texts/{text_id}/star`.
    ///
    /// Returns the explicit outcome so callers decide what (if anything) to
    /// do with failures; the response body is never inspected.
    pub async fn star(&self, text_id: &str) -> Result<StarOutcome> {
        // The element's resource identifier attribute must be non-empty;
        // an empty id would address the collection route instead.
        anyhow::ensure!(!text_id.is_empty(), "text id is empty");

        let url = format!("{}/texts/{}/star", self.base_url, text_id);
        tracing::debug!("Starring text {} ({})", text_id, url);

        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .send()
            .await
            .with_context(|| format!("star request to {} failed", url))?;

        let status = response.status();
        if status.is_success() {
            Ok(StarOutcome::Starred)
        } else {
            Ok(StarOutcome::Rejected { status })
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = StarClient::new("http://localhost:3000/", "tok").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_empty_text_id_is_rejected_before_sending() {
        // No server is running on this port; an attempted request would
        // error differently than the precondition failure we expect.
        let client = StarClient::new("http://127.0.0.1:1", "tok").unwrap();
        let err = client.star("").await.unwrap_err();
        assert!(err.to_string().contains("text id is empty"));
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(StarOutcome::Starred).unwrap();
        assert_eq!(json["outcome"], "starred");

        let json = serde_json::to_value(StarOutcome::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        })
        .unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["status"], 500);
    }
}
