//! HTTP Client
//!
//! Sends signed form posts, records rate limits and maps failed statuses to errors.

use crate::client::limits::{RateLimitTracker, RateLimits};
use crate::error::{FinstatError, Result};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex")
});
static TAG_OR_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").expect("valid regex")
});

/// HTTP client that tracks the Finstat quota headers
pub struct HttpClient {
    /// Inner reqwest client
    client: Client,

    /// Rate limit tracker
    rate_limiter: Arc<RateLimitTracker>,
}

impl HttpClient {
    /// Create a new HTTP client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(concat!("finstat-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FinstatError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(RateLimitTracker::new()),
        })
    }

    /// Get the rate limiter
    pub fn rate_limiter(&self) -> &Arc<RateLimitTracker> {
        &self.rate_limiter
    }

    /// POST a form and return the response once its status is known to be successful.
    ///
    /// Rate limits are recorded before the status is checked, so failed calls
    /// still update the tracker. `parameter` only feeds the 404 error message.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        parameter: Option<&str>,
    ) -> Result<(Response, RateLimits)> {
        tracing::debug!(url, "sending finstat request");

        let response = self.client.post(url).form(form).send().await?;
        let status = response.status();
        let limits = self.rate_limiter.update_from_response(response.headers());

        tracing::debug!(
            url,
            status = status.as_u16(),
            daily_current = ?limits.daily.current,
            daily_max = ?limits.daily.max,
            "finstat response received"
        );

        if status.is_success() {
            return Ok((response, limits));
        }

        let body = response.text().await.unwrap_or_default();
        let err = status_error(status, url, parameter, error_page_text(&body));
        tracing::warn!(url, status = status.as_u16(), error = %err, "finstat request failed");
        Err(err)
    }

    /// POST a form and read the successful body as text
    pub async fn post_form_text(
        &self,
        url: &str,
        form: &[(&str, &str)],
        parameter: Option<&str>,
    ) -> Result<(String, RateLimits)> {
        let (response, limits) = self.post_form(url, form, parameter).await?;
        let body = response.text().await?;
        Ok((body, limits))
    }
}

/// Map a non-success status to its error kind
pub fn status_error(status: StatusCode, url: &str, parameter: Option<&str>, body: String) -> FinstatError {
    let url = url.to_string();
    match status {
        StatusCode::NOT_FOUND => FinstatError::NotFound {
            url,
            parameter: parameter.filter(|p| !p.is_empty()).map(str::to_string),
            body,
        },
        StatusCode::PAYMENT_REQUIRED => FinstatError::QuotaExceeded { url, body },
        StatusCode::FORBIDDEN => FinstatError::Forbidden { url, body },
        _ => FinstatError::Api {
            status: status.as_u16(),
            url,
            body,
        },
    }
}

/// Visible text of an HTML error page: scripts, styles, comments and tags
/// removed, entities decoded, whitespace collapsed.
pub fn error_page_text(html: &str) -> String {
    let without_code = SCRIPT_OR_STYLE.replace_all(html, " ");
    let without_tags = TAG_OR_COMMENT.replace_all(&without_code, " ");
    let decoded = ENTITY.replace_all(&without_tags, |caps: &Captures<'_>| {
        unescape_with(&caps[0], resolve_html5_entity)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| caps[0].to_string())
    });

    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}
