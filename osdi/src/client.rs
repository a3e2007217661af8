use crate::config::{FetchLimits, Source};
use crate::error::UpstreamError;
use crate::resources::Person;
use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;

const TOKEN_HEADER: &str = "OSDI-API-Token";

/// Authenticated client for the upstream OSDI API.
///
/// Every request carries the API token header and an explicit deadline. A
/// request issued without a configured token fails before it reaches the
/// network.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &Url,
        token: Option<String>,
        limits: &FetchLimits,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(limits.request_timeout_secs))
            .build()?;

        Ok(ApiClient {
            http,
            base: base_url.as_str().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// First-page listing URL for a source.
    pub fn listing_url(&self, source: &Source) -> Result<Url, UpstreamError> {
        let base = &self.base;
        let full_url = match source {
            Source::Tag { tag_id } => format!("{base}/tags/{tag_id}/people"),
            Source::Petition { petition_id } => {
                format!("{base}/petitions/{petition_id}/signatures")
            }
            Source::Form { form_id } => format!("{base}/forms/{form_id}/submissions/"),
        };

        Url::parse(&full_url).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))
    }

    /// Fetch a person sub-resource by the absolute locator embedded in a
    /// submission's links.
    pub async fn get_person(&self, href: &str) -> Result<Person, UpstreamError> {
        let url = Url::parse(href).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
        self.get_json(url).await
    }

    /// Authenticated GET returning the parsed JSON body. A non-2xx status
    /// is an error carrying the status and body; a malformed body parses
    /// as a transport error.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        let token = self.token.as_deref().ok_or(UpstreamError::MissingToken)?;

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}
