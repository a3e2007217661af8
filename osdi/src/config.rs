use serde::Deserialize;
use url::Url;

pub const TOKEN_ENV_VAR: &str = "ACTION_NETWORK_API_KEY";

fn default_base_url() -> Url {
    Url::parse("https://actionnetwork.org/api/v2/").expect("default base URL is well-formed")
}

/// A supporter listing to aggregate, identified by the upstream resource
/// that backs it.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
#[serde(tag = "type")]
pub enum Source {
    Tag { tag_id: String },
    Petition { petition_id: String },
    Form { form_id: String },
}

impl Source {
    /// Cache key for this source's roster. Kind-prefixed so two source
    /// kinds sharing an identifier never collide.
    pub fn cache_key(&self) -> String {
        match self {
            Source::Tag { tag_id } => format!("tag:{tag_id}"),
            Source::Petition { petition_id } => format!("petition:{petition_id}"),
            Source::Form { form_id } => format!("form:{form_id}"),
        }
    }
}

/// The advocacy-platform API to fetch from.
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct Upstream {
    /// API root, e.g. `https://actionnetwork.org/api/v2/`.
    ///
    /// Note: Uses the `url::Url` type for compile-time URL validation.
    /// Invalid URLs will be rejected during config deserialization.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Value for the OSDI-API-Token header. Falls back to the
    /// ACTION_NETWORK_API_KEY environment variable when absent.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Upstream {
    pub fn resolved_token(&self) -> Option<String> {
        self.api_token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> usize {
    100
}

fn default_lookup_concurrency() -> usize {
    4
}

/// Bounds on upstream traffic. A misbehaving server that always returns a
/// next-page link is cut off at `max_pages`; every request carries a
/// deadline of `request_timeout_secs`.
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct FetchLimits {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Concurrent person lookups per aggregation. 1 means strictly
    /// sequential lookups.
    #[serde(default = "default_lookup_concurrency")]
    pub lookup_concurrency: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        FetchLimits {
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
            lookup_concurrency: default_lookup_concurrency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_deserializes_by_tag() {
        let source: Source = serde_json::from_value(serde_json::json!({
            "type": "form",
            "form_id": "3b5f9f80"
        }))
        .unwrap();
        assert_eq!(
            source,
            Source::Form {
                form_id: "3b5f9f80".into()
            }
        );
        assert_eq!(source.cache_key(), "form:3b5f9f80");

        let source: Source = serde_json::from_value(serde_json::json!({
            "type": "tag",
            "tag_id": "2335682"
        }))
        .unwrap();
        assert_eq!(source.cache_key(), "tag:2335682");
    }

    #[test]
    fn test_upstream_defaults() {
        let upstream: Upstream = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(upstream.base_url.as_str(), "https://actionnetwork.org/api/v2/");
        assert_eq!(upstream.api_token, None);
    }

    #[test]
    fn test_fetch_limit_defaults() {
        let limits = FetchLimits::default();
        assert_eq!(limits.request_timeout_secs, 30);
        assert_eq!(limits.max_pages, 100);
        assert_eq!(limits.lookup_concurrency, 4);
    }
}
