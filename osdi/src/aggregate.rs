use crate::client::ApiClient;
use crate::config::{FetchLimits, Source};
use crate::error::UpstreamError;
use crate::metrics_defs::{AGGREGATE_DURATION, LISTING_PAGES, PERSON_LOOKUP_FAILURES};
use crate::resources::{Person, RosterPage, Submission, SubmissionPage};
use crate::{counter, histogram};
use futures::stream::{self, StreamExt};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// An aggregated supporter list. `count` always equals `names.len()`;
/// construct through [`Roster::from_names`] to keep it that way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub count: usize,
    pub names: Vec<String>,
}

impl Roster {
    pub fn from_names(names: Vec<String>) -> Self {
        Roster {
            count: names.len(),
            names,
        }
    }
}

/// Builds a [`Roster`] for a configured source.
///
/// Form sources walk the paginated submission listing and resolve each
/// submission's person sub-resource; tag and petition sources read the
/// person records embedded in a single listing page. A failed listing
/// fetch is fatal, a failed person lookup only drops that submission.
#[derive(Clone)]
pub struct SupporterAggregator {
    client: ApiClient,
    max_pages: usize,
    lookup_concurrency: usize,
}

impl SupporterAggregator {
    pub fn new(client: ApiClient, limits: &FetchLimits) -> Self {
        SupporterAggregator {
            client,
            max_pages: limits.max_pages,
            lookup_concurrency: limits.lookup_concurrency,
        }
    }

    pub async fn aggregate(&self, source: &Source) -> Result<Roster, UpstreamError> {
        let started = Instant::now();

        let roster = match source {
            Source::Form { .. } => {
                let submissions = self.collect_submissions(source).await?;
                let names = self.resolve_names(&submissions).await;
                Roster::from_names(names)
            }
            Source::Tag { .. } | Source::Petition { .. } => {
                let url = self.client.listing_url(source)?;
                let page: RosterPage = self.client.get_json(url).await?;
                let names = page
                    .into_people()
                    .iter()
                    .map(Person::display_name)
                    .collect();
                Roster::from_names(names)
            }
        };

        histogram!(AGGREGATE_DURATION).record(started.elapsed().as_secs_f64());
        Ok(roster)
    }

    /// Walks the submission listing page by page, following the `next`
    /// locator until the upstream stops supplying one. Any page failure is
    /// fatal; there is no partial result. `max_pages` cuts off an upstream
    /// that never stops supplying next links.
    async fn collect_submissions(
        &self,
        source: &Source,
    ) -> Result<Vec<Submission>, UpstreamError> {
        let mut submissions = Vec::new();
        let mut next_url = Some(self.client.listing_url(source)?);
        let mut pages = 0usize;

        while let Some(url) = next_url {
            if pages >= self.max_pages {
                return Err(UpstreamError::PageLimitExceeded(self.max_pages));
            }

            let page: SubmissionPage = self.client.get_json(url).await?;
            pages += 1;

            next_url = match page.next_href() {
                Some(href) => Some(
                    Url::parse(href).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?,
                ),
                None => None,
            };
            submissions.extend(page.embedded.submissions);
        }

        tracing::debug!(
            pages,
            submissions = submissions.len(),
            "collected submission listing"
        );
        histogram!(LISTING_PAGES).record(pages as f64);
        Ok(submissions)
    }

    /// Resolves submissions to display names, preserving submission order.
    /// Submissions without a person locator are skipped entirely. Lookups
    /// run concurrently up to the configured cap; a cap of 1 is strictly
    /// sequential.
    async fn resolve_names(&self, submissions: &[Submission]) -> Vec<String> {
        let hrefs: Vec<String> = submissions
            .iter()
            .filter_map(Submission::person_href)
            .map(str::to_owned)
            .collect();
        stream::iter(hrefs)
            .map(|href| async move { self.lookup_name(&href).await })
            .buffered(self.lookup_concurrency)
            .filter_map(futures::future::ready)
            .collect()
            .await
    }

    async fn lookup_name(&self, href: &str) -> Option<String> {
        match self.client.get_person(href).await {
            Ok(person) => Some(person.display_name()),
            Err(err) => {
                counter!(PERSON_LOOKUP_FAILURES).increment(1);
                tracing::warn!(href, error = %err, "person lookup failed, dropping submission");
                None
            }
        }
    }
}
