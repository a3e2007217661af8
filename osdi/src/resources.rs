//! Wire-format types for the OSDI resources this crate consumes.
//!
//! Upstream responses are treated permissively: a missing `_embedded`
//! collection or `_links` block reads as empty, and missing name fields
//! read as empty strings. Only a malformed JSON body is an error, and that
//! surfaces at the client layer.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<Link>,
    #[serde(rename = "osdi:person", default)]
    pub person: Option<Link>,
}

/// One record from a form's submission listing. Opaque apart from the
/// optional link to its person sub-resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Submission {
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl Submission {
    pub fn person_href(&self) -> Option<&str> {
        self.links.person.as_ref().map(|link| link.href.as_str())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubmissionEmbedded {
    #[serde(rename = "osdi:submissions", default)]
    pub submissions: Vec<Submission>,
}

/// One page of a paginated submission listing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubmissionPage {
    #[serde(rename = "_embedded", default)]
    pub embedded: SubmissionEmbedded,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl SubmissionPage {
    pub fn next_href(&self) -> Option<&str> {
        self.links.next.as_ref().map(|link| link.href.as_str())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
}

impl Person {
    /// `"{given} {family}"` trimmed, or `"Anonymous"` when both parts are
    /// missing or empty.
    pub fn display_name(&self) -> String {
        let given = self.given_name.as_deref().unwrap_or("");
        let family = self.family_name.as_deref().unwrap_or("");
        let full = format!("{given} {family}");
        let full = full.trim();

        if full.is_empty() {
            "Anonymous".to_string()
        } else {
            full.to_string()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RosterEmbedded {
    #[serde(rename = "osdi:people", default)]
    pub people: Vec<Person>,
    #[serde(rename = "osdi:signatures", default)]
    pub signatures: Vec<Person>,
}

/// A single-page listing whose person records are embedded directly, as
/// returned by the tag-people and petition-signature endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RosterPage {
    #[serde(rename = "_embedded", default)]
    pub embedded: RosterEmbedded,
}

impl RosterPage {
    /// Embedded person records, whichever OSDI collection the server used.
    pub fn into_people(self) -> Vec<Person> {
        let RosterEmbedded {
            mut people,
            mut signatures,
        } = self.embedded;
        people.append(&mut signatures);
        people
    }
}
