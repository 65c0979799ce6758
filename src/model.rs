//! Typed search results consumed by the report engine.
//!
//! The search backend answers with a JSON envelope of the form
//! `{ "query", "type", "timestamp", "results" }` where the shape of `results`
//! depends on `type`.  This module decodes that envelope into a closed
//! [`SearchPayload`] enum so the renderers can match on it exhaustively, and
//! applies every default for missing optional data exactly once, here, instead
//! of scattering fallbacks through the layout code.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ReportError;

/// The three kinds of search the backend performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// Username lookup across social platforms.
    Username,
    /// Email address analysis (provider, WHOIS, linked accounts).
    Email,
    /// First/last name investigation.
    Name,
}

impl SearchKind {
    /// Wire name used in the `type` field and in report file names.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Username => "username",
            SearchKind::Email => "email",
            SearchKind::Name => "name",
        }
    }

    /// Upper-cased label printed in the report metadata block.
    pub fn label(self) -> String {
        self.as_str().to_uppercase()
    }

    /// Parses a wire name, returning `None` for unknown kinds.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "username" => Some(SearchKind::Username),
            "email" => Some(SearchKind::Email),
            "name" => Some(SearchKind::Name),
            _ => None,
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed search, ready to be turned into a report.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// The query as submitted (username, email address or "First Last").
    pub query: String,
    /// ISO-8601 timestamp assigned by the backend.
    pub timestamp: String,
    /// Kind-specific findings.
    pub payload: SearchPayload,
}

/// Kind-specific payload of a [`SearchResult`].
///
/// The kind of a result is derived from the variant, so a payload can never
/// disagree with its declared type once decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchPayload {
    /// Findings of a username scan.
    Username(UsernameResult),
    /// Findings of an email scan.
    Email(EmailResult),
    /// Findings of a name scan.
    Name(NameResult),
}

impl SearchPayload {
    /// Returns the kind matching this payload.
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchPayload::Username(_) => SearchKind::Username,
            SearchPayload::Email(_) => SearchKind::Email,
            SearchPayload::Name(_) => SearchKind::Name,
        }
    }
}

#[derive(Deserialize)]
struct RawSearchResult {
    query: String,
    #[serde(rename = "type")]
    kind: String,
    timestamp: String,
    #[serde(default)]
    results: Value,
}

impl SearchResult {
    /// Creates a result from already-typed parts.
    pub fn new(query: impl Into<String>, timestamp: impl Into<String>, payload: SearchPayload) -> Self {
        Self {
            query: query.into(),
            timestamp: timestamp.into(),
            payload,
        }
    }

    /// Returns the search kind.
    pub fn kind(&self) -> SearchKind {
        self.payload.kind()
    }

    /// Decodes a backend response body.
    pub fn from_json(input: &str) -> Result<Self, ReportError> {
        let raw: RawSearchResult = serde_json::from_str(input)?;
        Self::from_raw(raw)
    }

    /// Decodes an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        let raw: RawSearchResult = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSearchResult) -> Result<Self, ReportError> {
        let kind =
            SearchKind::from_wire(&raw.kind).ok_or(ReportError::UnknownSearchType(raw.kind))?;
        let mismatch = |source| ReportError::PayloadMismatch { kind, source };

        let payload = match kind {
            SearchKind::Username => {
                SearchPayload::Username(serde_json::from_value(raw.results).map_err(mismatch)?)
            }
            SearchKind::Email => {
                SearchPayload::Email(serde_json::from_value(raw.results).map_err(mismatch)?)
            }
            SearchKind::Name => {
                SearchPayload::Name(serde_json::from_value(raw.results).map_err(mismatch)?)
            }
        };

        Ok(Self::new(raw.query, raw.timestamp, payload))
    }
}

/// Result of probing one platform for a username.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformCheck {
    /// Platform key, e.g. `github` or `dev.to`.
    pub platform: String,
    /// Whether the profile URL answered with HTTP 200.
    #[serde(default)]
    pub found: bool,
    /// Profile URL that was checked.
    #[serde(default)]
    pub url: String,
    /// HTTP status of the check, when it completed.
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Failure reason (e.g. `Timeout`) when the check did not complete.
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of a username scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UsernameResult {
    /// Number of platforms reporting a profile, as counted by the backend.
    pub total_found: u32,
    /// Check results in backend order.
    #[serde(default)]
    pub social_media: Vec<PlatformCheck>,
}

/// WHOIS details for the domain of an email address.
///
/// The backend fills unknown values with the literal string `"N/A"`; on lookup
/// failure only `error` (and usually `note`) are set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DomainInformation {
    pub domain_name: Option<String>,
    pub registrar: Option<String>,
    pub organization: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub name_servers: Vec<String>,
    /// Contact addresses published in the WHOIS record.
    #[serde(deserialize_with = "one_or_many")]
    pub emails: Vec<String>,
    pub error: Option<String>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
}

/// WHOIS list fields arrive as `null`, a bare string or an array depending on
/// the registry; all three decode to a list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values.into_iter().flatten().collect(),
    })
}

/// Social account checked with the local part of an email address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SocialAccount {
    pub platform: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of an email scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EmailResult {
    pub email: String,
    pub username: String,
    pub domain: String,
    pub provider: String,
    #[serde(default)]
    pub domain_information: Option<DomainInformation>,
    #[serde(default)]
    pub social_media_accounts: Vec<SocialAccount>,
    #[serde(default)]
    pub total_social_accounts: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A profile discovered during a name scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub platform: String,
    pub username: String,
    pub url: String,
    pub found: bool,
    /// `professional` or `social`, as classified by the backend.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status_code: Option<u16>,
}

/// A suggested manual search for further investigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    /// Short category, e.g. `News Articles`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub query: String,
    pub url: String,
}

/// Profiles bucketed by how likely they belong to the searched person.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupedProfiles {
    pub high_confidence: Vec<Profile>,
    pub medium_confidence: Vec<Profile>,
    pub low_confidence: Vec<Profile>,
    pub note: Option<String>,
}

/// Payload of a name scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NameResult {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[serde(default)]
    pub username_variations: Vec<String>,
    pub total_profiles_found: u32,
    #[serde(default)]
    pub social_profiles: Vec<Profile>,
    #[serde(default)]
    pub professional_profiles: Vec<Profile>,
    #[serde(default)]
    pub search_queries: Vec<SearchQuery>,
    #[serde(default)]
    pub grouped_profiles: Option<GroupedProfiles>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_username_envelope() {
        let result = SearchResult::from_value(json!({
            "query": "octocat",
            "type": "username",
            "timestamp": "2024-01-15T10:30:45.123456",
            "results": {
                "total_found": 1,
                "social_media": [
                    {"platform": "github", "url": "https://github.com/octocat", "found": true, "status_code": 200},
                    {"platform": "twitch", "url": "https://twitch.tv/octocat", "found": false, "error": "Timeout"}
                ]
            }
        }))
        .expect("decode username result");

        assert_eq!(result.kind(), SearchKind::Username);
        let SearchPayload::Username(payload) = &result.payload else {
            panic!("expected username payload");
        };
        assert_eq!(payload.social_media.len(), 2);
        assert_eq!(payload.social_media[1].error.as_deref(), Some("Timeout"));
        assert_eq!(payload.social_media[0].status_code, Some(200));
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let result = SearchResult::from_json(
            r#"{"query":"Ada Lovelace","type":"name","timestamp":"t",
                "results":{"first_name":"Ada","last_name":"Lovelace","full_name":"Ada Lovelace","total_profiles_found":0}}"#,
        )
        .expect("decode name result");

        let SearchPayload::Name(payload) = result.payload else {
            panic!("expected name payload");
        };
        assert!(payload.username_variations.is_empty());
        assert!(payload.search_queries.is_empty());
        assert!(payload.grouped_profiles.is_none());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = SearchResult::from_value(json!({
            "query": "x", "type": "phone", "timestamp": "t", "results": {}
        }))
        .unwrap_err();
        assert!(matches!(err, ReportError::UnknownSearchType(ref kind) if kind == "phone"));
    }

    #[test]
    fn mismatched_payload_is_rejected() {
        let err = SearchResult::from_value(json!({
            "query": "someone@example.com",
            "type": "email",
            "timestamp": "t",
            "results": {"total_found": 0, "social_media": []}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ReportError::PayloadMismatch {
                kind: SearchKind::Email,
                ..
            }
        ));
    }

    #[test]
    fn whois_lists_accept_null_and_bare_strings() {
        let result = SearchResult::from_value(json!({
            "query": "sam@example.org",
            "type": "email",
            "timestamp": "2024-01-15T10:30:45",
            "results": {
                "email": "sam@example.org",
                "username": "sam",
                "domain": "example.org",
                "provider": "Custom/Business",
                "domain_information": {
                    "domain_name": "EXAMPLE.ORG",
                    "registrar": null,
                    "emails": "abuse@x.com",
                    "name_servers": null
                }
            }
        }))
        .expect("decode email result");

        let SearchPayload::Email(payload) = result.payload else {
            panic!("expected email payload");
        };
        let info = payload.domain_information.expect("domain information");
        assert_eq!(info.emails, ["abuse@x.com"]);
        assert!(info.name_servers.is_empty());
        assert!(info.registrar.is_none());
    }

    #[test]
    fn whois_lists_skip_null_entries() {
        let info: DomainInformation = serde_json::from_value(json!({
            "name_servers": ["NS1.EXAMPLE.ORG", null, "NS2.EXAMPLE.ORG"],
            "emails": []
        }))
        .expect("decode domain information");
        assert_eq!(info.name_servers, ["NS1.EXAMPLE.ORG", "NS2.EXAMPLE.ORG"]);
        assert!(info.emails.is_empty());
    }

    #[test]
    fn profile_type_field_is_renamed() {
        let profile: Profile = serde_json::from_value(json!({
            "platform": "github", "username": "ada", "url": "u", "found": true, "type": "professional"
        }))
        .expect("decode profile");
        assert_eq!(profile.kind.as_deref(), Some("professional"));
    }
}
