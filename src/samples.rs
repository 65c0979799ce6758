//! Bundled search results covering each report shape.

use crate::model::{
    DomainInformation, EmailResult, GroupedProfiles, NameResult, PlatformCheck, Profile,
    SearchPayload, SearchQuery, SearchResult, SocialAccount, UsernameResult,
};

const SAMPLE_TIMESTAMP: &str = "2024-01-15T10:30:45.123456";

fn platform(name: &str, found: bool, url: &str) -> PlatformCheck {
    PlatformCheck {
        platform: name.to_string(),
        found,
        url: url.to_string(),
        status_code: Some(if found { 200 } else { 404 }),
        error: None,
    }
}

/// Username scan across five platforms, two of which answered.
pub fn username_result() -> SearchResult {
    let social_media = vec![
        platform("github", true, "https://github.com/octocat"),
        platform("twitter", false, "https://twitter.com/octocat"),
        platform("reddit", true, "https://www.reddit.com/user/octocat"),
        platform("instagram", false, "https://www.instagram.com/octocat"),
        PlatformCheck {
            platform: "medium".to_string(),
            found: false,
            url: "https://medium.com/@octocat".to_string(),
            status_code: None,
            error: Some("Timeout".to_string()),
        },
    ];

    SearchResult::new(
        "octocat",
        SAMPLE_TIMESTAMP,
        SearchPayload::Username(UsernameResult {
            total_found: 2,
            social_media,
        }),
    )
}

/// Email scan with WHOIS details, one associated account and a closing note.
pub fn email_result() -> SearchResult {
    let domain_information = DomainInformation {
        domain_name: Some("EXAMPLE.COM".to_string()),
        registrar: Some("RESERVED-Internet Assigned Numbers Authority".to_string()),
        organization: Some("N/A".to_string()),
        creation_date: Some("1995-08-14 04:00:00".to_string()),
        expiration_date: Some("2025-08-13 04:00:00".to_string()),
        status: Some("clientDeleteProhibited".to_string()),
        name_servers: vec!["A.IANA-SERVERS.NET".to_string(), "B.IANA-SERVERS.NET".to_string()],
        ..DomainInformation::default()
    };

    let social_media_accounts = vec![
        SocialAccount {
            platform: "github".to_string(),
            url: "https://github.com/jane.doe".to_string(),
            found: true,
            status_code: Some(200),
            error: None,
        },
        SocialAccount {
            platform: "twitter".to_string(),
            url: "https://twitter.com/jane.doe".to_string(),
            found: false,
            status_code: Some(404),
            error: None,
        },
    ];

    SearchResult::new(
        "jane.doe@example.com",
        SAMPLE_TIMESTAMP,
        SearchPayload::Email(EmailResult {
            email: "jane.doe@example.com".to_string(),
            username: "jane.doe".to_string(),
            domain: "example.com".to_string(),
            provider: "Custom/Business".to_string(),
            domain_information: Some(domain_information),
            total_social_accounts: Some(1),
            social_media_accounts,
            note: Some(
                "Social media accounts were checked using the username part of the email \
                 address. Results may include accounts that belong to other people."
                    .to_string(),
            ),
        }),
    )
}

fn profile(platform: &str, username: &str, url: &str, kind: &str) -> Profile {
    Profile {
        platform: platform.to_string(),
        username: username.to_string(),
        url: url.to_string(),
        found: true,
        kind: Some(kind.to_string()),
        status_code: Some(200),
    }
}

fn search_query(kind: &str, description: &str, query: &str) -> SearchQuery {
    SearchQuery {
        kind: kind.to_string(),
        description: description.to_string(),
        query: query.to_string(),
        url: format!("https://www.google.com/search?q={}", query.replace(' ', "+")),
    }
}

/// Name scan with professional and social hits plus suggested manual searches.
pub fn name_result() -> SearchResult {
    let professional_profiles = vec![
        profile("github", "johndoe", "https://github.com/johndoe", "professional"),
        profile("gitlab", "john.doe", "https://gitlab.com/john.doe", "professional"),
    ];
    let social_profiles = vec![profile(
        "twitter",
        "john_doe",
        "https://twitter.com/john_doe",
        "social",
    )];

    let grouped_profiles = GroupedProfiles {
        high_confidence: vec![professional_profiles[0].clone()],
        medium_confidence: vec![professional_profiles[1].clone()],
        low_confidence: social_profiles.clone(),
        note: None,
    };

    SearchResult::new(
        "John Doe",
        SAMPLE_TIMESTAMP,
        SearchPayload::Name(NameResult {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            full_name: "John Doe".to_string(),
            username_variations: ["johndoe", "john.doe", "john_doe", "jdoe", "doejohn"]
                .iter()
                .map(|v| v.to_string())
                .collect(),
            total_profiles_found: 3,
            social_profiles,
            professional_profiles,
            search_queries: vec![
                search_query("General", "General web search", "\"John Doe\""),
                search_query("News Articles", "News mentions", "\"John Doe\" news"),
                search_query("LinkedIn", "Professional profile search", "\"John Doe\" site:linkedin.com"),
            ],
            grouped_profiles: Some(grouped_profiles),
        }),
    )
}

/// All bundled samples, one per search kind.
pub fn all() -> Vec<SearchResult> {
    vec![username_result(), email_result(), name_result()]
}
