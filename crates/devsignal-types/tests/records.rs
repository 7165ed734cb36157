//! Deserialization behaviour of upstream records.

use devsignal_types::{ActivityRecords, EmailClass, PullRequest, Repository};

#[test]
fn empty_bundle_deserializes_with_defaults() {
    let records: ActivityRecords = serde_json::from_str("{}").unwrap();
    assert!(records.user.is_none());
    assert!(records.repositories.is_empty());
    assert!(records.pull_requests.is_empty());
    assert!(records.commits.is_empty());
    assert!(records.contributions.is_none());
    assert!(records.self_intro.is_none());
}

#[test]
fn sparse_repository_fills_missing_fields() {
    let repo: Repository =
        serde_json::from_str(r#"{"name": "tool", "owner": "Octo", "stars": 3}"#).unwrap();
    assert_eq!(repo.name, "tool");
    assert_eq!(repo.stars, 3);
    assert!(repo.languages.is_empty());
    assert!(repo.is_owned_by("octo"));
    assert_eq!(repo.html_url(), "https://github.com/Octo/tool");
}

#[test]
fn pull_request_merge_state_from_timestamp_or_flag() {
    let mut pr = PullRequest::default();
    assert!(!pr.is_merged());
    pr.merged_at = Some("2024-01-01T00:00:00Z".to_string());
    assert!(pr.is_merged());
    pr.merged_at = Some("  ".to_string());
    assert!(!pr.is_merged());
    pr.merged = true;
    assert!(pr.is_merged());
}

#[test]
fn email_class_defaults_to_unknown_and_parses_snake_case() {
    assert_eq!(EmailClass::default(), EmailClass::Unknown);
    let class: EmailClass = serde_json::from_str(r#""noreply""#).unwrap();
    assert_eq!(class, EmailClass::Noreply);
}
