//! End-to-end orchestration tests for `build_profile`.

use chrono::{TimeZone, Utc};
use devsignal_profile::{ProfileContext, ProfileRequest, build_profile};
use devsignal_settings::ProfileSettings;
use devsignal_types::{
    ActivityRecords, AssociatedPullRequest, Commit, CommitAuthor, ConsistencyLevel,
    ContributionCalendar, ContributionDay, ContributionWeek, ContributionsSummary, EmailClass,
    IntroState, MomentumStatus, ProfileStatus, PullRequest, Ratio, RepoRef, Repository, Tag,
    TimezoneSource, UserInfo,
};

fn as_of() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn request(settings: ProfileSettings) -> ProfileRequest {
    ProfileRequest::new(settings, as_of())
}

fn repo(name: &str, lang: &str, stars: u64) -> Repository {
    Repository {
        name: name.to_string(),
        owner: "octo".to_string(),
        primary_language: Some(lang.to_string()),
        stars,
        created_at: Some("2023-01-01T00:00:00Z".to_string()),
        pushed_at: Some("2024-01-01T00:00:00Z".to_string()),
        topics: vec!["cli".to_string()],
        ..Repository::default()
    }
}

fn pr(owner: &str, created: &str, merged: bool) -> PullRequest {
    PullRequest {
        repo_owner: owner.to_string(),
        repo_name: "repo".to_string(),
        created_at: Some(created.to_string()),
        merged,
        url: Some(format!("https://github.com/{owner}/repo/pull/1")),
        ..PullRequest::default()
    }
}

fn commit(authored: &str, email: &str) -> Commit {
    Commit {
        repo_owner: "octo".to_string(),
        repo_name: "tool".to_string(),
        is_own_repo: true,
        authored_at: Some(authored.to_string()),
        author: CommitAuthor {
            email: Some(email.to_string()),
            email_class: EmailClass::Corporate,
            ..CommitAuthor::default()
        },
        ..Commit::default()
    }
}

fn full_records() -> ActivityRecords {
    let mut fork = repo("serde", "Rust", 0);
    fork.is_fork = true;
    let mut fork_commit = commit("2024-02-01T23:30:00Z", "octo@acme.com");
    fork_commit.repo_name = "serde".to_string();
    fork_commit.is_own_repo = false;
    fork_commit.associated_prs = vec![AssociatedPullRequest {
        merged: true,
        is_cross_repository: true,
        base: RepoRef {
            owner: "serde-rs".to_string(),
            name: "serde".to_string(),
            stars: 9000,
        },
        ..AssociatedPullRequest::default()
    }];

    ActivityRecords {
        user: Some(UserInfo {
            login: "octo".to_string(),
            name: Some("Octo Cat".to_string()),
            followers: 12,
            following: 3,
            organizations: vec!["acme".to_string()],
            ..UserInfo::default()
        }),
        repositories: vec![repo("tool", "TypeScript", 10), repo("site", "TypeScript", 5), fork],
        pull_requests: vec![
            pr("octo", "2024-05-01T10:15:00Z", false),
            pr("rust-lang", "2024-05-02T10:45:00Z", true),
            pr("tokio-rs", "2024-05-03T18:30:00Z", false),
        ],
        commits: vec![
            commit("2024-02-01T10:00:00Z", "octo@acme.com"),
            commit("2024-02-02T01:00:00Z", "octo@acme.com"),
            fork_commit,
        ],
        contributions: Some(ContributionsSummary {
            total_commit_contributions: 20,
            total_issue_contributions: 1,
            total_pull_request_contributions: 3,
            total_pull_request_review_contributions: 1,
            total_repository_contributions: 2,
            calendar: Some(ContributionCalendar {
                total_contributions: 52,
                weeks: (0..52)
                    .map(|_| ContributionWeek {
                        days: vec![ContributionDay {
                            date: "2024-01-01".to_string(),
                            count: 1,
                        }],
                    })
                    .collect(),
            }),
        }),
        self_intro: Some(
            "### Hi, I'm Octo\nI write TypeScript and Golang.\nSee https://github.com/octo/tool".to_string(),
        ),
    }
}

fn ctx(records: ActivityRecords) -> ProfileContext {
    ProfileContext {
        login: "octo".to_string(),
        records,
    }
}

#[test]
fn full_bundle_produces_complete_profile() {
    let profile = build_profile(&ctx(full_records()), &request(ProfileSettings::default())).unwrap();

    assert_eq!(profile.status, ProfileStatus::Complete);
    assert!(profile.warnings.is_empty(), "{:?}", profile.warnings);
    assert_eq!(profile.generated_at, "2024-06-01T00:00:00Z");
    assert_eq!(profile.subject.name.as_deref(), Some("Octo Cat"));
    assert_eq!(profile.subject.followers, Some(12));

    // the fork counts toward the weight vectors like any other repository
    assert_eq!(profile.languages.len(), 2);
    assert_eq!(profile.languages[0].name, "TypeScript");
    assert_eq!(profile.languages[1].name, "Rust");

    assert_eq!(profile.rhythm.histogram[10], Some(2));
    assert_eq!(profile.rhythm.core_hours[0].start, "09:00");

    assert_eq!(profile.collaboration.uoi.value(), Some(0.6667));
    assert_eq!(profile.collaboration.accept_rate.value(), Some(0.5));

    assert_eq!(profile.grit.long_term, 2);
    assert_eq!(profile.fork_destiny.contributor, 1);
    assert_eq!(profile.tags, vec![Tag::HardForker, Tag::SilentMaker]);
    assert_eq!(profile.momentum.status, MomentumStatus::Steady);

    assert_eq!(profile.intro.state, IntroState::Mixed);
    assert_eq!(profile.consistency.asserted_languages, vec!["Go", "TypeScript"]);
    assert_eq!(profile.consistency.level, ConsistencyLevel::Partial);
    assert_eq!(profile.consistency.repo_mentions.verified, vec!["octo/tool"]);

    assert_eq!(profile.identity.domains[0].domain, "acme.com");
    assert_eq!(profile.evidence.pull_requests.len(), 3);
    assert_eq!(profile.coverage.repositories.total, 3);
    assert_eq!(profile.coverage.commits.earliest.as_deref(), Some("2024-02-01T10:00:00Z"));
    assert_eq!(profile.coverage.input_signature.len(), 64);
}

#[test]
fn empty_bundle_degrades_to_absent_metrics() {
    let profile =
        build_profile(&ctx(ActivityRecords::default()), &request(ProfileSettings::default()))
            .unwrap();

    assert_eq!(profile.status, ProfileStatus::Partial);
    assert_eq!(profile.warnings.len(), 5);
    assert!(profile.languages.is_empty());
    assert!(profile.rhythm.core_hours.is_empty());
    assert_eq!(profile.night_ratio, Ratio::Absent);
    assert_eq!(profile.collaboration.uoi, Ratio::Absent);
    assert_eq!(profile.uni_index.ratio, Ratio::Absent);
    assert_eq!(profile.grit.ratio, Ratio::Absent);
    assert_eq!(profile.engagement.ratio, Ratio::Absent);
    assert_eq!(profile.momentum.status, MomentumStatus::Unknown);
    assert!(profile.tags.is_empty());
    assert_eq!(profile.intro.state, IntroState::None);
    assert_eq!(profile.consistency.level, ConsistencyLevel::Unknown);
    assert_eq!(profile.subject.login, "octo");
    assert_eq!(profile.subject.followers, None);
}

#[test]
fn fork_bytes_count_toward_weights_and_focus() {
    let mut fork = repo("kernel", "C", 0);
    fork.is_fork = true;
    fork.languages = [("C".to_string(), 900)].into_iter().collect();
    let mut original = repo("tool", "Rust", 0);
    original.languages = [("Rust".to_string(), 100)].into_iter().collect();
    let records = ActivityRecords {
        repositories: vec![original, fork],
        ..full_records()
    };

    let profile = build_profile(&ctx(records), &request(ProfileSettings::default())).unwrap();

    assert_eq!(profile.focus.language.as_deref(), Some("C"));
    assert_eq!(
        profile.focus.ratio,
        Ratio::Present {
            value: 0.9,
            sample_size: 1000
        }
    );
    assert_eq!(profile.languages[0].name, "C");
    assert!((profile.languages[0].weight - 0.5).abs() < 1e-9);
    assert!(profile.consistency.measured_languages.contains(&"C".to_string()));
}

#[test]
fn named_timezone_shifts_the_histogram() {
    let settings = ProfileSettings {
        timezone: Some("Asia/Shanghai".to_string()),
        ..ProfileSettings::default()
    };
    let profile = build_profile(&ctx(full_records()), &request(settings)).unwrap();

    assert_eq!(profile.timezone.offset_minutes, 480);
    assert_eq!(profile.timezone.source, TimezoneSource::NamedZone);
    assert_eq!(profile.rhythm.histogram[18], Some(2));
    assert_eq!(profile.rhythm.histogram[10], None);
}

#[test]
fn unknown_timezone_falls_back_with_warning() {
    let settings = ProfileSettings {
        timezone: Some("Mars/Olympus".to_string()),
        ..ProfileSettings::default()
    };
    let profile = build_profile(&ctx(full_records()), &request(settings)).unwrap();

    assert_eq!(profile.timezone.offset_minutes, 0);
    assert_eq!(profile.timezone.source, TimezoneSource::Fallback);
    assert_eq!(profile.status, ProfileStatus::Partial);
    assert_eq!(profile.warnings.len(), 1);
    assert!(profile.warnings[0].contains("Mars/Olympus"));
    assert!(profile.warnings[0].contains("UTC"));
}

#[test]
fn named_timezone_offset_follows_dst_at_reference_instant() {
    let settings = ProfileSettings {
        timezone: Some("America/New_York".to_string()),
        ..ProfileSettings::default()
    };
    let winter = ProfileRequest::new(
        settings.clone(),
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
    );
    let summer = ProfileRequest::new(settings, as_of());

    let winter = build_profile(&ctx(full_records()), &winter).unwrap();
    let summer = build_profile(&ctx(full_records()), &summer).unwrap();

    assert_eq!(winter.timezone.offset_minutes, -300);
    assert_eq!(summer.timezone.offset_minutes, -240);
    // 10:15Z and 10:45Z land at 05:00 in winter and 06:00 in summer
    assert_eq!(winter.rhythm.histogram[5], Some(2));
    assert_eq!(summer.rhythm.histogram[6], Some(2));
    assert_eq!(summer.status, ProfileStatus::Complete);
}

#[test]
fn org_flag_moves_org_prs_to_owned_side() {
    let mut records = full_records();
    records.pull_requests.push(pr("acme", "2024-05-04T12:00:00Z", true));

    let off = build_profile(&ctx(records.clone()), &request(ProfileSettings::default())).unwrap();
    let settings = ProfileSettings {
        include_org_repos: true,
        ..ProfileSettings::default()
    };
    let on = build_profile(&ctx(records), &request(settings)).unwrap();

    assert!(on.uni_index.owned_points > off.uni_index.owned_points);
    assert!(on.uni_index.include_org_repos);
    // UOI is about the subject only, organizations never change it
    assert_eq!(on.collaboration.uoi, off.collaboration.uoi);
}

#[test]
fn blank_login_is_rejected() {
    let context = ProfileContext {
        login: "  ".to_string(),
        records: ActivityRecords::default(),
    };
    let err = build_profile(&context, &request(ProfileSettings::default())).unwrap_err();
    assert!(err.to_string().contains("login"));
}

#[test]
fn invalid_thresholds_are_rejected() {
    let mut settings = ProfileSettings::default();
    settings.thresholds.variant_star_ratio = 2.0;
    let err = build_profile(&ctx(full_records()), &request(settings)).unwrap_err();
    assert!(format!("{err:#}").contains("variant_star_ratio"));
}
