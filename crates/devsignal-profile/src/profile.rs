use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use devsignal_collab::{build_collaboration_report, build_uni_index};
use devsignal_community::{build_engagement, build_momentum};
use devsignal_fingerprint::build_identity_fingerprint;
use devsignal_intro::{ConsistencyInput, analyze_intro, check_consistency};
use devsignal_outcomes::{build_fork_destiny, build_grit_report};
use devsignal_settings::ProfileSettings;
use devsignal_tags::derive_tags;
use devsignal_temporal::{build_activity_rhythm, build_night_ratio};
use devsignal_time::{format_utc, resolve_timezone};
use devsignal_types::{
    ActivityRecords, PROFILE_SCHEMA_VERSION, Profile, ProfileStatus, SubjectInfo,
    TimezoneSource, ToolInfo, UserInfo,
};
use devsignal_weights::{build_focus_report, build_language_weights, build_topic_weights};
use tracing::{debug, info};

use crate::coverage::{build_coverage, build_evidence};

/// Who the profile is about and what is known about them.
#[derive(Debug, Clone)]
pub struct ProfileContext {
    /// Login of the subject; ownership checks compare against it.
    pub login: String,
    pub records: ActivityRecords,
}

#[derive(Debug, Clone)]
pub struct ProfileRequest {
    pub settings: ProfileSettings,
    /// Reference instant. Named timezones are resolved at this instant and
    /// it is reported as `generated_at`.
    pub as_of: DateTime<Utc>,
}

impl ProfileRequest {
    pub fn new(settings: ProfileSettings, as_of: DateTime<Utc>) -> Self {
        Self { settings, as_of }
    }
}

/// Compute every metric and assemble the profile.
///
/// Missing inputs never fail the build; they produce absent metrics and a
/// warning, and mark the profile `partial`. Only a blank login or invalid
/// settings are errors.
pub fn build_profile(ctx: &ProfileContext, req: &ProfileRequest) -> Result<Profile> {
    let login = ctx.login.trim();
    if login.is_empty() {
        bail!("subject login must not be empty");
    }
    req.settings
        .validate()
        .context("invalid profile settings")?;

    let records = &ctx.records;
    let settings = &req.settings;
    let thresholds = &settings.thresholds;
    let mut warnings = input_warnings(records);

    let timezone = resolve_timezone(settings.timezone.as_deref(), req.as_of);
    if timezone.source == TimezoneSource::Fallback {
        warnings.push(format!(
            "unrecognized timezone {:?}; using UTC",
            timezone.requested.as_deref().unwrap_or_default()
        ));
    }
    let offset = timezone.offset_minutes;
    debug!(offset_minutes = offset, source = ?timezone.source, "resolved timezone");

    let repos = &records.repositories;
    let languages = build_language_weights(repos);
    let topics = build_topic_weights(repos);
    let focus = build_focus_report(repos);
    debug!(
        languages = languages.len(),
        topics = topics.len(),
        "computed weight vectors"
    );

    let rhythm = build_activity_rhythm(&records.pull_requests, offset);
    if rhythm.skipped > 0 {
        warnings.push(format!(
            "activity histogram skipped {} pull requests with unparseable created_at",
            rhythm.skipped
        ));
    }
    let night_ratio = build_night_ratio(&records.commits, offset);
    debug!(
        events = rhythm.total_events,
        core_windows = rhythm.core_hours.len(),
        night_sample = night_ratio.sample_size(),
        "computed temporal rhythm"
    );

    let organizations = records
        .user
        .as_ref()
        .map(|u| u.organizations.clone())
        .unwrap_or_default();
    let collaboration = build_collaboration_report(&records.pull_requests, login);
    let uni_index = build_uni_index(
        &records.commits,
        &records.pull_requests,
        login,
        &organizations,
        settings.include_org_repos,
    );
    debug!(
        external_prs = collaboration.external_prs,
        uni_sample = uni_index.ratio.sample_size(),
        "computed collaboration"
    );

    let grit = build_grit_report(&records.repositories, login, thresholds);
    if grit.skipped > 0 {
        warnings.push(format!(
            "grit skipped {} original repositories with unparseable timestamps",
            grit.skipped
        ));
    }
    let fork_destiny =
        build_fork_destiny(&records.repositories, &records.commits, login, thresholds);
    debug!(
        originals = grit.classified(),
        forks = fork_destiny.total,
        "computed outcomes"
    );

    let engagement = build_engagement(records.contributions.as_ref());
    let momentum = build_momentum(records.contributions.as_ref(), thresholds);
    debug!(status = ?momentum.status, "computed community signals");

    let tags = derive_tags(&fork_destiny, &engagement, thresholds);

    let intro = analyze_intro(records.self_intro.as_deref(), thresholds);
    let consistency = check_consistency(
        &ConsistencyInput {
            raw_intro: records.self_intro.as_deref(),
            intro: &intro,
            languages: &languages,
            login,
            repositories: &records.repositories,
        },
        &settings.vocabulary,
        thresholds,
    )
    .context("compiling keyword vocabulary")?;
    debug!(state = ?intro.state, level = ?consistency.level, "analyzed self-introduction");

    let identity = build_identity_fingerprint(&records.commits);
    let evidence = build_evidence(records, settings.evidence_limit);
    let coverage = build_coverage(records)?;

    let status = if warnings.is_empty() {
        ProfileStatus::Complete
    } else {
        ProfileStatus::Partial
    };
    info!(
        login,
        status = ?status,
        warnings = warnings.len(),
        tags = tags.len(),
        "profile built"
    );

    Ok(Profile {
        schema_version: PROFILE_SCHEMA_VERSION,
        generated_at: format_utc(req.as_of),
        tool: ToolInfo::current(),
        status,
        warnings,
        subject: subject_info(login, records.user.as_ref()),
        timezone,
        languages,
        topics,
        focus,
        rhythm,
        night_ratio,
        collaboration,
        uni_index,
        grit,
        fork_destiny,
        engagement,
        momentum,
        tags,
        intro,
        consistency,
        identity,
        evidence,
        coverage,
    })
}

fn input_warnings(records: &ActivityRecords) -> Vec<String> {
    let mut warnings = Vec::new();
    if records.user.is_none() {
        warnings.push("user info missing; identity fields are empty".to_string());
    }
    if records.repositories.is_empty() {
        warnings.push(
            "no repositories; language, topic, focus, grit and fork metrics are empty".to_string(),
        );
    }
    if records.pull_requests.is_empty() {
        warnings.push("no pull requests; activity rhythm and UOI are empty".to_string());
    }
    if records.commits.is_empty() {
        warnings.push("no commits; night ratio and identity fingerprint are empty".to_string());
    }
    if records.contributions.is_none() {
        warnings.push("contributions summary missing; engagement and momentum are unknown".to_string());
    }
    warnings
}

fn subject_info(login: &str, user: Option<&UserInfo>) -> SubjectInfo {
    let Some(user) = user else {
        return SubjectInfo {
            login: login.to_string(),
            ..SubjectInfo::default()
        };
    };
    SubjectInfo {
        login: login.to_string(),
        name: user.name.clone(),
        bio: user.bio.clone(),
        company: user.company.clone(),
        location: user.location.clone(),
        blog: user.blog.clone(),
        twitter: user.twitter.clone(),
        followers: Some(user.followers),
        following: Some(user.following),
        organizations: user.organizations.clone(),
    }
}
