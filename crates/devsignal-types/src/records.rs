//! Normalized activity records produced by the upstream fetching layer.
//!
//! Timestamps are kept as the raw strings the collaborator delivered.
//! Metrics parse them on use and skip values that do not parse.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything known about one subject's public activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRecords {
    pub user: Option<UserInfo>,
    pub repositories: Vec<Repository>,
    pub pull_requests: Vec<PullRequest>,
    pub commits: Vec<Commit>,
    pub contributions: Option<ContributionsSummary>,
    pub self_intro: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub owner: String,
    pub is_fork: bool,
    pub is_archived: bool,
    pub primary_language: Option<String>,
    /// Bytes of source per language.
    pub languages: BTreeMap<String, u64>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub license: Option<String>,
    pub created_at: Option<String>,
    pub pushed_at: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl Repository {
    /// Case-insensitive ownership check against a login.
    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner.eq_ignore_ascii_case(login)
    }

    /// `https://github.com/<owner>/<name>` unless the record carries a URL.
    pub fn html_url(&self) -> String {
        match &self.url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!("https://github.com/{}/{}", self.owner, self.name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub created_at: Option<String>,
    pub merged_at: Option<String>,
    pub closed_at: Option<String>,
    /// Explicit merge flag for sources that report state without a timestamp.
    pub merged: bool,
    pub repo_name: String,
    pub repo_owner: String,
    pub is_cross_repository: bool,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub url: Option<String>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged || self.merged_at.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn targets_owner(&self, login: &str) -> bool {
        self.repo_owner.eq_ignore_ascii_case(login)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub repo_name: String,
    pub repo_owner: String,
    /// Upstream flag: the commit lives in a repository the subject owns.
    pub is_own_repo: bool,
    pub authored_at: Option<String>,
    pub committed_at: Option<String>,
    pub is_merge: bool,
    pub additions: u64,
    pub deletions: u64,
    pub author: CommitAuthor,
    pub associated_prs: Vec<AssociatedPullRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub email_domain: Option<String>,
    pub email_class: EmailClass,
}

/// Domain class resolved upstream from the author's email TLD/domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailClass {
    Public,
    Corporate,
    Academic,
    Government,
    Noreply,
    #[default]
    Unknown,
}

/// A pull request linked to a commit, with both ends of the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociatedPullRequest {
    pub url: Option<String>,
    pub merged: bool,
    pub is_cross_repository: bool,
    pub base: RepoRef,
    pub head: Option<RepoRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    pub stars: u64,
}

impl RepoRef {
    pub fn matches(&self, owner: &str, name: &str) -> bool {
        self.owner.eq_ignore_ascii_case(owner) && self.name.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionsSummary {
    pub total_commit_contributions: u64,
    pub total_issue_contributions: u64,
    pub total_pull_request_contributions: u64,
    pub total_pull_request_review_contributions: u64,
    pub total_repository_contributions: u64,
    pub calendar: Option<ContributionCalendar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    /// Chronological, oldest week first.
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionWeek {
    pub days: Vec<ContributionDay>,
}

impl ContributionWeek {
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| d.count).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionDay {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter: Option<String>,
    pub followers: u64,
    pub following: u64,
    /// Organization logins the subject is a public member of.
    pub organizations: Vec<String>,
    pub created_at: Option<String>,
}
