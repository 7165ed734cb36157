//! # devsignal-config
//!
//! **Tier 4 (Configuration)**
//!
//! CLI argument definitions and the resolution of `devsignal.toml` under
//! command-line flags.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Locating and loading the TOML config file
//! * Merging flags over file values over defaults
//!
//! ## What does NOT belong here
//! * Business logic
//! * Reading activity bundles or writing profiles (see the `devsignal` binary)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
pub use devsignal_settings::{ProfileSettings, SettingsError};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "devsignal.toml";

/// `devsignal` derives a developer profile from public activity records.
#[derive(Parser, Debug)]
#[command(name = "devsignal", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build a profile from an activity bundle (JSON) and print it as JSON.
    Profile(ProfileArgs),

    /// Print the active keyword vocabulary as JSON.
    Vocabulary(VocabularyArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Activity bundle to read.
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Login of the profiled developer.
    #[arg(long)]
    pub login: String,

    /// Timezone for the activity rhythm: IANA name, `+HH:MM`, `-HH:MM` or `UTC`.
    ///
    /// Overrides `timezone` in the config file.
    #[arg(long, value_name = "ZONE")]
    pub tz: Option<String>,

    /// Count organization-owned repositories as owned in the uni index.
    #[arg(long)]
    pub orgs: bool,

    /// Config file (TOML). Defaults to `devsignal.toml` in the working directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reference instant (RFC 3339). Defaults to now.
    #[arg(long, value_name = "RFC3339")]
    pub as_of: Option<String>,

    /// Write the profile to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VocabularyArgs {
    /// Config file whose `[vocabulary]` table replaces the built-in lists.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Which config file applies, if any.
///
/// An explicit path is returned as-is even when it does not exist, so the
/// caller reports it. The implicit `devsignal.toml` is used only if present.
pub fn config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let implicit = cwd.join(DEFAULT_CONFIG_FILE);
    implicit.is_file().then_some(implicit)
}

/// Settings from the applicable config file, or defaults when there is none.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<ProfileSettings, SettingsError> {
    match config_path(explicit, cwd) {
        Some(path) => ProfileSettings::from_file(&path),
        None => Ok(ProfileSettings::default()),
    }
}

/// Apply command-line flags over file settings.
///
/// `--orgs` can only switch the flag on; leaving it off keeps the file value.
pub fn resolve_settings(args: &ProfileArgs, file: ProfileSettings) -> ProfileSettings {
    ProfileSettings {
        timezone: args.tz.clone().or(file.timezone),
        include_org_repos: args.orgs || file.include_org_repos,
        ..file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProfileArgs {
        ProfileArgs {
            bundle: PathBuf::from("bundle.json"),
            login: "octo".to_string(),
            ..ProfileArgs::default()
        }
    }

    #[test]
    fn flags_win_over_file() {
        let file = ProfileSettings {
            timezone: Some("Europe/Berlin".to_string()),
            ..ProfileSettings::default()
        };
        let resolved = resolve_settings(
            &ProfileArgs {
                tz: Some("+05:30".to_string()),
                orgs: true,
                ..args()
            },
            file,
        );
        assert_eq!(resolved.timezone.as_deref(), Some("+05:30"));
        assert!(resolved.include_org_repos);
    }

    #[test]
    fn file_values_survive_absent_flags() {
        let file = ProfileSettings {
            timezone: Some("Asia/Tokyo".to_string()),
            include_org_repos: true,
            evidence_limit: 2,
            ..ProfileSettings::default()
        };
        let resolved = resolve_settings(&args(), file);
        assert_eq!(resolved.timezone.as_deref(), Some("Asia/Tokyo"));
        assert!(resolved.include_org_repos);
        assert_eq!(resolved.evidence_limit, 2);
    }
}
