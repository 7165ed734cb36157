//! Handler for the `devsignal profile` command.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use devsignal_config::{self as cli, load_settings, resolve_settings};
use devsignal_profile::{ProfileContext, ProfileRequest, build_profile};
use devsignal_types::{ActivityRecords, Profile};
use tracing::info;

pub(crate) fn handle(args: cli::ProfileArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let file_settings = load_settings(args.config.as_deref(), &cwd)
        .context("failed to load devsignal config")?;
    let settings = resolve_settings(&args, file_settings);
    let as_of = parse_as_of(args.as_of.as_deref())?;

    let records = read_bundle(&args.bundle)?;
    let ctx = ProfileContext {
        login: args.login.clone(),
        records,
    };
    let profile = build_profile(&ctx, &ProfileRequest::new(settings, as_of))?;

    let rendered = render(&profile, args.compact)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write profile to {}", path.display()))?;
            info!(path = %path.display(), "wrote profile");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write profile to stdout")?;
        }
    }
    Ok(())
}

fn parse_as_of(raw: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(raw) = raw else {
        return Ok(Utc::now());
    };
    let parsed = DateTime::parse_from_rfc3339(raw.trim())
        .with_context(|| format!("invalid --as-of value '{raw}'"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn read_bundle(path: &Path) -> Result<ActivityRecords> {
    if !path.exists() {
        bail!("Path not found: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read activity bundle {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse activity bundle {}", path.display()))
}

fn render(profile: &Profile, compact: bool) -> Result<String> {
    let mut out = if compact {
        serde_json::to_string(profile)
    } else {
        serde_json::to_string_pretty(profile)
    }
    .context("failed to serialize profile")?;
    out.push('\n');
    Ok(out)
}
