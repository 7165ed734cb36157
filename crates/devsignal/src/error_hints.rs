use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("path not found") || haystack.contains("no such file or directory") {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("failed to read settings file") {
        push_hint(
            &mut out,
            "Check the `--config` path, or omit it to use `devsignal.toml` in the working directory.",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(&mut out, "Check `devsignal.toml` syntax and key names.");
    }

    if haystack.contains("invalid setting") {
        push_hint(
            &mut out,
            "Ratio thresholds must lie in [0, 1] and bands must be ordered; see `[thresholds]`.",
        );
    }

    if haystack.contains("failed to parse activity bundle") {
        push_hint(
            &mut out,
            "The bundle must be a JSON object with `user`, `repositories`, `pull_requests`, `commits`, `contributions` and `self_intro` keys.",
        );
    }

    if haystack.contains("login must not be empty") {
        push_hint(&mut out, "Pass the profiled account with `--login <LOGIN>`.");
    }

    if haystack.contains("--as-of") {
        push_hint(
            &mut out,
            "Use an RFC 3339 instant such as `2024-06-01T00:00:00Z`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{format, suggestions};

    #[test]
    fn suggests_for_missing_path() {
        let err = anyhow!("Path not found: does-not-exist.json");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("input path exists")));
    }

    #[test]
    fn suggests_for_bad_toml() {
        let err = anyhow!("Failed to parse settings TOML: expected a value")
            .context("failed to load devsignal config");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("devsignal.toml")));
    }

    #[test]
    fn suggests_for_invalid_threshold() {
        let err = anyhow!("Invalid setting 'variant_star_ratio': 3 is outside [0, 1]");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("[thresholds]")));
    }

    #[test]
    fn suggests_for_blank_login_and_bad_instant() {
        let login = suggestions(&anyhow!("subject login must not be empty"));
        assert!(login.iter().any(|h| h.contains("--login")));
        let as_of = suggestions(&anyhow!("invalid --as-of value 'yesterday'"));
        assert!(as_of.iter().any(|h| h.contains("RFC 3339")));
    }

    #[test]
    fn hints_are_not_repeated() {
        let err = anyhow!("No such file or directory (os error 2)")
            .context("Path not found: x.json");
        let hints = suggestions(&err);
        let unique: std::collections::BTreeSet<_> = hints.iter().collect();
        assert_eq!(unique.len(), hints.len());
    }

    #[test]
    fn format_includes_hints_section() {
        let err = anyhow!("Path not found: no-file");
        let rendered = format(&err);
        assert!(rendered.starts_with("Error:"));
        assert!(rendered.contains("Hints:"));
    }

    #[test]
    fn format_without_hints_is_just_the_error() {
        let rendered = format(&anyhow!("something odd"));
        assert_eq!(rendered, "Error: something odd");
    }
}
