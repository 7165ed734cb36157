//! Markdown and inline HTML stripping.

use std::sync::OnceLock;

use regex::Regex;

/// Plain text and image data extracted from a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stripped {
    /// Non-empty text lines, trimmed, joined with `\n`.
    pub plain_text: String,
    pub image_count: u64,
    /// Non-empty image alt texts in document order.
    pub image_alts: Vec<String>,
}

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN.get_or_init(|| Regex::new($re).expect("valid regex"))
        }
    };
}

pattern!(html_comment, r"(?s)<!--.*?-->");
pattern!(fenced_code, r"(?ms)^[ \t]*(?:```|~~~).*?^[ \t]*(?:```|~~~)[ \t]*$");
pattern!(md_image, r"!\[([^\]]*)\](?:\([^)]*\)|\[[^\]]*\])");
pattern!(html_image, r"(?is)<img\b[^>]*>");
pattern!(html_alt, r#"(?is)\balt\s*=\s*(?:"([^"]*)"|'([^']*)')"#);
pattern!(md_link, r"\[([^\]]*)\](?:\([^)]*\)|\[[^\]]*\])");
pattern!(inline_code, r"`([^`]*)`");
pattern!(html_tag, r"(?s)</?[A-Za-z][^>]*>");
pattern!(heading, r"(?m)^[ \t]{0,3}#{1,6}[ \t]*");
pattern!(quote_marker, r"(?m)^[ \t]*(?:>[ \t]?)+");
pattern!(list_marker, r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+");
pattern!(rule, r"(?m)^[ \t]*(?:[-*_][ \t]*){3,}$");
pattern!(emphasis, r"\*\*|__|~~|\*");
pattern!(entity, r"&(?:nbsp|amp|lt|gt|quot|#39);");

/// Strip markdown syntax and inline HTML, collecting image alt texts.
pub fn strip_markdown(raw: &str) -> Stripped {
    let mut image_alts = Vec::new();
    let mut image_count = 0u64;

    let text = html_comment().replace_all(raw, "");
    let text = fenced_code().replace_all(&text, "");

    let text = md_image().replace_all(&text, |caps: &regex::Captures<'_>| {
        image_count += 1;
        push_alt(&mut image_alts, &caps[1]);
        String::new()
    });
    let text = html_image().replace_all(&text, |caps: &regex::Captures<'_>| {
        image_count += 1;
        if let Some(alt) = html_alt()
            .captures(&caps[0])
            .and_then(|c| c.get(1).or_else(|| c.get(2)))
        {
            push_alt(&mut image_alts, alt.as_str());
        }
        String::new()
    });

    let text = md_link().replace_all(&text, "$1");
    let text = inline_code().replace_all(&text, "$1");
    let text = html_tag().replace_all(&text, "");
    let text = rule().replace_all(&text, "");
    let text = heading().replace_all(&text, "");
    let text = quote_marker().replace_all(&text, "");
    let text = list_marker().replace_all(&text, "");
    let text = emphasis().replace_all(&text, "");
    let text = entity().replace_all(&text, |caps: &regex::Captures<'_>| {
        match &caps[0] {
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            "&#39;" => "'",
            _ => " ",
        }
        .to_string()
    });

    let plain_text = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Stripped {
        plain_text,
        image_count,
        image_alts,
    }
}

fn push_alt(alts: &mut Vec<String>, alt: &str) {
    let alt = alt.trim();
    if !alt.is_empty() {
        alts.push(alt.to_string());
    }
}
