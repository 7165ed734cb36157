//! Cross-checks claims in the self-introduction against measured signals.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use devsignal_settings::{KeywordVocabulary, Thresholds};
use devsignal_types::{
    ConsistencyLevel, ConsistencyReport, IntroAnalysis, Ratio, RepoMentions, Repository,
    WeightEntry,
};

/// Everything the checker reads. The raw text is needed for repository URLs,
/// which markdown stripping removes.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyInput<'a> {
    pub raw_intro: Option<&'a str>,
    pub intro: &'a IntroAnalysis,
    pub languages: &'a [WeightEntry],
    pub login: &'a str,
    pub repositories: &'a [Repository],
}

/// Compare asserted languages, topics and repository links with what the
/// activity records show.
///
/// Fails only when a vocabulary keyword cannot be compiled into a pattern.
pub fn check_consistency(
    input: &ConsistencyInput<'_>,
    vocabulary: &KeywordVocabulary,
    thresholds: &Thresholds,
) -> Result<ConsistencyReport, regex::Error> {
    let patterns = VocabularyPatterns::compile(vocabulary)?;
    let haystack = claim_text(input.intro);

    let asserted_languages = patterns.languages_in(&haystack);
    let measured_languages: Vec<String> = input
        .languages
        .iter()
        .filter(|w| w.weight >= thresholds.measured_language_floor)
        .map(|w| w.name.clone())
        .collect();
    let overlap: Vec<String> = asserted_languages
        .iter()
        .filter(|a| measured_languages.iter().any(|m| m.eq_ignore_ascii_case(a)))
        .cloned()
        .collect();

    let supported_ratio = Ratio::from_counts(overlap.len() as u64, asserted_languages.len() as u64);
    let level = match supported_ratio.value() {
        None => ConsistencyLevel::Unknown,
        Some(v) if v >= thresholds.consistency_strong => ConsistencyLevel::Strong,
        Some(v) if v >= thresholds.consistency_partial => ConsistencyLevel::Partial,
        Some(_) => ConsistencyLevel::Poor,
    };

    let corpus = repository_topic_corpus(input.repositories);
    let mut supported_topics = Vec::new();
    let mut unsupported_topics = Vec::new();
    let asserted_topics: Vec<String> = patterns
        .topics_in(&haystack)
        .map(|(pattern, topic)| {
            if pattern.is_match(&corpus) {
                supported_topics.push(topic.clone());
            } else {
                unsupported_topics.push(topic.clone());
            }
            topic.clone()
        })
        .collect();

    Ok(ConsistencyReport {
        asserted_languages,
        measured_languages,
        overlap,
        supported_ratio,
        level,
        asserted_topics,
        supported_topics,
        unsupported_topics,
        repo_mentions: repo_mentions(input.raw_intro, input.login, input.repositories),
        vocabulary_version: vocabulary.version,
    })
}

/// Keyword patterns compiled once per vocabulary. Blank keywords are dropped.
struct VocabularyPatterns<'v> {
    languages: Vec<(Regex, &'v str)>,
    topics: Vec<(Regex, &'v String)>,
}

impl<'v> VocabularyPatterns<'v> {
    fn compile(vocabulary: &'v KeywordVocabulary) -> Result<Self, regex::Error> {
        let mut languages = Vec::with_capacity(vocabulary.languages.len());
        for (keyword, language) in &vocabulary.languages {
            if let Some(re) = keyword_pattern(keyword)? {
                languages.push((re, language.as_str()));
            }
        }
        let mut topics = Vec::with_capacity(vocabulary.topics.len());
        for topic in &vocabulary.topics {
            if let Some(re) = keyword_pattern(&normalize_phrase(topic))? {
                topics.push((re, topic));
            }
        }
        Ok(Self { languages, topics })
    }

    fn languages_in(&self, text: &str) -> Vec<String> {
        self.languages
            .iter()
            .filter(|(re, _)| re.is_match(text))
            .map(|(_, language)| (*language).to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First spelling of each topic found in `text`, in vocabulary order.
    fn topics_in<'a>(&'a self, text: &str) -> impl Iterator<Item = (&'a Regex, &'v String)> {
        let normalized = normalize_phrase(text);
        let mut seen = BTreeSet::new();
        self.topics
            .iter()
            .filter(move |(re, topic)| re.is_match(&normalized) && seen.insert(topic.to_lowercase()))
            .map(|(re, topic)| (re, *topic))
    }
}

/// Canonical languages named in `text`, sorted and deduplicated.
pub fn extract_languages(
    text: &str,
    vocabulary: &KeywordVocabulary,
) -> Result<Vec<String>, regex::Error> {
    Ok(VocabularyPatterns::compile(vocabulary)?.languages_in(text))
}

/// Vocabulary topics named in `text`, in vocabulary order.
pub fn extract_topics(
    text: &str,
    vocabulary: &KeywordVocabulary,
) -> Result<Vec<String>, regex::Error> {
    Ok(VocabularyPatterns::compile(vocabulary)?
        .topics_in(text)
        .map(|(_, topic)| topic.clone())
        .collect())
}

/// Case-insensitive keyword match that refuses to match inside a larger word.
///
/// `java` does not match `javascript`, and `c` would not match `c++`.
pub fn contains_keyword(text: &str, keyword: &str) -> Result<bool, regex::Error> {
    Ok(keyword_pattern(keyword)?.is_some_and(|re| re.is_match(text)))
}

/// `None` for a blank keyword, which matches nothing.
fn keyword_pattern(keyword: &str) -> Result<Option<Regex>, regex::Error> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Ok(None);
    }
    let pattern = format!(
        r"(?i)(?:^|[^\p{{L}}\p{{N}}_]){}(?:$|[^\p{{L}}\p{{N}}_+#])",
        regex::escape(keyword)
    );
    Regex::new(&pattern).map(Some)
}

fn repo_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bgithub\.com/([A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)/([A-Za-z0-9._-]+)")
            .expect("valid regex")
    })
}

/// Links into the subject's own namespace, split by whether the repository
/// list contains them. Entries are `owner/repo`, sorted.
pub fn repo_mentions(raw: Option<&str>, login: &str, repos: &[Repository]) -> RepoMentions {
    let Some(raw) = raw else {
        return RepoMentions::default();
    };

    let mut mentioned = BTreeSet::new();
    for caps in repo_url().captures_iter(raw) {
        if !caps[1].eq_ignore_ascii_case(login) {
            continue;
        }
        let name = caps[2].trim_end_matches('.');
        let name = name.strip_suffix(".git").unwrap_or(name);
        if !name.is_empty() {
            mentioned.insert(name.to_lowercase());
        }
    }

    let mut out = RepoMentions::default();
    for name in mentioned {
        let known = repos
            .iter()
            .any(|r| r.is_owned_by(login) && r.name.eq_ignore_ascii_case(&name));
        let label = format!("{login}/{name}");
        if known {
            out.verified.push(label);
        } else {
            out.unverified.push(label);
        }
    }
    out
}

/// Plain text plus image alt texts; badges often name languages only there.
fn claim_text(intro: &IntroAnalysis) -> String {
    let mut text = intro.plain_text.clone();
    for alt in &intro.image_alts {
        text.push('\n');
        text.push_str(alt);
    }
    text
}

/// Topic tags and descriptions, normalized for phrase matching.
fn repository_topic_corpus(repos: &[Repository]) -> String {
    repos
        .iter()
        .flat_map(|r| r.topics.iter().map(String::as_str).chain(r.description.as_deref()))
        .map(normalize_phrase)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase, with `-` and `_` read as spaces and whitespace collapsed.
fn normalize_phrase(s: &str) -> String {
    s.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
