use crate::utils::normalize_path;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

enum Rule {
    Exact(String),
    Wildcard(Regex),
}

impl Rule {
    fn is_match(&self, path: &str) -> bool {
        match self {
            Rule::Exact(expected) => expected == &path.to_lowercase(),
            Rule::Wildcard(regex) => regex.is_match(path),
        }
    }
}

/// Ignore rules compiled once per run.
///
/// A pattern without `*` must equal the relative path exactly; a pattern with
/// `*` matches the whole path, `*` standing for any run of characters
/// (path separators included). Both forms ignore case.
pub struct IgnorePatterns {
    rules: Vec<Rule>,
}

impl IgnorePatterns {
    pub fn new(patterns: &[String]) -> Self {
        let rules = patterns
            .iter()
            .filter_map(|p| {
                if !p.contains('*') {
                    return Some(Rule::Exact(p.to_lowercase()));
                }
                match compile_wildcard(p) {
                    Ok(regex) => Some(Rule::Wildcard(regex)),
                    Err(e) => {
                        warn!("Invalid ignore pattern '{}': {}", p, e);
                        None
                    }
                }
            })
            .collect();

        debug!("Using ignore patterns: {:?}", patterns);

        IgnorePatterns { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_match(&self, relative_path: &str) -> bool {
        let path = normalize_path(relative_path);
        self.rules.iter().any(|rule| rule.is_match(&path))
    }
}

fn compile_wildcard(pattern: &str) -> Result<Regex, regex::Error> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    RegexBuilder::new(&format!("^{}$", body))
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

/// One-shot form of [`IgnorePatterns::is_match`].
pub fn matches(relative_path: &str, patterns: &[String]) -> bool {
    IgnorePatterns::new(patterns).is_match(relative_path)
}
