//! Glob expansion for rule sources.
//!
//! A `rules` entry whose value contains a wildcard expands to one rule per
//! matching `.mdc` file. Each match is keyed by the declared key plus its
//! path below the pattern's static base:
//!
//! ```text
//! "docs": "guides/**/*.mdc"   guides/api/rest.mdc  ->  docs/api/rest
//! ```

use std::path::Path;

use glob::{MatchOptions, Pattern};
use rulekit_fs::{NormalizedPath, RULE_EXTENSION};

use crate::error::{Error, Result};

/// Characters that make a rule source a pattern rather than a path.
pub const WILDCARDS: [char; 4] = ['*', '?', '[', '{'];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

pub fn is_glob(source: &str) -> bool {
    source.contains(WILDCARDS)
}

/// The directory part of `pattern` before its first wildcard.
///
/// Cut at the last `/` preceding the wildcard, so `rules/ts*.mdc` has base
/// `rules` and `*.mdc` has an empty base.
pub fn static_base(pattern: &str) -> &str {
    let pattern = pattern.trim_start_matches("./");
    let first_wildcard = pattern.find(WILDCARDS).unwrap_or(pattern.len());
    match pattern[..first_wildcard].rfind('/') {
        Some(idx) => &pattern[..idx],
        None => "",
    }
}

/// Expand `{a,b}` alternatives, which the glob engine does not support.
fn expand_braces(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let Some(open) = pattern.find('{') else {
        return Ok(vec![pattern.to_string()]);
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut splits = Vec::new();
    for (idx, ch) in pattern[open..].char_indices() {
        let idx = open + idx;
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            ',' if depth == 1 => splits.push(idx),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| "unbalanced `{`".to_string())?;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = vec![open];
    bounds.extend(splits);
    bounds.push(close);

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let alternative = &pattern[window[0] + 1..window[1]];
        expanded.extend(expand_braces(&format!("{}{}{}", prefix, alternative, suffix))?);
    }
    Ok(expanded)
}

/// Expand `pattern` relative to `base_dir` into matching rule files.
///
/// Only regular files with the rule extension are returned, sorted
/// lexicographically and without duplicates. The error is a description of
/// the syntax problem.
pub fn expand(pattern: &str, base_dir: &Path) -> std::result::Result<Vec<NormalizedPath>, String> {
    let base = Pattern::escape(NormalizedPath::new(base_dir).as_str());
    let mut matches = Vec::new();

    for alternative in expand_braces(pattern)? {
        let full = if Path::new(&alternative).is_absolute() {
            alternative
        } else {
            format!("{}/{}", base, alternative.trim_start_matches("./"))
        };
        let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| e.to_string())?;
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    let path = NormalizedPath::new(path);
                    if path.extension() == Some(RULE_EXTENSION) {
                        matches.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "skipping unreadable glob entry"),
            }
        }
    }

    matches.sort();
    matches.dedup();
    Ok(matches)
}

/// Rule name for a file matched by a glob declared under `key`.
pub fn rule_key(key: &str, pattern: &str, base_dir: &Path, matched: &NormalizedPath) -> String {
    let static_dir = static_base(pattern);
    let base = if Path::new(pattern).is_absolute() {
        NormalizedPath::new(static_dir)
    } else {
        NormalizedPath::new(base_dir).join(static_dir)
    };
    let relative = matched
        .relative_to(&base)
        .unwrap_or_else(|| matched.file_name().unwrap_or_default().to_string());
    format!("{}/{}", key, NormalizedPath::new(relative).without_extension())
}

/// Expand a declared glob into `(rule name, file)` pairs.
///
/// A pattern matching nothing only warns.
pub fn expand_rule_glob(
    key: &str,
    pattern: &str,
    base_dir: &Path,
) -> Result<Vec<(String, NormalizedPath)>> {
    let matches = expand(pattern, base_dir).map_err(|message| Error::GlobPattern {
        key: key.to_string(),
        pattern: pattern.to_string(),
        message,
    })?;

    if matches.is_empty() {
        tracing::warn!(key, pattern, base = %base_dir.display(), "glob matched no rule files");
    }

    Ok(matches
        .into_iter()
        .map(|path| (rule_key(key, pattern, base_dir, &path), path))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("rules/ts*.mdc", "rules")]
    #[case("*.mdc", "")]
    #[case("guides/**/*.mdc", "guides")]
    #[case("./guides/api/*.mdc", "guides/api")]
    #[case("a/b/{x,y}/*.mdc", "a/b")]
    #[case("a/b?/c.mdc", "a")]
    fn test_static_base(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(static_base(pattern), expected);
    }

    #[test]
    fn test_is_glob() {
        assert!(is_glob("rules/*.mdc"));
        assert!(is_glob("rules/[ab].mdc"));
        assert!(!is_glob("rules/style.mdc"));
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("r/{a,b{1,2}}.mdc").unwrap(),
            vec!["r/a.mdc", "r/b1.mdc", "r/b2.mdc"]
        );
        assert_eq!(expand_braces("plain").unwrap(), vec!["plain"]);
        assert!(expand_braces("r/{a,b.mdc").is_err());
    }

    #[test]
    fn test_rule_key_keeps_sub_path() {
        let base = Path::new("/repo");
        let matched = NormalizedPath::new("/repo/guides/api/rest.mdc");
        assert_eq!(rule_key("docs", "guides/**/*.mdc", base, &matched), "docs/api/rest");
    }
}
