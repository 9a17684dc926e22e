//! Generated summary for manifest targets.
//!
//! The summary lists every rule grouped by [`UsageMode`], each entry linking
//! the body file written to the shared rules directory.

use rulekit_meta::{RuleFile, UsageMode};

/// Heading for a usage group.
fn heading(mode: UsageMode) -> &'static str {
    match mode {
        UsageMode::Always => "Always applied",
        UsageMode::PatternMatched => "Applied to matching files",
        UsageMode::OnRequest => "Available on request",
        UsageMode::Manual => "Manual",
    }
}

/// Relative path of a rule's body file inside `shared_dir`.
pub fn body_path(shared_dir: &str, rule: &RuleFile) -> String {
    format!("{}/{}.md", shared_dir, rule.output_stem())
}

fn entry(shared_dir: &str, rule: &RuleFile) -> String {
    let link = format!("- [{}]({})", rule.name, body_path(shared_dir, rule));
    match rule.usage_mode() {
        UsageMode::PatternMatched => {
            let globs: Vec<String> = rule
                .metadata()
                .globs()
                .iter()
                .map(|g| format!("`{}`", g))
                .collect();
            format!("{}: {}", link, globs.join(", "))
        }
        UsageMode::OnRequest => match rule.metadata().description() {
            Some(description) => format!("{}: {}", link, description),
            None => link,
        },
        UsageMode::Always | UsageMode::Manual => link,
    }
}

/// Render the managed region body for `rules`.
///
/// Groups appear in display priority order and keep the resolved rule order
/// within each group; empty groups are left out.
pub fn render(shared_dir: &str, rules: &[RuleFile]) -> String {
    let mut out = String::from("# Project rules\n\n");
    out.push_str(&format!(
        "Generated by rulekit. Edit the source rules, not this section. Full rule text lives in `{}/`.\n",
        shared_dir
    ));

    if rules.is_empty() {
        out.push_str("\nNo rules are configured.");
        return out;
    }

    for mode in UsageMode::ALL {
        let entries: Vec<String> = rules
            .iter()
            .filter(|rule| rule.usage_mode() == mode)
            .map(|rule| entry(shared_dir, rule))
            .collect();
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("\n## {}\n\n", heading(mode)));
        out.push_str(&entries.join("\n"));
        out.push('\n');
    }

    // The block writer supplies the newline before the closing marker
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rulekit_meta::RuleOrigin;

    fn rule(name: &str, content: &str) -> RuleFile {
        RuleFile::new(name, content, format!("rules/{}.mdc", name), RuleOrigin::Local).unwrap()
    }

    #[test]
    fn test_groups_in_priority_order() {
        let rules = vec![
            rule("manual", "just text"),
            rule("sql", "---\ndescription: When writing SQL\n---\nUse CTEs."),
            rule("ts", "---\nglobs: [\"*.ts\", \"*.tsx\"]\n---\nNo any."),
            rule("style", "---\nalwaysApply: true\n---\nBe terse."),
        ];

        let expected = "\
# Project rules

Generated by rulekit. Edit the source rules, not this section. Full rule text lives in `.rulekit/`.

## Always applied

- [style](.rulekit/style.md)

## Applied to matching files

- [ts](.rulekit/ts.md): `*.ts`, `*.tsx`

## Available on request

- [sql](.rulekit/sql.md): When writing SQL

## Manual

- [manual](.rulekit/manual.md)";

        assert_eq!(render(".rulekit", &rules), expected);
    }

    #[test]
    fn test_empty_groups_are_omitted() {
        let rendered = render(".rulekit", &[rule("a", "body")]);
        assert!(rendered.contains("## Manual"));
        assert!(!rendered.contains("## Always applied"));
        assert!(!rendered.contains("## Available on request"));
    }

    #[test]
    fn test_no_rules_note() {
        let rendered = render(".rulekit", &[]);
        assert!(rendered.ends_with("No rules are configured."));
    }

    #[test]
    fn test_preset_rules_link_nested_path() {
        let preset = RuleFile::new(
            "lint",
            "body",
            "p/rules/lint.mdc",
            RuleOrigin::Preset {
                name: "@acme/rules".to_string(),
            },
        )
        .unwrap();
        assert_eq!(body_path(".rulekit", &preset), ".rulekit/@acme/rules/lint.md");
    }
}
