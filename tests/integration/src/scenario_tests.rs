//! Scenario tests
//!
//! Each test builds a realistic project on disk, runs the full pipeline
//! (configuration, presets, targets) and checks the files an IDE would read.

use std::fs;

use pretty_assertions::assert_eq;
use rulekit_core::{InstallOptions, InstallReport, Project, resolve};
use rulekit_meta::{Ide, UsageMode};
use rulekit_test_utils::TestProject;
use serde_json::json;

fn install(project: &TestProject) -> InstallReport {
    Project::load(project.root())
        .unwrap()
        .expect("project has a configuration")
        .install(InstallOptions::default())
        .unwrap()
}

/// A team preset published to node_modules, pulling in a base preset.
fn team_preset(project: &TestProject) {
    project
        .package_json(
            "node_modules/@team/ai-rules",
            json!({"name": "@team/ai-rules", "version": "1.0.0"}),
        )
        .config_in(
            "node_modules/@team/ai-rules",
            json!({
                "rulesDir": "rules",
                "presets": ["@team/base"],
                "mcpServers": {"tracker": {"command": "npx", "args": ["tracker-mcp"]}}
            }),
        )
        .rule(
            "node_modules/@team/ai-rules/rules/review.mdc",
            "---\ndescription: Code review checklist\n---\nCheck tests.\n",
        )
        .rule(
            "node_modules/@team/ai-rules/rules/testing/unit.mdc",
            "---\nglobs: [\"**/*.test.ts\"]\n---\nOne assertion per test.\n",
        )
        .config_in(
            "node_modules/@team/base",
            json!({
                "rulesDir": "rules",
                "mcpServers": {
                    "tracker": {"command": "old-tracker"},
                    "search": {"url": "https://search.example/mcp"}
                }
            }),
        )
        .rule(
            "node_modules/@team/base/rules/tone.mdc",
            "---\nalwaysApply: true\n---\nBe direct.\n",
        )
        .rule("node_modules/@team/base/rules/review.mdc", "shadowed");
}

#[test]
fn scenario_project_with_npm_presets_and_all_targets() {
    let project = TestProject::new();
    team_preset(&project);
    project
        .config(json!({
            "rulesDir": ".ai/rules",
            "targets": ["cursor", "windsurf", "codex", "claude"],
            "presets": ["@team/ai-rules"],
            "overrides": {"testing/unit": false},
            "mcpServers": {"search": false, "local-db": {"command": "./db-mcp", "env": {"DB": "dev"}}}
        }))
        .rule(".ai/rules/architecture.mdc", "---\nalwaysApply: true\n---\nHexagonal.\n")
        .file("AGENTS.md", "# Agents\n\nHand-written intro.\n")
        .file(
            ".cursor/mcp.json",
            r#"{"mcpServers": {"personal": {"command": "my-tool"}}}"#,
        );

    let report = install(&project);
    assert!(report.is_success());

    // Resolved view
    let resolved = resolve(project.root()).unwrap().unwrap();
    let names: Vec<_> = resolved.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["architecture", "review", "tone"]);
    assert_eq!(resolved.rules[1].usage_mode(), UsageMode::OnRequest);
    let servers: Vec<_> = resolved.mcp_servers.keys().map(String::as_str).collect();
    assert_eq!(servers, vec!["local-db", "tracker"]);

    // Cursor: full documents, preset rules namespaced
    assert_eq!(
        project.read(".cursor/rules/rulekit/@team/ai-rules/review.mdc"),
        "---\ndescription: Code review checklist\n---\nCheck tests.\n"
    );
    project.assert_file_exists(".cursor/rules/rulekit/@team/base/tone.mdc");
    project.assert_file_exists(".cursor/rules/rulekit/architecture.mdc");
    project.assert_file_not_exists(".cursor/rules/rulekit/@team/ai-rules/testing");

    let cursor_mcp = project.read_json(".cursor/mcp.json");
    assert_eq!(cursor_mcp["mcpServers"]["personal"], json!({"command": "my-tool"}));
    assert_eq!(
        cursor_mcp["mcpServers"]["tracker"],
        json!({"command": "npx", "args": ["tracker-mcp"], "rulekit": true})
    );
    assert_eq!(
        cursor_mcp["mcpServers"]["local-db"]["env"],
        json!({"DB": "dev"})
    );
    assert!(cursor_mcp["mcpServers"].get("search").is_none());

    // Manifest targets: bodies only, summary grouped by usage
    assert_eq!(project.read(".rulekit/@team/base/tone.md"), "Be direct.\n");
    let agents = project.read("AGENTS.md");
    assert!(agents.starts_with("# Agents\n\nHand-written intro.\n\n<!-- rulekit:block:rules -->"));
    let always = agents.find("## Always applied").unwrap();
    let on_request = agents.find("## Available on request").unwrap();
    assert!(always < on_request);
    assert!(agents.contains("- [review](.rulekit/@team/ai-rules/review.md): Code review checklist"));
    assert_eq!(project.read(".windsurfrules").matches("rulekit:block:rules").count(), 2);
    project.assert_file_exists(".mcp.json");
}

#[test]
fn scenario_config_change_converges() {
    let project = TestProject::new();
    project
        .config(json!({"rulesDir": "rules", "targets": ["cursor"], "mcpServers": {"a": {"command": "a"}}}))
        .rule("rules/one.mdc", "one")
        .rule("rules/two.mdc", "two");
    assert!(install(&project).is_success());

    project
        .config(json!({"rulesDir": "rules", "targets": ["cursor"], "overrides": {"two": false}}))
        .file(".cursor/mcp.json", &{
            let mut current = project.read_json(".cursor/mcp.json");
            current["mcpServers"]["mine"] = json!({"command": "mine"});
            serde_json::to_string_pretty(&current).unwrap()
        });
    assert!(install(&project).is_success());

    assert_eq!(project.list(".cursor/rules/rulekit"), vec!["one.mdc"]);
    assert_eq!(
        project.read_json(".cursor/mcp.json"),
        json!({"mcpServers": {"mine": {"command": "mine"}}})
    );
}

#[test]
fn scenario_monorepo_packages_are_isolated() {
    let project = TestProject::new();
    team_preset(&project);
    project
        .package_json(
            ".",
            json!({"private": true, "workspaces": ["apps/*", "libs/*"], "rulekit": {}}),
        )
        .package_json(
            "apps/web",
            json!({"name": "web", "rulekit": {"presets": ["@team/ai-rules"], "targets": ["claude"]}}),
        )
        .config_in("libs/core", json!({"rulesDir": "rules", "targets": ["codex"]}))
        .rule("libs/core/rules/api.mdc", "Keep the API small.")
        .config_in("libs/broken", json!({"rulesDir": "rules", "targets": ["vim"]}));

    let report = install(&project);

    let outcomes: Vec<(&str, bool)> = report
        .packages
        .iter()
        .map(|p| (p.relative_path.as_str(), p.result.is_ok()))
        .collect();
    assert_eq!(
        outcomes,
        vec![("apps/web", true), ("libs/broken", false), ("libs/core", true)]
    );

    // Presets resolve from the root node_modules for nested packages
    project.assert_file_contains("apps/web/CLAUDE.md", "[tone](.rulekit/@team/base/tone.md)");
    project.assert_file_exists("apps/web/.mcp.json");
    project.assert_file_contains("libs/core/AGENTS.md", "[api](.rulekit/api.md)");
    project.assert_file_not_exists("libs/broken/.cursor");
    project.assert_file_not_exists(".cursor");

    let broken = report.failures().next().unwrap();
    let message = broken.result.as_ref().unwrap_err().to_string();
    assert!(message.contains("vim"));
}

#[test]
fn scenario_targets_written_by_dispatcher() {
    let project = TestProject::new();
    project
        .config(json!({"rulesDir": "rules", "targets": ["codex", "windsurf"]}))
        .rule("rules/a.mdc", "a");

    let resolved = resolve(project.root()).unwrap().unwrap();
    assert_eq!(resolved.targets, vec![Ide::Codex, Ide::Windsurf]);

    let summary = rulekit_core::install_resolved(&resolved, InstallOptions::default()).unwrap();
    assert_eq!(summary.targets, vec![Ide::Codex, Ide::Windsurf]);
    project.assert_file_exists("AGENTS.md");
    project.assert_file_exists(".windsurfrules");
    assert!(!fs::exists(project.path(".cursor")).unwrap());
}
