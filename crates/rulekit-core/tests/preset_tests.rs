//! Preset loading tests: lookup, nesting, cycles and precedence.

use pretty_assertions::assert_eq;
use rulekit_core::{Error, ResolvedConfig, resolve};
use rulekit_meta::{McpServerEntry, RuleOrigin};
use rulekit_test_utils::TestProject;
use serde_json::json;

fn resolved(project: &TestProject) -> ResolvedConfig {
    resolve(project.root()).unwrap().unwrap()
}

fn command_of(entry: &McpServerEntry) -> &str {
    match entry {
        McpServerEntry::Command(server) => &server.command,
        other => panic!("expected command server, got {:?}", other),
    }
}

#[test]
fn test_first_preset_wins_shared_rule() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["./one", "./two"]}))
        .config_in("one", json!({"rulesDir": "rules"}))
        .rule("one/rules/shared.mdc", "from one")
        .config_in("two", json!({"rulesDir": "rules"}))
        .rule("two/rules/shared.mdc", "from two");

    let config = resolved(&project);
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].content, "from one");
}

#[test]
fn test_package_preset_from_node_modules() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["@acme/rules"]}))
        .config_in("node_modules/@acme/rules", json!({"rulesDir": "src"}))
        .rule("node_modules/@acme/rules/src/lint.mdc", "lint");

    let config = resolved(&project);
    assert_eq!(config.rules[0].name, "lint");
    assert_eq!(
        config.rules[0].origin,
        RuleOrigin::Preset {
            name: "@acme/rules".to_string()
        }
    );
    assert_eq!(config.rules[0].output_stem(), "@acme/rules/lint");
}

#[test]
fn test_preset_config_file_reference() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["shared/custom.json"]}))
        .file("shared/custom.json", r#"{"rulesDir": "r"}"#)
        .rule("shared/r/a.mdc", "a");

    assert_eq!(resolved(&project).rules[0].name, "a");
}

#[test]
fn test_nested_presets_depth_first() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["./outer", "./sibling"]}))
        .config_in("outer", json!({"rulesDir": "rules", "presets": ["../inner"]}))
        .rule("outer/rules/outer.mdc", "o")
        .config_in("inner", json!({"rulesDir": "rules"}))
        .rule("inner/rules/inner.mdc", "i")
        .config_in("sibling", json!({"rulesDir": "rules"}))
        .rule("sibling/rules/sibling.mdc", "s");

    let names: Vec<_> = resolved(&project)
        .rules
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["outer", "inner", "sibling"]);
}

#[test]
fn test_circular_presets_load_once() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["./a"]}))
        .config_in("a", json!({"rulesDir": "rules", "presets": ["../b"]}))
        .rule("a/rules/from-a.mdc", "a")
        .config_in("b", json!({"rulesDir": "rules", "presets": ["../a"]}))
        .rule("b/rules/from-b.mdc", "b");

    let names: Vec<_> = resolved(&project)
        .rules
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(names, vec!["from-a", "from-b"]);
}

#[test]
fn test_preset_own_servers_win_over_nested() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["./outer", "./later"]}))
        .config_in(
            "outer",
            json!({
                "rulesDir": "rules",
                "presets": ["../inner"],
                "mcpServers": {"x": {"command": "outer.sh"}, "gone": false}
            }),
        )
        .dir("outer/rules")
        .config_in(
            "inner",
            json!({
                "rulesDir": "rules",
                "mcpServers": {"x": {"command": "inner.sh"}, "gone": {"command": "g"}, "deep": {"command": "deep.sh"}}
            }),
        )
        .dir("inner/rules")
        .config_in(
            "later",
            json!({"rulesDir": "rules", "mcpServers": {"deep": {"command": "later.sh"}}}),
        )
        .dir("later/rules");

    let servers = resolved(&project).mcp_servers;
    assert_eq!(command_of(&servers["x"]), "outer.sh");
    assert_eq!(command_of(&servers["deep"]), "deep.sh");
    assert!(!servers.contains_key("gone"));
}

#[test]
fn test_preset_without_rules_dir_is_invalid() {
    let project = TestProject::new();
    project
        .config(json!({"presets": ["./bad"]}))
        .config_in("bad", json!({"rules": {"a": "a.mdc"}}));

    match resolve(project.root()).unwrap_err() {
        Error::PresetInvalid { reference, message } => {
            assert_eq!(reference, "./bad");
            assert!(message.contains("rulesDir"));
        }
        other => panic!("expected PresetInvalid, got {:?}", other),
    }
}

#[test]
fn test_unknown_preset_names_reference() {
    let project = TestProject::new();
    project.config(json!({"presets": ["@acme/missing"]}));

    let err = resolve(project.root()).unwrap_err();
    assert!(err.to_string().contains("@acme/missing"));
    assert!(matches!(err, Error::PresetNotFound { .. }));
}
