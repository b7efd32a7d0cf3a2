use stackcheck::core::rules::{EntityMapping, RuleTable};
use stackcheck::core::validate::validate;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Lay down a project tree that satisfies every check in the battery.
fn write_passing_tree(root: &Path) {
    fs::create_dir_all(root.join("lib/resources")).unwrap();
    fs::create_dir_all(root.join("lib/components")).unwrap();
    fs::create_dir_all(root.join("workflows")).unwrap();
    fs::create_dir_all(root.join("config")).unwrap();

    fs::write(
        root.join("lib/resources/user.ex"),
        "defmodule MyApp.UserResource do\n  use Ash.Resource\n\n  attributes do\n  end\n\n  actions do\n  end\nend\n",
    )
    .unwrap();
    fs::write(
        root.join("lib/post_resource.ex"),
        "defmodule MyApp.PostResource do\n  use Ash.Resource\nend\n",
    )
    .unwrap();
    fs::write(
        root.join("lib/components/user_card.heex"),
        "<div class=\"user-card card bg-base-100\">\n  <button class=\"btn btn-primary\">Show</button>\n</div>\n",
    )
    .unwrap();
    fs::write(
        root.join("lib/components/post_card.heex"),
        "<div class=\"post-card card\"></div>\n",
    )
    .unwrap();
    fs::write(
        root.join("workflows/user_workflow.yaml"),
        "workflow: user_lifecycle\nsteps:\n  - create\n  - edit\n",
    )
    .unwrap();
    fs::write(
        root.join("workflows/post_workflow.yaml"),
        "workflow: post_lifecycle\nsteps: []\n",
    )
    .unwrap();
    // Three-plus verbatim palette values across the probed config files.
    fs::write(
        root.join("config/config.exs"),
        "config :my_app, :theme,\n  primary: \"hsl(222.2 47.4% 11.2%)\",\n  secondary: \"hsl(210 40% 96%)\",\n  neutral: \"hsl(215.4 16.3% 46.9%)\"\n",
    )
    .unwrap();
}

#[test]
fn passing_tree_passes_every_check() {
    let tmp = tempdir().unwrap();
    write_passing_tree(tmp.path());

    let report = validate(tmp.path(), &RuleTable::builtin()).unwrap();
    assert!(report.overall_passed, "issues: {:?}", report.issues);
    assert_eq!(report.checks.len(), 5);
    assert!(report.checks.iter().all(|c| c.passed));
    assert!(report.issues.is_empty());
    assert_eq!(
        report.summary_text,
        "All cross-artifact checks passed; project layers are in sync."
    );
}

#[test]
fn overall_status_is_and_of_check_statuses() {
    let tmp = tempdir().unwrap();
    write_passing_tree(tmp.path());
    // Knock out one artifact class only.
    fs::remove_file(tmp.path().join("lib/components/user_card.heex")).unwrap();

    let report = validate(tmp.path(), &RuleTable::builtin()).unwrap();
    assert_eq!(
        report.overall_passed,
        report.checks.iter().all(|c| c.passed)
    );
    assert!(!report.overall_passed);
}

#[test]
fn empty_tree_fails_with_expected_issues() {
    let tmp = tempdir().unwrap();
    let report = validate(tmp.path(), &RuleTable::builtin()).unwrap();

    assert!(!report.overall_passed);

    let by_name = |name: &str| report.checks.iter().find(|c| c.name == name).unwrap();
    // Two mappings, each missing a resource and a component identifier.
    assert_eq!(by_name("pattern_consistency").issues.len(), 4);
    assert!(!by_name("theme_synchronization").passed);
    // Built-in identifiers are well-formed and fully mapped.
    assert!(by_name("naming_convention").passed);
    assert!(by_name("component_mapping").passed);
    assert_eq!(
        by_name("workflow_integration").issues,
        vec!["no workflow files found"]
    );

    // Flat list concatenates failing checks in battery order.
    assert_eq!(report.issues.len(), 6);
    assert!(report.summary_text.starts_with("6 validation issue(s)"));
}

#[test]
fn missing_resource_yields_exactly_one_named_issue() {
    let tmp = tempdir().unwrap();
    write_passing_tree(tmp.path());
    fs::remove_file(tmp.path().join("lib/resources/user.ex")).unwrap();

    let report = validate(tmp.path(), &RuleTable::builtin()).unwrap();
    let named: Vec<&String> = report
        .issues
        .iter()
        .filter(|i| i.contains("'UserResource'"))
        .collect();
    assert_eq!(named.len(), 1);
    assert!(named[0].contains("resource"));

    // Restoring the declaration makes the battery pass again.
    fs::write(
        tmp.path().join("lib/resources/user.ex"),
        "defmodule MyApp.UserResource do\nend\n",
    )
    .unwrap();
    let report = validate(tmp.path(), &RuleTable::builtin()).unwrap();
    assert!(report.overall_passed);
}

#[test]
fn validate_is_idempotent_on_an_unchanged_tree() {
    let tmp = tempdir().unwrap();
    write_passing_tree(tmp.path());

    let rules = RuleTable::builtin();
    let first = validate(tmp.path(), &rules).unwrap();
    let second = validate(tmp.path(), &rules).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn invalid_root_is_a_fatal_invocation_error() {
    let err = validate(Path::new("/nonexistent/project"), &RuleTable::builtin());
    assert!(err.is_err());
}

#[test]
fn custom_rule_table_from_toml_drives_the_battery() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("project");
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(
        root.join("lib/order_resource.ex"),
        "defmodule Shop.OrderResource do\nend\n",
    )
    .unwrap();
    fs::write(
        root.join("lib/order.heex"),
        "<div class=\"order-card\"></div>\n",
    )
    .unwrap();
    fs::write(root.join("order_workflow.md"), "# Order workflow\n").unwrap();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(
        root.join("config/config.exs"),
        "brand: \"#111\" \"#222\" \"#333\"\n",
    )
    .unwrap();

    let rules_path = tmp.path().join("rules.toml");
    fs::write(
        &rules_path,
        r##"
[[mappings]]
logical_name = "order"
resource_id = "OrderResource"
component_id = "order-card"
workflow_id = "order_lifecycle"

[[palette]]
token_name = "ink"
token_value = "#111"

[[palette]]
token_name = "paper"
token_value = "#222"

[[palette]]
token_name = "brand"
token_value = "#333"
"##,
    )
    .unwrap();

    let rules = RuleTable::load(&rules_path).unwrap();
    let report = validate(&root, &rules).unwrap();
    assert!(report.overall_passed, "issues: {:?}", report.issues);
}

#[test]
fn naming_violations_flow_into_the_report() {
    let tmp = tempdir().unwrap();
    write_passing_tree(tmp.path());

    let mut rules = RuleTable::builtin();
    rules.mappings.push(EntityMapping {
        logical_name: "legacy".to_string(),
        resource_id: "legacy_resource".to_string(),
        component_id: "Legacy-Card".to_string(),
        workflow_id: "legacy_flow".to_string(),
    });

    let report = validate(tmp.path(), &rules).unwrap();
    assert!(!report.overall_passed);
    let naming = report
        .checks
        .iter()
        .find(|c| c.name == "naming_convention")
        .unwrap();
    assert_eq!(naming.issues.len(), 2);
    assert!(report.issues.iter().any(|i| i.contains("'legacy_resource'")));
}

#[test]
fn json_report_shape_is_stable() {
    let tmp = tempdir().unwrap();
    write_passing_tree(tmp.path());

    let report = validate(tmp.path(), &RuleTable::builtin()).unwrap();
    let value: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["overall_passed"], serde_json::json!(true));
    assert_eq!(value["checks"].as_array().unwrap().len(), 5);
    assert_eq!(value["checks"][0]["name"], "pattern_consistency");
    assert!(value["checks"][0]["metrics"]["resources_found"].is_u64());
    assert!(value["summary_text"].is_string());
}
