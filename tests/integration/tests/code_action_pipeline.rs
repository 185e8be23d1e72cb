//! End-to-end tests for the code action pipeline
//!
//! A shell script stands in for the linter so each case runs the real
//! process, decodes its output and synthesizes actions from it.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use lintbridge_core::{BridgeConfig, BufferSnapshot, CollectingSink, lint_actions};
use pretty_assertions::assert_eq;
use tower_lsp::lsp_types::Url;

/// Config pointing at a linter script that prints `output`.
fn fake_linter(dir: &Path, output: &str) -> BridgeConfig {
    let path = dir.join("fake-eslint");
    let script = format!("#!/bin/sh\ncat > /dev/null\ncat <<'EOF'\n{}\nEOF\n", output);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    BridgeConfig {
        linter_bin: path.display().to_string(),
        ..BridgeConfig::default()
    }
}

fn guard_buffer() -> BufferSnapshot {
    BufferSnapshot::new(
        Url::parse("file:///project/guard.ts").unwrap(),
        "typescript",
        "/project/guard.ts",
        "if (!key in obj) {}\n",
        0,
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn suggestions_precede_fix_and_share_one_disable_pair() {
    let dir = tempfile::tempdir().unwrap();
    let config = fake_linter(
        dir.path(),
        r#"[{"messages":[
            {"ruleId":"no-unsafe-negation","line":1,"column":5,"endLine":1,"endColumn":7,
             "suggestions":[
                {"desc":"Negate 'in' expression instead of its left operand.","fix":{"range":[4,14],"text":"!(key in obj)"}},
                {"desc":"Wrap negation in '()' to make the intention explicit.","fix":{"range":[4,8],"text":"(!key)"}}
             ]},
            {"ruleId":"no-unsafe-negation","line":1,"column":5,"fix":{"range":[4,8],"text":"(!key)"}}
        ]}]"#,
    );
    let sink = CollectingSink::new();

    let actions = lint_actions(&config, &guard_buffer(), &sink).await.unwrap();

    let titles: Vec<&str> = actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Negate 'in' expression instead of its left operand.",
            "Wrap negation in '()' to make the intention explicit.",
            "Disable ESLint rule no-unsafe-negation for this line",
            "Disable ESLint rule no-unsafe-negation for the entire file",
            "Apply suggested fix for no-unsafe-negation",
        ]
    );
    assert!(sink.messages().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn only_the_first_file_report_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let config = BridgeConfig {
        enable_disable_comments: false,
        ..fake_linter(
            dir.path(),
            r#"[
                {"filePath":"/project/guard.ts","messages":[
                    {"ruleId":"no-unsafe-negation","line":1,"column":5,"fix":{"range":[4,8],"text":"(!key)"}}
                ]},
                {"filePath":"/project/other.ts","messages":[
                    {"ruleId":"semi","line":1,"column":20,"fix":{"range":[19,19],"text":";"}}
                ]}
            ]"#,
        )
    };

    let actions = lint_actions(&config, &guard_buffer(), &CollectingSink::new())
        .await
        .unwrap();

    let titles: Vec<&str> = actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Apply suggested fix for no-unsafe-negation"]);
}
