#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use lintbridge_core::{BridgeConfig, BufferSnapshot};
use serde_json::Value;
use tower_lsp::lsp_types::Url;

/// Output for a `no-unused-vars` problem on line 11 with a fix at 120..124.
pub const UNUSED_VAR_OUTPUT: &str = r#"[{"filePath":"/project/src/index.js","messages":[{"ruleId":"no-unused-vars","severity":2,"message":"'a' is assigned a value but never used.","line":11,"column":1,"endLine":11,"endColumn":5,"fix":{"range":[120,124],"text":""}}],"errorCount":1,"warningCount":0}]"#;

/// Writes an executable shell script standing in for the linter.
pub fn write_linter(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-eslint");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A linter that swallows its input and prints `output`.
pub fn linter_printing(dir: &Path, output: &str) -> PathBuf {
    write_linter(
        dir,
        &format!("cat > /dev/null\ncat <<'EOF'\n{}\nEOF", output),
    )
}

pub fn config_for(linter: &Path) -> BridgeConfig {
    BridgeConfig {
        linter_bin: linter.display().to_string(),
        ..BridgeConfig::default()
    }
}

/// Ten 11-character comment lines followed by `var a = 1;` on line 10.
pub fn unused_var_buffer() -> BufferSnapshot {
    let mut text: String = (1..=10).map(|i| format!("// line {:03}\n", i)).collect();
    text.push_str("var a = 1;\nconsole.log('done');\n");

    BufferSnapshot::new(
        Url::parse("file:///project/src/index.js").unwrap(),
        "javascript",
        "/project/src/index.js",
        &text,
        10,
    )
    .with_version(4)
}

pub fn titles(response: &Value) -> Vec<String> {
    response
        .as_array()
        .unwrap()
        .iter()
        .map(|action| action["title"].as_str().unwrap().to_string())
        .collect()
}

/// The single edit carried by a synthesized action.
pub fn edit_of(action: &Value) -> &Value {
    &action["command"]["arguments"][0]["documentChanges"][0]["edits"][0]
}
