use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .keyscanrc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".keyscanrc.json").exists());

    let content = test.read_file(".keyscanrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "./src");
    assert_eq!(parsed["extensions"], serde_json::json!(["cc"]));
    assert_eq!(parsed["lookahead"], 1024);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyscanrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: .keyscanrc.json already exists
    ");
    assert_eq!(test.read_file(".keyscanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_usable_by_scan() -> Result<()> {
    let test = CliTest::with_file(
        "src/mode.cc",
        r#"keys.register_key ("m", "mode.next", "Next", [&] (Key) {});"#,
    )?;

    test.command().arg("init").output()?;
    let output = test.scan_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "## keys from: ./src/mode.cc\nmode.next=m\t # Next\n\n"
    );

    Ok(())
}
