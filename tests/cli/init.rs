use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, RP_PT_BR};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["translationsRoot"], "./");
    assert_eq!(parsed["ignores"], Value::Array(Vec::new()));
    assert_eq!(parsed["disabledRules"], Value::Array(Vec::new()));
    assert_eq!(parsed["failOnWarnings"], false);

    // 2-space indentation
    assert!(content.contains("\n  \"ignores\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .tsctlrc.json"));
    assert!(test.root().join(".tsctlrc.json").exists());

    let content = test.read_file(".tsctlrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tsctlrc.json", "{}")?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains(".tsctlrc.json already exists"));
    assert_eq!(test.read_file(".tsctlrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.run(&["init"])?;
    test.write_file("share/translations/rp_pt_br.ts", RP_PT_BR)?;

    let output = test.run(&["check"])?;
    assert_eq!(
        output.code,
        Some(0),
        "Check command should work with initialized config. stderr: {}",
        output.stderr
    );

    Ok(())
}
