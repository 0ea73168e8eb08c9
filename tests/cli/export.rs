use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, RP_PT_BR};

#[test]
fn test_export_json() -> Result<()> {
    let test = CliTest::with_file("rp_pt_br.ts", RP_PT_BR)?;

    let output = test.run(&["export"])?;

    assert_eq!(output.code, Some(0));
    let parsed: Value = serde_json::from_str(&output.stdout).context("Output should be JSON")?;
    let catalogs = parsed.as_array().context("Output should be an array")?;
    assert_eq!(catalogs.len(), 1);

    let rp = &catalogs[0];
    assert_eq!(rp["file"], "rp_pt_br.ts");
    assert_eq!(rp["language"], "pt_BR");
    assert_eq!(rp["contexts"].as_array().map(Vec::len), Some(15));

    let first = &rp["contexts"][0];
    assert_eq!(first["name"], "te::qt::plugins::rp::ArithmeticOpAction");
    assert_eq!(first["messages"][0]["source"], "Arithmetic Operations...");

    Ok(())
}

#[test]
fn test_export_pretty() -> Result<()> {
    let test = CliTest::with_file("rp_pt_br.ts", RP_PT_BR)?;

    let output = test.run(&["export", "--pretty"])?;

    assert!(output.stdout.starts_with("[\n  {\n    \"file\": \"rp_pt_br.ts\""));

    Ok(())
}

#[test]
fn test_export_with_broken_file_is_still_json() -> Result<()> {
    let test = CliTest::with_file("rp_pt_br.ts", RP_PT_BR)?;
    test.write_file("broken.ts", "<TS version=\"2.1\">\n<context>\n")?;

    let output = test.run(&["export"])?;

    assert_eq!(output.code, Some(1));
    let parsed: Value =
        serde_json::from_str(&output.stdout).context("stdout should hold only JSON")?;
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert!(output.stderr.contains("parse-error"));
    assert!(output.stderr.contains("--> broken.ts"));

    Ok(())
}
