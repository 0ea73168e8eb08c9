use anyhow::Result;

use crate::{CliTest, RP_PT_BR, catalog, mosaic_catalog};

#[test]
fn test_check_rp_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "share/translations/terralib_mod_qt_plugins_rp_pt_br.ts",
        RP_PT_BR,
    )?;

    let output = test.run(&["check"])?;

    // Only warnings, so the run still succeeds.
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains(
        "warning: \"The layer is not checked!\"  unfinished\n  \
         --> share/translations/terralib_mod_qt_plugins_rp_pt_br.ts:74:9"
    ));
    assert!(output.stdout.contains(
        "= note: in context te::qt::plugins::rp::RasterSlicingAction, draft: \"Aviso\""
    ));
    assert!(output.stdout.contains("6 problems (0 errors, 6 warnings)"));

    Ok(())
}

#[test]
fn test_check_clean_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "app_pt_BR.ts",
        &catalog(
            "pt_BR",
            "<context>\n    <name>Main</name>\n    <message>\n        <source>Warning</source>\n        <translation>Aviso</translation>\n    </message>\n</context>\n",
        ),
    )?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "\u{2713} Checked 1 catalog file - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_check_duplicates_fail() -> Result<()> {
    let test = CliTest::with_file(
        "app_pt_BR.ts",
        &catalog(
            "pt_BR",
            "<context>\n    <name>Main</name>\n    <message>\n        <source>Open</source>\n        <translation>Abrir</translation>\n    </message>\n    <message>\n        <source>Open</source>\n        <translation>Abre</translation>\n    </message>\n</context>\n<context>\n    <name>Main</name>\n    <message>\n        <source>Close</source>\n        <translation>Fechar</translation>\n    </message>\n</context>\n",
        ),
    )?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"Open\"  duplicate-message"));
    assert!(output.stdout.contains("  --> app_pt_BR.ts:11:9"));
    assert!(output.stdout.contains("error: \"Main\"  duplicate-context"));
    assert!(output.stdout.contains("2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_check_single_rule() -> Result<()> {
    let test = CliTest::with_file("rp.ts", RP_PT_BR)?;

    let output = test.run(&["check", "--rule", "obsolete"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_check_fail_on_warnings() -> Result<()> {
    let test = CliTest::with_file("rp.ts", RP_PT_BR)?;
    test.write_file(".tsctlrc.json", r#"{ "failOnWarnings": true }"#)?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(1));

    Ok(())
}

#[test]
fn test_check_disabled_rule() -> Result<()> {
    let test = CliTest::with_file("rp.ts", RP_PT_BR)?;
    test.write_file(
        ".tsctlrc.json",
        r#"{ "disabledRules": ["unfinished"], "failOnWarnings": true }"#,
    )?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_check_language_mismatch() -> Result<()> {
    let test = CliTest::with_file("rp.ts", RP_PT_BR)?;
    test.write_file(".tsctlrc.json", r#"{ "language": "es" }"#)?;

    let output = test.run(&["check", "--rule", "language-mismatch"])?;

    assert!(output.stdout.contains("warning: \"pt_BR\"  language-mismatch"));
    assert!(output.stdout.contains("= note: expected language es, found pt_BR"));

    Ok(())
}

#[test]
fn test_check_parse_error() -> Result<()> {
    let test = CliTest::with_file("broken.ts", "<TS version=\"2.1\">\n<context>\n")?;
    test.write_file("rp.ts", RP_PT_BR)?;

    let output = test.run(&["check", "--rule", "obsolete"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("parse-error"));
    assert!(output.stdout.contains("--> broken.ts"));
    assert!(output.stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_check_explicit_path() -> Result<()> {
    let test = CliTest::with_file("broken.ts", "not xml at all")?;
    test.write_file("i18n/rp.ts", RP_PT_BR)?;

    let output = test.run(&["check", "--rule", "obsolete", "i18n/rp.ts"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 catalog file"));

    Ok(())
}

#[test]
fn test_check_missing_path() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["check", "nope.ts"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Path not found"));

    Ok(())
}

#[test]
fn test_check_length_variants_are_translated() -> Result<()> {
    let test = CliTest::with_file("mosaic_pt_BR.ts", &mosaic_catalog())?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "\u{2713} Checked 1 catalog file - no issues found\n"
    );

    Ok(())
}
