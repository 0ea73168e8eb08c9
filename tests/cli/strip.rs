use anyhow::Result;

use crate::{CliTest, RP_PT_BR, mosaic_catalog};

#[test]
fn test_strip_dry_run() -> Result<()> {
    let test = CliTest::with_file("rp_pt_br.ts", RP_PT_BR)?;

    let output = test.run(&["strip"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("  rp_pt_br.ts: 34 location hint(s)"));
    assert!(output.stdout.contains("Would remove 34 location hint(s) in 1 file(s)."));
    assert_eq!(test.read_file("rp_pt_br.ts")?, RP_PT_BR);

    Ok(())
}

#[test]
fn test_strip_apply_only_removes_locations() -> Result<()> {
    let test = CliTest::with_file("rp_pt_br.ts", RP_PT_BR)?;

    let output = test.run(&["strip", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Removed 34 location hint(s) in 1 file(s)."));

    let stripped = test.read_file("rp_pt_br.ts")?;
    let expected: String = RP_PT_BR
        .lines()
        .filter(|line| !line.trim_start().starts_with("<location "))
        .map(|line| format!("{}\n", line))
        .collect();
    assert_eq!(stripped, expected);

    // Nothing left to strip.
    let output = test.run(&["strip"])?;
    assert!(output.stdout.contains("No location hints found"));

    Ok(())
}

#[test]
fn test_strip_apply_keeps_length_variants_and_extras() -> Result<()> {
    let test = CliTest::with_file("mosaic.ts", &mosaic_catalog())?;

    let output = test.run(&["strip", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Removed 1 location hint(s) in 1 file(s)."));

    let stripped = test.read_file("mosaic.ts")?;
    assert!(!stripped.contains("<location "));
    assert!(stripped.contains("<lengthvariant>Mosaico longo</lengthvariant>"));
    assert!(stripped.contains("<lengthvariant>Mos.</lengthvariant>"));
    assert!(stripped.contains("        <extra-po-flags>c-format</extra-po-flags>\n"));
    assert!(stripped.contains("<dependency catalog=\"qtbase_pt_BR\"/>"));

    Ok(())
}
