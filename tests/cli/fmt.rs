use anyhow::Result;

use crate::{CliTest, RP_PT_BR, mosaic_catalog};

const MESSY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS><TS version="2.1" language="pt_BR">
  <context><name>Main</name>
    <message>
      <source>Open</source>
      <translation type="unfinished"/>
    </message>
  </context>
</TS>"#;

const FORMATTED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="pt_BR">
<context>
    <name>Main</name>
    <message>
        <source>Open</source>
        <translation type="unfinished"></translation>
    </message>
</context>
</TS>
"#;

#[test]
fn test_fmt_lupdate_output_is_untouched() -> Result<()> {
    let test = CliTest::with_file("rp_pt_br.ts", RP_PT_BR)?;

    let output = test.run(&["fmt", "--check"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("1 catalog file already formatted"));
    assert_eq!(test.read_file("rp_pt_br.ts")?, RP_PT_BR);

    Ok(())
}

#[test]
fn test_fmt_check_reports_without_writing() -> Result<()> {
    let test = CliTest::with_file("main.ts", MESSY)?;

    let output = test.run(&["fmt", "--check"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("Would reformat main.ts"));
    assert_eq!(test.read_file("main.ts")?, MESSY);

    Ok(())
}

#[test]
fn test_fmt_rewrites_file() -> Result<()> {
    let test = CliTest::with_file("main.ts", MESSY)?;

    let output = test.run(&["fmt"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Formatted main.ts"));
    assert_eq!(test.read_file("main.ts")?, FORMATTED);

    // Second run has nothing to do.
    let output = test.run(&["fmt", "--check"])?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_fmt_keeps_length_variants_and_extras() -> Result<()> {
    let test = CliTest::with_file("mosaic.ts", &mosaic_catalog())?;

    let output = test.run(&["fmt"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Formatted mosaic.ts"));

    let formatted = test.read_file("mosaic.ts")?;
    assert!(formatted.contains(
        "        <translation variants=\"yes\">\n\
         \x20           <lengthvariant>Mosaico longo</lengthvariant>\n\
         \x20           <lengthvariant>Mos.</lengthvariant>\n\
         \x20       </translation>\n\
         \x20       <extra-po-flags>c-format</extra-po-flags>\n"
    ));
    assert!(formatted.contains("<TS version=\"2.1\" language=\"pt_BR\">\n<dependencies>\n"));
    assert!(formatted.contains("<dependency catalog=\"qtbase_pt_BR\"/>"));

    let output = test.run(&["fmt", "--check"])?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_fmt_refuses_file_it_cannot_preserve() -> Result<()> {
    let commented = MESSY.replace(
        "    <message>",
        "    <!-- reviewed by QA -->\n    <message>",
    );
    let test = CliTest::with_file("main.ts", &commented)?;
    test.write_file("other.ts", MESSY)?;

    let output = test.run(&["fmt"])?;

    assert_eq!(output.code, Some(2));
    assert!(
        output
            .stderr
            .contains("Refusing to rewrite main.ts: line 4 holds content tsctl cannot preserve")
    );
    assert_eq!(test.read_file("main.ts")?, commented);
    // Nothing is written when any file would lose content.
    assert_eq!(test.read_file("other.ts")?, MESSY);

    Ok(())
}
