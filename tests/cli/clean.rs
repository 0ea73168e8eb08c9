use anyhow::Result;

use crate::{CliTest, catalog};

fn stale_catalog() -> String {
    catalog(
        "pt_BR",
        "<context>\n    <name>FilterAction</name>\n    <message>\n        <source>Filter...</source>\n        <translation>Filtragem...</translation>\n    </message>\n    <message>\n        <source>Smooth</source>\n        <translation type=\"obsolete\">Suavizar</translation>\n    </message>\n</context>\n<context>\n    <name>GoneAction</name>\n    <message>\n        <source>Gone</source>\n        <translation type=\"vanished\">Sumiu</translation>\n    </message>\n</context>\n",
    )
}

#[test]
fn test_clean_dry_run() -> Result<()> {
    let test = CliTest::with_file("app_pt_BR.ts", &stale_catalog())?;

    let output = test.run(&["clean"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("app_pt_BR.ts\n"));
    assert!(output.stdout.contains("  - FilterAction: \"Smooth\" (obsolete)"));
    assert!(output.stdout.contains("  - GoneAction: \"Gone\" (vanished)"));
    assert!(output.stdout.contains("Would delete 2 message(s) in 1 file(s)."));
    assert_eq!(test.read_file("app_pt_BR.ts")?, stale_catalog());

    Ok(())
}

#[test]
fn test_clean_apply() -> Result<()> {
    let test = CliTest::with_file("app_pt_BR.ts", &stale_catalog())?;

    let output = test.run(&["clean", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Deleted 2 message(s) in 1 file(s)."));
    assert_eq!(
        test.read_file("app_pt_BR.ts")?,
        catalog(
            "pt_BR",
            "<context>\n    <name>FilterAction</name>\n    <message>\n        <source>Filter...</source>\n        <translation>Filtragem...</translation>\n    </message>\n</context>\n",
        )
    );

    Ok(())
}

#[test]
fn test_clean_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file(
        "app_pt_BR.ts",
        &catalog(
            "pt_BR",
            "<context>\n    <name>Main</name>\n    <message>\n        <source>Open</source>\n        <translation>Abrir</translation>\n    </message>\n</context>\n",
        ),
    )?;

    let output = test.run(&["clean", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("No obsolete messages found"));

    Ok(())
}
