use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod clean;
mod export;
mod fmt;
mod init;
mod strip;

const BIN_NAME: &str = "tsctl";

/// The rp plugin catalog shipped with terralib, as written by lupdate.
pub const RP_PT_BR: &str =
    include_str!("../fixtures/terralib_mod_qt_plugins_rp_pt_br.ts");

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

/// Captured result of running the binary.
pub struct CliOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the project directory.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<CliOutput> {
        let output = self
            .command()
            .args(args)
            .output()
            .context("Failed to run tsctl")?;
        Ok(CliOutput {
            code: output.status.code(),
            stdout: String::from_utf8(output.stdout)?,
            stderr: String::from_utf8(output.stderr)?,
        })
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Build a small catalog from `<context>` bodies.
pub fn catalog(language: &str, contexts: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\" language=\"{}\">\n{}</TS>\n",
        language, contexts
    )
}

/// A catalog with length variants, a tool-specific message child and a
/// root `<dependencies>` element, all of which lupdate round-trips.
pub fn mosaic_catalog() -> String {
    catalog(
        "pt_BR",
        r#"<dependencies>
<dependency catalog="qtbase_pt_BR"/>
</dependencies>
<context>
    <name>MosaicWidget</name>
    <message>
        <location filename="../mosaic.cpp" line="42"/>
        <source>Mosaic</source>
        <translation variants="yes"><lengthvariant>Mosaico longo</lengthvariant><lengthvariant>Mos.</lengthvariant></translation>
        <extra-po-flags>c-format</extra-po-flags>
    </message>
</context>
"#,
    )
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&["--help"])?;

    assert_eq!(output.code, Some(0));
    for command in ["check", "stats", "fmt", "strip", "clean", "export", "init"] {
        assert!(
            output.stdout.contains(command),
            "help should list `{}`",
            command
        );
    }

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&[])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Usage"));

    Ok(())
}

#[test]
fn test_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tsctlrc.json", r#"{ "disabledRules": ["nope"] }"#)?;
    test.write_file("app_pt_BR.ts", RP_PT_BR)?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Unknown rule in 'disabledRules'"));

    Ok(())
}
