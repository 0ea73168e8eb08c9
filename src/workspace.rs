//! Catalog discovery and loading.
//!
//! A [`Workspace`] is built once per command:
//!
//! 1. Load `.tsctlrc.json` (searching upward from the working directory)
//! 2. Resolve the files to operate on: explicit paths from the command line,
//!    or every `*.ts` under the configured translations root
//! 3. Parse all catalogs in parallel with rayon
//!
//! Files that fail to parse do not abort the run; they are kept as
//! [`ParseErrorIssue`]s and reported alongside the other issues.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::{
    catalog::{self, Catalog, SourceMap},
    config::{Config, load_config},
    issues::{CatalogLocation, ParseErrorIssue},
    scanner::{IgnoreSet, is_catalog_file, scan_catalog_files},
    utils::line_at,
};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub translations_root: Option<PathBuf>,
    pub paths: Vec<PathBuf>,
}

/// A parsed catalog together with the text it was parsed from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub path: PathBuf,
    /// Path as shown in reports, relative to the working directory when possible.
    pub display_path: String,
    pub content: String,
    pub catalog: Catalog,
    pub source_map: SourceMap,
    /// First line holding content the writer would drop, if any.
    pub lossy_line: Option<usize>,
}

impl LoadedCatalog {
    pub fn from_content(
        path: PathBuf,
        display_path: String,
        content: String,
    ) -> Result<Self, ParseErrorIssue> {
        match catalog::parse_str(&content) {
            Ok(parsed) => Ok(Self {
                path,
                display_path,
                content,
                catalog: parsed.catalog,
                source_map: parsed.source_map,
                lossy_line: parsed.lossy_line,
            }),
            Err(err) => Err(ParseErrorIssue {
                file_path: display_path,
                line: err.line(),
                error: err.to_string(),
            }),
        }
    }

    /// Issue location for a line of this file.
    pub fn location(&self, line: usize) -> CatalogLocation {
        CatalogLocation::new(
            self.display_path.clone(),
            line,
            line_at(&self.content, line).unwrap_or_default(),
        )
    }

    pub fn context_location(&self, context: usize) -> CatalogLocation {
        let location = self.location(self.source_map.context_line(context));
        match self.catalog.contexts.get(context) {
            Some(ctx) => location.in_context(ctx.name.clone()),
            None => location,
        }
    }

    pub fn message_location(&self, context: usize, message: usize) -> CatalogLocation {
        let location = self.location(self.source_map.message_line(context, message));
        match self.catalog.contexts.get(context) {
            Some(ctx) => location.in_context(ctx.name.clone()),
            None => location,
        }
    }

    /// The catalog in canonical layout.
    pub fn serialized(&self) -> String {
        catalog::to_string(&self.catalog)
    }

    /// True if the file on disk already matches the canonical layout.
    pub fn is_formatted(&self) -> bool {
        self.serialized() == self.content
    }

    /// Fails if writing this catalog back would lose content from the file.
    pub fn ensure_rewritable(&self) -> Result<()> {
        if let Some(line) = self.lossy_line {
            bail!(
                "Refusing to rewrite {}: line {} holds content tsctl cannot preserve",
                self.display_path,
                line
            );
        }
        Ok(())
    }

    /// Write the (possibly modified) catalog back to its file.
    pub fn save(&self) -> Result<()> {
        self.ensure_rewritable()?;
        catalog::write_file(&self.path, &self.catalog)
    }
}

pub struct Workspace {
    pub config: Config,
    pub catalogs: Vec<LoadedCatalog>,
    pub parse_errors: Vec<ParseErrorIssue>,
    /// Paths skipped because they could not be read during discovery.
    pub skipped_count: usize,
}

impl Workspace {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::load_from(&cwd, overrides)
    }

    pub fn load_from(cwd: &Path, overrides: &Overrides) -> Result<Self> {
        let config_result = load_config(cwd)?;
        if !config_result.from_file {
            tracing::debug!("No .tsctlrc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(root) = &overrides.translations_root {
            config.translations_root = root.to_string_lossy().to_string();
        }

        let base_dir = if overrides.translations_root.is_some() {
            cwd.to_path_buf()
        } else {
            config_result.base_dir
        };
        let ignores = IgnoreSet::new(&base_dir, &config.ignores);

        let (files, skipped_count) = if overrides.paths.is_empty() {
            let root = resolve(&base_dir, Path::new(&config.translations_root));
            if !root.is_dir() {
                bail!("Translations root not found: {}", root.display());
            }
            let scan = scan_catalog_files(&root, &ignores);
            (scan.files, scan.skipped_count)
        } else {
            collect_paths(cwd, &overrides.paths, &ignores)?
        };

        if skipped_count > 0 {
            tracing::warn!("{} path(s) skipped due to access errors", skipped_count);
        }
        tracing::debug!("Loading {} catalog file(s)", files.len());

        let results: Vec<Result<LoadedCatalog, ParseErrorIssue>> = files
            .into_par_iter()
            .map(|path| load_catalog(cwd, path))
            .collect();

        let mut catalogs = Vec::new();
        let mut parse_errors = Vec::new();
        for result in results {
            match result {
                Ok(catalog) => catalogs.push(catalog),
                Err(err) => {
                    tracing::debug!("{}: {}", err.file_path, err.error);
                    parse_errors.push(err);
                }
            }
        }

        Ok(Self {
            config,
            catalogs,
            parse_errors,
            skipped_count,
        })
    }

    /// Number of files found, parsed or not.
    pub fn file_count(&self) -> usize {
        self.catalogs.len() + self.parse_errors.len()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn collect_paths(
    cwd: &Path,
    paths: &[PathBuf],
    ignores: &IgnoreSet,
) -> Result<(BTreeSet<PathBuf>, usize)> {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;
    for path in paths {
        let path = resolve(cwd, path);
        if path.is_dir() {
            let scan = scan_catalog_files(&path, ignores);
            files.extend(scan.files);
            skipped_count += scan.skipped_count;
        } else if path.is_file() {
            if !is_catalog_file(&path) {
                tracing::warn!("{} does not have a .ts extension", path.display());
            }
            files.insert(path);
        } else {
            bail!("Path not found: {}", path.display());
        }
    }
    Ok((files, skipped_count))
}

fn load_catalog(cwd: &Path, path: PathBuf) -> Result<LoadedCatalog, ParseErrorIssue> {
    let display_path = display_path(cwd, &path);
    match fs::read_to_string(&path) {
        Ok(content) => LoadedCatalog::from_content(path, display_path, content),
        Err(err) => Err(ParseErrorIssue {
            file_path: display_path,
            line: None,
            error: format!("failed to read file: {}", err),
        }),
    }
}

fn display_path(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
