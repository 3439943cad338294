use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::imports::{ImportReport, ValidateError, validate_imports};

const ENTRY_STYLESHEET: &str = "main.css";

/// The directory a CSS file sits in, relative to the analyzed root.
///
/// Files directly under the root get their own variant so they never merge
/// with a real subdirectory, even one called `root`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DirGroup {
    Root,
    Dir(String),
}

impl std::fmt::Display for DirGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => write!(f, "(root)"),
            Self::Dir(dir) => write!(f, "{dir}"),
        }
    }
}

/// A `main.css` found during analysis and the outcome of validating it.
#[derive(Debug)]
pub struct EntryPoint {
    pub stylesheet: PathBuf,
    /// A stylesheet that cannot be read fails alone; the scan goes on.
    pub validation: Result<ImportReport, ValidateError>,
}

impl EntryPoint {
    pub fn all_valid(&self) -> bool {
        self.validation.as_ref().is_ok_and(ImportReport::all_valid)
    }
}

/// Result of scanning a vendored CSS tree.
#[derive(Debug)]
pub struct CssStructure {
    pub css_dir: PathBuf,
    /// Relative file paths (with `/` separators) grouped by parent directory.
    pub groups: BTreeMap<DirGroup, Vec<String>>,
    /// Import validation of every `main.css`, using `css_dir` as the base.
    pub entry_points: Vec<EntryPoint>,
}

impl CssStructure {
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Group every `*.css` under `css_dir` by directory and validate each
/// `main.css` found.
pub fn analyze_css_structure(css_dir: &Path) -> Result<CssStructure, ValidateError> {
    if !css_dir.exists() {
        return Err(ValidateError::DirectoryNotFound(css_dir.to_owned()));
    }

    let files = css_files(css_dir)?;

    let mut groups: BTreeMap<DirGroup, Vec<String>> = BTreeMap::new();
    let mut entry_points = Vec::new();

    for file in &files {
        let relative = file.strip_prefix(css_dir).unwrap_or(file);
        let group = match relative.parent().map(slash_path) {
            Some(parent) if !parent.is_empty() => DirGroup::Dir(parent),
            _ => DirGroup::Root,
        };
        groups.entry(group).or_default().push(slash_path(relative));

        if file.file_name().is_some_and(|name| name == ENTRY_STYLESHEET) {
            let validation = validate_imports(file, css_dir);
            if let Err(e) = &validation {
                tracing::debug!(path = %file.display(), error = %e, "entry point not validated");
            }
            entry_points.push(EntryPoint {
                stylesheet: file.clone(),
                validation,
            });
        }
    }

    for files in groups.values_mut() {
        files.sort();
    }

    Ok(CssStructure {
        css_dir: css_dir.to_owned(),
        groups,
        entry_points,
    })
}

fn css_files(css_dir: &Path) -> Result<Vec<PathBuf>, ValidateError> {
    let root = glob::Pattern::escape(&css_dir.to_string_lossy());
    let pattern = format!("{root}/**/*.css");

    let entries = glob::glob(&pattern).map_err(|e| ValidateError::Pattern(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "skipping unreadable path"),
        }
    }
    files.sort();
    Ok(files)
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
