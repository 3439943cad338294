use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::feedback::Feedback;

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+['"]([^'"]+)['"]"#).expect("import pattern is valid")
});

/// Errors from the import validator and directory analysis.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("Main CSS file {} does not exist", .0.display())]
    StylesheetNotFound(PathBuf),

    #[error("CSS directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid search pattern: {0}")]
    Pattern(String),
}

/// One `@import` target and where it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCheck {
    /// The path as written in the stylesheet.
    pub import: String,
    pub resolved: PathBuf,
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub stylesheet: PathBuf,
    pub checks: Vec<ImportCheck>,
}

impl ImportReport {
    pub fn all_valid(&self) -> bool {
        self.checks.iter().all(|c| c.exists)
    }

    /// Missing imports in stylesheet order, as originally written.
    pub fn missing(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.exists)
            .map(|c| c.import.as_str())
            .collect()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        let mut lines = vec![Feedback::info(format!(
            "Validating {} imports in {}...",
            self.checks.len(),
            self.stylesheet.display()
        ))];

        for check in &self.checks {
            if check.exists {
                lines.push(Feedback::success(format!("Found: {}", check.import)));
            } else {
                lines.push(Feedback::error(format!(
                    "Missing file: {} (expected at {})",
                    check.import,
                    check.resolved.display()
                )));
            }
        }

        let missing = self.missing().len();
        if missing == 0 {
            lines.push(Feedback::success("All imports are valid!"));
        } else {
            lines.push(Feedback::error(format!("{missing} missing files found.")));
        }
        lines
    }
}

/// Every quoted `@import` target in `css`, in order.
pub fn extract_imports(css: &str) -> Vec<String> {
    IMPORT_PATTERN
        .captures_iter(css)
        .map(|caps| caps[1].to_owned())
        .collect()
}

/// A leading `/` anchors the import at `base_dir`; anything else is
/// relative to the stylesheet's own directory.
pub fn resolve_import(import: &str, stylesheet: &Path, base_dir: &Path) -> PathBuf {
    match import.strip_prefix('/') {
        Some(rooted) => base_dir.join(rooted),
        None => stylesheet
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(import),
    }
}

/// Check that every `@import` in `stylesheet` points at an existing file.
/// All imports are checked, a miss does not stop the scan.
pub fn validate_imports(stylesheet: &Path, base_dir: &Path) -> Result<ImportReport, ValidateError> {
    if !stylesheet.exists() {
        return Err(ValidateError::StylesheetNotFound(stylesheet.to_owned()));
    }

    let content = std::fs::read_to_string(stylesheet).map_err(|source| ValidateError::Io {
        path: stylesheet.to_owned(),
        source,
    })?;

    let checks = extract_imports(&content)
        .into_iter()
        .map(|import| {
            let resolved = resolve_import(&import, stylesheet, base_dir);
            let exists = resolved.exists();
            ImportCheck {
                import,
                resolved,
                exists,
            }
        })
        .collect();

    Ok(ImportReport {
        stylesheet: stylesheet.to_owned(),
        checks,
    })
}
