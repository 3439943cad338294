use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Files to transfer inside one directory of a source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryFiles {
    /// Directory relative to the source root, e.g. `css/sizes`.
    pub path: String,
    pub files: Vec<String>,
}

/// Where a group of CSS files comes from and how to bring it local.
///
/// `name` doubles as the output subdirectory under the vendor root and may
/// be nested (`ui/opbeta`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    #[serde(default)]
    pub auto_pull: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<PathBuf>,
    // Kept last: serializes as an array of tables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<DirectoryFiles>,
}

/// The transfer strategy a source resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode<'a> {
    /// Copy from a local directory; never touches the network.
    LocalDir(&'a Path),
    /// Discover every CSS file from a GitHub tree listing.
    AutoPull(&'a str),
    /// Fetch the enumerated `files` and `directories`.
    Explicit,
}

impl std::fmt::Display for SyncMode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalDir(dir) => write!(f, "local copy from {}", dir.display()),
            Self::AutoPull(repo) => write!(f, "auto-pull from {repo}"),
            Self::Explicit => write!(f, "explicit file list"),
        }
    }
}

impl SourceConfig {
    /// A remote source fetched relative to `base_url`.
    pub fn remote(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: Some(base_url.into()),
            files: Vec::new(),
            directories: Vec::new(),
            auto_pull: false,
            github_repo: None,
            local_dir: None,
        }
    }

    /// A source copied from a directory on disk.
    pub fn local(name: impl Into<String>, local_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_url: None,
            files: Vec::new(),
            directories: Vec::new(),
            auto_pull: false,
            github_repo: None,
            local_dir: Some(local_dir.into()),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_directory<I, S>(mut self, path: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories.push(DirectoryFiles {
            path: path.into(),
            files: files.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Enable auto-pull from a `owner/repo/branch[/sub/path]` descriptor.
    pub fn with_auto_pull(mut self, github_repo: impl Into<String>) -> Self {
        self.auto_pull = true;
        self.github_repo = Some(github_repo.into());
        self
    }

    /// Resolve the active mode: local dir, then auto-pull, then explicit lists.
    ///
    /// `auto_pull` without a `github_repo` falls back to the explicit lists.
    pub fn mode(&self) -> SyncMode<'_> {
        if let Some(dir) = &self.local_dir {
            return SyncMode::LocalDir(dir);
        }

        match (&self.github_repo, self.auto_pull) {
            (Some(repo), true) => SyncMode::AutoPull(repo),
            _ => SyncMode::Explicit,
        }
    }

    /// Relative paths implied by `files` followed by every `directories` entry,
    /// in configuration order.
    pub fn listed_paths(&self) -> Vec<String> {
        let nested = self
            .directories
            .iter()
            .flat_map(|dir| dir.files.iter().map(move |file| format!("{}/{file}", dir.path)));

        self.files.iter().cloned().chain(nested).collect()
    }
}
