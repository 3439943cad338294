use std::sync::Arc;

/// Errors parsing a `owner/repo/branch[/sub/path]` descriptor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("Invalid GitHub repository path: {0}")]
    Invalid(String),
}

/// Errors listing a repository tree.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),
}

/// A parsed GitHub repository descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Segments after the branch joined by `/`; empty when absent.
    pub sub_path: String,
}

impl RepoDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self, RepoError> {
        let parts: Vec<&str> = descriptor.split('/').collect();
        if parts.len() < 3 {
            return Err(RepoError::Invalid(descriptor.to_owned()));
        }

        Ok(Self {
            owner: parts[0].to_owned(),
            repo: parts[1].to_owned(),
            branch: parts[2].to_owned(),
            sub_path: parts[3..].join("/"),
        })
    }

    /// Whether a tree entry belongs in an auto-pull listing: a blob whose
    /// path ends in `.css` and starts with the sub-path filter.
    pub fn selects(&self, path: &str, entry_type: &str) -> bool {
        entry_type == "blob"
            && path.ends_with(".css")
            && (self.sub_path.is_empty() || path.starts_with(&self.sub_path))
    }

    /// Path relative to the sub-path, or the full path when it lies outside.
    pub fn strip_sub_path<'a>(&self, path: &'a str) -> &'a str {
        if self.sub_path.is_empty() {
            return path;
        }

        let prefix = format!("{}/", self.sub_path);
        path.strip_prefix(&prefix).unwrap_or(path)
    }
}

impl std::fmt::Display for RepoDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)?;
        if !self.sub_path.is_empty() {
            write!(f, ":{}", self.sub_path)?;
        }
        Ok(())
    }
}

/// CSS files found in a repository tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeListing {
    /// Repository-relative paths in tree order.
    pub paths: Vec<String>,
    /// The host cut the tree short; `paths` may be incomplete.
    pub truncated: bool,
}

/// Lists the CSS files of a repository, already filtered with
/// [`RepoDescriptor::selects`].
#[async_trait::async_trait]
pub trait TreeLister: Send + Sync {
    async fn list_css_files(&self, repo: &RepoDescriptor) -> Result<TreeListing, ListError>;
}

#[async_trait::async_trait]
impl<T: TreeLister + ?Sized> TreeLister for Arc<T> {
    async fn list_css_files(&self, repo: &RepoDescriptor) -> Result<TreeListing, ListError> {
        (**self).list_css_files(repo).await
    }
}
