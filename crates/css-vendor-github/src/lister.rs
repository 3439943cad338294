use css_vendor::{ListError, RepoDescriptor, TreeLister, TreeListing};

use crate::client::USER_AGENT;
use crate::tree::TreeResponse;

/// Lists CSS files through GitHub's recursive Git Trees API.
///
/// Requests are unauthenticated and subject to the anonymous rate limit.
pub struct GitHubTreeLister {
    client: reqwest::Client,
    api_base_url: Option<String>,
}

impl GitHubTreeLister {
    pub fn new(api_base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url,
        }
    }

    fn api_base(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.github.com")
    }

    fn tree_url(&self, repo: &RepoDescriptor) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base(),
            repo.owner,
            repo.repo,
            repo.branch,
        )
    }
}

impl Default for GitHubTreeLister {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait::async_trait]
impl TreeLister for GitHubTreeLister {
    async fn list_css_files(&self, repo: &RepoDescriptor) -> Result<TreeListing, ListError> {
        let url = self.tree_url(repo);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| ListError::Network(e.to_string()))?;

        if response.status().as_u16() != 200 {
            return Err(ListError::Status(response.status().as_u16()));
        }

        let tree: TreeResponse = response
            .json()
            .await
            .map_err(|e| ListError::Parse(e.to_string()))?;

        if tree.truncated {
            tracing::debug!(repo = %repo, "tree response was truncated");
        }

        let paths: Vec<String> = tree
            .tree
            .into_iter()
            .filter(|entry| repo.selects(&entry.path, &entry.entry_type))
            .map(|entry| entry.path)
            .collect();

        tracing::debug!(repo = %repo, count = paths.len(), "listed css files");
        Ok(TreeListing {
            paths,
            truncated: tree.truncated,
        })
    }
}
