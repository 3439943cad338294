use std::collections::HashMap;
use std::sync::Mutex;

use crate::repo::{ListError, RepoDescriptor, TreeLister, TreeListing};
use crate::transport::{HttpClient, HttpResponse, TransportError};

/// In-memory HTTP client. Unknown URLs fail with a transport error, the
/// way an unreachable host would.
#[derive(Default)]
pub struct FakeHttpClient {
    responses: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_owned());
        }

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError(format!("connection refused: {url}")))
    }
}

/// In-memory tree listing keyed by `owner/repo/branch`. Raw `(path, type)`
/// entries are filtered with [`RepoDescriptor::selects`] like the real lister.
#[derive(Default)]
pub struct FakeTreeLister {
    trees: HashMap<String, Vec<(String, String)>>,
    truncated: bool,
    calls: Mutex<Vec<RepoDescriptor>>,
}

impl FakeTreeLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(
        mut self,
        owner_repo_branch: impl Into<String>,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.trees.insert(
            owner_repo_branch.into(),
            entries
                .into_iter()
                .map(|(path, kind)| (path.to_owned(), kind.to_owned()))
                .collect(),
        );
        self
    }

    /// Report every listing as cut short by the host.
    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn calls(&self) -> Vec<RepoDescriptor> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl TreeLister for FakeTreeLister {
    async fn list_css_files(&self, repo: &RepoDescriptor) -> Result<TreeListing, ListError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(repo.clone());
        }

        let key = format!("{}/{}/{}", repo.owner, repo.repo, repo.branch);
        let entries = self.trees.get(&key).ok_or(ListError::Status(404))?;

        let paths = entries
            .iter()
            .filter(|(path, kind)| repo.selects(path, kind))
            .map(|(path, _)| path.clone())
            .collect();

        Ok(TreeListing {
            paths,
            truncated: self.truncated,
        })
    }
}
