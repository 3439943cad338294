use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::feedback::Feedback;
use crate::registry::SourceRegistry;
use crate::repo::{RepoDescriptor, TreeLister};
use crate::source::{SourceConfig, SyncMode};
use crate::transfer::{TransferError, copy_file, fetch_file};
use crate::transport::HttpClient;

/// Outcome of syncing one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub synced: u64,
    pub failed: u64,
    pub feedback: Vec<Feedback>,
}

impl SourceReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            synced: 0,
            failed: 0,
            feedback: Vec::new(),
        }
    }
}

/// Outcome of syncing every registered source, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub sources: Vec<SourceReport>,
}

impl SyncSummary {
    pub fn total(&self) -> u64 {
        self.sources.iter().map(|s| s.synced).sum()
    }

    /// Source name to number of files synced.
    pub fn counts(&self) -> Vec<(&str, u64)> {
        self.sources
            .iter()
            .map(|s| (s.name.as_str(), s.synced))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Closing line of a run, with the grand total.
    pub fn completion(&self) -> Feedback {
        Feedback::info(format!("Sync complete! Synced {} files.", self.total()))
    }
}

/// Opening line printed before a source is synced.
pub fn sync_header(name: &str) -> Feedback {
    Feedback::info(format!("Syncing {name}..."))
}

/// Mirrors registered sources into `output_dir/<source name>`.
pub struct Vendor {
    output_dir: PathBuf,
    registry: SourceRegistry,
    http: Arc<dyn HttpClient>,
    lister: Arc<dyn TreeLister>,
}

impl Vendor {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        registry: SourceRegistry,
        http: Arc<dyn HttpClient>,
        lister: Arc<dyn TreeLister>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            registry,
            http,
            lister,
        }
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Sync every source in registration order. A failing source only
    /// lowers its own count.
    pub async fn sync_all(&self) -> SyncSummary {
        let mut summary = SyncSummary::default();
        for name in self.registry.names() {
            summary.sources.push(self.sync_source(name).await);
        }
        summary
    }

    /// Sync one source. Unknown names yield an empty report and touch
    /// nothing on disk.
    pub async fn sync_source(&self, name: &str) -> SourceReport {
        let mut report = SourceReport::new(name);

        let Some(source) = self.registry.get(name) else {
            report
                .feedback
                .push(Feedback::error(format!("Unknown source: {name}")));
            return report;
        };

        let source_dir = self.output_dir.join(&source.name);
        if let Err(e) = std::fs::create_dir_all(&source_dir) {
            report.feedback.push(Feedback::error(format!(
                "Could not create {}: {e}",
                source_dir.display()
            )));
            return report;
        }

        tracing::debug!(source = name, mode = %source.mode(), "syncing source");

        match source.mode() {
            SyncMode::LocalDir(local_dir) => {
                self.copy_listed(source, local_dir, &source_dir, &mut report)
            }
            SyncMode::AutoPull(repo) => {
                self.auto_pull(source, repo, &source_dir, &mut report).await
            }
            SyncMode::Explicit => self.fetch_listed(source, &source_dir, &mut report).await,
        }

        report
    }

    fn copy_listed(
        &self,
        source: &SourceConfig,
        local_dir: &Path,
        source_dir: &Path,
        report: &mut SourceReport,
    ) {
        for relative in source.listed_paths() {
            let dest = source_dir.join(&relative);
            let result = copy_file(&local_dir.join(&relative), &dest);
            self.record(report, "Copied", &dest, result);
        }
    }

    async fn fetch_listed(
        &self,
        source: &SourceConfig,
        source_dir: &Path,
        report: &mut SourceReport,
    ) {
        for relative in source.listed_paths() {
            self.fetch_one(source, &relative, source_dir, report).await;
        }
    }

    async fn auto_pull(
        &self,
        source: &SourceConfig,
        descriptor: &str,
        source_dir: &Path,
        report: &mut SourceReport,
    ) {
        report.feedback.push(Feedback::info(format!(
            "Auto-pulling files from GitHub repository: {descriptor}"
        )));

        let repo = match RepoDescriptor::parse(descriptor) {
            Ok(repo) => repo,
            Err(e) => {
                report.feedback.push(Feedback::error(e.to_string()));
                return;
            }
        };

        let listing = match self.lister.list_css_files(&repo).await {
            Ok(listing) => listing,
            Err(e) => {
                report.feedback.push(Feedback::error(format!(
                    "Failed to fetch GitHub repository files: {e}"
                )));
                return;
            }
        };

        if listing.truncated {
            report.feedback.push(Feedback::warning(format!(
                "GitHub truncated the tree of {repo}; some files may be missing"
            )));
        }

        // Duplicate targets are simply fetched again and overwritten.
        for path in &listing.paths {
            let relative = repo.strip_sub_path(path);
            self.fetch_one(source, relative, source_dir, report).await;
        }
    }

    async fn fetch_one(
        &self,
        source: &SourceConfig,
        relative: &str,
        source_dir: &Path,
        report: &mut SourceReport,
    ) {
        let output = source_dir.join(relative);
        let result = match &source.base_url {
            Some(base) => {
                let url = format!("{}/{relative}", base.trim_end_matches('/'));
                fetch_file(self.http.as_ref(), &url, &output).await
            }
            None => Err(TransferError::NoBaseUrl(relative.to_owned())),
        };
        self.record(report, "Fetched", &output, result);
    }

    fn record(
        &self,
        report: &mut SourceReport,
        verb: &str,
        output: &Path,
        result: Result<(), TransferError>,
    ) {
        match result {
            Ok(()) => {
                report.synced += 1;
                let shown = output.strip_prefix(&self.output_dir).unwrap_or(output);
                report
                    .feedback
                    .push(Feedback::success(format!("{verb} {}", shown.display())));
            }
            Err(e) => {
                report.failed += 1;
                tracing::debug!(source = %report.name, error = %e, "transfer failed");
                report.feedback.push(Feedback::error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::test_support::{FakeHttpClient, FakeTreeLister};
    use crate::transport::HttpResponse;

    use super::*;

    fn vendor_with(
        root: &Path,
        sources: Vec<SourceConfig>,
        http: Arc<FakeHttpClient>,
        lister: Arc<FakeTreeLister>,
    ) -> Vendor {
        Vendor::new(root, sources.into_iter().collect(), http, lister)
    }

    #[tokio::test]
    async fn unknown_source_returns_zero_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("css");
        let http = Arc::new(FakeHttpClient::new());
        let vendor = vendor_with(&root, vec![], http.clone(), Arc::new(FakeTreeLister::new()));

        let report = vendor.sync_source("ghost").await;

        assert_eq!(report.synced, 0);
        assert_eq!(report.feedback, vec![Feedback::error("Unknown source: ghost")]);
        assert!(!root.exists());
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn explicit_mode_fetches_files_then_directories() {
        let dir = tempfile::tempdir().unwrap();
        let base = "https://unpkg.com/open-props";
        let http = Arc::new(
            FakeHttpClient::new()
                .with(format!("{base}/index.css"), HttpResponse::ok("index"))
                .with(format!("{base}/css/sizes/media.css"), HttpResponse::ok("media"))
                .with(format!("{base}/utilities.css"), HttpResponse::status(500)),
        );
        let source = SourceConfig::remote("ui/opbeta", base)
            .with_files(["index.css", "utilities.css"])
            .with_directory("css/sizes", ["media.css", "gone.css"]);
        let vendor = vendor_with(dir.path(), vec![source], http.clone(), Arc::default());

        let report = vendor.sync_source("ui/opbeta").await;

        assert_eq!(report.synced, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(
            http.requests(),
            vec![
                format!("{base}/index.css"),
                format!("{base}/utilities.css"),
                format!("{base}/css/sizes/media.css"),
                format!("{base}/css/sizes/gone.css"),
            ]
        );
        let out = dir.path().join("ui/opbeta");
        assert_eq!(fs::read_to_string(out.join("index.css")).unwrap(), "index");
        assert_eq!(fs::read_to_string(out.join("css/sizes/media.css")).unwrap(), "media");
        assert!(!out.join("utilities.css").exists());
        assert!(report.feedback.contains(&Feedback::success(format!(
            "Fetched {}",
            Path::new("ui/opbeta").join("index.css").display()
        ))));
    }

    #[tokio::test]
    async fn local_mode_copies_without_network_even_with_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("custom-src");
        fs::create_dir_all(local.join("layouts")).unwrap();
        fs::write(local.join("layout.css"), "layout").unwrap();
        fs::write(local.join("layouts/grid.css"), "grid").unwrap();

        let mut source = SourceConfig::local("custom", &local)
            .with_files(["layout.css", "utils.css"])
            .with_directory("layouts", ["grid.css"])
            .with_auto_pull("o/r/main");
        source.base_url = Some("https://example.com".into());

        let root = dir.path().join("css");
        let http = Arc::new(FakeHttpClient::new());
        let lister = Arc::new(FakeTreeLister::new());
        let vendor = vendor_with(&root, vec![source], http.clone(), lister.clone());

        let report = vendor.sync_source("custom").await;

        assert_eq!(report.synced, 2);
        assert_eq!(report.failed, 1);
        assert!(http.requests().is_empty());
        assert!(lister.calls().is_empty());
        assert_eq!(
            fs::read_to_string(root.join("custom/layouts/grid.css")).unwrap(),
            "grid"
        );
        assert!(report.feedback.iter().any(|f| f.is_error()
            && f.message().contains("utils.css")));
    }

    #[tokio::test]
    async fn auto_pull_strips_sub_path_and_ignores_lists() {
        let dir = tempfile::tempdir().unwrap();
        let base = "https://raw.githubusercontent.com/o/r/main/sub/dir";
        let http = Arc::new(
            FakeHttpClient::new()
                .with(format!("{base}/a.css"), HttpResponse::ok("a"))
                .with(format!("{base}/nested/b.css"), HttpResponse::ok("b")),
        );
        let lister = Arc::new(FakeTreeLister::new().with_entries(
            "o/r/main",
            [
                ("sub/dir/a.css", "blob"),
                ("sub/dir/nested/b.css", "blob"),
                ("sub/dir/nested", "tree"),
                ("sub/dir/a.css.bak", "blob"),
                ("other/c.css", "blob"),
            ],
        ));
        let source = SourceConfig::remote("ui", base)
            .with_files(["ignored.css"])
            .with_auto_pull("o/r/main/sub/dir");
        let vendor = vendor_with(dir.path(), vec![source], http.clone(), lister);

        let report = vendor.sync_source("ui").await;

        assert_eq!(report.synced, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(
            http.requests(),
            vec![format!("{base}/a.css"), format!("{base}/nested/b.css")]
        );
        assert_eq!(fs::read_to_string(dir.path().join("ui/nested/b.css")).unwrap(), "b");
    }

    #[tokio::test]
    async fn truncated_listing_warns_and_still_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(FakeHttpClient::new().with("https://base/a.css", HttpResponse::ok("a")));
        let lister = Arc::new(
            FakeTreeLister::new()
                .with_entries("o/r/main", [("a.css", "blob")])
                .truncated(),
        );
        let source = SourceConfig::remote("ui", "https://base").with_auto_pull("o/r/main");
        let vendor = vendor_with(dir.path(), vec![source], http, lister);

        let report = vendor.sync_source("ui").await;

        assert_eq!(report.synced, 1);
        assert!(report.feedback.iter().any(|f| f.is_warning()
            && f.message().contains("truncated the tree of o/r@main")));
    }

    #[tokio::test]
    async fn local_source_onto_itself_fails_without_erasing() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("custom");
        fs::create_dir_all(&local).unwrap();
        fs::write(local.join("layout.css"), ".layout{}").unwrap();

        let source = SourceConfig::local("custom", &local).with_files(["layout.css"]);
        let vendor = vendor_with(dir.path(), vec![source], Arc::default(), Arc::default());

        let report = vendor.sync_source("custom").await;

        assert_eq!((report.synced, report.failed), (0, 1));
        assert_eq!(fs::read_to_string(local.join("layout.css")).unwrap(), ".layout{}");
        assert!(report.feedback.iter().any(|f| f.is_error()
            && f.message().starts_with("Source and destination are the same file")));
    }

    #[tokio::test]
    async fn auto_pull_keeps_paths_outside_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(FakeHttpClient::new());
        let lister = Arc::new(
            FakeTreeLister::new().with_entries("o/r/main", [("subtle/a.css", "blob")]),
        );
        // The "sub" filter is a plain prefix match, the strip needs "sub/".
        let source = SourceConfig::remote("ui", "https://base").with_auto_pull("o/r/main/sub");
        let vendor = vendor_with(dir.path(), vec![source], http.clone(), lister);

        vendor.sync_source("ui").await;

        assert_eq!(http.requests(), vec!["https://base/subtle/a.css"]);
    }

    #[tokio::test]
    async fn invalid_descriptor_reports_and_fetches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(FakeHttpClient::new());
        let source = SourceConfig::remote("ui", "https://base").with_auto_pull("owner/repo");
        let vendor = vendor_with(dir.path(), vec![source], http.clone(), Arc::default());

        let report = vendor.sync_source("ui").await;

        assert_eq!(report.synced, 0);
        assert!(report.feedback.contains(&Feedback::error(
            "Invalid GitHub repository path: owner/repo"
        )));
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn listing_failure_yields_zero() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceConfig::remote("ui", "https://base").with_auto_pull("o/missing/main");
        let vendor = vendor_with(dir.path(), vec![source], Arc::default(), Arc::default());

        let report = vendor.sync_source("ui").await;

        assert_eq!(report.synced, 0);
        assert!(report.feedback.iter().any(|f| f.is_error()
            && f.message().starts_with("Failed to fetch GitHub repository files")));
    }

    #[tokio::test]
    async fn missing_base_url_fails_each_listed_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = SourceConfig::remote("bare", "unused").with_files(["a.css", "b.css"]);
        source.base_url = None;
        let http = Arc::new(FakeHttpClient::new());
        let vendor = vendor_with(dir.path(), vec![source], http.clone(), Arc::default());

        let report = vendor.sync_source("bare").await;

        assert_eq!((report.synced, report.failed), (0, 2));
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn sync_all_isolates_failures_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(
            FakeHttpClient::new()
                .with("https://good/a.css", HttpResponse::ok("a"))
                .with("https://good/b.css", HttpResponse::ok("b")),
        );
        let sources = vec![
            SourceConfig::remote("broken", "https://bad").with_files(["x.css"]),
            SourceConfig::remote("good", "https://good").with_files(["a.css", "b.css"]),
        ];
        let vendor = vendor_with(dir.path(), sources, http, Arc::default());

        let summary = vendor.sync_all().await;

        assert_eq!(summary.counts(), vec![("broken", 0), ("good", 2)]);
        assert_eq!(summary.total(), 2);
        assert_eq!(
            summary.completion(),
            Feedback::info("Sync complete! Synced 2 files.")
        );
        assert_eq!(sync_header("broken"), Feedback::info("Syncing broken..."));
    }

    #[tokio::test]
    async fn sync_all_on_empty_registry_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("css");
        let http = Arc::new(FakeHttpClient::new());
        let vendor = vendor_with(&root, vec![], http.clone(), Arc::default());

        let summary = vendor.sync_all().await;

        assert!(summary.counts().is_empty());
        assert_eq!(summary.total(), 0);
        assert!(!root.exists());
        assert!(http.requests().is_empty());
    }
}
