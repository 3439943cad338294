use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use crate::transport::{HttpClient, TransportError};

/// Why a single file could not be brought into the vendor tree.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Failed to fetch {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("Error fetching {url}: {source}")]
    Transport {
        url: String,
        source: TransportError,
    },

    #[error("Source file does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("No base URL configured, cannot fetch {0}")]
    NoBaseUrl(String),

    #[error("Error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TransferError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// GET `url` and write the body to `output`, creating parent directories.
///
/// Only status 200 counts as success. Existing files are overwritten.
pub async fn fetch_file(
    client: &dyn HttpClient,
    url: &str,
    output: &Path,
) -> Result<(), TransferError> {
    let response = client
        .get(url)
        .await
        .map_err(|source| TransferError::Transport {
            url: url.to_owned(),
            source,
        })?;

    if response.status != 200 {
        return Err(TransferError::Status {
            url: url.to_owned(),
            status: response.status,
        });
    }

    ensure_parent(output)?;
    fs::write(output, response.body).map_err(|e| TransferError::io(output, e))?;

    tracing::debug!(url, path = %output.display(), "fetched");
    Ok(())
}

/// Copy `source` to `dest` with permissions and timestamps, creating
/// parent directories.
pub fn copy_file(source: &Path, dest: &Path) -> Result<(), TransferError> {
    if !source.is_file() {
        return Err(TransferError::MissingSource(source.to_owned()));
    }
    if is_same_file(source, dest) {
        return Err(TransferError::SameFile(source.to_owned()));
    }

    ensure_parent(dest)?;
    fs::copy(source, dest).map_err(|e| TransferError::io(dest, e))?;

    let metadata = fs::metadata(source).map_err(|e| TransferError::io(source, e))?;
    if let Err(e) = copy_times(&metadata, dest) {
        tracing::warn!(path = %dest.display(), error = %e, "could not preserve timestamps");
    }

    tracing::debug!(from = %source.display(), to = %dest.display(), "copied");
    Ok(())
}

fn copy_times(metadata: &fs::Metadata, dest: &Path) -> std::io::Result<()> {
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    File::options().write(true).open(dest)?.set_times(times)
}

// `fs::copy` truncates the destination before reading the source.
fn is_same_file(source: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn ensure_parent(path: &Path) -> Result<(), TransferError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| TransferError::io(parent, e))
        }
        _ => Ok(()),
    }
}
