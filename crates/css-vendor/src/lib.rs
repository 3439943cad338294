pub mod feedback;
pub mod imports;
pub mod registry;
pub mod repo;
pub mod source;
pub mod structure;
pub mod transfer;
pub mod transport;
pub mod vendor;

pub use feedback::Feedback;
pub use imports::{ImportCheck, ImportReport, ValidateError, extract_imports, validate_imports};
pub use registry::SourceRegistry;
pub use repo::{ListError, RepoDescriptor, RepoError, TreeLister, TreeListing};
pub use source::{DirectoryFiles, SourceConfig, SyncMode};
pub use structure::{CssStructure, DirGroup, EntryPoint, analyze_css_structure};
pub use transfer::{TransferError, copy_file, fetch_file};
pub use transport::{HttpClient, HttpResponse, TransportError};
pub use vendor::{SourceReport, SyncSummary, Vendor, sync_header};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
