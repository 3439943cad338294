pub mod client;
pub mod lister;
pub mod tree;

pub use client::ReqwestClient;
pub use lister::GitHubTreeLister;
