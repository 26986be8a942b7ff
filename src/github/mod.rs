//! GitHub-backed file access: the listing client, download validation and
//! the listing entry model.

mod client;
mod download;
mod entry;

pub use client::{GithubClient, Listing};
pub use download::DownloadRequest;
pub use entry::{parse_listing, EntryType, RepoEntry};
