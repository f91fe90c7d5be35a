//! GitHub data access: REST client and the aggregated repository snapshot.

mod client;
pub mod types;

pub use client::{language_shares, last_page_from_link, GithubClient};
pub use types::RepoData;
