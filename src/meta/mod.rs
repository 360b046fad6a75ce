//! Repository metadata for github cards.
//!
//! `cardflow fetch-meta` walks the github posts, asks a [`RepoMetaSource`]
//! for each distinct repository, and writes the results to the JSON cache
//! that the gallery reads at startup.

pub mod github;

pub use github::{
    fetch_repo_meta, github_repo_keys, FetchProgress, FetchReport, GithubClient, RepoMetaSource,
    FETCH_DELAY, GITHUB_API_BASE,
};
