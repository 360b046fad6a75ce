//! GitHub REST client and the sequential fetch batch.

use crate::model::{MetaError, Post, PostType, RepoKey, RepoMeta, RepoMetaCache};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("cardflow/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause after each successful request.
pub const FETCH_DELAY: Duration = Duration::from_millis(200);

/// Anything that can produce metadata for a repository.
#[async_trait]
pub trait RepoMetaSource: Send + Sync {
    /// Fetch metadata for one repository.
    async fn fetch(&self, key: &RepoKey) -> Result<RepoMeta, MetaError>;
}

/// Client for `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubClient {
    /// Build a client, sending `token` as a bearer token when non-blank.
    pub fn new(token: Option<String>) -> Result<Self, MetaError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_base: GITHUB_API_BASE.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Client authenticated with `GITHUB_TOKEN` when it is set.
    pub fn from_env() -> Result<Self, MetaError> {
        Self::new(std::env::var("GITHUB_TOKEN").ok())
    }

    /// Point the client at another API root (GitHub Enterprise, test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint for `key` under the configured API base.
    pub fn repo_url(&self, key: &RepoKey) -> String {
        format!("{}/repos/{}/{}", self.api_base, key.owner(), key.repo())
    }
}

#[async_trait]
impl RepoMetaSource for GithubClient {
    async fn fetch(&self, key: &RepoKey) -> Result<RepoMeta, MetaError> {
        let mut request = self
            .client
            .get(self.repo_url(key))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetaError::Api {
                status: status.as_u16(),
                repo: key.to_string(),
            });
        }

        let meta: RepoMeta = response.json().await?;
        debug!(repo = %key, stars = meta.stargazers_count, "Fetched repository metadata");
        Ok(meta)
    }
}

/// Distinct repositories referenced by github posts, in post order.
///
/// Posts of other types and urls that are not `github.com/owner/repo` are
/// skipped.
pub fn github_repo_keys(posts: &[Post]) -> Vec<RepoKey> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .filter(|post| post.post_type() == PostType::Github)
        .filter_map(|post| post.meta().url.as_deref().and_then(RepoKey::from_url))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Progress notification for callers that echo the batch to a console.
#[derive(Debug)]
pub enum FetchProgress<'a> {
    /// A request for this repository is about to be sent.
    Started(&'a RepoKey),
    /// The request failed and the repository is skipped.
    Failed(&'a RepoKey, &'a MetaError),
}

/// Outcome of a fetch batch.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Metadata of every repository fetched successfully.
    pub cache: RepoMetaCache,
    /// Repositories that could not be fetched, with the reason.
    pub failed: Vec<(RepoKey, String)>,
}

impl FetchReport {
    /// Number of repositories fetched.
    pub fn fetched(&self) -> usize {
        self.cache.len()
    }
}

/// Fetch metadata for every github post, one request at a time.
///
/// Failures are logged and skipped; the batch itself never fails.
pub async fn fetch_repo_meta<F>(
    source: &dyn RepoMetaSource,
    posts: &[Post],
    delay: Duration,
    mut on_progress: F,
) -> FetchReport
where
    F: FnMut(FetchProgress<'_>),
{
    let keys = github_repo_keys(posts);
    info!(repos = keys.len(), "Fetching repository metadata");

    let mut report = FetchReport::default();
    for key in &keys {
        on_progress(FetchProgress::Started(key));
        match source.fetch(key).await {
            Ok(meta) => {
                report.cache.insert(key, meta);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(err) => {
                warn!(repo = %key, error = %err, "Failed to fetch repository metadata");
                on_progress(FetchProgress::Failed(key, &err));
                report.failed.push((key.clone(), err.to_string()));
            }
        }
    }

    info!(
        fetched = report.fetched(),
        failed = report.failed.len(),
        "Repository metadata fetch complete"
    );
    report
}
