use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    owner: String,
    name: String,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            anyhow::bail!("Repository owner and name must not be empty");
        }
        Ok(Self { owner, name })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses `https://github.com/<owner>/<repo>/pull/<number>`.
    pub fn parse_pull_url(url_str: &str) -> Result<(Self, u64)> {
        let url = url::Url::parse(url_str)
            .with_context(|| format!("Failed to parse URL: '{}'", url_str))?;

        let segments: Vec<&str> = url
            .path_segments()
            .context("Cannot parse URL path")?
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() != 4 || segments[2] != "pull" {
            anyhow::bail!(
                "URL must be in format https://github.com/owner/repo/pull/123, got: '{}'",
                url_str
            );
        }

        let number: u64 = segments[3]
            .parse()
            .with_context(|| format!("Invalid PR number in URL: '{}'", url_str))?;

        Ok((Self::new(segments[0], segments[1])?, number))
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One issue-search hit. GitHub search treats pull requests as issues.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueHit {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Pull-request fields the search API does not return.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestDetail {
    pub head: String,
    pub base: String,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub sort: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<IssueHit>,
    pub next_page: Option<u32>,
}

/// An outstanding pull request, as rendered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PullRequest {
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub author: String,
    pub head: String,
    pub base: String,
    pub link: String,
    pub draft: bool,
}

impl PullRequest {
    pub fn from_parts(hit: IssueHit, detail: PullRequestDetail) -> Self {
        Self {
            created_at: hit.created_at,
            title: hit.title,
            author: hit.author,
            head: detail.head,
            base: detail.base,
            link: hit.html_url,
            draft: detail.draft,
        }
    }
}

/// Source of search results and pull-request detail.
#[async_trait]
pub trait Forge {
    async fn search_issues(&self, request: &SearchRequest) -> Result<SearchPage>;

    async fn pull_request(&self, repo: &Repo, number: u64) -> Result<PullRequestDetail>;
}
