//! A [`Forge`] backed by a JSON file of previously fetched results.
//!
//! The query is not interpreted: every entry in the file is a hit, served in
//! file order and paged by the request's page size.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{Forge, IssueHit, PullRequestDetail, Repo, SearchPage, SearchRequest};

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    items: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct SnapshotEntry {
    #[serde(flatten)]
    hit: IssueHit,
    #[serde(flatten)]
    detail: PullRequestDetail,
}

#[derive(Debug)]
pub struct SnapshotForge {
    entries: Vec<SnapshotEntry>,
}

impl SnapshotForge {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SnapshotFile =
            serde_json::from_str(json).context("Failed to parse search snapshot")?;
        Ok(Self { entries: file.items })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot '{}'", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid snapshot '{}'", path.display()))
    }
}

#[async_trait]
impl Forge for SnapshotForge {
    async fn search_issues(&self, request: &SearchRequest) -> Result<SearchPage> {
        if request.page == 0 || request.per_page == 0 {
            anyhow::bail!(
                "Invalid page request: page {} of size {}",
                request.page,
                request.per_page
            );
        }

        let per_page = request.per_page as usize;
        let start = (request.page as usize - 1).saturating_mul(per_page);
        let end = start.saturating_add(per_page).min(self.entries.len());

        let items = self
            .entries
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.hit.clone())
            .collect();
        let next_page = (end < self.entries.len()).then_some(request.page + 1);

        Ok(SearchPage { items, next_page })
    }

    async fn pull_request(&self, repo: &Repo, number: u64) -> Result<PullRequestDetail> {
        self.entries
            .iter()
            .find(|entry| {
                entry.hit.number == number
                    && Repo::parse_pull_url(&entry.hit.html_url)
                        .is_ok_and(|(entry_repo, _)| &entry_repo == repo)
            })
            .map(|entry| entry.detail.clone())
            .with_context(|| format!("Pull request {}#{} not found in snapshot", repo, number))
    }
}
