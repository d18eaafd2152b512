use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::types::{Forge, PullRequest, Repo, SearchRequest};

pub const PAGE_SIZE: u32 = 20;
pub const SEARCH_SORT: &str = "created-desc";

/// Upper bound on pages fetched for a single query.
pub const MAX_PAGES: u32 = 50;

/// Runs `query` against the forge and enriches every hit with its
/// pull-request detail.
///
/// Pages are fetched one after another until the forge reports no further
/// page. Results keep the order the forge returned them in.
pub async fn fetch_outstanding<F>(forge: &F, query: &str) -> Result<Vec<PullRequest>>
where
    F: Forge + Sync,
{
    let mut request = SearchRequest {
        query: query.to_string(),
        sort: SEARCH_SORT.to_string(),
        page: 1,
        per_page: PAGE_SIZE,
    };
    let mut prs = Vec::new();
    let mut page_count = 0;

    loop {
        page_count += 1;
        let page = forge.search_issues(&request).await?;
        debug!(page = request.page, hits = page.items.len(), "fetched search page");

        for hit in page.items {
            let (repo, _) = Repo::parse_pull_url(&hit.html_url)?;
            let detail = forge
                .pull_request(&repo, hit.number)
                .await
                .with_context(|| format!("unable to get github pr {}#{}", repo, hit.number))?;
            prs.push(PullRequest::from_parts(hit, detail));
        }

        let Some(next_page) = page.next_page else {
            break;
        };

        if next_page <= request.page {
            warn!(
                current = request.page,
                next = next_page,
                "search pagination did not advance, stopping"
            );
            break;
        }

        if page_count >= MAX_PAGES {
            warn!(pages = page_count, "reached page limit, results are incomplete");
            break;
        }

        request.page = next_page;
    }

    Ok(prs)
}
