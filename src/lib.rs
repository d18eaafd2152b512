//! Outstanding PRs: list a team's open GitHub pull requests.
//!
//! Builds a GitHub search query from a default filter set, the target
//! organisation and authors, and command-line overrides. The query is run
//! against a [`Forge`], each hit is enriched with its head and base branch,
//! and the results are rendered by the binary as a table or JSON.

pub mod cli;
pub mod compose;
pub mod config;
pub mod filter;
pub mod search;
pub mod snapshot;
pub mod types;

pub use cli::{LogLevel, OutputFormat, RunSpec, parse_args, version_string};
pub use compose::{DefaultFilters, compose_predicates, compose_query, conflicting_facets};
pub use config::Config;
pub use filter::{Facet, FilterError, Predicate, PredicateSet, build_query};
pub use search::fetch_outstanding;
pub use snapshot::SnapshotForge;
pub use types::{
    Forge, IssueHit, PullRequest, PullRequestDetail, Repo, SearchPage, SearchRequest,
};
