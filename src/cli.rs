use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::filter::Predicate;

const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");
const BUILD_GIT_COMMIT: &str = env!("BUILD_GIT_COMMIT");

/// Package version joined with the commit it was built from.
pub fn version_string() -> String {
    format!("{}-{}", env!("CARGO_PKG_VERSION"), BUILD_GIT_COMMIT)
}

/// Minimum level of log output written to stderr.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug, Default)]
#[command(
    name = "outstanding-prs",
    about = "List outstanding GitHub pull requests for a set of users in an organisation"
)]
#[command(version, long_version = BUILD_INFO_HUMAN)]
struct CliArgs {
    /// Print output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Include PRs ready to merge. DEPRECATED: use --approved
    #[arg(long, hide = true)]
    pub all: bool,

    /// Include PRs ready to merge
    #[arg(long)]
    pub approved: bool,

    /// Include PRs that are in draft
    #[arg(long)]
    pub drafts: bool,

    /// Author login to search for (can specify multiple or comma-separated)
    #[arg(short = 'a', long = "author", value_name = "LOGIN", value_delimiter = ',')]
    pub authors: Vec<String>,

    /// GitHub organisation (overrides PRS_GITHUB_ORG)
    #[arg(long, value_name = "ORG")]
    pub org: Option<String>,

    /// Read search results from a JSON snapshot instead of printing the query
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Set log level
    #[arg(
        long = "log-level",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Info,
        value_name = "LEVEL"
    )]
    pub log_level: LogLevel,
}

/// Everything a run needs from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub authors: Vec<String>,
    pub org: Option<String>,
    pub include_approved: bool,
    pub include_drafts: bool,
    pub input: Option<PathBuf>,
    pub log_level: LogLevel,
    pub used_deprecated_all: bool,
}

impl RunSpec {
    /// Filters derived from flags, appended after the defaults.
    pub fn overrides(&self) -> Vec<Predicate> {
        vec![
            Predicate::include_approved(self.include_approved),
            Predicate::include_draft(self.include_drafts),
        ]
    }
}

fn build_run_spec(cli: CliArgs) -> (RunSpec, OutputFormat) {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let authors = cli
        .authors
        .iter()
        .map(|login| login.trim())
        .filter(|login| !login.is_empty())
        .map(str::to_string)
        .collect();

    let spec = RunSpec {
        authors,
        org: cli.org,
        include_approved: cli.all || cli.approved,
        include_drafts: cli.drafts,
        input: cli.input,
        log_level: cli.log_level,
        used_deprecated_all: cli.all,
    };

    (spec, format)
}

/// Parses command-line arguments into a run specification and output
/// format.
pub fn parse_args<I, T>(args: I) -> Result<(RunSpec, OutputFormat)>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = CliArgs::try_parse_from(args)?;
    Ok(build_run_spec(cli))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_carries_commit() {
        let version = version_string();
        assert!(version.starts_with(concat!(env!("CARGO_PKG_VERSION"), "-")));
        assert!(version.ends_with(BUILD_GIT_COMMIT));
        assert!(BUILD_INFO_HUMAN.contains(&version));
    }

    #[test]
    fn test_defaults() {
        let (spec, format) = parse_args(["outstanding-prs"]).unwrap();
        assert_eq!(format, OutputFormat::Table);
        assert!(spec.authors.is_empty());
        assert!(!spec.include_approved);
        assert!(!spec.include_drafts);
        assert_eq!(spec.log_level, LogLevel::Info);
        assert_eq!(
            spec.overrides(),
            vec![
                Predicate::include_approved(false),
                Predicate::include_draft(false)
            ]
        );
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let (spec, _) = parse_args(["outstanding-prs", "--log-level", "DEBUG"]).unwrap();
        assert_eq!(spec.log_level, LogLevel::Debug);
        assert_eq!(spec.log_level.as_filter(), "debug");

        assert!(parse_args(["outstanding-prs", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_all_is_alias_for_approved() {
        let (spec, _) = parse_args(["outstanding-prs", "--all"]).unwrap();
        assert!(spec.include_approved);
        assert!(spec.used_deprecated_all);

        let (spec, _) = parse_args(["outstanding-prs", "--approved"]).unwrap();
        assert!(spec.include_approved);
        assert!(!spec.used_deprecated_all);
    }

    #[test]
    fn test_authors_split_and_trimmed() {
        let (spec, _) =
            parse_args(["outstanding-prs", "-a", "dan, rich", "--author", "alice"]).unwrap();
        assert_eq!(spec.authors, vec!["dan", "rich", "alice"]);
    }
}
