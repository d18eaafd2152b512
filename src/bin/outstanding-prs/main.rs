mod display;

use anyhow::Result;
use outstanding_prs::{
    Config, DefaultFilters, LogLevel, OutputFormat, SnapshotForge, compose_query,
    fetch_outstanding, parse_args, version_string,
};
use tracing::{debug, info, warn};

use display::{display_pr_json, display_pr_table, display_query};

fn handle_clap_help_version(clap_err: &clap::Error) -> ! {
    use clap::error::ErrorKind;
    match clap_err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{clap_err}");
            std::process::exit(0);
        }
        _ => {
            eprint!("{clap_err}");
            std::process::exit(2);
        }
    }
}

fn init_tracing(level: LogLevel) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let (spec, format) = match parse_args(std::env::args()) {
        Ok(result) => result,
        Err(err) => {
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                handle_clap_help_version(clap_err);
            } else {
                return Err(err);
            }
        }
    };

    init_tracing(spec.log_level);
    debug!(version = %version_string(), "outstanding-prs starting");

    if spec.used_deprecated_all {
        warn!("--all is deprecated, use --approved");
    }

    let config = Config::from_env();
    let org = config.resolve_org(spec.org.as_deref())?;
    let logins = config.resolve_logins(&spec.authors);
    if let Some(team) = &config.github_team {
        info!(org = %org, team = %team, users = logins.len(), "searching team pull requests");
    }

    let defaults = DefaultFilters::standard();
    let query = compose_query(&defaults, &org, &logins, &spec.overrides())?;
    debug!("Looking for PRs with the following query: \"{}\"", query);

    let mut stdout = std::io::stdout();

    let Some(input) = &spec.input else {
        display_query(&query, format == OutputFormat::Json, &mut stdout)?;
        return Ok(());
    };

    let forge = SnapshotForge::load(input)?;
    let prs = fetch_outstanding(&forge, &query).await?;

    match format {
        OutputFormat::Json => display_pr_json(&prs, &mut stdout),
        OutputFormat::Table => display_pr_table(&prs, spec.include_drafts, &mut stdout),
    }
}
