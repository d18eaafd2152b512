use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use outstanding_prs::PullRequest;

const TABLE_HEADERS: &[&str] = &[
    "CreatedAt",
    "Title",
    "Author",
    "Head (from)",
    "Base (into)",
    "Link",
];
const DRAFT_HEADER: &str = "Draft";
const TITLE_COLUMN_INDEX: usize = 1;
const COLUMN_SEPARATOR: &str = " ";
const TITLE_TRUNCATION_SUFFIX: &str = "...";
const MIN_TITLE_WIDTH_FOR_TRUNCATION: usize = 3;

fn get_terminal_width(width_override: Option<usize>) -> usize {
    if let Some(width) = width_override {
        width
    } else if io::stdout().is_terminal() {
        terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(usize::MAX)
    } else {
        usize::MAX
    }
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

fn pr_to_table_row(pr: &PullRequest, with_draft: bool) -> Vec<String> {
    let mut row = vec![
        pr.created_at.format("%Y-%m-%d").to_string(),
        pr.title.clone(),
        pr.author.clone(),
        pr.head.clone(),
        pr.base.clone(),
        pr.link.clone(),
    ];
    if with_draft {
        row.push(pr.draft.to_string());
    }
    row
}

fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell_width(cell));
            }
        }
    }

    widths
}

// The last column is never padded, so it does not count towards the width
// the other columns take up.
fn apply_title_truncation(rows: &mut [Vec<String>], widths: &mut [usize], terminal_width: usize) {
    if terminal_width == usize::MAX || widths.len() < 2 {
        return;
    }

    let last = widths.len() - 1;
    let other_width: usize = widths
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != TITLE_COLUMN_INDEX && *i != last)
        .map(|(_, w)| w + COLUMN_SEPARATOR.len())
        .sum::<usize>()
        + widths[last];
    let needed = other_width + COLUMN_SEPARATOR.len();

    if needed >= terminal_width {
        return;
    }

    let available_title_width = terminal_width - needed;
    if widths[TITLE_COLUMN_INDEX] > available_title_width
        && available_title_width > MIN_TITLE_WIDTH_FOR_TRUNCATION
    {
        widths[TITLE_COLUMN_INDEX] = available_title_width;

        for row in rows {
            if let Some(title) = row.get_mut(TITLE_COLUMN_INDEX)
                && cell_width(title) > available_title_width
            {
                let keep = available_title_width - TITLE_TRUNCATION_SUFFIX.len();
                let truncated: String = title.chars().take(keep).collect();
                *title = format!("{truncated}{TITLE_TRUNCATION_SUFFIX}");
            }
        }
    }
}

fn render_row<W: Write>(cells: &[&str], widths: &[usize], writer: &mut W) -> Result<()> {
    let last = cells.len().saturating_sub(1);
    for (i, cell) in cells.iter().enumerate() {
        if i == last {
            write!(writer, "{cell}")?;
        } else {
            write!(writer, "{:<width$}{COLUMN_SEPARATOR}", cell, width = widths[i])?;
        }
    }
    writeln!(writer)?;
    Ok(())
}

fn display_prs_table_with_width<W: Write>(
    prs: &[PullRequest],
    with_draft: bool,
    width_override: Option<usize>,
    writer: &mut W,
) -> Result<()> {
    let mut headers = TABLE_HEADERS.to_vec();
    if with_draft {
        headers.push(DRAFT_HEADER);
    }

    let terminal_width = get_terminal_width(width_override);
    let mut rows: Vec<Vec<String>> = prs
        .iter()
        .map(|pr| pr_to_table_row(pr, with_draft))
        .collect();
    let mut widths = calculate_column_widths(&headers, &rows);

    apply_title_truncation(&mut rows, &mut widths, terminal_width);

    render_row(&headers, &widths, writer)?;
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        render_row(&cells, &widths, writer)?;
    }

    Ok(())
}

/// Writes the pull requests as a table, adding a Draft column when drafts
/// were searched for.
pub fn display_pr_table<W: Write>(
    prs: &[PullRequest],
    with_draft: bool,
    writer: &mut W,
) -> Result<()> {
    display_prs_table_with_width(prs, with_draft, None, writer)
}

/// Writes the pull requests as a single-line JSON array.
pub fn display_pr_json<W: Write>(prs: &[PullRequest], writer: &mut W) -> Result<()> {
    let json = serde_json::to_string(prs).context("unable to marshal PRs")?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Writes the query itself, for runs without search results.
pub fn display_query<W: Write>(query: &str, as_json: bool, writer: &mut W) -> Result<()> {
    if as_json {
        let json = serde_json::json!({ "query": query });
        writeln!(writer, "{json}")?;
    } else {
        writeln!(writer, "{query}")?;
    }
    Ok(())
}
