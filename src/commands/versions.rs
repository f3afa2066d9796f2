//! List and show commands

use super::Context;
use crate::api::{VersionId, VersionRepository};
use crate::list::ListController;
use crate::{Result, output};
use colored::Colorize;

/// Execute the list command
///
/// With `all`, pages are fetched in order until the service reports no more.
///
/// # Errors
///
/// Returns an error if a page cannot be fetched.
pub fn list(ctx: &Context, search: &str, page: u32, all: bool) -> Result<()> {
    let (items, total) = if all {
        fetch_all(ctx, search)?
    } else {
        let page = ctx.repo.list(page, search)?;
        (page.items, page.total)
    };

    if items.is_empty() {
        if !ctx.quiet {
            println!("No versions found.");
        }
        return Ok(());
    }

    if !ctx.quiet {
        println!("Showing {} of {total} versions:", items.len());
    }
    for version in &items {
        println!("{}", output::version_line(version, ctx.quiet));
    }
    Ok(())
}

fn fetch_all(ctx: &Context, search: &str) -> Result<(Vec<crate::api::VersionSummary>, u64)> {
    let mut list = ListController::new();
    let mut ticket = Some(list.begin_reset(search));
    while let Some(t) = ticket {
        let page = ctx.repo.list(t.page, &t.search)?;
        list.apply_page(&t, Ok(page));
        ticket = list.begin_load_more();
    }
    Ok((list.items().to_vec(), list.total()))
}

/// Execute the show command
///
/// # Errors
///
/// Returns an error if the version cannot be fetched or the pager fails.
pub fn show(ctx: &Context, id: VersionId, source: bool) -> Result<()> {
    let version = ctx.repo.get(id)?;
    let summary = &version.summary;

    if ctx.quiet {
        println!("{}", output::version_line(summary, true));
    } else {
        println!("{} {}", "Name:".bold(), summary.name);
        if !summary.description.is_empty() {
            println!("{} {}", "Description:".bold(), summary.description);
        }
        println!(
            "{} {}",
            "Created:".bold(),
            output::format_timestamp(summary.created_at.as_deref())
        );
        println!(
            "{} {}",
            "Updated:".bold(),
            output::format_timestamp(summary.updated_at.as_deref())
        );
        println!(
            "{} {}",
            "Source:".bold(),
            output::format_size(version.ontology_data.len())
        );
    }

    if source {
        page_text(&summary.name, &version.ontology_data)?;
    }
    Ok(())
}

fn page_text(title: &str, text: &str) -> Result<()> {
    let pager = minus::Pager::new();
    pager.set_text(text).map_err(std::io::Error::other)?;
    pager.set_prompt(title).map_err(std::io::Error::other)?;
    minus::page_all(pager).map_err(std::io::Error::other)?;
    Ok(())
}
