//! Create, update and delete commands
//!
//! Create and update go through a [`DraftController`] so the CLI applies
//! the same rules as the console: upload file checks, the default name
//! taken from the file, and the create-or-update decision.

use super::Context;
use crate::api::{VersionId, VersionRepository};
use crate::console::executor;
use crate::draft::{DraftController, UploadFile};
use crate::{OntoError, Result};
use dialoguer::Confirm;
use std::path::Path;

/// Execute the create command
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an ontology
/// file, or if the service rejects the version.
pub fn create(ctx: &Context, name: Option<&str>, description: &str, file: &Path) -> Result<()> {
    let mut drafts = DraftController::new();
    drafts.set_description(description)?;
    if let Some(name) = name {
        drafts.set_name(name)?;
    }
    drafts.upload(UploadFile::read(file)?)?;
    save(ctx, &mut drafts)
}

/// Execute the update command
///
/// Fields that are not given keep their stored values.
///
/// # Errors
///
/// Returns an error if nothing would change, the file is unusable, or the
/// service call fails.
pub fn update(
    ctx: &Context,
    id: VersionId,
    name: Option<&str>,
    description: Option<&str>,
    file: Option<&Path>,
) -> Result<()> {
    if name.is_none() && description.is_none() && file.is_none() {
        return Err(OntoError::InvalidInput(
            "Nothing to update; pass --name, --description or a file".into(),
        ));
    }

    let mut drafts = DraftController::new();
    let detail = ctx.repo.get(id)?;
    // The full record is already here, so no further detail fetch is needed
    if let Some(ticket) = drafts.edit(detail.clone()) {
        drafts.apply_detail(ticket, Ok(detail));
    }

    if let Some(name) = name {
        drafts.set_name(name)?;
    }
    if let Some(description) = description {
        drafts.set_description(description)?;
    }
    if let Some(file) = file {
        drafts.upload(UploadFile::read(file)?)?;
    }
    save(ctx, &mut drafts)
}

fn save(ctx: &Context, drafts: &mut DraftController) -> Result<()> {
    let ticket = drafts.begin_save()?;
    let result = executor::save(ctx.repo.as_ref(), &ticket.request);
    let saved = result.clone().map(|d| d.summary);
    drafts.finish_save(&ticket, result);
    let summary = saved?;

    if ctx.quiet {
        if let Some(id) = summary.id {
            println!("{id}");
        }
    }
    Ok(())
}

/// Execute the delete command
///
/// # Errors
///
/// Returns an error if the version does not exist, the prompt fails, or
/// the service refuses the delete.
pub fn delete(ctx: &Context, id: VersionId, yes: bool) -> Result<()> {
    let version = ctx.repo.get(id)?;

    if !yes && !confirm(&format!("Delete version '{}'?", version.summary.name))? {
        if !ctx.quiet {
            println!("Cancelled.");
        }
        return Ok(());
    }

    ctx.repo.delete(id)?;
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| OntoError::InvalidInput(format!("Failed to read confirmation: {e}")))
}
