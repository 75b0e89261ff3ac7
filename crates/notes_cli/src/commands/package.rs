use super::{identifier, optional_text, CommandEnv};
use crate::cli::{OutputFormat, PackageCommand};
use crate::format::{write_json, write_packages_markdown, write_packages_table};
use crate::prompt::{confirm, Prompter};
use anyhow::Result;
use log::info;
use notes_core::dates::parse_date;
use notes_core::{short_id, NewPackage, PackageFilter};
use std::io::Write;

pub(super) fn run<P: Prompter, W: Write>(
    env: &mut CommandEnv<'_, P, W>,
    command: PackageCommand,
) -> Result<()> {
    match command {
        PackageCommand::Create {
            name,
            description,
            parent,
            due,
        } => {
            let parent = env.package_named(parent.as_deref())?;
            let due_at = due.as_deref().map(parse_date).transpose()?;
            let package = env.workspace.packages.create_package(NewPackage {
                name,
                description: description.and_then(optional_text),
                parent_id: parent.map(|parent| parent.id),
                due_at,
            })?;
            writeln!(
                env.out,
                "Created package {}: {}",
                short_id(&package.id),
                package.name
            )?;
        }
        PackageCommand::List { format } => {
            let packages = env
                .workspace
                .packages
                .list_packages(&PackageFilter::default())?;
            match format {
                OutputFormat::Table => write_packages_table(&mut env.out, &packages, env.palette)?,
                OutputFormat::Json => write_json(&mut env.out, &packages)?,
                OutputFormat::Markdown => write_packages_markdown(&mut env.out, &packages)?,
            }
        }
        PackageCommand::Archive { id } => {
            let found = env.workspace.packages.find_package(identifier(&id)?);
            let package = env.located(found, "notes package archive")?;
            let package = env.workspace.packages.archive_package(&package.id)?;
            writeln!(env.out, "Archived package: {}", package.name)?;
        }
        PackageCommand::Delete { id, yes } => {
            let found = env.workspace.packages.find_package(identifier(&id)?);
            let package = env.located(found, "notes package delete")?;
            let details = env.workspace.package_details(&package.id)?;
            if !details.tasks.is_empty() || !details.notes.is_empty() {
                writeln!(
                    env.out,
                    "Package '{}' contains {} tasks and {} notes; they will be deleted too.",
                    package.name,
                    details.tasks.len(),
                    details.notes.len()
                )?;
            }
            let prompt = format!(
                "Delete package '{}' and all its contents? (y/N): ",
                package.name
            );
            if !yes && !confirm(&mut env.prompter, &prompt)? {
                writeln!(env.out, "Deletion cancelled.")?;
                return Ok(());
            }
            let summary = env.workspace.packages.delete_package(&package.id)?;
            info!(
                "event=cli_package_delete module=cli status=ok tasks={} notes={}",
                summary.tasks_deleted, summary.notes_deleted
            );
            writeln!(env.out, "Deleted package: {}", package.name)?;
        }
    }
    Ok(())
}
