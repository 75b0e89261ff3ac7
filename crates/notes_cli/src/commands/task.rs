use super::{identifier, optional_text, CommandEnv};
use crate::cli::{OutputFormat, TaskCommand, TaskCreateArgs, TaskListArgs, TaskUpdateArgs};
use crate::format::{write_json, write_tasks_markdown, write_tasks_table};
use crate::prompt::{confirm, Prompter};
use anyhow::Result;
use log::info;
use notes_core::dates::parse_date;
use notes_core::model::{now_epoch_ms, split_tags};
use notes_core::{short_id, NewTask, TaskFilter, TaskPatch, TaskStatus};
use std::io::Write;

pub(super) fn run<P: Prompter, W: Write>(
    env: &mut CommandEnv<'_, P, W>,
    command: TaskCommand,
) -> Result<()> {
    match command {
        TaskCommand::Create(args) => create(env, args),
        TaskCommand::List(args) => list(env, args),
        TaskCommand::Update(args) => update(env, args),
        TaskCommand::Complete { id } => complete(env, &id),
        TaskCommand::Delete { id, yes } => delete(env, &id, yes),
    }
}

fn create<P: Prompter, W: Write>(env: &mut CommandEnv<'_, P, W>, args: TaskCreateArgs) -> Result<()> {
    let package = env.package_named(args.package.as_deref())?;
    let due_at = args.due.as_deref().map(parse_date).transpose()?;
    let task = env.workspace.tasks.create_task(NewTask {
        title: args.title,
        description: args.description.and_then(optional_text),
        priority: args.priority.into(),
        due_at,
        package_id: package.map(|package| package.id),
        tags: args.tags.as_deref().map(split_tags).unwrap_or_default(),
        ..NewTask::default()
    })?;
    writeln!(env.out, "Created task {}: {}", short_id(&task.id), task.title)?;
    Ok(())
}

fn list<P: Prompter, W: Write>(env: &mut CommandEnv<'_, P, W>, args: TaskListArgs) -> Result<()> {
    let package = env.package_named(args.package.as_deref())?;
    let filter = TaskFilter {
        status: args.status.map(TaskStatus::from),
        priority: args.priority.map(Into::into),
        package_id: package.map(|package| package.id),
    };
    let tasks = env.workspace.tasks.list_tasks(&filter)?;
    match args.format {
        OutputFormat::Table => write_tasks_table(
            &mut env.out,
            tasks,
            now_epoch_ms(),
            Some(env.completed_window),
            env.palette,
        )?,
        OutputFormat::Json => write_json(&mut env.out, &tasks)?,
        OutputFormat::Markdown => write_tasks_markdown(&mut env.out, &tasks)?,
    }
    Ok(())
}

fn update<P: Prompter, W: Write>(env: &mut CommandEnv<'_, P, W>, args: TaskUpdateArgs) -> Result<()> {
    let found = env.workspace.tasks.find_task(identifier(&args.id)?);
    let task = env.located(found, "notes task update")?;

    let due_at = match args.due.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(input) => Some(Some(parse_date(input)?)),
    };
    let patch = TaskPatch {
        title: args.title,
        description: args.description.map(optional_text),
        status: args.status.map(|status| TaskStatus::from(status).as_str().to_string()),
        priority: args
            .priority
            .map(|priority| notes_core::Priority::from(priority).as_str().to_string()),
        due_at,
        package_id: None,
        tags: args.tags.as_deref().map(split_tags),
    };
    if patch.is_empty() {
        anyhow::bail!("nothing to update; pass at least one field option");
    }

    let task = env.workspace.tasks.update_task(&task.id, &patch)?;
    writeln!(env.out, "Updated task {}: {}", short_id(&task.id), task.title)?;
    Ok(())
}

fn complete<P: Prompter, W: Write>(env: &mut CommandEnv<'_, P, W>, id: &str) -> Result<()> {
    let found = env.workspace.tasks.find_task(identifier(id)?);
    let task = env.located(found, "notes task complete")?;
    let task = env.workspace.tasks.complete_task(&task.id)?;
    writeln!(env.out, "Completed task: {}", task.title)?;
    Ok(())
}

fn delete<P: Prompter, W: Write>(
    env: &mut CommandEnv<'_, P, W>,
    id: &str,
    yes: bool,
) -> Result<()> {
    let found = env.workspace.tasks.find_task(identifier(id)?);
    let task = env.located(found, "notes task delete")?;

    let prompt = format!("Delete task '{}'? (y/N): ", task.title);
    if !yes && !confirm(&mut env.prompter, &prompt)? {
        writeln!(env.out, "Deletion cancelled.")?;
        return Ok(());
    }
    env.workspace.tasks.delete_task(&task.id)?;
    info!("event=cli_task_delete module=cli status=ok");
    writeln!(env.out, "Deleted task: {}", task.title)?;
    Ok(())
}
