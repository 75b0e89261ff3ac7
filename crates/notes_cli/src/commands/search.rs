use super::CommandEnv;
use crate::cli::SearchFormat;
use crate::format::{write_json, write_notes_table, write_packages_table, write_tasks_table};
use crate::prompt::Prompter;
use anyhow::Result;
use notes_core::model::now_epoch_ms;
use std::io::Write;

pub(super) fn run<P: Prompter, W: Write>(
    env: &mut CommandEnv<'_, P, W>,
    query: &str,
    format: SearchFormat,
) -> Result<()> {
    let results = env.workspace.search(query)?;
    if format == SearchFormat::Json {
        write_json(&mut env.out, &results)?;
        return Ok(());
    }
    if results.is_empty() {
        writeln!(env.out, "No results found for '{query}'.")?;
        return Ok(());
    }

    if !results.tasks.is_empty() {
        writeln!(env.out, "Tasks ({}):", results.tasks.len())?;
        write_tasks_table(&mut env.out, results.tasks, now_epoch_ms(), None, env.palette)?;
        writeln!(env.out)?;
    }
    if !results.notes.is_empty() {
        writeln!(env.out, "Notes ({}):", results.notes.len())?;
        write_notes_table(&mut env.out, &results.notes)?;
        writeln!(env.out)?;
    }
    if !results.packages.is_empty() {
        writeln!(env.out, "Packages ({}):", results.packages.len())?;
        write_packages_table(&mut env.out, &results.packages, env.palette)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::cli::SearchFormat;
    use crate::commands::test_support::{env, output};
    use notes_core::{open_db_in_memory, NewNote, NewTask};

    #[test]
    fn table_groups_results_by_kind() {
        let conn = open_db_in_memory().unwrap();
        let mut env = env(&conn, &[]);
        env.workspace.tasks.create_task(NewTask::titled("Budget review")).unwrap();
        env.workspace
            .notes
            .create_note(NewNote {
                title: "Budget ideas".into(),
                ..NewNote::default()
            })
            .unwrap();

        run(&mut env, "budget", SearchFormat::Table).unwrap();
        let text = output(&env);
        assert!(text.contains("Tasks (1):"));
        assert!(text.contains("Notes (1):"));
        assert!(!text.contains("Packages"));
    }

    #[test]
    fn no_match_says_so() {
        let conn = open_db_in_memory().unwrap();
        let mut env = env(&conn, &[]);
        run(&mut env, "zzz", SearchFormat::Table).unwrap();
        assert_eq!(output(&env), "No results found for 'zzz'.\n");
    }
}
