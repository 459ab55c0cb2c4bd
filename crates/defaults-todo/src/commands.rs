use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, Utc};
use colored::Colorize;
use defaults_store::{DefaultsStore, FileDefaults, FileDefaultsConfig};
use serde_json::json;
use tracing::info;

use crate::cli::*;
use crate::model::{format_date, Storage, TodoList};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(&cli.store)?;
    let output = execute(cli.command, store.clone(), &cli.format)?;
    store.synchronize().context("writing defaults file")?;
    print!("{output}");
    Ok(())
}

/// Open the defaults file with deferred writes, so a failed write surfaces
/// from the final `synchronize()` instead of being absorbed by the accessor.
fn open_store(path: &Path) -> anyhow::Result<Arc<FileDefaults>> {
    let store = FileDefaults::open(path, FileDefaultsConfig::deferred())
        .with_context(|| format!("opening defaults file {}", path.display()))?;
    info!(path = %store.path().display(), keys = store.len(), "loaded defaults");
    Ok(Arc::new(store))
}

/// Run one command against `store` and return what it prints.
pub fn execute(
    command: Command,
    store: Arc<dyn DefaultsStore>,
    format: &OutputFormat,
) -> anyhow::Result<String> {
    let storage = Storage::new(store);
    let mut list = TodoList::load(&storage);
    let mut out = String::new();

    match command {
        Command::Add(args) => {
            let item = list.add(args.name.join(" "), Utc::now());
            let added = format_date(&item.added.with_timezone(&Local));
            writeln!(
                out,
                "{} Added {}  {}",
                "✓".green().bold(),
                item.name.bold(),
                added.dimmed()
            )?;
            list.save(&storage);
        }
        Command::List => render_list(&list, format, &mut out)?,
        Command::Toggle(args) => {
            let row = args
                .row
                .checked_sub(1)
                .context("rows are numbered from 1")?;
            let item = list.toggle(row)?;
            let state = if item.completed {
                "done".green()
            } else {
                "not done".yellow()
            };
            writeln!(
                out,
                "{} {} marked {}",
                "✓".green().bold(),
                item.name.bold(),
                state
            )?;
            list.save(&storage);
        }
        Command::ShowCompleted => {
            let shown = list.toggle_show_completed();
            list.save(&storage);
            let state = if shown { "shown" } else { "hidden" };
            writeln!(out, "Completed items are now {}", state.bold())?;
        }
        Command::Clear => {
            storage.clear();
            writeln!(
                out,
                "{} Cleared to-do list and settings",
                "✓".green().bold()
            )?;
        }
    }

    Ok(out)
}

fn render_list(list: &TodoList, format: &OutputFormat, out: &mut String) -> anyhow::Result<()> {
    let visible = list.visible_items();

    if *format == OutputFormat::Json {
        let rows: Vec<_> = visible
            .iter()
            .enumerate()
            .map(|(row, (_, item))| {
                json!({
                    "row": row + 1,
                    "name": item.name,
                    "added": item.added.to_rfc3339(),
                    "completed": item.completed,
                })
            })
            .collect();
        let doc = json!({ "show_completed": list.show_completed, "items": rows });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(());
    }

    if visible.is_empty() {
        writeln!(out, "Nothing to do.")?;
    }
    for (row, (_, item)) in visible.iter().enumerate() {
        let mark = if item.completed {
            "✓".green()
        } else {
            " ".normal()
        };
        let added = format_date(&item.added.with_timezone(&Local));
        writeln!(
            out,
            "{:>3}. [{}] {}  {}",
            row + 1,
            mark,
            item.name,
            added.dimmed()
        )?;
    }
    let hidden = list.items.len() - visible.len();
    if hidden > 0 {
        writeln!(out, "({hidden} completed hidden)")?;
    }
    Ok(())
}
