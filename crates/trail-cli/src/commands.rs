use std::fs;

use anyhow::Context;
use serde_json::{json, Value};
use trail_diff::diff;
use trail_types::{entries_from_value, entry_from_value, LogEntry};

use crate::cli::*;
use crate::render;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Show(args) => cmd_show(args, &cli.format),
        Command::Log(args) => cmd_log(args, &cli.format),
    }
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let before = load_json(&args.before)?;
    let after = load_json(&args.after)?;

    let result = diff(&before, &after);
    tracing::debug!(changes = result.len(), "computed snapshot diff");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.changes)?),
        OutputFormat::Text => render::print_diff(&result, args.text_diff),
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let value = load_json(&args.entry)?;
    let entry = entry_from_value(value)?;

    match entry.comparison_pair() {
        Some(pair) => {
            let result = diff(&pair.before, &pair.after);
            tracing::debug!(changes = result.len(), action = %entry.action, "entry diff");
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result.changes)?)
                }
                OutputFormat::Text => {
                    render::print_entry(&entry);
                    println!();
                    render::print_diff(&result, false);
                }
            }
        }
        None => match format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(entry.details.as_ref().unwrap_or(&Value::Null))?
            ),
            OutputFormat::Text => {
                render::print_entry(&entry);
                println!();
                match &entry.details {
                    Some(details) => {
                        println!("{}", render::display_value(Some(details)));
                    }
                    None => println!("No details."),
                }
            }
        },
    }
    Ok(())
}

fn cmd_log(args: LogArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let value = load_json(&args.entries)?;
    let entries = entries_from_value(value)?;
    tracing::debug!(count = entries.len(), "loaded log entries");

    let shown = entries.iter().take(args.limit);
    match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = shown
                .map(|entry| {
                    json!({
                        "action": entry.action,
                        "timestamp": entry.timestamp,
                        "actor": entry.actor(),
                        "resourceType": entry.resource_type,
                        "resourceId": entry.resource_id,
                        "changes": change_count(entry),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            for entry in shown {
                println!("{}", render::entry_summary(entry, change_count(entry)));
            }
            if entries.len() > args.limit {
                println!("... and {} more", entries.len() - args.limit);
            }
        }
    }
    Ok(())
}

fn change_count(entry: &LogEntry) -> usize {
    entry
        .comparison_pair()
        .map(|pair| diff(&pair.before, &pair.after).len())
        .unwrap_or(0)
}

fn load_json(path: &str) -> anyhow::Result<Value> {
    tracing::debug!(path, "loading JSON document");
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("{path} is not valid JSON"))
}
