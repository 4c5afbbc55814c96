//! Terminal rendering of change tables, entry envelopes, and text hunks.
//!
//! The diff engine hands over raw values; all display rules live here.
//! Absent fields, nulls, and empty strings each get a distinguishable
//! marker so a reviewer can tell them apart in the table.

use colored::Colorize;
use serde_json::Value;
use trail_diff::text_diff::{diff_text, DiffLine};
use trail_diff::{ChangeRecord, ObjectDiff};
use trail_types::LogEntry;

/// Human-legible form of one side of a change.
pub fn display_value(side: Option<&Value>) -> String {
    match side {
        None => "(undefined)".to_string(),
        Some(Value::Null) => "(null)".to_string(),
        Some(Value::String(s)) if s.is_empty() => "(empty string)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Array(_) | Value::Object(_))) => {
            serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
        }
        Some(v) => v.to_string(),
    }
}

/// One summary line for a log listing.
pub fn entry_summary(entry: &LogEntry, change_count: usize) -> String {
    let timestamp = entry
        .parsed_timestamp()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .or_else(|| entry.timestamp.clone())
        .unwrap_or_else(|| "-".to_string());

    let actor = entry
        .actor()
        .map(|v| display_value(Some(v)))
        .unwrap_or_else(|| "-".to_string());

    let resource = match (&entry.resource_type, &entry.resource_id) {
        (Some(kind), Some(id)) => format!("{kind} {}", display_value(Some(id))),
        (Some(kind), None) => kind.clone(),
        (None, Some(id)) => display_value(Some(id)),
        (None, None) => "-".to_string(),
    };

    format!(
        "{}  {}  {}  {}  {} change(s)",
        timestamp.dimmed(),
        entry.action.yellow(),
        actor,
        resource,
        change_count,
    )
}

/// Print the envelope of one entry.
pub fn print_entry(entry: &LogEntry) {
    println!("Action:    {}", entry.action.yellow().bold());
    if let Some(ts) = &entry.timestamp {
        println!("Timestamp: {}", ts.dimmed());
    }
    if let Some(actor) = entry.actor() {
        println!("Actor:     {}", display_value(Some(actor)));
    }
    if let Some(kind) = &entry.resource_type {
        match &entry.resource_id {
            Some(id) => println!("Resource:  {} {}", kind, display_value(Some(id))),
            None => println!("Resource:  {kind}"),
        }
    }
    if let Some(ip) = &entry.ip_address {
        println!("IP:        {ip}");
    }
    if let Some(agent) = &entry.user_agent {
        println!("Agent:     {agent}");
    }
}

/// Print the change table for a diff.
pub fn print_diff(diff: &ObjectDiff, text_hunks: bool) {
    if diff.is_empty() {
        println!("No changes.");
        return;
    }
    for rec in &diff.changes {
        print_record(rec, text_hunks);
    }
    println!();
    println!(
        "{} change(s): {} added, {} removed, {} modified",
        diff.len().to_string().bold(),
        diff.additions().to_string().green(),
        diff.removals().to_string().red(),
        diff.modifications().to_string().yellow(),
    );
}

fn print_record(rec: &ChangeRecord, text_hunks: bool) {
    println!("{}", rec.path.bold());

    if text_hunks {
        if let (Some(Value::String(old)), Some(Value::String(new))) = (&rec.old, &rec.new) {
            if old.contains('\n') || new.contains('\n') {
                print_text_hunks(old, new);
                return;
            }
        }
    }

    for line in display_value(rec.old.as_ref()).lines() {
        println!("  {} {}", "-".red(), line.red());
    }
    for line in display_value(rec.new.as_ref()).lines() {
        println!("  {} {}", "+".green(), line.green());
    }
}

fn print_text_hunks(old: &str, new: &str) {
    let diff = diff_text(old, new);
    for hunk in &diff.hunks {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        );
        println!("  {}", header.cyan());
        for line in &hunk.lines {
            match line {
                DiffLine::Context(text) => println!("      {text}"),
                DiffLine::Removed(text) => println!("    {} {}", "-".red(), text.red()),
                DiffLine::Added(text) => println!("    {} {}", "+".green(), text.green()),
            }
        }
    }
}
