//! Interactive selection steps.
//!
//! Every prompt returns a tagged [`Selection`] so abandoning the flow is a
//! first-class outcome, handled separately from errors and never reported
//! as a failure. Cancellation happens here, before any download I/O starts.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ignix_catalog::{CatalogEntry, WriteMode};

/// Outcome of one interactive step: a choice, or user abandonment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    Picked(T),
    Cancelled,
}

/// Presents a numbered pick-list of catalog entries on stdout and reads
/// the choice from stdin. An empty line (or end of input) cancels.
pub fn pick_entry(entries: &[CatalogEntry]) -> Result<Selection<CatalogEntry>> {
    for (index, entry) in entries.iter().enumerate() {
        println!("{:>4}  {:<24} {}", index + 1, entry.label, entry.description);
    }
    loop {
        let line = prompt("template number (empty to cancel): ")?;
        if line.is_empty() {
            return Ok(Selection::Cancelled);
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=entries.len()).contains(&n) => {
                return Ok(Selection::Picked(entries[n - 1].clone()));
            }
            _ => eprintln!("enter a number between 1 and {}", entries.len()),
        }
    }
}

/// Asks how to combine the template with an existing target. A missing
/// target needs no choice and defaults to overwrite.
pub fn pick_mode(target: &Path) -> Result<Selection<WriteMode>> {
    if !target.exists() {
        return Ok(Selection::Picked(WriteMode::Overwrite));
    }
    loop {
        let line = prompt(&format!(
            "{} exists: [a]ppend, [o]verwrite, empty to cancel: ",
            target.display()
        ))?;
        match line.as_str() {
            "" => return Ok(Selection::Cancelled),
            "a" | "append" => return Ok(Selection::Picked(WriteMode::Append)),
            "o" | "overwrite" => return Ok(Selection::Picked(WriteMode::Overwrite)),
            _ => eprintln!("enter 'a', 'o', or an empty line"),
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().context("failed to flush prompt")?;
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read selection")?;
    if read == 0 {
        // end of input behaves like cancellation
        return Ok(String::new());
    }
    Ok(line.trim().to_string())
}
