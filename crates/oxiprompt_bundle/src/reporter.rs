use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::debug;
use oxiprompt_core::Failure;

use crate::render::display_path;

/// Writes one line per recoverable failure, grouped by kind.
pub fn print_failures<W: Write>(
    writer: &mut W,
    failures: &[Failure],
    root: &Path,
) -> io::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    debug!("Printing {} failures", failures.len());

    writeln!(
        writer,
        "{} {} import problem(s) while gathering files\n",
        "⚠".yellow().bold(),
        failures.len().to_string().yellow()
    )?;

    let mut unresolved = Vec::new();
    let mut unreadable = Vec::new();
    for failure in failures {
        match failure {
            Failure::Unresolved { .. } | Failure::Missing { .. } => unresolved.push(failure),
            Failure::Read { .. } => unreadable.push(failure),
        }
    }

    for (idx, failure) in unresolved.iter().enumerate() {
        let prefix = if idx == unresolved.len() - 1 { "└──" } else { "├──" };
        match failure {
            Failure::Unresolved { from, request, .. } => writeln!(
                writer,
                "{}  '{}' in {} {}",
                prefix.dimmed(),
                request.red(),
                display_path(from, root).blue(),
                "(unresolved)".dimmed()
            )?,
            Failure::Missing { from, path } => writeln!(
                writer,
                "{}  {} from {} {}",
                prefix.dimmed(),
                display_path(path, root).red(),
                display_path(from, root).blue(),
                "(missing or excluded)".dimmed()
            )?,
            Failure::Read { .. } => {}
        }
    }

    for failure in unreadable {
        if let Failure::Read { path, message } = failure {
            writeln!(
                writer,
                "{} could not read {}: {}",
                "✗".red().bold(),
                display_path(path, root).blue(),
                message
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// One-line run summary.
pub fn print_summary<W: Write>(
    writer: &mut W,
    files: usize,
    failures: usize,
    elapsed_ms: u128,
) -> io::Result<()> {
    let mark = if failures == 0 { "✓".green().bold() } else { "●".bright_blue() };
    writeln!(
        writer,
        "\n{} Bundled {} files in {}ms ({} problems).",
        mark,
        files.to_string().cyan(),
        elapsed_ms.to_string().cyan(),
        failures.to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}
