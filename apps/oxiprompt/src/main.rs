use anyhow::{Context, Result};
use arboard::Clipboard;
use clap::Parser;
use colored::Colorize;
use log::{debug, info};
use std::{
    env, fs,
    io::{BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use oxiprompt_bundle::{BundleOptions, print_failures, print_summary, run_bundle};
use oxiprompt_core::{default_template_path, find_config, load_config, load_template};

#[derive(Debug, Parser)]
#[command(name = "oxiprompt")]
#[command(about = "Bundle a source file and every local file it imports into one prompt document")]
#[command(version)]
struct Cli {
    /// Entry file, relative to the current directory
    entry: PathBuf,

    /// Config file (defaults to the nearest directory_map.yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prompt template (defaults to prompt_template.md next to the config)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Write the document to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Include a listing of the source root ahead of the files
    #[arg(long)]
    tree: bool,

    /// Also copy the document to the system clipboard
    #[arg(long)]
    copy: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli);

    let start = Instant::now();
    let cwd = env::current_dir().context("Failed to read the current directory")?;

    let config_path = match cli.config {
        Some(path) => cwd.join(path),
        None => find_config(&cwd)?,
    };
    let cfg = load_config(&config_path)?;
    info!("Using config {}", config_path.display());

    let template_path = match cli.template {
        Some(path) => cwd.join(path),
        None => default_template_path(&cfg),
    };
    let template = load_template(&template_path)?;

    let entry = cwd.join(&cli.entry);
    let opts = BundleOptions { include_tree: cli.tree };
    let out = run_bundle(&entry, &cfg, &template, &opts)?;

    match &cli.output {
        Some(path) => {
            let path = cwd.join(path);
            fs::write(&path, &out.document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote bundle to {}", path.display());
        }
        None => {
            // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
            let mut stdout = BufWriter::new(std::io::stdout());
            stdout.write_all(out.document.as_bytes())?;
            stdout.flush()?;
        }
    }

    let mut stderr = std::io::stderr();
    if cli.copy {
        copy_to_clipboard(&out.document)?;
        writeln!(stderr, "{} Prompt copied to clipboard!", "✓".green().bold())?;
    }
    print_failures(&mut stderr, &out.failures, &cfg.project_root)?;
    print_summary(&mut stderr, out.files.len(), out.failures.len(), start.elapsed().as_millis())?;
    if let Some(path) = &cli.output {
        writeln!(stderr, "{} {}", "→".bright_blue(), path.display().to_string().cyan())?;
    }

    Ok(())
}

fn copy_to_clipboard(document: &str) -> Result<()> {
    debug!("Copying {} bytes to the clipboard", document.len());
    let mut clipboard = Clipboard::new().context("Failed to open the system clipboard")?;
    clipboard.set_text(document).context("Failed to copy the prompt to the clipboard")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_is_opt_in() {
        let cli = Cli::try_parse_from(["oxiprompt", "src/app.ts"]).unwrap();
        assert!(!cli.copy);

        let cli = Cli::try_parse_from(["oxiprompt", "src/app.ts", "--copy", "--tree"]).unwrap();
        assert!(cli.copy);
        assert!(cli.tree);
        assert_eq!(cli.entry, PathBuf::from("src/app.ts"));
    }
}
