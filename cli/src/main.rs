//! pqreport CLI - Power Query processing summary generator

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pqreport::{build_document, inspect_file, JsonFormat, RenderOptions, DEFAULT_FILE_NAME};

#[derive(Parser)]
#[command(name = "pqreport")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render the Power Query processing summary as PDF", long_about = None)]
struct Cli {
    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report to a PDF file
    Render {
        /// Output PDF file
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Write uncompressed content streams
        #[arg(long)]
        no_compress: bool,

        /// Stamp the current time as creation date (output is no longer reproducible)
        #[arg(long)]
        timestamp: bool,
    },

    /// Print the report content without rendering it
    Outline {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the block sequence as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Show what a rendered PDF contains
    Inspect {
        /// PDF file to read
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print every text line
        #[arg(short, long)]
        lines: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            output,
            no_compress,
            timestamp,
        }) => cmd_render(output.as_deref(), !no_compress, timestamp),
        Some(Commands::Outline {
            output,
            json,
            compact,
        }) => cmd_outline(output.as_deref(), json, compact),
        Some(Commands::Inspect { input, lines }) => cmd_inspect(&input, lines),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_render(cli.output.as_deref(), true, false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    output: Option<&Path>,
    compress: bool,
    timestamp: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
    log::debug!("rendering report to {}", path.display());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Building document...");
    let mut doc = build_document()?;
    let mut options = RenderOptions::new().with_compression(compress);
    if timestamp {
        options = options.with_creation_date(chrono::Utc::now());
    }
    pb.inc(1);

    pb.set_message("Rendering PDF...");
    let written = match doc.render_with_options(&path, &options) {
        Ok(written) => written,
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };
    pb.inc(1);

    pb.set_message("Verifying output...");
    let inspection = inspect_file(&written)?;
    let size = fs::metadata(&written)?.len();
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} pages, {} bytes)",
        "Saved to".green(),
        written.display(),
        inspection.page_count(),
        size
    );

    Ok(())
}

fn cmd_outline(
    output: Option<&Path>,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = build_document()?;

    let content = if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        pqreport::render::to_json(&doc, format)?
    } else {
        pqreport::render::to_text(&doc)
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, show_lines: bool) -> Result<(), Box<dyn std::error::Error>> {
    let inspection = inspect_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), inspection.pdf_version);
    println!("{}: {}", "Pages".bold(), inspection.page_count());

    if let Some(ref title) = inspection.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref producer) = inspection.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }

    println!();
    println!("{}", "Bookmarks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (i, title) in inspection.bookmarks.iter().enumerate() {
        let branch = if i + 1 == inspection.bookmarks.len() {
            "└─"
        } else {
            "├─"
        };
        println!("  {} {}", branch.dimmed(), title);
    }

    if show_lines {
        for page in &inspection.pages {
            println!();
            println!("{}", format!("Page {}", page.number).cyan().bold());
            println!("{}", "─".repeat(40).dimmed());
            for line in &page.lines {
                println!("{}", line);
            }
        }
    } else {
        let words: usize = inspection
            .lines()
            .map(|line| line.split_whitespace().count())
            .sum();
        println!();
        println!("{}: {}", "Lines".bold(), inspection.lines().count());
        println!("{}: {}", "Words".bold(), words);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pqreport".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Power Query processing summary generator");
    println!();
    println!("Library: pqreport {}", pqreport::version());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_renders_default() {
        let cli = Cli::try_parse_from(["pqreport"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_render_flags() {
        let cli = Cli::try_parse_from(["pqreport", "render", "out.pdf", "--no-compress"]).unwrap();
        match cli.command {
            Some(Commands::Render {
                output,
                no_compress,
                timestamp,
            }) => {
                assert_eq!(output, Some(PathBuf::from("out.pdf")));
                assert!(no_compress);
                assert!(!timestamp);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_compact_requires_json() {
        assert!(Cli::try_parse_from(["pqreport", "outline", "--compact"]).is_err());
        assert!(Cli::try_parse_from(["pqreport", "outline", "--json", "--compact"]).is_ok());
    }

    #[test]
    fn test_cmd_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.pdf");
        cmd_render(Some(&path), true, false).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_cmd_render_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.pdf");
        assert!(cmd_render(Some(&path), true, false).is_err());
        assert!(!path.exists());
    }
}
