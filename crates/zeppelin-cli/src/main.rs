//! Zeppelin CLI - Notebook to Markdown conversion
//!
//! Converts Apache Zeppelin JSON exports into Markdown files, writing
//! chart images into a directory next to the output.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use config::Config;
use zeppelin::{
    convert_notebook, ConversionReport, FsImageSink, MemoryImageSink, Notebook, NotebookFormat,
};

#[derive(Parser)]
#[command(name = "zeppelin")]
#[command(about = "Zeppelin CLI - Convert notebooks to Markdown", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a notebook to Markdown
    Convert(ConvertArgs),

    /// Show notebook name, format, and paragraph counts
    Info {
        /// Zeppelin notebook input file (.json)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Zeppelin notebook input file (.json)
    #[arg(short, long)]
    input: PathBuf,
    /// Markdown output file (defaults to the input with .md)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Notebook format: auto, legacy (0.6.x), new (0.7.x)
    #[arg(short, long, default_value = "auto")]
    format: String,
    /// Author name used until a paragraph names one
    #[arg(short, long)]
    user: Option<String>,
    /// Default code language for paragraphs without an interpreter
    #[arg(short, long)]
    language: Option<String>,
    /// Rows kept from truncated tables
    #[arg(long)]
    row_limit: Option<usize>,
    /// Print Markdown to stdout without writing files
    #[arg(long)]
    dry_run: bool,
}

/// What a conversion produced
enum Converted {
    /// Dry run: the rendered Markdown, nothing written
    Preview(String),
    /// Markdown file and image directory on disk
    Written {
        output: PathBuf,
        images_dir: PathBuf,
        report: ConversionReport,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a value (default_user, default_language, images_dir, table_row_limit)
    Set {
        key: String,
        value: String,
    },
    /// Reset a value to its default
    Unset {
        key: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert(args) => cmd_convert(args),
        Commands::Info { input } => cmd_info(&input),
        Commands::Config { action } => cmd_config(action.unwrap_or(ConfigAction::Show)),
    }
}

/// Log to stderr so converted Markdown on stdout stays clean
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ============================================
// Command Implementations
// ============================================

fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let config = Config::load()?;

    match convert_file(&config, &args)? {
        Converted::Preview(markdown) => println!("{}", markdown),
        Converted::Written {
            output,
            images_dir,
            report,
        } => {
            println!(
                "{} {} -> {} [{}]",
                "✓".green(),
                args.input.display(),
                output.display().to_string().cyan(),
                report.format
            );
            if report.images > 0 {
                println!(
                    "  {} image(s) in {}",
                    report.images,
                    images_dir.display().to_string().dimmed()
                );
            }
        }
    }

    Ok(())
}

/// Convert `args.input` using `config` defaults; flags win over config
fn convert_file(config: &Config, args: &ConvertArgs) -> Result<Converted> {
    let format = parse_format(&args.format)?;
    let options = config.converter_options(
        args.user.clone(),
        args.language.clone(),
        args.row_limit,
    );

    let notebook = Notebook::from_path(&args.input)
        .with_context(|| format!("Failed to load notebook {:?}", args.input))?;

    if args.dry_run {
        let report = convert_notebook(&notebook, format, MemoryImageSink::new(), options)
            .context("Conversion failed")?;
        return Ok(Converted::Preview(report.document.render()));
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("md"));
    let directory = output_directory(&output);
    let sink = FsImageSink::with_images_dir(&directory, &config.images_dir)
        .context("Invalid images_dir in configuration")?;
    let images_dir = sink.images_path();

    let report = convert_notebook(&notebook, format, sink, options)
        .context("Conversion failed")?;

    if !directory.as_os_str().is_empty() {
        fs::create_dir_all(&directory)
            .with_context(|| format!("Failed to create output directory {:?}", directory))?;
    }
    fs::write(&output, report.document.render())
        .with_context(|| format!("Failed to write Markdown to {:?}", output))?;

    tracing::info!(images = report.images, "Wrote {:?}", output);

    Ok(Converted::Written {
        output,
        images_dir,
        report,
    })
}

fn cmd_info(input: &Path) -> Result<()> {
    let notebook = Notebook::from_path(input)
        .with_context(|| format!("Failed to load notebook {:?}", input))?;

    let format = notebook.detect_format();
    let summary = notebook.summary();
    let name = if notebook.name.is_empty() {
        "(untitled)"
    } else {
        notebook.name.as_str()
    };

    println!("{}", "Notebook:".bold());
    println!("  Name: {}", name.cyan());
    println!(
        "  Format: {} (Zeppelin {})",
        format,
        format.zeppelin_version()
    );
    println!("  Paragraphs: {}", summary.paragraphs);
    println!("  With source: {}", summary.with_text);
    println!(
        "  Results: {} ok, {} failed",
        summary.successes.to_string().green(),
        summary.errors.to_string().red()
    );

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!(
                "  Default User: {}",
                config.default_user.as_deref().unwrap_or("anonymous").cyan()
            );
            println!(
                "  Default Language: {}",
                config.default_language.as_deref().unwrap_or("scala").cyan()
            );
            println!("  Images Dir: {}", config.images_dir);
            println!("  Table Row Limit: {}", config.table_row_limit);
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{} {} = {}", "✓".green(), key, value);
        }
        ConfigAction::Unset { key } => {
            config.unset(&key)?;
            config.save()?;
            println!("{} {} reset", "✓".green(), key);
        }
    }

    Ok(())
}

/// `auto` defers to detection; anything else must name a format
fn parse_format(format: &str) -> Result<Option<NotebookFormat>> {
    if format.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }

    match format.parse::<NotebookFormat>() {
        Ok(format) => Ok(Some(format)),
        Err(e) => bail!("{}. Use auto, legacy, or new.", e),
    }
}

/// Directory holding the Markdown file; images are placed under it
fn output_directory(output: &Path) -> PathBuf {
    output.parent().map(Path::to_path_buf).unwrap_or_default()
}
