use anyhow::{Context, Result};
use clap::Parser;
use gptdoc::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Validate GPT catalog documents and export them as JSON and HTML reports
#[derive(Parser, Debug)]
#[command(name = "gptdoc", version, about, long_about = None)]
struct Cli {
    /// Catalog document JSON files to process
    inputs: Vec<PathBuf>,

    /// Directory the export files are written to
    #[arg(short, long, default_value = "exports")]
    out_dir: PathBuf,

    /// Reject duplicate ids, dangling connections, incomplete fuzzy sets and out-of-range values
    #[arg(long)]
    strict: bool,

    /// Do not write the `<name>.export.json` file
    #[arg(long)]
    no_json: bool,

    /// Do not write the `<name>.report.html` file
    #[arg(long)]
    no_html: bool,

    /// Image embedded in the HTML report header
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Log at debug level unless GPTDOC_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    /// Run in interactive mode to be prompted for the document to process
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = if cli.human {
        run_interactive(cli)
    } else {
        run_non_interactive(cli)
    };

    if let Err(e) = result {
        exit_with_error(&format!("{:#}", e));
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "gptdoc=debug" } else { "gptdoc=info" };
    let filter = EnvFilter::try_from_env("GPTDOC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn build_config(cli: &Cli) -> Result<PipelineConfig> {
    let strictness = if cli.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    let mut config = PipelineConfig::new(&cli.out_dir)?
        .with_strictness(strictness)
        .with_json(!cli.no_json)
        .with_html(!cli.no_html);
    if let Some(logo) = &cli.logo {
        config = config.with_logo(logo)?;
    }
    Ok(config)
}

/// Runs one cycle per input. A failing document does not stop the others.
fn run_non_interactive(cli: Cli) -> Result<()> {
    if cli.inputs.is_empty() {
        anyhow::bail!("at least one input document is required in non-interactive mode");
    }
    let pipeline = Pipeline::new(build_config(&cli)?);

    let mut failures = 0;
    for input in &cli.inputs {
        if let Err(e) = run_document(&pipeline, input) {
            eprintln!("\nError: {:#}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} document(s) failed", failures, cli.inputs.len());
    }
    Ok(())
}

fn run_document(pipeline: &Pipeline, input: &Path) -> Result<()> {
    let start = Instant::now();
    let outcome = pipeline
        .run(input)
        .with_context(|| format!("processing '{}'", input.display()))?;
    let duration = start.elapsed();

    println!("\n{}", outcome.summary);
    if let Err(e) = &outcome.metrics {
        println!("  -> Metrics not available: {}", e);
    }
    for path in &outcome.written {
        println!("  -> Wrote '{}'", path.display());
    }
    println!("  -> Finished in {:?}", duration);
    Ok(())
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(mut cli: Cli) -> Result<()> {
    println!("--- gptdoc Interactive Mode ---");

    let input = prompt_for_input("Enter document path", None)?;
    if input.is_empty() {
        anyhow::bail!("no document selected");
    }
    let out_dir = prompt_for_input("Enter output directory", Some("exports"))?;
    let strict = prompt_for_input("Use strict validation? (y/n)", Some("n"))?;

    cli.inputs = vec![PathBuf::from(input)];
    cli.out_dir = PathBuf::from(out_dir);
    cli.strict = matches!(strict.to_lowercase().as_str(), "y" | "yes");

    run_non_interactive(cli)
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> Result<String> {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush()?;

    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(trimmed)
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
