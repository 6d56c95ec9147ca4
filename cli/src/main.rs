//! uncv CLI - structured résumé extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use uncv::{parse_file_with_options, ExtractOptions, JsonFormat, RunExtractor};

#[derive(Parser)]
#[command(name = "uncv")]
#[command(version)]
#[command(about = "Extract résumé PDFs to structured JSON", long_about = None)]
struct Cli {
    /// Input résumé PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(short, long, value_name = "FILE", default_value = "resume.json")]
    output: PathBuf,

    /// Minimum font weight treated as bold
    #[arg(long, default_value = "600")]
    bold_weight: i64,

    /// Maximum number of pages to process (0 = all)
    #[arg(long, default_value = "0")]
    max_pages: u32,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a résumé PDF to JSON on stdout
    Parse {
        /// Input résumé PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show a summary of what was extracted
    Info {
        /// Input résumé PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Dump raw text runs with font metadata
    Runs {
        /// Input résumé PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = ExtractOptions::new()
        .with_bold_weight_threshold(cli.bold_weight)
        .with_max_pages(cli.max_pages);

    let result = match cli.command {
        Some(Commands::Parse {
            input,
            output,
            compact,
        }) => cmd_parse(&input, output.as_deref(), compact, options),
        Some(Commands::Info { input }) => cmd_info(&input, options),
        Some(Commands::Runs { input }) => cmd_runs(&input, options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract to the output file
            if let Some(input) = cli.input {
                cmd_extract(&input, &cli.output, options)
            } else {
                println!("{}", "Usage: uncv <FILE> [-o OUTPUT]".yellow());
                println!("       uncv --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: &Path,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );

    pb.set_message("Parsing résumé...");
    let record = parse_file_with_options(input, options)?;

    pb.set_message("Writing JSON...");
    let json = uncv::render::to_json(&record, JsonFormat::Pretty)?;
    fs::write(output, &json)?;

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Saved to".green().bold(), output.display());
    print_summary(&record);

    Ok(())
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = parse_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = uncv::render::to_json(&record, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, options: ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    let record = parse_file_with_options(input, options)?;

    println!("{}", "Résumé Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    print_summary(&record);

    Ok(())
}

fn cmd_runs(input: &Path, options: ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = RunExtractor::open_with_options(input, options)?;
    let runs = extractor.extract()?;
    let classified = uncv::classify_runs(runs, extractor.options());

    for run in &classified {
        let marker = if run.emphasized {
            "B".red().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} p{} ({:7.1},{:7.1}) {:5.1}pt {:24} {:?}",
            marker,
            run.run.page_index,
            run.run.x,
            run.run.y,
            run.run.font_size,
            run.run.font_name,
            run.run.text,
        );
    }

    println!("\n{} {} runs", "Total:".bold(), classified.len());

    Ok(())
}

fn print_summary(record: &uncv::ResumeRecord) {
    if !record.contact_info.name.is_empty() {
        println!("{}: {}", "Name".bold(), record.contact_info.name);
    }
    if !record.contact_info.email.is_empty() {
        println!("{}: {}", "Email".bold(), record.contact_info.email);
    }

    println!();
    println!("{}", "Extracted Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Skill categories".bold(), record.skills.len());
    println!("{}: {}", "Work experience".bold(), record.work_experience.len());
    println!("{}: {}", "Projects".bold(), record.projects.len());
    println!("{}: {}", "Education".bold(), record.education.len());
    println!("{}: {}", "Certifications".bold(), record.certifications.len());
    println!(
        "{}: {}",
        "Extracurriculars".bold(),
        record.extracurriculars.len()
    );
}

fn cmd_version() {
    println!("{} {}", "uncv".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Résumé PDF extraction tool");
    println!();
    println!("License: MIT");
}
