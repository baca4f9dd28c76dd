use anyhow::{Context, Result, bail};
use bankcsv_core::{LayoutKind, write_csv};
use bankcsv_extract::{Converter, GeminiExtractor};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io;
use std::path::PathBuf;

mod config;
mod pdftext;

#[derive(Parser, Debug)]
#[command(name = "bankcsv", version, about = "Bank statement PDF/text to CSV converter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert statement files (.pdf or extracted .txt) to a transaction CSV
    Convert {
        /// Input files, processed in the order given
        inputs: Vec<PathBuf>,

        /// Output CSV path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Force a layout instead of classifying by filename
        #[arg(long, value_enum, default_value = "auto")]
        layout: LayoutArg,
    },

    /// Manage ~/.bankcsv/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    Auto,
    Absa,
    FreeForm,
}

fn force_absa(_id: &str) -> LayoutKind {
    LayoutKind::FixedColumnAbsa
}

fn force_free_form(_id: &str) -> LayoutKind {
    LayoutKind::FreeForm
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            inputs,
            out,
            layout,
        } => convert(inputs, out, layout),

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(),
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg)?);
                Ok(())
            }
        },
    }
}

fn convert(inputs: Vec<PathBuf>, out: Option<PathBuf>, layout: LayoutArg) -> Result<()> {
    if inputs.is_empty() {
        bail!("no input files given");
    }

    let cfg = config::load_config()?;
    let extractor = GeminiExtractor::new(config::extractor_config(&cfg)?);

    let converter = match layout {
        LayoutArg::Auto => Converter::new(extractor),
        LayoutArg::Absa => Converter::new(extractor).with_classifier(force_absa),
        LayoutArg::FreeForm => Converter::new(extractor).with_classifier(force_free_form),
    };

    let mut documents = Vec::new();
    for path in &inputs {
        documents.push(pdftext::read_document(path)?);
    }

    let outcome = converter.convert(&documents);

    for failure in &outcome.failures {
        eprintln!("{}: {}", failure.document, failure.reason);
    }

    if outcome.is_empty() {
        println!("No transactions could be extracted.");
        return Ok(());
    }

    match out {
        Some(path) => {
            let file =
                File::create(&path).with_context(|| format!("create {}", path.display()))?;
            write_csv(&outcome.records, file)?;
            println!(
                "Wrote {} transactions from {} file(s) to {}",
                outcome.records.len(),
                documents.len(),
                path.display()
            );
        }
        None => {
            write_csv(&outcome.records, io::stdout().lock())?;
        }
    }

    Ok(())
}
