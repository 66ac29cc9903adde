//! refanchor CLI - turn spreadsheet instructions into self-adjusting formulas

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use refanchor::prelude::*;
use refanchor::{
    default_copy_path, default_export_path, try_process_range, CellAddress, LlmConfig,
    LlmDrafter,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "refanchor")]
#[command(
    author,
    version,
    about = "Turn spreadsheet instructions that mention cells into self-adjusting formulas"
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate formulas for a column of instructions in a workbook
    Generate {
        /// Input workbook (xlsx, xlsm, csv)
        workbook: PathBuf,

        /// Column holding the instructions
        #[arg(short, long)]
        column: String,

        /// Rows to process, e.g. "1:10" or "7"
        #[arg(short, long)]
        rows: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Results file, xlsx/csv/json (default: <stem>_Generated_Formulas.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write each formula into this column, on the instruction's row
        #[arg(short, long)]
        target_column: Option<String>,

        /// Workbook that receives the formulas (default: <stem>_with_formulas.xlsx)
        #[arg(long, requires = "target_column", conflicts_with = "in_place")]
        write_to: Option<PathBuf>,

        /// Write the formulas into the input workbook itself. Only cell values
        /// and formulas are kept; styles, merged cells, column widths, defined
        /// names and data validations are lost. Needs --discard-formatting.
        #[arg(long, requires_all = ["target_column", "discard_formatting"])]
        in_place: bool,

        /// Accept that --in-place rewrites the workbook without its formatting
        #[arg(long, requires = "in_place")]
        discard_formatting: bool,

        /// How formulas are produced
        #[arg(long, value_enum, default_value_t = StrategyKind::Template)]
        strategy: StrategyKind,

        /// Model used by the llm strategy
        #[arg(long, env = "REFANCHOR_MODEL")]
        model: Option<String>,

        /// Pause between language-model calls, in milliseconds
        #[arg(long, env = "REFANCHOR_DELAY_MS", default_value = "100")]
        delay_ms: u64,
    },

    /// Translate instructions given on the command line
    Translate {
        /// Instruction texts
        #[arg(required = true)]
        texts: Vec<String>,

        /// Also save the results (xlsx, csv, json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the cell references found in a text
    Extract {
        /// Instruction text
        text: String,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    /// Built-in templates
    Template,
    /// Ask a language model (needs REFANCHOR_OPENAI_KEY or OPENAI_API_KEY)
    Llm,
}

/// Where formulas go when a target column is given
enum Destination {
    InPlace,
    Copy(PathBuf),
}

struct GenerateArgs {
    workbook: PathBuf,
    column: String,
    rows: String,
    sheet: Option<String>,
    output: PathBuf,
    target: Option<(String, Destination)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            workbook,
            column,
            rows,
            sheet,
            output,
            target_column,
            write_to,
            in_place,
            discard_formatting: _,
            strategy,
            model,
            delay_ms,
        } => {
            let output = output.unwrap_or_else(|| default_export_path(&workbook));
            let target = target_column.map(|col| {
                let destination = if in_place {
                    Destination::InPlace
                } else {
                    Destination::Copy(write_to.unwrap_or_else(|| default_copy_path(&workbook)))
                };
                (col, destination)
            });
            let args = GenerateArgs {
                workbook,
                column,
                rows,
                sheet,
                output,
                target,
            };

            match strategy {
                StrategyKind::Template => generate(&args, TemplateStrategy),
                StrategyKind::Llm => {
                    let mut config =
                        LlmConfig::from_env().context("Language-model strategy unavailable")?;
                    if let Some(model) = model {
                        config = config.with_model(model);
                    }
                    let drafter = LlmDrafter::new(config)
                        .context("Failed to set up the language-model client")?;
                    let options = BatchOptions {
                        delay: Duration::from_millis(delay_ms),
                    };
                    generate(&args, DraftingStrategy::with_options(drafter, options))
                }
            }
        }
        Commands::Translate { texts, output } => translate(&texts, output.as_deref()),
        Commands::Extract { text } => {
            println!("{}", extract(&text));
            Ok(())
        }
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn generate<S: FormulaStrategy>(args: &GenerateArgs, strategy: S) -> Result<()> {
    if !args.workbook.exists() {
        bail!("File not found: {}", args.workbook.display());
    }

    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("Failed to open '{}'", args.workbook.display()))?;

    let sheet = match &args.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .map(|s| s.to_string())
            .context("Workbook has no sheets")?,
    };

    let mut driver = BatchDriver::new(strategy);
    let results = try_process_range(&workbook, &sheet, &args.column, &args.rows, &mut driver)
        .with_context(|| format!("Failed to process rows {} of '{}'", args.rows, sheet))?;

    if results.is_empty() {
        eprintln!("No instructions found in column {} rows {}", args.column, args.rows);
        return Ok(());
    }

    log::info!(
        "{} formula(s) generated from '{}' sheet '{}'",
        results.len(),
        args.workbook.display(),
        sheet
    );
    for result in &results {
        println!("{}!{}: {}", result.sheet, result.address, result.formula);
    }

    save_results(&results, &args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    eprintln!(
        "Wrote {} result(s) to '{}'",
        results.len(),
        args.output.display()
    );

    if let Some((column, destination)) = &args.target {
        let written = write_formulas(&mut workbook, &sheet, column, &results)
            .with_context(|| format!("Failed to write formulas into column {}", column))?;
        let path = match destination {
            Destination::InPlace => {
                log::warn!(
                    "rewriting '{}' in place; formatting is not preserved",
                    args.workbook.display()
                );
                eprintln!(
                    "Note: '{}' is rewritten with cell values and formulas only; \
                     styles, merged cells, column widths, defined names and data \
                     validations are dropped",
                    args.workbook.display()
                );
                args.workbook.as_path()
            }
            Destination::Copy(path) => path.as_path(),
        };
        workbook
            .save(path)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!(
            "Added {} formula(s) to column {} in '{}'",
            written,
            column.to_ascii_uppercase(),
            path.display()
        );
    }

    Ok(())
}

fn translate(texts: &[String], output: Option<&Path>) -> Result<()> {
    let mut driver = BatchDriver::new(TemplateStrategy);
    let mut instructions = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        let address = CellAddress::new(i as u32, 0);
        instructions.push(Instruction::new("Manual", address, text.as_str()));
    }
    let results = driver.process_all(instructions);

    for result in &results {
        println!("Instruction: {}", result.instruction);
        println!("References:  {}", result.references);
        println!("Archetype:   {}", result.archetype);
        println!("Formula:     {}", result.formula);
        println!();
    }

    if let Some(path) = output {
        save_results(&results, path)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote {} result(s) to '{}'", results.len(), path.display());
    }
    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook =
        Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("{}: {}", i, name);
    }

    Ok(())
}
