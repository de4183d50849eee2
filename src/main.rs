use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use colored::Colorize;
use psytest_results::cli::{self, ReportOptions, StructureSelection};
use psytest_results::config::{StructureEntry, DEFAULT_CATALOG_FILE};
use psytest_results::error::ReportResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "psytest")]
#[command(about = "Build month-grouped Word reports from test result spreadsheets")]
#[command(long_about = "PsyTest - test result spreadsheets → Word reports

Reads one sheet of an .xlsx/.xls workbook, validates every row against a
column structure (name column, date column, data columns), sorts the
results by date and name, and writes a .docx with one section per month.

COMMANDS:
  report      - Generate a .docx report from a sheet
  sheets      - List the sheets of a workbook
  structures  - List / add / remove named column structures

EXAMPLES:
  psytest sheets results.xlsx
  psytest report results.xlsx --sheet Відповіді --structure Соціоніка -o report.docx
  psytest report results.xlsx --sheet Sheet1 --name-column B --date-column A \\
      --data-columns BS,BT -o report.docx --from 2024-03-01 --to 2024-03-31")]
#[command(version)]
struct Cli {
    /// Structure catalog (YAML); built-in structures are used if it does not exist
    #[arg(long, global = true, env = "PSYTEST_STRUCTURES", default_value = DEFAULT_CATALOG_FILE)]
    structures: PathBuf,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Generate a .docx report from one worksheet.

Row 1 is the header. Every other row needs a date (date-typed cell, 1900 or
later), a name and a value in every data column; rows that fail are skipped
and listed at the end. With --from/--to only rows inside the period (bounds
included) are used; rows outside it are skipped silently.

Data cells may contain several paragraphs separated by '|'. The first
sentence of each cell is printed in bold.")]
    /// Generate a .docx report from a sheet
    Report {
        /// Path to the workbook (.xlsx, .xls)
        input: PathBuf,

        /// Worksheet name
        #[arg(short, long)]
        sheet: String,

        /// Output .docx path
        #[arg(short, long)]
        output: PathBuf,

        /// Named structure from the catalog
        #[arg(long)]
        structure: Option<String>,

        /// Column holding the person's name (e.g. B)
        #[arg(long, requires_all = ["date_column", "data_columns"])]
        name_column: Option<String>,

        /// Column holding the test date (e.g. A)
        #[arg(long, requires_all = ["name_column", "data_columns"])]
        date_column: Option<String>,

        /// Comma-separated data columns (e.g. HA,HC,HE)
        #[arg(long, requires_all = ["name_column", "date_column"])]
        data_columns: Option<String>,

        /// Start of the period (YYYY-MM-DD [HH:MM:SS])
        #[arg(long, requires = "to", value_parser = cli::parse_from_bound)]
        from: Option<NaiveDateTime>,

        /// End of the period, inclusive (YYYY-MM-DD [HH:MM:SS])
        #[arg(long, requires = "from", value_parser = cli::parse_to_bound)]
        to: Option<NaiveDateTime>,

        /// Label every month with the year of the earliest record
        #[arg(long)]
        first_record_year: bool,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Path to the workbook (.xlsx, .xls)
        input: PathBuf,
    },

    /// Manage named column structures
    Structures {
        #[command(subcommand)]
        action: StructureAction,
    },
}

#[derive(Subcommand)]
enum StructureAction {
    /// List structures
    List,

    /// Add a structure
    Add {
        /// Structure name
        name: String,

        #[arg(long)]
        name_column: String,

        #[arg(long)]
        date_column: String,

        /// Comma-separated data columns
        #[arg(long)]
        data_columns: String,

        /// Overwrite an existing structure with the same name
        #[arg(long)]
        replace: bool,
    },

    /// Remove a structure
    Remove {
        /// Structure name
        name: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "psytest=debug,psytest_results=debug"
    } else {
        "psytest=info,psytest_results=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> ReportResult<()> {
    match cli.command {
        Commands::Report {
            input,
            sheet,
            output,
            structure,
            name_column,
            date_column,
            data_columns,
            from,
            to,
            first_record_year,
        } => cli::report(ReportOptions {
            input,
            sheet,
            output,
            selection: StructureSelection {
                structure,
                name_column,
                date_column,
                data_columns,
            },
            catalog: cli.structures,
            from,
            to,
            first_record_year,
        }),

        Commands::Sheets { input } => cli::sheets(input),

        Commands::Structures { action } => match action {
            StructureAction::List => cli::structures_list(cli.structures),
            StructureAction::Add {
                name,
                name_column,
                date_column,
                data_columns,
                replace,
            } => cli::structures_add(
                cli.structures,
                StructureEntry {
                    name,
                    name_column,
                    date_column,
                    data_columns,
                },
                replace,
            ),
            StructureAction::Remove { name } => cli::structures_remove(cli.structures, name),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "❌ Error:".bold().red(), e);
        std::process::exit(1);
    }
}
