use crate::config::{StructureCatalog, StructureEntry};
use crate::error::{ReportError, ReportResult};
use crate::excel::list_sheets;
use crate::report::ReportJob;
use crate::types::{ColumnStructure, DateRange, MonthLabelYear, WriteOutcome};
use chrono::{NaiveDate, NaiveDateTime};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Where the column structure for a report comes from.
#[derive(Debug, Clone, Default)]
pub struct StructureSelection {
    /// Name of a catalog entry
    pub structure: Option<String>,
    pub name_column: Option<String>,
    pub date_column: Option<String>,
    pub data_columns: Option<String>,
}

impl StructureSelection {
    /// Explicit columns win over a catalog lookup.
    pub fn resolve(&self, catalog_path: &Path) -> ReportResult<ColumnStructure> {
        match (
            &self.name_column,
            &self.date_column,
            &self.data_columns,
            &self.structure,
        ) {
            (Some(name), Some(date), Some(data), _) => {
                Ok(ColumnStructure::from_delimited(name, date, data))
            }
            (_, _, _, Some(structure)) => {
                let catalog = StructureCatalog::load(catalog_path)?;
                Ok(catalog.get(structure)?.to_structure())
            }
            _ => Err(ReportError::MissingStructure),
        }
    }
}

/// Options of the `report` command.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub sheet: String,
    pub output: PathBuf,
    pub selection: StructureSelection,
    pub catalog: PathBuf,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub first_record_year: bool,
}

/// Parse a `--from` bound: a date means the start of that day.
pub fn parse_from_bound(s: &str) -> Result<NaiveDateTime, String> {
    parse_bound(s, false)
}

/// Parse a `--to` bound: a date means the end of that day.
pub fn parse_to_bound(s: &str) -> Result<NaiveDateTime, String> {
    parse_bound(s, true)
}

fn parse_bound(s: &str, end_of_day: bool) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS", s))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.ok_or_else(|| format!("invalid date '{}'", s))
}

/// Execute the report command
pub fn report(options: ReportOptions) -> ReportResult<()> {
    println!("{}", "📄 PsyTest - Generating report".bold().green());
    println!("   File:  {}", options.input.display());
    println!("   Sheet: {}", options.sheet.bright_blue().bold());

    let structure = options.selection.resolve(&options.catalog)?;
    let date_range = match (options.from, options.to) {
        (Some(from), Some(to)) => {
            println!("   Period: {} → {}", from, to);
            Some(DateRange::new(from, to)?)
        }
        _ => None,
    };
    let month_year = if options.first_record_year {
        MonthLabelYear::FirstRecord
    } else {
        MonthLabelYear::PerRecord
    };
    println!();

    let job = ReportJob::new(options.sheet, structure)
        .with_date_range(date_range)
        .with_month_year(month_year);
    let summary = job.run(&options.input, &options.output)?;

    println!(
        "   {} records in {} month sections",
        summary.records.to_string().bold(),
        summary.groups.to_string().bold()
    );
    println!("   Output: {}", summary.output.display());
    println!();

    match &summary.outcome {
        WriteOutcome::Complete => println!("{}", "✅ Saved successfully!".bold().green()),
        WriteOutcome::Partial { failed_rows } => println!(
            "{}",
            format!(
                "⚠️  Document saved, but the following rows could not be processed: {}",
                join_rows(failed_rows)
            )
            .yellow()
        ),
    }

    Ok(())
}

fn join_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute the sheets command - list worksheet names
pub fn sheets(input: PathBuf) -> ReportResult<()> {
    let names = list_sheets(&input)?;
    println!("{}", format!("📑 Sheets in {}:", input.display()).bold().green());
    for name in names {
        println!("   {}", name);
    }
    Ok(())
}

/// List catalog entries
pub fn structures_list(catalog: PathBuf) -> ReportResult<()> {
    let catalog_data = StructureCatalog::load(&catalog)?;
    println!("{}", "🧩 Test structures:".bold().green());
    for entry in &catalog_data.structures {
        println!(
            "   {}  name={} date={} data={}",
            entry.name.bright_blue().bold(),
            entry.name_column,
            entry.date_column,
            entry.data_columns
        );
    }
    Ok(())
}

/// Add (or with `replace`, overwrite) a catalog entry
pub fn structures_add(catalog: PathBuf, entry: StructureEntry, replace: bool) -> ReportResult<()> {
    // Validate labels before persisting anything.
    crate::core::RowExtractor::new(&entry.to_structure(), None)?;

    let mut catalog_data = StructureCatalog::load(&catalog)?;
    let name = entry.name.clone();
    if replace {
        catalog_data.upsert(entry);
    } else {
        catalog_data.add(entry)?;
    }
    catalog_data.save(&catalog)?;

    println!("{}", format!("✅ Saved structure '{}'", name).green());
    Ok(())
}

/// Remove a catalog entry
pub fn structures_remove(catalog: PathBuf, name: String) -> ReportResult<()> {
    let mut catalog_data = StructureCatalog::load(&catalog)?;
    catalog_data.remove(&name)?;
    catalog_data.save(&catalog)?;

    println!("{}", format!("🗑️  Removed structure '{}'", name).green());
    Ok(())
}
