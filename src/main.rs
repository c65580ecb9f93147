use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use housing_kpi::config::AppConfig;
use housing_kpi::error::AppError;
use housing_kpi::telemetry;
use housing_kpi::workflows::import::{ImportOutcome, UnitImporter};
use housing_kpi::workflows::refurbishment::domain::Department;
use housing_kpi::workflows::refurbishment::kpi::views::KpiSummaryTable;
use housing_kpi::workflows::refurbishment::{
    aggregate, derive_units, DerivedUnit, KpiQuery, KpiReport, UnitRegistry,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "housing-kpi",
    about = "Track housing unit refurbishment and report monthly KPIs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly KPI reporting
    Kpi {
        #[command(subcommand)]
        command: KpiCommand,
    },
    /// Inspect the unit tracking sheet
    Units {
        #[command(subcommand)]
        command: UnitsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum KpiCommand {
    /// Print the monthly summary table for a unit sheet
    Report(KpiReportArgs),
}

#[derive(Subcommand, Debug)]
enum UnitsCommand {
    /// List every unit with its derived durations and statuses
    List(UnitsListArgs),
    /// Check a unit sheet and print rejected rows
    Validate(UnitsValidateArgs),
}

#[derive(Args, Debug)]
struct KpiReportArgs {
    /// CSV export of the unit tracking sheet
    #[arg(long)]
    units: PathBuf,
    /// First month of the report (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    start: Option<NaiveDate>,
    /// Last month of the report (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    end: Option<NaiveDate>,
    /// Months to cover when no start month is given
    #[arg(long)]
    months: Option<u32>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct UnitsListArgs {
    /// CSV export of the unit tracking sheet
    #[arg(long)]
    units: PathBuf,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Print derived units as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct UnitsValidateArgs {
    /// CSV export of the unit tracking sheet
    #[arg(long)]
    units: PathBuf,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "housing KPI tool starting");

    match cli.command {
        Command::Kpi {
            command: KpiCommand::Report(args),
        } => run_kpi_report(&config, args),
        Command::Units {
            command: UnitsCommand::List(args),
        } => run_units_list(&config, args),
        Command::Units {
            command: UnitsCommand::Validate(args),
        } => run_units_validate(&config, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_month(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}

/// Imports the sheet into a registry, reporting rejected rows on stderr.
fn load_registry(config: &AppConfig, path: &Path) -> Result<UnitRegistry, AppError> {
    let outcome = UnitImporter::new(config.import).from_path(path)?;
    report_rejections(&outcome, &mut std::io::stderr())?;

    let mut registry = UnitRegistry::new();
    let summary = registry.upsert_all(outcome.units());
    info!(
        created = summary.created,
        updated = summary.updated,
        path = %path.display(),
        "unit sheet loaded"
    );
    Ok(registry)
}

fn run_kpi_report(config: &AppConfig, args: KpiReportArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let registry = load_registry(config, &args.units)?;

    let mut query = KpiQuery::with_config(today, &config.kpi);
    query.start_month = args.start;
    query.end_month = args.end;
    if let Some(months) = args.months {
        query = query.last_months(months);
    }

    let report = aggregate(&registry.units(), &query);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_kpi_report(&report, today);
    }

    Ok(())
}

fn run_units_list(config: &AppConfig, args: UnitsListArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let registry = load_registry(config, &args.units)?;
    let derived = derive_units(&registry.units(), today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&derived)?);
    } else {
        render_units(&derived, today);
    }

    Ok(())
}

fn run_units_validate(config: &AppConfig, args: UnitsValidateArgs) -> Result<(), AppError> {
    let outcome = UnitImporter::new(config.import).from_path(&args.units)?;

    println!(
        "{} rows accepted, {} rows rejected",
        outcome.accepted.len(),
        outcome.rejected.len()
    );
    report_rejections(&outcome, &mut std::io::stdout())?;
    Ok(())
}

fn report_rejections<W: std::io::Write>(
    outcome: &ImportOutcome,
    out: &mut W,
) -> std::io::Result<()> {
    for rejection in &outcome.rejected {
        for error in &rejection.errors {
            writeln!(
                out,
                "- row {}: {}: {}",
                rejection.row, error.field, error.message
            )?;
        }
    }
    Ok(())
}

fn render_kpi_report(report: &KpiReport, today: NaiveDate) {
    println!("Housing refurbishment KPIs (evaluated {today})");
    println!("{}", format_summary_table(&report.summary_table()));

    println!("\nUnits by status");
    let breakdown = report.status_breakdown();
    if breakdown.is_empty() {
        println!("- none");
    }
    for entry in breakdown {
        println!("- {}: {}", entry.status_label, entry.units);
    }
}

fn format_summary_table(table: &KpiSummaryTable) -> String {
    let label_width = table
        .rows
        .iter()
        .map(|row| row.label.len())
        .max()
        .unwrap_or(0)
        + 4;

    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    let mut header = format!("{:<label_width$}", "KPI");
    for month in &table.months {
        header.push_str(&format!("{month:>9}"));
    }
    lines.push(header);

    for row in &table.rows {
        let mut line = format!(
            "{:<label_width$}",
            format!("{:>2}. {}", row.number, row.label)
        );
        for cell in &row.cells {
            line.push_str(&format!("{:>9}", cell.display()));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn render_units(units: &[DerivedUnit], today: NaiveDate) {
    println!("Housing units (evaluated {today})");
    for derived in units {
        let days = |value: Option<i64>| match value {
            Some(days) => days.to_string(),
            None => "-".to_string(),
        };
        println!(
            "- {} | {} | {} BR{} | {} | maintenance {} | prepare {} days | variance {}",
            derived.unit.unit_number,
            derived.unit.court,
            derived.unit.bedrooms,
            if derived.unit.extended { " ext" } else { "" },
            derived.submission_status.label(),
            derived.maintenance_submission_status.label(),
            days(derived.total_days_to_prepare_the_house),
            derived.schedule_variance,
        );

        let durations: Vec<String> = Department::ordered()
            .into_iter()
            .filter_map(|department| {
                derived
                    .department_durations
                    .get(department)
                    .map(|days| format!("{} {days}", department.label()))
            })
            .collect();
        if !durations.is_empty() {
            println!("    days held: {}", durations.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_arguments_resolve_to_first_day() {
        assert_eq!(
            parse_month("2023-04"),
            Ok(NaiveDate::from_ymd_opt(2023, 4, 1).expect("valid date"))
        );
        assert!(parse_month("April").is_err());
        assert!(parse_date("2023-13-01").is_err());
    }

    #[test]
    fn summary_table_has_a_line_per_metric() {
        let today = NaiveDate::from_ymd_opt(2023, 3, 15).expect("valid date");
        let query = KpiQuery::as_of(today).last_months(2);
        let report = aggregate(&[], &query);

        let rendered = format_summary_table(&report.summary_table());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines[0].contains("Feb-23"));
        assert!(lines[0].contains("Mar-23"));
        assert!(lines[1].contains("1. Units Received From Maintenance"));
    }

    #[test]
    fn rejections_are_listed_per_field() {
        let csv = "House No.,Court,BR No.\nabc,Rawda,2\n";
        let outcome = UnitImporter::default()
            .from_reader(std::io::Cursor::new(csv))
            .expect("batch readable");

        let mut out = Vec::new();
        report_rejections(&outcome, &mut out).expect("vec writer accepts output");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "- row 2: unitNumber: House No must be a number\n");
    }

    struct ClosedPipe;

    impl std::io::Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejection_write_failures_surface_as_io_errors() {
        let csv = "House No.,Court,BR No.\nabc,Rawda,2\n";
        let outcome = UnitImporter::default()
            .from_reader(std::io::Cursor::new(csv))
            .expect("batch readable");

        let err = report_rejections(&outcome, &mut ClosedPipe).expect_err("write fails");
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        assert!(matches!(AppError::from(err), AppError::Io(_)));
    }
}
