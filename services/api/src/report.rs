use crate::infra::{evaluation_time, load_path_or_candidates, DataSource};
use chrono::NaiveDate;
use clap::Args;
use evasao::config::AppConfig;
use evasao::error::AppError;
use evasao::observatory::attrition::report::DashboardView;
use evasao::observatory::roster::{roster, status_counts, RosterQuery};
use evasao::observatory::{AuditorRecord, DashboardReport, ReportOptions};
use evasao::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Roster export to read instead of the configured candidate paths
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Area to scope the second view to (defaults to the configured area)
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Evaluation date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterArgs {
    /// Roster export to read instead of the configured candidate paths
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Area to list (defaults to the configured area)
    #[arg(long)]
    pub(crate) area: Option<String>,
    /// Case-insensitive name filter
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Only list candidates flagged as PCD
    #[arg(long)]
    pub(crate) pcd: bool,
    /// Only list candidates with this status
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Print the rows as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let ReportArgs {
        csv,
        area,
        today,
        json,
    } = args;

    let (records, data_source) = load_path_or_candidates(csv.as_deref(), &config.data)?;
    let area = area.unwrap_or_else(|| config.data.default_area.clone());
    let mut options = ReportOptions::new(evaluation_time(today)).with_area(area);
    options.observation_start = config.data.observation_start;
    let report = DashboardReport::build(&records, &options);

    if json {
        print_json(&report);
    } else {
        render_dashboard(&report, data_source);
    }
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let RosterArgs {
        csv,
        area,
        name,
        pcd,
        status,
        json,
    } = args;

    let (records, data_source) = load_path_or_candidates(csv.as_deref(), &config.data)?;
    let query = RosterQuery {
        area: area.unwrap_or_else(|| config.data.default_area.clone()),
        name_contains: name,
        disability_only: pcd,
        status,
    };
    let rows = roster(&records, &query);

    if json {
        print_json(&rows);
    } else {
        render_roster(&query, &rows, data_source);
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize output: {err}"),
    }
}

fn describe_source(data_source: DataSource) -> &'static str {
    match data_source {
        DataSource::Inline => "inline export",
        DataSource::File => "roster export from --csv",
        DataSource::Candidates => "configured roster export",
        DataSource::Empty => "no roster export found (empty dataset)",
    }
}

pub(crate) fn render_dashboard(report: &DashboardReport, data_source: DataSource) {
    println!("Evasion observatory");
    println!(
        "Generated at {} | Data source: {}",
        report.generated_at.format("%Y-%m-%d %H:%M"),
        describe_source(data_source)
    );
    println!("Areas: {}", report.areas.join(", "));

    match report.last_event_on {
        Some(date) => println!(
            "Days since last event: {} (last publication {})",
            report.days_since_last_event,
            date.format("%d/%m/%Y")
        ),
        None => println!(
            "Days since last event: {} (no publication recorded)",
            report.days_since_last_event
        ),
    }
    println!(
        "Longest streak without events: {} days",
        report.longest_streak_days
    );

    render_view("All areas", &report.overall);
    if let Some(area) = &report.area {
        render_view(&format!("Area {}", area.area), &area.view);
    }
}

fn render_view(title: &str, view: &DashboardView) {
    println!("\n{title}");
    println!(
        "Records: {} | Attrition: {} | Inactivity: {}",
        view.record_count, view.attrition_count, view.inactivity_count
    );

    if view.destinations.is_empty() {
        println!("\nDestinations: none");
    } else {
        println!("\nDestinations");
        for entry in &view.destinations {
            println!("- {}: {}", entry.bucket, entry.count);
        }
    }

    if view.combined.is_empty() {
        println!("\nMonthly events: none");
    } else {
        println!("\nMonthly events (attrition / inactivity / total)");
        for point in &view.combined {
            println!(
                "- {}: {} / {} / {}",
                point.label,
                view.attrition.value_for(&point.label).unwrap_or(0),
                view.inactivity.value_for(&point.label).unwrap_or(0),
                point.value
            );
        }
    }

    if !view.attrition_by_area.is_empty() {
        println!("\nAttrition by area");
        for entry in &view.attrition_by_area {
            println!("- {}: {}", entry.area, entry.count);
        }
    }
}

pub(crate) fn render_roster(
    query: &RosterQuery,
    rows: &[&AuditorRecord],
    data_source: DataSource,
) {
    println!("Roster for {}", query.area);
    println!("Data source: {}", describe_source(data_source));
    println!("Rows: {}", rows.len());

    let counts = status_counts(rows.iter().copied());
    if !counts.is_empty() {
        println!("\nBy status");
        for entry in &counts {
            println!("- {}: {}", entry.status, entry.count);
        }
    }

    if rows.is_empty() {
        return;
    }

    println!("\nCandidates");
    for record in rows {
        let rank = record.contest_rank.as_deref().unwrap_or("-");
        let status = record.status.as_deref().unwrap_or("-");
        match record.destination.as_deref() {
            Some(destination) => println!(
                "- [{}] {} | {} | {}",
                rank, record.name, status, destination
            ),
            None => println!("- [{}] {} | {}", rank, record.name, status),
        }
    }
}
