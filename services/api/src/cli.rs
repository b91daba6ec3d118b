use crate::report::{run_report, run_roster, ReportArgs, RosterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use evasao::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Evasion Observatory",
    about = "Serve or print attrition dashboards built from the auditor roster export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the attrition dashboard for the whole roster and one area
    Report(ReportArgs),
    /// List the roster of one area with optional filters
    Roster(RosterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Roster(args) => run_roster(args),
    }
}
