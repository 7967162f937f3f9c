use crate::demo::{run_compatibility_report, run_demo, CompatibilityReportArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use outreach_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Campaign Outreach Orchestrator",
    about = "Run and demonstrate the campaign eligibility service from the command line",
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
    /// Score prospect lists against the campaign template catalog
    Compatibility {
        #[command(subcommand)]
        command: CompatibilityCommand,
    },
    /// Run an end-to-end CLI demo covering validation and assignment
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CompatibilityCommand {
    /// Generate a campaign compatibility report for a prospect CSV export
    Report(CompatibilityReportArgs),
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
        Command::Compatibility {
            command: CompatibilityCommand::Report(args),
        } => run_compatibility_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
