use crate::evaluate::{run_check, run_classify, CheckArgs, ClassifyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vehicle_credit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vehicle Credit Service",
    about = "Run the vehicle credit API or evaluate credit rules from the command line",
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
    /// Show which credit type an age and income would be offered
    Classify(ClassifyArgs),
    /// Check whether an age and income qualify for a vehicle category
    Check(CheckArgs),
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
        Command::Classify(args) => run_classify(args),
        Command::Check(args) => run_check(args),
    }
}
