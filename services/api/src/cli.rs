use crate::estimate::{run_estimate, run_tables, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_valuation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Property Valuation Service",
    about = "Serve and run property valuations from the command line",
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
    /// Appraise a single property described by a JSON document
    Estimate(EstimateArgs),
    /// Print the reference tables behind the pricing formula
    Tables,
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
        Command::Estimate(args) => run_estimate(args),
        Command::Tables => {
            run_tables();
            Ok(())
        }
    }
}
