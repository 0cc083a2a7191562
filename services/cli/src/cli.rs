use crate::demo::{run_demo, DemoArgs};
use crate::error::AppError;
use crate::report::{run_evaluate, run_max_offer, EvaluateArgs, MaxOfferArgs};
use clap::{Parser, Subcommand};
use deal_engine::config::AppConfig;
use deal_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Deal Grader",
    about = "Evaluate rental property deals from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a deal file and print the full underwriting report
    Evaluate(EvaluateArgs),
    /// Solve the maximum allowable offer for a debt coverage target
    MaxOffer(MaxOfferArgs),
    /// Run the evaluation over a built-in sample duplex
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Evaluate(args) => run_evaluate(args, &config),
        Command::MaxOffer(args) => run_max_offer(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
