use crate::evaluate::{run_evaluate, run_questionnaire, EvaluateArgs, QuestionnaireArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use investor_readiness::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Investor Readiness Evaluator",
    about = "Score business questionnaires for investor readiness and export CSV reports",
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
    /// Print the questionnaire with category weights and branch triggers
    Questionnaire(QuestionnaireArgs),
    /// Score an answer sheet and write the CSV report
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON file with category weights and option scores
    #[arg(long)]
    pub(crate) scoring_config: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questionnaire(args) => run_questionnaire(args),
        Command::Evaluate(args) => run_evaluate(args),
    }
}
