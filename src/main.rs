use clap::Parser;
use glyco::adapters::mock_service::MockService;
use glyco::adapters::prediction_client::HttpPredictionClient;
use glyco::adapters::terminal;
use glyco::cli::{Cli, Command};
use glyco::config::Settings;
use glyco::form::fields;
use glyco::submission::{SubmissionController, SubmissionState};
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries the form and result
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    match &cli.command {
        Command::Fields => {
            print!("{}", terminal::render_registry(fields()));
            Ok(ExitCode::SUCCESS)
        }
        Command::Assess(args) => {
            info!("Using prediction service at {}", settings.service.base_url);
            let client = HttpPredictionClient::new(&settings.service)?;
            let mut controller = SubmissionController::new();

            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            let state = terminal::run_assessment(
                &mut controller,
                &client,
                &args.values(),
                args.interactive,
                args.retries,
                &mut input,
                &mut output,
            )
            .await?;

            Ok(match state {
                SubmissionState::Succeeded { .. } => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Command::MockServer(_) => {
            let mock = &settings.mock_server;
            let addr: SocketAddr = format!("{}:{}", mock.host, mock.port).parse()?;
            info!("Starting mock prediction service (label: {})", mock.label);
            MockService::new(mock).serve(addr).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
