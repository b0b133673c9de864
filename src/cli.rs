use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::form::FieldId;

/// Diabetes risk assessment: collect eight measurements, validate them and ask
/// the prediction service for a risk classification
#[derive(Parser, Debug, Clone)]
#[command(name = "glyco", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "GLYCO_CONFIG", default_value = "glyco.toml")]
    pub config: PathBuf,

    /// Base URL of the prediction service
    #[arg(long, env = "GLYCO_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "GLYCO_TIMEOUT")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fill in the form and request a prediction
    Assess(AssessArgs),
    /// Run a local stand-in for the prediction service
    MockServer(MockServerArgs),
    /// List the measurements and their accepted ranges
    Fields,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AssessArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub pregnancies: Option<String>,

    /// Plasma glucose (mg/dL)
    #[arg(long, allow_negative_numbers = true)]
    pub glucose: Option<String>,

    /// Diastolic blood pressure (mmHg)
    #[arg(long, allow_negative_numbers = true)]
    pub blood_pressure: Option<String>,

    /// Triceps skin fold thickness (mm)
    #[arg(long, allow_negative_numbers = true)]
    pub skin_thickness: Option<String>,

    /// Serum insulin (μU/mL)
    #[arg(long, allow_negative_numbers = true)]
    pub insulin: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub bmi: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub diabetes_pedigree_function: Option<String>,

    /// Age in years
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<String>,

    /// Prompt for missing or invalid values, and offer a retry on failure
    #[arg(short, long)]
    pub interactive: bool,

    /// Automatic retries after a failed request
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

impl AssessArgs {
    /// Values given on the command line, in registry order
    pub fn values(&self) -> Vec<(FieldId, &str)> {
        let raw = [
            &self.pregnancies,
            &self.glucose,
            &self.blood_pressure,
            &self.skin_thickness,
            &self.insulin,
            &self.bmi,
            &self.diabetes_pedigree_function,
            &self.age,
        ];
        FieldId::ALL
            .iter()
            .zip(raw)
            .filter_map(|(id, value)| value.as_deref().map(|v| (*id, v)))
            .collect()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct MockServerArgs {
    #[arg(long, env = "GLYCO_MOCK_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "GLYCO_MOCK_PORT")]
    pub port: Option<u16>,

    /// Label to answer with
    #[arg(long)]
    pub label: Option<String>,

    /// Fail every request with this message
    #[arg(long)]
    pub fail_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["glyco", "fields"]);
        assert_eq!(cli.config, PathBuf::from("glyco.toml"));
        assert!(cli.api_url.is_none());
        assert!(cli.timeout.is_none());
        assert!(matches!(cli.command, Command::Fields));
    }

    #[test]
    fn test_assess_args() {
        let cli = Cli::parse_from([
            "glyco",
            "--api-url",
            "http://predict.local:8080",
            "assess",
            "--glucose",
            "120",
            "--bmi",
            "24.5",
            "--age",
            "-3",
            "--retries",
            "2",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://predict.local:8080"));
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(
            args.values(),
            vec![(FieldId::Glucose, "120"), (FieldId::Bmi, "24.5"), (FieldId::Age, "-3")]
        );
        assert_eq!(args.retries, 2);
        assert!(!args.interactive);
    }

    #[test]
    fn test_mock_server_args() {
        let cli = Cli::parse_from([
            "glyco",
            "mock-server",
            "--port",
            "0",
            "--label",
            "Diabetic",
            "--fail-message",
            "service unavailable",
        ]);
        let Command::MockServer(args) = cli.command else {
            panic!("expected mock-server");
        };
        assert_eq!(args.port, Some(0));
        assert_eq!(args.label.as_deref(), Some("Diabetic"));
        assert_eq!(args.fail_message.as_deref(), Some("service unavailable"));
    }
}
