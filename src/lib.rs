//! # Glyco - Diabetes Risk Assessment
//!
//! Glyco collects eight health measurements, validates them locally, submits
//! them to a remote risk-prediction service and reports the resulting risk
//! classification.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyco::adapters::prediction_client::HttpPredictionClient;
//! use glyco::config::Settings;
//! use glyco::form::FieldId;
//! use glyco::submission::{FormEvent, SubmissionController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()?;
//!     let client = HttpPredictionClient::new(&settings.service)?;
//!
//!     let mut controller = SubmissionController::new();
//!     controller.dispatch(FormEvent::field_changed(FieldId::Glucose, "120"));
//!     // ... remaining fields
//!     controller.submit_with(&client).await;
//!
//!     println!("{:?}", controller.snapshot().submission());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Form**: field registry, validation, value store and error tracking
//! - **Submission**: lifecycle state machine and feedback mapping
//! - **Domain**: wire types and the port to the prediction service
//! - **Adapters**: HTTP client, mock service, terminal presentation
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod form;
pub mod submission;
