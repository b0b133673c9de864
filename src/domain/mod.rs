pub mod prediction;

pub use prediction::{ErrorBody, PredictionPayload, PredictionPort, PredictionResponse};
