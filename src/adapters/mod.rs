pub mod mock_service;
pub mod prediction_client;
pub mod terminal;
