pub mod mock_api;
pub mod recorder;
