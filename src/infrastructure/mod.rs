// Infrastructure layer - Configuration, seed sources and HTTP encoding
pub mod chunked_json;
pub mod config;
pub mod http_response;
pub mod mock_source;
pub mod toml_source;
