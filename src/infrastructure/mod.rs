// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_loader;
pub mod dataset_loader;
pub mod http_response;
pub mod logging;
pub mod memory_repository;
pub mod sqlite_loader;
