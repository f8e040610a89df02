// Application layer - Use cases over the sample repository
pub mod error;
pub mod sample_repository;
pub mod sample_service;
