// Domain layer - Sample dataset models
pub mod abundance;
pub mod dataset;
pub mod metadata;
pub mod sample;
pub mod taxonomy;
