// Repository trait for sample data access
use crate::domain::abundance::SampleCounts;
use crate::domain::metadata::SampleMetadata;
use async_trait::async_trait;

/// Read-only access to the taxonomy, abundance and metadata tables
#[async_trait]
pub trait SampleRepository: Send + Sync {
    /// Sample column names of the abundance table, in table order
    async fn list_sample_names(&self) -> anyhow::Result<Vec<String>>;

    /// `lowest_taxonomic_unit_found` of every taxonomic unit, in row order
    async fn list_otu_descriptions(&self) -> anyhow::Result<Vec<String>>;

    /// Every metadata row whose `SAMPLEID` equals `sample_id`, in row order
    async fn find_metadata(&self, sample_id: i64) -> anyhow::Result<Vec<SampleMetadata>>;

    /// Row keys and counts of a single sample column.
    /// Returns `None` when the abundance table has no such column.
    async fn sample_counts(&self, sample_name: &str) -> anyhow::Result<Option<SampleCounts>>;
}
