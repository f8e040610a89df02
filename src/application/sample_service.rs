// Sample service - Use cases backing the dashboard endpoints
use crate::application::error::SampleServiceError;
use crate::application::sample_repository::SampleRepository;
use crate::domain::abundance::SampleSeries;
use crate::domain::metadata::MetadataSummary;
use crate::domain::sample::metadata_sample_id;
use std::sync::Arc;

#[derive(Clone)]
pub struct SampleService {
    repository: Arc<dyn SampleRepository>,
}

impl SampleService {
    pub fn new(repository: Arc<dyn SampleRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_sample_names(&self) -> Result<Vec<String>, SampleServiceError> {
        Ok(self.repository.list_sample_names().await?)
    }

    pub async fn list_otu_descriptions(&self) -> Result<Vec<String>, SampleServiceError> {
        Ok(self.repository.list_otu_descriptions().await?)
    }

    /// Metadata for a sample named like `BB_940`.
    ///
    /// `Ok(None)` when no row matches. When several rows match, the last one
    /// wins.
    pub async fn get_sample_metadata(
        &self,
        sample_name: &str,
    ) -> Result<Option<MetadataSummary>, SampleServiceError> {
        let Some(sample_id) = metadata_sample_id(sample_name) else {
            return Ok(None);
        };

        let rows = self.repository.find_metadata(sample_id).await?;
        Ok(rows.last().map(MetadataSummary::from))
    }

    /// Weekly wash frequency of the first metadata row matching the sample
    pub async fn get_weekly_wash_frequency(
        &self,
        sample_name: &str,
    ) -> Result<i64, SampleServiceError> {
        let not_found = || SampleServiceError::SampleNotFound {
            sample: sample_name.to_string(),
        };

        let sample_id = metadata_sample_id(sample_name).ok_or_else(not_found)?;
        let rows = self.repository.find_metadata(sample_id).await?;
        let first = rows.first().ok_or_else(not_found)?;

        first
            .weekly_wash_frequency()
            .ok_or_else(|| SampleServiceError::WashFrequencyUnavailable {
                sample: sample_name.to_string(),
            })
    }

    /// OTUs counted more than once in the sample column, most abundant first
    pub async fn get_sample_series(
        &self,
        sample_name: &str,
    ) -> Result<SampleSeries, SampleServiceError> {
        let counts = self
            .repository
            .sample_counts(sample_name)
            .await?
            .ok_or_else(|| SampleServiceError::SampleColumnNotFound {
                sample: sample_name.to_string(),
            })?;

        Ok(SampleSeries::from_counts(&counts))
    }
}
