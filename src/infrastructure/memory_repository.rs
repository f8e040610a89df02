// In-memory repository over a dataset loaded at startup
use crate::application::sample_repository::SampleRepository;
use crate::domain::abundance::SampleCounts;
use crate::domain::dataset::SampleDataset;
use crate::domain::metadata::SampleMetadata;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    dataset: SampleDataset,
}

impl InMemoryRepository {
    pub fn new(dataset: SampleDataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl SampleRepository for InMemoryRepository {
    async fn list_sample_names(&self) -> Result<Vec<String>> {
        Ok(self
            .dataset
            .abundances
            .sample_names()
            .map(str::to_string)
            .collect())
    }

    async fn list_otu_descriptions(&self) -> Result<Vec<String>> {
        Ok(self
            .dataset
            .taxonomic_units
            .iter()
            .map(|unit| unit.lowest_taxonomic_unit_found.clone())
            .collect())
    }

    async fn find_metadata(&self, sample_id: i64) -> Result<Vec<SampleMetadata>> {
        Ok(self
            .dataset
            .metadata
            .iter()
            .filter(|row| row.sample_id == sample_id)
            .cloned()
            .collect())
    }

    async fn sample_counts(&self, sample_name: &str) -> Result<Option<SampleCounts>> {
        Ok(self.dataset.abundances.sample_counts(sample_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_dataset;

    #[tokio::test]
    async fn test_find_metadata_keeps_row_order() {
        let repository = InMemoryRepository::new(test_dataset());
        let rows = repository.find_metadata(943).await.unwrap();
        let ethnicities: Vec<_> = rows.iter().map(|row| row.ethnicity.as_deref()).collect();
        assert_eq!(ethnicities, vec![Some("Asian"), Some("European")]);
        assert!(repository.find_metadata(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_dataset() {
        let repository = InMemoryRepository::new(SampleDataset::default());
        assert!(repository.list_sample_names().await.unwrap().is_empty());
        assert!(repository.list_otu_descriptions().await.unwrap().is_empty());
        assert!(repository.sample_counts("BB_940").await.unwrap().is_none());
    }
}
