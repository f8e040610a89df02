// Dataset loading - picks the configured source and checks the result
use crate::domain::dataset::SampleDataset;
use crate::infrastructure::config::{DatasetSettings, DatasetSource};
use crate::infrastructure::csv_loader::load_csv_dataset;
use crate::infrastructure::sqlite_loader::load_sqlite_dataset;
use tracing::{info, warn};

pub async fn load_dataset(settings: &DatasetSettings) -> anyhow::Result<SampleDataset> {
    let dataset = match settings.source {
        DatasetSource::Sqlite => load_sqlite_dataset(&settings.sqlite_path).await?,
        DatasetSource::Csv => load_csv_dataset(&settings.csv)?,
    };

    info!(
        "Loaded {} taxonomic units, {} samples, {} metadata rows",
        dataset.taxonomic_units.len(),
        dataset.abundances.sample_names().count(),
        dataset.metadata.len()
    );

    if let Some(message) = alignment_warning(&dataset) {
        warn!("{}", message);
    }

    Ok(dataset)
}

/// Message logged when abundance rows cannot line up with taxonomic units
fn alignment_warning(dataset: &SampleDataset) -> Option<String> {
    if dataset.is_aligned() {
        return None;
    }
    Some(format!(
        "Abundance table has {} rows but there are {} taxonomic units",
        dataset.abundances.row_count(),
        dataset.taxonomic_units.len()
    ))
}
